// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Table scans.
//!
//! A scan either reads a single key, when its filters pin the key column to a
//! literal, or iterates the whole store in key byte order. It owns the table
//! handle of its plan and closes it on [`TableScan::close`].

use kvtable_core::{EncodedKey, Expression, Row};
use kvtable_store_single::{KvStore, StoreIter};
use kvtable_type::{Result, ScanError, error};
use tracing::{debug, instrument, warn};

use crate::{
	pushdown::try_extract_key_equality,
	table::{TableDef, TableHandle},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanFlags {
	/// Plan is only being described, the store is never read.
	pub explain_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
	Created,
	PointReady,
	RangeReady,
	Exhausted,
	Closed,
}

enum Cursor {
	None,
	Point(EncodedKey),
	Range(StoreIter),
}

pub struct TableScan {
	def: TableDef,
	handle: TableHandle,
	filters: Vec<Expression>,
	flags: ScanFlags,
	state: ScanState,
	cursor: Cursor,
	carried_key: Option<EncodedKey>,
}

impl TableScan {
	#[instrument(name = "scan::open", level = "debug", skip_all, fields(table = %def.name, explain_only = flags.explain_only))]
	pub(crate) fn open(
		def: TableDef,
		handle: TableHandle,
		filters: Vec<Expression>,
		flags: ScanFlags,
	) -> Result<Self> {
		handle.ensure_open()?;

		let mut scan = Self {
			def,
			handle,
			filters,
			flags,
			state: ScanState::Created,
			cursor: Cursor::None,
			carried_key: None,
		};

		if !flags.explain_only {
			scan.position()?;
		}
		Ok(scan)
	}

	fn position(&mut self) -> Result<()> {
		self.cursor = Cursor::None;
		self.carried_key = None;

		match try_extract_key_equality(&self.def.schema, &self.filters)? {
			Some(key) => {
				debug!(key = ?key, "point lookup");
				self.cursor = Cursor::Point(key);
				self.state = ScanState::PointReady;
			}
			None => {
				let iter = self.handle.with_store(|store| store.iter())?;
				self.cursor = Cursor::Range(iter);
				self.state = ScanState::RangeReady;
			}
		}
		Ok(())
	}

	/// Next row in key byte order, `None` once the scan is exhausted.
	pub fn next(&mut self) -> Result<Option<Row>> {
		match self.state {
			ScanState::Closed => Err(error!(ScanError::Closed {
				table: self.def.name.clone(),
			})),
			ScanState::Created | ScanState::Exhausted => Ok(None),
			ScanState::PointReady => self.next_point(),
			ScanState::RangeReady => self.next_range(),
		}
	}

	fn next_point(&mut self) -> Result<Option<Row>> {
		let Cursor::Point(key) = std::mem::replace(&mut self.cursor, Cursor::None) else {
			self.state = ScanState::Exhausted;
			return Ok(None);
		};
		self.state = ScanState::Exhausted;

		let Some(value) = self.handle.with_store(|store| store.get(&key))? else {
			return Ok(None);
		};

		let row = self.def.schema.decode_row(&key, &value)?;
		self.carried_key = Some(key);
		Ok(Some(row))
	}

	fn next_range(&mut self) -> Result<Option<Row>> {
		let Cursor::Range(iter) = &mut self.cursor else {
			self.state = ScanState::Exhausted;
			return Ok(None);
		};

		match iter.next() {
			Some(entry) => {
				let entry = entry?;
				let row = self.def.schema.decode_row(&entry.key, &entry.value)?;
				self.carried_key = Some(EncodedKey(entry.key));
				Ok(Some(row))
			}
			None => {
				self.cursor = Cursor::None;
				self.state = ScanState::Exhausted;
				Ok(None)
			}
		}
	}

	/// Restarts the scan from the beginning, with new filters if given.
	///
	/// The key lookup is decided again, so changed filter literals are honored.
	#[instrument(name = "scan::rescan", level = "debug", skip_all, fields(table = %self.def.name))]
	pub fn rescan(&mut self, filters: Option<Vec<Expression>>) -> Result<()> {
		if self.state == ScanState::Closed {
			return Err(error!(ScanError::Closed {
				table: self.def.name.clone(),
			}));
		}

		if let Some(filters) = filters {
			self.filters = filters;
		}

		if self.flags.explain_only {
			return Ok(());
		}
		self.position()
	}

	/// Releases the cursor and closes the table handle.
	#[instrument(name = "scan::close", level = "debug", skip_all, fields(table = %self.def.name))]
	pub fn close(&mut self) -> Result<()> {
		if self.state == ScanState::Closed {
			return Ok(());
		}

		self.cursor = Cursor::None;
		self.state = ScanState::Closed;
		self.handle.close()
	}

	pub fn state(&self) -> ScanState {
		self.state
	}

	/// Encoded key of the row last returned by [`TableScan::next`].
	///
	/// This is the value a delete session expects as its carried key.
	pub fn carried_key(&self) -> Option<&EncodedKey> {
		self.carried_key.as_ref()
	}

	pub fn handle(&self) -> &TableHandle {
		&self.handle
	}
}

impl Drop for TableScan {
	fn drop(&mut self) {
		if self.state != ScanState::Closed {
			warn!(table = %self.def.name, "scan dropped without close");
			if let Err(err) = self.close() {
				warn!(table = %self.def.name, error = %err.message, "failed to close scan");
			}
		}
	}
}

#[cfg(test)]
pub mod tests {
	use kvtable_core::{ColumnDef, Schema, row};
	use kvtable_store_single::{MemoryStore, StorageConfig};
	use kvtable_type::{ErrorKind, Type};

	use super::*;
	use crate::{ModifyFlags, ModifySession, TablePlan};

	fn def() -> TableDef {
		let schema = Schema::new(vec![ColumnDef::new("id", Type::Int4), ColumnDef::new("name", Type::Utf8)])
			.unwrap();
		TableDef::new("names", schema, StorageConfig::Memory(MemoryStore::new()))
	}

	fn seeded() -> TableDef {
		let def = def();
		let mut session = ModifySession::begin_insert(&def, ModifyFlags::default()).unwrap();
		session.insert(&row![1i32, "a"]).unwrap();
		session.insert(&row![2i32, "b"]).unwrap();
		session.insert(&row![3i32, "c"]).unwrap();
		session.close().unwrap();
		def
	}

	fn id_equals(v: i32) -> Vec<Expression> {
		vec![Expression::equal(Expression::column(0, "id"), Expression::constant(v))]
	}

	#[test]
	fn test_range_states() {
		let plan = TablePlan::open(&seeded()).unwrap();
		let mut scan = plan.begin_scan(vec![], ScanFlags::default()).unwrap();
		assert_eq!(scan.state(), ScanState::RangeReady);

		assert_eq!(scan.next().unwrap(), Some(row![1i32, "a"]));
		assert_eq!(scan.carried_key().unwrap().as_slice(), &1i32.to_le_bytes());
		assert!(scan.next().unwrap().is_some());
		assert!(scan.next().unwrap().is_some());
		assert_eq!(scan.next().unwrap(), None);
		assert_eq!(scan.state(), ScanState::Exhausted);
		assert_eq!(scan.next().unwrap(), None);

		scan.close().unwrap();
		assert_eq!(scan.state(), ScanState::Closed);
	}

	#[test]
	fn test_point_states() {
		let plan = TablePlan::open(&seeded()).unwrap();
		let mut scan = plan.begin_scan(id_equals(2), ScanFlags::default()).unwrap();
		assert_eq!(scan.state(), ScanState::PointReady);

		assert_eq!(scan.next().unwrap(), Some(row![2i32, "b"]));
		assert_eq!(scan.state(), ScanState::Exhausted);
		assert_eq!(scan.next().unwrap(), None);
		scan.close().unwrap();
	}

	#[test]
	fn test_point_miss() {
		let plan = TablePlan::open(&seeded()).unwrap();
		let mut scan = plan.begin_scan(id_equals(9), ScanFlags::default()).unwrap();
		assert_eq!(scan.next().unwrap(), None);
		assert_eq!(scan.state(), ScanState::Exhausted);
		assert!(scan.carried_key().is_none());
		scan.close().unwrap();
	}

	#[test]
	fn test_explain_only_never_reads() {
		let plan = TablePlan::open(&seeded()).unwrap();
		let mut scan = plan
			.begin_scan(
				id_equals(1),
				ScanFlags {
					explain_only: true,
				},
			)
			.unwrap();
		assert_eq!(scan.state(), ScanState::Created);
		assert_eq!(scan.next().unwrap(), None);
		scan.rescan(None).unwrap();
		assert_eq!(scan.state(), ScanState::Created);
		scan.close().unwrap();
		assert!(!plan.handle().is_open());
	}

	#[test]
	fn test_closed_scan_rejects_next() {
		let plan = TablePlan::open(&seeded()).unwrap();
		let mut scan = plan.begin_scan(vec![], ScanFlags::default()).unwrap();
		scan.close().unwrap();
		scan.close().unwrap();

		let err = scan.next().unwrap_err();
		assert_eq!(err.code, "SCAN_001");
		assert_eq!(err.kind(), ErrorKind::InvalidInput);
		assert_eq!(scan.rescan(None).unwrap_err().code, "SCAN_001");
	}

	#[test]
	fn test_rescan_resets_range() {
		let plan = TablePlan::open(&seeded()).unwrap();
		let mut scan = plan.begin_scan(vec![], ScanFlags::default()).unwrap();
		while scan.next().unwrap().is_some() {}

		scan.rescan(None).unwrap();
		assert_eq!(scan.state(), ScanState::RangeReady);
		assert!(scan.carried_key().is_none());
		assert_eq!(scan.next().unwrap(), Some(row![1i32, "a"]));
		scan.close().unwrap();
	}

	#[test]
	fn test_rescan_with_new_literal() {
		let plan = TablePlan::open(&seeded()).unwrap();
		let mut scan = plan.begin_scan(id_equals(1), ScanFlags::default()).unwrap();
		assert_eq!(scan.next().unwrap(), Some(row![1i32, "a"]));

		scan.rescan(Some(id_equals(3))).unwrap();
		assert_eq!(scan.state(), ScanState::PointReady);
		assert_eq!(scan.next().unwrap(), Some(row![3i32, "c"]));

		scan.rescan(Some(vec![])).unwrap();
		assert_eq!(scan.state(), ScanState::RangeReady);
		scan.close().unwrap();
	}

	#[test]
	fn test_drop_closes_handle() {
		let plan = TablePlan::open(&seeded()).unwrap();
		let scan = plan.begin_scan(vec![], ScanFlags::default()).unwrap();
		drop(scan);
		assert!(!plan.handle().is_open());
	}

	#[test]
	fn test_begin_on_closed_handle() {
		let plan = TablePlan::open(&seeded()).unwrap();
		plan.handle().close().unwrap();
		let err = plan.begin_scan(vec![], ScanFlags::default()).err().unwrap();
		assert_eq!(err.code, "STORE_005");
	}
}
