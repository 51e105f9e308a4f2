// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Write sessions.
//!
//! Every applied row is a single independent store call. Updates are
//! unconditional upserts keyed by the row's own key column. Deletes identify
//! the stored entry by the key carried over from the scan that produced the
//! row.

use std::fmt::{Display, Formatter};

use kvtable_core::Row;
use kvtable_store_single::{KvStore, Store};
use kvtable_type::{ModifyError, Result, error};
use tracing::{debug, instrument, warn};

use crate::table::{TableDef, TableHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifyKind {
	Insert,
	Update,
	Delete,
}

impl ModifyKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ModifyKind::Insert => "insert",
			ModifyKind::Update => "update",
			ModifyKind::Delete => "delete",
		}
	}
}

impl Display for ModifyKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifyFlags {
	/// Statement is only being described, no handle is opened.
	pub explain_only: bool,
}

pub struct ModifySession {
	def: TableDef,
	kind: ModifyKind,
	handle: Option<TableHandle>,
	owns_handle: bool,
	closed: bool,
	affected: u64,
}

impl ModifySession {
	/// Insert session owning its own handle, or none in explain-only mode.
	#[instrument(name = "modify::begin_insert", level = "debug", skip_all, fields(table = %def.name, explain_only = flags.explain_only))]
	pub fn begin_insert(def: &TableDef, flags: ModifyFlags) -> Result<Self> {
		let handle = if flags.explain_only {
			None
		} else {
			Some(TableHandle::open(def)?)
		};

		Ok(Self {
			def: def.clone(),
			kind: ModifyKind::Insert,
			owns_handle: handle.is_some(),
			handle,
			closed: false,
			affected: 0,
		})
	}

	/// Insert session without a handle, for loads that run outside a plan.
	///
	/// Each row opens the store, writes and closes it again.
	pub fn detached(def: &TableDef) -> Self {
		debug!(table = %def.name, "detached insert session");
		Self {
			def: def.clone(),
			kind: ModifyKind::Insert,
			handle: None,
			owns_handle: false,
			closed: false,
			affected: 0,
		}
	}

	/// Update session writing through the handle of the feeding scan.
	pub fn begin_update(def: &TableDef, handle: &TableHandle) -> Self {
		Self::shared(def, ModifyKind::Update, handle)
	}

	/// Delete session writing through the handle of the feeding scan.
	pub fn begin_delete(def: &TableDef, handle: &TableHandle) -> Self {
		Self::shared(def, ModifyKind::Delete, handle)
	}

	fn shared(def: &TableDef, kind: ModifyKind, handle: &TableHandle) -> Self {
		debug!(table = %def.name, kind = %kind, "session on shared handle");
		Self {
			def: def.clone(),
			kind,
			handle: Some(handle.clone()),
			owns_handle: false,
			closed: false,
			affected: 0,
		}
	}

	fn check(&self, operation: ModifyKind) -> Result<()> {
		if self.closed {
			return Err(error!(ModifyError::SessionClosed {
				table: self.def.name.clone(),
			}));
		}
		if self.kind != operation {
			return Err(error!(ModifyError::KindMismatch {
				session: self.kind.as_str(),
				operation: operation.as_str(),
			}));
		}
		Ok(())
	}

	fn write(&self, f: impl FnOnce(&Store) -> Result<()>) -> Result<()> {
		match &self.handle {
			Some(handle) => handle.with_store(f),
			None => {
				let store = Store::open(&self.def.storage)?;
				let result = f(&store);
				let closed = store.close();
				result.and(closed)
			}
		}
	}

	#[instrument(name = "modify::insert", level = "trace", skip_all, fields(table = %self.def.name))]
	pub fn insert(&mut self, row: &Row) -> Result<()> {
		self.check(ModifyKind::Insert)?;
		let (key, values) = self.def.schema.encode_row(row)?;
		self.write(|store| store.put(&key, &values))?;
		self.affected += 1;
		Ok(())
	}

	/// Writes `row` under its own key, whether or not an entry exists.
	#[instrument(name = "modify::update", level = "trace", skip_all, fields(table = %self.def.name))]
	pub fn update(&mut self, row: &Row) -> Result<()> {
		self.check(ModifyKind::Update)?;
		let (key, values) = self.def.schema.encode_row(row)?;
		self.write(|store| store.put(&key, &values))?;
		self.affected += 1;
		Ok(())
	}

	/// Removes the entry stored under `carried_key`. An empty key counts as
	/// absent. Removing a key that is not stored succeeds.
	#[instrument(name = "modify::delete", level = "trace", skip_all, fields(table = %self.def.name))]
	pub fn delete(&mut self, carried_key: Option<&[u8]>) -> Result<()> {
		self.check(ModifyKind::Delete)?;
		let key = match carried_key {
			Some(key) if !key.is_empty() => key,
			_ => {
				return Err(error!(ModifyError::MissingKey {
					table: self.def.name.clone(),
				}));
			}
		};
		self.write(|store| store.delete(key))?;
		self.affected += 1;
		Ok(())
	}

	/// Ends the session. Only a handle the session opened itself is closed.
	#[instrument(name = "modify::close", level = "debug", skip_all, fields(table = %self.def.name, affected = self.affected))]
	pub fn close(&mut self) -> Result<()> {
		if self.closed {
			return Ok(());
		}
		self.closed = true;

		let handle = self.handle.take();
		match handle {
			Some(handle) if self.owns_handle => handle.close(),
			_ => Ok(()),
		}
	}

	pub fn kind(&self) -> ModifyKind {
		self.kind
	}

	/// Rows applied so far.
	pub fn affected(&self) -> u64 {
		self.affected
	}

	pub fn is_closed(&self) -> bool {
		self.closed
	}
}

impl Drop for ModifySession {
	fn drop(&mut self) {
		if !self.closed && self.owns_handle {
			warn!(table = %self.def.name, "insert session dropped without close");
			if let Err(err) = self.close() {
				warn!(table = %self.def.name, error = %err.message, "failed to close session");
			}
		}
	}
}
