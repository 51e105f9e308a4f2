// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use kvtable_type::{Result, StoreError, error};
use parking_lot::Mutex;
use rusqlite::{Connection, params};

use crate::RawEntry;

/// Forward iterator over the `kv` table.
pub struct SqliteIter {
	pub(super) conn: Arc<Mutex<Connection>>,
	pub(super) batch_size: usize,
	pub(super) buffer: Vec<RawEntry>,
	pub(super) pos: usize,
	pub(super) exhausted: bool,
}

fn read_failed(e: rusqlite::Error) -> StoreError {
	StoreError::Read {
		operation: "iterate",
		reason: e.to_string(),
	}
}

impl SqliteIter {
	pub(super) fn load_batch(&mut self, after: Option<&[u8]>) -> Result<()> {
		let conn = self.conn.lock();
		let limit = self.batch_size as i64;

		let buffer = match after {
			Some(key) => {
				let mut stmt = conn
					.prepare_cached("SELECT key, value FROM kv WHERE key > ?1 ORDER BY key LIMIT ?2")
					.map_err(|e| error!(read_failed(e)))?;
				let rows = stmt
					.query_map(params![key, limit], |row| {
						Ok(RawEntry {
							key: row.get(0)?,
							value: row.get(1)?,
						})
					})
					.map_err(|e| error!(read_failed(e)))?;
				rows.collect::<rusqlite::Result<Vec<_>>>().map_err(|e| error!(read_failed(e)))?
			}
			None => {
				let mut stmt = conn
					.prepare_cached("SELECT key, value FROM kv ORDER BY key LIMIT ?1")
					.map_err(|e| error!(read_failed(e)))?;
				let rows = stmt
					.query_map(params![limit], |row| {
						Ok(RawEntry {
							key: row.get(0)?,
							value: row.get(1)?,
						})
					})
					.map_err(|e| error!(read_failed(e)))?;
				rows.collect::<rusqlite::Result<Vec<_>>>().map_err(|e| error!(read_failed(e)))?
			}
		};
		drop(conn);

		self.buffer = buffer;
		self.pos = 0;
		self.exhausted = self.buffer.is_empty();
		Ok(())
	}

	fn refill(&mut self) -> Result<()> {
		let last_key = self.buffer.last().map(|e| e.key.clone());

		match &last_key {
			Some(key) => self.load_batch(Some(key.as_slice())),
			None => {
				self.exhausted = true;
				Ok(())
			}
		}
	}
}

impl Iterator for SqliteIter {
	type Item = Result<RawEntry>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.pos >= self.buffer.len() && !self.exhausted {
			if let Err(e) = self.refill() {
				self.exhausted = true;
				return Some(Err(e));
			}
		}

		if self.pos < self.buffer.len() {
			let entry = self.buffer[self.pos].clone();
			self.pos += 1;
			Some(Ok(entry))
		} else {
			None
		}
	}
}
