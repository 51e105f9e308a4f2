// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! SQLite backend.
//!
//! One `kv` table per database file. BLOB keys compare with `memcmp`, which
//! gives the byte-lexicographic order the iterator relies on.

mod config;
mod connection;
mod iterator;

use std::{path::PathBuf, sync::Arc};

pub use config::{JournalMode, OpenFlags, SqliteConfig, SynchronousMode, TempStore};
use connection::connect;
pub use iterator::SqliteIter;
use kvtable_type::{Result, StoreError, error, internal_error};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, instrument, warn};

use crate::KvStore;

#[derive(Clone)]
pub struct SqliteStore {
	conn: Arc<Mutex<Connection>>,
	path: PathBuf,
	batch_size: usize,
}

impl SqliteStore {
	#[instrument(name = "store::sqlite::open", level = "debug", skip(config), fields(
		db_path = ?config.path,
		journal_mode = %config.journal_mode.as_str()
	))]
	pub fn open(config: &SqliteConfig) -> Result<Self> {
		let (path, conn) = connect(config)?;
		Ok(Self {
			conn: Arc::new(Mutex::new(conn)),
			path,
			batch_size: config.batch_size,
		})
	}

	/// Path of the database file, after directory resolution.
	pub fn path(&self) -> &PathBuf {
		&self.path
	}

	/// Closes the connection. An iterator still holding the connection keeps
	/// it open until it is dropped.
	#[instrument(name = "store::sqlite::close", level = "debug", skip(self), fields(db_path = ?self.path))]
	pub fn close(self) -> Result<()> {
		match Arc::try_unwrap(self.conn) {
			Ok(conn) => conn
				.into_inner()
				.close()
				.map_err(|(_, e)| error!(internal_error!("failed to close {}: {}", self.path.display(), e))),
			Err(_) => {
				warn!(db_path = ?self.path, "connection still referenced, deferring close");
				Ok(())
			}
		}
	}
}

impl KvStore for SqliteStore {
	type Iter = SqliteIter;

	#[instrument(name = "store::sqlite::get", level = "trace", skip(self, key), fields(key_len = key.len()))]
	fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
		let conn = self.conn.lock();
		let mut stmt = conn.prepare_cached("SELECT value FROM kv WHERE key = ?1").map_err(|e| {
			error!(StoreError::Read {
				operation: "get",
				reason: e.to_string(),
			})
		})?;

		stmt.query_row(params![key], |row| row.get(0)).optional().map_err(|e| {
			error!(StoreError::Read {
				operation: "get",
				reason: e.to_string(),
			})
		})
	}

	#[instrument(name = "store::sqlite::put", level = "debug", skip(self, key, value), fields(key_len = key.len(), value_len = value.len()))]
	fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
		let conn = self.conn.lock();
		conn.prepare_cached("INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)")
			.and_then(|mut stmt| stmt.execute(params![key, value]))
			.map_err(|e| {
				error!(StoreError::Put {
					reason: e.to_string(),
				})
			})?;
		Ok(())
	}

	#[instrument(name = "store::sqlite::delete", level = "debug", skip(self, key), fields(key_len = key.len()))]
	fn delete(&self, key: &[u8]) -> Result<()> {
		let conn = self.conn.lock();
		let removed = conn
			.prepare_cached("DELETE FROM kv WHERE key = ?1")
			.and_then(|mut stmt| stmt.execute(params![key]))
			.map_err(|e| {
				error!(StoreError::Delete {
					reason: e.to_string(),
				})
			})?;
		if removed == 0 {
			debug!("delete of absent key");
		}
		Ok(())
	}

	fn iter(&self) -> Result<SqliteIter> {
		let mut iter = SqliteIter {
			conn: Arc::clone(&self.conn),
			batch_size: self.batch_size,
			buffer: Vec::new(),
			pos: 0,
			exhausted: false,
		};
		iter.load_batch(None)?;
		Ok(iter)
	}

	#[instrument(name = "store::sqlite::count", level = "trace", skip(self))]
	fn count(&self) -> Result<u64> {
		let conn = self.conn.lock();
		let count: i64 = conn.query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0)).map_err(|e| {
			error!(StoreError::Read {
				operation: "count",
				reason: e.to_string(),
			})
		})?;
		Ok(count as u64)
	}
}
