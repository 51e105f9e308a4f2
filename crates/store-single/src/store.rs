// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Backend dispatch.
//!
//! `Store` wraps either the in-memory or the SQLite backend behind one
//! interface, so the engine never names a backend.

use tracing::{debug, instrument};

use crate::{KvStore, MemoryStore, RawEntry, Result, SqliteConfig, SqliteStore, memory::MemoryIter, sqlite::SqliteIter};

/// Where a table keeps its rows.
#[derive(Clone)]
pub enum StorageConfig {
	/// Every open attaches to the same entries.
	Memory(MemoryStore),
	/// Every open creates a new connection to the database file.
	Sqlite(SqliteConfig),
}

impl StorageConfig {
	pub fn memory() -> Self {
		Self::Memory(MemoryStore::new())
	}

	pub fn sqlite(config: SqliteConfig) -> Self {
		Self::Sqlite(config)
	}
}

#[derive(Clone)]
#[repr(u8)]
pub enum Store {
	/// In-memory storage (non-persistent)
	Memory(MemoryStore) = 0,
	/// SQLite-based persistent storage
	Sqlite(SqliteStore) = 1,
}

pub enum StoreIter {
	Memory(MemoryIter),
	Sqlite(SqliteIter),
}

impl Store {
	#[instrument(name = "store::open", level = "debug", skip(config))]
	pub fn open(config: &StorageConfig) -> Result<Self> {
		match config {
			StorageConfig::Memory(store) => Ok(Self::Memory(store.clone())),
			StorageConfig::Sqlite(config) => Ok(Self::Sqlite(SqliteStore::open(config)?)),
		}
	}

	#[instrument(name = "store::close", level = "debug", skip(self))]
	pub fn close(self) -> Result<()> {
		match self {
			Self::Memory(_) => {
				debug!("detached from memory store");
				Ok(())
			}
			Self::Sqlite(s) => s.close(),
		}
	}
}

impl KvStore for Store {
	type Iter = StoreIter;

	#[inline]
	fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
		match self {
			Self::Memory(s) => s.get(key),
			Self::Sqlite(s) => s.get(key),
		}
	}

	#[inline]
	fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
		match self {
			Self::Memory(s) => s.put(key, value),
			Self::Sqlite(s) => s.put(key, value),
		}
	}

	#[inline]
	fn delete(&self, key: &[u8]) -> Result<()> {
		match self {
			Self::Memory(s) => s.delete(key),
			Self::Sqlite(s) => s.delete(key),
		}
	}

	#[inline]
	fn iter(&self) -> Result<StoreIter> {
		match self {
			Self::Memory(s) => Ok(StoreIter::Memory(s.iter()?)),
			Self::Sqlite(s) => Ok(StoreIter::Sqlite(s.iter()?)),
		}
	}

	#[inline]
	fn count(&self) -> Result<u64> {
		match self {
			Self::Memory(s) => s.count(),
			Self::Sqlite(s) => s.count(),
		}
	}
}

impl Iterator for StoreIter {
	type Item = Result<RawEntry>;

	#[inline]
	fn next(&mut self) -> Option<Self::Item> {
		match self {
			Self::Memory(iter) => iter.next(),
			Self::Sqlite(iter) => iter.next(),
		}
	}
}

#[cfg(test)]
pub mod tests {
	use super::*;

	fn fill(store: &Store) {
		store.put(b"a", b"1").unwrap();
		store.put(b"b", b"2").unwrap();
		store.put(b"c", b"3").unwrap();
	}

	#[test]
	fn test_memory_backend() {
		let store = Store::open(&StorageConfig::memory()).unwrap();

		store.put(b"key", b"value").unwrap();
		assert_eq!(store.get(b"key").unwrap().as_deref(), Some(b"value".as_slice()));
	}

	#[test]
	fn test_sqlite_backend() {
		let store = Store::open(&StorageConfig::sqlite(SqliteConfig::in_memory())).unwrap();

		store.put(b"key", b"value").unwrap();
		assert_eq!(store.get(b"key").unwrap().as_deref(), Some(b"value".as_slice()));
	}

	#[test]
	fn test_iter_memory() {
		let store = Store::open(&StorageConfig::memory()).unwrap();
		fill(&store);

		let entries: Vec<_> = store.iter().unwrap().map(|e| e.unwrap()).collect();
		assert_eq!(entries.len(), 3);
		assert_eq!(entries[0].key, b"a");
		assert_eq!(entries[2].value, b"3");
		assert_eq!(store.count().unwrap(), 3);
	}

	#[test]
	fn test_iter_sqlite() {
		let store = Store::open(&StorageConfig::sqlite(SqliteConfig::in_memory())).unwrap();
		fill(&store);

		let entries: Vec<_> = store.iter().unwrap().map(|e| e.unwrap()).collect();
		assert_eq!(entries.len(), 3);
		assert_eq!(entries[0].key, b"a");
		assert_eq!(entries[2].value, b"3");
		assert_eq!(store.count().unwrap(), 3);
	}

	#[test]
	fn test_memory_reopen_shares_entries() {
		let config = StorageConfig::memory();

		let store = Store::open(&config).unwrap();
		fill(&store);
		store.close().unwrap();

		let store = Store::open(&config).unwrap();
		assert_eq!(store.get(b"b").unwrap().as_deref(), Some(b"2".as_slice()));
	}
}
