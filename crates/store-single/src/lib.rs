// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Single-version ordered key-value store backing one table.
//!
//! Keys and values are raw byte strings. Iteration is forward only and in
//! byte-lexicographic key order.

pub mod memory;
pub mod sqlite;
mod store;

pub use kvtable_type::Result;
pub use memory::{MemoryConfig, MemoryStore};
pub use sqlite::{JournalMode, OpenFlags, SqliteConfig, SqliteStore, SynchronousMode, TempStore};
pub use store::{StorageConfig, Store, StoreIter};

/// Entries fetched from a store per refill of an iterator.
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// A key-value pair read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
	pub key: Vec<u8>,
	pub value: Vec<u8>,
}

/// Operations every backend provides.
pub trait KvStore: Send + Sync {
	type Iter: Iterator<Item = Result<RawEntry>> + Send;

	fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

	/// Inserts or overwrites `key`.
	fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

	/// Removes `key`. Removing an absent key succeeds.
	fn delete(&self, key: &[u8]) -> Result<()>;

	/// Forward iterator positioned at the first key.
	fn iter(&self) -> Result<Self::Iter>;

	/// Number of stored entries, used for planning estimates.
	fn count(&self) -> Result<u64>;
}
