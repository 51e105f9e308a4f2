// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! In-memory backend on a lock-free skiplist.

use std::{ops::Bound, sync::Arc};

use crossbeam_skiplist::SkipMap;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{DEFAULT_BATCH_SIZE, KvStore, Result};

mod iterator;

pub use iterator::MemoryIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
	pub batch_size: usize,
}

impl Default for MemoryConfig {
	fn default() -> Self {
		Self {
			batch_size: DEFAULT_BATCH_SIZE,
		}
	}
}

impl MemoryConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn batch_size(mut self, batch_size: usize) -> Self {
		self.batch_size = batch_size.max(1);
		self
	}
}

/// Non-persistent store. Clones share the same entries.
#[derive(Clone, Default)]
pub struct MemoryStore {
	entries: Arc<SkipMap<Vec<u8>, Vec<u8>>>,
	config: MemoryConfig,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_config(config: MemoryConfig) -> Self {
		Self {
			entries: Arc::new(SkipMap::new()),
			config,
		}
	}
}

impl KvStore for MemoryStore {
	type Iter = MemoryIter;

	#[instrument(name = "store::memory::get", level = "trace", skip(self, key), fields(key_len = key.len()))]
	fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
		Ok(self.entries.get(key).map(|entry| entry.value().clone()))
	}

	#[instrument(name = "store::memory::put", level = "debug", skip(self, key, value), fields(key_len = key.len(), value_len = value.len()))]
	fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
		self.entries.insert(key.to_vec(), value.to_vec());
		Ok(())
	}

	#[instrument(name = "store::memory::delete", level = "debug", skip(self, key), fields(key_len = key.len()))]
	fn delete(&self, key: &[u8]) -> Result<()> {
		self.entries.remove(key);
		Ok(())
	}

	fn iter(&self) -> Result<MemoryIter> {
		let mut iter = MemoryIter {
			entries: Arc::clone(&self.entries),
			batch_size: self.config.batch_size,
			buffer: Vec::new(),
			pos: 0,
			exhausted: false,
		};
		iter.load_batch(Bound::Unbounded);
		Ok(iter)
	}

	fn count(&self) -> Result<u64> {
		Ok(self.entries.len() as u64)
	}
}
