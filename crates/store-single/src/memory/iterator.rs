// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ops::Bound, sync::Arc};

use crossbeam_skiplist::SkipMap;

use crate::{RawEntry, Result};

/// Forward iterator over the in-memory store.
///
/// Entries are copied out in batches. Each refill restarts after the last key
/// returned, so concurrent writes behind the cursor are never revisited.
pub struct MemoryIter {
	pub(super) entries: Arc<SkipMap<Vec<u8>, Vec<u8>>>,
	pub(super) batch_size: usize,
	pub(super) buffer: Vec<RawEntry>,
	pub(super) pos: usize,
	pub(super) exhausted: bool,
}

impl MemoryIter {
	pub(super) fn load_batch(&mut self, start: Bound<&[u8]>) {
		self.buffer = self
			.entries
			.range::<[u8], _>((start, Bound::Unbounded))
			.take(self.batch_size)
			.map(|entry| RawEntry {
				key: entry.key().clone(),
				value: entry.value().clone(),
			})
			.collect();

		self.pos = 0;
		self.exhausted = self.buffer.is_empty();
	}

	fn refill(&mut self) {
		let last_key = self.buffer.last().map(|e| e.key.clone());

		match &last_key {
			Some(key) => self.load_batch(Bound::Excluded(key.as_slice())),
			None => self.exhausted = true,
		}
	}
}

impl Iterator for MemoryIter {
	type Item = Result<RawEntry>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.pos >= self.buffer.len() && !self.exhausted {
			self.refill();
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
