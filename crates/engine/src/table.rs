// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ops::Deref, sync::Arc};

use kvtable_core::Schema;
use kvtable_store_single::{StorageConfig, Store};
use kvtable_type::{Result, StoreError, error};
use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

/// A table as resolved by the calling layer from its catalog.
#[derive(Clone)]
pub struct TableDef {
	pub name: String,
	pub schema: Schema,
	pub storage: StorageConfig,
}

impl TableDef {
	pub fn new(name: impl Into<String>, schema: Schema, storage: StorageConfig) -> Self {
		Self {
			name: name.into(),
			schema,
			storage,
		}
	}
}

/// An open connection to the store of one table.
///
/// Clones share the connection. The store is closed exactly once, either by
/// the first [`TableHandle::close`] or when the last clone is dropped.
#[derive(Clone)]
pub struct TableHandle(Arc<TableHandleInner>);

pub struct TableHandleInner {
	table: String,
	store: Mutex<Option<Store>>,
}

impl Deref for TableHandle {
	type Target = TableHandleInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl TableHandle {
	#[instrument(name = "table::handle::open", level = "debug", skip(def), fields(table = %def.name))]
	pub fn open(def: &TableDef) -> Result<Self> {
		let store = Store::open(&def.storage)?;
		Ok(Self(Arc::new(TableHandleInner {
			table: def.name.clone(),
			store: Mutex::new(Some(store)),
		})))
	}

	/// Closes the store. Closing an already closed handle does nothing.
	#[instrument(name = "table::handle::close", level = "debug", skip(self), fields(table = %self.table))]
	pub fn close(&self) -> Result<()> {
		let store = self.store.lock().take();
		match store {
			Some(store) => store.close(),
			None => {
				debug!("already closed");
				Ok(())
			}
		}
	}

	/// Runs `f` against the open store.
	pub(crate) fn with_store<R>(&self, f: impl FnOnce(&Store) -> Result<R>) -> Result<R> {
		let guard = self.store.lock();
		match guard.as_ref() {
			Some(store) => f(store),
			None => Err(error!(StoreError::HandleClosed {
				table: self.table.clone(),
			})),
		}
	}

	pub(crate) fn ensure_open(&self) -> Result<()> {
		self.with_store(|_| Ok(()))
	}
}

impl TableHandleInner {
	pub fn table(&self) -> &str {
		&self.table
	}

	pub fn is_open(&self) -> bool {
		self.store.lock().is_some()
	}
}

impl Drop for TableHandleInner {
	fn drop(&mut self) {
		if let Some(store) = self.store.get_mut().take() {
			warn!(table = %self.table, "table handle dropped without close");
			if let Err(err) = store.close() {
				warn!(table = %self.table, error = %err.message, "failed to close store");
			}
		}
	}
}
