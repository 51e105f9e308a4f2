// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use kvtable_core::Expression;
use kvtable_store_single::KvStore;
use kvtable_type::Result;
use tracing::{debug, instrument};

use crate::{
	scan::{ScanFlags, TableScan},
	table::{TableDef, TableHandle},
};

/// Size estimate handed to the calling planner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanEstimate {
	pub rows: u64,
	pub startup_cost: f64,
	pub total_cost: f64,
}

impl PlanEstimate {
	fn from_rows(rows: u64) -> Self {
		Self {
			rows,
			startup_cost: 0.0,
			total_cost: rows as f64,
		}
	}
}

/// Planning-time state of a table.
///
/// Opening a plan opens the table handle. The scan started from the plan
/// takes over closing it, update and delete sessions of the same statement
/// borrow it through [`TablePlan::handle`].
pub struct TablePlan {
	def: TableDef,
	handle: TableHandle,
	estimate: PlanEstimate,
}

impl TablePlan {
	#[instrument(name = "plan::open", level = "debug", skip(def), fields(table = %def.name))]
	pub fn open(def: &TableDef) -> Result<Self> {
		let handle = TableHandle::open(def)?;
		let rows = handle.with_store(|store| store.count())?;
		let estimate = PlanEstimate::from_rows(rows);
		debug!(rows, "estimated");

		Ok(Self {
			def: def.clone(),
			handle,
			estimate,
		})
	}

	pub fn estimate(&self) -> PlanEstimate {
		self.estimate
	}

	pub fn def(&self) -> &TableDef {
		&self.def
	}

	pub fn handle(&self) -> &TableHandle {
		&self.handle
	}

	pub fn begin_scan(&self, filters: Vec<Expression>, flags: ScanFlags) -> Result<TableScan> {
		TableScan::open(self.def.clone(), self.handle.clone(), filters, flags)
	}
}
