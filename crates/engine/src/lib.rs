// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Scan and modify protocols of a key-value backed table.
//!
//! A calling executor plans a table with [`TablePlan::open`], reads it through
//! [`TableScan`] and writes it through [`ModifySession`]. Rows travel in the
//! binary format of `kvtable-core`.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod modify;
pub mod options;
pub mod plan;
pub mod pushdown;
pub mod scan;
pub mod table;

pub use kvtable_type::Result;
pub use modify::{ModifyFlags, ModifyKind, ModifySession};
pub use options::validate_options;
pub use plan::{PlanEstimate, TablePlan};
pub use pushdown::try_extract_key_equality;
pub use scan::{ScanFlags, ScanState, TableScan};
pub use table::{TableDef, TableHandle};
