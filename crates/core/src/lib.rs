// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Schema, rows and the binary row format of a key-value backed table.

pub mod encoded;
pub mod expression;
pub mod row;
pub mod schema;

pub use encoded::{EncodedKey, EncodedValues};
pub use expression::Expression;
pub use kvtable_type::value;
pub use row::Row;
pub use schema::{ColumnDef, KEY_COLUMN, Schema};
