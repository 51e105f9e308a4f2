// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ops::Deref, sync::Arc};

use kvtable_type::{Result, RowError, Type, Width, return_error};
use serde::{Deserialize, Serialize};

/// Position of the key column.
pub const KEY_COLUMN: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
	pub name: String,
	pub ty: Type,
}

impl ColumnDef {
	pub fn new(name: impl Into<String>, ty: Type) -> Self {
		Self {
			name: name.into(),
			ty,
		}
	}

	pub fn width(&self) -> Width {
		self.ty.width()
	}

	pub fn alignment(&self) -> usize {
		self.ty.alignment()
	}

	pub fn is_by_value(&self) -> bool {
		self.ty.is_by_value()
	}
}

/// Ordered column descriptors of a table. Column 0 is the key.
///
/// Cheap to clone, the columns are shared.
#[derive(Debug, Clone)]
pub struct Schema(Arc<SchemaInner>);

impl Deref for Schema {
	type Target = SchemaInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl PartialEq for Schema {
	fn eq(&self, other: &Self) -> bool {
		self.columns == other.columns
	}
}

#[derive(Debug)]
pub struct SchemaInner {
	pub columns: Vec<ColumnDef>,
	/// size of the null bitmap in bytes, one bit per non-key column
	pub bitvec_size: usize,
}

impl Schema {
	pub fn new(columns: Vec<ColumnDef>) -> Result<Self> {
		if columns.is_empty() {
			return_error!(RowError::EmptySchema);
		}

		Ok(Self::from_columns(columns))
	}

	/// Builds a schema with generated column names, for tests.
	#[cfg(any(test, feature = "testing"))]
	pub fn testing(types: &[Type]) -> Self {
		assert!(!types.is_empty());
		let columns = types.iter().enumerate().map(|(idx, ty)| ColumnDef::new(format!("c{}", idx), *ty)).collect();
		Self::from_columns(columns)
	}

	fn from_columns(columns: Vec<ColumnDef>) -> Self {
		let bitvec_size = (columns.len() - 1).div_ceil(8);
		Self(Arc::new(SchemaInner {
			columns,
			bitvec_size,
		}))
	}
}

impl SchemaInner {
	pub fn len(&self) -> usize {
		self.columns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}

	pub fn key(&self) -> &ColumnDef {
		&self.columns[KEY_COLUMN]
	}

	pub fn column(&self, index: usize) -> Option<&ColumnDef> {
		self.columns.get(index)
	}
}

#[cfg(test)]
pub mod tests {
	mod new {
		use kvtable_type::{ErrorKind, Type};

		use crate::schema::{ColumnDef, Schema};

		#[test]
		fn test_empty_schema_rejected() {
			let err = Schema::new(vec![]).unwrap_err();
			assert_eq!(err.code, "ROW_009");
			assert_eq!(err.kind(), ErrorKind::InvalidInput);
		}

		#[test]
		fn test_key_only_has_no_bitmap() {
			let schema = Schema::testing(&[Type::Int8]);
			assert_eq!(schema.bitvec_size, 0);
			assert_eq!(schema.key().ty, Type::Int8);
		}

		#[test]
		fn test_bitvec_size() {
			assert_eq!(Schema::testing(&[Type::Int8, Type::Boolean]).bitvec_size, 1);
			assert_eq!(Schema::testing(&[Type::Int8; 9]).bitvec_size, 1);
			assert_eq!(Schema::testing(&[Type::Int8; 10]).bitvec_size, 2);
			assert_eq!(Schema::testing(&[Type::Int8; 17]).bitvec_size, 2);
			assert_eq!(Schema::testing(&[Type::Int8; 18]).bitvec_size, 3);
		}

		#[test]
		fn test_column_lookup() {
			let schema = Schema::new(vec![ColumnDef::new("id", Type::Int8), ColumnDef::new("name", Type::Utf8)])
				.unwrap();
			assert_eq!(schema.column(1).unwrap().name, "name");
			assert!(schema.column(2).is_none());
			assert!(!schema.column(1).unwrap().is_by_value());
		}

		#[test]
		fn test_column_def_from_json() {
			let column: ColumnDef = serde_json::from_str(r#"{"name":"id","ty":"Int8"}"#).unwrap();
			assert_eq!(column, ColumnDef::new("id", Type::Int8));
		}
	}
}
