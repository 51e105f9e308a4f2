// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::{Deref, DerefMut};

use kvtable_type::Value;

/// One table row, a value per column. `Value::Undefined` marks a null column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row(pub Vec<Value>);

impl Row {
	pub fn new(values: Vec<Value>) -> Self {
		Self(values)
	}

	pub fn key(&self) -> Option<&Value> {
		self.0.first()
	}

	pub fn is_null(&self, index: usize) -> bool {
		self.0.get(index).is_none_or(Value::is_undefined)
	}

	pub fn into_values(self) -> Vec<Value> {
		self.0
	}
}

impl Deref for Row {
	type Target = Vec<Value>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DerefMut for Row {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl From<Vec<Value>> for Row {
	fn from(values: Vec<Value>) -> Self {
		Self(values)
	}
}

/// Builds a row from anything convertible into values.
///
/// ```
/// use kvtable_core::{row, row::Row};
/// use kvtable_type::Value;
///
/// let r: Row = row![1i64, "ann", None::<bool>];
/// assert_eq!(r[2], Value::Undefined);
/// ```
#[macro_export]
macro_rules! row {
	($($value:expr),* $(,)?) => {
		$crate::row::Row::new(vec![$($crate::value::Value::from($value)),*])
	};
}
