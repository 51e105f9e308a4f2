// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Key lookup extraction.
//!
//! A scan whose filters contain `key = literal` reads a single entry instead of
//! iterating the store. Other filters are left to the caller, which still
//! evaluates all of them against the returned rows.

use kvtable_core::{
	EncodedKey, Expression, KEY_COLUMN, Schema,
	expression::{ColumnExpression, ConstantExpression},
};
use kvtable_type::{ExpressionError, Result, error};
use tracing::{instrument, trace};

/// Returns the encoded key of the first `key column = literal` filter.
///
/// The literal may sit on either side of the comparison. A literal that is
/// undefined or cannot be converted losslessly to the key type never matches a
/// stored key, so it yields no lookup.
#[instrument(name = "pushdown::key_equality", level = "trace", skip_all, fields(filters = filters.len()))]
pub fn try_extract_key_equality(schema: &Schema, filters: &[Expression]) -> Result<Option<EncodedKey>> {
	for filter in filters {
		let Some((column, constant)) = as_column_equality(filter) else {
			continue;
		};

		if column.index >= schema.len() {
			return Err(error!(ExpressionError::ColumnOutOfRange {
				index: column.index,
				columns: schema.len(),
			}));
		}

		if column.index != KEY_COLUMN {
			continue;
		}

		let Some(value) = constant.value.coerce(schema.key().ty) else {
			trace!(literal = %constant.value, "literal does not fit the key column");
			continue;
		};

		return schema.encode_key(&value).map(Some);
	}

	Ok(None)
}

fn as_column_equality(expr: &Expression) -> Option<(&ColumnExpression, &ConstantExpression)> {
	let Expression::Equal(binary) = expr else {
		return None;
	};

	match (binary.left.as_ref(), binary.right.as_ref()) {
		(Expression::Column(column), Expression::Constant(constant))
		| (Expression::Constant(constant), Expression::Column(column)) => Some((column, constant)),
		_ => None,
	}
}

#[cfg(test)]
pub mod tests {
	use kvtable_core::{ColumnDef, Expression, Schema};
	use kvtable_type::{ErrorKind, Type, Value};

	use super::try_extract_key_equality;

	fn schema() -> Schema {
		Schema::new(vec![
			ColumnDef::new("id", Type::Int8),
			ColumnDef::new("name", Type::Utf8),
			ColumnDef::new("active", Type::Boolean),
		])
		.unwrap()
	}

	fn id() -> Expression {
		Expression::column(0, "id")
	}

	fn name() -> Expression {
		Expression::column(1, "name")
	}

	mod hit {
		use super::*;

		#[test]
		fn test_column_equals_literal() {
			let key = try_extract_key_equality(&schema(), &[Expression::equal(id(), Expression::constant(2i64))])
				.unwrap()
				.unwrap();
			assert_eq!(key.as_slice(), &2i64.to_le_bytes());
		}

		#[test]
		fn test_literal_equals_column() {
			let key = try_extract_key_equality(&schema(), &[Expression::equal(Expression::constant(2i64), id())])
				.unwrap()
				.unwrap();
			assert_eq!(key.as_slice(), &2i64.to_le_bytes());
		}

		#[test]
		fn test_narrow_literal_is_widened() {
			let key = try_extract_key_equality(&schema(), &[Expression::equal(id(), Expression::constant(7i32))])
				.unwrap()
				.unwrap();
			assert_eq!(key, schema().encode_key(&Value::Int8(7)).unwrap());
		}

		#[test]
		fn test_other_filters_ignored() {
			let filters = [
				Expression::less_than(id(), Expression::constant(10i64)),
				Expression::equal(name(), Expression::constant("bo")),
				Expression::equal(id(), Expression::constant(3i64)),
			];
			let key = try_extract_key_equality(&schema(), &filters).unwrap().unwrap();
			assert_eq!(key.as_slice(), &3i64.to_le_bytes());
		}

		#[test]
		fn test_first_equality_wins() {
			let filters = [
				Expression::equal(id(), Expression::constant(1i64)),
				Expression::equal(id(), Expression::constant(2i64)),
			];
			let key = try_extract_key_equality(&schema(), &filters).unwrap().unwrap();
			assert_eq!(key.as_slice(), &1i64.to_le_bytes());
		}

		#[test]
		fn test_variable_length_key_uses_short_form() {
			let schema = Schema::testing(&[Type::Utf8, Type::Int4]);
			let key = try_extract_key_equality(&schema, &[Expression::equal(
				Expression::column(0, "c0"),
				Expression::constant("ann"),
			)])
			.unwrap()
			.unwrap();
			assert_eq!(key.as_slice(), &[(4 << 1) | 1, b'a', b'n', b'n']);
		}
	}

	mod miss {
		use super::*;

		fn miss(filters: &[Expression]) {
			assert_eq!(try_extract_key_equality(&schema(), filters).unwrap(), None);
		}

		#[test]
		fn test_no_filters() {
			miss(&[]);
		}

		#[test]
		fn test_range_operators() {
			miss(&[Expression::less_than(id(), Expression::constant(2i64))]);
			miss(&[Expression::greater_than(id(), Expression::constant(2i64))]);
			miss(&[Expression::greater_than_equal(id(), Expression::constant(2i64))]);
			miss(&[Expression::not_equal(id(), Expression::constant(2i64))]);
		}

		#[test]
		fn test_non_key_column() {
			miss(&[Expression::equal(name(), Expression::constant("ann"))]);
		}

		#[test]
		fn test_two_literals() {
			miss(&[Expression::equal(Expression::constant(1i64), Expression::constant(1i64))]);
		}

		#[test]
		fn test_two_columns() {
			miss(&[Expression::equal(id(), name())]);
		}

		#[test]
		fn test_nested_conjunction() {
			miss(&[Expression::and(
				Expression::equal(id(), Expression::constant(1i64)),
				Expression::equal(name(), Expression::constant("ann")),
			)]);
		}

		#[test]
		fn test_undefined_literal() {
			miss(&[Expression::equal(id(), Expression::constant(Value::Undefined))]);
		}

		#[test]
		fn test_incompatible_literal() {
			miss(&[Expression::equal(id(), Expression::constant("1"))]);
			miss(&[Expression::equal(id(), Expression::constant(u64::MAX))]);
		}
	}

	#[test]
	fn test_column_out_of_range() {
		let err = try_extract_key_equality(&schema(), &[Expression::equal(
			Expression::column(9, "ghost"),
			Expression::constant(1i64),
		)])
		.unwrap_err();
		assert_eq!(err.code, "EXPR_001");
		assert_eq!(err.kind(), ErrorKind::InvalidInput);
	}
}
