// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Filter expressions handed to a scan by the calling executor.
//!
//! The list a scan receives is an implicit conjunction. The table only inspects
//! it for a key lookup, evaluation stays with the executor.

use std::fmt::{Display, Formatter};

use kvtable_type::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
	Column(ColumnExpression),

	Constant(ConstantExpression),

	Equal(BinaryExpression),

	NotEqual(BinaryExpression),

	LessThan(BinaryExpression),

	LessThanEqual(BinaryExpression),

	GreaterThan(BinaryExpression),

	GreaterThanEqual(BinaryExpression),

	And(BinaryExpression),

	Or(BinaryExpression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnExpression {
	/// Position of the column in the table schema.
	pub index: usize,
	pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantExpression {
	pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
	pub left: Box<Expression>,
	pub right: Box<Expression>,
}

impl BinaryExpression {
	fn new(left: Expression, right: Expression) -> Self {
		Self {
			left: Box::new(left),
			right: Box::new(right),
		}
	}
}

impl Expression {
	pub fn column(index: usize, name: impl Into<String>) -> Self {
		Expression::Column(ColumnExpression {
			index,
			name: name.into(),
		})
	}

	pub fn constant(value: impl Into<Value>) -> Self {
		Expression::Constant(ConstantExpression {
			value: value.into(),
		})
	}

	pub fn equal(left: Expression, right: Expression) -> Self {
		Expression::Equal(BinaryExpression::new(left, right))
	}

	pub fn not_equal(left: Expression, right: Expression) -> Self {
		Expression::NotEqual(BinaryExpression::new(left, right))
	}

	pub fn less_than(left: Expression, right: Expression) -> Self {
		Expression::LessThan(BinaryExpression::new(left, right))
	}

	pub fn greater_than(left: Expression, right: Expression) -> Self {
		Expression::GreaterThan(BinaryExpression::new(left, right))
	}

	pub fn greater_than_equal(left: Expression, right: Expression) -> Self {
		Expression::GreaterThanEqual(BinaryExpression::new(left, right))
	}

	pub fn and(left: Expression, right: Expression) -> Self {
		Expression::And(BinaryExpression::new(left, right))
	}
}

impl Display for Expression {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let (op, binary) = match self {
			Expression::Column(column) => return f.write_str(&column.name),
			Expression::Constant(constant) => return Display::fmt(&constant.value, f),
			Expression::Equal(b) => ("==", b),
			Expression::NotEqual(b) => ("!=", b),
			Expression::LessThan(b) => ("<", b),
			Expression::LessThanEqual(b) => ("<=", b),
			Expression::GreaterThan(b) => (">", b),
			Expression::GreaterThanEqual(b) => (">=", b),
			Expression::And(b) => ("and", b),
			Expression::Or(b) => ("or", b),
		};
		write!(f, "({} {} {})", binary.left, op, binary.right)
	}
}
