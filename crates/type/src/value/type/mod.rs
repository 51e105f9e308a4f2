// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Alignment of the long (4-byte) variable-length header.
pub const VARIABLE_LONG_ALIGN: usize = 4;

/// How many bytes a datum of a type occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
	/// Always exactly this many bytes.
	Fixed(usize),
	/// Self-describing, the datum carries its own length header.
	Variable,
}

/// All column types a table can store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	/// A boolean: true or false.
	Boolean,
	/// A 1-byte signed integer
	Int1,
	/// A 2-byte signed integer
	Int2,
	/// A 4-byte signed integer
	Int4,
	/// An 8-byte signed integer
	Int8,
	/// A 1-byte unsigned integer
	Uint1,
	/// A 2-byte unsigned integer
	Uint2,
	/// A 4-byte unsigned integer
	Uint4,
	/// An 8-byte unsigned integer
	Uint8,
	/// A 4-byte floating point
	Float4,
	/// An 8-byte floating point
	Float8,
	/// A 16-byte UUID, copied by reference
	Uuid,
	/// A UTF-8 encoded text of variable length
	Utf8,
	/// A binary large object of variable length
	Blob,
}

impl Type {
	pub fn width(&self) -> Width {
		match self {
			Type::Boolean | Type::Int1 | Type::Uint1 => Width::Fixed(1),
			Type::Int2 | Type::Uint2 => Width::Fixed(2),
			Type::Int4 | Type::Uint4 | Type::Float4 => Width::Fixed(4),
			Type::Int8 | Type::Uint8 | Type::Float8 => Width::Fixed(8),
			Type::Uuid => Width::Fixed(16),
			Type::Utf8 | Type::Blob => Width::Variable,
		}
	}

	/// Required starting alignment of a datum, relative to the buffer start.
	///
	/// Variable-length types report the alignment of their long form; a short
	/// header is never aligned.
	pub fn alignment(&self) -> usize {
		match self {
			Type::Boolean | Type::Int1 | Type::Uint1 | Type::Uuid => 1,
			Type::Int2 | Type::Uint2 => 2,
			Type::Int4 | Type::Uint4 | Type::Float4 => 4,
			Type::Int8 | Type::Uint8 | Type::Float8 => 8,
			Type::Utf8 | Type::Blob => VARIABLE_LONG_ALIGN,
		}
	}

	/// Whether the datum fits into a machine word and is copied by value.
	pub fn is_by_value(&self) -> bool {
		match self.width() {
			Width::Fixed(size) => size <= 8,
			Width::Variable => false,
		}
	}

	pub fn is_variable(&self) -> bool {
		self.width() == Width::Variable
	}

	pub fn is_integer(&self) -> bool {
		matches!(
			self,
			Type::Int1
				| Type::Int2 | Type::Int4
				| Type::Int8 | Type::Uint1
				| Type::Uint2 | Type::Uint4
				| Type::Uint8
		)
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Boolean => f.write_str("BOOL"),
			Type::Int1 => f.write_str("INT1"),
			Type::Int2 => f.write_str("INT2"),
			Type::Int4 => f.write_str("INT4"),
			Type::Int8 => f.write_str("INT8"),
			Type::Uint1 => f.write_str("UINT1"),
			Type::Uint2 => f.write_str("UINT2"),
			Type::Uint4 => f.write_str("UINT4"),
			Type::Uint8 => f.write_str("UINT8"),
			Type::Float4 => f.write_str("FLOAT4"),
			Type::Float8 => f.write_str("FLOAT8"),
			Type::Uuid => f.write_str("UUID"),
			Type::Utf8 => f.write_str("UTF8"),
			Type::Blob => f.write_str("BLOB"),
		}
	}
}

#[cfg(test)]
pub mod tests {
	use super::*;

	#[test]
	fn test_fixed_widths_match_alignment() {
		for ty in [Type::Int2, Type::Int4, Type::Int8, Type::Uint8, Type::Float4, Type::Float8] {
			assert_eq!(ty.width(), Width::Fixed(ty.alignment()));
		}
	}

	#[test]
	fn test_by_value() {
		assert!(Type::Boolean.is_by_value());
		assert!(Type::Int8.is_by_value());
		assert!(!Type::Uuid.is_by_value());
		assert!(!Type::Utf8.is_by_value());
	}

	#[test]
	fn test_variable() {
		assert!(Type::Utf8.is_variable());
		assert!(Type::Blob.is_variable());
		assert!(!Type::Uuid.is_variable());
		assert_eq!(Type::Blob.alignment(), 4);
	}

	#[test]
	fn test_serde_name() {
		let json = serde_json::to_string(&Type::Int8).unwrap();
		assert_eq!(json, "\"Int8\"");
		let ty: Type = serde_json::from_str("\"Utf8\"").unwrap();
		assert_eq!(ty, Type::Utf8);
	}
}
