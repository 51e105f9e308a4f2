// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{Type, Value};

impl Value {
	/// Converts the value into `target` if that loses no information.
	///
	/// Identical types are returned as-is. Integers convert between widths and
	/// signedness when the value is in range, `Float4` widens to `Float8` and
	/// `Utf8` converts to `Blob`. Everything else yields `None`.
	pub fn coerce(&self, target: Type) -> Option<Value> {
		if self.get_type() == Some(target) {
			return Some(self.clone());
		}

		if let Some(wide) = self.as_i128() {
			if !target.is_integer() {
				return None;
			}
			return from_i128(wide, target);
		}

		match (self, target) {
			(Value::Float4(v), Type::Float8) => Some(Value::Float8(*v as f64)),
			(Value::Utf8(v), Type::Blob) => Some(Value::Blob(v.as_bytes().to_vec())),
			_ => None,
		}
	}

	fn as_i128(&self) -> Option<i128> {
		match self {
			Value::Int1(v) => Some(*v as i128),
			Value::Int2(v) => Some(*v as i128),
			Value::Int4(v) => Some(*v as i128),
			Value::Int8(v) => Some(*v as i128),
			Value::Uint1(v) => Some(*v as i128),
			Value::Uint2(v) => Some(*v as i128),
			Value::Uint4(v) => Some(*v as i128),
			Value::Uint8(v) => Some(*v as i128),
			_ => None,
		}
	}
}

fn from_i128(v: i128, target: Type) -> Option<Value> {
	match target {
		Type::Int1 => i8::try_from(v).ok().map(Value::Int1),
		Type::Int2 => i16::try_from(v).ok().map(Value::Int2),
		Type::Int4 => i32::try_from(v).ok().map(Value::Int4),
		Type::Int8 => i64::try_from(v).ok().map(Value::Int8),
		Type::Uint1 => u8::try_from(v).ok().map(Value::Uint1),
		Type::Uint2 => u16::try_from(v).ok().map(Value::Uint2),
		Type::Uint4 => u32::try_from(v).ok().map(Value::Uint4),
		Type::Uint8 => u64::try_from(v).ok().map(Value::Uint8),
		_ => None,
	}
}
