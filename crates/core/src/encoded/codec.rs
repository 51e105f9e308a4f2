// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use kvtable_type::{Result, RowError, Type, Value, Width, error};
use tracing::instrument;

use super::{EncodedKey, EncodedValues, align_up, values::is_defined, varlena};
use crate::{
	row::Row,
	schema::{ColumnDef, KEY_COLUMN, Schema},
};

impl Schema {
	/// Encodes a value of the key column the way [`Schema::encode_row`] does.
	///
	/// Variable-length values always come out in their shortest form, so a key
	/// built from a filter literal matches the stored key byte for byte.
	pub fn encode_key(&self, value: &Value) -> Result<EncodedKey> {
		let column = self.key();
		if value.is_undefined() {
			return Err(error!(RowError::UndefinedKey {
				column: column.name.clone(),
			}));
		}

		let mut buf = Vec::with_capacity(fixed_or(column.ty, 16));
		write_datum(&mut buf, column, value)?;
		Ok(EncodedKey(buf))
	}

	#[instrument(name = "codec::encode", level = "trace", skip_all, fields(columns = self.len()))]
	pub fn encode_row(&self, row: &Row) -> Result<(EncodedKey, EncodedValues)> {
		if row.len() != self.len() {
			return Err(error!(RowError::ArityMismatch {
				expected: self.len(),
				actual: row.len(),
			}));
		}

		let key = self.encode_key(&row[KEY_COLUMN])?;

		let mut values = EncodedValues::with_bitmap(self.len());
		for (index, (column, value)) in self.columns.iter().zip(row.iter()).enumerate().skip(1) {
			if value.is_undefined() {
				values.set_valid(index, false);
				continue;
			}
			write_datum(values.buffer_mut(), column, value)?;
		}

		Ok((key, values))
	}

	#[instrument(name = "codec::decode", level = "trace", skip_all, fields(key_len = key.len(), value_len = values.len()))]
	pub fn decode_row(&self, key: &[u8], values: &[u8]) -> Result<Row> {
		let mut row = Vec::with_capacity(self.len());

		let mut offset = 0;
		row.push(read_datum(key, &mut offset, "key", self.key())?);
		if offset != key.len() {
			return Err(error!(RowError::TrailingBytes {
				buffer: "key",
				remaining: key.len() - offset,
			}));
		}

		if values.len() < self.bitvec_size {
			return Err(error!(RowError::Truncated {
				buffer: "value",
				column: "null bitmap".to_string(),
				needed: self.bitvec_size,
				available: values.len(),
			}));
		}

		let mut offset = self.bitvec_size;
		for (index, column) in self.columns.iter().enumerate().skip(1) {
			if !is_defined(values, index) {
				row.push(Value::Undefined);
				continue;
			}
			row.push(read_datum(values, &mut offset, "value", column)?);
		}

		if offset != values.len() {
			return Err(error!(RowError::TrailingBytes {
				buffer: "value",
				remaining: values.len() - offset,
			}));
		}

		Ok(Row(row))
	}
}

fn fixed_or(ty: Type, default: usize) -> usize {
	match ty.width() {
		Width::Fixed(size) => size,
		Width::Variable => default,
	}
}

fn write_datum(buf: &mut Vec<u8>, column: &ColumnDef, value: &Value) -> Result<()> {
	let actual = value.get_type();
	if actual != Some(column.ty) {
		return Err(error!(RowError::TypeMismatch {
			column: column.name.clone(),
			expected: column.ty,
			// undefined values never reach this point
			actual: actual.unwrap_or(column.ty),
		}));
	}

	if let Width::Fixed(_) = column.width() {
		buf.resize(align_up(buf.len(), column.alignment()), 0);
	}

	match value {
		Value::Boolean(v) => buf.push(*v as u8),
		Value::Int1(v) => buf.extend_from_slice(&v.to_le_bytes()),
		Value::Int2(v) => buf.extend_from_slice(&v.to_le_bytes()),
		Value::Int4(v) => buf.extend_from_slice(&v.to_le_bytes()),
		Value::Int8(v) => buf.extend_from_slice(&v.to_le_bytes()),
		Value::Uint1(v) => buf.push(*v),
		Value::Uint2(v) => buf.extend_from_slice(&v.to_le_bytes()),
		Value::Uint4(v) => buf.extend_from_slice(&v.to_le_bytes()),
		Value::Uint8(v) => buf.extend_from_slice(&v.to_le_bytes()),
		Value::Float4(v) => buf.extend_from_slice(&v.to_le_bytes()),
		Value::Float8(v) => buf.extend_from_slice(&v.to_le_bytes()),
		Value::Uuid(v) => buf.extend_from_slice(v.as_bytes()),
		Value::Utf8(v) => varlena::write(buf, &column.name, v.as_bytes())?,
		Value::Blob(v) => varlena::write(buf, &column.name, v)?,
		Value::Undefined => unreachable!("type checked above"),
	}

	Ok(())
}

fn read_datum(buf: &[u8], offset: &mut usize, buffer: &'static str, column: &ColumnDef) -> Result<Value> {
	let size = match column.width() {
		Width::Variable => {
			let payload = varlena::read(buf, offset, buffer, &column.name)?;
			return match column.ty {
				Type::Utf8 => match std::str::from_utf8(payload) {
					Ok(text) => Ok(Value::Utf8(text.to_string())),
					Err(_) => Err(error!(RowError::InvalidUtf8 {
						column: column.name.clone(),
					})),
				},
				_ => Ok(Value::Blob(payload.to_vec())),
			};
		}
		Width::Fixed(size) => size,
	};

	let start = align_up(*offset, column.alignment());
	let Some(bytes) = buf.get(start..start + size) else {
		return Err(error!(RowError::Truncated {
			buffer,
			column: column.name.clone(),
			needed: start + size,
			available: buf.len(),
		}));
	};
	*offset = start + size;

	Ok(match column.ty {
		Type::Boolean => Value::Boolean(bytes[0] != 0),
		Type::Int1 => Value::Int1(i8::from_le_bytes(fixed(bytes))),
		Type::Int2 => Value::Int2(i16::from_le_bytes(fixed(bytes))),
		Type::Int4 => Value::Int4(i32::from_le_bytes(fixed(bytes))),
		Type::Int8 => Value::Int8(i64::from_le_bytes(fixed(bytes))),
		Type::Uint1 => Value::Uint1(bytes[0]),
		Type::Uint2 => Value::Uint2(u16::from_le_bytes(fixed(bytes))),
		Type::Uint4 => Value::Uint4(u32::from_le_bytes(fixed(bytes))),
		Type::Uint8 => Value::Uint8(u64::from_le_bytes(fixed(bytes))),
		Type::Float4 => Value::Float4(f32::from_le_bytes(fixed(bytes))),
		Type::Float8 => Value::Float8(f64::from_le_bytes(fixed(bytes))),
		Type::Uuid => Value::Uuid(uuid::Uuid::from_bytes(fixed(bytes))),
		Type::Utf8 | Type::Blob => unreachable!("variable width handled above"),
	})
}

/// Copies a slice whose length the caller already checked into an array.
fn fixed<const N: usize>(bytes: &[u8]) -> [u8; N] {
	let mut out = [0u8; N];
	out.copy_from_slice(bytes);
	out
}
