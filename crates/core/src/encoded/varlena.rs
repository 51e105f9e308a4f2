// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Length headers of variable-length datums.
//!
//! Short form, used whenever the whole datum fits in 127 bytes:
//!
//! ```text
//! [(total_len << 1) | 1][payload]      never aligned
//! ```
//!
//! Long form:
//!
//! ```text
//! [total_len << 2 : u32 little-endian][payload]      header 4-aligned
//! ```
//!
//! `total_len` counts the header. The low bit of the first header byte tells
//! the forms apart, padding bytes are zero and so never look like a short
//! header.

use kvtable_type::{RowError, value::VARIABLE_LONG_ALIGN};

use super::align_up;

pub const SHORT_HEADER_SIZE: usize = 1;
pub const LONG_HEADER_SIZE: usize = 4;

/// Largest datum, header included, that takes the short form.
pub const SHORT_MAX: usize = 0x7F;
/// Largest datum, header included, that takes the long form.
pub const LONG_MAX: usize = (1 << 30) - 1;

/// Size of the datum holding `payload_len` bytes in its shortest form.
pub fn encoded_len(payload_len: usize) -> usize {
	if payload_len + SHORT_HEADER_SIZE <= SHORT_MAX {
		payload_len + SHORT_HEADER_SIZE
	} else {
		payload_len + LONG_HEADER_SIZE
	}
}

/// Appends `payload` in its shortest form.
pub(crate) fn write(buf: &mut Vec<u8>, column: &str, payload: &[u8]) -> Result<(), RowError> {
	let total = encoded_len(payload.len());
	if total <= SHORT_MAX {
		buf.push(((total << 1) | 1) as u8);
		buf.extend_from_slice(payload);
		return Ok(());
	}

	if total > LONG_MAX {
		return Err(RowError::DatumTooLarge {
			column: column.to_string(),
			len: payload.len(),
			max: LONG_MAX - LONG_HEADER_SIZE,
		});
	}

	buf.resize(align_up(buf.len(), VARIABLE_LONG_ALIGN), 0);
	buf.extend_from_slice(&((total as u32) << 2).to_le_bytes());
	buf.extend_from_slice(payload);
	Ok(())
}

/// Reads the datum starting at `*offset` and advances past it.
///
/// Returns the payload, without header.
pub(crate) fn read<'a>(
	buf: &'a [u8],
	offset: &mut usize,
	buffer: &'static str,
	column: &str,
) -> Result<&'a [u8], RowError> {
	let truncated = |needed: usize| RowError::Truncated {
		buffer,
		column: column.to_string(),
		needed,
		available: buf.len(),
	};

	let Some(&first) = buf.get(*offset) else {
		return Err(truncated(*offset + SHORT_HEADER_SIZE));
	};

	let (start, header, total) = if first & 1 == 1 {
		(*offset, SHORT_HEADER_SIZE, (first >> 1) as usize)
	} else {
		let start = align_up(*offset, VARIABLE_LONG_ALIGN);
		let Some(bytes) = buf.get(start..start + LONG_HEADER_SIZE) else {
			return Err(truncated(start + LONG_HEADER_SIZE));
		};
		let raw = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
		if raw & 0b11 != 0 {
			return Err(RowError::InvalidHeader {
				column: column.to_string(),
				offset: start,
			});
		}
		(start, LONG_HEADER_SIZE, (raw >> 2) as usize)
	};

	if total < header {
		return Err(RowError::InvalidHeader {
			column: column.to_string(),
			offset: start,
		});
	}

	let end = start + total;
	if end > buf.len() {
		return Err(truncated(end));
	}

	*offset = end;
	Ok(&buf[start + header..end])
}
