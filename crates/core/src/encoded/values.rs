// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Debug, Formatter},
	ops::Deref,
};

/// Encoded value blob: null bitmap followed by the non-key datums.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct EncodedValues(pub Vec<u8>);

impl EncodedValues {
	/// Starts a value blob for `columns` columns with every non-key column present.
	pub(crate) fn with_bitmap(columns: usize) -> Self {
		let bits = columns.saturating_sub(1);
		let mut bitmap = vec![0xFF; bits.div_ceil(8)];
		if bits % 8 != 0 {
			if let Some(last) = bitmap.last_mut() {
				*last = (1u8 << (bits % 8)) - 1;
			}
		}
		Self(bitmap)
	}

	pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
		Self(bytes.into())
	}

	/// Whether non-key column `column` (1-based, column 0 is the key) is present.
	/// The key column and columns past the bitmap are never marked present.
	#[inline]
	pub fn is_defined(&self, column: usize) -> bool {
		is_defined(&self.0, column)
	}

	pub(crate) fn set_valid(&mut self, column: usize, valid: bool) {
		debug_assert!(column >= 1);
		let byte = (column - 1) / 8;
		let bit = (column - 1) % 8;
		if valid {
			self.0[byte] |= 1 << bit;
		} else {
			self.0[byte] &= !(1 << bit);
		}
	}

	pub(crate) fn buffer_mut(&mut self) -> &mut Vec<u8> {
		&mut self.0
	}

	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}
}

#[inline]
pub(crate) fn is_defined(bitmap: &[u8], column: usize) -> bool {
	let Some(bit) = column.checked_sub(1) else {
		return false;
	};
	bitmap.get(bit / 8).is_some_and(|byte| byte & (1 << (bit % 8)) != 0)
}

impl Deref for EncodedValues {
	type Target = [u8];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl AsRef<[u8]> for EncodedValues {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl Debug for EncodedValues {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("EncodedValues(")?;
		for byte in &self.0 {
			write!(f, "{:02x}", byte)?;
		}
		f.write_str(")")
	}
}
