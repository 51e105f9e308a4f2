// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Binary row format.
//!
//! A row is split into two byte strings:
//!
//! ```text
//! key:    [datum of column 0]
//! value:  [null bitmap][datum 1][datum 2]...
//! ```
//!
//! The bitmap holds one bit per non-key column, bit `(col - 1) % 8` of byte
//! `(col - 1) / 8`. A set bit means the column is *present* and a cleared bit
//! means it is null. This inverted convention is a legacy quirk kept for
//! on-disk compatibility: the all-present row starts from an all-ones bitmap,
//! so a row with non-key columns never encodes to a zero-length value for the
//! store to confuse with a missing one. Bits past the last column are zero.
//!
//! Null columns contribute no datum bytes. Fixed-width datums are little-endian
//! and start at an offset aligned to their type, measured from the start of the
//! buffer with zero padding. Variable-length datums carry a length header, see
//! [`varlena`].

mod codec;
mod key;
pub mod varlena;
mod values;

pub use key::EncodedKey;
pub use values::EncodedValues;

/// Rounds `offset` up to the next multiple of `align` (a power of two).
pub(crate) fn align_up(offset: usize, align: usize) -> usize {
	(offset + align).saturating_sub(1) & !(align.saturating_sub(1))
}
