// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Column types, datums and the error model shared by every kvtable crate.

pub mod error;
pub mod value;

pub use error::{
	Diagnostic, Error, ErrorKind, ExpressionError, IntoDiagnostic, ModifyError, OptionError, RowError, ScanError,
	StoreError,
};
pub use value::{Type, Value, Width};

pub type Result<T> = std::result::Result<T, Error>;
