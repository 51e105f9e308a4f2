// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::Deref,
};

pub mod diagnostic;
mod r#macro;

pub use diagnostic::{Diagnostic, ErrorKind, IntoDiagnostic};
use diagnostic::render::DefaultRenderer;

use crate::value::Type;

#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Box<Diagnostic>);

impl Deref for Error {
	type Target = Diagnostic;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let out = DefaultRenderer::render_string(&self.0);
		f.write_str(out.as_str())
	}
}

impl Error {
	pub fn kind(&self) -> ErrorKind {
		self.0.kind
	}

	pub fn diagnostic(self) -> Diagnostic {
		*self.0
	}
}

impl std::error::Error for Error {}

impl From<Diagnostic> for Error {
	fn from(diagnostic: Diagnostic) -> Self {
		Error(Box::new(diagnostic))
	}
}

/// Row encoding and decoding failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
	#[error("schema has no columns")]
	EmptySchema,

	#[error("key column `{column}` cannot be undefined")]
	UndefinedKey {
		column: String,
	},

	#[error("row has {actual} values but the schema has {expected} columns")]
	ArityMismatch {
		expected: usize,
		actual: usize,
	},

	#[error("column `{column}` expects {expected} but got {actual}")]
	TypeMismatch {
		column: String,
		expected: Type,
		actual: Type,
	},

	#[error("column `{column}` holds {len} bytes, more than the maximum of {max}")]
	DatumTooLarge {
		column: String,
		len: usize,
		max: usize,
	},

	#[error("{buffer} buffer is {available} bytes but reading `{column}` needs {needed}")]
	Truncated {
		buffer: &'static str,
		column: String,
		needed: usize,
		available: usize,
	},

	#[error("{buffer} buffer has {remaining} unread bytes after the last column")]
	TrailingBytes {
		buffer: &'static str,
		remaining: usize,
	},

	#[error("column `{column}` has an invalid length header at offset {offset}")]
	InvalidHeader {
		column: String,
		offset: usize,
	},

	#[error("column `{column}` is not valid utf8")]
	InvalidUtf8 {
		column: String,
	},
}

/// Filter expressions that cannot be interpreted against the schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpressionError {
	#[error("column reference #{index} is out of range for a table with {columns} columns")]
	ColumnOutOfRange {
		index: usize,
		columns: usize,
	},
}

/// Key-value store failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
	#[error("failed to open store at {path}: {reason}")]
	Open {
		path: String,
		reason: String,
	},

	#[error("failed to {operation}: {reason}")]
	Read {
		operation: &'static str,
		reason: String,
	},

	#[error("failed to put: {reason}")]
	Put {
		reason: String,
	},

	#[error("failed to delete: {reason}")]
	Delete {
		reason: String,
	},

	#[error("table handle `{table}` is already closed")]
	HandleClosed {
		table: String,
	},
}

/// Scan protocol misuse.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanError {
	#[error("scan of `{table}` is already closed")]
	Closed {
		table: String,
	},
}

/// Modify protocol misuse and key recovery failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModifyError {
	#[error("delete on `{table}` has no carried key")]
	MissingKey {
		table: String,
	},

	#[error("modify session on `{table}` is already closed")]
	SessionClosed {
		table: String,
	},

	#[error("cannot {operation} through a {session} session")]
	KindMismatch {
		session: &'static str,
		operation: &'static str,
	},
}

/// Table option validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptionError {
	#[error("invalid option `{name}`")]
	Unsupported {
		name: String,
	},
}

macro_rules! impl_into_error {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for Error {
				fn from(err: $ty) -> Self {
					Error(Box::new(err.into_diagnostic()))
				}
			}
		)*
	};
}

impl_into_error!(RowError, ExpressionError, StoreError, ScanError, ModifyError, OptionError);
