// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

mod engine;
pub mod internal;
pub mod render;
mod row;
mod store;

/// Failure classes surfaced to the calling layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
	/// The caller handed in something the table cannot accept. Aborts the statement.
	InvalidInput,
	/// Stored bytes do not match the schema. Aborts the statement.
	CorruptData,
	/// A delete arrived without the key of the row it targets.
	MissingKey,
	/// The store rejected a put or delete.
	Write,
	/// The store failed to open or read.
	Internal,
}

impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorKind::InvalidInput => f.write_str("invalid input"),
			ErrorKind::CorruptData => f.write_str("corrupt data"),
			ErrorKind::MissingKey => f.write_str("missing key"),
			ErrorKind::Write => f.write_str("write failed"),
			ErrorKind::Internal => f.write_str("internal error"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub kind: ErrorKind,
	pub message: String,
	pub column: Option<String>,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
	pub cause: Option<Box<Diagnostic>>,
}

impl Diagnostic {
	pub fn with_cause(mut self, cause: Diagnostic) -> Self {
		self.cause = Some(Box::new(cause));
		self
	}
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.code)
	}
}

/// Converts a typed error into a renderable diagnostic.
pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}
