// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{Diagnostic, ErrorKind, IntoDiagnostic};
use crate::error::{ExpressionError, RowError};

impl IntoDiagnostic for RowError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			RowError::UndefinedKey {
				column,
			} => Diagnostic {
				code: "ROW_001".to_string(),
				kind: ErrorKind::InvalidInput,
				message,
				column: Some(column),
				label: Some("undefined key column".to_string()),
				help: Some("Provide a value for the first column, it is the lookup key of the row".to_string()),
				notes: vec![],
				cause: None,
			},
			RowError::ArityMismatch {
				..
			} => Diagnostic {
				code: "ROW_002".to_string(),
				kind: ErrorKind::InvalidInput,
				message,
				column: None,
				label: Some("row does not match schema".to_string()),
				help: Some("Pass one value per column, use undefined for missing values".to_string()),
				notes: vec![],
				cause: None,
			},
			RowError::TypeMismatch {
				column,
				expected,
				..
			} => Diagnostic {
				code: "ROW_003".to_string(),
				kind: ErrorKind::InvalidInput,
				message,
				column: Some(column),
				label: Some(format!("expected {}", expected)),
				help: None,
				notes: vec![],
				cause: None,
			},
			RowError::DatumTooLarge {
				column,
				..
			} => Diagnostic {
				code: "ROW_004".to_string(),
				kind: ErrorKind::InvalidInput,
				message,
				column: Some(column),
				label: Some("variable-length datum too large".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},
			RowError::Truncated {
				column,
				..
			} => Diagnostic {
				code: "ROW_005".to_string(),
				kind: ErrorKind::CorruptData,
				message,
				column: Some(column),
				label: Some("stored row is shorter than the schema requires".to_string()),
				help: None,
				notes: vec!["The stored row was probably written with a different schema".to_string()],
				cause: None,
			},
			RowError::TrailingBytes {
				..
			} => Diagnostic {
				code: "ROW_006".to_string(),
				kind: ErrorKind::CorruptData,
				message,
				column: None,
				label: Some("stored row is longer than the schema requires".to_string()),
				help: None,
				notes: vec!["The stored row was probably written with a different schema".to_string()],
				cause: None,
			},
			RowError::InvalidHeader {
				column,
				..
			} => Diagnostic {
				code: "ROW_007".to_string(),
				kind: ErrorKind::CorruptData,
				message,
				column: Some(column),
				label: Some("invalid length header".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},
			RowError::InvalidUtf8 {
				column,
			} => Diagnostic {
				code: "ROW_008".to_string(),
				kind: ErrorKind::CorruptData,
				message,
				column: Some(column),
				label: Some("invalid utf8".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},
			RowError::EmptySchema => Diagnostic {
				code: "ROW_009".to_string(),
				kind: ErrorKind::InvalidInput,
				message,
				column: None,
				label: None,
				help: Some("A table needs at least the key column".to_string()),
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl IntoDiagnostic for ExpressionError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			ExpressionError::ColumnOutOfRange {
				..
			} => Diagnostic {
				code: "EXPR_001".to_string(),
				kind: ErrorKind::InvalidInput,
				message,
				column: None,
				label: Some("unknown column".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},
		}
	}
}
