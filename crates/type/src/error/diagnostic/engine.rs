// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{Diagnostic, ErrorKind, IntoDiagnostic};
use crate::error::{ModifyError, OptionError, ScanError};

impl IntoDiagnostic for ScanError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			ScanError::Closed {
				..
			} => Diagnostic {
				code: "SCAN_001".to_string(),
				kind: ErrorKind::InvalidInput,
				message,
				column: None,
				label: Some("scan used after close".to_string()),
				help: Some("Open a new scan to read the table again".to_string()),
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl IntoDiagnostic for ModifyError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			ModifyError::MissingKey {
				..
			} => Diagnostic {
				code: "MODIFY_001".to_string(),
				kind: ErrorKind::MissingKey,
				message,
				column: None,
				label: Some("carried key is absent".to_string()),
				help: Some(
					"Deletes identify the stored row by the encoded key of the scanned row, pass it along"
						.to_string(),
				),
				notes: vec![],
				cause: None,
			},
			ModifyError::SessionClosed {
				..
			} => Diagnostic {
				code: "MODIFY_002".to_string(),
				kind: ErrorKind::InvalidInput,
				message,
				column: None,
				label: Some("session used after close".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},
			ModifyError::KindMismatch {
				..
			} => Diagnostic {
				code: "MODIFY_003".to_string(),
				kind: ErrorKind::InvalidInput,
				message,
				column: None,
				label: Some("operation does not match session".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl IntoDiagnostic for OptionError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			OptionError::Unsupported {
				..
			} => Diagnostic {
				code: "OPTION_001".to_string(),
				kind: ErrorKind::InvalidInput,
				message,
				column: None,
				label: None,
				help: Some("Tables do not support any options".to_string()),
				notes: vec![],
				cause: None,
			},
		}
	}
}
