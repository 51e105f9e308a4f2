// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{Diagnostic, ErrorKind, IntoDiagnostic};
use crate::error::StoreError;

impl IntoDiagnostic for StoreError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		let (code, kind, label) = match &self {
			StoreError::Open {
				..
			} => ("STORE_001", ErrorKind::Internal, "store could not be opened"),
			StoreError::Read {
				..
			} => ("STORE_002", ErrorKind::Internal, "store read failed"),
			StoreError::Put {
				..
			} => ("STORE_003", ErrorKind::Write, "put rejected by store"),
			StoreError::Delete {
				..
			} => ("STORE_004", ErrorKind::Write, "delete rejected by store"),
			StoreError::HandleClosed {
				..
			} => ("STORE_005", ErrorKind::InvalidInput, "handle used after close"),
		};

		let notes = match kind {
			ErrorKind::Write => vec!["Writes are not retried, the statement is aborted".to_string()],
			_ => vec![],
		};

		Diagnostic {
			code: code.to_string(),
			kind,
			message,
			column: None,
			label: Some(label.to_string()),
			help: None,
			notes,
			cause: None,
		}
	}
}
