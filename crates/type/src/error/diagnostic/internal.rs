// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{Diagnostic, ErrorKind};

/// Creates an internal error diagnostic with source location and context
pub fn internal_with_context(
	reason: impl Into<String>,
	file: &str,
	line: u32,
	column: u32,
	function: &str,
	module_path: &str,
) -> Diagnostic {
	let reason = reason.into();

	Diagnostic {
		code: "INTERNAL_ERROR".to_string(),
		kind: ErrorKind::Internal,
		message: format!("Internal error: {}", reason),
		column: None,
		label: Some(format!("Internal invariant violated at {}:{}:{}", file, line, column)),
		help: Some(format!(
			"This error should never occur in normal operation.\nLocation: {}:{}:{}\nModule: {}\nVersion: {}",
			file,
			line,
			column,
			module_path,
			env!("CARGO_PKG_VERSION"),
		)),
		notes: vec![format!("Error occurred in function: {}", function)],
		cause: None,
	}
}

/// Simplified internal error without detailed context
pub fn internal(reason: impl Into<String>) -> Diagnostic {
	internal_with_context(reason, "unknown", 0, 0, "unknown", "unknown")
}
