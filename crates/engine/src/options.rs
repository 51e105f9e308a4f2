// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use kvtable_type::{OptionError, Result, error};

/// Validates the options given when a table is declared.
///
/// Tables accept no options, so the first one given is reported.
pub fn validate_options<K: AsRef<str>, V>(options: &[(K, V)]) -> Result<()> {
	match options.first() {
		Some((name, _)) => Err(error!(OptionError::Unsupported {
			name: name.as_ref().to_string(),
		})),
		None => Ok(()),
	}
}
