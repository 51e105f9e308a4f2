// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
	Pretty,
	#[default]
	Compact,
	Json,
}

pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Builder for the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured default directive.
#[derive(Debug, Clone)]
pub struct TracingBuilder {
	default_directive: String,
	format: Format,
	with_target: bool,
	with_thread_ids: bool,
	with_line_number: bool,
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self {
			default_directive: "info".to_string(),
			format: Format::default(),
			with_target: true,
			with_thread_ids: false,
			with_line_number: false,
		}
	}
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Filter used when `RUST_LOG` is unset or invalid, e.g. `kvtable_engine=debug`.
	pub fn with_filter(mut self, directive: impl Into<String>) -> Self {
		self.default_directive = directive.into();
		self
	}

	pub fn with_format(mut self, format: Format) -> Self {
		self.format = format;
		self
	}

	pub fn with_target(mut self, enabled: bool) -> Self {
		self.with_target = enabled;
		self
	}

	pub fn with_thread_ids(mut self, enabled: bool) -> Self {
		self.with_thread_ids = enabled;
		self
	}

	pub fn with_line_number(mut self, enabled: bool) -> Self {
		self.with_line_number = enabled;
		self
	}

	pub fn directive(&self) -> &str {
		&self.default_directive
	}

	pub fn format(&self) -> Format {
		self.format
	}

	fn filter(&self) -> EnvFilter {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_directive))
	}

	/// Installs the subscriber, failing if one is already set.
	pub fn try_init(self) -> Result<(), InitError> {
		let builder = tracing_subscriber::fmt()
			.with_env_filter(self.filter())
			.with_target(self.with_target)
			.with_thread_ids(self.with_thread_ids)
			.with_line_number(self.with_line_number);

		match self.format {
			Format::Pretty => builder.pretty().try_init()?,
			Format::Compact => builder.compact().try_init()?,
			Format::Json => builder.json().try_init()?,
		}

		debug!(format = ?self.format, directive = %self.default_directive, "tracing initialized");
		Ok(())
	}

	/// Installs the subscriber unless one is already set.
	pub fn init(self) {
		let _ = self.try_init();
	}
}
