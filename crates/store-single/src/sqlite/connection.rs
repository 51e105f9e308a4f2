// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! SQLite connection utilities.

use std::path::{Path, PathBuf};

use kvtable_type::{Result, StoreError, error};
use rusqlite::Connection;

use super::{OpenFlags, SqliteConfig, config::MEMORY_PATH};

/// Database file created inside a directory path.
const DB_FILE: &str = "kv.db";

fn open_failed(path: &Path, reason: impl ToString) -> StoreError {
	StoreError::Open {
		path: path.display().to_string(),
		reason: reason.to_string(),
	}
}

fn is_uri(path: &Path) -> bool {
	path.to_string_lossy().contains(':')
}

/// Open a connection and apply the configured pragmas.
pub(super) fn connect(config: &SqliteConfig) -> Result<(PathBuf, Connection)> {
	let path = resolve_db_path(&config.path)?;
	let mut flags = convert_flags(&config.flags);
	if is_uri(&path) && path != Path::new(MEMORY_PATH) {
		flags |= rusqlite::OpenFlags::SQLITE_OPEN_URI;
	}

	let conn = Connection::open_with_flags(&path, flags).map_err(|e| error!(open_failed(&path, e)))?;

	conn.pragma_update_and_check(None, "journal_mode", config.journal_mode.as_str(), |_| Ok(()))
		.map_err(|e| error!(open_failed(&path, e)))?;
	conn.pragma_update(None, "synchronous", config.synchronous_mode.as_str())
		.map_err(|e| error!(open_failed(&path, e)))?;
	conn.pragma_update(None, "temp_store", config.temp_store.as_str())
		.map_err(|e| error!(open_failed(&path, e)))?;

	conn.execute_batch(
		"CREATE TABLE IF NOT EXISTS kv (
			key   BLOB NOT NULL PRIMARY KEY,
			value BLOB NOT NULL
		) WITHOUT ROWID;",
	)
	.map_err(|e| error!(open_failed(&path, e)))?;

	Ok((path, conn))
}

/// Resolve the database path, creating directories as needed.
pub(super) fn resolve_db_path(path: &Path) -> Result<PathBuf> {
	if is_uri(path) {
		return Ok(path.to_path_buf());
	}

	if path.extension().is_none() {
		std::fs::create_dir_all(path).map_err(|e| error!(open_failed(path, e)))?;
		return Ok(path.join(DB_FILE));
	}

	if let Some(parent) = path.parent() {
		if !parent.as_os_str().is_empty() {
			std::fs::create_dir_all(parent).map_err(|e| error!(open_failed(path, e)))?;
		}
	}
	Ok(path.to_path_buf())
}

/// Convert our OpenFlags to rusqlite OpenFlags.
pub(super) fn convert_flags(flags: &OpenFlags) -> rusqlite::OpenFlags {
	let mut rusqlite_flags = rusqlite::OpenFlags::empty();

	if flags.read_write {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE;
	} else {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY;
	}
	if flags.create {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_CREATE;
	}
	if flags.full_mutex {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_FULL_MUTEX;
	}
	if flags.no_mutex {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX;
	}
	if flags.shared_cache {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_SHARED_CACHE;
	}
	if flags.private_cache {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_PRIVATE_CACHE;
	}
	if flags.uri {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_URI;
	}

	rusqlite_flags
}
