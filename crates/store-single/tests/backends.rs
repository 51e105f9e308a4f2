// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use kvtable_store_single::{KvStore, MemoryConfig, MemoryStore, SqliteConfig, StorageConfig, Store};
use kvtable_testing::tempdir::temp_dir;

fn exercise(config: &StorageConfig) {
	let store = Store::open(config).unwrap();
	for i in (0u16..300).rev() {
		store.put(&i.to_be_bytes(), format!("v{i}").as_bytes()).unwrap();
	}
	store.delete(&7u16.to_be_bytes()).unwrap();
	store.delete(&7u16.to_be_bytes()).unwrap();
	store.put(&8u16.to_be_bytes(), b"eight").unwrap();
	assert_eq!(store.count().unwrap(), 299);

	let entries: Vec<_> = store.iter().unwrap().collect::<Result<_, _>>().unwrap();
	assert_eq!(entries.len(), 299);
	assert!(entries.windows(2).all(|w| w[0].key < w[1].key));
	assert!(entries.iter().all(|e| e.key != 7u16.to_be_bytes()));
	assert_eq!(entries[7].value, b"eight");
	store.close().unwrap();

	let store = Store::open(config).unwrap();
	assert_eq!(store.count().unwrap(), 299);
	assert_eq!(store.get(&299u16.to_be_bytes()).unwrap().as_deref(), Some(b"v299".as_slice()));
	store.close().unwrap();
}

#[test]
fn test_memory() {
	exercise(&StorageConfig::Memory(MemoryStore::with_config(MemoryConfig::new().batch_size(16))));
}

#[test]
fn test_sqlite() {
	temp_dir(|dir| {
		exercise(&StorageConfig::sqlite(SqliteConfig::new(dir.join("table")).batch_size(16)));
		Ok(())
	})
	.unwrap();
}
