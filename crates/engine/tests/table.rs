// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Statement flows as a calling executor drives them: plan, scan, modify.

use std::path::Path;

use kvtable_core::{ColumnDef, Expression, Row, Schema, row, value::Value};
use kvtable_engine::{ModifyFlags, ModifySession, ScanFlags, TableDef, TablePlan};
use kvtable_store_single::{KvStore, MemoryStore, OpenFlags, SqliteConfig, StorageConfig, Store};
use kvtable_sub_tracing::TracingBuilder;
use kvtable_testing::tempdir::temp_dir;
use kvtable_type::{ErrorKind, Type};

fn people(storage: StorageConfig) -> TableDef {
	let schema = Schema::new(vec![
		ColumnDef::new("id", Type::Int8),
		ColumnDef::new("name", Type::Utf8),
		ColumnDef::new("active", Type::Boolean),
	])
	.unwrap();
	TableDef::new("people", schema, storage)
}

fn id_equals(id: i64) -> Vec<Expression> {
	vec![Expression::equal(Expression::column(0, "id"), Expression::constant(id))]
}

fn scan_all(def: &TableDef, filters: Vec<Expression>) -> Vec<Row> {
	let plan = TablePlan::open(def).unwrap();
	let mut scan = plan.begin_scan(filters, ScanFlags::default()).unwrap();
	let mut rows = Vec::new();
	while let Some(row) = scan.next().unwrap() {
		rows.push(row);
	}
	scan.close().unwrap();
	rows
}

fn insert(def: &TableDef, rows: &[Row]) {
	let mut session = ModifySession::begin_insert(def, ModifyFlags::default()).unwrap();
	for row in rows {
		session.insert(row).unwrap();
	}
	session.close().unwrap();
}

/// Deletes every row the filtered scan returns, feeding carried keys.
fn delete_where(def: &TableDef, filters: Vec<Expression>) -> u64 {
	let plan = TablePlan::open(def).unwrap();
	let mut scan = plan.begin_scan(filters, ScanFlags::default()).unwrap();
	let mut session = ModifySession::begin_delete(def, scan.handle());

	while scan.next().unwrap().is_some() {
		let key = scan.carried_key().map(|k| k.to_vec());
		session.delete(key.as_deref()).unwrap();
	}

	let deleted = session.affected();
	session.close().unwrap();
	scan.close().unwrap();
	deleted
}

fn raw(def: &TableDef, key: &[u8]) -> Option<Vec<u8>> {
	let store = Store::open(&def.storage).unwrap();
	let value = store.get(key).unwrap();
	store.close().unwrap();
	value
}

fn scenario(def: &TableDef) {
	insert(def, &[row![1i64, "ann", true], row![2i64, "bo", Value::Undefined]]);

	assert_eq!(raw(def, &1i64.to_le_bytes()), Some(vec![0b0000_0011, (4 << 1) | 1, b'a', b'n', b'n', 0x01]));
	assert_eq!(raw(def, &2i64.to_le_bytes()), Some(vec![0b0000_0001, (3 << 1) | 1, b'b', b'o']));

	assert_eq!(scan_all(def, id_equals(2)), vec![row![2i64, "bo", Value::Undefined]]);

	assert_eq!(delete_where(def, id_equals(1)), 1);
	assert!(scan_all(def, id_equals(1)).is_empty());

	assert_eq!(scan_all(def, vec![]), vec![row![2i64, "bo", Value::Undefined]]);
}

#[test]
fn test_scenario_memory() {
	TracingBuilder::new().with_filter("kvtable_engine=debug").init();
	scenario(&people(StorageConfig::memory()));
}

#[test]
fn test_scenario_sqlite() {
	temp_dir(|dir| {
		scenario(&people(StorageConfig::sqlite(SqliteConfig::new(dir.join("people")))));
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_point_lookup_matches_filtered_range() {
	let def = people(StorageConfig::Memory(MemoryStore::new()));
	let rows: Vec<Row> = (0i64..50)
		.map(|i| {
			let active = if i % 3 == 0 {
				Value::Undefined
			} else {
				Value::Boolean(i % 2 == 0)
			};
			row![i * 7 - 100, format!("name-{i}"), active]
		})
		.collect();
	insert(&def, &rows);

	let all = scan_all(&def, vec![]);
	assert_eq!(all.len(), rows.len());

	for row in &rows {
		let Value::Int8(id) = row[0] else {
			unreachable!()
		};
		let point = scan_all(&def, id_equals(id));
		let filtered: Vec<Row> = all.iter().filter(|r| r[0] == row[0]).cloned().collect();
		assert_eq!(point, filtered);
		assert_eq!(point, vec![row.clone()]);
	}
}

#[test]
fn test_range_scan_is_byte_ordered() {
	let def = people(StorageConfig::memory());
	insert(&def, &[row![256i64, "b", true], row![1i64, "a", true], row![-1i64, "c", true]]);

	let ids: Vec<Value> = scan_all(&def, vec![]).into_iter().map(|r| r[0].clone()).collect();
	assert_eq!(ids, vec![Value::Int8(256), Value::Int8(1), Value::Int8(-1)]);
}

#[test]
fn test_update_through_scan() {
	let def = people(StorageConfig::memory());
	insert(&def, &[row![1i64, "ann", true], row![2i64, "bo", false]]);

	let plan = TablePlan::open(&def).unwrap();
	let mut scan = plan.begin_scan(vec![], ScanFlags::default()).unwrap();
	let mut session = ModifySession::begin_update(&def, plan.handle());
	while let Some(mut row) = scan.next().unwrap() {
		row[2] = Value::Undefined;
		session.update(&row).unwrap();
	}
	session.update(&row![3i64, "cy", true]).unwrap();
	session.close().unwrap();
	scan.close().unwrap();
	assert!(!plan.handle().is_open());

	assert_eq!(
		scan_all(&def, vec![]),
		vec![row![1i64, "ann", Value::Undefined], row![2i64, "bo", Value::Undefined], row![3i64, "cy", true]]
	);
}

#[test]
fn test_delete_absent_key_succeeds() {
	let def = people(StorageConfig::memory());
	let plan = TablePlan::open(&def).unwrap();
	let mut session = ModifySession::begin_delete(&def, plan.handle());
	session.delete(Some(&42i64.to_le_bytes())).unwrap();
	session.close().unwrap();
	plan.handle().close().unwrap();
}

#[test]
fn test_detached_load_then_scan() {
	temp_dir(|dir| {
		let def = people(StorageConfig::sqlite(SqliteConfig::fast(dir.join("people.db"))));
		let mut session = ModifySession::detached(&def);
		for i in 0i64..10 {
			session.insert(&row![i, "x", true]).unwrap();
		}
		session.close().unwrap();

		let plan = TablePlan::open(&def).unwrap();
		assert_eq!(plan.estimate().rows, 10);
		drop(plan);

		assert_eq!(scan_all(&def, vec![]).len(), 10);
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_corrupt_value_surfaces() {
	let store = MemoryStore::new();
	store.put(&1i64.to_le_bytes(), &[0b0000_0001, 0x00]).unwrap();
	let def = people(StorageConfig::Memory(store));

	let plan = TablePlan::open(&def).unwrap();
	let mut scan = plan.begin_scan(vec![], ScanFlags::default()).unwrap();
	let err = scan.next().unwrap_err();
	assert_eq!(err.kind(), ErrorKind::CorruptData);
	scan.close().unwrap();
}

fn read_only(path: &Path) -> TableDef {
	let flags = OpenFlags::new().read_write(false).create(false);
	people(StorageConfig::sqlite(SqliteConfig::safe(path).flags(flags)))
}

#[test]
fn test_rejected_writes_surface() {
	temp_dir(|dir| {
		let path = dir.join("people.db");
		let writable = people(StorageConfig::sqlite(SqliteConfig::safe(&path)));
		insert(&writable, &[row![1i64, "ann", true]]);

		let def = read_only(&path);

		let mut session = ModifySession::begin_insert(&def, ModifyFlags::default()).unwrap();
		let err = session.insert(&row![2i64, "bo", true]).unwrap_err();
		assert_eq!(err.code, "STORE_003");
		assert_eq!(err.kind(), ErrorKind::Write);
		assert_eq!(session.affected(), 0);
		session.close().unwrap();

		let plan = TablePlan::open(&def).unwrap();
		let mut session = ModifySession::begin_update(&def, plan.handle());
		let err = session.update(&row![1i64, "ann", false]).unwrap_err();
		assert_eq!(err.code, "STORE_003");
		assert_eq!(err.kind(), ErrorKind::Write);
		assert_eq!(session.affected(), 0);
		session.close().unwrap();

		let mut session = ModifySession::begin_delete(&def, plan.handle());
		let err = session.delete(Some(&1i64.to_le_bytes())).unwrap_err();
		assert_eq!(err.code, "STORE_004");
		assert_eq!(err.kind(), ErrorKind::Write);
		assert_eq!(session.affected(), 0);
		session.close().unwrap();
		plan.handle().close().unwrap();

		assert_eq!(scan_all(&writable, vec![]), vec![row![1i64, "ann", true]]);
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_rejected_detached_insert() {
	temp_dir(|dir| {
		let path = dir.join("people.db");
		insert(&people(StorageConfig::sqlite(SqliteConfig::safe(&path))), &[row![1i64, "ann", true]]);

		let mut session = ModifySession::detached(&read_only(&path));
		let err = session.insert(&row![2i64, "bo", true]).unwrap_err();
		assert_eq!(err.code, "STORE_003");
		assert_eq!(err.kind(), ErrorKind::Write);
		assert_eq!(session.affected(), 0);
		session.close().unwrap();
		Ok(())
	})
	.unwrap();
}
