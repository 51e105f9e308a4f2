// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Installs a `tracing` subscriber for processes embedding kvtable.

pub mod builder;

pub use builder::{Format, TracingBuilder};
