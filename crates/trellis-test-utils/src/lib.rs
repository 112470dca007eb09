// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Trellis integration tests.
//!
//! Provides mock plugins, an instrumented cache store and a scratch
//! directory harness for fast, deterministic tests.
//!
//! # Components
//!
//! - [`MockPlugin`] - Plugin with builder-configured metadata and hook counters
//! - [`CountingStorage`] - In-memory cache store counting loads and saves
//! - [`TestHarness`] - Temp directory holding asset files, caches and config

pub mod counting_storage;
pub mod harness;
pub mod mock_plugin;

pub use counting_storage::CountingStorage;
pub use harness::TestHarness;
pub use mock_plugin::MockPlugin;
