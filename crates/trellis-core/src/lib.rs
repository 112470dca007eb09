// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Trellis plugin registry.
//!
//! This crate provides the capability traits (plugins, components, cache
//! stores, link generation), the shared error type, the value types used by
//! component parameter contracts, and the per-request plugin view state.

pub mod error;
pub mod traits;
pub mod types;
pub mod ui;
pub mod view;

// Re-export key items at crate root for ergonomic imports.
pub use error::TrellisError;
pub use traits::{CacheStorage, LinkGenerator, Plugin, PluginComponent, RenderContext};
pub use types::{MenuItem, ParamValue, REQUIRED_MARKER, Scalar};
pub use ui::{Breadcrumb, Button, ButtonVariant, ContextMenu, MenuAction};
pub use view::{Context, DEFAULT_ROUTE, PluginView, SmartControl};
