// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits consumed by the registry.
//!
//! Plugins and components are supplied by the host application; the cache
//! store is an external collaborator persisting derived registry data.

pub mod cache;
pub mod component;
pub mod link;
pub mod plugin;

pub use cache::CacheStorage;
pub use component::{PluginComponent, RenderContext};
pub use link::LinkGenerator;
pub use plugin::Plugin;
