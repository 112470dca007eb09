// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Link generation capability supplied by the host router.

use std::collections::BTreeMap;

use crate::types::Scalar;

/// Builds internal links to a plugin view.
///
/// Routes are written `Plugin:view`, e.g. `Article:detail`.
pub trait LinkGenerator: Send + Sync {
    fn link(&self, route: &str, params: &BTreeMap<String, Scalar>) -> String;
}
