// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cache store trait for persisting derived registry data across restarts.

use crate::error::TrellisError;

/// Key-value store holding opaque JSON snapshots.
///
/// Implementations are synchronous; timeouts and retries are their own
/// concern. Concurrent writers to the same key are last-writer-wins.
pub trait CacheStorage: Send + Sync {
    /// Returns the stored value, or `None` if the key was never saved.
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, TrellisError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: serde_json::Value) -> Result<(), TrellisError>;
}
