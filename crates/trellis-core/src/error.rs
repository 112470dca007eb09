// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Trellis plugin registry.

use thiserror::Error;

/// The primary error type used across the registry, its collaborators and
/// the bootstrap wiring.
#[derive(Debug, Error)]
pub enum TrellisError {
    /// Malformed component declarations, missing asset files, unknown types.
    /// Raised at bootstrap and fatal to startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// Two plugins claim base entities sharing the same short name.
    #[error(
        "plugin compile error: base entity \"{short_name}\" already exists. \
         Plugin \"{conflicting}\" is not compatible with plugin \"{existing}\"; \
         one of the plugins should be refactored to make routing unambiguous"
    )]
    AmbiguousRouting {
        short_name: String,
        existing: String,
        conflicting: String,
    },

    /// Requested plugin name, type or service id is not registered.
    #[error("plugin \"{name}\" does not exist")]
    PluginNotFound { name: String },

    /// A registered service does not satisfy the capability it was requested as.
    #[error("service \"{type_name}\" must implement {expected}")]
    ContractViolation {
        type_name: String,
        expected: &'static str,
    },

    /// A plugin declares a base entity the entity catalog does not know.
    #[error("base entity \"{entity}\" declared by plugin \"{plugin}\" cannot be resolved")]
    BrokenEntityReference { entity: String, plugin: String },

    /// A plugin declares a privilege that does not follow the naming rules.
    #[error("invalid privilege \"{privilege}\": {reason}")]
    InvalidPrivilege { privilege: String, reason: String },

    /// A typed service dependency was requested but never registered.
    #[error("no service registered for type {type_name}")]
    MissingService { type_name: String },

    /// Cache store failures (I/O, serialization).
    #[error("cache error: {source}")]
    Cache {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Component rendering failed, e.g. a required parameter is absent.
    #[error("component \"{component}\": {message}")]
    Render { component: String, message: String },

    /// A plugin sends the client elsewhere instead of rendering its view.
    #[error("redirect to \"{path}\"")]
    Redirect { path: String },

    /// A plugin refuses the request with a message meant for the user.
    #[error("{message}")]
    UserError { message: String },

    /// A plugin completed the response itself; nothing more is rendered.
    #[error("request terminated by plugin")]
    Terminated,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TrellisError {
    /// HTTP-equivalent status code for the host framework.
    ///
    /// Lookup failures map to 404 and redirects to 301. A user error is a
    /// 400 and a terminated request already carries its response (200).
    /// Everything else is a 500.
    pub fn status_code(&self) -> u16 {
        match self {
            TrellisError::PluginNotFound { .. } => 404,
            TrellisError::Redirect { .. } => 301,
            TrellisError::UserError { .. } => 400,
            TrellisError::Terminated => 200,
            _ => 500,
        }
    }

    /// Returns true for signals a plugin raises on purpose to end the
    /// request early, as opposed to failures.
    pub fn is_control_flow(&self) -> bool {
        matches!(
            self,
            TrellisError::Redirect { .. }
                | TrellisError::UserError { .. }
                | TrellisError::Terminated
        )
    }

    /// Returns true for the distinguishable "not found" lookup condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TrellisError::PluginNotFound { .. })
    }
}

impl From<serde_json::Error> for TrellisError {
    fn from(err: serde_json::Error) -> Self {
        TrellisError::Cache {
            source: Box::new(err),
        }
    }
}
