// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value types shared by the registry, components and configuration.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker stored in place of a default for parameters that must be supplied.
pub const REQUIRED_MARKER: &str = "#REQUIRED#";

/// Navigation menu placement declared by a plugin.
pub type MenuItem = BTreeMap<String, Option<String>>;

/// A scalar value usable as a component parameter default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Numeric and boolean values are bound as expressions rather than strings.
    pub fn is_numeric_or_bool(&self) -> bool {
        !matches!(self, Scalar::String(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// Canonical default of one component parameter.
///
/// Serializes to the plain form used in configuration and caches: `null`,
/// the scalar itself, or the [`REQUIRED_MARKER`] string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<Scalar>", into = "Option<Scalar>")]
pub enum ParamValue {
    /// The caller must provide a value.
    Required,
    /// Optional without a default.
    Null,
    /// Optional with a concrete default.
    Value(Scalar),
}

impl ParamValue {
    pub fn is_required(&self) -> bool {
        matches!(self, ParamValue::Required)
    }
}

impl From<Option<Scalar>> for ParamValue {
    fn from(value: Option<Scalar>) -> Self {
        match value {
            None => ParamValue::Null,
            Some(Scalar::String(s)) if s == REQUIRED_MARKER => ParamValue::Required,
            Some(scalar) => ParamValue::Value(scalar),
        }
    }
}

impl From<ParamValue> for Option<Scalar> {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Required => Some(Scalar::String(REQUIRED_MARKER.to_string())),
            ParamValue::Null => None,
            ParamValue::Value(scalar) => Some(scalar),
        }
    }
}
