// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Limit Value Object
//!
//! A limit is the maximum count of a resource type within a scope. The
//! reserved value `-1` means unlimited; any other negative value is invalid.
//!
//! CloudStack is not consistent about how it reports a limit. It may arrive
//! as a JSON number, as a numeric string, or wrapped in a nested mapping
//! carrying a `max` (or `limit`) key. [`normalize_limit`] folds all of these
//! into a single integer.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

use crate::errors::{ReconcileError, ReconcileResult};

/// Desired or reported resource limit
///
/// # Examples
///
/// ```rust
/// use cloudstack_resource_limit::domain::Limit;
///
/// assert!(Limit::new(10).is_ok());
/// assert!(Limit::new(-1).unwrap().is_unlimited());
/// assert!(Limit::new(-2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limit(i64);

impl Limit {
    /// Sentinel meaning "no limit"
    pub const UNLIMITED: Limit = Limit(-1);

    /// Create a limit, rejecting negative values other than `-1`
    pub fn new(value: i64) -> ReconcileResult<Self> {
        if value < -1 {
            return Err(ReconcileError::InvalidArgument(format!(
                "limit must be -1 (unlimited) or a non-negative integer, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Raw integer value
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Whether this is the unlimited sentinel
    pub fn is_unlimited(&self) -> bool {
        self.0 == -1
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::UNLIMITED
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unlimited() {
            write!(f, "unlimited")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Fold any representation of a limit into a plain integer
pub fn normalize_limit(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                // 2^63 is exactly representable; anything at or beyond it would saturate
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| format!("limit is not an integer in range: {}", n)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("limit is not an integer: '{}'", s)),
        Value::Object(map) => map
            .get("max")
            .or_else(|| map.get("limit"))
            .ok_or_else(|| "nested limit has neither 'max' nor 'limit'".to_string())
            .and_then(normalize_limit),
        other => Err(format!("unsupported limit representation: {}", other)),
    }
}

/// Serde adapter for fields that go through [`normalize_limit`]
pub fn deserialize_limit<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    normalize_limit(&value).map_err(serde::de::Error::custom)
}
