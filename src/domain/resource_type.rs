// Copyright (c) 2025 - Cowboy AI, Inc.
//! CloudStack Resource Type Domain Model
//!
//! Defines the closed set of resource types whose limits can be managed,
//! together with the numeric codes CloudStack uses for them on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ReconcileError;

/// Resource type taxonomy for CloudStack resource limits
///
/// Each variant maps to exactly one stable `resourcetype` code. Code 5
/// (projects) is not manageable through this tool and has no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Virtual machine instances
    Instance,
    /// Public IP addresses
    IpAddress,
    /// Disk volumes
    Volume,
    /// Volume snapshots
    Snapshot,
    /// Templates
    Template,
    /// Guest networks
    Network,
    /// Virtual private clouds
    Vpc,
    /// CPU cores
    Cpu,
    /// Memory in MiB
    Memory,
    /// Primary storage in GiB
    PrimaryStorage,
    /// Secondary storage in GiB
    SecondaryStorage,
}

impl ResourceType {
    /// Every manageable resource type, in code order
    pub const ALL: [ResourceType; 11] = [
        Self::Instance,
        Self::IpAddress,
        Self::Volume,
        Self::Snapshot,
        Self::Template,
        Self::Network,
        Self::Vpc,
        Self::Cpu,
        Self::Memory,
        Self::PrimaryStorage,
        Self::SecondaryStorage,
    ];

    /// Numeric `resourcetype` code understood by CloudStack
    pub fn code(&self) -> u8 {
        match self {
            Self::Instance => 0,
            Self::IpAddress => 1,
            Self::Volume => 2,
            Self::Snapshot => 3,
            Self::Template => 4,
            Self::Network => 6,
            Self::Vpc => 7,
            Self::Cpu => 8,
            Self::Memory => 9,
            Self::PrimaryStorage => 10,
            Self::SecondaryStorage => 11,
        }
    }

    /// Reverse lookup of a wire code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Get the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instance => "instance",
            Self::IpAddress => "ip_address",
            Self::Volume => "volume",
            Self::Snapshot => "snapshot",
            Self::Template => "template",
            Self::Network => "network",
            Self::Vpc => "vpc",
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::PrimaryStorage => "primary_storage",
            Self::SecondaryStorage => "secondary_storage",
        }
    }

    /// Canonical names of all resource types
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(ResourceType::as_str).collect()
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = ReconcileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                ReconcileError::InvalidArgument(format!(
                    "unknown resource type '{}', expected one of: {}",
                    s,
                    Self::names().join(", ")
                ))
            })
    }
}
