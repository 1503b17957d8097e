// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Limit Domain Models
//!
//! Value objects with validation invariants for resource limit management.
//!
//! - [`ResourceType`] - Closed set of limitable resources and their wire codes
//! - [`Limit`] - Limit value with the `-1` unlimited sentinel
//! - [`ScopeSpec`] / [`ResolvedScope`] - Tenant scope before and after resolution

pub mod limit;
pub mod resource_type;
pub mod scope;

pub use limit::{deserialize_limit, normalize_limit, Limit};
pub use resource_type::ResourceType;
pub use scope::{domain_path, ResolvedScope, ScopeSpec};
