// Copyright (c) 2025 - Cowboy AI, Inc.
//! Typed CloudStack Commands
//!
//! One request struct per remote command, plus the records their responses
//! carry. List responses omit the entity array entirely when nothing
//! matched, so every list field defaults to empty.

use serde::{Deserialize, Deserializer, Serialize};

use super::ApiCommand;
use crate::domain::{deserialize_limit, normalize_limit};

/// `listDomains`
#[derive(Debug, Clone, Serialize)]
pub struct ListDomains {
    pub listall: bool,
}

impl ApiCommand for ListDomains {
    const NAME: &'static str = "listDomains";
    type Response = DomainList;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainList {
    #[serde(default)]
    pub domain: Vec<DomainRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub id: String,
    pub name: String,
    pub path: String,
}

/// `listAccounts`
#[derive(Debug, Clone, Serialize)]
pub struct ListAccounts {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domainid: Option<String>,
    pub listall: bool,
}

impl ApiCommand for ListAccounts {
    const NAME: &'static str = "listAccounts";
    type Response = AccountList;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountList {
    #[serde(default)]
    pub account: Vec<AccountRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domainid: Option<String>,
}

/// `listProjects`
#[derive(Debug, Clone, Serialize)]
pub struct ListProjects {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domainid: Option<String>,
    pub listall: bool,
}

impl ApiCommand for ListProjects {
    const NAME: &'static str = "listProjects";
    type Response = ProjectList;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub project: Vec<ProjectRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
}

/// `listResourceLimits`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListResourceLimits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domainid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projectid: Option<String>,
    pub resourcetype: u8,
}

impl ApiCommand for ListResourceLimits {
    const NAME: &'static str = "listResourceLimits";
    type Response = ResourceLimitList;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceLimitList {
    #[serde(default)]
    pub resourcelimit: Vec<ResourceLimitRecord>,
}

/// `updateResourceLimit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateResourceLimit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domainid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projectid: Option<String>,
    pub resourcetype: u8,
    pub max: i64,
}

impl ApiCommand for UpdateResourceLimit {
    const NAME: &'static str = "updateResourceLimit";
    type Response = UpdatedResourceLimit;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedResourceLimit {
    pub resourcelimit: ResourceLimitRecord,
}

/// A resource limit as reported by CloudStack
///
/// `max` accepts the alias `limit` and any representation understood by
/// [`normalize_limit`]. `resourcetype` is sent back as a string by most
/// CloudStack versions and is normalised the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimitRecord {
    #[serde(deserialize_with = "deserialize_resource_code")]
    pub resourcetype: u8,
    #[serde(alias = "limit", deserialize_with = "deserialize_limit")]
    pub max: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domainid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projectid: Option<String>,
}

fn deserialize_resource_code<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let code = normalize_limit(&value).map_err(serde::de::Error::custom)?;
    u8::try_from(code)
        .map_err(|_| serde::de::Error::custom(format!("resource type code out of range: {}", code)))
}
