// Copyright (c) 2025 - Cowboy AI, Inc.
//! CloudStack HTTP Client
//!
//! Signed request/response transport for the CloudStack API.
//!
//! # Request Signing
//!
//! ```text
//! params + {command, response=json, apiKey}
//!     → sort by key
//!     → key=urlencode(value) joined with '&'   (Java URLEncoder rules, space as %20)
//!     → lowercase
//!     → HMAC-SHA1(secret)
//!     → base64
//!     → params.signature
//! ```
//!
//! # Responses
//!
//! CloudStack wraps every payload in `<command lowercased>response`. The
//! wrapper is removed before the payload is handed back. Errors arrive as
//! `errorcode`/`errortext` inside the same wrapper, usually with a 4xx/5xx
//! status; both are mapped to [`ReconcileError::Transport`].

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde_json::Value;
use sha1::Sha1;
use std::time::Duration;
use tracing::{debug, info};

use super::{ApiParams, CloudStackApi};
use crate::config::{ApiConfig, HttpMethod};
use crate::errors::{ReconcileError, ReconcileResult};

type HmacSha1 = Hmac<Sha1>;

/// Compute the request signature over the full parameter set
pub fn sign_request(params: &ApiParams, secret: &str) -> ReconcileResult<String> {
    let canonical = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, encode_value(value)))
        .collect::<Vec<_>>()
        .join("&")
        .to_lowercase();

    let mut mac = HmacSha1::new_from_slice(secret.as_bytes())
        .map_err(|e| ReconcileError::Configuration(format!("Invalid API secret: {}", e)))?;
    mac.update(canonical.as_bytes());

    Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}

/// Percent-encode a value the way the CloudStack server does when it
/// rebuilds the string to verify: `*` stays literal and `~` is escaped
fn encode_value(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%2A", "*")
        .replace('~', "%7E")
}

/// Authenticated CloudStack API client
pub struct CloudStackClient {
    config: ApiConfig,
    http: Client,
}

impl CloudStackClient {
    /// Build a client for one endpoint
    pub fn new(config: ApiConfig) -> ReconcileResult<Self> {
        info!("Using CloudStack API at {}", config.endpoint);

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ReconcileError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, http })
    }

    async fn request(&self, command: &str, mut params: ApiParams) -> ReconcileResult<Value> {
        params.insert("command".to_string(), command.to_string());
        params.insert("response".to_string(), "json".to_string());
        params.insert("apiKey".to_string(), self.config.key.clone());
        let signature = sign_request(&params, &self.config.secret)?;
        params.insert("signature".to_string(), signature);

        let builder = match self.config.method {
            HttpMethod::Get => self.http.get(&self.config.endpoint).query(&params),
            HttpMethod::Post => self.http.post(&self.config.endpoint).form(&params),
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("{} returned {}", command, status);

        let payload: Value = match serde_json::from_str(&body) {
            Ok(payload) => payload,
            Err(_) if !status.is_success() => {
                return Err(ReconcileError::Transport(format!(
                    "{} returned {}: {}",
                    command, status, body
                )));
            }
            Err(e) => {
                return Err(ReconcileError::Deserialization(format!(
                    "{} returned invalid JSON: {}",
                    command, e
                )));
            }
        };

        let inner = unwrap_response(command, payload);

        if let Some(text) = inner.get("errortext").and_then(Value::as_str) {
            let code = inner.get("errorcode").map(Value::to_string).unwrap_or_default();
            return Err(ReconcileError::Transport(format!(
                "{} failed ({}): {}",
                command, code, text
            )));
        }

        if !status.is_success() {
            return Err(ReconcileError::Transport(format!(
                "{} returned {}: {}",
                command, status, body
            )));
        }

        Ok(inner)
    }
}

/// Strip the `<command>response` wrapper if present
fn unwrap_response(command: &str, payload: Value) -> Value {
    let key = format!("{}response", command.to_lowercase());
    match payload {
        Value::Object(mut map) => match map.remove(&key) {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    }
}

#[async_trait]
impl CloudStackApi for CloudStackClient {
    async fn query(&self, command: &str, params: ApiParams) -> ReconcileResult<Value> {
        self.request(command, params).await
    }

    async fn action(&self, command: &str, params: ApiParams) -> ReconcileResult<Value> {
        info!("Calling {} on {}", command, self.config.endpoint);
        self.request(command, params).await
    }
}
