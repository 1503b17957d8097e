// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Limit Reconciler
//!
//! Brings one CloudStack resource limit in line with the desired value and
//! prints the outcome as JSON on stdout. Logs go to stderr.
//!
//! Run with: cargo run --bin resource-limit -- --type instance --limit 10 --domain customers
//!
//! Prerequisites:
//! 1. CloudStack API endpoint (`--api-url` or CLOUDSTACK_ENDPOINT)
//! 2. API key and secret (CLOUDSTACK_KEY / CLOUDSTACK_SECRET), or a region
//!    in `~/.cloudstack.toml`

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

use cloudstack_resource_limit::config::{ApiConfig, ApiOverrides, HttpMethod};
use cloudstack_resource_limit::domain::{Limit, ResourceType, ScopeSpec};
use cloudstack_resource_limit::{CloudStackClient, LimitRequest, Reconciler, ReconciliationReport};

#[derive(Parser)]
#[command(name = "resource-limit")]
#[command(about = "Manage resource limits on Apache CloudStack based clouds")]
#[command(version)]
struct Cli {
    /// Type of the resource
    #[arg(
        short = 't',
        long = "resource-type",
        visible_alias = "type",
        value_parser = parse_resource_type
    )]
    resource_type: ResourceType,

    /// Maximum number of the resource, -1 for unlimited
    #[arg(
        short,
        long,
        visible_alias = "max",
        default_value_t = -1,
        allow_negative_numbers = true
    )]
    limit: i64,

    /// Domain the resource is related to
    #[arg(long, env = "CLOUDSTACK_DOMAIN")]
    domain: Option<String>,

    /// Account the resource is related to (requires --domain)
    #[arg(long, env = "CLOUDSTACK_ACCOUNT")]
    account: Option<String>,

    /// Name of the project the resource is related to
    #[arg(long, env = "CLOUDSTACK_PROJECT")]
    project: Option<String>,

    /// Report what would change without changing it
    #[arg(long, visible_alias = "check")]
    dry_run: bool,

    /// CloudStack API endpoint
    #[arg(long = "api-url", env = "CLOUDSTACK_ENDPOINT")]
    api_url: Option<String>,

    /// CloudStack API key
    #[arg(long = "api-key", env = "CLOUDSTACK_KEY")]
    api_key: Option<String>,

    /// CloudStack API secret
    #[arg(long = "api-secret", env = "CLOUDSTACK_SECRET", hide_env_values = true)]
    api_secret: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "api-timeout", env = "CLOUDSTACK_TIMEOUT")]
    api_timeout: Option<u64>,

    /// HTTP method used for API calls
    #[arg(long = "api-http-method", env = "CLOUDSTACK_METHOD")]
    api_http_method: Option<HttpMethod>,

    /// Region table to read from the config file
    #[arg(long = "api-region", env = "CLOUDSTACK_REGION")]
    api_region: Option<String>,

    /// Config file (default: ~/.cloudstack.toml)
    #[arg(long, env = "CLOUDSTACK_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_resource_type(value: &str) -> Result<ResourceType, String> {
    value.parse::<ResourceType>().map_err(|e| e.to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli).await;
    if let Err(e) = &result {
        error!("{:#}", e);
    }

    let (output, status) = render(&result);
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(_) => println!("{}", output),
    }
    ExitCode::from(status)
}

async fn run(cli: Cli) -> Result<ReconciliationReport> {
    let overrides = ApiOverrides {
        endpoint: cli.api_url,
        key: cli.api_key,
        secret: cli.api_secret,
        timeout_secs: cli.api_timeout,
        method: cli.api_http_method,
    };
    let config = ApiConfig::resolve(overrides, cli.api_region.as_deref(), cli.config.as_deref())
        .context("Failed to load CloudStack API configuration")?;
    debug!("API config: {:?}", config);

    let scope = ScopeSpec::new(cli.domain, cli.account, cli.project)?;
    let limit = Limit::new(cli.limit)?;
    let request = LimitRequest::new(cli.resource_type, limit, scope).dry_run(cli.dry_run);

    let client = CloudStackClient::new(config)?;
    let report = Reconciler::new(&client).reconcile(&request).await?;
    Ok(report)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

/// Output document and exit status for a finished run
fn render(result: &Result<ReconciliationReport>) -> (Value, u8) {
    match result {
        Ok(report) => match serde_json::to_value(report) {
            Ok(value) => (value, 0),
            Err(e) => (failure(&format!("Failed to serialize output: {}", e)), 1),
        },
        Err(e) => (failure(&format!("{:#}", e)), 1),
    }
}

fn failure(msg: &str) -> Value {
    json!({ "failed": true, "msg": msg })
}
