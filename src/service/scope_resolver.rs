// Copyright (c) 2025 - Cowboy AI, Inc.
//! Scope Resolver
//!
//! Turns caller supplied domain/account/project names into the identifiers
//! CloudStack addresses resource limits by. Lookups run in the order
//! domain → account → project, since each narrows the next. Every supplied
//! name must match exactly one remote object; the first name that matches
//! none, or several, aborts the whole resolution.

use tracing::debug;

use crate::api::commands::{ListAccounts, ListDomains, ListProjects};
use crate::api::{self, CloudStackApi};
use crate::domain::{domain_path, ResolvedScope, ScopeSpec};
use crate::errors::{ReconcileError, ReconcileResult};

/// Resolve every supplied scope field; absent fields stay absent
pub async fn resolve_scope<A>(client: &A, spec: &ScopeSpec) -> ReconcileResult<ResolvedScope>
where
    A: CloudStackApi + ?Sized,
{
    spec.validate()?;

    if spec.is_global() {
        debug!("no scope given, targeting the default scope");
        return Ok(ResolvedScope::default());
    }

    let domain_id = match &spec.domain {
        Some(domain) => Some(resolve_domain(client, domain).await?),
        None => None,
    };

    let account = match &spec.account {
        Some(account) => Some(resolve_account(client, account, domain_id.as_deref()).await?),
        None => None,
    };

    let project_id = match &spec.project {
        Some(project) => {
            Some(resolve_project(client, project, account.as_deref(), domain_id.as_deref()).await?)
        }
        None => None,
    };

    Ok(ResolvedScope {
        domain_id,
        account,
        project_id,
    })
}

/// Domain id for a name or path, matched case-insensitively on the full path
pub async fn resolve_domain<A>(client: &A, domain: &str) -> ReconcileResult<String>
where
    A: CloudStackApi + ?Sized,
{
    let wanted = domain_path(domain).to_lowercase();
    let domains = api::query(client, &ListDomains { listall: true }).await?;

    let matches = domains
        .domain
        .into_iter()
        .filter(|d| d.path.to_lowercase() == wanted)
        .collect();

    let found = exactly_one("domain", domain, matches)?;
    debug!("domain {} resolved to {}", domain, found.id);
    Ok(found.id)
}

/// Confirm an account exists in its domain and return its name
///
/// Names compare case-insensitively; the name is returned as supplied.
pub async fn resolve_account<A>(
    client: &A,
    account: &str,
    domain_id: Option<&str>,
) -> ReconcileResult<String>
where
    A: CloudStackApi + ?Sized,
{
    let request = ListAccounts {
        name: account.to_string(),
        domainid: domain_id.map(str::to_string),
        listall: true,
    };
    let accounts = api::query(client, &request).await?;

    let wanted = account.to_lowercase();
    let matches = accounts
        .account
        .into_iter()
        .filter(|a| a.name.to_lowercase() == wanted)
        .collect();

    let found = exactly_one("account", account, matches)?;
    debug!("account {} resolved to {}", account, found.id);
    Ok(account.to_string())
}

/// Project id for a project name (case-insensitive) or id
///
/// An exact id match wins over name matches.
pub async fn resolve_project<A>(
    client: &A,
    project: &str,
    account: Option<&str>,
    domain_id: Option<&str>,
) -> ReconcileResult<String>
where
    A: CloudStackApi + ?Sized,
{
    let request = ListProjects {
        account: account.map(str::to_string),
        domainid: domain_id.map(str::to_string),
        listall: true,
    };
    let projects = api::query(client, &request).await?;

    let (by_id, by_name): (Vec<_>, Vec<_>) = projects
        .project
        .into_iter()
        .partition(|p| p.id == project);

    let matches = if by_id.is_empty() {
        let wanted = project.to_lowercase();
        by_name
            .into_iter()
            .filter(|p| p.name.to_lowercase() == wanted)
            .collect()
    } else {
        by_id
    };

    let found = exactly_one("project", project, matches)?;
    debug!("project {} resolved to {}", project, found.id);
    Ok(found.id)
}

fn exactly_one<T>(entity: &'static str, name: &str, mut matches: Vec<T>) -> ReconcileResult<T> {
    match matches.len() {
        0 => Err(ReconcileError::scope(entity, name)),
        1 => matches.pop().ok_or_else(|| ReconcileError::scope(entity, name)),
        count => Err(ReconcileError::AmbiguousScope {
            entity,
            name: name.to_string(),
            count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_match_is_accepted() {
        assert_eq!(exactly_one("domain", "customers", vec![7]).unwrap(), 7);
    }

    #[test]
    fn test_no_match_is_not_found() {
        let err = exactly_one::<u8>("account", "nobody", vec![]).unwrap_err();
        assert_eq!(err.to_string(), "account 'nobody' not found");
    }

    #[test]
    fn test_several_matches_are_ambiguous() {
        let err = exactly_one("project", "proj1", vec![1, 2]).unwrap_err();
        assert!(matches!(err, ReconcileError::AmbiguousScope { count: 2, .. }));
        assert_eq!(err.to_string(), "project 'proj1' is ambiguous: 2 matches");
    }
}
