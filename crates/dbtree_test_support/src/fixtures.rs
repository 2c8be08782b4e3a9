use dbtree_core::{Account, DiscoveredResource, PathResolver, ProfileIdGenerator, TreeError};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

pub const PORTAL_ENDPOINT: &str = "https://portal.azure.com";

pub fn account(account_id: impl Into<String>) -> Account {
    Account::new(
        account_id,
        json!({
            "providerSettings": {
                "displayName": "Azure",
                "settings": { "portalEndpoint": PORTAL_ENDPOINT }
            }
        }),
    )
}

/// An account whose settings bag lacks the portal endpoint.
pub fn account_without_portal(account_id: impl Into<String>) -> Account {
    Account::new(
        account_id,
        json!({ "providerSettings": { "settings": {} } }),
    )
}

pub fn resource(
    name: impl Into<String>,
    id: Option<&str>,
    login_name: impl Into<String>,
    tenant: impl Into<String>,
) -> DiscoveredResource {
    let resource = DiscoveredResource::new(name)
        .with_login_name(login_name)
        .with_tenant(tenant);

    match id {
        Some(id) => resource.with_id(id),
        None => resource,
    }
}

/// Hands out `Uuid::from_u128(1)`, `Uuid::from_u128(2)`, ...
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileIdGenerator for SequentialIdGenerator {
    fn new_id(&self) -> Uuid {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        Uuid::from_u128(n as u128)
    }
}

/// Resolves under `/ext`, failing for any path containing `needle`.
pub struct FailingResolver {
    needle: String,
}

impl FailingResolver {
    pub fn failing_on(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }
}

impl PathResolver for FailingResolver {
    fn resolve(&self, relative_path: &str) -> Result<String, TreeError> {
        if relative_path.contains(&self.needle) {
            return Err(TreeError::AssetResolution {
                path: relative_path.to_string(),
                reason: "asset missing".to_string(),
            });
        }

        Ok(format!("/ext/{}", relative_path))
    }
}
