use crate::{
    Account, DiscoveredResource, ProviderConfig, ResourceService, ResourceTreeProvider, TreeError,
    TreeNode,
};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

/// A leaf handed to the host, together with the scope it was listed in.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceNode {
    pub account_id: String,
    pub tenant_id: String,
    pub resource_provider_id: String,
    pub tree_item: TreeNode,
}

/// A resource whose node could not be built.
#[derive(Debug)]
pub struct NodeFailure {
    pub resource_name: String,
    pub error: TreeError,
}

/// Result of expanding one category container.
#[derive(Debug, Default)]
pub struct Expansion {
    pub nodes: Vec<ResourceNode>,
    pub failures: Vec<NodeFailure>,
}

impl Expansion {
    pub fn tree_items(&self) -> Vec<TreeNode> {
        self.nodes.iter().map(|n| n.tree_item.clone()).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

struct CachedListing {
    resources: Arc<Vec<DiscoveredResource>>,
    fetched_at: Instant,
}

/// Drives lazy expansion of one resource category.
///
/// Owns the listing service and the category provider; the provider only
/// maps, this type fetches, caches, sorts and isolates failures. Cached
/// entries hold the raw listing rather than mapped nodes, so every
/// expansion yields fresh connection-profile ids without repeating I/O.
pub struct TreeDataProvider<P: ResourceTreeProvider> {
    provider: P,
    service: Arc<dyn ResourceService>,
    config: ProviderConfig,
    cache: RwLock<HashMap<String, CachedListing>>,
    browse_connection_mode: AtomicBool,
}

impl<P: ResourceTreeProvider> TreeDataProvider<P> {
    pub fn new(provider: P, service: Arc<dyn ResourceService>, config: ProviderConfig) -> Self {
        Self {
            provider,
            service,
            config,
            cache: RwLock::new(HashMap::new()),
            browse_connection_mode: AtomicBool::new(false),
        }
    }

    pub fn browse_connection_mode(&self) -> bool {
        self.browse_connection_mode.load(Ordering::Relaxed)
    }

    pub fn set_browse_connection_mode(&self, enabled: bool) {
        self.browse_connection_mode.store(enabled, Ordering::Relaxed);
    }

    pub async fn root_children(&self) -> Result<Vec<TreeNode>, TreeError> {
        self.provider.root_children().await
    }

    /// Root nodes when `account` is `None`, otherwise the account's leaves.
    ///
    /// Per-resource failures are logged and left out; use `expand` to
    /// inspect them.
    pub async fn get_children(
        &self,
        account: Option<&Account>,
    ) -> Result<Vec<TreeNode>, TreeError> {
        match account {
            None => self.root_children().await,
            Some(account) => Ok(self.expand(account).await?.tree_items()),
        }
    }

    /// Lists and maps every resource visible to `account`.
    ///
    /// Malformed accounts fail before the listing service is called, even
    /// when the listing would be empty. Listing errors and account-level
    /// mapping errors fail the whole expansion. Any other mapping error
    /// only drops the affected resource.
    pub async fn expand(&self, account: &Account) -> Result<Expansion, TreeError> {
        self.provider.validate_account(account)?;

        let resources = self.listing(account).await?;
        let provider_id = self.service.provider_id().to_string();

        let mut expansion = Expansion::default();

        for resource in resources.iter() {
            match self.provider.tree_item_for_resource(resource, account) {
                Ok(tree_item) => expansion.nodes.push(ResourceNode {
                    account_id: account.id().to_string(),
                    tenant_id: resource.tenant.clone(),
                    resource_provider_id: provider_id.clone(),
                    tree_item,
                }),
                Err(error) if error.is_account_level() => return Err(error),
                Err(error) => {
                    warn!(
                        "Skipping resource '{}' for account {}: {}",
                        resource.name,
                        account.id(),
                        error
                    );
                    expansion.failures.push(NodeFailure {
                        resource_name: resource.name.clone(),
                        error,
                    });
                }
            }
        }

        if self.config.sort_children {
            expansion
                .nodes
                .sort_by_cached_key(|node| node.tree_item.label.to_lowercase());
        }

        debug!(
            "Expanded {} for account {}: {} nodes, {} failures",
            provider_id,
            account.id(),
            expansion.nodes.len(),
            expansion.failures.len()
        );

        Ok(expansion)
    }

    /// Children of `container` for display; never fails.
    ///
    /// A failed expansion turns into a single message node, and partial
    /// failures append one message node after the successful leaves.
    pub async fn children_or_error(
        &self,
        container: &TreeNode,
        account: &Account,
    ) -> Vec<TreeNode> {
        match self.expand(account).await {
            Ok(expansion) => {
                let failed = expansion.failures.len();
                let mut items = expansion.tree_items();

                if failed > 0 {
                    items.push(TreeNode::message(
                        &container.id,
                        format!("{} resource(s) could not be displayed", failed),
                    ));
                }

                items
            }
            Err(error) => {
                warn!(
                    "Failed to expand {} for account {}: {}",
                    container.id,
                    account.id(),
                    error
                );
                vec![TreeNode::message(
                    &container.id,
                    format!("Unable to load resources: {}", error),
                )]
            }
        }
    }

    /// Drops the cached listing for one account. Returns whether one existed.
    pub fn invalidate(&self, account_id: &str) -> bool {
        let removed = rwlock_write(&self.cache).remove(account_id).is_some();

        if removed {
            info!("Invalidated cached listing for account {}", account_id);
        }

        removed
    }

    pub fn clear_cache(&self) {
        let mut cache = rwlock_write(&self.cache);
        let count = cache.len();
        cache.clear();

        if count > 0 {
            info!("Cleared {} cached listings", count);
        }
    }

    async fn listing(&self, account: &Account) -> Result<Arc<Vec<DiscoveredResource>>, TreeError> {
        let policy = self.config.cache;

        if let Some(cached) = rwlock_read(&self.cache).get(account.id())
            && policy.is_fresh(cached.fetched_at, Instant::now())
        {
            debug!("Serving cached listing for account {}", account.id());
            return Ok(cached.resources.clone());
        }

        let resources = Arc::new(self.service.list(account).await?);

        if policy.is_enabled() {
            rwlock_write(&self.cache).insert(
                account.id().to_string(),
                CachedListing {
                    resources: resources.clone(),
                    fetched_at: Instant::now(),
                },
            );
            debug!(
                "Cached {} resources for account {} ({})",
                resources.len(),
                account.id(),
                policy.label()
            );
        }

        Ok(resources)
    }
}

fn rwlock_read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn rwlock_write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
