use crate::{Account, DiscoveredResource, TreeError, TreeNode};
use async_trait::async_trait;
use uuid::Uuid;

/// Lists the resources of one category visible to an account.
///
/// Implementations talk to the cloud provider and own retries, token
/// acquisition and cancellation. Their errors reach the host unchanged.
#[async_trait]
pub trait ResourceService: Send + Sync {
    /// Identifier of the resource provider this service lists for.
    fn provider_id(&self) -> &str;

    async fn list(&self, account: &Account) -> Result<Vec<DiscoveredResource>, TreeError>;
}

/// One resource category's contribution to the tree.
///
/// The generic `TreeDataProvider` drives expansion; implementations only
/// describe the category's root container and how one resource maps to a
/// leaf node.
#[async_trait]
pub trait ResourceTreeProvider: Send + Sync {
    /// The static container node(s) shown before any expansion.
    ///
    /// Must not touch the listing service.
    async fn root_children(&self) -> Result<Vec<TreeNode>, TreeError>;

    /// Rejects accounts this category can never map, before any listing.
    fn validate_account(&self, _account: &Account) -> Result<(), TreeError> {
        Ok(())
    }

    /// Maps one resource to a leaf node.
    ///
    /// Deterministic apart from the embedded profile id, free of I/O, and
    /// never mutates its inputs.
    fn tree_item_for_resource(
        &self,
        resource: &DiscoveredResource,
        account: &Account,
    ) -> Result<TreeNode, TreeError>;
}

/// Source of connection-profile ids.
pub trait ProfileIdGenerator: Send + Sync {
    fn new_id(&self) -> Uuid;
}

/// Default generator backed by random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Generator;

impl ProfileIdGenerator for UuidV4Generator {
    fn new_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Adapts a plain closure into a generator.
pub struct FnIdGenerator<F>(pub F);

impl<F> ProfileIdGenerator for FnIdGenerator<F>
where
    F: Fn() -> Uuid + Send + Sync,
{
    fn new_id(&self) -> Uuid {
        (self.0)()
    }
}

/// Turns a path relative to the extension root into something the host
/// can load (absolute path or URI).
pub trait PathResolver: Send + Sync {
    fn resolve(&self, relative_path: &str) -> Result<String, TreeError>;
}

/// Looks up display strings, falling back to the given text when no
/// translation exists.
pub trait Localizer: Send + Sync {
    fn lookup(&self, key: &str, fallback: &str) -> String;
}
