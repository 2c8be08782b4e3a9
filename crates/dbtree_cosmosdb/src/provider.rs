use std::sync::Arc;

use async_trait::async_trait;
use dbtree_core::{
    Account, AuthenticationType, BaseDirResolver, CategoryTreeProvider, ConnectionProfile,
    DiscoveredResource, IconAssets, Localizer, PathResolver, ProfileIdGenerator, ProviderConfig,
    ResourceCategory, ResourceService, ResourceTreeProvider, TreeDataProvider, TreeError, TreeNode,
};

pub const RESOURCE_PREFIX: &str = "Cosmosdb_";
pub const PROVIDER_NAME: &str = "COSMOSDB_NOSQL";
pub const CONTAINER_ID: &str =
    "azure.resource.providers.databaseServer.treeDataProvider.cosmosDbNoSqlContainer";
pub const CONTAINER_CONTEXT_VALUE: &str = "azure.resource.itemType.databaseServerContainer";
pub const LEAF_CONTEXT_VALUE: &str = "azure.resource.itemType.cosmosDBNoSqlAccount";

/// CosmosDB accounts exposed through the NoSql API.
pub static CATEGORY: ResourceCategory = ResourceCategory {
    prefix: RESOURCE_PREFIX,
    display_name: "CosmosDB NoSql API",
    container_id: CONTAINER_ID,
    container_label_key:
        "azure.resource.providers.databaseServer.treeDataProvider.cosmosDbNoSqlContainerLabel",
    container_context_value: CONTAINER_CONTEXT_VALUE,
    container_icons: IconAssets {
        dark: "resources/dark/folder_inverse.svg",
        light: "resources/light/folder.svg",
    },
    leaf_context_value: LEAF_CONTEXT_VALUE,
    leaf_icons: IconAssets {
        dark: "resources/dark/cosmosdb_inverse.svg",
        light: "resources/light/cosmosdb.svg",
    },
    provider_name: PROVIDER_NAME,
    authentication_type: AuthenticationType::AzureMfa,
};

/// Tree provider for CosmosDB NoSql accounts.
pub struct CosmosDbNoSqlTreeProvider {
    inner: CategoryTreeProvider,
}

impl CosmosDbNoSqlTreeProvider {
    pub fn new(resolver: Arc<dyn PathResolver>) -> Self {
        Self {
            inner: CategoryTreeProvider::new(&CATEGORY, resolver),
        }
    }

    /// Builds a provider resolving assets under `extension_root`, unless the
    /// config overrides the asset directory.
    pub fn from_config(
        config: &ProviderConfig,
        extension_root: impl Into<std::path::PathBuf>,
    ) -> Self {
        let root = config
            .asset_root
            .clone()
            .unwrap_or_else(|| extension_root.into());

        log::debug!("CosmosDB NoSql assets resolved under {}", root.display());

        Self::new(Arc::new(BaseDirResolver::new(root)))
    }

    pub fn with_localizer(self, localizer: Arc<dyn Localizer>) -> Self {
        Self {
            inner: self.inner.with_localizer(localizer),
        }
    }

    pub fn with_id_generator(self, ids: Arc<dyn ProfileIdGenerator>) -> Self {
        Self {
            inner: self.inner.with_id_generator(ids),
        }
    }

    /// Wraps this provider in the generic expansion driver.
    pub fn into_data_provider(
        self,
        service: Arc<dyn ResourceService>,
        config: ProviderConfig,
    ) -> TreeDataProvider<Self> {
        TreeDataProvider::new(self, service, config)
    }

    pub fn node_id(&self, resource: &DiscoveredResource, account: &Account) -> String {
        self.inner.node_id(resource, account)
    }

    pub fn build_profile(
        &self,
        resource: &DiscoveredResource,
        account: &Account,
    ) -> Result<ConnectionProfile, TreeError> {
        self.inner.build_profile(resource, account)
    }
}

#[async_trait]
impl ResourceTreeProvider for CosmosDbNoSqlTreeProvider {
    async fn root_children(&self) -> Result<Vec<TreeNode>, TreeError> {
        self.inner.root_children().await
    }

    fn validate_account(&self, account: &Account) -> Result<(), TreeError> {
        self.inner.validate_account(account)
    }

    fn tree_item_for_resource(
        &self,
        resource: &DiscoveredResource,
        account: &Account,
    ) -> Result<TreeNode, TreeError> {
        self.inner.tree_item_for_resource(resource, account)
    }
}
