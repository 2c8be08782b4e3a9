use crate::{
    Account, AuthenticationType, ConnectionProfile, DiscoveredResource, FallbackLocalizer,
    Localizer, PathResolver, ProfileIdGenerator, ResourceTreeProvider, ThemedIconPath, TreeError,
    TreeNode, UuidV4Generator,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Dark/light asset names, relative to the extension root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconAssets {
    pub dark: &'static str,
    pub light: &'static str,
}

/// Static description of one resource category in the tree.
///
/// Everything that differs between categories is data here; the mapping
/// algorithm itself lives in `CategoryTreeProvider`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceCategory {
    /// Prepended to leaf ids so categories sharing one tree never collide.
    pub prefix: &'static str,

    /// Shown in leaf labels and as the container label fallback.
    pub display_name: &'static str,

    pub container_id: &'static str,
    pub container_label_key: &'static str,
    pub container_context_value: &'static str,
    pub container_icons: IconAssets,

    pub leaf_context_value: &'static str,
    pub leaf_icons: IconAssets,

    /// Driver tag used both as profile provider name and child provider.
    pub provider_name: &'static str,
    pub authentication_type: AuthenticationType,
}

/// Maps discovered database servers of one category onto tree nodes.
pub struct CategoryTreeProvider {
    category: &'static ResourceCategory,
    resolver: Arc<dyn PathResolver>,
    localizer: Arc<dyn Localizer>,
    ids: Arc<dyn ProfileIdGenerator>,
}

impl CategoryTreeProvider {
    pub fn new(category: &'static ResourceCategory, resolver: Arc<dyn PathResolver>) -> Self {
        Self {
            category,
            resolver,
            localizer: Arc::new(FallbackLocalizer),
            ids: Arc::new(UuidV4Generator),
        }
    }

    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn ProfileIdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn category(&self) -> &'static ResourceCategory {
        self.category
    }

    /// Stable tree id for a resource under an account.
    pub fn node_id(&self, resource: &DiscoveredResource, account: &Account) -> String {
        format!(
            "{}{}{}",
            self.category.prefix,
            account.id(),
            resource.identity()
        )
    }

    pub fn leaf_label(&self, resource: &DiscoveredResource) -> String {
        format!("{} ({})", resource.name, self.category.display_name)
    }

    /// Builds a fresh, unsaved connection profile for a resource.
    pub fn build_profile(
        &self,
        resource: &DiscoveredResource,
        account: &Account,
    ) -> Result<ConnectionProfile, TreeError> {
        let portal_endpoint = account.portal_endpoint()?;

        Ok(ConnectionProfile {
            id: self.ids.new_id(),
            connection_name: resource.name.clone(),
            server_name: resource.name.clone(),
            user_name: resource.login_name.clone(),
            password: String::new(),
            authentication_type: self.category.authentication_type,
            save_password: true,
            group_full_name: String::new(),
            group_id: String::new(),
            provider_name: self.category.provider_name.to_string(),
            save_profile: false,
            options: BTreeMap::new(),
            azure_account: account.id().to_string(),
            azure_tenant_id: resource.tenant.clone(),
            azure_resource_id: resource.id.clone(),
            azure_portal_endpoint: portal_endpoint.to_string(),
        })
    }

    fn resolve_icons(&self, icons: &IconAssets) -> Result<ThemedIconPath, TreeError> {
        Ok(ThemedIconPath {
            dark: self.resolver.resolve(icons.dark)?,
            light: self.resolver.resolve(icons.light)?,
        })
    }

    fn container_node(&self) -> Result<TreeNode, TreeError> {
        let label = self
            .localizer
            .lookup(self.category.container_label_key, self.category.display_name);

        Ok(TreeNode::container(
            self.category.container_id,
            label,
            self.resolve_icons(&self.category.container_icons)?,
            self.category.container_context_value,
        ))
    }
}

#[async_trait]
impl ResourceTreeProvider for CategoryTreeProvider {
    async fn root_children(&self) -> Result<Vec<TreeNode>, TreeError> {
        Ok(vec![self.container_node()?])
    }

    fn validate_account(&self, account: &Account) -> Result<(), TreeError> {
        account.portal_endpoint().map(|_| ())
    }

    fn tree_item_for_resource(
        &self,
        resource: &DiscoveredResource,
        account: &Account,
    ) -> Result<TreeNode, TreeError> {
        // Account-level problems surface before asset problems.
        let profile = self.build_profile(resource, account)?;
        let icons = self.resolve_icons(&self.category.leaf_icons)?;

        Ok(TreeNode::server(
            self.node_id(resource, account),
            self.leaf_label(resource),
            icons,
            self.category.leaf_context_value,
            profile,
        ))
    }
}
