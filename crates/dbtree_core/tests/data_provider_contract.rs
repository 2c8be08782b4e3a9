use async_trait::async_trait;
use dbtree_core::{
    Account, AuthenticationType, CachePolicy, CategoryTreeProvider, DiscoveredResource,
    IconAssets, MESSAGE_CONTEXT_VALUE, ProviderConfig, ResourceCategory, ResourceTreeProvider,
    TreeDataProvider, TreeError, TreeNode,
};
use dbtree_test_support::fixtures;
use dbtree_test_support::{FailingResolver, FakeResourceService, SequentialIdGenerator};
use std::sync::Arc;

const PROVIDER_ID: &str = "azure.resource.providers.test";

static SERVERS: ResourceCategory = ResourceCategory {
    prefix: "Test_",
    display_name: "Test Servers",
    container_id: "test.container",
    container_label_key: "test.container.label",
    container_context_value: "test.container",
    container_icons: IconAssets {
        dark: "resources/dark/folder_inverse.svg",
        light: "resources/light/folder.svg",
    },
    leaf_context_value: "test.server",
    leaf_icons: IconAssets {
        dark: "resources/dark/server_inverse.svg",
        light: "resources/light/server.svg",
    },
    provider_name: "TEST",
    authentication_type: AuthenticationType::AzureMfa,
};

/// Fails node construction for resources named "broken".
struct PickyProvider {
    inner: CategoryTreeProvider,
}

#[async_trait]
impl ResourceTreeProvider for PickyProvider {
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
        if resource.name == "broken" {
            return Err(TreeError::AssetResolution {
                path: "resources/light/server.svg".to_string(),
                reason: "asset missing".to_string(),
            });
        }

        self.inner.tree_item_for_resource(resource, account)
    }
}

fn category_provider() -> CategoryTreeProvider {
    CategoryTreeProvider::new(&SERVERS, Arc::new(FailingResolver::failing_on("<never>")))
        .with_id_generator(Arc::new(SequentialIdGenerator::new()))
}

fn tree(
    service: &FakeResourceService,
    config: ProviderConfig,
) -> TreeDataProvider<PickyProvider> {
    TreeDataProvider::new(
        PickyProvider {
            inner: category_provider(),
        },
        service.clone().as_service_arc(),
        config,
    )
}

fn two_servers() -> Vec<DiscoveredResource> {
    vec![
        fixtures::resource("srv-b", Some("res-b"), "admin", "ten-1"),
        fixtures::resource("srv-a", Some("res-a"), "admin", "ten-2"),
    ]
}

#[tokio::test]
async fn expansion_wraps_nodes_with_listing_scope() {
    let service = FakeResourceService::new(PROVIDER_ID).with_resources("acct-1", two_servers());
    let tree = tree(&service, ProviderConfig::default());

    let expansion = tree
        .expand(&fixtures::account("acct-1"))
        .await
        .expect("expansion should succeed");

    assert!(expansion.is_complete());
    assert_eq!(expansion.nodes.len(), 2);

    let first = &expansion.nodes[0];
    assert_eq!(first.account_id, "acct-1");
    assert_eq!(first.tenant_id, "ten-2");
    assert_eq!(first.resource_provider_id, PROVIDER_ID);
    assert_eq!(first.tree_item.id, "Test_acct-1res-a");
    assert_eq!(service.stats().listed_accounts, vec!["acct-1".to_string()]);
}

#[tokio::test]
async fn children_are_sorted_case_insensitively() {
    let service = FakeResourceService::new(PROVIDER_ID).with_resources(
        "acct-1",
        vec![
            fixtures::resource("charlie", None, "u", "t"),
            fixtures::resource("Bravo", None, "u", "t"),
            fixtures::resource("alpha", None, "u", "t"),
        ],
    );
    let tree = tree(&service, ProviderConfig::default());

    let children = tree
        .get_children(Some(&fixtures::account("acct-1")))
        .await
        .unwrap();

    let names: Vec<_> = children
        .iter()
        .map(|n| n.payload.as_ref().unwrap().server_name.as_str())
        .collect();
    assert_eq!(names, vec!["alpha", "Bravo", "charlie"]);
}

#[tokio::test]
async fn unsorted_config_keeps_listing_order() {
    let service = FakeResourceService::new(PROVIDER_ID).with_resources("acct-1", two_servers());
    let config = ProviderConfig {
        sort_children: false,
        ..ProviderConfig::default()
    };
    let tree = tree(&service, config);

    let children = tree
        .get_children(Some(&fixtures::account("acct-1")))
        .await
        .unwrap();

    assert_eq!(children[0].id, "Test_acct-1res-b");
    assert_eq!(children[1].id, "Test_acct-1res-a");
}

#[tokio::test]
async fn cached_listing_is_remapped_with_fresh_profile_ids() {
    let service = FakeResourceService::new(PROVIDER_ID).with_resources("acct-1", two_servers());
    let tree = tree(&service, ProviderConfig::default());
    let account = fixtures::account("acct-1");

    let first = tree.get_children(Some(&account)).await.unwrap();
    let second = tree.get_children(Some(&account)).await.unwrap();

    assert_eq!(service.stats().list_calls, 1);

    let first_ids: Vec<_> = first.iter().map(|n| n.id.clone()).collect();
    let second_ids: Vec<_> = second.iter().map(|n| n.id.clone()).collect();
    assert_eq!(first_ids, second_ids);

    for (a, b) in first.iter().zip(second.iter()) {
        assert_ne!(a.payload.as_ref().unwrap().id, b.payload.as_ref().unwrap().id);
    }
}

#[tokio::test]
async fn invalidate_forces_a_new_listing() {
    let service = FakeResourceService::new(PROVIDER_ID).with_resources("acct-1", two_servers());
    let tree = tree(&service, ProviderConfig::default());
    let account = fixtures::account("acct-1");

    tree.expand(&account).await.unwrap();
    assert!(tree.invalidate("acct-1"));
    assert!(!tree.invalidate("acct-1"));

    service.set_outcome(
        "acct-1",
        dbtree_test_support::FakeListingOutcome::Success(vec![fixtures::resource(
            "srv-new", None, "u", "t",
        )]),
    );

    let children = tree.get_children(Some(&account)).await.unwrap();

    assert_eq!(service.stats().list_calls, 2);
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, "Test_acct-1srv-new");
}

#[tokio::test]
async fn clear_cache_drops_every_account() {
    let service = FakeResourceService::new(PROVIDER_ID).with_default_resources(two_servers());
    let tree = tree(&service, ProviderConfig::default());

    tree.expand(&fixtures::account("acct-1")).await.unwrap();
    tree.expand(&fixtures::account("acct-2")).await.unwrap();
    tree.clear_cache();
    tree.expand(&fixtures::account("acct-1")).await.unwrap();
    tree.expand(&fixtures::account("acct-2")).await.unwrap();

    assert_eq!(service.stats().list_calls, 4);
}

#[tokio::test]
async fn disabled_cache_lists_every_time() {
    let service = FakeResourceService::new(PROVIDER_ID).with_resources("acct-1", two_servers());
    let config = ProviderConfig {
        cache: CachePolicy::Disabled,
        ..ProviderConfig::default()
    };
    let tree = tree(&service, config);
    let account = fixtures::account("acct-1");

    tree.expand(&account).await.unwrap();
    tree.expand(&account).await.unwrap();

    assert_eq!(service.stats().list_calls, 2);
    assert!(!tree.invalidate("acct-1"));
}

#[tokio::test]
async fn accounts_are_cached_independently() {
    let service = FakeResourceService::new(PROVIDER_ID)
        .with_resources("acct-1", two_servers())
        .with_resources("acct-2", vec![fixtures::resource("only", None, "u", "t")]);
    let tree = tree(&service, ProviderConfig::default());

    let one = tree.get_children(Some(&fixtures::account("acct-1"))).await.unwrap();
    let two = tree.get_children(Some(&fixtures::account("acct-2"))).await.unwrap();

    assert_eq!(one.len(), 2);
    assert_eq!(two.len(), 1);
    assert_eq!(two[0].id, "Test_acct-2only");
}

#[tokio::test]
async fn listing_errors_propagate_unchanged() {
    let service =
        FakeResourceService::new(PROVIDER_ID).with_listing_error("acct-1", "503 from ARM");
    let tree = tree(&service, ProviderConfig::default());

    let err = tree
        .expand(&fixtures::account("acct-1"))
        .await
        .expect_err("listing failure should propagate");

    assert!(matches!(err, TreeError::Listing(ref message) if message == "503 from ARM"));
}

#[tokio::test]
async fn failed_listing_is_not_cached() {
    let service =
        FakeResourceService::new(PROVIDER_ID).with_auth_error("acct-1", "token expired");
    let tree = tree(&service, ProviderConfig::default());
    let account = fixtures::account("acct-1");

    assert!(tree.expand(&account).await.is_err());

    service.set_outcome(
        "acct-1",
        dbtree_test_support::FakeListingOutcome::Success(two_servers()),
    );

    let expansion = tree.expand(&account).await.unwrap();
    assert_eq!(expansion.nodes.len(), 2);
    assert_eq!(service.stats().list_calls, 2);
}

#[tokio::test]
async fn malformed_account_fails_the_whole_expansion() {
    let service = FakeResourceService::new(PROVIDER_ID).with_default_resources(two_servers());
    let tree = tree(&service, ProviderConfig::default());

    let err = tree
        .expand(&fixtures::account_without_portal("acct-1"))
        .await
        .expect_err("missing portal endpoint must not yield an empty list");

    assert!(err.is_account_level());
}

#[tokio::test]
async fn per_resource_failures_do_not_abort_siblings() {
    let service = FakeResourceService::new(PROVIDER_ID).with_resources(
        "acct-1",
        vec![
            fixtures::resource("srv-a", None, "u", "t"),
            fixtures::resource("broken", None, "u", "t"),
            fixtures::resource("srv-c", None, "u", "t"),
        ],
    );
    let tree = tree(&service, ProviderConfig::default());

    let expansion = tree.expand(&fixtures::account("acct-1")).await.unwrap();

    assert_eq!(expansion.nodes.len(), 2);
    assert_eq!(expansion.failures.len(), 1);
    assert_eq!(expansion.failures[0].resource_name, "broken");
    assert!(matches!(
        expansion.failures[0].error,
        TreeError::AssetResolution { .. }
    ));
}

#[tokio::test]
async fn failed_expansion_becomes_a_message_node() {
    let service = FakeResourceService::new(PROVIDER_ID).with_listing_error("acct-1", "offline");
    let tree = tree(&service, ProviderConfig::default());
    let container = tree.root_children().await.unwrap().remove(0);

    let children = tree
        .children_or_error(&container, &fixtures::account("acct-1"))
        .await;

    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, "test.container|message");
    assert_eq!(children[0].context_value, MESSAGE_CONTEXT_VALUE);
    assert!(children[0].label.contains("offline"));
    assert!(children[0].payload.is_none());
}

#[tokio::test]
async fn partial_failures_append_a_message_node() {
    let service = FakeResourceService::new(PROVIDER_ID).with_resources(
        "acct-1",
        vec![
            fixtures::resource("srv-a", None, "u", "t"),
            fixtures::resource("broken", None, "u", "t"),
        ],
    );
    let tree = tree(&service, ProviderConfig::default());
    let container = tree.root_children().await.unwrap().remove(0);

    let children = tree
        .children_or_error(&container, &fixtures::account("acct-1"))
        .await;

    assert_eq!(children.len(), 2);
    assert!(children[0].payload.is_some());
    assert_eq!(children[1].context_value, MESSAGE_CONTEXT_VALUE);
    assert!(children[1].label.starts_with('1'));
}

#[tokio::test]
async fn empty_listing_yields_no_children() {
    let service = FakeResourceService::new(PROVIDER_ID);
    let tree = tree(&service, ProviderConfig::default());

    let children = tree
        .get_children(Some(&fixtures::account("acct-1")))
        .await
        .unwrap();

    assert!(children.is_empty());
}

#[tokio::test]
async fn browse_connection_mode_is_toggleable() {
    let service = FakeResourceService::new(PROVIDER_ID);
    let tree = tree(&service, ProviderConfig::default());

    assert!(!tree.browse_connection_mode());
    tree.set_browse_connection_mode(true);
    assert!(tree.browse_connection_mode());
}

#[tokio::test]
async fn malformed_account_with_empty_listing_still_fails() {
    let service = FakeResourceService::new(PROVIDER_ID);
    let tree = tree(&service, ProviderConfig::default());
    let account = fixtures::account_without_portal("acct-1");

    let err = tree
        .get_children(Some(&account))
        .await
        .expect_err("an empty listing must not hide a malformed account");

    assert!(err.is_account_level());
    assert_eq!(service.stats().list_calls, 0);

    let container = tree.root_children().await.unwrap().remove(0);
    let children = tree.children_or_error(&container, &account).await;

    assert_eq!(children.len(), 1);
    assert_eq!(children[0].context_value, MESSAGE_CONTEXT_VALUE);
    assert!(children[0].label.contains("portalEndpoint"));
    assert_eq!(service.stats().list_calls, 0);
}
