mod account;
mod assets;
mod cache_policy;
mod category;
mod config;
mod data_provider;
mod error;
mod localization;
mod profile;
mod resource;
mod traits;
mod tree_node;

pub use account::{Account, AccountKey};
pub use assets::BaseDirResolver;
pub use cache_policy::CachePolicy;
pub use category::{CategoryTreeProvider, IconAssets, ResourceCategory};
pub use config::{ConfigStore, ProviderConfig};
pub use data_provider::{Expansion, NodeFailure, ResourceNode, TreeDataProvider};
pub use error::TreeError;
pub use localization::{FallbackLocalizer, MapLocalizer};
pub use profile::{AuthenticationType, ConnectionProfile};
pub use resource::DiscoveredResource;
pub use traits::{
    FnIdGenerator, Localizer, PathResolver, ProfileIdGenerator, ResourceService,
    ResourceTreeProvider, UuidV4Generator,
};
pub use tree_node::{CollapsibleState, MESSAGE_CONTEXT_VALUE, NodeType, ThemedIconPath, TreeNode};
