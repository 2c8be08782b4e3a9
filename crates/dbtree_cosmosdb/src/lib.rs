mod provider;

pub use provider::{
    CATEGORY, CONTAINER_CONTEXT_VALUE, CONTAINER_ID, CosmosDbNoSqlTreeProvider, LEAF_CONTEXT_VALUE,
    PROVIDER_NAME, RESOURCE_PREFIX,
};
