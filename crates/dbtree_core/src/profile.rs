use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Authentication modes understood by the host's connection subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthenticationType {
    /// Interactive cloud-principal sign-in.
    #[serde(rename = "AzureMFA")]
    AzureMfa,
}

/// Connection payload attached to a leaf tree node.
///
/// Built fresh every time a leaf is materialized and never written to disk
/// (`save_profile` is always `false`). The password is left empty; the host
/// resolves credentials through `authentication_type` when connecting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionProfile {
    /// Unique per materialization, unrelated to the tree node id.
    pub id: Uuid,

    pub connection_name: String,
    pub server_name: String,
    pub user_name: String,
    pub password: String,
    pub authentication_type: AuthenticationType,

    /// The host may cache the secret it resolves after authenticating.
    pub save_password: bool,

    pub group_full_name: String,
    pub group_id: String,

    /// Driver tag of the backend that speaks to this server.
    pub provider_name: String,

    pub save_profile: bool,

    /// Driver-specific settings. Empty for profiles built from a listing.
    pub options: BTreeMap<String, JsonValue>,

    pub azure_account: String,
    pub azure_tenant_id: String,

    /// Copied from the discovered resource as-is; `None` when the listing
    /// omitted the id.
    pub azure_resource_id: Option<String>,

    pub azure_portal_endpoint: String,
}

impl ConnectionProfile {
    /// Whether the host should treat this profile as ephemeral.
    pub fn is_ephemeral(&self) -> bool {
        !self.save_profile
    }

    pub fn is_grouped(&self) -> bool {
        !self.group_id.is_empty()
    }
}
