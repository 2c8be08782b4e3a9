use crate::TreeError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

const PORTAL_ENDPOINT_POINTER: &str = "/providerSettings/settings/portalEndpoint";
const PORTAL_ENDPOINT_PATH: &str = "providerSettings.settings.portalEndpoint";

/// Identifies an account within the authentication subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountKey {
    pub account_id: String,

    /// The auth provider that owns this account (e.g. "azure_publicCloud").
    #[serde(default)]
    pub provider_id: String,
}

/// An authenticated cloud principal.
///
/// Owned by the authentication subsystem and read-only here. `properties`
/// is the provider's settings bag, kept opaque except for the few paths
/// the tree needs to read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub key: AccountKey,

    #[serde(default)]
    pub properties: JsonValue,
}

impl Account {
    pub fn new(account_id: impl Into<String>, properties: JsonValue) -> Self {
        Self {
            key: AccountKey {
                account_id: account_id.into(),
                provider_id: String::new(),
            },
            properties,
        }
    }

    pub fn id(&self) -> &str {
        &self.key.account_id
    }

    /// Portal endpoint of the cloud environment this account lives in.
    ///
    /// A missing or non-string value is a malformed account, never an
    /// empty endpoint.
    pub fn portal_endpoint(&self) -> Result<&str, TreeError> {
        self.properties
            .pointer(PORTAL_ENDPOINT_POINTER)
            .and_then(JsonValue::as_str)
            .ok_or_else(|| TreeError::MissingAccountSetting {
                account_id: self.key.account_id.clone(),
                path: PORTAL_ENDPOINT_PATH.to_string(),
            })
    }
}
