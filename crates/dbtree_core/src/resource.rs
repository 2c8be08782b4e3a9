use serde::{Deserialize, Serialize};

/// A database server instance reported by a listing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredResource {
    pub name: String,

    /// Cloud resource id. Some listings omit it.
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub login_name: String,

    #[serde(default)]
    pub tenant: String,
}

impl DiscoveredResource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            login_name: String::new(),
            tenant: String::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_login_name(mut self, login_name: impl Into<String>) -> Self {
        self.login_name = login_name.into();
        self
    }

    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = tenant.into();
        self
    }

    /// The value that identifies this resource inside a tree node id.
    pub fn identity(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }
}
