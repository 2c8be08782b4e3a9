use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Account {account_id} is missing setting '{path}'")]
    MissingAccountSetting { account_id: String, path: String },

    #[error("Resource listing failed: {0}")]
    Listing(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Could not resolve asset '{path}': {reason}")]
    AssetResolution { path: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TreeError {
    pub fn listing(message: impl Into<String>) -> Self {
        Self::Listing(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Errors that poison every resource under the same account.
    ///
    /// An expansion hitting one of these fails as a whole instead of
    /// reporting the same failure once per resource.
    pub fn is_account_level(&self) -> bool {
        matches!(
            self,
            TreeError::MissingAccountSetting { .. } | TreeError::Authentication(_)
        )
    }
}
