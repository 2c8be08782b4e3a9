use crate::Localizer;
use std::collections::HashMap;

/// Localizer that always returns the fallback text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackLocalizer;

impl Localizer for FallbackLocalizer {
    fn lookup(&self, _key: &str, fallback: &str) -> String {
        fallback.to_string()
    }
}

/// Localizer over an in-memory key/translation table, typically filled
/// from the host's message bundle.
#[derive(Debug, Clone, Default)]
pub struct MapLocalizer {
    messages: HashMap<String, String>,
}

impl MapLocalizer {
    pub fn with_message(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.messages.insert(key.into(), text.into());
        self
    }
}

impl Localizer for MapLocalizer {
    fn lookup(&self, key: &str, fallback: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }
}
