use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// How long a resource listing stays valid before the next expansion
/// goes back to the listing service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CachePolicy {
    /// Every expansion lists again.
    Disabled,

    /// Listings are kept until explicitly invalidated.
    #[default]
    Manual,

    Interval {
        every_secs: u32,
    },
}

impl CachePolicy {
    pub fn is_enabled(self) -> bool {
        !matches!(self, CachePolicy::Disabled)
    }

    /// Whether a listing fetched at `fetched_at` may still be served at `now`.
    pub fn is_fresh(self, fetched_at: Instant, now: Instant) -> bool {
        match self {
            CachePolicy::Disabled => false,
            CachePolicy::Manual => true,
            CachePolicy::Interval { every_secs } => {
                now.saturating_duration_since(fetched_at) < Duration::from_secs(every_secs as u64)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CachePolicy::Disabled => "Off",
            CachePolicy::Manual => "Until refresh",
            CachePolicy::Interval { every_secs: 30 } => "30s",
            CachePolicy::Interval { every_secs: 60 } => "1m",
            CachePolicy::Interval { every_secs: 300 } => "5m",
            CachePolicy::Interval { every_secs: 900 } => "15m",
            CachePolicy::Interval { .. } => "Custom",
        }
    }
}
