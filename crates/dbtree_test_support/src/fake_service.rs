use async_trait::async_trait;
use dbtree_core::{Account, DiscoveredResource, ResourceService, TreeError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
pub enum FakeListingOutcome {
    Success(Vec<DiscoveredResource>),
    ListingError(String),
    AuthError(String),
}

impl FakeListingOutcome {
    fn to_result(&self) -> Result<Vec<DiscoveredResource>, TreeError> {
        match self {
            Self::Success(resources) => Ok(resources.clone()),
            Self::ListingError(message) => Err(TreeError::listing(message.clone())),
            Self::AuthError(message) => Err(TreeError::authentication(message.clone())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeServiceStats {
    pub list_calls: usize,
    pub listed_accounts: Vec<String>,
}

#[derive(Default)]
struct FakeServiceState {
    outcomes: RwLock<HashMap<String, FakeListingOutcome>>,
    default_outcome: RwLock<Option<FakeListingOutcome>>,
    listed_accounts: Mutex<Vec<String>>,
    list_calls: AtomicUsize,
}

/// In-memory listing service with per-account canned outcomes.
///
/// Accounts without a configured outcome get the default outcome, or an
/// empty listing when none is set.
#[derive(Clone)]
pub struct FakeResourceService {
    provider_id: String,
    state: Arc<FakeServiceState>,
}

impl FakeResourceService {
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            state: Arc::new(FakeServiceState::default()),
        }
    }

    pub fn with_resources(
        self,
        account_id: impl Into<String>,
        resources: Vec<DiscoveredResource>,
    ) -> Self {
        self.set_outcome(account_id, FakeListingOutcome::Success(resources));
        self
    }

    pub fn with_listing_error(
        self,
        account_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.set_outcome(account_id, FakeListingOutcome::ListingError(message.into()));
        self
    }

    pub fn with_auth_error(
        self,
        account_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.set_outcome(account_id, FakeListingOutcome::AuthError(message.into()));
        self
    }

    pub fn with_default_resources(self, resources: Vec<DiscoveredResource>) -> Self {
        *rwlock_write(&self.state.default_outcome) = Some(FakeListingOutcome::Success(resources));
        self
    }

    pub fn set_outcome(&self, account_id: impl Into<String>, outcome: FakeListingOutcome) {
        rwlock_write(&self.state.outcomes).insert(account_id.into(), outcome);
    }

    pub fn stats(&self) -> FakeServiceStats {
        FakeServiceStats {
            list_calls: self.state.list_calls.load(Ordering::Relaxed),
            listed_accounts: mutex_lock(&self.state.listed_accounts).clone(),
        }
    }

    pub fn as_service_arc(self) -> Arc<dyn ResourceService> {
        Arc::new(self)
    }
}

#[async_trait]
impl ResourceService for FakeResourceService {
    fn provider_id(&self) -> &str {
        &self.provider_id
    }

    async fn list(&self, account: &Account) -> Result<Vec<DiscoveredResource>, TreeError> {
        self.state.list_calls.fetch_add(1, Ordering::Relaxed);
        mutex_lock(&self.state.listed_accounts).push(account.id().to_string());

        let outcome = rwlock_read(&self.state.outcomes)
            .get(account.id())
            .cloned()
            .or_else(|| rwlock_read(&self.state.default_outcome).clone());

        match outcome {
            Some(outcome) => outcome.to_result(),
            None => Ok(Vec::new()),
        }
    }
}

fn mutex_lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn rwlock_read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn rwlock_write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
