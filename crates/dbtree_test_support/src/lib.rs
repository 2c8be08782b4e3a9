pub mod fake_service;
pub mod fixtures;

pub use fake_service::{FakeListingOutcome, FakeResourceService, FakeServiceStats};
pub use fixtures::{FailingResolver, SequentialIdGenerator};
