//! Token lifecycle management: pluggable credential storage and the
//! validity/refresh state machine.

pub mod lifecycle;
pub mod storage;

pub use lifecycle::TokenLifecycle;
pub use storage::{CredentialStore, InMemoryCredentialStore, MockCredentialStore};
