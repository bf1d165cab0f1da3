//! The persistence and auth collaborator, seen from the core.
//!
//! Every call is a synchronous request/response. Callers update in-memory
//! state only after a call returns `Ok`.

use thiserror::Error;

use crate::models::{Session, Subscription};

#[derive(Debug, Error)]
pub(crate) enum BackendError {
    #[error("Not signed in")]
    Unauthenticated,
    #[error("Not allowed to access data of another user")]
    Forbidden,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Password must be at least {0} characters")]
    WeakPassword(usize),
    #[error("An account already exists for {0}")]
    EmailTaken(String),
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub(crate) trait Backend {
    fn sign_up(&mut self, email: &str, password: &str) -> Result<Session, BackendError>;
    fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, BackendError>;
    fn sign_out(&mut self) -> Result<(), BackendError>;
    fn session(&self) -> Option<&Session>;

    fn list_subscriptions(&self, user_id: i64) -> Result<Vec<Subscription>, BackendError>;
    /// Highest subscription id stored for any user. Ids are a global key.
    fn max_subscription_id(&self) -> Result<Option<i64>, BackendError>;
    fn create_subscription(&mut self, record: &Subscription) -> Result<Subscription, BackendError>;
    /// Deleting an id that does not exist is not an error.
    fn delete_subscription(&mut self, id: i64) -> Result<(), BackendError>;
}
