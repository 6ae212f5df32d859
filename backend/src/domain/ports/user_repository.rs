//! Account storage port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::macros::define_port_error;

define_port_error! {
    /// Failures surfaced by [`UserRepository`] implementations.
    UserPersistenceError {
        /// Could not obtain or keep a storage connection.
        Connection => "user storage connection failure: {message}",
        /// The storage backend rejected the operation.
        Query => "user storage query failure: {message}",
        /// Another account already uses this email.
        DuplicateEmail => "email already registered: {message}",
    }
}

/// A stored account including its password hash.
///
/// Only auth services see this type; HTTP responses use
/// [`crate::domain::UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    /// Unique account identifier.
    pub id: Uuid,
    /// Login email, lowercased.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Bcrypt hash of the account password.
    pub password_hash: String,
}

/// Input for creating an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    /// Login email, lowercased.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Bcrypt hash of the account password.
    pub password_hash: String,
}

/// Port for account persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new account and return it with its generated identifier.
    async fn insert(&self, record: NewUserRecord) -> Result<StoredUser, UserPersistenceError>;

    /// Look up an account by its lowercased email.
    async fn find_by_email(&self, email: &str)
    -> Result<Option<StoredUser>, UserPersistenceError>;

    /// Look up an account by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoredUser>, UserPersistenceError>;
}
