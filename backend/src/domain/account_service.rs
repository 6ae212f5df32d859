//! Password-backed account service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;
use zeroize::Zeroizing;

use crate::domain::auth::{LoginCredentials, NewRegistration};
use crate::domain::error::Error;
use crate::domain::ports::{
    AuthService, BAD_CREDENTIALS, EMAIL_TAKEN, NewUserRecord, USER_NOT_FOUND,
    UserPersistenceError, UserRepository,
};
use crate::domain::user::{UserId, UserProfile};

/// Bcrypt work factor for stored password hashes.
pub const BCRYPT_COST: u32 = 12;

/// [`AuthService`] over a [`UserRepository`], hashing passwords with bcrypt.
///
/// Hashing and verification run on the blocking thread pool; both take tens
/// of milliseconds at the configured cost.
pub struct PasswordAuthService {
    users: Arc<dyn UserRepository>,
}

impl PasswordAuthService {
    /// Build the service over an account repository.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            error!(%message, "user storage unavailable");
            Error::service_unavailable("user storage unavailable")
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user storage query failed");
            Error::internal("user storage query failed")
        }
        UserPersistenceError::DuplicateEmail { .. } => Error::invalid_request(EMAIL_TAKEN),
    }
}

fn profile_of(user: crate::domain::ports::StoredUser) -> UserProfile {
    UserProfile {
        id: UserId::new(user.id),
        name: user.name,
        email: user.email,
    }
}

async fn hash_password(password: Zeroizing<String>) -> Result<String, Error> {
    let joined = tokio::task::spawn_blocking(move || bcrypt::hash(password.as_str(), BCRYPT_COST))
        .await
        .map_err(|_| Error::internal("password hashing task failed"))?;
    joined.map_err(|_| Error::internal("password hashing failed"))
}

async fn verify_password(password: Zeroizing<String>, hash: String) -> Result<bool, Error> {
    let joined =
        tokio::task::spawn_blocking(move || bcrypt::verify(password.as_str(), hash.as_str()))
            .await
            .map_err(|_| Error::internal("password verification task failed"))?;
    joined.map_err(|_| Error::internal("password verification failed"))
}

#[async_trait]
impl AuthService for PasswordAuthService {
    async fn register(&self, registration: NewRegistration) -> Result<UserProfile, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(Error::invalid_request(EMAIL_TAKEN));
        }
        let password = Zeroizing::new(registration.password().to_owned());
        let password_hash = hash_password(password).await?;
        let stored = self
            .users
            .insert(NewUserRecord {
                email: registration.email().to_owned(),
                name: registration.name().to_owned(),
                password_hash,
            })
            .await
            .map_err(map_user_error)?;
        Ok(profile_of(stored))
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<UserProfile, Error> {
        let stored = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized(BAD_CREDENTIALS))?;
        let password = Zeroizing::new(credentials.password().to_owned());
        let hash = stored.password_hash.clone();
        if verify_password(password, hash).await? {
            Ok(profile_of(stored))
        } else {
            Err(Error::unauthorized(BAD_CREDENTIALS))
        }
    }

    async fn profile(&self, user: UserId) -> Result<UserProfile, Error> {
        let stored = self
            .users
            .find_by_id(user.as_uuid())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;
        Ok(profile_of(stored))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockUserRepository, StoredUser};

    // Low cost keeps the tests fast; production uses BCRYPT_COST.
    const TEST_COST: u32 = 4;

    fn stored_user(password: &str) -> StoredUser {
        StoredUser {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_owned(),
            name: "Ada".to_owned(),
            password_hash: bcrypt::hash(password, TEST_COST).expect("hashing succeeds"),
        }
    }

    fn registration() -> NewRegistration {
        NewRegistration::try_from_parts("Ada", "ada@example.com", "pw".to_owned())
            .expect("valid registration")
    }

    fn credentials(password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts("ada@example.com", password.to_owned())
            .expect("valid credentials")
    }

    #[tokio::test]
    async fn register_hashes_and_stores_the_account() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(None));
        users.expect_insert().returning(|record| {
            assert!(record.password_hash.starts_with("$2"));
            assert_ne!(record.password_hash, "pw");
            Ok(StoredUser {
                id: Uuid::new_v4(),
                email: record.email,
                name: record.name,
                password_hash: record.password_hash,
            })
        });
        let service = PasswordAuthService::new(Arc::new(users));
        let profile = service
            .register(registration())
            .await
            .expect("registration succeeds");
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.name, "Ada");
    }

    #[tokio::test]
    async fn register_rejects_existing_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user("other"))));
        users.expect_insert().never();
        let service = PasswordAuthService::new(Arc::new(users));
        let error = service
            .register(registration())
            .await
            .expect_err("duplicate fails");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), EMAIL_TAKEN);
    }

    #[tokio::test]
    async fn register_maps_insert_race_to_email_taken() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(None));
        users
            .expect_insert()
            .returning(|_| Err(UserPersistenceError::duplicate_email("users_email_key")));
        let service = PasswordAuthService::new(Arc::new(users));
        let error = service
            .register(registration())
            .await
            .expect_err("duplicate fails");
        assert_eq!(error.message(), EMAIL_TAKEN);
    }

    #[tokio::test]
    async fn login_accepts_matching_password() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user("pw"))));
        let service = PasswordAuthService::new(Arc::new(users));
        let profile = service
            .login(&credentials("pw"))
            .await
            .expect("login succeeds");
        assert_eq!(profile.email, "ada@example.com");
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user("pw"))));
        let service = PasswordAuthService::new(Arc::new(users));
        let error = service
            .login(&credentials("nope"))
            .await
            .expect_err("login fails");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), BAD_CREDENTIALS);
    }

    #[tokio::test]
    async fn login_rejects_unknown_email_with_same_message() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(None));
        let service = PasswordAuthService::new(Arc::new(users));
        let error = service
            .login(&credentials("pw"))
            .await
            .expect_err("login fails");
        assert_eq!(error.message(), BAD_CREDENTIALS);
    }

    #[tokio::test]
    async fn connection_failures_surface_as_service_unavailable() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Err(UserPersistenceError::connection("pool closed")));
        let service = PasswordAuthService::new(Arc::new(users));
        let error = service
            .login(&credentials("pw"))
            .await
            .expect_err("login fails");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|_| Ok(None));
        let service = PasswordAuthService::new(Arc::new(users));
        let error = service
            .profile(UserId::new(Uuid::new_v4()))
            .await
            .expect_err("lookup fails");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), USER_NOT_FOUND);
    }
}
