//! Account registration and login use-case port.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::auth::{LoginCredentials, NewRegistration};
use crate::domain::error::Error;
use crate::domain::user::{UserId, UserProfile};

/// Message returned when registering an email that is already taken.
pub const EMAIL_TAKEN: &str = "User with this email already exists";

/// Message returned on any login failure.
pub const BAD_CREDENTIALS: &str = "Invalid email or password";

/// Message returned when a session references a deleted account.
pub const USER_NOT_FOUND: &str = "User not found";

/// Port for account registration, login and profile lookup.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and return its public profile.
    async fn register(&self, registration: NewRegistration) -> Result<UserProfile, Error>;

    /// Verify credentials and return the matching profile.
    async fn login(&self, credentials: &LoginCredentials) -> Result<UserProfile, Error>;

    /// The profile behind an established session.
    async fn profile(&self, user: UserId) -> Result<UserProfile, Error>;
}

struct FixtureAccount {
    profile: UserProfile,
    password: String,
}

/// In-memory accounts used when no database is configured.
///
/// Passwords are compared in plaintext; this fixture exists for demos and
/// endpoint tests only.
#[derive(Default)]
pub struct FixtureAuthService {
    accounts: Mutex<Vec<FixtureAccount>>,
}

impl FixtureAuthService {
    /// A fixture wrapped for sharing across handlers.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<FixtureAccount>>, Error> {
        self.accounts
            .lock()
            .map_err(|_| Error::internal("fixture account state poisoned"))
    }
}

#[async_trait]
impl AuthService for FixtureAuthService {
    async fn register(&self, registration: NewRegistration) -> Result<UserProfile, Error> {
        let mut accounts = self.lock()?;
        if accounts
            .iter()
            .any(|account| account.profile.email == registration.email())
        {
            return Err(Error::invalid_request(EMAIL_TAKEN));
        }
        let profile = UserProfile {
            id: UserId::new(Uuid::new_v4()),
            name: registration.name().to_owned(),
            email: registration.email().to_owned(),
        };
        accounts.push(FixtureAccount {
            profile: profile.clone(),
            password: registration.password().to_owned(),
        });
        Ok(profile)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<UserProfile, Error> {
        let accounts = self.lock()?;
        accounts
            .iter()
            .find(|account| {
                account.profile.email == credentials.email()
                    && account.password == credentials.password()
            })
            .map(|account| account.profile.clone())
            .ok_or_else(|| Error::unauthorized(BAD_CREDENTIALS))
    }

    async fn profile(&self, user: UserId) -> Result<UserProfile, Error> {
        let accounts = self.lock()?;
        accounts
            .iter()
            .find(|account| account.profile.id == user)
            .map(|account| account.profile.clone())
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}
