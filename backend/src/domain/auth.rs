//! Credential value types for registration and login.
//!
//! Plaintext passwords are wrapped in [`Zeroizing`] so they are wiped from
//! memory once the hash or comparison is done.

use zeroize::Zeroizing;

/// Validated login credentials.
#[derive(Debug)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

/// Rejection reasons for credential and registration input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsError {
    /// A required field was absent or blank.
    #[error("required credential fields are missing")]
    MissingFields,
}

impl LoginCredentials {
    /// Build credentials from raw request fields.
    ///
    /// Trims the email and lowercases it so lookups match the stored form.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError::MissingFields`] when either field is blank.
    pub fn try_from_parts(email: &str, password: String) -> Result<Self, CredentialsError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(CredentialsError::MissingFields);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password),
        })
    }

    /// Normalised login email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Plaintext password for hash verification.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Validated registration input.
#[derive(Debug)]
pub struct NewRegistration {
    name: String,
    email: String,
    password: Zeroizing<String>,
}

impl NewRegistration {
    /// Build a registration from raw request fields.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError::MissingFields`] when any field is blank.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: String,
    ) -> Result<Self, CredentialsError> {
        let name = name.trim().to_owned();
        let email = email.trim().to_lowercase();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(CredentialsError::MissingFields);
        }
        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password),
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalised email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Plaintext password for hashing.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}
