//! Admin password gate
//!
//! The secret is stored and compared in plaintext under `adminPassword`.

use crate::errors::AuthError;
use crate::storage::{Storage, PASSWORD_KEY};
use tracing::info;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    secret: Option<String>,
}

impl AuthGate {
    /// Read the stored secret, if any
    pub fn load(storage: &dyn Storage) -> Result<Self, AuthError> {
        Ok(Self {
            secret: storage.get_item(PASSWORD_KEY)?,
        })
    }

    /// No secret has been created yet
    pub fn needs_setup(&self) -> bool {
        self.secret.is_none()
    }

    /// Create or replace the secret
    pub fn set_password(
        &mut self,
        storage: &mut dyn Storage,
        password: &str,
        confirm: &str,
    ) -> Result<(), AuthError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::TooShort);
        }
        if password != confirm {
            return Err(AuthError::Mismatch);
        }

        storage.set_item(PASSWORD_KEY, password)?;
        self.secret = Some(password.to_string());
        info!("admin password set");
        Ok(())
    }

    pub fn verify(&self, attempt: &str) -> Result<(), AuthError> {
        match &self.secret {
            Some(secret) if secret == attempt => Ok(()),
            _ => Err(AuthError::IncorrectPassword),
        }
    }
}
