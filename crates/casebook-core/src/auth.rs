//! Username/password authentication
//!
//! Passwords are stored as `hex(salt)$hex(sha256(salt || password))` with a
//! fresh 16-byte salt per user. Digests are compared in constant time.

use crate::clock::Clock;
use crate::error::CasebookError;
use casebook_model::{PublicUser, User};
use casebook_store::RecordStore;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use std::sync::Arc;
use uuid::Uuid;

const SALT_LEN: usize = 16;

/// Registration form
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login form
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registers and verifies users
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn RecordStore<User>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator").finish_non_exhaustive()
    }
}

impl Authenticator {
    /// Authenticator over the users collection
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore<User>>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Create a user; username and email must both be unused
    pub async fn register(&self, form: Registration) -> Result<PublicUser, CasebookError> {
        let username = form.username.trim();
        let email = form.email.trim();
        if username.is_empty() || email.is_empty() || form.password.is_empty() {
            return Err(CasebookError::validation(
                "username, email and password are required",
            ));
        }

        let mut users = self.store.load().await;
        if users.iter().any(|u| u.email == email) {
            return Err(CasebookError::AlreadyExists("email".into()));
        }
        if users.iter().any(|u| u.username == username) {
            return Err(CasebookError::AlreadyExists(format!("username {username}")));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password(&form.password),
            created_at: self.clock.now(),
        };
        let public = PublicUser::from(&user);
        users.push(user);
        self.store.save(&users).await?;

        tracing::info!(user = %public.id, "user registered");
        Ok(public)
    }

    /// Check credentials
    pub async fn verify(&self, credentials: &Credentials) -> Result<PublicUser, CasebookError> {
        let email = credentials.email.trim();
        let users = self.store.load().await;
        match users.iter().find(|u| u.email == email) {
            Some(user) if verify_password(&credentials.password, &user.password_hash) => {
                tracing::debug!(user = %user.id, "login accepted");
                Ok(PublicUser::from(user))
            }
            _ => {
                tracing::debug!("login rejected");
                Err(CasebookError::Unauthorized)
            }
        }
    }

    /// Public profile by email
    pub async fn profile(&self, email: &str) -> Result<PublicUser, CasebookError> {
        self.store
            .load()
            .await
            .iter()
            .find(|u| u.email == email)
            .map(PublicUser::from)
            .ok_or_else(|| CasebookError::not_found("user"))
    }
}

/// Salted digest for storage
#[must_use]
pub fn hash_password(password: &str) -> String {
    let salt: [u8; SALT_LEN] = rand::random();
    format!("{}${}", hex::encode(salt), hex::encode(digest(&salt, password)))
}

/// Whether `password` matches a stored digest
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(digest_hex)) else {
        return false;
    };
    digest(&salt, password).ct_eq(&expected).into()
}

fn digest(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}
