//! Identity and authorization adapters.
//!
//! `SimpleIdentityProvider` verifies Argon2 password hashes for a fixed set
//! of configured accounts and hands out opaque session tokens held in an
//! in-process table. `AllowListPolicy` is the shipped `AccessPolicy`: a flat
//! email membership test, kept behind the trait so the rule source can move
//! without touching view code.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use domains::error::{AppError, Result};
use domains::models::Session;
use domains::ports::{AccessPolicy, IdentityProvider};

/// One configured admin account. The hash is a PHC-format Argon2 string.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub email: String,
    pub password_hash: String,
}

pub struct SimpleIdentityProvider {
    accounts: Vec<AdminAccount>,
    sessions: DashMap<String, Session>,
}

impl SimpleIdentityProvider {
    pub fn new(accounts: Vec<AdminAccount>) -> Self {
        Self {
            accounts,
            sessions: DashMap::new(),
        }
    }

    /// Identity id derived from the email so profile rows keyed by it
    /// survive restarts.
    fn identity_id(email: &str) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, email.to_ascii_lowercase().as_bytes())
    }
}

#[async_trait]
impl IdentityProvider for SimpleIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email));
        let verified = account.is_some_and(|account| {
            PasswordHash::new(&account.password_hash)
                .map(|hash| {
                    Argon2::default()
                        .verify_password(password.as_bytes(), &hash)
                        .is_ok()
                })
                .unwrap_or(false)
        });
        if !verified {
            tracing::debug!(email = %email, "sign-in rejected");
            return Err(AppError::Unauthorized(
                "Invalid login credentials".to_string(),
            ));
        }

        let account = account.expect("verified implies account present");
        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            user_id: Self::identity_id(&account.email),
            email: account.email.clone(),
        };
        self.sessions.insert(session.token.clone(), session.clone());
        Ok(session)
    }

    async fn session(&self, token: &str) -> Result<Option<Session>> {
        Ok(self.sessions.get(token).map(|entry| entry.value().clone()))
    }

    async fn sign_out(&self, token: &str) -> Result<()> {
        self.sessions.remove(token);
        Ok(())
    }
}

/// Fixed set of authorized admin emails, case-insensitive.
pub struct AllowListPolicy {
    emails: Vec<String>,
}

impl AllowListPolicy {
    pub fn new(emails: Vec<String>) -> Self {
        Self { emails }
    }
}

impl AccessPolicy for AllowListPolicy {
    fn is_authorized(&self, email: &str) -> bool {
        self.emails.iter().any(|e| e.eq_ignore_ascii_case(email))
    }
}

/// Hashes a password into PHC format; used by deploy tooling and tests to
/// produce the `password_hash` configuration value.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AppError::Internal(err.to_string()))
}
