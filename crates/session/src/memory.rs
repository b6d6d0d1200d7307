// crates/session/src/memory.rs
//! In-process identity provider

use crate::error::{AuthError, AuthResult};
use crate::provider::{IdentityProvider, Principal};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    principal: Principal,
    digest: Vec<u8>,
}

/// Identity provider holding accounts in memory
///
/// Passwords are kept as salted SHA-256 digests. The third-party flow signs
/// in whichever account was configured with [`with_provider_account`], or
/// reports the popup as dismissed.
///
/// [`with_provider_account`]: MemoryIdentityProvider::with_provider_account
#[derive(Default)]
pub struct MemoryIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
    provider_account: Mutex<Option<Principal>>,
    offline: AtomicBool,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account the third-party flow resolves to
    pub fn with_provider_account(self, principal: Principal) -> Self {
        *self
            .provider_account
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(principal);
        self
    }

    /// Makes every call fail with a network error until turned back off
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of registered accounts
    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn ensure_online(&self) -> AuthResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(AuthError::Network("identity service unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

fn digest(uid: &str, password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(uid.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Principal> {
        self.ensure_online()?;
        let accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        let account = accounts
            .get(&email.trim().to_lowercase())
            .ok_or(AuthError::InvalidCredentials)?;

        if account.digest != digest(&account.principal.uid, password) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(account.principal.clone())
    }

    async fn register(&self, email: &str, password: &str) -> AuthResult<Principal> {
        self.ensure_online()?;
        let email = email.trim();
        if !looks_like_email(email) {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword { min: MIN_PASSWORD_LEN });
        }

        let key = email.to_lowercase();
        let mut accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        if accounts.contains_key(&key) {
            return Err(AuthError::EmailInUse(email.to_string()));
        }

        let principal = Principal::new(uuid::Uuid::new_v4().simple().to_string(), email);
        let digest = digest(&principal.uid, password);
        accounts.insert(
            key,
            Account {
                principal: principal.clone(),
                digest,
            },
        );
        Ok(principal)
    }

    async fn sign_in_with_provider(&self) -> AuthResult<Principal> {
        self.ensure_online()?;
        self.provider_account
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(AuthError::ProviderCancelled)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        self.ensure_online()
    }
}
