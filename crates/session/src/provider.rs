// crates/session/src/provider.rs
//! Identity provider contract

use crate::error::AuthResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    /// Stable account identifier, stamped onto owned records
    pub uid: String,
    /// Display email
    pub email: String,
}

impl Principal {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.email, self.uid)
    }
}

/// External identity service
///
/// Implementations own the actual protocol (password checks, OAuth popups,
/// token refresh); the gate only consumes the resulting principal.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Signs in with email and password
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Principal>;

    /// Creates an account and signs it in
    async fn register(&self, email: &str, password: &str) -> AuthResult<Principal>;

    /// Runs the third-party provider flow
    async fn sign_in_with_provider(&self) -> AuthResult<Principal>;

    /// Ends the provider-side session
    async fn sign_out(&self) -> AuthResult<()>;
}
