// crates/session/src/error.rs
//! Error types for authentication

use thiserror::Error;

/// Result type for session operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors raised while establishing or clearing a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email or password left blank
    #[error("Email and password required")]
    MissingCredentials,

    /// Unknown account or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Email is not shaped like an address
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Password rejected by the provider's strength rule
    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },

    /// Registration for an address that already has an account
    #[error("Email already in use: {0}")]
    EmailInUse(String),

    /// Third-party sign-in flow was dismissed
    #[error("Sign-in was cancelled")]
    ProviderCancelled,

    /// Identity service could not be reached
    #[error("Network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(AuthError::MissingCredentials.to_string(), "Email and password required");
        assert!(AuthError::WeakPassword { min: 6 }.to_string().contains('6'));
        assert!(AuthError::EmailInUse("a@b.c".to_string()).to_string().contains("a@b.c"));
    }
}
