// crates/session/src/gate.rs
//! Current-principal tracking

use crate::error::{AuthError, AuthResult};
use crate::provider::{IdentityProvider, Principal};
use std::sync::Arc;
use tokio::sync::watch;

struct Inner {
    provider: Arc<dyn IdentityProvider>,
    principal: watch::Sender<Option<Principal>>,
}

/// Tracks who is signed in
///
/// Cheap to clone; every clone observes the same session. Changes are
/// published on a watch channel so long-lived consumers can follow them.
#[derive(Clone)]
pub struct SessionGate {
    inner: Arc<Inner>,
}

impl SessionGate {
    /// Creates an anonymous gate over `provider`
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (principal, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner { provider, principal }),
        }
    }

    /// The signed-in principal, if any
    pub fn current(&self) -> Option<Principal> {
        self.inner.principal.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.principal.borrow().is_some()
    }

    /// Receiver that yields every session change for as long as it is held
    pub fn subscribe(&self) -> watch::Receiver<Option<Principal>> {
        self.inner.principal.subscribe()
    }

    /// Signs in with email and password
    pub async fn login_with_password(&self, email: &str, password: &str) -> AuthResult<Principal> {
        require_credentials(email, password)?;
        let principal = self
            .inner
            .provider
            .sign_in_with_password(email.trim(), password)
            .await?;
        self.establish(principal)
    }

    /// Signs in through the third-party provider flow
    pub async fn login_with_provider(&self) -> AuthResult<Principal> {
        let principal = self.inner.provider.sign_in_with_provider().await?;
        self.establish(principal)
    }

    /// Registers a new account and signs it in
    pub async fn register(&self, email: &str, password: &str) -> AuthResult<Principal> {
        require_credentials(email, password)?;
        let principal = self.inner.provider.register(email.trim(), password).await?;
        self.establish(principal)
    }

    /// Signs out; on failure the current principal is kept
    pub async fn logout(&self) -> AuthResult<()> {
        if let Err(e) = self.inner.provider.sign_out().await {
            log::warn!("Sign-out failed: {}", e);
            return Err(e);
        }
        if let Some(previous) = self.inner.principal.send_replace(None) {
            log::info!("Signed out {}", previous.email);
        }
        Ok(())
    }

    fn establish(&self, principal: Principal) -> AuthResult<Principal> {
        log::info!("Signed in as {}", principal.email);
        self.inner.principal.send_replace(Some(principal.clone()));
        Ok(principal)
    }
}

fn require_credentials(email: &str, password: &str) -> AuthResult<()> {
    if email.trim().is_empty() || password.is_empty() {
        Err(AuthError::MissingCredentials)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryIdentityProvider;

    fn gate() -> SessionGate {
        SessionGate::new(Arc::new(MemoryIdentityProvider::new()))
    }

    #[test]
    fn test_starts_anonymous() {
        let gate = gate();
        assert!(gate.current().is_none());
        assert!(!gate.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_establishes_session() {
        let gate = gate();
        let principal = gate.register("reader@example.com", "secret1").await.unwrap();

        assert_eq!(gate.current(), Some(principal));
        assert!(gate.is_authenticated());
    }

    #[tokio::test]
    async fn test_missing_credentials_never_reach_provider() {
        let gate = gate();
        assert_eq!(
            gate.login_with_password("", "pw").await.unwrap_err(),
            AuthError::MissingCredentials
        );
        assert_eq!(
            gate.register("a@b.co", "").await.unwrap_err(),
            AuthError::MissingCredentials
        );
        assert!(!gate.is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_anonymous() {
        let gate = gate();
        let err = gate.login_with_password("a@b.co", "secret1").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(gate.current().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_principal() {
        let gate = gate();
        gate.register("reader@example.com", "secret1").await.unwrap();
        gate.logout().await.unwrap();
        assert!(gate.current().is_none());
    }

    #[tokio::test]
    async fn test_failed_logout_keeps_principal() {
        let provider = Arc::new(MemoryIdentityProvider::new());
        let gate = SessionGate::new(provider.clone());
        gate.register("reader@example.com", "secret1").await.unwrap();

        provider.set_offline(true);
        assert!(gate.logout().await.is_err());
        assert!(gate.is_authenticated());
    }

    #[tokio::test]
    async fn test_clones_share_session() {
        let gate = gate();
        let other = gate.clone();
        gate.register("reader@example.com", "secret1").await.unwrap();
        assert!(other.is_authenticated());
    }
}
