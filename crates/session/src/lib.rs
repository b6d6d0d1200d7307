// crates/session/src/lib.rs
//! Session gating for ReadLog
//!
//! [`SessionGate`] tracks the signed-in [`Principal`] and exposes the
//! login/register/logout surface. The identity protocol itself lives behind
//! the [`IdentityProvider`] trait.
//!
//! # Example
//!
//! ```rust
//! use readlog_session::{MemoryIdentityProvider, SessionGate};
//! use std::sync::Arc;
//!
//! # tokio_test_block_on(async {
//! let gate = SessionGate::new(Arc::new(MemoryIdentityProvider::new()));
//! gate.register("reader@example.com", "secret1").await.unwrap();
//! assert!(gate.is_authenticated());
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod error;
mod gate;
mod memory;
mod provider;

pub use error::{AuthError, AuthResult};
pub use gate::SessionGate;
pub use memory::{MemoryIdentityProvider, MIN_PASSWORD_LEN};
pub use provider::{IdentityProvider, Principal};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_all_exports_accessible() {
        let provider: Arc<dyn IdentityProvider> = Arc::new(MemoryIdentityProvider::new());
        let _: SessionGate = SessionGate::new(provider);
        let _: Principal = Principal::new("uid", "a@b.co");
    }
}
