// crates/store/src/policy.rs
//! Per-backend failure policy

use serde::{Deserialize, Serialize};

/// Which kind of backend the store was built over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendVariant {
    /// Open resource; no session required
    Open,
    /// Per-user store; every mutation needs a signed-in principal
    Authenticated,
}

/// What `add` does with the local record when `create` fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreateFailure {
    /// Insert the locally built record anyway
    KeepLocal,
    /// Insert nothing
    Discard,
}

/// What `edit` does with the optimistic merge when `update` fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateFailure {
    /// Leave local state ahead of the backend until the next load
    KeepOptimistic,
    /// Restore the record as it was before the edit
    Rollback,
}

/// Failure policy table
///
/// `remove` has no entry: a failed delete never brings the record back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailurePolicy {
    pub on_create: CreateFailure,
    pub on_update: UpdateFailure,
}

impl FailurePolicy {
    /// Default policy for a backend variant
    pub fn for_variant(variant: BackendVariant) -> Self {
        match variant {
            BackendVariant::Open => Self {
                on_create: CreateFailure::KeepLocal,
                on_update: UpdateFailure::KeepOptimistic,
            },
            BackendVariant::Authenticated => Self {
                on_create: CreateFailure::Discard,
                on_update: UpdateFailure::KeepOptimistic,
            },
        }
    }

    /// Same policy with failed edits rolled back
    pub fn with_rollback(mut self, rollback: bool) -> Self {
        self.on_update = if rollback {
            UpdateFailure::Rollback
        } else {
            UpdateFailure::KeepOptimistic
        };
        self
    }
}
