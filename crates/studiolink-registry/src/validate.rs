//! Lazy validation of presented secrets.
//!
//! Nothing here is cached or precomputed: the reason is derived from the
//! key's flags and the clock at call time, every time.

use serde::{Deserialize, Serialize};

use studiolink_core::StudioKeyId;

use crate::error::RegistryError;
use crate::key::StudioKey;

/// Why a presented secret is or is not usable for a fresh redemption.
///
/// Precedence when several apply: revoked beats expired beats redeemed. A
/// revoked key reports revoked even if it also expired, so the studio's
/// kill switch is what the creator hears about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationReason {
    /// The key exists and can be redeemed.
    Ok,
    /// No key matches the presented secret.
    NotFound,
    /// The studio revoked the key.
    Revoked,
    /// The key's expiration is in the past.
    Expired,
    /// A creator already redeemed the key.
    AlreadyRedeemed,
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::NotFound => write!(f, "not_found"),
            Self::Revoked => write!(f, "revoked"),
            Self::Expired => write!(f, "expired"),
            Self::AlreadyRedeemed => write!(f, "already_redeemed"),
        }
    }
}

impl ValidationReason {
    /// Map a non-usable reason to the registry error a redemption reports.
    pub(crate) fn into_error(self, key_id: Option<StudioKeyId>) -> RegistryError {
        match (self, key_id) {
            (Self::Revoked, Some(id)) => RegistryError::Revoked(id),
            (Self::Expired, Some(id)) => RegistryError::Expired(id),
            (Self::AlreadyRedeemed, Some(id)) => RegistryError::AlreadyRedeemed(id),
            _ => RegistryError::NotFound("studio key secret".to_string()),
        }
    }
}

/// The result of validating a presented secret.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// Why the secret is or is not usable.
    pub reason: ValidationReason,
    /// The matching key, when one exists (whatever its state).
    pub key: Option<StudioKey>,
}

impl ValidationOutcome {
    /// Whether the secret can be redeemed right now.
    #[must_use]
    pub fn usable(&self) -> bool {
        self.reason == ValidationReason::Ok
    }

    pub(crate) fn not_found() -> Self {
        Self {
            reason: ValidationReason::NotFound,
            key: None,
        }
    }

    /// Derive the outcome for a key found in the store.
    pub(crate) fn of_key(key: StudioKey) -> Self {
        let reason = if key.revoked {
            ValidationReason::Revoked
        } else if key.is_expired() {
            ValidationReason::Expired
        } else if key.is_redeemed() {
            ValidationReason::AlreadyRedeemed
        } else {
            ValidationReason::Ok
        };
        Self {
            reason,
            key: Some(key),
        }
    }

    /// Consume the outcome, yielding the key when usable and the matching
    /// redemption error otherwise.
    pub(crate) fn into_usable_key(self) -> Result<StudioKey, RegistryError> {
        match (self.reason, self.key) {
            (ValidationReason::Ok, Some(key)) => Ok(key),
            (reason, key) => Err(reason.into_error(key.map(|k| k.id))),
        }
    }
}
