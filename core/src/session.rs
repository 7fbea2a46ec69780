//! Client-side admin session gate
//!
//! Two locally persisted entries (an authenticated flag and a login
//! timestamp) gate access to the panel, with a 24-hour expiry computed
//! from the stored issuance time.
//!
//! This is a convenience check only, NOT a security boundary: nothing is
//! validated against the server on load, and sign-out performs no
//! server-side invalidation. A deployment that needs real authorization
//! must verify a credential server-side before honoring any action.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum session age before the gate forces a fresh sign-in.
pub const SESSION_MAX_AGE_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("not signed in")]
    NotSignedIn,
    #[error("session expired")]
    Expired,
}

/// Locally stored session flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    pub authenticated: bool,
    pub login_time: DateTime<Utc>,
}

impl AdminSession {
    /// Stamp a fresh session at `now`.
    pub fn sign_in(now: DateTime<Utc>) -> Self {
        Self {
            authenticated: true,
            login_time: now,
        }
    }

    /// Gate check: the stored flag must be set and the login must be at
    /// most 24 hours old. An expired session must be cleared by the
    /// caller (the stored entries are removed, not just ignored).
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if !self.authenticated {
            return Err(SessionError::NotSignedIn);
        }
        if now.signed_duration_since(self.login_time) > Duration::hours(SESSION_MAX_AGE_HOURS) {
            return Err(SessionError::Expired);
        }
        Ok(())
    }
}
