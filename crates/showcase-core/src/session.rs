//! User session domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::SessionStartError;

/// Attributes attached to a session for targeting (e.g. `userType`, `platform`).
pub type UserAttributes = HashMap<String, String>;

/// An active SDK user session.
///
/// A `Session` only exists while it is active: the controller holds an
/// `Option<Session>`, so the user id and the active flag are always cleared
/// together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque user identifier, never empty
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<UserAttributes>,
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session for `user_id`, rejecting empty identifiers.
    pub fn new(
        user_id: impl Into<String>,
        attributes: Option<UserAttributes>,
    ) -> Result<Self, SessionStartError> {
        let user_id = user_id.into();
        validate_user_id(&user_id)?;
        Ok(Self {
            user_id,
            attributes,
            started_at: Utc::now(),
        })
    }
}

/// Rejects blank user identifiers before they reach the SDK.
pub fn validate_user_id(user_id: &str) -> Result<(), SessionStartError> {
    if user_id.trim().is_empty() {
        return Err(SessionStartError::validation("user id must not be empty"));
    }
    Ok(())
}
