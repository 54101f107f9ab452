//! User account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{UserId, UserRole, UserStatus};

/// A back-office user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (unique within the loaded collection).
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Role within the system.
    pub role: UserRole,
    /// Country of residence.
    pub country: String,
    /// Activation state.
    pub status: UserStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns a copy of this user with the status flipped.
    ///
    /// All other fields are unchanged; two applications return the
    /// original record.
    #[inline]
    #[must_use]
    pub fn with_toggled_status(&self) -> Self {
        let mut user = self.clone();
        user.status = user.status.toggled();
        user
    }
}
