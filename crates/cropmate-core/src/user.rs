//! User account domain model.

use serde::{Deserialize, Serialize};

/// The profile the backend associates with an authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl UserAccount {
    /// Uppercase initial used by surfaces that render an avatar badge.
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

/// A successful login or registration: the issued token plus the account
/// the backend resolved for it.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub token: String,
    pub account: UserAccount,
}
