//! Signed-in user identity.

use serde::{Deserialize, Serialize};

/// What a user may do in the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Registers exams and medications, advances exam status
    Admin,
    /// Sees only their own exams
    #[default]
    Common,
}

/// The user the current session belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
}

impl CurrentUser {
    pub fn new(name: impl Into<String>, role: UserRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Common users only see their own records unless they opt out.
    pub fn scoped_by_default(&self) -> bool {
        !self.is_admin()
    }
}
