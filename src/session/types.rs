use serde::{Deserialize, Serialize};
use std::fmt;

/// Access level attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Regular borrower account
    User,
    /// Staff account with inventory and approval rights
    Admin,
}

impl Role {
    /// The role's wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
        }
    }

    /// Landing view for an account of this role
    pub fn home_view(&self) -> &'static str {
        match self {
            Role::User => "/user/dashboard",
            Role::Admin => "/admin/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated session as issued by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token sent on every authenticated request
    pub token: String,
    /// Account identifier
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Access level
    pub role: Role,
}

impl Session {
    pub fn new(
        token: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// Whether every field carries a usable value
    pub fn is_complete(&self) -> bool {
        !self.token.is_empty()
            && !self.user_id.is_empty()
            && !self.name.is_empty()
            && !self.email.is_empty()
    }
}

/// Persisted session record as read back from storage.
///
/// Every field is optional so that a truncated or hand-edited record still
/// parses; [`StoredSession::into_session`] then decides whether the record
/// amounts to a usable session.
#[derive(Debug, Deserialize)]
pub(crate) struct StoredSession {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl StoredSession {
    /// Promote the record to a [`Session`] if all five fields are present
    /// and non-empty, otherwise discard it.
    pub(crate) fn into_session(self) -> Option<Session> {
        let session = Session {
            token: self.token?,
            user_id: self.user_id?,
            name: self.name?,
            email: self.email?,
            role: self.role?,
        };
        session.is_complete().then_some(session)
    }
}
