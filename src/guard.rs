//! Route guard deciding whether a view may render for the current session.
//!
//! The guard is advisory. The backend re-validates the bearer token and role
//! on every request; this check only exists so restricted views are never
//! shown to the wrong account.

use crate::session::{Role, Session};

/// What the caller should do with a guarded view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Hydration has not finished; render a neutral loading state and do not
    /// navigate anywhere yet
    Pending,
    /// No usable session; navigate to the login view
    RedirectToLogin,
    /// Session present but the wrong role; notify and navigate to that
    /// role's own landing view
    AccessDenied {
        /// Role of the rejected session, for picking the landing view
        home: Role,
    },
    /// Render the protected content
    Allow,
}

impl GuardOutcome {
    /// Whether the protected content may render
    pub fn allows(&self) -> bool {
        matches!(self, GuardOutcome::Allow)
    }

    /// View to navigate to, `None` when no navigation is called for
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            GuardOutcome::Pending | GuardOutcome::Allow => None,
            GuardOutcome::RedirectToLogin => Some("/login"),
            GuardOutcome::AccessDenied { home } => Some(home.home_view()),
        }
    }
}

/// Evaluate the guard decision table.
///
/// `required` of `None` means the view only needs a session, any role.
pub fn evaluate(
    is_loading: bool,
    session: Option<&Session>,
    required: Option<Role>,
) -> GuardOutcome {
    if is_loading {
        return GuardOutcome::Pending;
    }
    let session = match session {
        Some(session) if !session.token.is_empty() => session,
        _ => return GuardOutcome::RedirectToLogin,
    };
    match required {
        Some(role) if session.role != role => GuardOutcome::AccessDenied { home: session.role },
        _ => GuardOutcome::Allow,
    }
}
