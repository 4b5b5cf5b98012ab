//! Typed wrappers over the backend REST surface.
//!
//! One module per resource root: `/api/auth`, `/api/inventory`,
//! `/api/grants`, `/api/bookings` and the two profile roots `/api/users`
//! and `/api/admin`. Every wrapper validates its input client-side before
//! any network traffic, attaches the bearer token for protected calls and
//! surfaces backend `{message}` bodies verbatim through
//! [`Error::user_message`](crate::error::Error::user_message).

pub mod auth;
pub mod bookings;
pub mod grants;
pub mod inventory;
pub mod profile;

use crate::error::Error;

/// Reject blank required input with the given message.
pub(crate) fn require(value: &str, message: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::validation(message));
    }
    Ok(())
}

/// Shared password policy for signup and password changes.
pub(crate) fn check_password_rules(password: &str, confirmation: &str) -> Result<(), Error> {
    if password.len() < 6 {
        return Err(Error::validation(
            "Password must be at least 6 characters long.",
        ));
    }
    if password != confirmation {
        return Err(Error::validation("Passwords do not match."));
    }
    Ok(())
}
