//! Custom actions for the Session actor.

use crate::model::UserProfile;
use std::fmt;

/// Sign-in state changes.
///
/// `Debug` never prints passwords, since actions are logged at debug level.
#[derive(Clone)]
pub enum SessionAction {
    Login {
        email: String,
        password: String,
    },
    LoginWithGoogle,
    Register {
        name: String,
        email: String,
        password: String,
    },
    Logout,
}

impl fmt::Debug for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionAction::Login { email, .. } => f
                .debug_struct("Login")
                .field("email", email)
                .field("password", &"[REDACTED]")
                .finish(),
            SessionAction::LoginWithGoogle => f.write_str("LoginWithGoogle"),
            SessionAction::Register { name, email, .. } => f
                .debug_struct("Register")
                .field("name", name)
                .field("email", email)
                .field("password", &"[REDACTED]")
                .finish(),
            SessionAction::Logout => f.write_str("Logout"),
        }
    }
}

/// Results from SessionActions.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionActionResult {
    /// Login, LoginWithGoogle and Register answer with the new profile.
    SignedIn(UserProfile),
    /// Logout.
    SignedOut,
}
