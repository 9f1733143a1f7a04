//! Admin access evaluation.
//!
//! Three terminal outcomes of a session check: no identity, identity present
//! but not authorized, or allowed through. Denied identities get a rendered
//! panel rather than a redirect — bouncing them to the login page would loop,
//! since they *are* logged in.

use domains::models::Session;
use domains::ports::AccessPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAccess {
    /// No active session: send to the login page.
    Unauthenticated,
    /// Authenticated but not authorized: render the access-denied panel
    /// showing the offending email, with a sign-out action.
    Denied { email: String },
    /// Authenticated and authorized.
    Allowed(Session),
}

pub fn evaluate(session: Option<Session>, policy: &dyn AccessPolicy) -> AdminAccess {
    match session {
        None => AdminAccess::Unauthenticated,
        Some(session) if policy.is_authorized(&session.email) => AdminAccess::Allowed(session),
        Some(session) => AdminAccess::Denied {
            email: session.email,
        },
    }
}
