//! Gate in front of the admin management routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use services::gate::{evaluate, AdminAccess};

use crate::flash::render;
use crate::session;
use crate::state::AppState;
use crate::templates::DeniedTemplate;

/// Resolves the session cookie and applies the access policy. Allowed
/// sessions are inserted into request extensions for handlers that need
/// the signed-in identity.
pub async fn admin_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let access = evaluate(session::current(&state, request.headers()).await, state.policy.as_ref());
    match access {
        AdminAccess::Unauthenticated => Redirect::to("/admin/login").into_response(),
        AdminAccess::Denied { email } => {
            // Rendered in place rather than redirected: the user *is* logged
            // in, so bouncing to the login page would loop.
            tracing::warn!(%email, "admin access denied");
            render(&DeniedTemplate { email }, false)
        }
        AdminAccess::Allowed(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
    }
}
