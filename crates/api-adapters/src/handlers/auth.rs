//! Login and logout.

use axum::extract::{Form, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use domains::error::AppError;
use services::validation;

use crate::flash::{self, Flash};
use crate::session;
use crate::state::AppState;
use crate::templates::LoginTemplate;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    // Already signed in and authorized: straight to the dashboard.
    if let Some(active) = session::current(&state, &headers).await {
        if state.policy.is_authorized(&active.email) {
            return Redirect::to("/admin").into_response();
        }
    }
    let pending = flash::pending(&headers);
    let template = LoginTemplate {
        flash: pending.clone().map(Into::into),
        error: String::new(),
        email: String::new(),
    };
    flash::render(&template, pending.is_some())
}

pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let email = form.email.trim().to_string();

    if let Err(errors) = validation::validate_login(&email, &form.password) {
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(". ");
        return rerender(message, email);
    }

    // Allow-list check comes before the password so an unlisted account
    // learns it is unwelcome, not whether its password was right.
    if !state.policy.is_authorized(&email) {
        return rerender("You do not have admin privileges".to_string(), email);
    }

    match state.identity.sign_in(&email, &form.password).await {
        Ok(active) => {
            let mut response =
                flash::redirect_with("/admin", Flash::success("Logged in successfully"));
            response
                .headers_mut()
                .append(SET_COOKIE, session::set_header(&active.token));
            response
        }
        Err(AppError::Unauthorized(message)) => rerender(message, email),
        Err(err) => {
            tracing::error!(error = %err, "sign-in failed");
            rerender("Something went wrong. Please try again.".to_string(), email)
        }
    }
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session::token(&headers) {
        if let Err(err) = state.identity.sign_out(&token).await {
            tracing::warn!(error = %err, "sign-out failed, clearing cookie anyway");
        }
    }
    let mut response =
        flash::redirect_with("/admin/login", Flash::success("Logged out successfully"));
    response
        .headers_mut()
        .append(SET_COOKIE, session::clear_header());
    response
}

fn rerender(error: String, email: String) -> Response {
    flash::render_with_status(
        StatusCode::UNPROCESSABLE_ENTITY,
        &LoginTemplate {
            flash: None,
            error,
            email,
        },
        false,
    )
}
