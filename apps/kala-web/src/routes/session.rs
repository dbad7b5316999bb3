//! Login and logout.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, warn};

use kala_db::verify_password;

use crate::auth::{CurrentUser, Flash};
use crate::error::AppResult;
use crate::forms::LoginForm;
use crate::state::AppState;
use crate::views;

/// Same text for unknown email and wrong password.
pub const LOGIN_FAILED: &str = "Usuario o contraseña incorrectos";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}

async fn login_form(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flashes) = state.sessions.take_flashes(jar);
    (jar, Html(views::login_page(&flashes)))
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let email = form.email.trim();
    let user = state.db.users().get_by_email(email).await?;

    match user {
        Some(user) if verify_password(&form.password, &user.password_hash) => {
            info!(user_id = %user.id, role = user.role.as_str(), "Login");
            let jar = state.sessions.login(jar, &user.id)?;
            Ok((jar, Redirect::to("/")).into_response())
        }
        _ => {
            warn!(email, "Failed login");
            let (jar, mut flashes) = state.sessions.take_flashes(jar);
            flashes.push(Flash::danger(LOGIN_FAILED));
            Ok((jar, Html(views::login_page(&flashes))).into_response())
        }
    }
}

async fn logout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    info!(user_id = %user.id, "Logout");
    (state.sessions.logout(jar), Redirect::to("/login"))
}
