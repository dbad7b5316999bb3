//! `GET /init`: one-time bootstrap, no login required.
//!
//! Runs migrations and creates the admin from `ADMIN_EMAIL` /
//! `ADMIN_PASSWORD` only while the users table is empty. The password is
//! never echoed back.

use axum::{extract::State, routing::get, Router};

use kala_db::{bootstrap_admin, BootstrapOutcome};

use crate::error::AppResult;
use crate::state::AppState;

pub const ALREADY_INITIALIZED: &str = "Ya hay usuarios creados. Nada que hacer.";

pub fn routes() -> Router<AppState> {
    Router::new().route("/init", get(init))
}

async fn init(State(state): State<AppState>) -> AppResult<String> {
    let outcome = bootstrap_admin(
        &state.db,
        &state.config.admin_email,
        &state.config.admin_password,
    )
    .await?;

    Ok(match outcome {
        BootstrapOutcome::Created { email } => format!("Admin creado: {email}"),
        BootstrapOutcome::AlreadyInitialized => ALREADY_INITIALIZED.to_string(),
    })
}
