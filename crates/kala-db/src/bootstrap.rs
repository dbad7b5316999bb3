//! # Admin Bootstrap
//!
//! Creates the first admin account on a fresh install.
//!
//! ```text
//! run migrations ──► users empty? ──yes──► insert "Admin" (role admin)
//!                         │
//!                         no
//!                         ▼
//!                 AlreadyInitialized (nothing written)
//! ```
//!
//! Used by `GET /init` and by the `kala-init` binary.

use tracing::{info, warn};

use crate::error::DbResult;
use crate::password::hash_password;
use crate::pool::Database;
use crate::repository::user::NewUser;
use kala_core::validation::{validate_email, validate_password};
use kala_core::Role;

/// Display name of the bootstrap account.
pub const BOOTSTRAP_ADMIN_NAME: &str = "Admin";

/// What a bootstrap run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// A fresh admin account was created.
    Created { email: String },
    /// Users already existed. Nothing was written.
    AlreadyInitialized,
}

/// Runs migrations, then creates an admin only if no user exists yet.
///
/// ## Errors
/// * `DbError::PasswordHash` - Hashing failed
/// * `DbError::Validation` - Email or password rejected
pub async fn bootstrap_admin(
    db: &Database,
    email: &str,
    password: &str,
) -> DbResult<BootstrapOutcome> {
    db.run_migrations().await?;

    let users = db.users().count().await?;
    if users > 0 {
        warn!(users, "Bootstrap skipped, users already exist");
        return Ok(BootstrapOutcome::AlreadyInitialized);
    }

    let email = validate_email(email)?;
    validate_password(password)?;

    let admin = db
        .users()
        .insert(&NewUser {
            name: BOOTSTRAP_ADMIN_NAME.to_string(),
            email,
            password_hash: hash_password(password)?,
            role: Role::Admin,
        })
        .await?;

    info!(id = %admin.id, email = %admin.email, "Bootstrap admin created");

    Ok(BootstrapOutcome::Created { email: admin.email })
}
