//! # Kala Web
//!
//! Server-rendered point of sale and commission tracking for the salon.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Kala Web Routes                                 │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  Counter       │  │  Reports       │  │  Admin                     ││
//! │  │                │  │                │  │                            ││
//! │  │ • /venta/      │  │ • /            │  │ • /admin/catalogo          ││
//! │  │   servicio     │  │ • /mis-        │  │ • /admin/usuarios          ││
//! │  │ • /venta/      │  │   comisiones   │  │ • /admin/seed              ││
//! │  │   producto     │  │                │  │                            ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Infrastructure                               │  │
//! │  │                                                                   │  │
//! │  │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────────────┐│  │
//! │  │  │  SQLite      │  │  kala-core   │  │    Cookie sessions       ││  │
//! │  │  │  (kala-db)   │  │  pricing     │  │    JWT + flash           ││  │
//! │  │  └──────────────┘  └──────────────┘  └──────────────────────────┘│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `DATABASE_URL` - sqlx SQLite URL (default: sqlite://kala.db)
//! - `SECRET_KEY` - Signs session and flash cookies
//! - `ADMIN_EMAIL` / `ADMIN_PASSWORD` - Account created by `/init`
//! - `HOST` / `PORT` - Listen address (default: 0.0.0.0:5000)
//! - `SESSION_LIFETIME_SECS` - Login lifetime (default: 604800)

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod error;
pub mod forms;
pub mod routes;
pub mod state;
pub mod views;

// Re-exports
pub use config::WebConfig;
pub use error::AppError;
pub use state::AppState;

/// Builds the router with every route and request tracing.
pub fn app(state: AppState) -> Router {
    routes::routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
