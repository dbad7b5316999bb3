//! HTTP routes.
//!
//! | Route             | Access | Module      |
//! |-------------------|--------|-------------|
//! | `/`               | login  | dashboard   |
//! | `/login` `/logout`| public | session     |
//! | `/venta/*`        | login  | sales       |
//! | `/mis-comisiones` | login  | reports     |
//! | `/admin/*`        | admin  | admin       |
//! | `/init`           | public | setup       |

use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod dashboard;
pub mod reports;
pub mod sales;
pub mod session;
pub mod setup;

/// Every route, still waiting for its state.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(dashboard::routes())
        .merge(session::routes())
        .merge(sales::routes())
        .merge(reports::routes())
        .merge(admin::routes())
        .merge(setup::routes())
}
