//! `GET /`: the ten newest sales of each kind plus headline totals.
//!
//! Admins see the whole salon, employees only what they recorded.

use axum::{extract::State, response::Html, routing::get, Router};
use axum_extra::extract::cookie::CookieJar;

use kala_core::RECENT_SALES_LIMIT;

use crate::auth::CurrentUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::views;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let scope = user.sale_scope();
    let sales = state.db.sales();

    let services = sales.recent_service_sales(&scope, RECENT_SALES_LIMIT).await?;
    let products = sales.recent_product_sales(&scope, RECENT_SALES_LIMIT).await?;
    let totals = sales.dashboard_totals(&scope).await?;

    let (jar, flashes) = state.sessions.take_flashes(jar);
    let page = views::dashboard_page(&user, &flashes, &services, &products, &totals);
    Ok((jar, Html(page)))
}
