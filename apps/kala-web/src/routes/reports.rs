//! `GET /mis-comisiones`: commission on the summed cash base.

use axum::{extract::State, response::Html, routing::get, Router};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::CurrentUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::views;

pub fn routes() -> Router<AppState> {
    Router::new().route("/mis-comisiones", get(my_commissions))
}

async fn my_commissions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let report = state.db.sales().commission_report(&user.sale_scope()).await?;

    let (jar, flashes) = state.sessions.take_flashes(jar);
    Ok((jar, Html(views::commissions_page(&user, &flashes, &report))))
}
