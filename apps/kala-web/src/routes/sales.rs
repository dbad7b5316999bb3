//! Recording sales at the counter.
//!
//! Any logged-in user may record a sale. It is always owned by whoever is
//! logged in; prices come from the catalog, never from the form.

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use crate::auth::{CurrentUser, Flash};
use crate::error::AppResult;
use crate::forms::{ProductSaleForm, ServiceSaleForm};
use crate::state::AppState;
use crate::views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/venta/servicio", get(service_sale_form).post(record_service_sale))
        .route("/venta/producto", get(product_sale_form).post(record_product_sale))
}

async fn service_sale_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let services = state.db.catalog().list_services().await?;
    let (jar, flashes) = state.sessions.take_flashes(jar);
    let page = views::service_sale_page(&user, &flashes, &services, Utc::now().date_naive());
    Ok((jar, Html(page)))
}

async fn record_service_sale(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Form(form): Form<ServiceSaleForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let new_sale = form.parse(&user.id)?;
    state.db.sales().record_service_sale(&new_sale).await?;

    let jar = state
        .sessions
        .push_flash(jar, Flash::success("Venta de servicio cargada"))?;
    Ok((jar, Redirect::to("/")))
}

async fn product_sale_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let products = state.db.catalog().list_products().await?;
    let (jar, flashes) = state.sessions.take_flashes(jar);
    let page = views::product_sale_page(&user, &flashes, &products, Utc::now().date_naive());
    Ok((jar, Html(page)))
}

async fn record_product_sale(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Form(form): Form<ProductSaleForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let new_sale = form.parse(&user.id)?;
    state.db.sales().record_product_sale(&new_sale).await?;

    let jar = state
        .sessions
        .push_flash(jar, Flash::success("Venta de producto cargada"))?;
    Ok((jar, Redirect::to("/")))
}
