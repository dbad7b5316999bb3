//! Admin pages: catalog, users and the catalog seed.
//!
//! Every handler takes [`AdminUser`], so employees never reach the body.

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use kala_db::{hash_password, seed_catalog, NewUser};

use crate::auth::{AdminUser, Flash};
use crate::error::AppResult;
use crate::forms::{CatalogEntry, CatalogForm, UserForm};
use crate::state::AppState;
use crate::views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/catalogo", get(catalog).post(add_catalog_item))
        .route("/admin/usuarios", get(users).post(create_user))
        .route("/admin/seed", get(seed))
}

// =============================================================================
// Catalog
// =============================================================================

async fn catalog(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let catalog = state.db.catalog();
    let services = catalog.list_services().await?;
    let products = catalog.list_products().await?;

    let (jar, flashes) = state.sessions.take_flashes(jar);
    Ok((jar, Html(views::catalog_page(&admin, &flashes, &services, &products))))
}

async fn add_catalog_item(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    jar: CookieJar,
    Form(form): Form<CatalogForm>,
) -> AppResult<(CookieJar, Redirect)> {
    match form.parse()? {
        CatalogEntry::Service(service) => {
            let service = state.db.catalog().insert_service(&service).await?;
            info!(admin = %admin.id, id = %service.id, name = %service.name, "Service added");
        }
        CatalogEntry::Product(product) => {
            let product = state.db.catalog().insert_product(&product).await?;
            info!(admin = %admin.id, id = %product.id, name = %product.name, "Product added");
        }
    }

    let jar = state.sessions.push_flash(jar, Flash::success("Guardado"))?;
    Ok((jar, Redirect::to("/admin/catalogo")))
}

async fn seed(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    let summary = seed_catalog(&state.db).await?;
    info!(
        admin = %admin.id,
        services = summary.services,
        products = summary.products,
        "Catalog seed requested"
    );

    let jar = state.sessions.push_flash(jar, Flash::success("Catálogo cargado"))?;
    Ok((jar, Redirect::to("/admin/catalogo")))
}

// =============================================================================
// Users
// =============================================================================

async fn users(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let users = state.db.users().list().await?;

    let (jar, flashes) = state.sessions.take_flashes(jar);
    Ok((jar, Html(views::users_page(&admin, &flashes, &users))))
}

async fn create_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    jar: CookieJar,
    Form(form): Form<UserForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let input = form.parse()?;

    let user = state
        .db
        .users()
        .insert(&NewUser {
            name: input.name,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            role: input.role,
        })
        .await?;

    info!(admin = %admin.id, id = %user.id, role = user.role.as_str(), "User created");

    let jar = state.sessions.push_flash(jar, Flash::success("Usuario creado"))?;
    Ok((jar, Redirect::to("/admin/usuarios")))
}
