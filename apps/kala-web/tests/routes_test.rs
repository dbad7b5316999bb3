//! Route-level tests: the full router over a fresh in-memory database.

use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Request, StatusCode,
    },
    response::Response,
    Router,
};
use tower::ServiceExt;

use kala_core::{Role, SaleScope};
use kala_db::{hash_password, Database, DbConfig, NewUser};
use kala_web::{app, AppState, WebConfig};

const ADMIN_EMAIL: &str = "admin@kala";
const ADMIN_PASSWORD: &str = "kala123";

// =============================================================================
// Helpers
// =============================================================================

async fn setup() -> (Router, AppState) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let state = AppState::new(db, WebConfig::default());
    (app(state.clone()), state)
}

async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post(app: &Router, uri: &str, cookie: Option<&str>, fields: &[(&str, &str)]) -> Response {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// `name=value` pairs set by a response, ignoring removals.
fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .filter(|pair| !pair.ends_with('='))
        .map(str::to_string)
        .collect()
}

fn location(response: &Response) -> &str {
    response.headers().get(LOCATION).unwrap().to_str().unwrap()
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = post(app, "/login", None, &[("email", email), ("password", password)]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    set_cookies(&response)
        .into_iter()
        .find(|c| c.starts_with("kala_session="))
        .unwrap()
}

async fn admin_session(app: &Router) -> String {
    let response = get(app, "/init", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    login(app, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

async fn employee_session(app: &Router, state: &AppState, name: &str) -> (String, String) {
    let email = format!("{}@kala", name.to_lowercase());
    let user = state
        .db
        .users()
        .insert(&NewUser {
            name: name.to_string(),
            email: email.clone(),
            password_hash: hash_password("secreta").unwrap(),
            role: Role::Employee,
        })
        .await
        .unwrap();
    (login(app, &email, "secreta").await, user.id)
}

async fn seeded_ids(app: &Router, admin: &str, state: &AppState) -> (String, String) {
    let response = get(app, "/admin/seed", Some(admin)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let services = state.db.catalog().list_services().await.unwrap();
    let alisado = services
        .iter()
        .find(|s| s.name == "Alisado (con formol)")
        .unwrap();
    let products = state.db.catalog().list_products().await.unwrap();
    let shampoo = products.iter().find(|p| p.name == "Shampoo neutro").unwrap();
    (alisado.id.clone(), shampoo.id.clone())
}

// =============================================================================
// Bootstrap
// =============================================================================

#[tokio::test]
async fn init_creates_admin_once() {
    let (app, state) = setup().await;

    let first = get(&app, "/init", None).await;
    assert_eq!(first.status(), StatusCode::OK);
    let text = body_text(first).await;
    assert_eq!(text, "Admin creado: admin@kala");
    assert!(!text.contains(ADMIN_PASSWORD));

    let second = get(&app, "/init", None).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_text(second).await, "Ya hay usuarios creados. Nada que hacer.");

    assert_eq!(state.db.users().count().await.unwrap(), 1);
    let admin = state.db.users().get_by_email(ADMIN_EMAIL).await.unwrap().unwrap();
    assert!(admin.is_admin());
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn anonymous_requests_redirect_to_login() {
    let (app, _) = setup().await;

    for uri in ["/", "/venta/servicio", "/mis-comisiones", "/admin/catalogo", "/logout"] {
        let response = get(&app, uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login", "{uri}");
    }
}

#[tokio::test]
async fn failed_login_rerenders_form_with_flash() {
    let (app, _) = setup().await;
    get(&app, "/init", None).await;

    let response = post(
        &app,
        "/login",
        None,
        &[("email", ADMIN_EMAIL), ("password", "wrong")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response)
        .iter()
        .all(|c| !c.starts_with("kala_session=")));
    let html = body_text(response).await;
    assert!(html.contains("Usuario o contraseña incorrectos"));
    assert!(html.contains("alert-danger"));

    let unknown = post(&app, "/login", None, &[("email", "nadie@kala"), ("password", "x")]).await;
    assert!(body_text(unknown).await.contains("Usuario o contraseña incorrectos"));
}

#[tokio::test]
async fn logout_clears_session() {
    let (app, _) = setup().await;
    let admin = admin_session(&app).await;

    let response = get(&app, "/logout", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let removed = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("kala_session=;"));
    assert!(removed);
}

#[tokio::test]
async fn forged_session_is_rejected() {
    let (app, _) = setup().await;
    let response = get(&app, "/", Some("kala_session=not-a-token")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn employee_is_kept_out_of_admin_pages() {
    let (app, state) = setup().await;
    admin_session(&app).await;
    let (employee, _) = employee_session(&app, &state, "Ana").await;

    for uri in ["/admin/catalogo", "/admin/usuarios", "/admin/seed"] {
        let response = get(&app, uri, Some(&employee)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/", "{uri}");
    }

    // The seed never ran
    assert_eq!(state.db.catalog().count_services().await.unwrap(), 0);

    // The warning shows up on the dashboard
    let response = get(&app, "/admin/catalogo", Some(&employee)).await;
    let flash = set_cookies(&response)
        .into_iter()
        .find(|c| c.starts_with("kala_flash="))
        .unwrap();
    let dashboard = get(&app, "/", Some(&format!("{employee}; {flash}"))).await;
    assert_eq!(dashboard.status(), StatusCode::OK);
    let html = body_text(dashboard).await;
    assert!(html.contains("Solo admin."));
    assert!(html.contains("alert-warning"));
}

#[tokio::test]
async fn employee_cannot_write_through_admin_forms() {
    let (app, state) = setup().await;
    admin_session(&app).await;
    let (employee, _) = employee_session(&app, &state, "Ana").await;

    let promote = post(
        &app,
        "/admin/usuarios",
        Some(&employee),
        &[
            ("name", "Intrusa"),
            ("email", "intrusa@kala"),
            ("role", "admin"),
            ("password", "secreta"),
        ],
    )
    .await;
    assert_eq!(promote.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&promote), "/");
    assert!(state.db.users().get_by_email("intrusa@kala").await.unwrap().is_none());
    assert_eq!(state.db.users().count().await.unwrap(), 2);

    let add_item = post(
        &app,
        "/admin/catalogo",
        Some(&employee),
        &[("kind", "service"), ("name", "Corte"), ("efectivo", "10000")],
    )
    .await;
    assert_eq!(add_item.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&add_item), "/");
    assert_eq!(state.db.catalog().count_services().await.unwrap(), 0);
    assert_eq!(state.db.catalog().count_products().await.unwrap(), 0);
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test]
async fn seed_twice_changes_nothing() {
    let (app, state) = setup().await;
    let admin = admin_session(&app).await;

    let first = get(&app, "/admin/seed", Some(&admin)).await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&first), "/admin/catalogo");

    let second = get(&app, "/admin/seed", Some(&admin)).await;
    assert_eq!(second.status(), StatusCode::SEE_OTHER);

    assert_eq!(state.db.catalog().count_services().await.unwrap(), 12);
    assert_eq!(state.db.catalog().count_products().await.unwrap(), 5);

    let catalog = get(&app, "/admin/catalogo", Some(&admin)).await;
    let html = body_text(catalog).await;
    assert!(html.contains("Alisado (con formol)"));
    assert!(html.contains("$52.500"));
}

#[tokio::test]
async fn admin_adds_catalog_items() {
    let (app, state) = setup().await;
    let admin = admin_session(&app).await;

    let response = post(
        &app,
        "/admin/catalogo",
        Some(&admin),
        &[("kind", "service"), ("name", "Corte"), ("efectivo", "10000"), ("transf", "")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/catalogo");

    let response = post(
        &app,
        "/admin/catalogo",
        Some(&admin),
        &[("kind", "product"), ("name", "Serum"), ("efectivo", "3000"), ("stock", "4")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let services = state.db.catalog().list_services().await.unwrap();
    assert_eq!(services[0].name, "Corte");
    assert_eq!(services[0].transfer_price, None);
    let products = state.db.catalog().list_products().await.unwrap();
    assert_eq!(products[0].stock, 4);

    let duplicate = post(
        &app,
        "/admin/catalogo",
        Some(&admin),
        &[("kind", "service"), ("name", "Corte"), ("efectivo", "1")],
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let invalid = post(
        &app,
        "/admin/catalogo",
        Some(&admin),
        &[("kind", "service"), ("name", "Tinte"), ("efectivo", "-5")],
    )
    .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let too_expensive = post(
        &app,
        "/admin/catalogo",
        Some(&admin),
        &[("kind", "product"), ("name", "Oro"), ("efectivo", "9000000000000000000")],
    )
    .await;
    assert_eq!(too_expensive.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.db.catalog().count_products().await.unwrap(), 1);
}

#[tokio::test]
async fn admin_creates_users() {
    let (app, state) = setup().await;
    let admin = admin_session(&app).await;

    let fields = [
        ("name", "Mora"),
        ("email", "mora@kala"),
        ("role", "employee"),
        ("password", "secreta"),
    ];
    let response = post(&app, "/admin/usuarios", Some(&admin), &fields).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/usuarios");

    let mora = state.db.users().get_by_email("mora@kala").await.unwrap().unwrap();
    assert_eq!(mora.role, Role::Employee);

    // The new account can log in
    login(&app, "mora@kala", "secreta").await;

    let flash = set_cookies(&response)
        .into_iter()
        .find(|c| c.starts_with("kala_flash="))
        .unwrap();
    let listing = get(&app, "/admin/usuarios", Some(&format!("{admin}; {flash}"))).await;
    let html = body_text(listing).await;
    assert!(html.contains("mora@kala"));
    assert!(html.contains("Usuario creado"));

    let duplicate = post(&app, "/admin/usuarios", Some(&admin), &fields).await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
}

// =============================================================================
// Sales
// =============================================================================

#[tokio::test]
async fn service_sale_charges_by_method_and_keeps_cash_base() {
    let (app, state) = setup().await;
    let admin = admin_session(&app).await;
    let (service_id, _) = seeded_ids(&app, &admin, &state).await;
    let (employee, employee_id) = employee_session(&app, &state, "Ana").await;

    let response = post(
        &app,
        "/venta/servicio",
        Some(&employee),
        &[
            ("date", "2024-03-15"),
            ("client", "Lucia"),
            ("service_id", &service_id),
            ("medio", "Transferencia"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let lines = state
        .db
        .sales()
        .sale_lines(&SaleScope::Employee(employee_id))
        .await
        .unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].price_charged.amount(), 58_500);
    assert_eq!(lines[0].commission_base.amount(), 52_500);

    let report = body_text(get(&app, "/mis-comisiones", Some(&employee)).await).await;
    assert!(report.contains("$52.500"));
    assert!(report.contains("$21.000"));
    assert!(report.contains("$58.500"));
}

#[tokio::test]
async fn product_sale_decrements_stock() {
    let (app, state) = setup().await;
    let admin = admin_session(&app).await;
    let (_, product_id) = seeded_ids(&app, &admin, &state).await;

    let response = post(
        &app,
        "/venta/producto",
        Some(&admin),
        &[
            ("date", "2024-03-15"),
            ("product_id", &product_id),
            ("medio", "Efectivo"),
            ("qty", "2"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let product = state.db.catalog().get_product(&product_id).await.unwrap().unwrap();
    assert_eq!(product.stock, -2);

    let lines = state.db.sales().sale_lines(&SaleScope::All).await.unwrap();
    assert_eq!(lines[0].price_charged.amount(), 9_600);
    assert_eq!(lines[0].commission_base.amount(), 9_600);
}

#[tokio::test]
async fn invalid_sales_are_rejected() {
    let (app, state) = setup().await;
    let admin = admin_session(&app).await;
    let (service_id, product_id) = seeded_ids(&app, &admin, &state).await;

    let zero_qty = post(
        &app,
        "/venta/producto",
        Some(&admin),
        &[("date", "2024-03-15"), ("product_id", &product_id), ("medio", "Efectivo"), ("qty", "0")],
    )
    .await;
    assert_eq!(zero_qty.status(), StatusCode::BAD_REQUEST);

    let bad_method = post(
        &app,
        "/venta/servicio",
        Some(&admin),
        &[("date", "2024-03-15"), ("client", "Lucia"), ("service_id", &service_id), ("medio", "Cheque")],
    )
    .await;
    assert_eq!(bad_method.status(), StatusCode::BAD_REQUEST);

    let unknown_service = post(
        &app,
        "/venta/servicio",
        Some(&admin),
        &[("date", "2024-03-15"), ("client", "Lucia"), ("service_id", "missing"), ("medio", "Efectivo")],
    )
    .await;
    assert_eq!(unknown_service.status(), StatusCode::NOT_FOUND);

    assert!(state.db.sales().sale_lines(&SaleScope::All).await.unwrap().is_empty());
}

#[tokio::test]
async fn dashboard_is_scoped_by_role() {
    let (app, state) = setup().await;
    let admin = admin_session(&app).await;
    let (service_id, _) = seeded_ids(&app, &admin, &state).await;
    let (ana, _) = employee_session(&app, &state, "Ana").await;
    let (mora, _) = employee_session(&app, &state, "Mora").await;

    for (session, client) in [(&ana, "ClientaDeAna"), (&mora, "ClientaDeMora")] {
        let response = post(
            &app,
            "/venta/servicio",
            Some(session),
            &[("date", "2024-03-15"), ("client", client), ("service_id", &service_id), ("medio", "Efectivo")],
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let ana_view = body_text(get(&app, "/", Some(&ana)).await).await;
    assert!(ana_view.contains("ClientaDeAna"));
    assert!(!ana_view.contains("ClientaDeMora"));
    assert!(ana_view.contains("$52.500"));

    let admin_view = body_text(get(&app, "/", Some(&admin)).await).await;
    assert!(admin_view.contains("ClientaDeAna"));
    assert!(admin_view.contains("ClientaDeMora"));
    assert!(admin_view.contains("$105.000"));
    assert!(admin_view.contains("$42.000"));
}
