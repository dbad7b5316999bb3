//! Server-rendered HTML pages.
//!
//! Every page shares [`layout`]: navigation (admin links only for admins),
//! flash messages, then the page body. Anything user-typed goes through
//! [`escape`].

use chrono::NaiveDate;

use kala_core::validation::DATE_FORMAT;
use kala_core::{CommissionReport, DashboardTotals, Money, PaymentMethod, Product, Role, Service, User};
use kala_db::{ProductSaleEntry, ServiceSaleEntry};

use crate::auth::Flash;

/// Escapes text for HTML element and attribute content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn money(amount: i64) -> String {
    Money::new(amount).to_string()
}

fn date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

// =============================================================================
// Layout
// =============================================================================

fn nav(user: Option<&User>) -> String {
    let Some(user) = user else {
        return String::new();
    };

    let mut links = String::from(
        r#"<a href="/">Inicio</a> <a href="/venta/servicio">Venta servicio</a> <a href="/venta/producto">Venta producto</a> <a href="/mis-comisiones">Comisiones</a>"#,
    );
    if user.is_admin() {
        links.push_str(
            r#" <a href="/admin/catalogo">Catálogo</a> <a href="/admin/usuarios">Usuarios</a>"#,
        );
    }

    format!(
        r#"<nav>{links} <span class="user">{} ({})</span> <a href="/logout">Salir</a></nav>"#,
        escape(&user.name),
        user.role.label(),
    )
}

fn flashes_html(flashes: &[Flash]) -> String {
    flashes
        .iter()
        .map(|f| {
            format!(
                r#"<div class="alert alert-{}">{}</div>"#,
                f.level.as_str(),
                escape(&f.message)
            )
        })
        .collect()
}

/// Wraps a page body in the shared chrome.
pub fn layout(title: &str, user: Option<&User>, flashes: &[Flash], body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="es">
<head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title} · Kala</title></head>
<body>
{nav}
<main>
{flashes}
<h1>{title}</h1>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        nav = nav(user),
        flashes = flashes_html(flashes),
        body = body,
    )
}

fn method_options() -> String {
    PaymentMethod::ALL
        .iter()
        .map(|m| format!(r#"<option value="{0}">{0}</option>"#, m.label()))
        .collect()
}

// =============================================================================
// Pages
// =============================================================================

pub fn login_page(flashes: &[Flash]) -> String {
    let body = r#"<form method="post" action="/login">
<label>Email <input type="text" name="email" required></label>
<label>Contraseña <input type="password" name="password" required></label>
<button type="submit">Ingresar</button>
</form>"#;
    layout("Ingresar", None, flashes, body)
}

pub fn dashboard_page(
    user: &User,
    flashes: &[Flash],
    services: &[ServiceSaleEntry],
    products: &[ProductSaleEntry],
    totals: &DashboardTotals,
) -> String {
    let mut body = format!(
        r#"<section class="totals"><p>Total facturado: <strong>{}</strong></p><p>Comisión total: <strong>{}</strong></p></section>"#,
        totals.total_billed, totals.total_commission
    );

    body.push_str(
        "<h2>Últimos servicios</h2><table><tr><th>Fecha</th><th>Clienta</th><th>Servicio</th><th>Medio</th><th>Cobrado</th><th>Comisión</th><th>Empleada</th></tr>",
    );
    for s in services {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            date(s.sale_date),
            escape(&s.client_name),
            escape(&s.service_name),
            s.payment_method,
            money(s.price_charged),
            s.commission(),
            escape(&s.seller_name),
        ));
    }
    body.push_str("</table>");

    body.push_str(
        "<h2>Últimos productos</h2><table><tr><th>Fecha</th><th>Producto</th><th>Cant.</th><th>Medio</th><th>Cobrado</th><th>Comisión</th><th>Empleada</th></tr>",
    );
    for p in products {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            date(p.sale_date),
            escape(&p.product_name),
            p.quantity,
            p.payment_method,
            money(p.price_charged),
            p.commission(),
            escape(&p.seller_name),
        ));
    }
    body.push_str("</table>");

    layout("Panel", Some(user), flashes, &body)
}

pub fn catalog_page(
    user: &User,
    flashes: &[Flash],
    services: &[Service],
    products: &[Product],
) -> String {
    let transfer = |t: Option<i64>| t.map(money).unwrap_or_else(|| "+15%".to_string());

    let mut body = String::from(
        r#"<form method="post" action="/admin/catalogo">
<select name="kind"><option value="service">Servicio</option><option value="product">Producto</option></select>
<label>Nombre <input type="text" name="name" required></label>
<label>Efectivo <input type="number" name="efectivo" min="0"></label>
<label>Transferencia/Tarjeta <input type="number" name="transf" min="0"></label>
<label>Stock <input type="number" name="stock"></label>
<button type="submit">Guardar</button>
</form>
<p><a href="/admin/seed">Cargar catálogo inicial</a></p>"#,
    );

    body.push_str("<h2>Servicios</h2><table><tr><th>Nombre</th><th>Efectivo</th><th>Transf./Tarjeta</th></tr>");
    for s in services {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&s.name),
            money(s.cash_price),
            transfer(s.transfer_price),
        ));
    }
    body.push_str("</table>");

    body.push_str("<h2>Productos</h2><table><tr><th>Nombre</th><th>Efectivo</th><th>Transf./Tarjeta</th><th>Stock</th></tr>");
    for p in products {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&p.name),
            money(p.cash_price),
            transfer(p.transfer_price),
            p.stock,
        ));
    }
    body.push_str("</table>");

    layout("Catálogo", Some(user), flashes, &body)
}

pub fn users_page(user: &User, flashes: &[Flash], users: &[User]) -> String {
    let mut body = format!(
        r#"<form method="post" action="/admin/usuarios">
<label>Nombre <input type="text" name="name" required></label>
<label>Email <input type="text" name="email" required></label>
<select name="role"><option value="{employee}">{employee_label}</option><option value="{admin}">{admin_label}</option></select>
<label>Contraseña <input type="password" name="password" required></label>
<button type="submit">Crear</button>
</form>"#,
        employee = Role::Employee.as_str(),
        employee_label = Role::Employee.label(),
        admin = Role::Admin.as_str(),
        admin_label = Role::Admin.label(),
    );

    body.push_str("<table><tr><th>Nombre</th><th>Email</th><th>Rol</th></tr>");
    for u in users {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&u.name),
            escape(&u.email),
            u.role.label(),
        ));
    }
    body.push_str("</table>");

    layout("Usuarios", Some(user), flashes, &body)
}

pub fn service_sale_page(user: &User, flashes: &[Flash], services: &[Service], today: NaiveDate) -> String {
    let options: String = services
        .iter()
        .map(|s| {
            format!(
                r#"<option value="{}">{} ({})</option>"#,
                escape(&s.id),
                escape(&s.name),
                money(s.cash_price)
            )
        })
        .collect();

    let body = format!(
        r#"<form method="post" action="/venta/servicio">
<label>Fecha <input type="date" name="date" value="{today}" required></label>
<label>Clienta <input type="text" name="client" required></label>
<label>Servicio <select name="service_id">{options}</select></label>
<label>Medio <select name="medio">{methods}</select></label>
<button type="submit">Cargar</button>
</form>"#,
        today = date(today),
        methods = method_options(),
    );

    layout("Venta de servicio", Some(user), flashes, &body)
}

pub fn product_sale_page(user: &User, flashes: &[Flash], products: &[Product], today: NaiveDate) -> String {
    let options: String = products
        .iter()
        .map(|p| {
            format!(
                r#"<option value="{}">{} ({}, stock {})</option>"#,
                escape(&p.id),
                escape(&p.name),
                money(p.cash_price),
                p.stock
            )
        })
        .collect();

    let body = format!(
        r#"<form method="post" action="/venta/producto">
<label>Fecha <input type="date" name="date" value="{today}" required></label>
<label>Producto <select name="product_id">{options}</select></label>
<label>Medio <select name="medio">{methods}</select></label>
<label>Cantidad <input type="number" name="qty" value="1" min="1" max="999"></label>
<button type="submit">Cargar</button>
</form>"#,
        today = date(today),
        methods = method_options(),
    );

    layout("Venta de producto", Some(user), flashes, &body)
}

pub fn commissions_page(user: &User, flashes: &[Flash], report: &CommissionReport) -> String {
    let body = format!(
        r#"<table>
<tr><th>Base (efectivo)</th><td>{}</td></tr>
<tr><th>Comisión 40%</th><td>{}</td></tr>
<tr><th>Total facturado</th><td>{}</td></tr>
</table>"#,
        report.total_base, report.total_commission, report.total_billed
    );

    layout("Mis comisiones", Some(user), flashes, &body)
}
