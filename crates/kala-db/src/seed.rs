//! # Catalog Seed
//!
//! The salon's starting price list, loaded from `GET /admin/seed` or
//! `kala-init --seed`.
//!
//! ## Guard
//! ```text
//! services table empty?  ──yes──► insert the 12 services
//! products table empty?  ──yes──► insert the 5 products (stock 0)
//!                                  │
//!                                  ▼
//!                        one transaction, then commit
//! ```
//!
//! Each table is checked on its own: a salon that already typed in its
//! services still gets the products, and running the seed twice changes
//! nothing.

use serde::Serialize;
use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;
use crate::repository::catalog::{self, NewProduct, NewService};
use kala_core::Money;

/// `(name, cash, transfer)` for every seeded service.
pub const SEED_SERVICES: &[(&str, i64, i64)] = &[
    ("Alisado (con formol)", 52_500, 58_500),
    ("Botox s/ formol", 49_000, 54_500),
    ("Shock de palta", 49_000, 54_500),
    ("Keratina c/ células madres", 45_000, 50_500),
    ("Alisado sin formol (brasileño)", 79_500, 88_500),
    ("Alineamiento capilar", 79_500, 88_500),
    ("SOS reconstructor", 79_500, 88_500),
    ("Diseño y perfilado de cejas", 9_000, 10_350),
    ("Diseño + perfilado + Henna", 11_500, 13_250),
    ("Laminado de cejas + diseño", 16_500, 18_950),
    ("Lifting de pestañas nutritivo + tinte", 17_000, 19_100),
    ("Sombreado con henna/tinte", 7_000, 8_050),
];

/// `(name, cash, transfer)` for every seeded product.
///
/// Transfer prices are the salon's printed list, not recomputed: two of them
/// sit one peso under `surcharged_price`.
pub const SEED_PRODUCTS: &[(&str, i64, i64)] = &[
    ("Protector térmico", 8_500, 9_775),
    ("Baño de crema Biotina", 6_500, 7_474),
    ("Shampoo neutro", 4_800, 5_520),
    ("Keratina líquida", 12_000, 13_799),
    ("Biotina líquida", 7_500, 8_625),
];

/// How many rows a seed run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub services: usize,
    pub products: usize,
}

impl SeedSummary {
    /// True when both tables were already populated.
    pub fn is_noop(&self) -> bool {
        self.services == 0 && self.products == 0
    }
}

/// Loads the fixed catalog into empty tables.
pub async fn seed_catalog(db: &Database) -> DbResult<SeedSummary> {
    let mut tx = db.pool().begin().await?;
    let mut summary = SeedSummary::default();

    let services: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services")
        .fetch_one(&mut *tx)
        .await?;

    if services == 0 {
        for (name, cash, transfer) in SEED_SERVICES {
            catalog::insert_service(
                &mut tx,
                &NewService {
                    name: name.to_string(),
                    cash_price: Money::new(*cash),
                    transfer_price: Some(Money::new(*transfer)),
                },
            )
            .await?;
            summary.services += 1;
        }
    }

    let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&mut *tx)
        .await?;

    if products == 0 {
        for (name, cash, transfer) in SEED_PRODUCTS {
            catalog::insert_product(
                &mut tx,
                &NewProduct {
                    name: name.to_string(),
                    cash_price: Money::new(*cash),
                    transfer_price: Some(Money::new(*transfer)),
                    stock: 0,
                },
            )
            .await?;
            summary.products += 1;
        }
    }

    tx.commit().await?;

    info!(
        services = summary.services,
        products = summary.products,
        "Catalog seed finished"
    );

    Ok(summary)
}
