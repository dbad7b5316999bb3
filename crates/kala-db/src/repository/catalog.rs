//! # Catalog Repository
//!
//! Services and products the salon sells.
//!
//! ## Catalog Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Rules                                   │
//! │                                                                         │
//! │  name            UNIQUE per table                                      │
//! │  cash_price      >= 0, the commission basis                            │
//! │  transfer_price  NULL → cash + 15% at sale time                        │
//! │  stock           products only, may go negative                        │
//! │                                                                         │
//! │  Lists are always ordered by name, as the admin page and the sale      │
//! │  forms show them.                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use kala_core::{Money, Product, Service};

const SERVICE_COLUMNS: &str = "id, name, cash_price, transfer_price, created_at";
const PRODUCT_COLUMNS: &str = "id, name, cash_price, transfer_price, stock, created_at";

/// A service to add to the catalog.
#[derive(Debug, Clone)]
pub struct NewService {
    pub name: String,
    pub cash_price: Money,
    pub transfer_price: Option<Money>,
}

/// A product to add to the catalog.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub cash_price: Money,
    pub transfer_price: Option<Money>,
    pub stock: i64,
}

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    // -------------------------------------------------------------------------
    // Services
    // -------------------------------------------------------------------------

    /// Lists every service ordered by name.
    pub async fn list_services(&self) -> DbResult<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = services.len(), "Listed services");
        Ok(services)
    }

    /// Gets a service by its ID.
    pub async fn get_service(&self, id: &str) -> DbResult<Option<Service>> {
        let mut conn = self.pool.acquire().await?;
        get_service(&mut conn, id).await
    }

    /// Inserts a new service.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - A service with that name exists
    pub async fn insert_service(&self, new_service: &NewService) -> DbResult<Service> {
        let mut conn = self.pool.acquire().await?;
        insert_service(&mut conn, new_service).await
    }

    /// Counts services.
    pub async fn count_services(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Lists every product ordered by name.
    pub async fn list_products(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    pub async fn get_product(&self, id: &str) -> DbResult<Option<Product>> {
        let mut conn = self.pool.acquire().await?;
        get_product(&mut conn, id).await
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - A product with that name exists
    pub async fn insert_product(&self, new_product: &NewProduct) -> DbResult<Product> {
        let mut conn = self.pool.acquire().await?;
        insert_product(&mut conn, new_product).await
    }

    /// Counts products.
    pub async fn count_products(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Connection-level helpers (shared with transactions)
// =============================================================================

/// Inserts a service on an existing connection or transaction.
pub(crate) async fn insert_service(
    conn: &mut SqliteConnection,
    new_service: &NewService,
) -> DbResult<Service> {
    let service = Service {
        id: Uuid::new_v4().to_string(),
        name: new_service.name.clone(),
        cash_price: new_service.cash_price.amount(),
        transfer_price: new_service.transfer_price.map(|m| m.amount()),
        created_at: Utc::now(),
    };

    debug!(id = %service.id, name = %service.name, "Inserting service");

    sqlx::query(
        r#"
        INSERT INTO services (id, name, cash_price, transfer_price, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&service.id)
    .bind(&service.name)
    .bind(service.cash_price)
    .bind(service.transfer_price)
    .bind(service.created_at)
    .execute(&mut *conn)
    .await
    .map_err(|e| name_conflict(e, &service.name))?;

    Ok(service)
}

/// Inserts a product on an existing connection or transaction.
pub(crate) async fn insert_product(
    conn: &mut SqliteConnection,
    new_product: &NewProduct,
) -> DbResult<Product> {
    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: new_product.name.clone(),
        cash_price: new_product.cash_price.amount(),
        transfer_price: new_product.transfer_price.map(|m| m.amount()),
        stock: new_product.stock,
        created_at: Utc::now(),
    };

    debug!(id = %product.id, name = %product.name, stock = product.stock, "Inserting product");

    sqlx::query(
        r#"
        INSERT INTO products (id, name, cash_price, transfer_price, stock, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&product.id)
    .bind(&product.name)
    .bind(product.cash_price)
    .bind(product.transfer_price)
    .bind(product.stock)
    .bind(product.created_at)
    .execute(&mut *conn)
    .await
    .map_err(|e| name_conflict(e, &product.name))?;

    Ok(product)
}

/// Reads a service on an existing connection or transaction.
pub(crate) async fn get_service(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Service>> {
    let service = sqlx::query_as::<_, Service>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(service)
}

/// Reads a product on an existing connection or transaction.
pub(crate) async fn get_product(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(product)
}

fn name_conflict(err: sqlx::Error, name: &str) -> DbError {
    match DbError::from(err) {
        DbError::UniqueViolation { .. } => DbError::duplicate("name", name),
        other => other,
    }
}
