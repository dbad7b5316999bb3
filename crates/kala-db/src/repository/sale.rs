//! # Sale Repository
//!
//! Records service and product sales and reads them back for the dashboard
//! and the commissions page.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Recording a Sale                                  │
//! │                                                                         │
//! │  1. LOOK UP the catalog item (inside the transaction)                  │
//! │     └── missing → CoreError::*NotFound, nothing written                │
//! │                                                                         │
//! │  2. PRICE it                                                           │
//! │     ├── price_charged   = price_for_medium(cash, transfer, method)     │
//! │     │                     (× quantity for products)                    │
//! │     └── commission_base = cash (× quantity), whatever the method       │
//! │                                                                         │
//! │  3. INSERT the sale row                                                │
//! │                                                                         │
//! │  4. (products) DECREMENT stock by quantity, negative allowed           │
//! │                                                                         │
//! │  5. COMMIT                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sales are never updated or deleted. Commission amounts are not stored:
//! reports derive them from `commission_base`.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbResult;
use crate::repository::catalog;
use kala_core::pricing::{commission_base, line_total};
use kala_core::{
    commission_for_base, price_for_medium, CommissionReport, CoreError, DashboardTotals, Money,
    PaymentMethod, ProductSale, SaleLine, SaleScope, ServiceSale,
};

// =============================================================================
// Inputs
// =============================================================================

/// A service sale as entered at the counter.
#[derive(Debug, Clone)]
pub struct NewServiceSale {
    pub sale_date: NaiveDate,
    pub client_name: String,
    pub service_id: String,
    pub payment_method: PaymentMethod,
    /// Employee recording the sale.
    pub user_id: String,
}

/// A product sale as entered at the counter.
#[derive(Debug, Clone)]
pub struct NewProductSale {
    pub sale_date: NaiveDate,
    pub product_id: String,
    pub payment_method: PaymentMethod,
    pub quantity: i64,
    /// Employee recording the sale.
    pub user_id: String,
}

// =============================================================================
// Dashboard rows
// =============================================================================

/// A service sale joined with the service and seller names.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ServiceSaleEntry {
    pub id: String,
    pub sale_date: NaiveDate,
    pub client_name: String,
    pub service_name: String,
    pub payment_method: PaymentMethod,
    pub price_charged: i64,
    pub commission_base: i64,
    pub seller_name: String,
}

impl ServiceSaleEntry {
    /// Commission owed on this sale alone.
    pub fn commission(&self) -> Money {
        commission_for_base(Money::new(self.commission_base))
    }
}

/// A product sale joined with the product and seller names.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductSaleEntry {
    pub id: String,
    pub sale_date: NaiveDate,
    pub product_name: String,
    pub payment_method: PaymentMethod,
    pub quantity: i64,
    pub price_charged: i64,
    pub commission_base: i64,
    pub seller_name: String,
}

impl ProductSaleEntry {
    /// Commission owed on this sale alone.
    pub fn commission(&self) -> Money {
        commission_for_base(Money::new(self.commission_base))
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a service sale.
    ///
    /// ## Returns
    /// * `Ok(ServiceSale)` - The stored sale with price and base resolved
    /// * `Err(DbError::Domain(CoreError::ServiceNotFound))` - Unknown service
    pub async fn record_service_sale(&self, new_sale: &NewServiceSale) -> DbResult<ServiceSale> {
        let mut tx = self.pool.begin().await?;

        let service = catalog::get_service(&mut tx, &new_sale.service_id)
            .await?
            .ok_or_else(|| CoreError::ServiceNotFound(new_sale.service_id.clone()))?;

        let charged = price_for_medium(service.cash(), service.transfer(), new_sale.payment_method)?;

        let sale = ServiceSale {
            id: Uuid::new_v4().to_string(),
            sale_date: new_sale.sale_date,
            client_name: new_sale.client_name.clone(),
            service_id: service.id.clone(),
            payment_method: new_sale.payment_method,
            price_charged: charged.amount(),
            commission_base: service.cash_price,
            user_id: new_sale.user_id.clone(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO service_sales (
                id, sale_date, client_name, service_id, payment_method,
                price_charged, commission_base, user_id, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&sale.id)
        .bind(sale.sale_date)
        .bind(&sale.client_name)
        .bind(&sale.service_id)
        .bind(sale.payment_method)
        .bind(sale.price_charged)
        .bind(sale.commission_base)
        .bind(&sale.user_id)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            id = %sale.id,
            service = %service.name,
            method = sale.payment_method.as_str(),
            charged = sale.price_charged,
            "Service sale recorded"
        );

        Ok(sale)
    }

    /// Records a product sale and decrements the product's stock, in one
    /// transaction.
    ///
    /// Stock is not checked: selling more than is on hand leaves it negative.
    ///
    /// ## Returns
    /// * `Err(DbError::Domain(CoreError::ProductNotFound))` - Unknown product
    pub async fn record_product_sale(&self, new_sale: &NewProductSale) -> DbResult<ProductSale> {
        let mut tx = self.pool.begin().await?;

        let product = catalog::get_product(&mut tx, &new_sale.product_id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(new_sale.product_id.clone()))?;

        let charged = line_total(
            product.cash(),
            product.transfer(),
            new_sale.payment_method,
            new_sale.quantity,
        )?;
        let base = commission_base(product.cash(), new_sale.quantity)?;

        let sale = ProductSale {
            id: Uuid::new_v4().to_string(),
            sale_date: new_sale.sale_date,
            product_id: product.id.clone(),
            payment_method: new_sale.payment_method,
            quantity: new_sale.quantity,
            price_charged: charged.amount(),
            commission_base: base.amount(),
            user_id: new_sale.user_id.clone(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO product_sales (
                id, sale_date, product_id, payment_method, quantity,
                price_charged, commission_base, user_id, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&sale.id)
        .bind(sale.sale_date)
        .bind(&sale.product_id)
        .bind(sale.payment_method)
        .bind(sale.quantity)
        .bind(sale.price_charged)
        .bind(sale.commission_base)
        .bind(&sale.user_id)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE products SET stock = stock - ?1 WHERE id = ?2")
            .bind(sale.quantity)
            .bind(&sale.product_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            id = %sale.id,
            product = %product.name,
            quantity = sale.quantity,
            stock_after = product.stock - sale.quantity,
            charged = sale.price_charged,
            "Product sale recorded"
        );

        Ok(sale)
    }

    /// Newest service sales first, limited to `limit`.
    pub async fn recent_service_sales(
        &self,
        scope: &SaleScope,
        limit: u32,
    ) -> DbResult<Vec<ServiceSaleEntry>> {
        let entries = sqlx::query_as::<_, ServiceSaleEntry>(
            r#"
            SELECT
                s.id,
                s.sale_date,
                s.client_name,
                sv.name AS service_name,
                s.payment_method,
                s.price_charged,
                s.commission_base,
                u.name AS seller_name
            FROM service_sales s
            JOIN services sv ON sv.id = s.service_id
            JOIN users u ON u.id = s.user_id
            WHERE (?1 IS NULL OR s.user_id = ?1)
            ORDER BY s.rowid DESC
            LIMIT ?2
            "#,
        )
        .bind(scope.user_id())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = entries.len(), "Loaded recent service sales");
        Ok(entries)
    }

    /// Newest product sales first, limited to `limit`.
    pub async fn recent_product_sales(
        &self,
        scope: &SaleScope,
        limit: u32,
    ) -> DbResult<Vec<ProductSaleEntry>> {
        let entries = sqlx::query_as::<_, ProductSaleEntry>(
            r#"
            SELECT
                s.id,
                s.sale_date,
                p.name AS product_name,
                s.payment_method,
                s.quantity,
                s.price_charged,
                s.commission_base,
                u.name AS seller_name
            FROM product_sales s
            JOIN products p ON p.id = s.product_id
            JOIN users u ON u.id = s.user_id
            WHERE (?1 IS NULL OR s.user_id = ?1)
            ORDER BY s.rowid DESC
            LIMIT ?2
            "#,
        )
        .bind(scope.user_id())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = entries.len(), "Loaded recent product sales");
        Ok(entries)
    }

    /// Charged amount and commission base of every sale in scope, services
    /// and products together.
    pub async fn sale_lines(&self, scope: &SaleScope) -> DbResult<Vec<SaleLine>> {
        let rows: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT price_charged, commission_base FROM service_sales
            WHERE (?1 IS NULL OR user_id = ?1)
            UNION ALL
            SELECT price_charged, commission_base FROM product_sales
            WHERE (?1 IS NULL OR user_id = ?1)
            "#,
        )
        .bind(scope.user_id())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(charged, base)| SaleLine::new(charged, base))
            .collect())
    }

    /// Dashboard headline numbers for a scope.
    pub async fn dashboard_totals(&self, scope: &SaleScope) -> DbResult<DashboardTotals> {
        Ok(DashboardTotals::from_sales(self.sale_lines(scope).await?))
    }

    /// Commissions page numbers for a scope.
    pub async fn commission_report(&self, scope: &SaleScope) -> DbResult<CommissionReport> {
        Ok(CommissionReport::from_sales(self.sale_lines(scope).await?))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
