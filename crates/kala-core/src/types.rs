//! # Domain Types
//!
//! Core domain types used throughout the salon app.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Service      │   │   ServiceSale   │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (unique)  │   │  client_name    │   │  email (unique) │       │
//! │  │  cash_price     │   │  price_charged  │   │  password_hash  │       │
//! │  │  transfer_price │   │  commission_base│   │  role           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   ProductSale   │   │ PaymentMethod   │       │
//! │  │  + stock        │   │  + quantity     │   │  Cash           │       │
//! │  └─────────────────┘   └─────────────────┘   │  Transfer, Card │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity has a UUID v4 `id` stored as text.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Payment Method
// =============================================================================

/// How the client paid.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash at the counter.
    Cash,
    /// Bank transfer.
    Transfer,
    /// Debit or credit card.
    Card,
}

impl PaymentMethod {
    /// Every method, in the order the sale forms list them.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::Transfer,
        PaymentMethod::Card,
    ];

    /// Stored value.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Card => "card",
        }
    }

    /// Label shown at the counter.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Efectivo",
            PaymentMethod::Transfer => "Transferencia",
            PaymentMethod::Card => "Tarjeta",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts stored values and counter labels, case-insensitively.
impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" | "efectivo" => Ok(PaymentMethod::Cash),
            "transfer" | "transferencia" => Ok(PaymentMethod::Transfer),
            "card" | "tarjeta" => Ok(PaymentMethod::Card),
            _ => Err(ValidationError::NotAllowed {
                field: "medio".to_string(),
                allowed: PaymentMethod::ALL
                    .iter()
                    .map(|m| m.label().to_string())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// Role
// =============================================================================

/// What a user may do.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages catalog and users, sees every sale.
    Admin,
    /// Records sales, sees only their own.
    Employee,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Employee => "Empleada",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Employee
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "employee" | "empleada" => Ok(Role::Employee),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: vec!["admin".to_string(), "employee".to_string()],
            }),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A person who can log in.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string. Never rendered.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Which sales this user is allowed to see.
    pub fn sale_scope(&self) -> SaleScope {
        match self.role {
            Role::Admin => SaleScope::All,
            Role::Employee => SaleScope::Employee(self.id.clone()),
        }
    }
}

/// Sales visible to the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleScope {
    /// Every sale in the salon.
    All,
    /// Sales recorded by one employee.
    Employee(String),
}

impl SaleScope {
    /// The owner filter, `None` meaning no filter.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            SaleScope::All => None,
            SaleScope::Employee(id) => Some(id.as_str()),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Which catalog table an admin form targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Service,
    Product,
}

impl FromStr for CatalogKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "service" => Ok(CatalogKind::Service),
            "product" => Ok(CatalogKind::Product),
            _ => Err(ValidationError::NotAllowed {
                field: "kind".to_string(),
                allowed: vec!["service".to_string(), "product".to_string()],
            }),
        }
    }
}

/// A salon service (haircut, lash lifting...).
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Price paid in cash, also the commission basis.
    pub cash_price: i64,
    /// Explicit transfer/card price. `None` means cash + 15%.
    pub transfer_price: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Service {
    #[inline]
    pub fn cash(&self) -> Money {
        Money::new(self.cash_price)
    }

    #[inline]
    pub fn transfer(&self) -> Option<Money> {
        self.transfer_price.map(Money::new)
    }
}

/// A retail product sold over the counter.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub cash_price: i64,
    pub transfer_price: Option<i64>,
    /// Units on hand. Goes negative when selling without stock.
    pub stock: i64,
    pub created_at: DateTime<Utc>,
}

impl Product {
    #[inline]
    pub fn cash(&self) -> Money {
        Money::new(self.cash_price)
    }

    #[inline]
    pub fn transfer(&self) -> Option<Money> {
        self.transfer_price.map(Money::new)
    }
}

// =============================================================================
// Sales
// =============================================================================

/// A service performed on a client.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSale {
    pub id: String,
    pub sale_date: NaiveDate,
    pub client_name: String,
    pub service_id: String,
    pub payment_method: PaymentMethod,
    /// What the client paid.
    pub price_charged: i64,
    /// Cash price of the service, whatever the payment method.
    pub commission_base: i64,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Units of a product sold.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSale {
    pub id: String,
    pub sale_date: NaiveDate,
    pub product_id: String,
    pub payment_method: PaymentMethod,
    pub quantity: i64,
    /// Unit price for the payment method × quantity.
    pub price_charged: i64,
    /// Cash price × quantity.
    pub commission_base: i64,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
