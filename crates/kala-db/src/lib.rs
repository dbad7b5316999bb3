//! # kala-db: Database Layer for the Kala salon
//!
//! SQLite storage for users, the catalog and recorded sales, with sqlx for
//! async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kala Data Flow                                   │
//! │                                                                         │
//! │  axum handler (POST /venta/producto)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kala-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ UserRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CatalogRepo   │    │ 001_init.sql │  │   │
//! │  │   │               │    │ SaleRepo      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   seed_catalog()   bootstrap_admin()   hash/verify_password()   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (kala.db)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (user, catalog, sale)
//! - [`password`] - Argon2 password hashing
//! - [`seed`] - The salon's starting catalog
//! - [`bootstrap`] - First admin account
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kala_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_url("sqlite://kala.db")).await?;
//!
//! let services = db.catalog().list_services().await?;
//! let totals = db.sales().sale_lines(&user.sale_scope()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bootstrap;
pub mod error;
pub mod migrations;
pub mod password;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use bootstrap::{bootstrap_admin, BootstrapOutcome, BOOTSTRAP_ADMIN_NAME};
pub use error::{DbError, DbResult};
pub use password::{hash_password, verify_password};
pub use pool::{Database, DbConfig};
pub use seed::{seed_catalog, SeedSummary};

// Repository re-exports for convenience
pub use repository::catalog::{CatalogRepository, NewProduct, NewService};
pub use repository::sale::{
    NewProductSale, NewServiceSale, ProductSaleEntry, SaleRepository, ServiceSaleEntry,
};
pub use repository::user::{NewUser, UserRepository};
