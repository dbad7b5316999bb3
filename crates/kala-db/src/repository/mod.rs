//! # Repository Module
//!
//! Database repository implementations for the salon.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  axum handler                                                          │
//! │       │                                                                 │
//! │       │  db.catalog().list_services()                                  │
//! │       ▼                                                                 │
//! │  CatalogRepository                                                     │
//! │  ├── list_services / list_products                                     │
//! │  ├── get_service / get_product                                         │
//! │  └── insert_service / insert_product                                   │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - Accounts and login lookups
//! - [`catalog::CatalogRepository`] - Services and products
//! - [`sale::SaleRepository`] - Recording sales and reading them back

pub mod catalog;
pub mod sale;
pub mod user;
