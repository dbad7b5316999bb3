//! # kala-core: Pure Business Logic for the Kala salon
//!
//! Everything that decides *how much* lives here: what a client pays for a
//! given payment method and what an employee earns on a sale. There is no
//! I/O in this crate.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kala Architecture                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    kala-web (axum)                              │   │
//! │  │    /venta/servicio ──► /venta/producto ──► /mis-comisiones     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kala-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │   money   │  │  report   │  │ validation│  │   │
//! │  │   │ medium    │  │   Money   │  │ Dashboard │  │   forms   │  │   │
//! │  │   │ commission│  │   Rate    │  │ Commission│  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kala-db (Database Layer)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - Price per payment method and commission
//! - [`money`] - Money and Rate types with integer arithmetic
//! - [`types`] - Domain types (User, Service, Product, sales)
//! - [`report`] - Dashboard and commission totals
//! - [`error`] - Domain error types
//! - [`validation`] - Form input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use kala_core::money::Money;
//! use kala_core::pricing::{commission_for_base, price_for_medium};
//! use kala_core::PaymentMethod;
//!
//! let cash = Money::new(1000);
//! assert_eq!(price_for_medium(cash, None, PaymentMethod::Transfer).unwrap().amount(), 1150);
//! assert_eq!(commission_for_base(cash).amount(), 400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::{Money, Rate};
pub use pricing::{commission_for_base, price_for_medium};
pub use report::{CommissionReport, DashboardTotals, SaleLine};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum units of a product in a single sale.
///
/// Guards against typing 1000 instead of 10 at the counter.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Number of sales shown per table on the dashboard.
pub const RECENT_SALES_LIMIT: u32 = 10;
