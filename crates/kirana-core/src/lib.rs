//! # kirana-core: Pure Business Logic for Kirana POS
//!
//! This crate is the heart of Kirana POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Kirana POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    kirana CLI (apps/cli)                        │   │
//! │  │    login ──► bill create ──► stock ──► reports                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kirana-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  billing  │  │ validation│  │   │
//! │  │   │  Employee │  │   Money   │  │ compute_  │  │   rules   │  │   │
//! │  │   │   Bill    │  │  TaxCalc  │  │  totals   │  │  formats  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   stock   │  │  invoice  │  │   auth    │  │ analytics │  │   │
//! │  │   │  status   │  │ numbering │  │  argon2   │  │  ranges   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO FILES • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          kirana-db (SQLite)        kirana-pdf (invoices)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Employee, Product, Bill, etc.)
//! - [`money`] - Money type with integer paise arithmetic (no floating point!)
//! - [`billing`] - Bill totals: discount, GST, CGST/SGST split
//! - [`invoice`] - Invoice number formatting
//! - [`stock`] - Stock-status classification and margins
//! - [`auth`] - Password hashing and the login decision
//! - [`analytics`] - Reporting date ranges and growth math
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output
//! 2. **No I/O**: database, file system, network access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are paise (i64), never floats
//! 4. **Explicit Errors**: typed errors, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use kirana_core::billing::{compute_totals, LineItem};
//! use kirana_core::money::Money;
//! use kirana_core::types::TaxRate;
//!
//! let lines = vec![LineItem::new("RICE-500", "Basmati Rice 500g", 4, Money::from_rupees(250))];
//! let totals = compute_totals(&lines, Money::from_rupees(100), TaxRate::from_bps(1800)).unwrap();
//!
//! // ₹1000 - ₹100 discount, 18% GST on ₹900 = ₹162 tax
//! assert_eq!(totals.total, Money::from_rupees(1062));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod auth;
pub mod billing;
pub mod error;
pub mod invoice;
pub mod money;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kirana_core::Money` instead of
// `use kirana_core::money::Money`

pub use billing::{compute_totals, split_gst, BillTotals, LineItem};
pub use error::{AuthError, CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use stock::StockStatus;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item on a bill.
///
/// ## Business Reason
/// Prevents accidental over-billing (e.g. typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
