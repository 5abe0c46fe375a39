//! # Error Types
//!
//! Domain-specific error types for kirana-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kirana-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── AuthError        - Authentication failures                        │
//! │                                                                         │
//! │  kirana-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → CliError → Operator     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, emp_id, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Variant cannot be found by SKU or id.
    #[error("Product variant not found: {0}")]
    VariantNotFound(String),

    /// Insufficient stock to complete a sale.
    ///
    /// ## When This Occurs
    /// The guarded stock decrement matched no row because
    /// `stock_quantity < requested`. The whole bill transaction is
    /// rolled back, stock is untouched.
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: i64,
        requested: i64,
    },

    /// Bill cannot be found by invoice number or id.
    #[error("Bill not found: {0}")]
    BillNotFound(String),

    /// Bill is not in a state that allows the requested operation
    /// (e.g. voiding an already voided bill).
    #[error("Bill {invoice_number} is {current_status}, cannot perform operation")]
    InvalidBillStatus {
        invoice_number: String,
        current_status: String,
    },

    /// A bill must carry at least one line item.
    #[error("Bill has no line items")]
    EmptyBill,

    /// Discount exceeds the subtotal or is negative.
    #[error("Invalid discount {discount_paise} paise against subtotal {subtotal_paise} paise")]
    InvalidDiscount {
        discount_paise: i64,
        subtotal_paise: i64,
    },

    /// Subtotal must be positive before tax is applied.
    #[error("Invalid subtotal: {subtotal_paise} paise")]
    InvalidSubtotal { subtotal_paise: i64 },

    /// Tax rate above 100% is rejected.
    #[error("Tax rate {bps} bps exceeds 10000 (100%)")]
    TaxRateTooHigh { bps: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Authentication error (wraps AuthError).
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (phone, aadhar, email, SKU).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// MRP below cost price is rejected at variant validation.
    #[error("MRP {mrp_paise} paise is below cost price {cost_price_paise} paise")]
    MrpBelowCost {
        mrp_paise: i64,
        cost_price_paise: i64,
    },

    /// Duplicate value (e.g. duplicate SKU or emp_id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Authentication Error
// =============================================================================

/// Login failures. The message never reveals whether the employee id or
/// the password was wrong.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown employee id or wrong password.
    #[error("Invalid employee id or password")]
    InvalidCredentials,

    /// Credentials are valid but the selected role does not match the
    /// stored role.
    #[error("Selected role does not match account role")]
    RoleMismatch,

    /// Account exists but is deactivated.
    #[error("Account is deactivated")]
    AccountDeactivated,

    /// Stored hash could not be parsed or a new hash could not be produced.
    #[error("Password hashing failed: {0}")]
    Hash(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
