//! # Domain Types
//!
//! Core domain types used throughout Kirana POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog:    Brand ──► Product ──► ProductVariant ──► InventoryRecord  │
//! │              ProductType ─┘                                             │
//! │                                                                         │
//! │  Sourcing:   Supplier ◄──► ProductSupplier ◄──► Product                │
//! │                                                                         │
//! │  Billing:    Employee ──► Bill ──► BillItem (snapshots a variant)      │
//! │                                                                         │
//! │  Settings:   TaxSetting (one active), TaxRate (bps)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID: (sku, emp_id, invoice_number, etc.) - human-readable

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (standard GST slab)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns half the rate as a percentage. GST invoices show the tax as
    /// equal CGST and SGST components.
    #[inline]
    pub fn half_percentage(&self) -> f64 {
        self.0 as f64 / 200.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Role
// =============================================================================

/// Access role of an employee account.
///
/// Stored lowercase in the database. Login verifies the selected role
/// against the stored one; admin credentials with `Employee` selected
/// are a role mismatch, not a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access: catalog, stock, employees, reports.
    Admin,
    /// Billing and stock lookups only.
    Employee,
}

impl Role {
    /// Parses a role from its lowercase database/CLI form.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "admin" => Some(Role::Admin),
            "employee" => Some(Role::Employee),
            _ => None,
        }
    }

    /// Returns the lowercase database form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Employee
// =============================================================================

/// An employee account. Soft-deactivated via `is_active`, never deleted,
/// so historical bills keep a valid reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Employee {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identifier (e.g. "EMP001"), unique, used at login.
    pub emp_id: String,

    pub first_name: String,
    pub last_name: String,

    /// Argon2 PHC string. Never the plain password.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: Role,
    pub contact_number: String,
    pub email: Option<String>,
    pub aadhar_number: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Display name for receipts and dashboards.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A product brand (e.g. "Tata", "Amul").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Brand {
    pub id: String,
    pub brand_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A product category (e.g. "Staples", "Snacks"). `display_order` drives
/// listing order in menus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductType {
    pub id: String,
    pub type_name: String,
    pub display_order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A product line. Sellable units live in [`ProductVariant`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: String,

    /// Business identifier (e.g. "PRD0042"), unique.
    pub product_code: String,

    pub product_name: String,
    pub brand_id: String,
    pub product_type_id: String,

    /// Unit the product is measured in ("kg", "litre", "piece").
    pub base_unit: String,

    /// HSN classification code for GST invoices.
    pub hsn_code: Option<String>,

    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A sellable unit of a product (e.g. the "500g pack" of a rice product).
/// The SKU is the scan/search key at the till.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductVariant {
    pub id: String,
    pub product_id: String,
    pub variant_name: String,

    /// Stock Keeping Unit - business identifier, unique.
    pub sku: String,

    pub barcode: Option<String>,

    /// Size in `size_unit` (e.g. 0.5 with size_unit "kg").
    pub unit_size: f64,
    pub size_unit: String,

    /// Maximum retail price in paise. Must be >= cost_price_paise.
    pub mrp_paise: i64,

    /// Purchase cost in paise (for margin calculations).
    pub cost_price_paise: i64,

    pub is_default: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ProductVariant {
    /// Returns the MRP as a Money type.
    #[inline]
    pub fn mrp(&self) -> Money {
        Money::from_paise(self.mrp_paise)
    }

    /// Returns the cost price as a Money type.
    #[inline]
    pub fn cost_price(&self) -> Money {
        Money::from_paise(self.cost_price_paise)
    }
}

/// Stock record for a variant. Exactly one row per variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryRecord {
    pub variant_id: String,
    pub stock_quantity: i64,
    pub reorder_level: i64,
    pub expiry_date: Option<NaiveDate>,
    pub batch_number: Option<String>,
    pub last_updated: DateTime<Utc>,
}

// =============================================================================
// Suppliers
// =============================================================================

/// A supplier the shop sources from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Supplier {
    pub id: String,
    pub supplier_name: String,
    pub contact_person: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub gstin: Option<String>,

    /// 0.0 - 5.0, maintained manually.
    pub rating: f64,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Links a product to a supplier with sourcing terms.
/// At most one link per (product, supplier) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductSupplier {
    pub id: String,
    pub product_id: String,
    pub supplier_id: String,
    pub unit_cost_paise: i64,
    pub lead_time_days: i64,
    pub min_order_qty: i64,
    pub is_preferred: bool,
}

// =============================================================================
// Billing
// =============================================================================

/// The status of a bill. Bills are immutable after creation except for
/// this flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    /// Bill was finalized and counts towards sales.
    Completed,
    /// Bill was cancelled after the fact; excluded from all sales rollups.
    Voided,
}

impl Default for BillStatus {
    fn default() -> Self {
        BillStatus::Completed
    }
}

/// A finalized invoice. All derived amounts are stored at creation time
/// and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Bill {
    pub id: String,

    /// Business identifier, e.g. "INV-20260108-0003", unique.
    pub invoice_number: String,

    pub bill_date: NaiveDate,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub employee_id: String,

    pub subtotal_paise: i64,
    pub discount_paise: i64,
    pub tax_rate_bps: i64,
    pub tax_paise: i64,
    pub cgst_paise: i64,
    pub sgst_paise: i64,
    pub total_paise: i64,

    pub status: BillStatus,
    pub created_at: DateTime<Utc>,
}

impl Bill {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_paise(self.subtotal_paise)
    }

    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_paise(self.discount_paise)
    }

    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_paise(self.tax_paise)
    }

    #[inline]
    pub fn cgst(&self) -> Money {
        Money::from_paise(self.cgst_paise)
    }

    #[inline]
    pub fn sgst(&self) -> Money {
        Money::from_paise(self.sgst_paise)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }

    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps as u32)
    }
}

/// A line item in a bill.
/// Uses snapshot pattern to freeze variant data at time of sale, so bills
/// stay readable after catalog edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BillItem {
    pub id: String,
    pub bill_id: String,
    pub variant_id: String,

    /// SKU at time of sale.
    pub sku_snapshot: String,

    /// Display name at time of sale.
    pub name_snapshot: String,

    pub quantity: i64,
    pub unit_price_paise: i64,
    pub line_total_paise: i64,
}

impl BillItem {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_paise(self.line_total_paise)
    }
}

// =============================================================================
// Tax Settings
// =============================================================================

/// A named tax slab. Exactly one setting is active at a time; billing
/// uses the active rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TaxSetting {
    pub id: String,
    pub tax_name: String,
    pub tax_rate_bps: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TaxSetting {
    #[inline]
    pub fn rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps as u32)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_conversions() {
        let rate = TaxRate::from_bps(1800);
        assert_eq!(rate.bps(), 1800);
        assert_eq!(rate.percentage(), 18.0);
        assert_eq!(rate.half_percentage(), 9.0);

        let from_pct = TaxRate::from_percentage(8.25);
        assert_eq!(from_pct.bps(), 825);
    }

    #[test]
    fn test_role_parse_round_trip() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("employee"), Some(Role::Employee));
        assert_eq!(Role::parse("manager"), None);
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_employee_full_name() {
        let emp = Employee {
            id: "e1".into(),
            emp_id: "EMP001".into(),
            first_name: "Asha".into(),
            last_name: "Verma".into(),
            password_hash: "x".into(),
            role: Role::Employee,
            contact_number: "9876543210".into(),
            email: None,
            aadhar_number: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(emp.full_name(), "Asha Verma");
    }

    #[test]
    fn test_variant_money_accessors() {
        let variant = ProductVariant {
            id: "v1".into(),
            product_id: "p1".into(),
            variant_name: "500g".into(),
            sku: "RICE-500".into(),
            barcode: None,
            unit_size: 0.5,
            size_unit: "kg".into(),
            mrp_paise: 4550,
            cost_price_paise: 3200,
            is_default: true,
            is_active: true,
            created_at: Utc::now(),
        };
        assert_eq!(variant.mrp().paise(), 4550);
        assert_eq!(variant.cost_price().paise(), 3200);
    }
}
