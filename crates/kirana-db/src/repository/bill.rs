//! # Bill Repository
//!
//! Database operations for bills, line items, and the daily invoice
//! sequence.
//!
//! ## Bill Creation Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_bill(date, customer, employee, lines, discount, rate)           │
//! │                                                                         │
//! │  BEGIN TRANSACTION                                                      │
//! │    1. Resolve each SKU → variant (price + name snapshots)              │
//! │    2. compute_totals (kirana-core): discount bounds, GST, split        │
//! │    3. Advance invoice_sequence for the date (upsert, RETURNING)        │
//! │    4. INSERT bill                                                       │
//! │    5. For each line:                                                    │
//! │         INSERT bill_items                                               │
//! │         UPDATE inventory SET stock = stock - qty                        │
//! │                WHERE variant_id = ? AND stock >= qty                    │
//! │         rows_affected == 0 → InsufficientStock, ROLLBACK                │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  A rolled-back bill rolls the sequence back too: no burned numbers,    │
//! │  no stock change, no bill row.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use kirana_core::billing::{compute_totals, LineItem};
use kirana_core::invoice::format_invoice_number;
use kirana_core::validation::validate_quantity;
use kirana_core::{Bill, BillItem, BillStatus, CoreError, Money, TaxRate};

// =============================================================================
// Inputs
// =============================================================================

/// One requested line of a new bill: what was scanned and how many.
/// Prices and names are resolved from the catalog inside the transaction.
#[derive(Debug, Clone)]
pub struct BillLineInput {
    pub sku: String,
    pub quantity: i64,
}

/// Input for creating a bill.
#[derive(Debug, Clone)]
pub struct NewBill {
    pub bill_date: NaiveDate,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub employee_id: String,
    pub lines: Vec<BillLineInput>,
    pub discount: Money,
    pub tax_rate: TaxRate,
    /// Invoice prefix from configuration, usually "INV".
    pub invoice_prefix: String,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for bill database operations.
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: SqlitePool,
}

impl BillRepository {
    /// Creates a new BillRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BillRepository { pool }
    }

    /// Creates a bill: resolves lines, computes totals, allocates the
    /// invoice number, decrements stock. All inside one transaction.
    pub async fn create_bill(&self, new: NewBill) -> DbResult<(Bill, Vec<BillItem>)> {
        for line in &new.lines {
            validate_quantity(line.quantity).map_err(CoreError::Validation)?;
        }

        let mut tx = self.pool.begin().await?;

        // Resolve SKUs to snapshots and unit prices (current MRP).
        let mut lines: Vec<LineItem> = Vec::with_capacity(new.lines.len());
        let mut variant_ids: Vec<String> = Vec::with_capacity(new.lines.len());
        for input in &new.lines {
            let row: Option<(String, String, String, i64)> = sqlx::query_as(
                r#"
                SELECT pv.id, pv.sku, p.product_name || ' (' || pv.variant_name || ')', pv.mrp_paise
                FROM product_variants pv
                JOIN products p ON p.id = pv.product_id
                WHERE pv.sku = ?1 AND pv.is_active = 1 AND p.is_active = 1
                "#,
            )
            .bind(&input.sku)
            .fetch_optional(&mut *tx)
            .await?;

            let (variant_id, sku, name, mrp_paise) = row
                .ok_or_else(|| CoreError::VariantNotFound(input.sku.clone()))?;

            variant_ids.push(variant_id);
            lines.push(LineItem::new(
                sku,
                name,
                input.quantity,
                Money::from_paise(mrp_paise),
            ));
        }

        // All amount math happens in core; the repository only stores it.
        let totals = compute_totals(&lines, new.discount, new.tax_rate)?;

        let sequence = next_sequence(&mut tx, new.bill_date).await?;
        let invoice_number = format_invoice_number(&new.invoice_prefix, new.bill_date, sequence);

        debug!(invoice = %invoice_number, total = %totals.total, "Creating bill");

        let bill = Bill {
            id: Uuid::new_v4().to_string(),
            invoice_number,
            bill_date: new.bill_date,
            customer_name: new.customer_name,
            customer_phone: new.customer_phone,
            employee_id: new.employee_id,
            subtotal_paise: totals.subtotal.paise(),
            discount_paise: totals.discount.paise(),
            tax_rate_bps: totals.tax_rate.bps() as i64,
            tax_paise: totals.tax.paise(),
            cgst_paise: totals.cgst.paise(),
            sgst_paise: totals.sgst.paise(),
            total_paise: totals.total.paise(),
            status: BillStatus::Completed,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO bills (
                id, invoice_number, bill_date, customer_name, customer_phone,
                employee_id, subtotal_paise, discount_paise, tax_rate_bps,
                tax_paise, cgst_paise, sgst_paise, total_paise, status, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
        )
        .bind(&bill.id)
        .bind(&bill.invoice_number)
        .bind(bill.bill_date)
        .bind(&bill.customer_name)
        .bind(&bill.customer_phone)
        .bind(&bill.employee_id)
        .bind(bill.subtotal_paise)
        .bind(bill.discount_paise)
        .bind(bill.tax_rate_bps)
        .bind(bill.tax_paise)
        .bind(bill.cgst_paise)
        .bind(bill.sgst_paise)
        .bind(bill.total_paise)
        .bind(bill.status)
        .bind(bill.created_at)
        .execute(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for (line, variant_id) in lines.iter().zip(&variant_ids) {
            let item = BillItem {
                id: Uuid::new_v4().to_string(),
                bill_id: bill.id.clone(),
                variant_id: variant_id.clone(),
                sku_snapshot: line.sku.clone(),
                name_snapshot: line.name.clone(),
                quantity: line.quantity,
                unit_price_paise: line.unit_price.paise(),
                line_total_paise: line.line_total().paise(),
            };

            sqlx::query(
                r#"
                INSERT INTO bill_items (
                    id, bill_id, variant_id, sku_snapshot, name_snapshot,
                    quantity, unit_price_paise, line_total_paise
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(&item.id)
            .bind(&item.bill_id)
            .bind(&item.variant_id)
            .bind(&item.sku_snapshot)
            .bind(&item.name_snapshot)
            .bind(item.quantity)
            .bind(item.unit_price_paise)
            .bind(item.line_total_paise)
            .execute(&mut *tx)
            .await?;

            // Guarded decrement: matches only when enough stock remains.
            let result = sqlx::query(
                r#"
                UPDATE inventory SET
                    stock_quantity = stock_quantity - ?1,
                    last_updated = ?2
                WHERE variant_id = ?3 AND stock_quantity >= ?1
                "#,
            )
            .bind(item.quantity)
            .bind(Utc::now())
            .bind(&item.variant_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                let available: i64 =
                    sqlx::query_scalar("SELECT stock_quantity FROM inventory WHERE variant_id = ?1")
                        .bind(&item.variant_id)
                        .fetch_optional(&mut *tx)
                        .await?
                        .unwrap_or(0);

                // Dropping the transaction rolls everything back, the
                // sequence increment included.
                return Err(DbError::Domain(CoreError::InsufficientStock {
                    sku: item.sku_snapshot.clone(),
                    available,
                    requested: item.quantity,
                }));
            }

            items.push(item);
        }

        tx.commit().await?;

        info!(invoice = %bill.invoice_number, total = %totals.total, "Bill created");
        Ok((bill, items))
    }

    /// Gets a bill by invoice number.
    pub async fn get_by_invoice_number(&self, invoice_number: &str) -> DbResult<Option<Bill>> {
        let bill = sqlx::query_as::<_, Bill>(
            r#"
            SELECT id, invoice_number, bill_date, customer_name, customer_phone,
                   employee_id, subtotal_paise, discount_paise, tax_rate_bps,
                   tax_paise, cgst_paise, sgst_paise, total_paise, status, created_at
            FROM bills
            WHERE invoice_number = ?1
            "#,
        )
        .bind(invoice_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bill)
    }

    /// Gets all line items of a bill.
    pub async fn get_items(&self, bill_id: &str) -> DbResult<Vec<BillItem>> {
        let items = sqlx::query_as::<_, BillItem>(
            r#"
            SELECT id, bill_id, variant_id, sku_snapshot, name_snapshot,
                   quantity, unit_price_paise, line_total_paise
            FROM bill_items
            WHERE bill_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(bill_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Searches bills by customer name or invoice number within a date
    /// range, newest first.
    pub async fn search(
        &self,
        term: &str,
        from: NaiveDate,
        to: NaiveDate,
        limit: i64,
    ) -> DbResult<Vec<Bill>> {
        let pattern = format!("%{}%", term.trim());

        let bills = sqlx::query_as::<_, Bill>(
            r#"
            SELECT id, invoice_number, bill_date, customer_name, customer_phone,
                   employee_id, subtotal_paise, discount_paise, tax_rate_bps,
                   tax_paise, cgst_paise, sgst_paise, total_paise, status, created_at
            FROM bills
            WHERE bill_date BETWEEN ?2 AND ?3
              AND (customer_name LIKE ?1 OR invoice_number LIKE ?1)
            ORDER BY bill_date DESC, invoice_number DESC
            LIMIT ?4
            "#,
        )
        .bind(&pattern)
        .bind(from)
        .bind(to)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(bills)
    }

    /// Total revenue of completed bills on a date, in paise.
    pub async fn daily_revenue(&self, date: NaiveDate) -> DbResult<i64> {
        let total: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT SUM(total_paise)
            FROM bills
            WHERE bill_date = ?1 AND status = 'completed'
            "#,
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.unwrap_or(0))
    }

    /// Voids a completed bill. Stock is not restored; voiding only
    /// removes the bill from sales rollups.
    pub async fn void(&self, invoice_number: &str) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE bills SET status = 'voided' WHERE invoice_number = ?1 AND status = 'completed'",
        )
        .bind(invoice_number)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let existing = self.get_by_invoice_number(invoice_number).await?;
            return Err(match existing {
                Some(bill) => DbError::Domain(CoreError::InvalidBillStatus {
                    invoice_number: invoice_number.to_string(),
                    current_status: format!("{:?}", bill.status).to_lowercase(),
                }),
                None => DbError::not_found("Bill", invoice_number),
            });
        }

        info!(invoice = %invoice_number, "Bill voided");
        Ok(())
    }
}

/// Advances the daily counter for `date` and returns the new sequence.
/// First bill of a date gets 1.
async fn next_sequence(tx: &mut Transaction<'_, Sqlite>, date: NaiveDate) -> DbResult<i64> {
    let sequence: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO invoice_sequence (date, last_sequence) VALUES (?1, 1)
        ON CONFLICT(date) DO UPDATE SET last_sequence = last_sequence + 1
        RETURNING last_sequence
        "#,
    )
    .bind(date)
    .fetch_one(&mut **tx)
    .await?;

    Ok(sequence)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::employee::NewEmployee;
    use crate::repository::product::{NewProduct, NewVariant};
    use kirana_core::Role;

    async fn seeded_db() -> (Database, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let employee = db
            .employees()
            .create(NewEmployee {
                emp_id: "EMP001".to_string(),
                first_name: "Asha".to_string(),
                last_name: "Verma".to_string(),
                password: "secret123".to_string(),
                role: Role::Employee,
                contact_number: "9876543210".to_string(),
                email: None,
                aadhar_number: None,
            })
            .await
            .unwrap();

        let brand = db.catalog().create_brand("Tata").await.unwrap();
        let ptype = db.catalog().create_product_type("Staples").await.unwrap();
        db.products()
            .create_with_variants(
                NewProduct {
                    product_name: "Basmati Rice".to_string(),
                    brand_id: brand.id,
                    product_type_id: ptype.id,
                    base_unit: "kg".to_string(),
                    hsn_code: None,
                    description: None,
                },
                vec![NewVariant {
                    variant_name: "500g".to_string(),
                    sku: "RICE-500".to_string(),
                    barcode: None,
                    unit_size: 0.5,
                    size_unit: "kg".to_string(),
                    mrp_paise: 25_000, // ₹250.00
                    cost_price_paise: 20_000,
                    is_default: true,
                    initial_stock: 40,
                    reorder_level: 10,
                    expiry_date: None,
                    batch_number: None,
                }],
            )
            .await
            .unwrap();

        (db, employee.id)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bill_input(employee_id: &str, day: NaiveDate, qty: i64, discount: Money) -> NewBill {
        NewBill {
            bill_date: day,
            customer_name: "Walk-in".to_string(),
            customer_phone: None,
            employee_id: employee_id.to_string(),
            lines: vec![BillLineInput {
                sku: "RICE-500".to_string(),
                quantity: qty,
            }],
            discount,
            tax_rate: TaxRate::from_bps(1800),
            invoice_prefix: "INV".to_string(),
        }
    }

    #[tokio::test]
    async fn test_reference_bill_amounts() {
        let (db, employee_id) = seeded_db().await;

        // 4 × ₹250 = ₹1000, discount ₹100, 18% GST.
        let (bill, items) = db
            .bills()
            .create_bill(bill_input(&employee_id, date(2026, 1, 8), 4, Money::from_rupees(100)))
            .await
            .unwrap();

        assert_eq!(bill.invoice_number, "INV-20260108-0001");
        assert_eq!(bill.subtotal_paise, 100_000);
        assert_eq!(bill.tax_paise, 16_200);
        assert_eq!(bill.cgst_paise, 8_100);
        assert_eq!(bill.sgst_paise, 8_100);
        assert_eq!(bill.total_paise, 106_200);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name_snapshot, "Basmati Rice (500g)");
        assert_eq!(items[0].line_total_paise, 100_000);

        // Stock went 40 → 36.
        let summary = db.products().get_by_sku("RICE-500").await.unwrap().unwrap();
        assert_eq!(summary.stock_quantity, 36);
    }

    #[tokio::test]
    async fn test_invoice_sequence_per_date() {
        let (db, employee_id) = seeded_db().await;
        let repo = db.bills();
        let day1 = date(2026, 1, 8);
        let day2 = date(2026, 1, 9);

        for expected in ["INV-20260108-0001", "INV-20260108-0002", "INV-20260108-0003"] {
            let (bill, _) = repo
                .create_bill(bill_input(&employee_id, day1, 1, Money::zero()))
                .await
                .unwrap();
            assert_eq!(bill.invoice_number, expected);
        }

        // New date resets to 1.
        let (bill, _) = repo
            .create_bill(bill_input(&employee_id, day2, 1, Money::zero()))
            .await
            .unwrap();
        assert_eq!(bill.invoice_number, "INV-20260109-0001");
    }

    #[tokio::test]
    async fn test_oversell_rolls_back_atomically() {
        let (db, employee_id) = seeded_db().await;
        let repo = db.bills();
        let day = date(2026, 1, 8);

        let err = repo
            .create_bill(bill_input(&employee_id, day, 41, Money::zero()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock {
                available: 40,
                requested: 41,
                ..
            })
        ));

        // Stock untouched, no bill rows.
        let summary = db.products().get_by_sku("RICE-500").await.unwrap().unwrap();
        assert_eq!(summary.stock_quantity, 40);
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bills")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);

        // The failed bill did not burn a sequence number.
        let (bill, _) = repo
            .create_bill(bill_input(&employee_id, day, 1, Money::zero()))
            .await
            .unwrap();
        assert_eq!(bill.invoice_number, "INV-20260108-0001");
    }

    #[tokio::test]
    async fn test_exact_stock_sale_allowed() {
        let (db, employee_id) = seeded_db().await;

        // Selling exactly the available quantity drains stock to zero.
        db.bills()
            .create_bill(bill_input(&employee_id, date(2026, 1, 8), 40, Money::zero()))
            .await
            .unwrap();

        let summary = db.products().get_by_sku("RICE-500").await.unwrap().unwrap();
        assert_eq!(summary.stock_quantity, 0);
    }

    #[tokio::test]
    async fn test_unknown_sku_rejected() {
        let (db, employee_id) = seeded_db().await;
        let mut input = bill_input(&employee_id, date(2026, 1, 8), 1, Money::zero());
        input.lines[0].sku = "NOPE".to_string();

        let err = db.bills().create_bill(input).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::VariantNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_excessive_discount_rejected() {
        let (db, employee_id) = seeded_db().await;
        // 1 × ₹250 with ₹300 discount.
        let err = db
            .bills()
            .create_bill(bill_input(&employee_id, date(2026, 1, 8), 1, Money::from_rupees(300)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InvalidDiscount { .. })
        ));
    }

    #[tokio::test]
    async fn test_lookup_search_and_revenue() {
        let (db, employee_id) = seeded_db().await;
        let repo = db.bills();
        let day = date(2026, 1, 8);

        let (created, _) = repo
            .create_bill(bill_input(&employee_id, day, 2, Money::zero()))
            .await
            .unwrap();

        let fetched = repo
            .get_by_invoice_number(&created.invoice_number)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.id, created.id);

        let items = repo.get_items(&created.id).await.unwrap();
        assert_eq!(items.len(), 1);

        let hits = repo.search("Walk", day, day, 10).await.unwrap();
        assert_eq!(hits.len(), 1);

        // 2 × ₹250 at 18% = ₹590.
        assert_eq!(repo.daily_revenue(day).await.unwrap(), 59_000);
    }

    #[tokio::test]
    async fn test_void_excludes_from_revenue() {
        let (db, employee_id) = seeded_db().await;
        let repo = db.bills();
        let day = date(2026, 1, 8);

        let (bill, _) = repo
            .create_bill(bill_input(&employee_id, day, 2, Money::zero()))
            .await
            .unwrap();
        repo.void(&bill.invoice_number).await.unwrap();

        assert_eq!(repo.daily_revenue(day).await.unwrap(), 0);

        // Voiding twice is an InvalidBillStatus.
        let err = repo.void(&bill.invoice_number).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InvalidBillStatus { .. })
        ));
    }
}
