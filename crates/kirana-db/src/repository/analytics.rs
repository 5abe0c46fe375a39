//! # Analytics Repository
//!
//! Read-only queries over the reporting views, plus KPI composition with
//! the date-range helpers from kirana-core.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  bills / bill_items / inventory / product_suppliers                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQL views (002_analytics_views.sql)                                   │
//! │    views_sales_daily, views_sales_by_type, views_sales_by_brand,       │
//! │    views_inventory_health, views_profitability,                        │
//! │    views_supplier_performance                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  THIS REPOSITORY: range filters + aggregation into report rows         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kirana-core::analytics: previous period, growth percent               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::DbResult;
use chrono::NaiveDate;
use kirana_core::analytics::{growth_percent, previous_period, DateRange};

// =============================================================================
// Report Rows
// =============================================================================

/// One date's sales rollup.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DailySalesRow {
    pub bill_date: NaiveDate,
    pub bill_count: i64,
    pub gross_revenue_paise: i64,
    pub tax_paise: i64,
    pub discount_paise: i64,
    pub avg_bill_paise: i64,
}

/// Units/revenue per product type or brand over a range.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CategorySalesRow {
    pub label: String,
    pub units_sold: i64,
    pub revenue_paise: i64,
}

/// One variant's stock picture from `views_inventory_health`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct InventoryHealthRow {
    pub variant_id: String,
    pub product_name: String,
    pub variant_name: String,
    pub sku: String,
    pub brand: String,
    pub product_type: String,
    pub stock_quantity: i64,
    pub reorder_level: i64,
    pub expiry_date: Option<NaiveDate>,
    pub stock_value_paise: i64,
    pub stock_status: String,
    pub expiring_soon: bool,
}

/// One variant's margin from `views_profitability`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProfitabilityRow {
    pub variant_id: String,
    pub product_name: String,
    pub variant_name: String,
    pub sku: String,
    pub mrp_paise: i64,
    pub cost_price_paise: i64,
    pub margin_percent: f64,
}

/// One supplier's sourcing rollup from `views_supplier_performance`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SupplierPerformanceRow {
    pub supplier_id: String,
    pub supplier_name: String,
    pub rating: f64,
    pub product_count: i64,
    pub min_lead_time_days: i64,
    pub avg_lead_time_days: f64,
    pub max_lead_time_days: i64,
    pub preferred_count: i64,
    pub avg_unit_cost_paise: i64,
}

/// Sales KPIs for a range, with period-over-period growth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesKpis {
    pub revenue_paise: i64,
    pub bill_count: i64,
    pub avg_bill_paise: i64,
    pub revenue_growth_percent: f64,
    pub bill_count_growth_percent: f64,
}

/// Counts per stock status for the inventory dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryKpis {
    pub total_variants: i64,
    pub out_of_stock: i64,
    pub low: i64,
    pub overstock: i64,
    pub expired: i64,
    pub expiring_soon: i64,
    pub stock_value_paise: i64,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for analytics queries. Strictly read-only.
#[derive(Debug, Clone)]
pub struct AnalyticsRepository {
    pool: SqlitePool,
}

impl AnalyticsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        AnalyticsRepository { pool }
    }

    /// Per-date sales within a range, oldest first.
    pub async fn sales_daily(&self, range: DateRange) -> DbResult<Vec<DailySalesRow>> {
        let rows = sqlx::query_as::<_, DailySalesRow>(
            r#"
            SELECT bill_date, bill_count, gross_revenue_paise,
                   tax_paise, discount_paise, avg_bill_paise
            FROM views_sales_daily
            WHERE bill_date BETWEEN ?1 AND ?2
            ORDER BY bill_date
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// (revenue_paise, bill_count) for a range.
    async fn sales_totals(&self, range: DateRange) -> DbResult<(i64, i64)> {
        let row: (Option<i64>, Option<i64>) = sqlx::query_as(
            r#"
            SELECT SUM(gross_revenue_paise), SUM(bill_count)
            FROM views_sales_daily
            WHERE bill_date BETWEEN ?1 AND ?2
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_one(&self.pool)
        .await?;

        Ok((row.0.unwrap_or(0), row.1.unwrap_or(0)))
    }

    /// Sales KPIs with growth against the immediately preceding period
    /// of equal length.
    pub async fn sales_kpis(&self, range: DateRange) -> DbResult<SalesKpis> {
        let (revenue, bills) = self.sales_totals(range).await?;
        let (prev_revenue, prev_bills) = self.sales_totals(previous_period(range)).await?;

        Ok(SalesKpis {
            revenue_paise: revenue,
            bill_count: bills,
            avg_bill_paise: if bills > 0 { revenue / bills } else { 0 },
            revenue_growth_percent: growth_percent(revenue, prev_revenue),
            bill_count_growth_percent: growth_percent(bills, prev_bills),
        })
    }

    /// Revenue per product type within a range, highest first.
    pub async fn sales_by_type(&self, range: DateRange) -> DbResult<Vec<CategorySalesRow>> {
        let rows = sqlx::query_as::<_, CategorySalesRow>(
            r#"
            SELECT product_type AS label,
                   SUM(units_sold) AS units_sold,
                   SUM(revenue_paise) AS revenue_paise
            FROM views_sales_by_type
            WHERE bill_date BETWEEN ?1 AND ?2
            GROUP BY product_type
            ORDER BY revenue_paise DESC
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Revenue per brand within a range, highest first.
    pub async fn sales_by_brand(&self, range: DateRange) -> DbResult<Vec<CategorySalesRow>> {
        let rows = sqlx::query_as::<_, CategorySalesRow>(
            r#"
            SELECT brand AS label,
                   SUM(units_sold) AS units_sold,
                   SUM(revenue_paise) AS revenue_paise
            FROM views_sales_by_brand
            WHERE bill_date BETWEEN ?1 AND ?2
            GROUP BY brand
            ORDER BY revenue_paise DESC
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Full per-variant inventory picture, worst status first.
    pub async fn inventory_health(&self) -> DbResult<Vec<InventoryHealthRow>> {
        let rows = sqlx::query_as::<_, InventoryHealthRow>(
            r#"
            SELECT variant_id, product_name, variant_name, sku, brand,
                   product_type, stock_quantity, reorder_level, expiry_date,
                   stock_value_paise, stock_status, expiring_soon
            FROM views_inventory_health
            ORDER BY CASE stock_status
                WHEN 'EXPIRED' THEN 0
                WHEN 'OUT_OF_STOCK' THEN 1
                WHEN 'LOW' THEN 2
                WHEN 'OVERSTOCK' THEN 3
                ELSE 4
            END, sku
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Status counts and total stock value for the dashboard.
    pub async fn inventory_kpis(&self) -> DbResult<InventoryKpis> {
        let rows = self.inventory_health().await?;

        let mut kpis = InventoryKpis {
            total_variants: rows.len() as i64,
            ..Default::default()
        };
        for row in &rows {
            match row.stock_status.as_str() {
                "EXPIRED" => kpis.expired += 1,
                "OUT_OF_STOCK" => kpis.out_of_stock += 1,
                "LOW" => kpis.low += 1,
                "OVERSTOCK" => kpis.overstock += 1,
                _ => {}
            }
            if row.expiring_soon {
                kpis.expiring_soon += 1;
            }
            kpis.stock_value_paise += row.stock_value_paise;
        }

        Ok(kpis)
    }

    /// Per-variant margins, best first.
    pub async fn profitability(&self) -> DbResult<Vec<ProfitabilityRow>> {
        let rows = sqlx::query_as::<_, ProfitabilityRow>(
            r#"
            SELECT variant_id, product_name, variant_name, sku,
                   mrp_paise, cost_price_paise, margin_percent
            FROM views_profitability
            ORDER BY margin_percent DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Per-supplier sourcing rollups, best-rated first.
    pub async fn supplier_performance(&self) -> DbResult<Vec<SupplierPerformanceRow>> {
        let rows = sqlx::query_as::<_, SupplierPerformanceRow>(
            r#"
            SELECT supplier_id, supplier_name, rating, product_count,
                   min_lead_time_days, avg_lead_time_days, max_lead_time_days,
                   preferred_count, avg_unit_cost_paise
            FROM views_supplier_performance
            ORDER BY rating DESC, supplier_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::bill::{BillLineInput, NewBill};
    use crate::repository::employee::NewEmployee;
    use crate::repository::product::{NewProduct, NewVariant};
    use crate::repository::supplier::{NewSupplier, SupplierLink};
    use kirana_core::{Money, Role, TaxRate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seeded_db() -> (Database, String, String) {
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
        let product = db
            .products()
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
                    mrp_paise: 10_000, // ₹100
                    cost_price_paise: 7_500,
                    is_default: true,
                    initial_stock: 100,
                    reorder_level: 10,
                    expiry_date: None,
                    batch_number: None,
                }],
            )
            .await
            .unwrap();

        (db, employee.id, product.id)
    }

    async fn make_bill(db: &Database, employee_id: &str, day: NaiveDate, qty: i64) {
        db.bills()
            .create_bill(NewBill {
                bill_date: day,
                customer_name: "Walk-in".to_string(),
                customer_phone: None,
                employee_id: employee_id.to_string(),
                lines: vec![BillLineInput {
                    sku: "RICE-500".to_string(),
                    quantity: qty,
                }],
                discount: Money::zero(),
                tax_rate: TaxRate::zero(),
                invoice_prefix: "INV".to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_sales_daily_and_kpis() {
        let (db, employee_id, _) = seeded_db().await;
        let repo = db.analytics();

        // Two bills in the current week, one the week before.
        make_bill(&db, &employee_id, date(2026, 1, 7), 2).await; // ₹200
        make_bill(&db, &employee_id, date(2026, 1, 8), 3).await; // ₹300
        make_bill(&db, &employee_id, date(2026, 1, 1), 1).await; // ₹100 (prev period)

        let range = DateRange::new(date(2026, 1, 2), date(2026, 1, 8));
        let daily = repo.sales_daily(range).await.unwrap();
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].bill_date, date(2026, 1, 7));
        assert_eq!(daily[0].gross_revenue_paise, 20_000);

        let kpis = repo.sales_kpis(range).await.unwrap();
        assert_eq!(kpis.revenue_paise, 50_000);
        assert_eq!(kpis.bill_count, 2);
        assert_eq!(kpis.avg_bill_paise, 25_000);
        // ₹500 now vs ₹100 before = +400%.
        assert_eq!(kpis.revenue_growth_percent, 400.0);
    }

    #[tokio::test]
    async fn test_sales_by_type_and_brand() {
        let (db, employee_id, _) = seeded_db().await;
        make_bill(&db, &employee_id, date(2026, 1, 8), 5).await;

        let range = DateRange::new(date(2026, 1, 1), date(2026, 1, 31));
        let by_type = db.analytics().sales_by_type(range).await.unwrap();
        assert_eq!(by_type.len(), 1);
        assert_eq!(by_type[0].label, "Staples");
        assert_eq!(by_type[0].units_sold, 5);
        assert_eq!(by_type[0].revenue_paise, 50_000);

        let by_brand = db.analytics().sales_by_brand(range).await.unwrap();
        assert_eq!(by_brand[0].label, "Tata");
    }

    #[tokio::test]
    async fn test_voided_bills_excluded() {
        let (db, employee_id, _) = seeded_db().await;
        let day = date(2026, 1, 8);
        make_bill(&db, &employee_id, day, 5).await;
        db.bills().void("INV-20260108-0001").await.unwrap();

        let range = DateRange::new(day, day);
        let kpis = db.analytics().sales_kpis(range).await.unwrap();
        assert_eq!(kpis.revenue_paise, 0);
        assert!(db.analytics().sales_by_type(range).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_inventory_health_and_kpis() {
        let (db, _, _) = seeded_db().await;

        let rows = db.analytics().inventory_health().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].stock_status, "OVERSTOCK"); // 100 > 10 × 5
        assert_eq!(rows[0].stock_value_paise, 100 * 7_500);

        let kpis = db.analytics().inventory_kpis().await.unwrap();
        assert_eq!(kpis.total_variants, 1);
        assert_eq!(kpis.overstock, 1);
        assert_eq!(kpis.stock_value_paise, 750_000);
    }

    #[tokio::test]
    async fn test_profitability_margin() {
        let (db, _, _) = seeded_db().await;

        let rows = db.analytics().profitability().await.unwrap();
        assert_eq!(rows.len(), 1);
        // (10000 - 7500) / 10000 × 100 = 25%.
        assert_eq!(rows[0].margin_percent, 25.0);
    }

    #[tokio::test]
    async fn test_supplier_performance_rollup() {
        let (db, _, product_id) = seeded_db().await;

        let supplier = db
            .suppliers()
            .create(NewSupplier {
                supplier_name: "Mehta Traders".to_string(),
                contact_person: None,
                phone: "9876543210".to_string(),
                email: None,
                gstin: None,
                rating: 4.5,
            })
            .await
            .unwrap();
        db.suppliers()
            .link_product(
                &product_id,
                &supplier.id,
                SupplierLink {
                    unit_cost_paise: 7_000,
                    lead_time_days: 4,
                    min_order_qty: 24,
                    is_preferred: true,
                },
            )
            .await
            .unwrap();

        let rows = db.analytics().supplier_performance().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_count, 1);
        assert_eq!(rows[0].preferred_count, 1);
        assert_eq!(rows[0].avg_lead_time_days, 4.0);
        assert_eq!(rows[0].avg_unit_cost_paise, 7_000);
    }

    #[tokio::test]
    async fn test_supplier_with_no_links_still_reported() {
        let (db, _, _) = seeded_db().await;
        db.suppliers()
            .create(NewSupplier {
                supplier_name: "New Supplier".to_string(),
                contact_person: None,
                phone: "9876543210".to_string(),
                email: None,
                gstin: None,
                rating: 0.0,
            })
            .await
            .unwrap();

        let rows = db.analytics().supplier_performance().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_count, 0);
        assert_eq!(rows[0].avg_lead_time_days, 0.0);
    }
}
