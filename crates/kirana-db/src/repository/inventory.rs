//! # Inventory Repository
//!
//! Stock levels per variant. Sale-time decrements happen inside the bill
//! transaction (see the bill repository); everything here is the
//! goods-inward and stock-take side.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use kirana_core::validation::validate_quantity;
use kirana_core::{CoreError, InventoryRecord};

/// A low/out-of-stock row for the reorder report.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReorderRow {
    pub sku: String,
    pub product_name: String,
    pub variant_name: String,
    pub stock_quantity: i64,
    pub reorder_level: i64,
}

/// Repository for inventory operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Gets the inventory record for a variant.
    pub async fn get(&self, variant_id: &str) -> DbResult<Option<InventoryRecord>> {
        let record = sqlx::query_as::<_, InventoryRecord>(
            r#"
            SELECT variant_id, stock_quantity, reorder_level,
                   expiry_date, batch_number, last_updated
            FROM inventory
            WHERE variant_id = ?1
            "#,
        )
        .bind(variant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Receives stock: increments quantity, optionally updating the batch
    /// and expiry of the goods received.
    pub async fn restock(
        &self,
        variant_id: &str,
        quantity: i64,
        batch_number: Option<&str>,
        expiry_date: Option<NaiveDate>,
    ) -> DbResult<()> {
        validate_quantity(quantity).map_err(CoreError::Validation)?;

        debug!(variant_id = %variant_id, quantity, "Receiving stock");

        let result = sqlx::query(
            r#"
            UPDATE inventory SET
                stock_quantity = stock_quantity + ?2,
                batch_number = COALESCE(?3, batch_number),
                expiry_date = COALESCE(?4, expiry_date),
                last_updated = ?5
            WHERE variant_id = ?1
            "#,
        )
        .bind(variant_id)
        .bind(quantity)
        .bind(batch_number)
        .bind(expiry_date)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Inventory", variant_id));
        }

        info!(variant_id = %variant_id, quantity, "Stock received");
        Ok(())
    }

    /// Sets the absolute stock quantity (stock-take correction).
    /// Unlike restock this may set any non-negative value, including zero.
    pub async fn adjust(&self, variant_id: &str, new_quantity: i64) -> DbResult<()> {
        if new_quantity < 0 {
            return Err(DbError::Domain(CoreError::Validation(
                kirana_core::ValidationError::MustBePositive {
                    field: "stock_quantity".to_string(),
                },
            )));
        }

        let result = sqlx::query(
            r#"
            UPDATE inventory SET stock_quantity = ?2, last_updated = ?3
            WHERE variant_id = ?1
            "#,
        )
        .bind(variant_id)
        .bind(new_quantity)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Inventory", variant_id));
        }

        info!(variant_id = %variant_id, new_quantity, "Stock adjusted");
        Ok(())
    }

    /// Sets the reorder level for a variant.
    pub async fn set_reorder_level(&self, variant_id: &str, reorder_level: i64) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE inventory SET reorder_level = ?2, last_updated = ?3
            WHERE variant_id = ?1
            "#,
        )
        .bind(variant_id)
        .bind(reorder_level)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Inventory", variant_id));
        }

        Ok(())
    }

    /// Lists variants at or below their reorder level, most urgent first.
    pub async fn low_stock(&self) -> DbResult<Vec<ReorderRow>> {
        let rows = sqlx::query_as::<_, ReorderRow>(
            r#"
            SELECT pv.sku, p.product_name, pv.variant_name,
                   i.stock_quantity, i.reorder_level
            FROM inventory i
            JOIN product_variants pv ON pv.id = i.variant_id
            JOIN products p ON p.id = pv.product_id
            WHERE pv.is_active = 1 AND p.is_active = 1
              AND i.stock_quantity <= i.reorder_level
            ORDER BY i.stock_quantity - i.reorder_level, pv.sku
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
