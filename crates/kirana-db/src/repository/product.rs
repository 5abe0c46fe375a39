//! # Product Repository
//!
//! Database operations for products and their variants.
//!
//! ## Creation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_with_variants(product, variants)                                │
//! │                                                                         │
//! │  BEGIN TRANSACTION                                                      │
//! │    1. Allocate product_code (PRD0001, PRD0002, ...)                    │
//! │    2. INSERT product                                                    │
//! │    3. For each variant:                                                 │
//! │         validate pricing (MRP >= cost)                                  │
//! │         INSERT product_variants                                         │
//! │         INSERT inventory (initial stock, reorder level)                 │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any failure (duplicate SKU, bad pricing) rolls the whole thing back.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbResult;
use kirana_core::validation::{
    validate_name, validate_search_term, validate_sku, validate_variant_pricing,
};
use kirana_core::{CoreError, Product, ProductVariant};

// =============================================================================
// Inputs & Read Models
// =============================================================================

/// Input for creating a product line.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub product_name: String,
    pub brand_id: String,
    pub product_type_id: String,
    pub base_unit: String,
    pub hsn_code: Option<String>,
    pub description: Option<String>,
}

/// Input for one variant of a new product, including its opening stock.
#[derive(Debug, Clone)]
pub struct NewVariant {
    pub variant_name: String,
    pub sku: String,
    pub barcode: Option<String>,
    pub unit_size: f64,
    pub size_unit: String,
    pub mrp_paise: i64,
    pub cost_price_paise: i64,
    pub is_default: bool,
    pub initial_stock: i64,
    pub reorder_level: i64,
    pub expiry_date: Option<NaiveDate>,
    pub batch_number: Option<String>,
}

/// Till-facing projection of a variant: what a search hit shows and what
/// billing needs to build a line item.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VariantSummary {
    pub variant_id: String,
    pub sku: String,
    pub product_name: String,
    pub variant_name: String,
    pub brand_name: String,
    pub mrp_paise: i64,
    pub stock_quantity: i64,
}

impl VariantSummary {
    /// Display name for bill lines: "Basmati Rice (500g)".
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.product_name, self.variant_name)
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Creates a product with its variants and opening inventory, all in
    /// one transaction.
    pub async fn create_with_variants(
        &self,
        new: NewProduct,
        variants: Vec<NewVariant>,
    ) -> DbResult<Product> {
        validate_name("product_name", &new.product_name).map_err(CoreError::Validation)?;
        for variant in &variants {
            validate_sku(&variant.sku).map_err(CoreError::Validation)?;
            validate_variant_pricing(variant.mrp_paise, variant.cost_price_paise)
                .map_err(CoreError::Validation)?;
        }

        let mut tx = self.pool.begin().await?;

        // Sequential business code, allocated inside the transaction.
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *tx)
            .await?;
        let product_code = format!("PRD{:04}", count + 1);

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            product_code,
            product_name: new.product_name.trim().to_string(),
            brand_id: new.brand_id,
            product_type_id: new.product_type_id,
            base_unit: new.base_unit,
            hsn_code: new.hsn_code,
            description: new.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        debug!(code = %product.product_code, name = %product.product_name, "Creating product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, product_code, product_name, brand_id, product_type_id,
                base_unit, hsn_code, description, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&product.id)
        .bind(&product.product_code)
        .bind(&product.product_name)
        .bind(&product.brand_id)
        .bind(&product.product_type_id)
        .bind(&product.base_unit)
        .bind(&product.hsn_code)
        .bind(&product.description)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await?;

        for variant in variants {
            let variant_id = Uuid::new_v4().to_string();

            sqlx::query(
                r#"
                INSERT INTO product_variants (
                    id, product_id, variant_name, sku, barcode,
                    unit_size, size_unit, mrp_paise, cost_price_paise,
                    is_default, is_active, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                "#,
            )
            .bind(&variant_id)
            .bind(&product.id)
            .bind(variant.variant_name.trim())
            .bind(variant.sku.trim())
            .bind(&variant.barcode)
            .bind(variant.unit_size)
            .bind(&variant.size_unit)
            .bind(variant.mrp_paise)
            .bind(variant.cost_price_paise)
            .bind(variant.is_default)
            .bind(true)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                r#"
                INSERT INTO inventory (
                    variant_id, stock_quantity, reorder_level,
                    expiry_date, batch_number, last_updated
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(&variant_id)
            .bind(variant.initial_stock)
            .bind(variant.reorder_level)
            .bind(variant.expiry_date)
            .bind(&variant.batch_number)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(code = %product.product_code, "Product created");
        Ok(product)
    }

    /// Gets a product by business code.
    pub async fn get_by_code(&self, product_code: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, product_code, product_name, brand_id, product_type_id,
                   base_unit, hsn_code, description, is_active, created_at, updated_at
            FROM products
            WHERE product_code = ?1
            "#,
        )
        .bind(product_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets the variants of a product.
    pub async fn get_variants(&self, product_id: &str) -> DbResult<Vec<ProductVariant>> {
        let variants = sqlx::query_as::<_, ProductVariant>(
            r#"
            SELECT id, product_id, variant_name, sku, barcode, unit_size, size_unit,
                   mrp_paise, cost_price_paise, is_default, is_active, created_at
            FROM product_variants
            WHERE product_id = ?1 AND is_active = 1
            ORDER BY is_default DESC, variant_name
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(variants)
    }

    /// Looks a sellable variant up by exact SKU.
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Option<VariantSummary>> {
        let summary = sqlx::query_as::<_, VariantSummary>(
            r#"
            SELECT pv.id AS variant_id, pv.sku, p.product_name, pv.variant_name,
                   br.brand_name, pv.mrp_paise, i.stock_quantity
            FROM product_variants pv
            JOIN products p  ON p.id = pv.product_id
            JOIN brands br   ON br.id = p.brand_id
            JOIN inventory i ON i.variant_id = pv.id
            WHERE pv.sku = ?1 AND pv.is_active = 1 AND p.is_active = 1
            "#,
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;

        Ok(summary)
    }

    /// Searches sellable variants by product name, code, or SKU (LIKE).
    pub async fn search(&self, term: &str, limit: i64) -> DbResult<Vec<VariantSummary>> {
        let term = validate_search_term(term).map_err(CoreError::Validation)?;
        let pattern = format!("%{}%", term);

        let hits = sqlx::query_as::<_, VariantSummary>(
            r#"
            SELECT pv.id AS variant_id, pv.sku, p.product_name, pv.variant_name,
                   br.brand_name, pv.mrp_paise, i.stock_quantity
            FROM product_variants pv
            JOIN products p  ON p.id = pv.product_id
            JOIN brands br   ON br.id = p.brand_id
            JOIN inventory i ON i.variant_id = pv.id
            WHERE pv.is_active = 1 AND p.is_active = 1
              AND (p.product_name LIKE ?1 OR p.product_code LIKE ?1 OR pv.sku LIKE ?1)
            ORDER BY p.product_name, pv.variant_name
            LIMIT ?2
            "#,
        )
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(hits)
    }

    /// Counts products (active and inactive).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Soft-deactivates a product and its variants.
    pub async fn deactivate(&self, product_code: &str) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE products SET is_active = 0, updated_at = ?2 WHERE product_code = ?1",
        )
        .bind(product_code)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(crate::error::DbError::not_found("Product", product_code));
        }

        sqlx::query(
            r#"
            UPDATE product_variants SET is_active = 0
            WHERE product_id = (SELECT id FROM products WHERE product_code = ?1)
            "#,
        )
        .bind(product_code)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_catalog(db: &Database) -> (String, String) {
        let brand = db.catalog().create_brand("Tata").await.unwrap();
        let ptype = db.catalog().create_product_type("Staples").await.unwrap();
        (brand.id, ptype.id)
    }

    fn rice_product(brand_id: &str, type_id: &str) -> NewProduct {
        NewProduct {
            product_name: "Basmati Rice".to_string(),
            brand_id: brand_id.to_string(),
            product_type_id: type_id.to_string(),
            base_unit: "kg".to_string(),
            hsn_code: Some("1006".to_string()),
            description: None,
        }
    }

    fn variant(sku: &str, mrp: i64, cost: i64, stock: i64) -> NewVariant {
        NewVariant {
            variant_name: "500g".to_string(),
            sku: sku.to_string(),
            barcode: None,
            unit_size: 0.5,
            size_unit: "kg".to_string(),
            mrp_paise: mrp,
            cost_price_paise: cost,
            is_default: true,
            initial_stock: stock,
            reorder_level: 10,
            expiry_date: None,
            batch_number: None,
        }
    }

    #[tokio::test]
    async fn test_create_with_variants_and_inventory() {
        let db = test_db().await;
        let (brand_id, type_id) = seed_catalog(&db).await;

        let product = db
            .products()
            .create_with_variants(
                rice_product(&brand_id, &type_id),
                vec![variant("RICE-500", 4550, 3200, 40)],
            )
            .await
            .unwrap();

        assert_eq!(product.product_code, "PRD0001");

        let summary = db.products().get_by_sku("RICE-500").await.unwrap().unwrap();
        assert_eq!(summary.product_name, "Basmati Rice");
        assert_eq!(summary.brand_name, "Tata");
        assert_eq!(summary.stock_quantity, 40);
        assert_eq!(summary.display_name(), "Basmati Rice (500g)");
    }

    #[tokio::test]
    async fn test_product_codes_are_sequential() {
        let db = test_db().await;
        let (brand_id, type_id) = seed_catalog(&db).await;
        let repo = db.products();

        let first = repo
            .create_with_variants(
                rice_product(&brand_id, &type_id),
                vec![variant("SKU-A", 1000, 800, 5)],
            )
            .await
            .unwrap();
        let mut second_input = rice_product(&brand_id, &type_id);
        second_input.product_name = "Toor Dal".to_string();
        let second = repo
            .create_with_variants(second_input, vec![variant("SKU-B", 1000, 800, 5)])
            .await
            .unwrap();

        assert_eq!(first.product_code, "PRD0001");
        assert_eq!(second.product_code, "PRD0002");
    }

    #[tokio::test]
    async fn test_duplicate_sku_rolls_back_whole_product() {
        let db = test_db().await;
        let (brand_id, type_id) = seed_catalog(&db).await;
        let repo = db.products();

        repo.create_with_variants(
            rice_product(&brand_id, &type_id),
            vec![variant("RICE-500", 4550, 3200, 40)],
        )
        .await
        .unwrap();

        // Second product reuses the SKU in its second variant; nothing of
        // it must survive.
        let mut input = rice_product(&brand_id, &type_id);
        input.product_name = "Sona Masoori".to_string();
        let err = repo
            .create_with_variants(
                input,
                vec![variant("SONA-500", 3000, 2000, 10), variant("RICE-500", 1000, 800, 5)],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(repo.get_by_sku("SONA-500").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mrp_below_cost_rejected() {
        let db = test_db().await;
        let (brand_id, type_id) = seed_catalog(&db).await;

        let err = db
            .products()
            .create_with_variants(
                rice_product(&brand_id, &type_id),
                vec![variant("RICE-500", 3000, 3200, 40)],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_search_by_name_code_and_sku() {
        let db = test_db().await;
        let (brand_id, type_id) = seed_catalog(&db).await;
        db.products()
            .create_with_variants(
                rice_product(&brand_id, &type_id),
                vec![variant("RICE-500", 4550, 3200, 40)],
            )
            .await
            .unwrap();

        let repo = db.products();
        assert_eq!(repo.search("basmati", 10).await.unwrap().len(), 1);
        assert_eq!(repo.search("PRD0001", 10).await.unwrap().len(), 1);
        assert_eq!(repo.search("RICE", 10).await.unwrap().len(), 1);
        assert_eq!(repo.search("bread", 10).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_deactivated_product_hidden_from_search() {
        let db = test_db().await;
        let (brand_id, type_id) = seed_catalog(&db).await;
        db.products()
            .create_with_variants(
                rice_product(&brand_id, &type_id),
                vec![variant("RICE-500", 4550, 3200, 40)],
            )
            .await
            .unwrap();

        db.products().deactivate("PRD0001").await.unwrap();
        assert!(db.products().get_by_sku("RICE-500").await.unwrap().is_none());
        assert_eq!(db.products().search("basmati", 10).await.unwrap().len(), 0);
    }
}
