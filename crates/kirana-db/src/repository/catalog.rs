//! # Catalog Repository
//!
//! Brands and product types. Small lookup tables that products hang off.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use kirana_core::validation::validate_name;
use kirana_core::{Brand, CoreError, ProductType};

/// Repository for brand and product-type operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    // =========================================================================
    // Brands
    // =========================================================================

    /// Creates a brand. Duplicate names surface as `UniqueViolation`.
    pub async fn create_brand(&self, brand_name: &str) -> DbResult<Brand> {
        validate_name("brand_name", brand_name).map_err(CoreError::Validation)?;

        let brand = Brand {
            id: Uuid::new_v4().to_string(),
            brand_name: brand_name.trim().to_string(),
            is_active: true,
            created_at: Utc::now(),
        };

        debug!(brand = %brand.brand_name, "Creating brand");

        sqlx::query(
            "INSERT INTO brands (id, brand_name, is_active, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&brand.id)
        .bind(&brand.brand_name)
        .bind(brand.is_active)
        .bind(brand.created_at)
        .execute(&self.pool)
        .await?;

        Ok(brand)
    }

    /// Lists active brands, alphabetical.
    pub async fn list_brands(&self) -> DbResult<Vec<Brand>> {
        let brands = sqlx::query_as::<_, Brand>(
            "SELECT id, brand_name, is_active, created_at FROM brands WHERE is_active = 1 ORDER BY brand_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(brands)
    }

    /// Looks a brand up by exact name.
    pub async fn get_brand_by_name(&self, brand_name: &str) -> DbResult<Option<Brand>> {
        let brand = sqlx::query_as::<_, Brand>(
            "SELECT id, brand_name, is_active, created_at FROM brands WHERE brand_name = ?1",
        )
        .bind(brand_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(brand)
    }

    /// Soft-deactivates a brand.
    pub async fn deactivate_brand(&self, brand_name: &str) -> DbResult<()> {
        let result =
            sqlx::query("UPDATE brands SET is_active = 0 WHERE brand_name = ?1 AND is_active = 1")
                .bind(brand_name)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Brand", brand_name));
        }

        Ok(())
    }

    // =========================================================================
    // Product Types
    // =========================================================================

    /// Creates a product type at the end of the display order.
    pub async fn create_product_type(&self, type_name: &str) -> DbResult<ProductType> {
        validate_name("type_name", type_name).map_err(CoreError::Validation)?;

        let next_order: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(display_order), 0) + 1 FROM product_types")
                .fetch_one(&self.pool)
                .await?;

        let product_type = ProductType {
            id: Uuid::new_v4().to_string(),
            type_name: type_name.trim().to_string(),
            display_order: next_order,
            is_active: true,
            created_at: Utc::now(),
        };

        debug!(type_name = %product_type.type_name, "Creating product type");

        sqlx::query(
            r#"
            INSERT INTO product_types (id, type_name, display_order, is_active, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&product_type.id)
        .bind(&product_type.type_name)
        .bind(product_type.display_order)
        .bind(product_type.is_active)
        .bind(product_type.created_at)
        .execute(&self.pool)
        .await?;

        Ok(product_type)
    }

    /// Lists active product types in display order.
    pub async fn list_product_types(&self) -> DbResult<Vec<ProductType>> {
        let types = sqlx::query_as::<_, ProductType>(
            r#"
            SELECT id, type_name, display_order, is_active, created_at
            FROM product_types
            WHERE is_active = 1
            ORDER BY display_order
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(types)
    }

    /// Looks a product type up by exact name.
    pub async fn get_product_type_by_name(&self, type_name: &str) -> DbResult<Option<ProductType>> {
        let product_type = sqlx::query_as::<_, ProductType>(
            r#"
            SELECT id, type_name, display_order, is_active, created_at
            FROM product_types
            WHERE type_name = ?1
            "#,
        )
        .bind(type_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product_type)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
