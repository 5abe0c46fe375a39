//! # Supplier Repository
//!
//! Suppliers and their product links (sourcing terms).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use kirana_core::validation::{validate_email, validate_name, validate_phone, validate_rating};
use kirana_core::{CoreError, ProductSupplier, Supplier};

/// Input for creating a supplier.
#[derive(Debug, Clone)]
pub struct NewSupplier {
    pub supplier_name: String,
    pub contact_person: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub gstin: Option<String>,
    pub rating: f64,
}

/// Sourcing terms when linking a product to a supplier.
#[derive(Debug, Clone)]
pub struct SupplierLink {
    pub unit_cost_paise: i64,
    pub lead_time_days: i64,
    pub min_order_qty: i64,
    pub is_preferred: bool,
}

/// Repository for supplier operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Creates a supplier.
    pub async fn create(&self, new: NewSupplier) -> DbResult<Supplier> {
        validate_name("supplier_name", &new.supplier_name).map_err(CoreError::Validation)?;
        validate_phone(&new.phone).map_err(CoreError::Validation)?;
        validate_rating(new.rating).map_err(CoreError::Validation)?;
        if let Some(email) = &new.email {
            validate_email(email).map_err(CoreError::Validation)?;
        }

        let supplier = Supplier {
            id: Uuid::new_v4().to_string(),
            supplier_name: new.supplier_name.trim().to_string(),
            contact_person: new.contact_person,
            phone: new.phone,
            email: new.email,
            gstin: new.gstin,
            rating: new.rating,
            is_active: true,
            created_at: Utc::now(),
        };

        debug!(supplier = %supplier.supplier_name, "Creating supplier");

        sqlx::query(
            r#"
            INSERT INTO suppliers (
                id, supplier_name, contact_person, phone, email, gstin,
                rating, is_active, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&supplier.id)
        .bind(&supplier.supplier_name)
        .bind(&supplier.contact_person)
        .bind(&supplier.phone)
        .bind(&supplier.email)
        .bind(&supplier.gstin)
        .bind(supplier.rating)
        .bind(supplier.is_active)
        .bind(supplier.created_at)
        .execute(&self.pool)
        .await?;

        info!(supplier = %supplier.supplier_name, "Supplier created");
        Ok(supplier)
    }

    /// Lists active suppliers, best-rated first.
    pub async fn list(&self) -> DbResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, supplier_name, contact_person, phone, email, gstin,
                   rating, is_active, created_at
            FROM suppliers
            WHERE is_active = 1
            ORDER BY rating DESC, supplier_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(suppliers)
    }

    /// Gets a supplier by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, supplier_name, contact_person, phone, email, gstin,
                   rating, is_active, created_at
            FROM suppliers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// Links a product to a supplier with sourcing terms.
    /// A second link for the same pair is a `UniqueViolation`.
    pub async fn link_product(
        &self,
        product_id: &str,
        supplier_id: &str,
        link: SupplierLink,
    ) -> DbResult<ProductSupplier> {
        let row = ProductSupplier {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            supplier_id: supplier_id.to_string(),
            unit_cost_paise: link.unit_cost_paise,
            lead_time_days: link.lead_time_days,
            min_order_qty: link.min_order_qty,
            is_preferred: link.is_preferred,
        };

        sqlx::query(
            r#"
            INSERT INTO product_suppliers (
                id, product_id, supplier_id, unit_cost_paise,
                lead_time_days, min_order_qty, is_preferred
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&row.id)
        .bind(&row.product_id)
        .bind(&row.supplier_id)
        .bind(row.unit_cost_paise)
        .bind(row.lead_time_days)
        .bind(row.min_order_qty)
        .bind(row.is_preferred)
        .execute(&self.pool)
        .await?;

        Ok(row)
    }

    /// Lists the supplier links of a product.
    pub async fn links_for_product(&self, product_id: &str) -> DbResult<Vec<ProductSupplier>> {
        let links = sqlx::query_as::<_, ProductSupplier>(
            r#"
            SELECT id, product_id, supplier_id, unit_cost_paise,
                   lead_time_days, min_order_qty, is_preferred
            FROM product_suppliers
            WHERE product_id = ?1
            ORDER BY is_preferred DESC, unit_cost_paise
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    /// Soft-deactivates a supplier.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("UPDATE suppliers SET is_active = 0 WHERE id = ?1 AND is_active = 1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::{NewProduct, NewVariant};

    fn supplier(name: &str, rating: f64) -> NewSupplier {
        NewSupplier {
            supplier_name: name.to_string(),
            contact_person: Some("Ravi".to_string()),
            phone: "9876543210".to_string(),
            email: None,
            gstin: Some("27AAPFU0939F1ZV".to_string()),
            rating,
        }
    }

    fn link() -> SupplierLink {
        SupplierLink {
            unit_cost_paise: 3000,
            lead_time_days: 3,
            min_order_qty: 24,
            is_preferred: true,
        }
    }

    async fn db_with_product() -> (Database, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
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
                    mrp_paise: 4550,
                    cost_price_paise: 3200,
                    is_default: true,
                    initial_stock: 40,
                    reorder_level: 10,
                    expiry_date: None,
                    batch_number: None,
                }],
            )
            .await
            .unwrap();
        (db, product.id)
    }

    #[tokio::test]
    async fn test_create_and_list_by_rating() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.suppliers();

        repo.create(supplier("Mehta Traders", 3.5)).await.unwrap();
        repo.create(supplier("Sharma & Sons", 4.8)).await.unwrap();

        let suppliers = repo.list().await.unwrap();
        assert_eq!(suppliers.len(), 2);
        assert_eq!(suppliers[0].supplier_name, "Sharma & Sons");
    }

    #[tokio::test]
    async fn test_rating_bounds() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.suppliers().create(supplier("Bad", 5.5)).await.is_err());
    }

    #[tokio::test]
    async fn test_link_product_once() {
        let (db, product_id) = db_with_product().await;
        let repo = db.suppliers();
        let s = repo.create(supplier("Mehta Traders", 4.0)).await.unwrap();

        repo.link_product(&product_id, &s.id, link()).await.unwrap();
        let err = repo.link_product(&product_id, &s.id, link()).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        let links = repo.links_for_product(&product_id).await.unwrap();
        assert_eq!(links.len(), 1);
        assert!(links[0].is_preferred);
    }

    #[tokio::test]
    async fn test_link_unknown_product_is_fk_violation() {
        let (db, _) = db_with_product().await;
        let repo = db.suppliers();
        let s = repo.create(supplier("Mehta Traders", 4.0)).await.unwrap();

        let err = repo.link_product("missing", &s.id, link()).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
