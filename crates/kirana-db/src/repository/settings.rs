//! # Settings Repository
//!
//! Named tax slabs. Exactly one is active at a time; billing reads the
//! active rate.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use kirana_core::validation::validate_tax_rate_bps;
use kirana_core::{CoreError, TaxRate, TaxSetting};

/// Repository for tax settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Lists all tax slabs, active first.
    pub async fn list_tax_settings(&self) -> DbResult<Vec<TaxSetting>> {
        let settings = sqlx::query_as::<_, TaxSetting>(
            r#"
            SELECT id, tax_name, tax_rate_bps, is_active, created_at
            FROM tax_settings
            ORDER BY is_active DESC, tax_rate_bps DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(settings)
    }

    /// Returns the active tax rate. The migrations bootstrap an active
    /// slab, so a missing one is a data problem, not a normal state.
    pub async fn active_tax_rate(&self) -> DbResult<TaxRate> {
        let bps: Option<i64> =
            sqlx::query_scalar("SELECT tax_rate_bps FROM tax_settings WHERE is_active = 1")
                .fetch_optional(&self.pool)
                .await?;

        match bps {
            Some(bps) => Ok(TaxRate::from_bps(bps as u32)),
            None => Err(DbError::not_found("Active tax setting", "none")),
        }
    }

    /// Activates a slab by name, deactivating the rest. One transaction
    /// so there is never a moment with two active slabs.
    pub async fn activate(&self, tax_name: &str) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE tax_settings SET is_active = 1 WHERE tax_name = ?1")
            .bind(tax_name)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Tax setting", tax_name));
        }

        sqlx::query("UPDATE tax_settings SET is_active = 0 WHERE tax_name != ?1")
            .bind(tax_name)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(tax_name = %tax_name, "Tax setting activated");
        Ok(())
    }

    /// Adds a custom tax slab (inactive until activated).
    pub async fn create(&self, tax_name: &str, tax_rate_bps: u32) -> DbResult<TaxSetting> {
        validate_tax_rate_bps(tax_rate_bps).map_err(CoreError::Validation)?;

        let setting = TaxSetting {
            id: Uuid::new_v4().to_string(),
            tax_name: tax_name.trim().to_string(),
            tax_rate_bps: tax_rate_bps as i64,
            is_active: false,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO tax_settings (id, tax_name, tax_rate_bps, is_active, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&setting.id)
        .bind(&setting.tax_name)
        .bind(setting.tax_rate_bps)
        .bind(setting.is_active)
        .bind(setting.created_at)
        .execute(&self.pool)
        .await?;

        Ok(setting)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
