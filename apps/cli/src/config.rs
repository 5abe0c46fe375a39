//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;

use kirana_pdf::CompanyProfile;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file path
    pub db_path: String,

    /// Shop name printed on invoices
    pub shop_name: String,

    /// Shop address printed on invoices
    pub shop_address: String,

    /// Shop GSTIN (optional, printed when set)
    pub gstin: Option<String>,

    /// Shop phone (optional, printed when set)
    pub phone: Option<String>,

    /// Invoice number prefix
    pub invoice_prefix: String,

    /// Directory where invoice PDFs are written
    pub invoice_dir: String,
}

impl AppConfig {
    /// Loads configuration from `KIRANA_*` environment variables.
    pub fn load() -> Self {
        AppConfig {
            db_path: env::var("KIRANA_DB_PATH").unwrap_or_else(|_| "./kirana.db".to_string()),

            shop_name: env::var("KIRANA_SHOP_NAME")
                .unwrap_or_else(|_| "Kirana Store".to_string()),

            shop_address: env::var("KIRANA_SHOP_ADDRESS").unwrap_or_default(),

            gstin: env::var("KIRANA_GSTIN").ok().filter(|s| !s.trim().is_empty()),

            phone: env::var("KIRANA_PHONE").ok().filter(|s| !s.trim().is_empty()),

            invoice_prefix: env::var("KIRANA_INVOICE_PREFIX")
                .unwrap_or_else(|_| "INV".to_string()),

            invoice_dir: env::var("KIRANA_INVOICE_DIR")
                .unwrap_or_else(|_| "./invoices".to_string()),
        }
    }

    /// Company profile for the invoice header.
    pub fn company_profile(&self) -> CompanyProfile {
        CompanyProfile {
            shop_name: self.shop_name.clone(),
            address: self.shop_address.clone(),
            gstin: self.gstin.clone(),
            phone: self.phone.clone(),
        }
    }
}
