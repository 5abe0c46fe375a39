//! # Seed Data Generator
//!
//! Populates the database with a starter catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p kirana-db --bin seed
//!
//! # Specify database path
//! cargo run -p kirana-db --bin seed -- --db ./data/kirana.db
//! ```
//!
//! ## Generated Data
//! - One admin (ADMIN01 / admin123) and one billing employee (EMP001 / emp12345)
//! - Brands, product types, and a grocery catalog with variants and stock
//! - Two suppliers linked to the first products

use std::env;

use kirana_core::Role;
use kirana_db::repository::employee::NewEmployee;
use kirana_db::repository::product::{NewProduct, NewVariant};
use kirana_db::repository::supplier::{NewSupplier, SupplierLink};
use kirana_db::{Database, DbConfig};

/// Brands to create.
const BRANDS: &[&str] = &["Tata", "Amul", "Britannia", "Parle", "Fortune", "Aashirvaad"];

/// Product types in display order.
const PRODUCT_TYPES: &[&str] = &["Staples", "Dairy", "Snacks", "Beverages", "Personal Care"];

/// Catalog rows: (name, brand, type, base unit, variants).
/// Variant: (name, sku, size, unit, mrp paise, cost paise, stock, reorder).
const CATALOG: &[(&str, &str, &str, &str, &[(&str, &str, f64, &str, i64, i64, i64, i64)])] = &[
    (
        "Basmati Rice",
        "Fortune",
        "Staples",
        "kg",
        &[
            ("1kg", "RICE-1000", 1.0, "kg", 14_500, 11_000, 60, 10),
            ("5kg", "RICE-5000", 5.0, "kg", 68_000, 52_000, 25, 5),
        ],
    ),
    (
        "Whole Wheat Atta",
        "Aashirvaad",
        "Staples",
        "kg",
        &[("5kg", "ATTA-5000", 5.0, "kg", 27_500, 22_000, 40, 8)],
    ),
    (
        "Toned Milk",
        "Amul",
        "Dairy",
        "l",
        &[
            ("500ml", "MILK-500", 0.5, "l", 2_700, 2_300, 80, 20),
            ("1l", "MILK-1000", 1.0, "l", 5_400, 4_600, 50, 15),
        ],
    ),
    (
        "Salted Butter",
        "Amul",
        "Dairy",
        "g",
        &[("100g", "BUTR-100", 100.0, "g", 6_000, 5_100, 30, 6)],
    ),
    (
        "Marie Gold Biscuits",
        "Britannia",
        "Snacks",
        "g",
        &[("250g", "BISC-250", 250.0, "g", 3_500, 2_700, 90, 20)],
    ),
    (
        "Parle-G",
        "Parle",
        "Snacks",
        "g",
        &[("800g", "PARG-800", 800.0, "g", 8_000, 6_400, 70, 15)],
    ),
    (
        "Premium Tea",
        "Tata",
        "Beverages",
        "g",
        &[
            ("250g", "TEA-250", 250.0, "g", 15_000, 11_500, 35, 8),
            ("500g", "TEA-500", 500.0, "g", 28_500, 22_000, 20, 5),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./kirana.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kirana POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kirana.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Kirana POS Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Creating employees...");
    db.employees()
        .create(NewEmployee {
            emp_id: "ADMIN01".to_string(),
            first_name: "Suresh".to_string(),
            last_name: "Gupta".to_string(),
            password: "admin123".to_string(),
            role: Role::Admin,
            contact_number: "9876543210".to_string(),
            email: Some("owner@kirana.example".to_string()),
            aadhar_number: None,
        })
        .await?;
    db.employees()
        .create(NewEmployee {
            emp_id: "EMP001".to_string(),
            first_name: "Asha".to_string(),
            last_name: "Verma".to_string(),
            password: "emp12345".to_string(),
            role: Role::Employee,
            contact_number: "9123456780".to_string(),
            email: None,
            aadhar_number: None,
        })
        .await?;
    println!("  ADMIN01 (admin123), EMP001 (emp12345)");

    println!();
    println!("Creating catalog...");
    for name in BRANDS {
        db.catalog().create_brand(name).await?;
    }
    for name in PRODUCT_TYPES {
        db.catalog().create_product_type(name).await?;
    }

    let mut product_ids = Vec::new();
    for (name, brand_name, type_name, base_unit, variants) in CATALOG {
        let brand = db
            .catalog()
            .get_brand_by_name(brand_name)
            .await?
            .ok_or_else(|| format!("missing brand {}", brand_name))?;
        let ptype = db
            .catalog()
            .get_product_type_by_name(type_name)
            .await?
            .ok_or_else(|| format!("missing product type {}", type_name))?;

        let new_variants = variants
            .iter()
            .enumerate()
            .map(
                |(idx, (vname, sku, size, unit, mrp, cost, stock, reorder))| NewVariant {
                    variant_name: vname.to_string(),
                    sku: sku.to_string(),
                    barcode: None,
                    unit_size: *size,
                    size_unit: unit.to_string(),
                    mrp_paise: *mrp,
                    cost_price_paise: *cost,
                    is_default: idx == 0,
                    initial_stock: *stock,
                    reorder_level: *reorder,
                    expiry_date: None,
                    batch_number: None,
                },
            )
            .collect();

        let product = db
            .products()
            .create_with_variants(
                NewProduct {
                    product_name: name.to_string(),
                    brand_id: brand.id,
                    product_type_id: ptype.id,
                    base_unit: base_unit.to_string(),
                    hsn_code: None,
                    description: None,
                },
                new_variants,
            )
            .await?;
        product_ids.push(product.id);
        println!("  {} ({} variants)", name, variants.len());
    }

    println!();
    println!("Creating suppliers...");
    let mehta = db
        .suppliers()
        .create(NewSupplier {
            supplier_name: "Mehta Traders".to_string(),
            contact_person: Some("Ravi Mehta".to_string()),
            phone: "9876501234".to_string(),
            email: Some("sales@mehtatraders.example".to_string()),
            gstin: Some("27AAPFU0939F1ZV".to_string()),
            rating: 4.5,
        })
        .await?;
    let sharma = db
        .suppliers()
        .create(NewSupplier {
            supplier_name: "Sharma Distributors".to_string(),
            contact_person: Some("Neha Sharma".to_string()),
            phone: "9876509876".to_string(),
            email: None,
            gstin: None,
            rating: 4.0,
        })
        .await?;

    if let Some(first) = product_ids.first() {
        db.suppliers()
            .link_product(
                first,
                &mehta.id,
                SupplierLink {
                    unit_cost_paise: 10_500,
                    lead_time_days: 3,
                    min_order_qty: 20,
                    is_preferred: true,
                },
            )
            .await?;
        db.suppliers()
            .link_product(
                first,
                &sharma.id,
                SupplierLink {
                    unit_cost_paise: 10_900,
                    lead_time_days: 5,
                    min_order_qty: 10,
                    is_preferred: false,
                },
            )
            .await?;
    }

    let total = db.products().count().await?;
    println!();
    println!("✓ Seed complete: {} products", total);

    Ok(())
}
