//! # Seed Data Generator
//!
//! Populates the database with users, stores, warehouses and products for
//! local runs.
//!
//! ## Usage
//! ```bash
//! # Seed the configured database (RETAIL_DATABASE_PATH, default ./retail.db)
//! cargo run -p retail-service --bin seed
//!
//! # Specify database path
//! cargo run -p retail-service --bin seed -- --db ./data/retail.db
//! ```
//!
//! ## Generated Data
//! - One admin (`admin` / `admin`)
//! - One manager per store (`manager1` / `pw`, ...)
//! - A handful of customers (`customer1` / `pw`, ...)
//! - Stores spread over the 100x100 plane, each carrying every catalog item
//! - Three warehouses

use chrono::NaiveDate;
use std::env;
use std::time::Instant;

use retail_core::{Coordinates, Product, Role};
use retail_db::Database;
use retail_service::telemetry::init_tracing;
use retail_service::ServiceConfig;

/// (name, latitude, longitude) of each seeded store
const STORES: &[(&str, f64, f64)] = &[
    ("Downtown", 10.0, 35.0),
    ("Riverside", 25.0, 20.0),
    ("Hilltop", 60.0, 60.0),
    ("Harbor", 85.0, 15.0),
    ("Old Mill", 45.0, 90.0),
];

/// (product name, price in cents)
const CATALOG: &[(&str, i64)] = &[
    ("Apples", 99),
    ("Bread", 249),
    ("Coffee", 899),
    ("Eggs", 329),
    ("Milk", 199),
    ("Pasta", 149),
    ("Rice", 279),
    ("Widget", 1250),
];

const WAREHOUSES: &[(&str, f64, f64)] = &[
    ("North", 20.0, 80.0),
    ("Central", 50.0, 50.0),
    ("South", 80.0, 20.0),
];

const CUSTOMERS: &[(f64, f64)] = &[(10.0, 10.0), (30.0, 30.0), (55.0, 70.0), (90.0, 10.0)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ServiceConfig::load()?;
    init_tracing(&config.log_filter);

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Retail Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $RETAIL_DATABASE_PATH or ./retail.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Retail Seed Data Generator");
    println!("============================");
    println!("Database: {}", config.database_path.display());
    println!();

    let db = Database::new(config.db_config()).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.stores().list_all().await?.len();
    if existing > 0 {
        println!("⚠ Database already has {} stores", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = Instant::now();
    let established = NaiveDate::from_ymd_opt(2015, 3, 1).ok_or("invalid seed date")?;

    db.users()
        .insert("admin", "admin", Coordinates::new(50.0, 50.0)?, Role::Admin)
        .await?;

    let mut products = 0;
    for (idx, (name, lat, lon)) in STORES.iter().enumerate() {
        let location = Coordinates::new(*lat, *lon)?;
        let manager = db
            .users()
            .insert(&format!("manager{}", idx + 1), "pw", location, Role::Manager)
            .await?;
        let store = db.stores().insert(name, location, manager, established).await?;

        for (item_idx, (product_name, price)) in CATALOG.iter().enumerate() {
            let product = Product {
                store_id: store,
                product_name: product_name.to_string(),
                units_in_stock: ((idx * 7 + item_idx * 13) % 50) as i64 + 5,
                price_per_unit_cents: *price,
            };
            db.products().insert(&product).await?;
            products += 1;
        }
    }

    for (idx, (lat, lon)) in CUSTOMERS.iter().enumerate() {
        db.users()
            .insert(
                &format!("customer{}", idx + 1),
                "pw",
                Coordinates::new(*lat, *lon)?,
                Role::Customer,
            )
            .await?;
    }

    for (area, lat, lon) in WAREHOUSES {
        db.warehouses().insert(area, Coordinates::new(*lat, *lon)?).await?;
    }

    println!();
    println!(
        "✓ Seeded {} stores, {} products, {} warehouses, {} users in {:?}",
        STORES.len(),
        products,
        WAREHOUSES.len(),
        1 + STORES.len() + CUSTOMERS.len(),
        start.elapsed()
    );
    println!("  Log in as admin/admin, manager1/pw or customer1/pw");

    Ok(())
}
