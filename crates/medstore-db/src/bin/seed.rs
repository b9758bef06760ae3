//! # Seed Data Generator
//!
//! Populates a database with an operator account and a starter
//! medicine catalogue for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./medstore_dev.db
//! cargo run -p medstore-db --bin seed
//!
//! # Specify database path and admin password
//! cargo run -p medstore-db --bin seed -- --db ./data/medstore.db --password hunter2
//! ```

use std::env;

use medstore_core::NewMedicine;
use medstore_db::{Database, DbConfig};

/// Starter catalogue: (name, company, price, stock).
const CATALOGUE: &[(&str, &str, &str, &str)] = &[
    ("Paracetamol", "GSK", "2.50", "100"),
    ("Ibuprofen", "Reckitt", "4.00", "60"),
    ("Amoxicillin", "Sandoz", "12.75", "40"),
    ("Cetirizine", "UCB", "3.20", "80"),
    ("Omeprazole", "AstraZeneca", "7.90", "50"),
    ("Metformin", "Merck", "5.45", "120"),
    ("Loratadine", "Bayer", "3.99", "70"),
    ("Azithromycin", "Pfizer", "18.00", "25"),
    ("Vitamin C 500mg", "Nature's Bounty", "6.50", "150"),
    ("Oral Rehydration Salts", "WHO Generic", "0.80", "200"),
    ("Salbutamol Inhaler", "Cipla", "9.25", "15"),
    ("Cough Syrup", "Benylin", "5.60", "0"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./medstore_dev.db");
    let mut username = String::from("admin");
    let mut password = String::from("admin");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--user" | "-u" => {
                if i + 1 < args.len() {
                    username = args[i + 1].clone();
                    i += 1;
                }
            }
            "--password" | "-p" => {
                if i + 1 < args.len() {
                    password = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("MedStore Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>        Database file path (default: ./medstore_dev.db)");
                println!("  -u, --user <NAME>      Operator username (default: admin)");
                println!("  -p, --password <PW>    Operator password (default: admin)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 MedStore Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Operator account
    if db.users().get_by_username(&username).await?.is_some() {
        println!("⚠ User '{}' already exists, leaving it alone", username);
    } else {
        db.users().create(&username, &password).await?;
        println!("✓ Created user '{}'", username);
    }

    // Catalogue
    let existing = db.medicines().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} medicines", existing);
        println!("  Skipping catalogue to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Adding medicines...");

    let mut added = 0;
    for (name, company, price, stock) in CATALOGUE {
        let medicine = NewMedicine::parse(name, company, price, stock)?;

        if let Err(e) = db.medicines().insert(&medicine).await {
            eprintln!("Failed to insert {}: {}", name, e);
            continue;
        }

        println!("  + {:<24} {:>8}  stock {}", medicine.name, medicine.price.to_string(), medicine.stock);
        added += 1;
    }

    println!();
    println!("✓ Added {} medicines", added);
    println!("✓ Seed complete!");

    Ok(())
}
