use anyhow::{Context, Result};
use rusqlite::Connection;
use std::env;
use std::path::PathBuf;

use visa_atlas::{
    insert_records, load_csv, logging, reset_database, setup_database, verify_count, Config,
};

fn main() -> Result<()> {
    logging::init_logging();

    let config = Config::from_env();
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("import") => run_import(&config, &args[1..])?,
        Some("count") => run_count(&config)?,
        _ => print_usage(),
    }

    Ok(())
}

fn run_import(config: &Config, args: &[String]) -> Result<()> {
    let keep = args.iter().any(|a| a == "--keep");
    let csv_path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map(PathBuf::from)
        .unwrap_or_else(|| config.csv_path.clone());

    println!("🗄️  Data Import - CSV → SQLite");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Load CSV
    println!("\n📂 Loading {}...", csv_path.display());
    let import = load_csv(&csv_path)?;
    println!("✓ Loaded {} rows from CSV", import.records.len());
    if import.skipped > 0 {
        println!("⚠ Skipped {} rows with unreadable numbers", import.skipped);
    }

    // 2. Setup database
    println!("\n🔧 Setting up database...");
    let conn = Connection::open(&config.database_path).with_context(|| {
        format!("Failed to open database {}", config.database_path.display())
    })?;
    if keep {
        setup_database(&conn)?;
        println!("✓ Keeping existing rows");
    } else {
        reset_database(&conn)?;
        println!("✓ Database reset");
    }

    // 3. Insert records
    println!("\n💾 Inserting records...");
    let inserted = insert_records(&conn, &import.records)?;
    println!("✓ Inserted {} records", inserted);

    // 4. Verify count
    let count = verify_count(&conn)?;
    println!("\n✅ Database contains {} records", count);

    Ok(())
}

fn run_count(config: &Config) -> Result<()> {
    if !config.database_path.exists() {
        eprintln!("❌ Database not found at {}", config.database_path.display());
        eprintln!("   Run: visa-atlas import");
        std::process::exit(1);
    }

    let conn = Connection::open(&config.database_path)?;
    println!("{}", verify_count(&conn)?);

    Ok(())
}

fn print_usage() {
    println!("visa-atlas {}", visa_atlas::VERSION);
    println!();
    println!("Usage:");
    println!("  visa-atlas import [CSV] [--keep]   Load a CSV export into the database");
    println!("  visa-atlas count                   Print the number of stored records");
    println!();
    println!("Serve the API with: cargo run --bin visa-atlas-server --features server");
}
