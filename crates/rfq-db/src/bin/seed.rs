//! # Seed Data Generator
//!
//! Populates the database with demo RFQs for development.
//!
//! ## Usage
//! ```bash
//! # Generate 25 RFQs (default)
//! cargo run -p rfq-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p rfq-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p rfq-db --bin seed -- --db ./data/rfq.db
//! ```
//!
//! ## Generated RFQs
//! Each RFQ gets:
//! - Quote number: `Q-{YEAR}-{INDEX}`
//! - A customer drawn from a fixed list of companies
//! - 1 to 8 line items with fractional quantities on every third line
//! - Empty dates on every fifth RFQ, to exercise the "no date" path

use rfq_core::{Customer, Decimal, Rfq, RfqItem};
use rfq_db::{Database, DbConfig};
use std::env;

/// (name, address, phone, email)
const CUSTOMERS: &[(&str, &str, &str, &str)] = &[
    ("Acme Industrial", "1 Harbour Road, Port City", "555-0100", "buyer@acme.test"),
    ("Northwind Traders", "77 Mill Lane, Easton", "555-0142", "purchasing@northwind.test"),
    ("Blue Ridge Foods", "12 Orchard Way, Hillview", "555-0175", "ops@blueridge.test"),
    ("Keystone Fabrication", "400 Foundry Street, Steelton", "555-0199", "rfq@keystone.test"),
    ("Lakeside Clinics", "9 Shore Drive, Bayside", "555-0123", "supplies@lakeside.test"),
];

/// (item_no prefix, description, base rate in cents)
const CATALOG: &[(&str, &str, i64)] = &[
    ("PMP", "Centrifugal pump 2HP", 45_000),
    ("SEA", "Mechanical seal kit", 1_250),
    ("VLV", "Ball valve DN50 stainless", 8_990),
    ("FLT", "Hydraulic filter element", 2_375),
    ("BRG", "Deep groove ball bearing 6205", 649),
    ("HOS", "Reinforced hose per metre", 1_180),
    ("GSK", "PTFE gasket set", 990),
    ("MTR", "IE3 motor 5.5kW", 62_500),
    ("CBL", "Control cable 4x1.5mm per metre", 215),
    ("SNS", "Pressure transmitter 0-10 bar", 18_900),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 25;
    let mut db_path = String::from("./rfq_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(25);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("RFQ Desk Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of RFQs to generate (default: 25)");
                println!("  -d, --db <PATH>    Database file path (default: ./rfq_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("RFQ Desk Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!("RFQs:     {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.rfqs().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} RFQs", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating RFQs...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let rfq = generate_rfq(seed);

        match db.rfqs().create(&rfq).await {
            Ok(id) => {
                generated += 1;
                if generated % 10 == 0 {
                    println!("  Generated {} RFQs (last id {})...", generated, id);
                }
            }
            Err(e) => eprintln!("Failed to insert RFQ #{}: {}", seed, e),
        }
    }

    println!();
    println!("✓ Generated {} RFQs in {:?}", generated, start.elapsed());

    let ids = db.rfqs().list_ids().await?;
    if let Some(newest) = ids.first() {
        if let Some(rfq) = db.rfqs().fetch_by_id(*newest).await? {
            println!(
                "  Newest: RFQ-{} for {} ({} items, total {})",
                rfq.id,
                rfq.customer.name,
                rfq.items.len(),
                rfq.grand_total()
            );
        }
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single RFQ with deterministic pseudo-random content.
fn generate_rfq(seed: usize) -> Rfq {
    let (name, address, phone, email) = CUSTOMERS[seed % CUSTOMERS.len()];

    let item_count = 1 + (seed * 7) % 8;
    let items = (0..item_count)
        .map(|line| {
            let (prefix, description, rate_cents) = CATALOG[(seed + line * 3) % CATALOG.len()];
            let qty = if line % 3 == 2 {
                // 0.5 - 9.5
                Decimal::new(5 + ((seed + line) % 10) as i64 * 10, 1)
            } else {
                Decimal::from(1 + ((seed * 13 + line) % 20) as i64)
            };
            RfqItem::new(
                format!("{}-{:03}", prefix, line + 1),
                description,
                qty,
                Decimal::new(rate_cents, 2),
            )
        })
        .collect();

    let day = 1 + seed % 28;
    let dated = seed % 5 != 4;
    let date = |offset: usize| dated.then(|| format!("2024-{:02}-{:02}", 1 + seed % 12, (day + offset).min(28)));

    Rfq {
        quote_number: Some(format!("Q-2024-{:04}", seed + 1)),
        rfq_date: date(0),
        quote_date: date(2),
        valid_until: date(20),
        description: Some(format!("Supply request #{} for {}", seed + 1, name)),
        remarks: (seed % 2 == 0).then(|| "Prices exclude delivery. Lead time 3-4 weeks.".to_string()),
        customer: Customer {
            id: 0,
            name: name.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        },
        items,
        ..Rfq::default()
    }
}
