//! Database seeder for Peachtree development and testing.
//!
//! Seeds contractors and system accounts. Transaction statuses are created
//! by the migrations. Safe to run repeatedly.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use peachtree_db::entities::{contractors, system_accounts};
use peachtree_shared::DatabaseConfig;

const CONTRACTORS: [&str; 6] = [
    "Acme Corp",
    "Globex",
    "Initech",
    "Umbrella Ltd",
    "Stark Industries",
    "Wayne Enterprises",
];

const ACCOUNTS: [(&str, Decimal); 2] = [
    ("Free Checking", dec!(5824.76)),
    ("Savings", dec!(25000.00)),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let store = peachtree_db::connect(&DatabaseConfig::new(database_url))
        .await
        .context("Failed to connect to database")?;
    let db = store.connection();

    println!("Seeding contractors...");
    seed_contractors(db).await?;

    println!("Seeding system accounts...");
    seed_accounts(db).await?;

    println!("Seeding complete!");
    Ok(())
}

/// Seeds the contractor list.
async fn seed_contractors(db: &DatabaseConnection) -> anyhow::Result<()> {
    for name in CONTRACTORS {
        let exists = contractors::Entity::find()
            .filter(contractors::Column::Name.eq(name))
            .count(db)
            .await?
            > 0;
        if exists {
            println!("  {name} already exists, skipping...");
            continue;
        }

        contractors::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        println!("  Created {name}");
    }
    Ok(())
}

/// Seeds system accounts with opening balances.
async fn seed_accounts(db: &DatabaseConnection) -> anyhow::Result<()> {
    for (name, balance) in ACCOUNTS {
        let exists = system_accounts::Entity::find()
            .filter(system_accounts::Column::Name.eq(name))
            .count(db)
            .await?
            > 0;
        if exists {
            println!("  {name} already exists, skipping...");
            continue;
        }

        system_accounts::ActiveModel {
            name: Set(name.to_string()),
            balance: Set(balance),
            ..Default::default()
        }
        .insert(db)
        .await?;
        println!("  Created {name} with balance {balance}");
    }
    Ok(())
}
