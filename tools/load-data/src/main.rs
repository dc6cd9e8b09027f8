//! Bulk loader for reference data (ingredients and tags).
//!
//! # Usage
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/foodgram \
//!     cargo run -p foodgram-load-data -- ingredients data/ingredients.json
//! cargo run -p foodgram-load-data -- tags data/tags.json
//! ```
//!
//! Rows that already exist are skipped; the number of inserted rows is printed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sea_orm::Database;

use foodgram_core::tracing::init_tracing;

mod load;

#[derive(Parser)]
#[command(about = "Load Foodgram reference data from JSON files")]
struct Args {
    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load `[{"name", "measurement_unit"}]`
    Ingredients { file: PathBuf },
    /// Load `[{"name", "slug"}]`
    Tags { file: PathBuf },
}

fn read(file: &PathBuf) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let args = Args::parse();

    let db = Database::connect(&args.database_url)
        .await
        .context("failed to connect to database")?;

    match args.command {
        Command::Ingredients { file } => {
            let items = load::parse_ingredients(&read(&file)?)?;
            let total = items.len();
            let inserted = load::insert_ingredients(&db, items).await?;
            println!("ingredients: {inserted} inserted, {total} in file");
        }
        Command::Tags { file } => {
            let items = load::parse_tags(&read(&file)?)?;
            let total = items.len();
            let inserted = load::insert_tags(&db, items).await?;
            println!("tags: {inserted} inserted, {total} in file");
        }
    }
    Ok(())
}
