//! Serve command - starts the REST API + MCP endpoint

use std::net::IpAddr;
use std::path::Path;

use miette::{IntoDiagnostic, Result};

use crate::api::{self, Config};
use crate::db::Database;
use crate::db::sqlite::SqliteDatabase;

/// Open the database file, creating its directory and schema as needed.
pub(crate) async fn open_database(db_path: &Path, seed: bool) -> Result<SqliteDatabase> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).into_diagnostic()?;
    }

    let db = SqliteDatabase::open(db_path).await?;
    db.migrate().await?;

    if seed {
        db.ensure_seeded().await?;
    }

    Ok(db)
}

/// Run the API server
pub async fn run(
    db_path: &Path,
    host: IpAddr,
    port: u16,
    verbosity: u8,
    enable_docs: bool,
    seed: bool,
) -> Result<()> {
    let db = open_database(db_path, seed).await?;

    // Print startup banner BEFORE starting server (before logging is initialized)
    println!();
    println!("Travel itinerary server starting...");
    println!("   API:      http://{}:{}/itineraries", host, port);
    println!("   MCP:      http://{}:{}/mcp", host, port);
    if enable_docs {
        println!("   Docs:     http://{}:{}/docs", host, port);
    }
    println!();
    println!("   Database: {}", db_path.display());
    println!();

    api::run(
        Config {
            host,
            port,
            verbosity,
            enable_docs,
        },
        db,
    )
    .await?;

    Ok(())
}
