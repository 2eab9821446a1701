pub mod api_client;
mod commands;
pub mod error;
mod utils;

#[cfg(test)]
mod utils_test;

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::Result;

use crate::api::DEFAULT_PORT;
use crate::config::{API_URL_ENV, DB_ENV, get_db_path};
use commands::itinerary::ListItinerariesFilter;

#[derive(Parser)]
#[command(name = "itinerary")]
#[command(author, version, about = "Travel itinerary server and client", long_about = None)]
pub struct Cli {
    /// Database file path (default: $XDG_DATA_HOME/itinerary/itinerary.db)
    #[arg(long, global = true, env = DB_ENV)]
    pub db: Option<PathBuf>,

    /// Override the API URL (default: http://localhost:3737)
    #[arg(long, global = true, env = API_URL_ENV)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server (REST + MCP at /mcp)
    Serve {
        /// Host address to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Serve the OpenAPI UI at /docs
        #[arg(long)]
        docs: bool,
        /// Do not load the demonstration catalog into an empty database
        #[arg(long)]
        no_seed: bool,
        /// Increase log verbosity (-v, -vv, -vvv)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },
    /// Serve the MCP tools over stdio
    Mcp {
        /// Do not load the demonstration catalog into an empty database
        #[arg(long)]
        no_seed: bool,
        /// Increase log verbosity (-v, -vv, -vvv)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },
    /// List itineraries
    List {
        /// Exact region match
        #[arg(long)]
        region: Option<String>,
        /// Minimum number of nights (inclusive)
        #[arg(long)]
        min_nights: Option<i64>,
        /// Maximum number of nights (inclusive)
        #[arg(long)]
        max_nights: Option<i64>,
        /// Only recommended (true) or non-recommended (false)
        #[arg(long)]
        recommended: Option<bool>,
        /// Number of itineraries to skip
        #[arg(long)]
        skip: Option<usize>,
        /// Maximum number of itineraries to return
        #[arg(long)]
        limit: Option<usize>,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show an itinerary day by day
    Show {
        /// Itinerary ID
        id: i64,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Create an itinerary from a JSON file
    Create {
        /// Path to the JSON payload
        #[arg(short, long)]
        file: PathBuf,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

pub async fn run() -> Result<()> {
    // reqwest is built without a default TLS provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    let db_path = cli.db.clone().unwrap_or_else(get_db_path);

    match cli.command {
        Some(Commands::Serve {
            host,
            port,
            docs,
            no_seed,
            verbose,
        }) => commands::serve::run(&db_path, host, port, verbose, docs, !no_seed).await,
        Some(Commands::Mcp { no_seed, verbose }) => {
            commands::mcp::run(&db_path, verbose, !no_seed).await
        }
        Some(Commands::List {
            region,
            min_nights,
            max_nights,
            recommended,
            skip,
            limit,
            format,
        }) => {
            let api_client = api_client::ApiClient::new(cli.api_url);
            let filter = ListItinerariesFilter {
                region: region.as_deref(),
                min_nights,
                max_nights,
                recommended,
                skip,
                limit,
            };
            let output = commands::itinerary::list_itineraries(&api_client, filter, &format).await?;
            println!("{}", output);
            Ok(())
        }
        Some(Commands::Show { id, format }) => {
            let api_client = api_client::ApiClient::new(cli.api_url);
            let output = commands::itinerary::show_itinerary(&api_client, id, &format).await?;
            println!("{}", output);
            Ok(())
        }
        Some(Commands::Create { file, format }) => {
            let api_client = api_client::ApiClient::new(cli.api_url);
            let output =
                commands::itinerary::create_itinerary(&api_client, &file, &format).await?;
            println!("{}", output);
            Ok(())
        }
        None => {
            // Show help when no command provided
            let _ = Cli::parse_from(["itinerary", "--help"]);
            Ok(())
        }
    }
}
