//! Data directory and database path resolution.
//!
//! Follows the XDG base directory layout:
//! `$XDG_DATA_HOME/itinerary/itinerary.db`, falling back to
//! `$HOME/.local/share/itinerary/itinerary.db`.

use std::env;
use std::path::PathBuf;

/// Directory name under the XDG data home.
pub const APP_DIR: &str = "itinerary";

/// Database file name inside the data directory.
pub const DB_FILE: &str = "itinerary.db";

/// Environment variable overriding the database path.
pub const DB_ENV: &str = "ITINERARY_DB";

/// Environment variable overriding the API URL used by client commands.
pub const API_URL_ENV: &str = "ITINERARY_API_URL";

/// Default API URL for client commands.
pub const DEFAULT_API_URL: &str = "http://localhost:3737";

/// Get the application data directory.
///
/// Without `XDG_DATA_HOME` or `HOME` the current directory is used.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var_os("XDG_DATA_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_home.join(APP_DIR)
}

/// Get the default database path (data_dir/itinerary.db).
pub fn get_db_path() -> PathBuf {
    get_data_dir().join(DB_FILE)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
