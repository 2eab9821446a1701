use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Failed to connect to API server")]
    #[diagnostic(
        code(itinerary::cli::connection_failed),
        help(
            "Is the API server running? Try: itinerary serve\nOr set ITINERARY_API_URL environment variable to point to the correct server."
        )
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from API server: {message}")]
    #[diagnostic(
        code(itinerary::cli::invalid_response),
        help(
            "The server returned data in an unexpected format. This might indicate a version mismatch."
        )
    )]
    InvalidResponse { message: String },

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(itinerary::cli::api_error))]
    ApiError { status: u16, message: String },

    #[error("Failed to read {}", .path.display())]
    #[diagnostic(code(itinerary::cli::read_file))]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid itinerary payload in {}: {message}", .path.display())]
    #[diagnostic(
        code(itinerary::cli::invalid_payload),
        help(
            "Expected JSON with name, region, duration_nights and days [{{day_number, hotel_id, transfer_id?, activity_ids?}}]"
        )
    )]
    InvalidPayload { path: PathBuf, message: String },
}

impl From<reqwest::Error> for CliError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            CliError::ConnectionFailed { source: e }
        } else {
            CliError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
