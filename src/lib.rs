pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod mcp;
pub mod serde_utils;
