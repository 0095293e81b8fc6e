pub mod config;
pub mod db;
pub mod error;

// Search engine
pub mod search;

// HTTP surface
pub mod api;

// Command-line tools
pub mod cli;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
