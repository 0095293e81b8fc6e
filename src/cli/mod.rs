// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pantry-search")]
#[command(about = "Find recipes by the ingredients you have", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the search server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Run database migrations
    Migrate,

    /// Replace all recipes with the contents of a JSON file
    Seed {
        /// JSON array of recipes
        #[arg(default_value = "data/recipes-en.json")]
        file: String,
    },

    /// Search recipes by ingredients against the local database
    Search {
        /// Ingredients to look for
        #[arg(required = true)]
        ingredients: Vec<String>,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<i64>,
    },

    /// Time a fixed set of searches against the local database
    Bench {
        /// Runs per query
        #[arg(short, long, default_value_t = 5)]
        runs: usize,
    },
}
