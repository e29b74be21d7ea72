use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nxfilter::objects::InputFormat;

mod errors;
mod handlers;
mod types;

pub use handlers::*;
pub use types::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the objects matching a query
    ///
    /// Query syntax: `word`, `"quoted text"`, `not word`,
    /// `name:value1,value2`, `-name:value` / `not name:value`.
    Filter {
        /// Search query. Empty matches everything.
        #[clap(allow_hyphen_values = true)]
        query: Option<String>,

        /// Read objects from a file instead of stdin
        #[clap(short, long)]
        input: Option<PathBuf>,

        /// Input format (guessed from the file extension when omitted)
        #[clap(short, long, value_enum)]
        format: Option<InputFormat>,

        /// Use a saved query; combined with QUERY when both are given
        #[clap(short, long)]
        saved: Option<String>,

        /// Match on text only, ignoring attribute clauses
        #[clap(long, default_value = "false")]
        plain: bool,

        /// Print the count
        #[clap(short = 'c', long, default_value = "false")]
        count: bool,
    },
    /// Show how a query is compiled
    Explain {
        #[clap(allow_hyphen_values = true)]
        query: String,
    },
    /// Manage saved queries
    Saved {
        #[clap(subcommand)]
        action: SavedArgs,
    },
}
