use std::path::PathBuf;

use clap::{Parser, Subcommand};

use fidlc::limits::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(name = "fidlc")]
#[command(about = "FIDL interface definition compiler front end")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a .fidl file and print the syntax tree
    Parse(InputArgs),
    /// Lex a .fidl file and print its tokens
    Tokens(InputArgs),
}

#[derive(clap::Args)]
pub struct InputArgs {
    /// Input file path
    pub file: PathBuf,

    /// Limits configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}
