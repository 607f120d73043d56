// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bmclient", author, version, about, long_about = None)]
/// A terminal client for a REST bookmark service
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base URL of the bookmark service, overrides config and environment
    #[arg(long = "url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    #[arg(long = "no-color", help = "disable colored output")]
    pub no_color: bool,

    #[arg(long = "generate-config", help = "print default configuration and exit")]
    pub generate_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all bookmarks
    List {
        #[arg(long = "json", help = "output as json")]
        is_json: bool,
    },
    /// Add a bookmark
    Add {
        #[arg(short = 'f', long = "field", value_name = "KEY=VALUE", help = "set a field, repeatable")]
        fields: Vec<String>,
        #[arg(long = "title", help = "title")]
        title: Option<String>,
        #[arg(long = "url", help = "url")]
        url: Option<String>,
        #[arg(long = "from-json", value_name = "JSON", help = "start from a JSON object")]
        from_json: Option<String>,
    },
    /// Update fields of a bookmark
    Update {
        id: String,
        #[arg(short = 'f', long = "field", value_name = "KEY=VALUE", help = "set a field, repeatable")]
        fields: Vec<String>,
        #[arg(long = "title", help = "title")]
        title: Option<String>,
        #[arg(long = "url", help = "url")]
        url: Option<String>,
    },
    /// Delete bookmarks
    Delete {
        /// list of ids, separated by comma, no blanks
        ids: String,
    },
    /// Show a single bookmark
    Show {
        id: String,
        #[arg(long = "json", help = "output as json")]
        is_json: bool,
    },
    /// Open a bookmark's URL with the system opener
    Open { id: String },
    /// Interactive session: edit a draft, save, delete, list
    Shell,
    /// Generate shell completion script
    Completion {
        /// Shell to generate completion for (bash, zsh, fish)
        shell: String,
    },
}
