//! CLI argument parsing

use clap::{Args, Parser, Subcommand};
use keyword_formatter::config::Overrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kwfmt")]
#[command(about = "Keyword Formatter for issue and pull request titles", long_about = None)]
#[command(after_help = "Use 'kwfmt <command> --help' for more information about a command.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML config file (defaults to ./.kwfmt.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Keyword source options shared by all commands
#[derive(Args, Debug, Clone, Default)]
pub struct KeywordArgs {
    /// Comma or newline separated keywords, or a /regex/ literal
    #[arg(short, long)]
    pub keywords: Option<String>,

    /// File of keywords, or a directory whose file names are keywords
    #[arg(long)]
    pub keywords_path: Option<PathBuf>,

    /// Prefix that may precede a keyword and is formatted with it
    #[arg(short, long)]
    pub prefix: Option<String>,
}

impl KeywordArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            keywords: self.keywords.clone(),
            keywords_path: self.keywords_path.clone(),
            prefix: self.prefix.clone(),
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Format a title and print the result
    #[command(visible_alias = "fmt")]
    Format {
        /// Title to format
        title: String,

        #[command(flatten)]
        keywords: KeywordArgs,
    },

    /// Show the normalized keywords and prefix
    #[command(visible_alias = "ls")]
    Keywords {
        #[command(flatten)]
        keywords: KeywordArgs,
    },

    /// Format the title of an issue or pull request in the title store
    Run {
        /// Record as owner/repo#number (defaults to the triggering event)
        #[arg(short, long)]
        record: Option<String>,

        /// Path to the JSON title store
        #[arg(short, long)]
        store: Option<PathBuf>,

        /// Show what would be done without making changes
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        keywords: KeywordArgs,
    },
}
