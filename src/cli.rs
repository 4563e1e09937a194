use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::{MatchDraft, MatchFormat, MatchResult, MatchType};

#[derive(Parser, Debug)]
#[command(author, version, about = "Padel match journal with live statistics")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Record a match
    Log(LogArgs),
    /// Print the statistics dashboard
    Stats {
        /// Print JSON instead of the dashboard
        #[arg(long)]
        json: bool,
    },
    /// List the most recent matches
    Recent {
        /// Number of matches (defaults to PADEL_RECENT_LIMIT or 5)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Delete the most recent match, if it is recent enough
    Delete {
        /// Match id
        id: String,
    },
    /// Keep the dashboard on screen and redraw it on every change
    Watch,
    /// Import matches exported from the old local journal (JSON array)
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },
    /// Start the HTTP API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct LogArgs {
    /// Match date, e.g. 2025-03-24 (defaults to now)
    #[arg(short, long)]
    pub date: Option<String>,
    /// Training session or competitive match
    #[arg(short = 't', long = "type", value_enum, default_value_t = MatchType::Training)]
    pub match_type: MatchType,
    /// Singles or doubles
    #[arg(short, long, value_enum, default_value_t = MatchFormat::TwoVsTwo)]
    pub format: MatchFormat,
    #[arg(long)]
    pub player1: String,
    #[arg(long)]
    pub player2: Option<String>,
    #[arg(long)]
    pub player3: Option<String>,
    /// Required for competitive matches
    #[arg(short, long, value_enum)]
    pub result: Option<MatchResult>,
    /// Duration in minutes, e.g. "90" or "90 min"
    #[arg(long)]
    pub duration: String,
    #[arg(long)]
    pub venue: String,
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl From<LogArgs> for MatchDraft {
    fn from(args: LogArgs) -> Self {
        Self {
            date: args.date,
            match_type: args.match_type,
            match_format: args.format,
            player1: args.player1,
            player2: args.player2,
            player3: args.player3,
            result: args.result,
            duration: args.duration,
            venue: args.venue,
            notes: args.notes,
        }
    }
}
