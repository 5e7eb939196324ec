use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hitfinder", about = "MTurk HIT finder & blocklist")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the search results page
    Search {
        /// Sort order: "Latest", "Batch Size" or "Reward"
        #[arg(short, long)]
        sort: Option<String>,

        /// Minimum reward, e.g. 0.10
        #[arg(short, long)]
        min_reward: Option<String>,

        /// Only HITs you are qualified for
        #[arg(short, long)]
        qualified: Option<bool>,

        /// Remember these search options
        #[arg(long)]
        save: bool,

        /// Print JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// Fetch your queue of accepted HITs
    Queue {
        #[arg(long)]
        json: bool,
    },
    /// Tabulate a saved HTML page
    Parse {
        /// HTML file
        file: String,

        /// Treat the page as a queue page
        #[arg(long)]
        queue: bool,
    },
    /// Block a requester
    BlockRequester {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,
    },
    /// Block a HIT group from the current search results
    BlockHit {
        group_id: String,

        /// Read results from a saved search page instead of fetching
        #[arg(long)]
        page: Option<String>,
    },
    /// Remove a requester id or HIT group id from the blocklist
    Unblock { key: String },
    /// List blocked entries
    Blocklist {
        /// Only entries blocked longer ago than this
        #[arg(long, conflicts_with = "within")]
        older_than: Option<u32>,

        /// Only entries blocked more recently than this
        #[arg(long)]
        within: Option<u32>,

        /// seconds, minutes, hours, days, weeks, months, years
        #[arg(short, long, default_value = "days")]
        unit: String,
    },
    /// Import a settings backup file
    ImportBackup { file: String },
}
