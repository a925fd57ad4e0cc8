use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rRunTracker
/// CLI application to track runs (GPS start/end fixes) with SQLite
#[derive(Parser)]
#[command(
    name = "rruntracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "A run tracking CLI: capture start/end fixes, derive distance and pace, keep history in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Track one run: acquire a start fix, wait, acquire an end fix, save
    Track {
        /// Start fix as "LAT,LON" (scripted; otherwise prompted on stdin)
        #[arg(long = "start-at", value_name = "LAT,LON")]
        start_at: Option<String>,

        /// End fix as "LAT,LON" (scripted; otherwise prompted on stdin)
        #[arg(long = "end-at", value_name = "LAT,LON")]
        end_at: Option<String>,

        /// Seconds to wait between the two fixes (scripted runs)
        #[arg(long = "wait", value_name = "SECONDS")]
        wait: Option<u64>,

        /// Free text attached to the saved run
        #[arg(long = "notes")]
        notes: Option<String>,
    },

    /// List saved runs, newest first
    List {
        #[arg(
            long,
            short,
            help = "Filter by year/month/day or a custom range (e.g. 2025, 2025-09, 2025-09-15, 2024-09:2025-09)"
        )]
        period: Option<String>,

        #[arg(long, help = "Show at most N runs")]
        limit: Option<usize>,
    },

    /// Show aggregate statistics (count, total and average distance)
    Stats,

    /// Delete runs
    Del {
        #[arg(long = "id", help = "Delete a single run by id")]
        id: Option<i64>,

        #[arg(long = "date", help = "Delete all runs of a date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long = "all", help = "Delete ALL runs")]
        all: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export run history
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        period: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
