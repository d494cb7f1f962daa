use clap::{Parser, Subcommand};

/// Command-line interface definition for rwatson
/// CLI application to track time on projects, with optional Jira worklog sync
#[derive(Parser)]
#[command(
    name = "rwatson",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track time spent on projects and, optionally, log it to Jira",
    long_about = None
)]
pub struct Cli {
    /// Use this configuration file instead of the default one
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db", value_name = "FILE")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or edit the configuration file
    Config {
        /// Print the current configuration (the Jira token is masked)
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL)
        #[arg(long = "editor", requires = "edit_config")]
        editor: Option<String>,
    },

    /// Start tracking a project
    ///
    /// Examples:
    ///   rwatson start PROJ-12 +track-time
    ///   rwatson start PROJ-12 +track-time +review --at 09:30
    Start {
        /// Project name (for Jira: the issue key, e.g. PROJ-12)
        project: String,

        /// Tags, written as +tag
        tags: Vec<String>,

        /// Start time: HH:MM, "YYYY-MM-DD HH:MM[:SS]" or RFC 3339 (default: now)
        #[arg(long = "at", value_name = "TIME")]
        at: Option<String>,
    },

    /// Stop the running project and record the frame
    Stop {
        /// Stop time: HH:MM, "YYYY-MM-DD HH:MM[:SS]" or RFC 3339 (default: now)
        #[arg(long = "at", value_name = "TIME")]
        at: Option<String>,

        /// Free text note, also used as the Jira worklog comment
        #[arg(long = "note", short = 'n')]
        note: Option<String>,
    },

    /// Cancel the running project without recording it
    Cancel,

    /// Show the running project
    Status,

    /// List recorded frames
    List {
        /// Filter by year/month/day or a custom range
        /// (YYYY, YYYY-MM, YYYY-MM-DD, or ranges like YYYY-MM:YYYY-MM)
        #[arg(long, short)]
        period: Option<String>,

        /// Only frames of this project
        #[arg(long)]
        project: Option<String>,
    },

    /// Remove a recorded frame (and its Jira worklog, if any)
    Remove {
        /// Frame id, as shown by `list`
        id: i64,

        /// Do not ask for confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal log table
    Log {
        /// Print rows from the internal `log` table
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Jira integration helpers
    Jira {
        #[command(subcommand)]
        action: JiraAction,
    },
}

#[derive(Subcommand)]
pub enum JiraAction {
    /// Validate the `jira:` configuration section
    Check,

    /// Fetch and print the Jira worklog attached to a frame
    Show {
        /// Frame id, as shown by `list`
        id: i64,
    },
}
