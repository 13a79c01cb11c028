use crate::models::Bucket;
use clap::{Parser, Subcommand};

/// Command-line interface definition for worktrack
#[derive(Parser)]
#[command(
    name = "worktrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track work items and ticket metrics, synchronised to a remote workbook",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Remote table location: a bare id or a URL/query string such as `?sheet=ID`
    #[arg(global = true, long = "sheet")]
    pub sheet: Option<String>,

    /// Override the directory holding file-backed workbooks
    #[arg(global = true, long = "sheets-dir", hide = true)]
    pub sheets_dir: Option<String>,

    /// Override the calendar database path
    #[arg(global = true, long = "calendar")]
    pub calendar: Option<String>,

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

    /// Manage the configuration file (view or edit)
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL).
        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Print the internal log table
    Log {
        /// Print rows from the internal `log` table
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage work items (profiles, contracts, projects)
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },

    /// Manage scheduled work sessions of an item
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Manage the list of known owners
    Owner {
        #[command(subcommand)]
        action: OwnerAction,
    },

    /// Import a ticket export CSV and replace the ticket summary
    Import {
        /// CSV file (ticket list or group summary export)
        file: String,

        /// Classify and print the summary without storing it
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// Print the current ticket summary
    Summary,

    /// Overwrite the remote tables with the local store
    Sync {
        /// Only sync this bucket
        #[arg(long, value_enum)]
        bucket: Option<Bucket>,

        /// Skip the ticket summary table
        #[arg(long = "no-tickets")]
        no_tickets: bool,
    },

    /// Replace the local store with the content of the remote tables
    Load {
        /// Only load this bucket
        #[arg(long, value_enum)]
        bucket: Option<Bucket>,

        /// Also load the ticket metrics
        #[arg(long)]
        tickets: bool,
    },

    /// Show or set the panel-collapse preference
    Panel {
        #[arg(long, conflicts_with = "expand")]
        collapse: bool,

        #[arg(long)]
        expand: bool,
    },
}

#[derive(Subcommand)]
pub enum ItemAction {
    /// Add a work item
    Add {
        #[arg(value_enum)]
        bucket: Bucket,
        name: String,
        #[command(flatten)]
        fields: ItemFields,
    },

    /// List work items
    List {
        #[arg(value_enum)]
        bucket: Option<Bucket>,
    },

    /// Edit fields of a work item
    Edit {
        #[arg(value_enum)]
        bucket: Bucket,
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: ItemFields,
    },

    /// Delete a work item and its sessions
    Del {
        #[arg(value_enum)]
        bucket: Bucket,
        id: String,
    },
}

/// Optional item fields shared by `add` and `edit`.
#[derive(clap::Args, Default)]
pub struct ItemFields {
    #[arg(long)]
    pub owner: Option<String>,
    /// Not Started, In Progress, Completed, On Hold, Cancelled
    #[arg(long)]
    pub status: Option<String>,
    /// Low, Medium, High, Urgent
    #[arg(long)]
    pub priority: Option<String>,
    /// Start date (YYYY-MM-DD); empty string clears it
    #[arg(long)]
    pub start: Option<String>,
    /// Due date (YYYY-MM-DD); empty string clears it
    #[arg(long)]
    pub due: Option<String>,
    /// Progress percentage, clamped to 0..=100
    #[arg(long, allow_hyphen_values = true)]
    pub progress: Option<i64>,
    /// Notes; empty string clears them
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Schedule a session (creates a calendar event when a calendar is configured)
    Add {
        #[arg(value_enum)]
        bucket: Bucket,
        item: String,
        /// Date (YYYY-MM-DD)
        date: String,
        /// Start time (HH:MM)
        start: String,
        /// End time (HH:MM)
        end: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Edit a session and its linked calendar event
    Edit {
        #[arg(value_enum)]
        bucket: Bucket,
        item: String,
        session: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long = "start")]
        start: Option<String>,
        #[arg(long = "end")]
        end: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a session (the calendar event is removed best effort)
    Del {
        #[arg(value_enum)]
        bucket: Bucket,
        item: String,
        session: String,
    },

    /// List the sessions of an item
    List {
        #[arg(value_enum)]
        bucket: Bucket,
        item: String,
    },

    /// List calendar events whose session no longer exists
    Orphans,
}

#[derive(Subcommand)]
pub enum OwnerAction {
    Add { name: String },
    Del { name: String },
    List,
}
