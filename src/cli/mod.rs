use clap::{Parser, Subcommand};

pub mod handlers;

pub use handlers::dispatch;

/// `viking-memory` - query and feed the Viking memory service.
#[derive(Parser, Debug)]
#[command(name = "viking-memory")]
#[command(version = "0.1.0")]
#[command(about = "Search, list and store memories in the Viking memory service.", long_about = None)]
pub struct Cli {
    /// Log request/response details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search event memories in a container
    Search {
        query: String,

        /// Container tag (owning identity)
        #[arg(long)]
        tag: String,
    },

    /// Show the aggregated profile of a container
    Profile {
        #[arg(long)]
        tag: String,

        /// Condition the profile on a query
        #[arg(long)]
        query: Option<String>,
    },

    /// Store a single memory
    Add {
        content: String,

        #[arg(long)]
        tag: String,
    },

    /// Delete a memory by id
    Delete { id: String },

    /// List memories in a container, newest first
    List {
        #[arg(long)]
        tag: String,

        /// Page size used for pagination
        #[arg(long, default_value_t = viking_memory::client::DEFAULT_LIST_LIMIT)]
        limit: usize,
    },

    /// Search experience cards derived from profile data
    Experience { query: String },

    /// Ingest a conversation
    Ingest {
        /// Conversation (session) id
        #[arg(long)]
        conversation: String,

        /// Owning container tag(s); all are sent with the session
        #[arg(long = "tag", required = true)]
        tags: Vec<String>,

        /// Messages as `role:content`, in order
        #[arg(long = "message", required = true)]
        messages: Vec<String>,
    },

    /// Derive a container tag from an identity
    Tag {
        #[command(subcommand)]
        kind: TagKind,
    },

    /// Check whether text asks for something to be remembered
    Keywords { text: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum TagKind {
    /// Tag for a user identity (email, login)
    User { identity: String },
    /// Tag for a project directory
    Project { directory: String },
}
