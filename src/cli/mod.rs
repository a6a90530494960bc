pub mod commands;

use clap::{Parser, Subcommand};

use crate::pagination::DEFAULT_COMMENT_LIMIT;

#[derive(Parser)]
#[command(name = "veracity")]
#[command(about = "A client for the news-voting API", long_about = None)]
pub struct Cli {
    /// Override the API base URL from the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List news, paginated
    List {
        /// Page number; anything non-positive falls back to 1
        #[arg(short, long)]
        page: Option<String>,

        /// Page size; must be one of 4, 7, 10, 14, 21
        #[arg(long)]
        per_page: Option<String>,

        /// Restrict to "fake" or "real" news; anything else means all
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Show one news item with its vote summary
    Show {
        /// News item ID
        id: i64,
    },
    /// List comments for a news item, local ones first
    Comments {
        /// News item ID
        news_id: i64,

        /// Comments per page
        #[arg(short, long, default_value_t = DEFAULT_COMMENT_LIMIT)]
        limit: u32,

        /// Keep fetching until the last page
        #[arg(long)]
        all: bool,
    },
    /// Manage local (unsynced) comments
    Comment {
        #[command(subcommand)]
        action: CommentAction,
    },
}

#[derive(Subcommand)]
pub enum CommentAction {
    /// Add a local comment to a news item
    Add {
        /// News item ID
        news_id: i64,

        /// Commenter name
        #[arg(short, long)]
        user: String,

        /// Vote: "fake" or "real"
        #[arg(short, long)]
        vote: String,

        /// Comment text
        #[arg(short, long)]
        text: String,

        /// Attachment reference, repeatable
        #[arg(short, long)]
        attachment: Vec<String>,
    },
    /// Remove a local comment by its (negative) ID
    Remove {
        /// News item ID
        news_id: i64,

        /// Local comment ID
        id: i64,
    },
    /// Drop local comments for one news item, or for all of them
    Clear {
        /// News item ID; omit to clear everything
        news_id: Option<i64>,
    },
}
