//! Command-line interface definitions.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// marksort CLI.
#[derive(Parser)]
#[command(name = "marksort")]
#[command(about = "AI-assisted bookmark organizer")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "marksort.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import bookmarks from a Netscape Bookmark HTML export
    Import {
        /// Path to the exported .html file
        file: PathBuf,
    },

    /// Export all bookmarks to Netscape Bookmark HTML
    Export {
        /// Output file
        #[arg(short, long, default_value = "bookmarks_export.html")]
        output: PathBuf,
    },

    /// List bookmarks, optionally filtered
    List {
        /// Only show bookmarks in this category
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive substring search over title and URL
        #[arg(long)]
        search: Option<String>,
    },

    /// Categorize all bookmarks with the configured AI backend
    Organize,

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Delete bookmarks by id
    Delete {
        /// Bookmark ids
        ids: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Move bookmarks to a category
    Move {
        /// Target category
        #[arg(long = "to")]
        target: String,

        /// Bookmark ids
        ids: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Declare a category, empty until bookmarks are assigned
    Create { name: String },

    /// Delete a category; its bookmarks become uncategorized
    Delete {
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// One-line confirmation prompt for destructive operations.
pub fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}
