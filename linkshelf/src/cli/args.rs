// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Personal bookmarks with favorites
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long = "generate-config")]
    pub generate_config: bool,

    /// Session token for bookmark commands
    #[arg(long, env = "LINKSHELF_SESSION", global = true, hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the bookmark procedures over HTTP
    Serve {
        /// Listen address, overrides the configured one
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Initialize a new, empty database
    CreateDb {
        /// Path of the database file to create
        path: String,
    },

    /// Issue or revoke sessions
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Add a bookmark
    Add {
        url: String,
        title: String,

        #[arg(short = 'f', long = "favorite", help = "mark as favorite")]
        favorite: bool,
    },

    /// List your bookmarks
    List {
        #[arg(short = 'f', long = "favorites", help = "only favorites")]
        favorites: bool,

        #[arg(long = "json", help = "output as json")]
        is_json: bool,
    },

    /// Change title, url or favorite flag of a bookmark
    Update {
        /// Bookmark id
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long = "favorite", conflicts_with = "no_favorite")]
        favorite: bool,

        #[arg(long = "no-favorite")]
        no_favorite: bool,
    },

    /// Toggle the favorite flag of a bookmark
    Favorite {
        /// Bookmark id
        id: String,
    },

    /// Generate shell completion script
    Completion {
        /// Shell to generate completions for (bash, zsh, fish)
        shell: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Issue a new session token
    Issue {
        /// User id the session speaks for; a new user id is generated when omitted
        #[arg(long = "user", value_name = "ID")]
        user_id: Option<String>,

        /// Session lifetime in hours, overrides the configured one
        #[arg(long = "ttl-hours", value_name = "HOURS")]
        ttl_hours: Option<u32>,
    },

    /// Revoke a session token
    Revoke {
        token: String,
    },
}
