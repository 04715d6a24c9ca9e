//! CLI command definitions and dispatch for the `cbook` binary.
//!
//! Uses clap derive macros for argument parsing. Top-level commands are
//! nouns with subcommand verbs (e.g., `cbook sessions list`,
//! `cbook citations search`), except `ask` which is the primary verb.

pub mod ask;
pub mod citations;
pub mod format;
pub mod responses;
pub mod sessions;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use uuid::Uuid;

/// Legal research assistant with conversation and response memory.
#[derive(Parser)]
#[command(name = "cbook", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the assistant a question.
    Ask {
        /// The question to ask.
        question: String,

        /// Session to continue (defaults to the current session).
        #[arg(long)]
        session: Option<Uuid>,

        /// Attach a file to the question (repeatable).
        #[arg(long)]
        attach: Vec<PathBuf>,
    },

    /// Manage chat sessions (list, new, show, rename, delete, search).
    Sessions {
        #[command(subcommand)]
        action: sessions::SessionCommand,
    },

    /// Manage remembered responses (list, related, clear).
    Responses {
        #[command(subcommand)]
        action: responses::ResponseCommand,
    },

    /// Search the citation catalog (search, courts).
    Citations {
        #[command(subcommand)]
        action: citations::CitationCommand,
    },

    /// System status dashboard.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
