//! Session management CLI subcommands.
//!
//! Sessions are listed newest-first from the index; transcripts load from
//! their own storage keys. Search ranks whole conversations by topic
//! overlap with the query.

use anyhow::{Context, Result};
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;
use uuid::Uuid;

use casebook_types::chat::MessageRole;

use crate::cli::format::local_time;
use crate::state::AppState;

/// Session subcommands.
#[derive(Subcommand)]
pub enum SessionCommand {
    /// List sessions, newest first.
    #[command(alias = "ls")]
    List,

    /// Start a new session and make it current.
    New {
        /// Display name (defaults to the creation time).
        #[arg(long)]
        name: Option<String>,
    },

    /// Show a session transcript.
    Show {
        /// Session id.
        id: Uuid,
    },

    /// Rename a session.
    Rename {
        /// Session id.
        id: Uuid,

        /// New display name.
        name: String,
    },

    /// Delete a session and its transcript.
    #[command(alias = "rm")]
    Delete {
        /// Session id.
        id: Uuid,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Find sessions relevant to a query.
    Search {
        /// Free-text query.
        query: String,
    },
}

/// Handle a session subcommand.
pub async fn handle_session_command(
    cmd: SessionCommand,
    state: &AppState,
    json: bool,
) -> Result<()> {
    match cmd {
        SessionCommand::List => list_sessions(state, json).await,
        SessionCommand::New { name } => new_session(state, name.as_deref(), json).await,
        SessionCommand::Show { id } => show_session(state, &id, json).await,
        SessionCommand::Rename { id, name } => rename_session(state, &id, &name, json).await,
        SessionCommand::Delete { id, force } => delete_session(state, &id, force, json).await,
        SessionCommand::Search { query } => search_sessions(state, &query, json).await,
    }
}

/// List all sessions from the index, marking the current one.
async fn list_sessions(state: &AppState, json: bool) -> Result<()> {
    let stubs = state.conversations.list_sessions().await;
    let current = state.conversations.current_session_id().await?;

    if json {
        let result = serde_json::json!({
            "current": current,
            "sessions": stubs,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if stubs.is_empty() {
        println!();
        println!(
            "  {} No sessions yet. Start one with: {}",
            style("i").blue().bold(),
            style("cbook ask \"your question\"").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Last activity").fg(Color::White),
        Cell::new("Id").fg(Color::White),
    ]);

    for stub in &stubs {
        let name_cell = if Some(stub.id) == current {
            Cell::new(format!("{} (current)", stub.name)).fg(Color::Green)
        } else {
            Cell::new(&stub.name).fg(Color::Cyan)
        };
        table.add_row(vec![
            name_cell,
            Cell::new(local_time(&stub.timestamp)).fg(Color::DarkGrey),
            Cell::new(stub.id).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} session{}",
        style(stubs.len()).bold(),
        if stubs.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Create a session, optionally rename it, and make it current.
async fn new_session(state: &AppState, name: Option<&str>, json: bool) -> Result<()> {
    let session = state.conversations.create_session(None).await?;
    if let Some(name) = name {
        state.conversations.rename_session(&session.id, name).await?;
    }
    state.conversations.set_current_session(&session.id).await?;

    let display_name = name.unwrap_or(&session.name);

    if json {
        let result = serde_json::json!({
            "id": session.id,
            "name": display_name,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!(
            "  {} Created session '{}' and made it current",
            style("ok").green(),
            style(display_name).cyan()
        );
        println!();
    }

    Ok(())
}

/// Print a session transcript.
async fn show_session(state: &AppState, id: &Uuid, json: bool) -> Result<()> {
    let session = state
        .conversations
        .session(id)
        .await?
        .with_context(|| format!("Session '{id}' not found"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style(&session.name).cyan().bold(),
        style(format!("({} messages)", session.messages.len())).dim()
    );
    println!();

    for message in &session.messages {
        let speaker = match message.role {
            MessageRole::User => style("You").yellow().bold(),
            MessageRole::Assistant => style("Assistant").green().bold(),
        };
        println!(
            "  {} {}",
            speaker,
            style(local_time(&message.timestamp)).dim()
        );
        println!("  {}", message.content);
        if !message.attachments.is_empty() {
            let names: Vec<&str> = message
                .attachments
                .iter()
                .map(|a| a.name.as_str())
                .collect();
            println!(
                "  {}",
                style(format!(
                    "[{} attached: {}]",
                    message.attachments.len(),
                    names.join(", ")
                ))
                .dim()
            );
        }
        println!();
    }

    Ok(())
}

/// Rename a session.
async fn rename_session(state: &AppState, id: &Uuid, name: &str, json: bool) -> Result<()> {
    let session = state
        .conversations
        .session(id)
        .await?
        .with_context(|| format!("Session '{id}' not found"))?;

    state.conversations.rename_session(id, name).await?;

    if json {
        let result = serde_json::json!({
            "id": id,
            "name": name,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!(
            "  {} Renamed '{}' to '{}'",
            style("ok").green(),
            style(&session.name).cyan(),
            style(name).cyan()
        );
        println!();
    }

    Ok(())
}

/// Delete a session after confirmation (unless forced).
async fn delete_session(state: &AppState, id: &Uuid, force: bool, json: bool) -> Result<()> {
    let session = state
        .conversations
        .session(id)
        .await?
        .with_context(|| format!("Session '{id}' not found"))?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete session '{}' ({} messages)?",
                session.name,
                session.messages.len()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.conversations.delete_session(id).await?;

    if json {
        let result = serde_json::json!({
            "deleted": id,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!(
            "  {} Deleted session '{}'",
            style("ok").green(),
            style(&session.name).cyan()
        );
        println!();
    }

    Ok(())
}

/// Rank sessions against a query and list the matches.
async fn search_sessions(state: &AppState, query: &str, json: bool) -> Result<()> {
    let matches = state.conversations.search_sessions(query).await?;

    if json {
        let result = matches
            .iter()
            .map(|scored| {
                serde_json::json!({
                    "id": scored.item.id,
                    "name": scored.item.name,
                    "score": scored.score,
                    "messages": scored.item.messages.len(),
                })
            })
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!();
        println!(
            "  {} No sessions matched '{}'",
            style("i").blue().bold(),
            style(query).yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Score").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Messages").fg(Color::White),
        Cell::new("Last activity").fg(Color::White),
    ]);

    for scored in &matches {
        table.add_row(vec![
            Cell::new(format!("{:.0}%", scored.score * 100.0)).fg(Color::Green),
            Cell::new(&scored.item.name).fg(Color::Cyan),
            Cell::new(scored.item.messages.len()),
            Cell::new(local_time(&scored.item.timestamp)).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}
