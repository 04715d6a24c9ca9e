//! Response memory CLI subcommands.
//!
//! The response store is hydrated into AppState at startup, so list and
//! related are pure in-memory reads; only clear touches storage.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;

use casebook_types::memory::StoredResponse;

use crate::cli::format::{local_time, preview};
use crate::state::AppState;

/// Response memory subcommands.
#[derive(Subcommand)]
pub enum ResponseCommand {
    /// List remembered responses, newest first.
    #[command(alias = "ls")]
    List,

    /// Find past responses relevant to a query.
    Related {
        /// Free-text query.
        query: String,
    },

    /// Forget all remembered responses.
    Clear {
        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

/// Handle a response memory subcommand.
pub async fn handle_response_command(
    cmd: ResponseCommand,
    state: &mut AppState,
    json: bool,
) -> Result<()> {
    match cmd {
        ResponseCommand::List => list_responses(state, json),
        ResponseCommand::Related { query } => related_responses(state, &query, json),
        ResponseCommand::Clear { force } => clear_responses(state, force, json).await,
    }
}

/// List every remembered response.
fn list_responses(state: &AppState, json: bool) -> Result<()> {
    let responses = state.responses.responses();

    if json {
        println!("{}", serde_json::to_string_pretty(responses)?);
        return Ok(());
    }

    if responses.is_empty() {
        println!();
        println!(
            "  {} No responses remembered yet",
            style("i").blue().bold()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Recorded").fg(Color::White),
        Cell::new("Response").fg(Color::White),
        Cell::new("Topics").fg(Color::White),
    ]);

    for response in responses {
        table.add_row(vec![
            Cell::new(local_time(&response.timestamp)).fg(Color::DarkGrey),
            Cell::new(preview(&response.text, 60)),
            Cell::new(topic_summary(response)).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} response{}",
        style(responses.len()).bold(),
        if responses.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Rank remembered responses against a query and list the matches.
fn related_responses(state: &AppState, query: &str, json: bool) -> Result<()> {
    let matches = state.responses.related(query);

    if json {
        let result = matches
            .iter()
            .map(|scored| {
                serde_json::json!({
                    "id": scored.item.id,
                    "score": scored.score,
                    "text": scored.item.text,
                })
            })
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!();
        println!(
            "  {} No related responses for '{}'",
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
        Cell::new("Recorded").fg(Color::White),
        Cell::new("Response").fg(Color::White),
    ]);

    for scored in &matches {
        table.add_row(vec![
            Cell::new(format!("{:.0}%", scored.score * 100.0)).fg(Color::Green),
            Cell::new(local_time(&scored.item.timestamp)).fg(Color::DarkGrey),
            Cell::new(preview(&scored.item.text, 60)),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}

/// Forget all remembered responses after confirmation (unless forced).
async fn clear_responses(state: &mut AppState, force: bool, json: bool) -> Result<()> {
    let count = state.responses.len();

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Forget all {count} remembered response{}?",
                if count == 1 { "" } else { "s" }
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.responses.clear().await?;

    if json {
        let result = serde_json::json!({
            "cleared": count,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!(
            "  {} Cleared {} remembered response{}",
            style("ok").green(),
            style(count).bold(),
            if count == 1 { "" } else { "s" }
        );
        println!();
    }

    Ok(())
}

/// First few topics of a response, with a count for the rest.
fn topic_summary(response: &StoredResponse) -> String {
    let shown = response
        .topics
        .iter()
        .take(4)
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let rest = response.topics.len().saturating_sub(4);
    if rest > 0 {
        format!("{shown} (+{rest})")
    } else {
        shown
    }
}
