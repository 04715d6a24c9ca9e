//! System status dashboard command.

use anyhow::Result;
use console::style;

use casebook_core::citation::catalog::{available_courts, year_bounds};
use casebook_core::memory::store::{MAX_STORED_RESPONSES, RESPONSES_KEY};
use casebook_core::storage::kv_store::KeyValueStore;

use crate::cli::format::local_time;
use crate::state::AppState;

/// Display system status dashboard.
///
/// Shows response memory usage, session counts, catalog coverage, and
/// storage info.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    // Gather stats
    let response_count = state.responses.len();
    let last_recorded = state
        .kv
        .get_entry(RESPONSES_KEY)
        .await?
        .map(|entry| entry.updated_at);

    let sessions = state.conversations.list_sessions().await;
    let current_id = state.conversations.current_session_id().await?;
    let current_name = current_id
        .and_then(|id| sessions.iter().find(|stub| stub.id == id))
        .map(|stub| stub.name.clone());

    let courts = available_courts(state.catalog.entries());
    let (year_min, year_max) = year_bounds(state.catalog.entries());

    let storage_keys = state.kv.list_keys().await?;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "responses": {
                "count": response_count,
                "capacity": MAX_STORED_RESPONSES,
                "last_recorded": last_recorded,
            },
            "sessions": {
                "count": sessions.len(),
                "current": current_id,
            },
            "citations": {
                "entries": state.catalog.len(),
                "courts": courts.len(),
                "years": [year_min, year_max],
            },
            "storage_keys": storage_keys.len(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Casebook v{}",
        style("⚖").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    // Response memory
    println!("  {}", style("── Memory ──").dim());
    println!(
        "  Responses: {} / {}",
        style(response_count).bold(),
        MAX_STORED_RESPONSES
    );
    if let Some(at) = last_recorded {
        println!("  Recorded:  {}", style(local_time(&at)).dim());
    }
    println!();

    // Sessions
    println!("  {}", style("── Sessions ──").dim());
    println!("  Total:   {}", style(sessions.len()).bold());
    println!(
        "  Current: {}",
        match &current_name {
            Some(name) => style(name.as_str()).cyan(),
            None => style("none").dim(),
        }
    );
    println!();

    // Citation catalog
    println!("  {}", style("── Citations ──").dim());
    println!("  Entries: {}", style(state.catalog.len()).bold());
    println!("  Courts:  {}", courts.len());
    println!("  Years:   {year_min}-{year_max}");
    println!();

    // System
    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!(
        "  Keys:     {}",
        style(storage_keys.len()).dim()
    );
    println!();

    Ok(())
}
