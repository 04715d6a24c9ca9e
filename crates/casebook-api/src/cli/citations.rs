//! Citation catalog CLI subcommands.
//!
//! Search runs the keyword pass first, then applies the structured filters
//! (court, year range, substring) to the keyword results. Filter flags with
//! no keyword query compose with the default sample the same way.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use casebook_core::citation::catalog::{available_courts, filter, year_bounds};
use casebook_types::citation::CitationFilter;

use crate::cli::format::preview;
use crate::state::AppState;

/// Citation catalog subcommands.
#[derive(Subcommand)]
pub enum CitationCommand {
    /// Search the catalog by keyword.
    Search {
        /// Keyword query (blank shows a default sample).
        #[arg(default_value = "")]
        query: String,

        /// Filter by exact court name.
        #[arg(long)]
        court: Option<String>,

        /// Filter by earliest decision year (inclusive).
        #[arg(long)]
        year_from: Option<i32>,

        /// Filter by latest decision year (inclusive).
        #[arg(long)]
        year_to: Option<i32>,

        /// Filter by a case-insensitive substring of title, summary, or court.
        #[arg(long)]
        term: Option<String>,
    },

    /// List courts represented in the catalog.
    Courts,
}

/// Handle a citation subcommand.
pub fn handle_citation_command(cmd: CitationCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        CitationCommand::Search {
            query,
            court,
            year_from,
            year_to,
            term,
        } => search_citations(state, &query, court, year_from, year_to, term, json),
        CitationCommand::Courts => list_courts(state, json),
    }
}

/// Keyword search plus structured filters.
fn search_citations(
    state: &AppState,
    query: &str,
    court: Option<String>,
    year_from: Option<i32>,
    year_to: Option<i32>,
    term: Option<String>,
    json: bool,
) -> Result<()> {
    let results = state.catalog.search(query);

    // A single year flag widens to the catalog's bounds on the other side.
    let year_range = match (year_from, year_to) {
        (None, None) => None,
        (from, to) => {
            let (min, max) = year_bounds(state.catalog.entries());
            Some((from.unwrap_or(min), to.unwrap_or(max)))
        }
    };
    let criteria = CitationFilter {
        court,
        year_range,
        search_term: term,
    };
    let matches = filter(&results, &criteria);

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!();
        println!(
            "  {} No citations matched the filters",
            style("i").blue().bold()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Year").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Citation").fg(Color::White),
        Cell::new("Court").fg(Color::White),
        Cell::new("Summary").fg(Color::White),
    ]);

    for citation in &matches {
        table.add_row(vec![
            Cell::new(citation.year),
            Cell::new(&citation.title).fg(Color::Cyan),
            Cell::new(&citation.citation),
            Cell::new(&citation.court).fg(Color::DarkGrey),
            Cell::new(preview(citation.summary.as_deref().unwrap_or(""), 50)).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} citation{}",
        style(matches.len()).bold(),
        if matches.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// List the distinct courts and how many catalog entries each has.
fn list_courts(state: &AppState, json: bool) -> Result<()> {
    let courts = available_courts(state.catalog.entries());

    if json {
        let result = courts
            .iter()
            .map(|court| {
                serde_json::json!({
                    "court": court,
                    "citations": court_count(state, court),
                })
            })
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Court").fg(Color::White),
        Cell::new("Citations").fg(Color::White),
    ]);

    for court in &courts {
        table.add_row(vec![
            Cell::new(court).fg(Color::Cyan),
            Cell::new(court_count(state, court)),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}

fn court_count(state: &AppState, court: &str) -> usize {
    state
        .catalog
        .entries()
        .iter()
        .filter(|citation| citation.court == court)
        .count()
}
