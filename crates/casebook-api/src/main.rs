//! Casebook CLI entry point.
//!
//! Binary name: `cbook`
//!
//! Parses CLI arguments, initializes storage and stores, then dispatches to
//! the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,casebook=debug",
        _ => "trace",
    };

    // Stdout span export is opt-in; far too noisy for normal use.
    let enable_otel = std::env::var("CASEBOOK_OTEL").is_ok_and(|v| v == "1" || v == "true");
    if let Err(e) = casebook_observe::tracing_setup::init_tracing(filter, enable_otel) {
        eprintln!("warning: failed to initialize tracing: {e}");
    }

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "cbook", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state (DB, stores, config)
    let mut state = AppState::init().await?;

    match cli.command {
        Commands::Ask {
            question,
            session,
            attach,
        } => {
            cli::ask::ask(&mut state, &question, session, &attach, cli.json).await?;
        }

        Commands::Sessions { action } => {
            cli::sessions::handle_session_command(action, &state, cli.json).await?;
        }

        Commands::Responses { action } => {
            cli::responses::handle_response_command(action, &mut state, cli.json).await?;
        }

        Commands::Citations { action } => {
            cli::citations::handle_citation_command(action, &state, cli.json)?;
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    casebook_observe::tracing_setup::shutdown_tracing();

    Ok(())
}
