//! Ask command: send a question to the assistant within a session.
//!
//! Orchestrates one turn: resolve the target session, look up related past
//! answers, render the context window, call the completion provider, then
//! persist both sides of the exchange and remember the answer. Nothing is
//! written when the provider call fails.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use tracing::Instrument;
use uuid::Uuid;

use casebook_core::chat::context::build_context_window;
use casebook_core::llm::provider::CompletionProvider;
use casebook_infra::config::resolve_api_key;
use casebook_infra::llm::AnthropicCompletion;
use casebook_types::chat::{ChatMessage, FileAttachment, MessageRole};

use crate::cli::format::preview;
use crate::state::AppState;

/// System prompt framing the assistant as a legal research aide.
const SYSTEM_PROMPT: &str = "You are a legal research assistant. Answer questions about \
case law, citations, and legal drafting concisely, and name the controlling authorities \
where relevant. You are not a substitute for a licensed attorney.";

pub async fn ask(
    state: &mut AppState,
    question: &str,
    session_id: Option<Uuid>,
    attach: &[PathBuf],
    json: bool,
) -> Result<()> {
    let session = match session_id {
        Some(id) => state
            .conversations
            .session(&id)
            .await?
            .with_context(|| format!("Session '{id}' not found"))?,
        None => state.conversations.current_session().await?,
    };

    // Related answers come from memory as it stood before this turn.
    let related = state.responses.related(question);

    let context = build_context_window(&session.messages);
    let prompt = if context.is_empty() {
        question.to_string()
    } else {
        format!("{context}\n\nUser: {question}")
    };

    let Some(api_key) = resolve_api_key(&state.config) else {
        anyhow::bail!(
            "No API key configured. Set CASEBOOK_API_KEY or ANTHROPIC_API_KEY, \
             or add api_key to {}.",
            state.data_dir.join("config.toml").display()
        );
    };

    let provider = AnthropicCompletion::new(
        api_key,
        state.config.model.clone(),
        state.config.max_output_tokens,
    );
    let provider = match &state.config.base_url {
        Some(base_url) => provider.with_base_url(base_url.clone()),
        None => provider,
    };

    let span = tracing::info_span!(
        "chat",
        "gen_ai.operation.name" = "chat",
        "gen_ai.provider.name" = provider.name(),
        "gen_ai.request.model" = state.config.model.as_str(),
        "gen_ai.request.max_tokens" = state.config.max_output_tokens,
    );
    let answer = provider
        .complete(&prompt, SYSTEM_PROMPT)
        .instrument(span)
        .await
        .context("completion request failed")?;

    let user_message = ChatMessage::new(MessageRole::User, question);
    let user_message = if attach.is_empty() {
        user_message
    } else {
        user_message.with_attachments(load_attachments(attach).await)
    };
    state
        .conversations
        .add_message(&session.id, user_message)
        .await?;
    state
        .conversations
        .add_message(
            &session.id,
            ChatMessage::new(MessageRole::Assistant, answer.clone()),
        )
        .await?;
    let stored = state.responses.record(&answer).await?;

    if json {
        let result = serde_json::json!({
            "session_id": session.id,
            "question": question,
            "answer": answer,
            "response_id": stored.id,
            "related": related
                .iter()
                .map(|scored| serde_json::json!({
                    "id": scored.item.id,
                    "score": scored.score,
                    "text": scored.item.text,
                }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style(&session.name).cyan().bold(),
        style(format!("({})", provider.model())).dim()
    );
    println!();
    println!("  {answer}");
    println!();

    if !related.is_empty() {
        println!("  {}", style("── Related past answers ──").dim());
        for scored in &related {
            println!(
                "  {} {}",
                style(format!("{:>3.0}%", scored.score * 100.0)).green(),
                style(preview(&scored.item.text, 70)).dim()
            );
        }
        println!();
    }

    Ok(())
}

/// Read attachment metadata for each path. Unreadable files still attach
/// by name, just without a size.
async fn load_attachments(paths: &[PathBuf]) -> Vec<FileAttachment> {
    let mut attachments = Vec::with_capacity(paths.len());
    for path in paths {
        let size_bytes = tokio::fs::metadata(path).await.ok().map(|meta| meta.len());
        attachments.push(FileAttachment {
            name: file_name(path),
            size_bytes,
        });
    }
    attachments
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
