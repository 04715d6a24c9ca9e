//! Prompt context rendering over recent session messages.

use casebook_types::chat::{ChatMessage, MessageRole};

/// Number of trailing messages included in the context window.
pub const CONTEXT_WINDOW_MESSAGES: usize = 10;

/// Render the most recent messages as a bounded prompt-context block.
///
/// Takes exactly the last 10 messages regardless of session length. Each
/// message renders as `"User: ..."` or `"Assistant: ..."`, followed by a
/// bracketed note when it carries attachments. Blocks are joined with
/// blank lines.
pub fn build_context_window(messages: &[ChatMessage]) -> String {
    let start = messages.len().saturating_sub(CONTEXT_WINDOW_MESSAGES);
    messages[start..]
        .iter()
        .map(render_message)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_message(message: &ChatMessage) -> String {
    let speaker = match message.role {
        MessageRole::User => "User",
        MessageRole::Assistant => "Assistant",
    };

    let mut block = format!("{speaker}: {}", message.content);
    if !message.attachments.is_empty() {
        let names: Vec<&str> = message
            .attachments
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        block.push_str(&format!(
            "\n[Attached {} file(s): {}]",
            message.attachments.len(),
            names.join(", ")
        ));
    }
    block
}
