//! Prompt assembly: configuration + edit context in, ordered message
//! sequence out.
//!
//! Pure function of its inputs; absent optional segments degrade to
//! omission, never to an error.

use crate::config::CompletionConfig;
use crate::types::{Action, EditContext, Message};

/// Fallback user instruction for [`Action::Continue`] when no user prompt is
/// configured.
const CONTINUE_FALLBACK: &str = "Please continue.";

/// Build the role-tagged message sequence for one request.
///
/// A non-empty system prompt always comes first. `Continue` primes the model
/// with the preceding text framed as its own prior output, so it extends the
/// text instead of commenting on it; the selected fragment is ignored in
/// that mode. `Rewrite` packs the instruction, optional context block, and
/// quoted fragment into a single user message, optionally followed by a
/// trailing assistant message.
pub fn build_messages(
    config: &CompletionConfig,
    action: Action,
    context: &EditContext,
) -> Vec<Message> {
    let mut messages = Vec::new();

    if !config.system_prompt.is_empty() {
        messages.push(Message::system(&config.system_prompt));
    }

    match action {
        Action::Continue => {
            if !config.user_prompt.is_empty() {
                messages.push(Message::user(&config.user_prompt));
            } else {
                messages.push(Message::user(CONTINUE_FALLBACK));
            }

            if !context.before.trim().is_empty() {
                messages.push(Message::assistant(&context.before));
            }
        }
        Action::Rewrite => {
            let mut user_content = String::new();

            if !config.user_prompt.is_empty() {
                user_content.push_str(&config.user_prompt);
                user_content.push_str("\n\n");
            }

            let mut context_text = String::new();
            if !context.before.trim().is_empty() {
                context_text.push_str(&context.before);
            }
            if config.include_selection_in_context && !context.selected.trim().is_empty() {
                context_text.push_str(&context.selected);
            }
            if !context.after.trim().is_empty() {
                context_text.push_str(&context.after);
            }

            if !context_text.trim().is_empty() {
                user_content.push_str("Here is some context:\n\"");
                user_content.push_str(&context_text);
                user_content.push_str("\"\n\n");
            }

            user_content.push_str("Please rewrite the following fragment:\n\n\"");
            user_content.push_str(&context.selected);
            user_content.push('"');

            messages.push(Message::user(user_content));

            if !config.assistant_prompt.is_empty() {
                messages.push(Message::assistant(&config.assistant_prompt));
            }
        }
    }

    messages
}
