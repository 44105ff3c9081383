//! End-to-end edit operations: derive context from a document, run the
//! streaming completion, apply the result.

use crate::client::CompletionClient;
use crate::config::CompletionConfig;
use crate::document::{self, Document};
use crate::progress::ProgressSink;
use crate::prompt;
use crate::types::{Action, EditContext};
use crate::{Error, Result};

/// Run one rewrite/continue operation against a document.
///
/// Validates preconditions before any network call: a blank selection cannot
/// be rewritten, and the hosted default endpoint needs a credential.
/// On success the result is applied to the document (`Rewrite` replaces the
/// selected range, `Continue` inserts at the selection end) and the applied
/// text is returned.
pub async fn run_action(
    action: Action,
    doc: &mut dyn Document,
    config: &CompletionConfig,
    progress: &mut dyn ProgressSink,
) -> Result<String> {
    let selection = doc.selection();
    let selected = doc.read(selection.clone());

    if action == Action::Rewrite && selected.trim().is_empty() {
        return Err(Error::Validation(
            "select some text to rewrite".to_string(),
        ));
    }

    config.validate()?;

    let context = EditContext {
        before: document::context_before(doc, &selection, config.context_before_chars),
        after: document::context_after(doc, &selection, config.context_after_chars),
        selected,
    };

    let messages = prompt::build_messages(config, action, &context);
    let client = CompletionClient::new(config)?;
    let result = client.complete(&messages, progress).await?;

    match action {
        Action::Rewrite => doc.replace(selection, &result),
        Action::Continue => doc.insert(selection.end, &result),
    }

    tracing::debug!(?action, chars = result.chars().count(), "applied completion");
    Ok(result)
}
