use miette::IntoDiagnostic as _;

use crate::analysis::AnalysisBackend;
use crate::chat::Conversation;
use crate::report;

pub mod config;
pub mod scan;
pub mod session;

/// Interactive assistant loop shared by the scan and session commands.
/// Finishes on ESC or an empty message.
pub(crate) fn chat_loop(
    backend: &dyn AnalysisBackend,
    conversation: &mut Conversation,
) -> miette::Result<()> {
    if let Some(greeting) = conversation.messages().first() {
        report::print_chat_message(greeting);
    }

    loop {
        let question = inquire::Text::new("You:")
            .with_help_message("ask about the findings, ESC or empty message to finish")
            .prompt_skippable()
            .into_diagnostic()?;

        let Some(question) = question else {
            return Ok(());
        };

        if question.trim().is_empty() {
            return Ok(());
        }

        if let Some(reply) = conversation.send(backend, &question) {
            report::print_chat_message(reply);
        }
    }
}
