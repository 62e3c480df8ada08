//! Conversation state for the follow-up assistant
//!
//! A conversation is scoped to one analysis result and dies with it. The
//! message log is append-only and strictly ordered. Sending is a two-phase
//! update: the user turn is appended synchronously before the network
//! round-trip, and the resolution appends exactly one assistant message,
//! either the backend reply or a fixed fallback.

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::analysis::{AnalysisBackend, AnalysisResult, BackendError, Role, Turn};

pub const CHAT_FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble connecting to the security server right now.";

const CONTEXT_ACK: &str = "Understood. I am ready to explain these findings.";

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Outbound payload for one chat round-trip: the prior turn history plus the
/// new user message.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub history: Vec<Turn>,
    pub message: String,
}

#[derive(Debug)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    context_preamble: String,
    context_injected: bool,
    pending: bool,
}

impl Conversation {
    /// Seeds the conversation with a locally templated assistant greeting.
    /// No backend call is made.
    pub fn start(analysis: &AnalysisResult) -> Self {
        let greeting = format!(
            "I've analyzed this content. It looks {}. Do you have any questions about the {} red flags found?",
            analysis.risk_level,
            analysis.red_flags.len()
        );

        let context_preamble = format!(
            "Context: I just scanned content with Risk Level: {}, Summary: {}, Red Flags: {}.",
            analysis.risk_level,
            analysis.summary,
            analysis.red_flags.join(", ")
        );

        let mut conversation = Self {
            messages: Vec::new(),
            context_preamble,
            context_injected: false,
            pending: false,
        };
        conversation.push(Role::Assistant, &greeting);

        conversation
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Phase one of a send: appends the user message optimistically and
    /// returns the outbound request. A no-op (`None`) for empty or
    /// whitespace-only text, or while an earlier send is still unresolved.
    ///
    /// On the first real turn the outbound history gains two synthetic
    /// turns establishing the analysis context, so the original content
    /// never has to be re-sent. Injected exactly once.
    pub fn begin_send(&mut self, text: &str) -> Option<OutboundRequest> {
        if text.trim().is_empty() || self.pending {
            return None;
        }

        let mut history: Vec<Turn> = self
            .messages
            .iter()
            .map(|message| Turn {
                role: message.role,
                text: message.text.clone(),
            })
            .collect();

        if !self.context_injected && self.messages.len() == 1 {
            history.insert(
                0,
                Turn {
                    role: Role::User,
                    text: self.context_preamble.clone(),
                },
            );
            history.push(Turn {
                role: Role::Assistant,
                text: CONTEXT_ACK.to_string(),
            });
            self.context_injected = true;
        }

        self.push(Role::User, text);
        self.pending = true;

        Some(OutboundRequest {
            history,
            message: text.to_string(),
        })
    }

    /// Phase two: settles the pending send with the backend outcome,
    /// appending either the reply or the fixed fallback message. The
    /// conversation stays usable after a failure.
    pub fn complete_send(&mut self, reply: Result<String, BackendError>) -> &ChatMessage {
        let text = match reply {
            Ok(text) => text,
            Err(error) => {
                warn!(%error, "chat request failed, appending fallback reply");
                CHAT_FALLBACK_REPLY.to_string()
            }
        };

        self.pending = false;
        self.push(Role::Assistant, &text)
    }

    /// Convenience wrapper running both phases around a single backend call.
    pub fn send(&mut self, backend: &dyn AnalysisBackend, text: &str) -> Option<&ChatMessage> {
        let request = self.begin_send(text)?;
        let reply = backend.send_chat(&request.history, &request.message);

        Some(self.complete_send(reply))
    }

    fn push(&mut self, role: Role, text: &str) -> &ChatMessage {
        self.messages.push(ChatMessage {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.to_string(),
            created_at: Utc::now(),
        });

        &self.messages[self.messages.len() - 1]
    }
}
