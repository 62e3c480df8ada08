//! Session state machine
//!
//! The interactive flow moves through Idle (collecting input), Scanning
//! (one request in flight) and Result (verdict plus conversation). Scan
//! completions are tagged with a token so a completion belonging to an
//! abandoned scan is discarded instead of clobbering a newer session.

use crate::analysis::AnalysisResult;
use crate::chat::Conversation;
use crate::input::{FileMetadata, ScanInput, ScanKind};

/// Identity of one in-flight scan. Only the token minted by the most recent
/// [`Session::begin_scan`] settles the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanToken(u64);

#[derive(Debug)]
pub enum SessionState {
    Idle {
        tab: ScanKind,
        draft: String,
        file: Option<FileMetadata>,
    },
    Scanning {
        token: ScanToken,
    },
    Result {
        analysis: AnalysisResult,
        conversation: Conversation,
    },
}

#[derive(Debug)]
pub struct Session {
    state: SessionState,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: idle_state(ScanKind::Url),
            generation: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Switches the input tab. Only meaningful while Idle; switching clears
    /// the draft input and any selected file.
    pub fn select_tab(&mut self, tab: ScanKind) {
        if let SessionState::Idle { .. } = self.state {
            self.state = idle_state(tab);
        }
    }

    pub fn set_draft(&mut self, value: &str) {
        if let SessionState::Idle { draft, .. } = &mut self.state {
            *draft = value.to_string();
        }
    }

    pub fn set_file(&mut self, metadata: FileMetadata) {
        if let SessionState::Idle { tab, file, .. } = &mut self.state {
            if *tab == ScanKind::File {
                *file = Some(metadata);
            }
        }
    }

    /// Whether the scan action is currently enabled: Idle with a non-empty
    /// draft (URL/text tabs) or a selected file (file tab). Never while a
    /// scan is already running.
    pub fn can_scan(&self) -> bool {
        match &self.state {
            SessionState::Idle { tab, draft, file } => match tab {
                ScanKind::File => file.is_some(),
                _ => !draft.is_empty(),
            },
            _ => false,
        }
    }

    /// Starts a scan: consumes the Idle input into a [`ScanInput`] and moves
    /// to Scanning. Returns `None` when the guard in [`Self::can_scan`]
    /// rejects the action.
    pub fn begin_scan(&mut self) -> Option<(ScanToken, ScanInput)> {
        if !self.can_scan() {
            return None;
        }

        let SessionState::Idle { tab, draft, file } = &self.state else {
            return None;
        };

        let input = match tab {
            ScanKind::Url => ScanInput::Url(draft.clone()),
            ScanKind::Text => ScanInput::Text(draft.clone()),
            ScanKind::File => ScanInput::FileRef(file.clone()?),
        };

        self.generation += 1;
        let token = ScanToken(self.generation);
        self.state = SessionState::Scanning { token };

        Some((token, input))
    }

    /// Settles a scan. Both a real verdict and the fallback result are valid
    /// terminal outcomes; the session always reaches Result, never a stuck
    /// error state. A completion carrying a stale token is discarded and the
    /// current state is left untouched.
    pub fn finish_scan(&mut self, token: ScanToken, analysis: AnalysisResult) -> bool {
        match &self.state {
            SessionState::Scanning { token: current } if *current == token => {
                let conversation = Conversation::start(&analysis);
                self.state = SessionState::Result {
                    analysis,
                    conversation,
                };
                true
            }
            _ => false,
        }
    }

    /// Discards the current result and conversation and returns to a fresh
    /// Idle state. Also abandons an in-flight scan, which is what makes its
    /// token stale.
    pub fn reset(&mut self) {
        self.state = idle_state(ScanKind::Url);
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        match &self.state {
            SessionState::Result { analysis, .. } => Some(analysis),
            _ => None,
        }
    }

    pub fn conversation_mut(&mut self) -> Option<&mut Conversation> {
        match &mut self.state {
            SessionState::Result { conversation, .. } => Some(conversation),
            _ => None,
        }
    }
}

fn idle_state(tab: ScanKind) -> SessionState {
    SessionState::Idle {
        tab,
        draft: String::new(),
        file: None,
    }
}
