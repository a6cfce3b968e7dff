//! Session state.
//!
//! One interactive session: the loaded document, its extracted text (or
//! the reason extraction failed), the Q/A history, and a phase machine
//! tracking how far the pipeline has progressed.

mod history;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::document::Document;
use crate::error::ExtractError;

pub use history::{HistoryEntry, HistoryLedger, NumberedEntry};

/// Phase of a session's pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// No document loaded yet.
    NoDocument,
    /// A document has been loaded but not extracted.
    DocumentLoaded,
    /// Text extraction has run (successfully or not).
    TextExtracted,
    /// The QA model is confirmed ready.
    ModelReady,
    /// Questions are being answered.
    Answering,
}

impl SessionPhase {
    /// Check if this phase allows transitioning to another phase.
    ///
    /// The pipeline is one-directional, except `Answering` which
    /// self-loops on each new question, and loading a new document,
    /// which restarts extraction from `DocumentLoaded`.
    pub fn can_transition_to(&self, target: SessionPhase) -> bool {
        use SessionPhase::*;

        matches!(
            (self, target),
            (NoDocument, DocumentLoaded)
                | (DocumentLoaded, TextExtracted)
                | (TextExtracted, ModelReady)
                | (ModelReady, Answering)
                | (Answering, Answering)
                // Re-loading a document mid-session.
                | (TextExtracted, DocumentLoaded)
                | (ModelReady, DocumentLoaded)
                | (Answering, DocumentLoaded)
        )
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NoDocument => "no_document",
            Self::DocumentLoaded => "document_loaded",
            Self::TextExtracted => "text_extracted",
            Self::ModelReady => "model_ready",
            Self::Answering => "answering",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of running extraction on the loaded document.
///
/// A structured failure, not a sentinel string: downstream code branches
/// on the variant instead of pattern-matching error-prefixed text.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// Extraction produced text (possibly empty, for image-only PDFs).
    Extracted(String),
    /// Extraction failed; holds the displayable reason.
    Failed(String),
}

impl ExtractionOutcome {
    pub fn from_result(result: Result<String, ExtractError>) -> Self {
        match result {
            Ok(text) => Self::Extracted(text),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    /// The string handed to the answering engine as document text.
    ///
    /// On failure this is the failure message itself: questions are
    /// still answerable (the model just sees the error text as its
    /// context). Matches the tool's long-standing behavior; the shell
    /// additionally warns the user when extraction failed.
    pub fn answerable_text(&self) -> &str {
        match self {
            Self::Extracted(text) => text,
            Self::Failed(reason) => reason,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// All mutable state for one interactive session.
///
/// Passed by reference to the shell's event handlers; nothing here is
/// global or ambient. Dropped when the session ends.
pub struct SessionState {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    phase: SessionPhase,
    pub document: Option<Document>,
    pub extraction: Option<ExtractionOutcome>,
    pub history: HistoryLedger,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            phase: SessionPhase::NoDocument,
            document: None,
            extraction: None,
            history: HistoryLedger::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Transition to a new phase, enforcing the pipeline order.
    pub fn transition_to(&mut self, target: SessionPhase) -> Result<(), String> {
        if !self.phase.can_transition_to(target) {
            return Err(format!(
                "Cannot transition from {} to {}",
                self.phase, target
            ));
        }
        tracing::debug!(from = %self.phase, to = %target, "session phase transition");
        self.phase = target;
        Ok(())
    }

    /// Record a newly loaded document and its extraction outcome.
    ///
    /// Re-loading replaces the document and extraction but deliberately
    /// leaves prior history in place (see DESIGN.md).
    pub fn set_document(&mut self, document: Document, extraction: ExtractionOutcome) {
        self.document = Some(document);
        self.extraction = Some(extraction);
    }

    /// Whether a question can currently be answered.
    pub fn ready_for_questions(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::ModelReady | SessionPhase::Answering
        ) && self.extraction.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
