//! Question/answer history.
//!
//! Append-only within a session. The ledger dedupes consecutive appends
//! of the same question (UI layers tend to re-fire the current question
//! on every event) and exposes a windowed, most-recent-first view with
//! sequence numbers that stay stable as old entries scroll out.

use chrono::{DateTime, Utc};

/// One question/answer pair.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub question: String,
    /// `None` when no answer was available at append time.
    pub answer: Option<String>,
    pub asked_at: DateTime<Utc>,
}

/// A history entry paired with its 1-based position in the full history.
///
/// Numbering is computed from the full sequence, not the displayed
/// window, so `Q7` stays `Q7` after it scrolls out of view.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedEntry<'a> {
    pub number: usize,
    pub entry: &'a HistoryEntry,
}

/// Bounded-display, unbounded-storage Q/A log for one session.
#[derive(Debug, Default)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
    last_question: Option<String>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry unless `question` matches the last question
    /// appended. Returns whether an entry was added.
    ///
    /// The first call always appends. An absent answer never blocks the
    /// append; the entry is recorded with `answer: None`.
    pub fn append_if_new(&mut self, question: &str, answer: Option<String>) -> bool {
        if self.last_question.as_deref() == Some(question) {
            return false;
        }
        self.entries.push(HistoryEntry {
            question: question.to_string(),
            answer,
            asked_at: Utc::now(),
        });
        self.last_question = Some(question.to_string());
        true
    }

    /// The question most recently appended, if any.
    pub fn last_question(&self) -> Option<&str> {
        self.last_question.as_deref()
    }

    /// Total number of entries ever appended this session.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The last `n` entries, most recent first, with stable numbering.
    pub fn recent(&self, n: usize) -> Vec<NumberedEntry<'_>> {
        let total = self.entries.len();
        let start = total.saturating_sub(n);
        self.entries[start..]
            .iter()
            .enumerate()
            .map(|(offset, entry)| NumberedEntry {
                number: start + offset + 1,
                entry,
            })
            .rev()
            .collect()
    }
}
