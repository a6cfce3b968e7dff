//! Interactive presentation shell.
//!
//! An explicit event loop over user actions: each line of input becomes
//! one [`ShellInput`], each input has one handler that reads the current
//! [`SessionState`], computes the next result, writes state back, and
//! prints. All session state lives in the `SessionState` passed to
//! [`Shell::run`]; nothing is ambient.

mod commands;

use std::path::Path;

use crossterm::style::Stylize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::document::{Document, PdfExtractor};
use crate::qa::AnsweringEngine;
use crate::session::{ExtractionOutcome, SessionPhase, SessionState};

pub use commands::{ShellInput, help_text, parse_input};

/// The interactive shell for one session.
pub struct Shell {
    engine: AnsweringEngine,
    extractor: PdfExtractor,
    history_window: usize,
}

impl Shell {
    pub fn new(engine: AnsweringEngine, history_window: usize) -> Self {
        Self {
            engine,
            extractor: PdfExtractor::new(),
            history_window,
        }
    }

    /// Run the read-eval-print loop until `/quit` or EOF.
    pub async fn run(&self, session: &mut SessionState) -> anyhow::Result<()> {
        println!(
            "{} model: {}",
            "pdfchat".bold(),
            self.engine.model_id().to_string().cyan()
        );
        if session.document.is_none() {
            println!("Load a PDF with {} to get started.", "/open <file.pdf>".bold());
        }

        let mut editor = DefaultEditor::new()?;
        loop {
            let line = match editor.readline("pdfchat> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            };
            let _ = editor.add_history_entry(line.as_str());

            if !self.handle_input(session, parse_input(&line)).await {
                break;
            }
        }

        tracing::info!(
            session_id = %session.session_id,
            questions = session.history.len(),
            "session ended"
        );
        Ok(())
    }

    /// Dispatch one parsed input to its handler.
    ///
    /// Returns `false` when the session should end. This is the whole
    /// event loop minus the terminal: every user action goes through
    /// here, so tests can drive the shell without a tty.
    pub async fn handle_input(&self, session: &mut SessionState, input: ShellInput) -> bool {
        match input {
            ShellInput::Open(path) => self.handle_open(session, &path),
            ShellInput::Question(question) => {
                self.handle_question(session, &question).await;
            }
            ShellInput::Empty => {
                // Empty submit: warn, append nothing, never invoke
                // the model.
                warn("Please enter a question!");
            }
            ShellInput::Text => self.handle_show_text(session),
            ShellInput::History => self.handle_show_history(session),
            ShellInput::Help => println!("{}", help_text()),
            ShellInput::Unknown(reason) => warn(&reason),
            ShellInput::Quit => return false,
        }
        true
    }

    /// Handle a document load: read, extract, report.
    pub fn handle_open(&self, session: &mut SessionState, path: &Path) {
        if !crate::document::has_pdf_extension(path) {
            warn("Only .pdf files are supported.");
            return;
        }

        let document = match Document::from_path(path) {
            Ok(doc) => doc,
            Err(e) => {
                warn(&format!("Could not read {}: {}", path.display(), e));
                return;
            }
        };

        if let Err(e) = session.transition_to(SessionPhase::DocumentLoaded) {
            // Only reachable from NoDocument or a post-extraction phase,
            // so a failure here is a programming error worth surfacing.
            warn(&e);
            return;
        }

        println!(
            "Loaded {} ({:.2} KiB)",
            document.name.as_str().bold(),
            document.size_kib()
        );

        let extraction =
            ExtractionOutcome::from_result(self.extractor.extract_text(&document.data));
        match &extraction {
            ExtractionOutcome::Extracted(text) => {
                tracing::info!(
                    document = %document.name,
                    chars = text.chars().count(),
                    "text extracted"
                );
                if text.is_empty() {
                    warn("No text could be extracted; the PDF may contain only images.");
                } else {
                    println!("Extracted {} characters. Use /text to view.", text.chars().count());
                }
            }
            ExtractionOutcome::Failed(reason) => {
                tracing::warn!(document = %document.name, %reason, "extraction failed");
                warn(&format!("Error extracting text: {reason}"));
            }
        }

        session.set_document(document, extraction);
        session
            .transition_to(SessionPhase::TextExtracted)
            .and_then(|_| session.transition_to(SessionPhase::ModelReady))
            .expect("extraction phases follow document load");
        println!("Ready to answer questions!");
    }

    /// Handle a question: truncate, ask the model, record, render.
    pub async fn handle_question(&self, session: &mut SessionState, question: &str) {
        if !session.ready_for_questions() {
            warn("Load a PDF with /open before asking questions.");
            return;
        }
        let Some(extraction) = session.extraction.clone() else {
            warn("No document text available.");
            return;
        };
        if extraction.is_failed() {
            // Still answerable (the model sees the failure text as its
            // context), but make the situation visible.
            warn("Extraction failed for this document; answers will not be meaningful.");
        }

        session
            .transition_to(SessionPhase::Answering)
            .expect("ready_for_questions implies answering is reachable");

        let result = self
            .engine
            .answer(question, extraction.answerable_text())
            .await;

        println!("{}", "Answer:".bold());
        println!("  {}", result.answer);
        println!("  {}", format!("Confidence: {}%", result.confidence).dim());

        session
            .history
            .append_if_new(question, Some(result.answer));
    }

    fn handle_show_text(&self, session: &SessionState) {
        match &session.extraction {
            Some(ExtractionOutcome::Extracted(text)) if !text.is_empty() => {
                println!("{}", text);
            }
            Some(ExtractionOutcome::Extracted(_)) => {
                println!("(no text was extracted from this document)");
            }
            Some(ExtractionOutcome::Failed(reason)) => {
                warn(&format!("Error extracting text: {reason}"));
            }
            None => warn("No document loaded."),
        }
    }

    fn handle_show_history(&self, session: &SessionState) {
        if session.history.is_empty() {
            println!("No questions asked yet.");
            return;
        }
        println!("{}", "Chat history".bold());
        for numbered in session.history.recent(self.history_window) {
            // Unanswered entries stay in the ledger but are not shown.
            let Some(answer) = &numbered.entry.answer else {
                continue;
            };
            println!(
                "  {} {}",
                format!("Q{}:", numbered.number).bold(),
                numbered.entry.question
            );
            println!("  A: {}", answer);
        }
    }
}

fn warn(message: &str) {
    println!("{}", message.to_string().yellow());
}
