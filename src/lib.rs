//! pdfchat: interactive question answering over a PDF document.
//!
//! A thin pipeline around a hosted extractive QA model:
//!
//! 1. [`document`] loads a PDF and extracts its text.
//! 2. [`qa`] truncates the text to the model's context budget, invokes
//!    the model, and reports the answer with a confidence percentage.
//! 3. [`session`] tracks per-session state and the Q/A history.
//! 4. [`shell`] is the interactive terminal loop over it all.

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod qa;
pub mod session;
pub mod shell;

pub use error::Error;
