use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;

use pdfchat::cli::Cli;
use pdfchat::config::Config;
use pdfchat::document::{Document, PdfExtractor};
use pdfchat::qa::{AnsweringEngine, HfQaModel, QaModel};
use pdfchat::session::{ExtractionOutcome, SessionState};
use pdfchat::shell::Shell;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the shell output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pdfchat=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(model) = cli.model {
        config.model_id = model;
    }
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }

    let model = HfQaModel::new(&config)?;
    // Model readiness is a startup condition: without a working model the
    // tool is useless, so a failure here is fatal.
    model
        .ensure_ready()
        .await
        .context("QA model failed readiness check")?;
    let engine = AnsweringEngine::new(Arc::new(model));

    if let Some(question) = cli.question {
        let file = cli
            .file
            .context("one-shot mode (--question) requires a PDF file argument")?;
        // Same input gate as the shell's /open.
        if !pdfchat::document::has_pdf_extension(&file) {
            anyhow::bail!("only .pdf files are supported, got {}", file.display());
        }
        let document = Document::from_path(&file)?;
        let extraction =
            ExtractionOutcome::from_result(PdfExtractor::new().extract_text(&document.data));
        let result = engine.answer(&question, extraction.answerable_text()).await;
        println!("{}", result.answer);
        println!("Confidence: {}%", result.confidence);
        return Ok(());
    }

    let mut session = SessionState::new();
    let shell = Shell::new(engine, config.history_window);
    if let Some(file) = cli.file {
        shell.handle_open(&mut session, &file);
    }
    shell.run(&mut session).await
}
