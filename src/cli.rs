//! CLI argument handling.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "pdfchat")]
#[command(about = "Ask questions about a PDF using an extractive QA model")]
#[command(version)]
pub struct Cli {
    /// PDF file to load on startup.
    pub file: Option<PathBuf>,

    /// One-shot mode: answer this question and exit (requires FILE).
    #[arg(short, long)]
    pub question: Option<String>,

    /// Model identifier on the inference API.
    #[arg(long, env = "PDFCHAT_MODEL")]
    pub model: Option<String>,

    /// Base URL of the inference API.
    #[arg(long, env = "PDFCHAT_API_URL")]
    pub api_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_no_args() {
        let cli = Cli::try_parse_from(["pdfchat"]).unwrap();
        assert!(cli.file.is_none());
        assert!(cli.question.is_none());
    }

    #[test]
    fn test_parse_file_arg() {
        let cli = Cli::try_parse_from(["pdfchat", "report.pdf"]).unwrap();
        assert_eq!(cli.file.as_deref(), Some(std::path::Path::new("report.pdf")));
    }

    #[test]
    fn test_parse_one_shot() {
        let cli =
            Cli::try_parse_from(["pdfchat", "-q", "What is this about?", "report.pdf"]).unwrap();
        assert_eq!(cli.question.as_deref(), Some("What is this about?"));
        assert!(cli.file.is_some());
    }

    #[test]
    fn test_parse_model_override() {
        let cli = Cli::try_parse_from(["pdfchat", "--model", "my/model"]).unwrap();
        assert_eq!(cli.model.as_deref(), Some("my/model"));
    }
}
