//! Error types for pdfchat.

/// Top-level error type for the tool.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },
}

/// PDF text extraction errors.
///
/// An empty extraction result is not an error: image-only documents
/// legitimately produce no text. These variants cover inputs the parser
/// cannot make sense of at all.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Not a valid PDF file (missing %PDF header)")]
    NotAPdf,

    #[error("Malformed PDF: {reason}")]
    Malformed { reason: String },

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

/// QA model invocation errors.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Authentication failed (check HF_API_TOKEN)")]
    AuthFailed,

    #[error("Rate limited by the inference API")]
    RateLimited,

    #[error("Model is still loading, estimated {estimated_secs:.0}s")]
    ModelLoading { estimated_secs: f64 },

    #[error("Invalid model response: {reason}")]
    InvalidResponse { reason: String },
}
