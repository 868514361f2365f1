use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for proxysheet operations
#[derive(Error, Diagnostic, Debug)]
pub enum ProxyError {
    #[error("Image list not found: {}", path.display())]
    #[diagnostic(
        code(proxysheet::manifest::not_found),
        help("Pass the image list with --input (default: images.txt)")
    )]
    ManifestNotFound { path: PathBuf },

    #[error("Malformed image list at line {line}: {message}")]
    #[diagnostic(code(proxysheet::manifest::format))]
    ManifestFormat {
        line: usize,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid background colour: {input}")]
    #[diagnostic(code(proxysheet::colour))]
    InvalidColour {
        input: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to process {}: {message}", path.display())]
    #[diagnostic(code(proxysheet::image))]
    Image { path: PathBuf, message: String },

    #[error("Invalid layout: {message}")]
    #[diagnostic(code(proxysheet::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("IO error with {}: {message}", path.display())]
    #[diagnostic(code(proxysheet::io))]
    Io { path: PathBuf, message: String },

    #[error("PDF error: {message}")]
    #[diagnostic(code(proxysheet::pdf))]
    Pdf { message: String },
}

pub type Result<T> = std::result::Result<T, ProxyError>;
