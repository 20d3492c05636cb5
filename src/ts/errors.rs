use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeSitterError {
    #[error("failed to set language for parser")]
    LanguageSet,

    #[error("failed to parse source code")]
    ParseFailed,

    #[error("no source files given")]
    NoSources,

    #[error("syntax error at {file}:{line}:{column}: {detail} ({count} error(s) in unit)")]
    SyntaxError {
        file: PathBuf,
        line: usize,
        column: usize,
        detail: String,
        byte_start: usize,
        byte_end: usize,
        count: usize,
    },

    #[error("invalid UTF-8 in {path} at {line}:{column}")]
    InvalidUtf8 {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
