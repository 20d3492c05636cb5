use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("referrer tool '{tool}' not found: {source}")]
    ToolNotFound {
        tool: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status} for {position}")]
    Failed {
        tool: PathBuf,
        position: String,
        status: std::process::ExitStatus,
    },

    #[error("failed to write referrer output: {0}")]
    Output(#[from] std::io::Error),
}
