use crate::referrers::errors::QueryError;
use crate::referrers::ReferrerTool;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// `guru referrers` run as a child process.
#[derive(Debug, Clone)]
pub struct GuruTool {
    path: PathBuf,
    json: bool,
}

impl GuruTool {
    /// Resolve `program` on `PATH`, or check it directly when it already
    /// contains a path separator.
    pub fn locate(program: &str, json: bool) -> Result<Self, QueryError> {
        let path = which::which(program).map_err(|source| QueryError::ToolNotFound {
            tool: program.to_string(),
            source,
        })?;
        log::debug!("using referrer tool {}", path.display());
        Ok(Self { path, json })
    }

    /// Arguments for one query, in the order guru expects them.
    pub fn args(&self, scope: &str, position: &str) -> Vec<String> {
        let mut args = Vec::with_capacity(5);
        if self.json {
            args.push("-json".to_string());
        }
        args.extend([
            "-scope".to_string(),
            scope.to_string(),
            "referrers".to_string(),
            position.to_string(),
        ]);
        args
    }
}

impl ReferrerTool for GuruTool {
    fn referrers(&self, scope: &str, position: &str) -> Result<Vec<u8>, QueryError> {
        let args = self.args(scope, position);
        log::debug!("running {} {}", self.path.display(), args.join(" "));

        let output = Command::new(&self.path)
            .args(&args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| QueryError::Spawn {
                tool: self.path.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(QueryError::Failed {
                tool: self.path.clone(),
                position: position.to_string(),
                status: output.status,
            });
        }

        Ok(output.stdout)
    }
}
