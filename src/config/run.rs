use crate::config::loader::ConfigError;
use crate::config::schema::{FileConfig, ValidationError, ValidationIssue};
use crate::locator::QualifiedName;
use std::path::{Path, PathBuf};

pub const DEFAULT_SCOPE: &str = ".";
pub const DEFAULT_TOOL: &str = "guru";

/// Declarations with this name are never queried.
pub const ENTRY_POINT: &str = "main";

/// Values given on the command line. `None` leaves the file config or the
/// default in place.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub scope: Option<String>,
    pub tool: Option<String>,
    pub json: Option<bool>,
    pub target_only: Option<bool>,
    pub exclude: Vec<String>,
}

/// Everything one invocation needs, fixed before any work starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    files: Vec<PathBuf>,
    filter: QualifiedName,
    scope: String,
    tool: String,
    json: bool,
    exclude: Vec<String>,
    target_only: bool,
}

impl RunConfig {
    /// Merge defaults, an optional config file and command-line overrides,
    /// in increasing precedence.
    pub fn resolve(
        files: Vec<PathBuf>,
        filter: &str,
        file: Option<FileConfig>,
        overrides: Overrides,
    ) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();
        let mut issues = Vec::new();

        if files.is_empty() {
            issues.push(ValidationIssue::NoInputFiles);
        }

        let filter = filter.parse::<QualifiedName>().unwrap_or_else(|e| {
            issues.push(ValidationIssue::InvalidFilter {
                message: e.to_string(),
            });
            QualifiedName::Any
        });

        let scope = overrides
            .scope
            .or(file.scope)
            .unwrap_or_else(|| DEFAULT_SCOPE.to_string());
        if scope.trim().is_empty() {
            issues.push(ValidationIssue::EmptyField { field: "scope" });
        }

        let tool = overrides
            .tool
            .or(file.tool)
            .unwrap_or_else(|| DEFAULT_TOOL.to_string());
        if tool.trim().is_empty() {
            issues.push(ValidationIssue::EmptyField { field: "tool" });
        }

        let mut exclude = file.exclude;
        exclude.extend(overrides.exclude);
        exclude.sort();
        exclude.dedup();

        if !issues.is_empty() {
            return Err(ValidationError { issues }.into());
        }

        Ok(Self {
            files,
            filter,
            scope,
            tool,
            json: overrides.json.or(file.json).unwrap_or(true),
            exclude,
            target_only: overrides.target_only.or(file.target_only).unwrap_or(false),
        })
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// The first input; referrer queries are addressed against it.
    pub fn target(&self) -> &Path {
        &self.files[0]
    }

    pub fn filter(&self) -> &QualifiedName {
        &self.filter
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn json(&self) -> bool {
        self.json
    }

    pub fn target_only(&self) -> bool {
        self.target_only
    }

    /// `main` is always excluded, on top of the configured names.
    pub fn is_excluded(&self, name: &str) -> bool {
        name == ENTRY_POINT || self.exclude.iter().any(|n| n == name)
    }
}
