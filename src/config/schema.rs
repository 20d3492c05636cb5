use serde::Deserialize;
use std::fmt;

/// Settings read from a `funcrefs.toml` file. Every field is optional; the
/// command line overrides whatever is set here.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Scope passed through to the referrer tool
    pub scope: Option<String>,
    /// Program name or path of the referrer tool
    pub tool: Option<String>,
    /// Ask the tool for JSON output
    pub json: Option<bool>,
    /// Names never queried, in addition to `main`
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Only consider declarations that live in the first input file
    pub target_only: Option<bool>,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if matches!(&self.scope, Some(scope) if scope.trim().is_empty()) {
            issues.push(ValidationIssue::EmptyField { field: "scope" });
        }
        if matches!(&self.tool, Some(tool) if tool.trim().is_empty()) {
            issues.push(ValidationIssue::EmptyField { field: "tool" });
        }
        for (index, name) in self.exclude.iter().enumerate() {
            if name.trim().is_empty() {
                issues.push(ValidationIssue::BlankExclude { index });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyField { field: &'static str },
    BlankExclude { index: usize },
    NoInputFiles,
    InvalidFilter { message: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyField { field } => write!(f, "field '{field}' must not be empty"),
            ValidationIssue::BlankExclude { index } => {
                write!(f, "exclude entry {index} is blank")
            }
            ValidationIssue::NoInputFiles => write!(f, "at least one source file is required"),
            ValidationIssue::InvalidFilter { message } => write!(f, "invalid filter: {message}"),
        }
    }
}
