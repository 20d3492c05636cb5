pub mod loader;
pub mod run;
pub mod schema;

pub use loader::{load_from_path, load_from_str, ConfigError};
pub use run::{Overrides, RunConfig, DEFAULT_SCOPE, DEFAULT_TOOL, ENTRY_POINT};
pub use schema::{FileConfig, ValidationError, ValidationIssue};
