//! funcrefs: find Go declarations by name and ask guru who refers to them.
//!
//! Input files are concatenated into one virtual compilation unit and parsed
//! with tree-sitter's Go grammar. Top-level functions and methods are
//! matched against a filter (`Func`, `Type.Method`, or empty for all) and
//! reported with the byte offset of their name. Each offset becomes a
//! `file:#offset` position for `guru referrers`.
//!
//! # Example
//!
//! ```no_run
//! use funcrefs::config::{Overrides, RunConfig};
//! use funcrefs::locator::Locator;
//! use funcrefs::referrers::{query_referrers, GuruTool};
//! use funcrefs::ts::parse_files;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RunConfig::resolve(
//!     vec!["server.go".into()],
//!     "Server.Serve",
//!     None,
//!     Overrides::default(),
//! )?;
//!
//! let (_unit, tree) = parse_files(config.files())?;
//! let matches = Locator::new(config.filter()).locate(&tree);
//! println!("{}", matches);
//!
//! let guru = GuruTool::locate(config.tool(), config.json())?;
//! query_referrers(&guru, &config, &matches, &mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod locator;
pub mod pool;
pub mod referrers;
pub mod ts;

// Re-exports
pub use config::{load_from_path, ConfigError, FileConfig, Overrides, RunConfig};
pub use locator::{locate, FuncMatch, Locator, MatchResult, QualifiedName};
pub use referrers::{query_referrers, GuruTool, QueryError, QueryReport, ReferrerTool};
pub use ts::{parse_files, CompilationUnit, DeclarationNode, SyntaxTree, TreeSitterError};
