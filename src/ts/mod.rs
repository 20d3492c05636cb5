//! Tree-sitter integration for Go source.
//!
//! Input files are concatenated into one [`CompilationUnit`], parsed with the
//! Go grammar, and reduced to a [`SyntaxTree`] of top-level function and
//! method declarations carrying byte offsets into the unit.

pub mod errors;
pub mod parser;
pub mod tree;
pub mod unit;
pub mod validator;

pub use errors::TreeSitterError;
pub use parser::{GoParser, ParsedSource};
pub use tree::{DeclarationNode, SyntaxTree, TopLevelDecl, UnresolvedReceiver};
pub use unit::{parse_files, CompilationUnit, Position, SourceSegment};
pub use validator::validate_syntax;
