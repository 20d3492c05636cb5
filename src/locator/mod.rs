//! Declaration locator.
//!
//! Walks a [`SyntaxTree`] in source order and reports the declarations that
//! satisfy a [`QualifiedName`] filter together with their byte offsets.
//!
//! # Example
//!
//! ```no_run
//! use funcrefs::locator::{Locator, QualifiedName};
//! use funcrefs::ts::CompilationUnit;
//!
//! let unit = CompilationUnit::from_sources([("main.go", "func Foo() {}\nfunc Bar() {}\n")])?;
//! let tree = unit.parse()?;
//!
//! let result = Locator::new(&QualifiedName::Any).locate(&tree);
//! assert_eq!(result.to_string(), "[{Foo 5} {Bar 19}]");
//! # Ok::<(), funcrefs::ts::TreeSitterError>(())
//! ```

pub mod name;
pub mod suggest;

pub use name::{NameError, QualifiedName};
pub use suggest::suggest;

use crate::ts::{DeclarationNode, SyntaxTree, TopLevelDecl, UnresolvedReceiver};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// A located declaration: its qualified name and the byte offset of its
/// name in the compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FuncMatch {
    pub name: String,
    pub offset: usize,
}

impl FuncMatch {
    fn from_decl(decl: &DeclarationNode) -> Self {
        Self {
            name: decl.qualified_name(),
            offset: decl.offset(),
        }
    }
}

/// Ordered matches plus the receivers that could not be resolved on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub matches: Vec<FuncMatch>,
    pub diagnostics: Vec<UnresolvedReceiver>,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FuncMatch> {
        self.matches.iter()
    }
}

/// Prints as `[{Foo 5} {T.Method 40}]`.
impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, m) in self.matches.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{{{} {}}}", m.name, m.offset)?;
        }
        f.write_str("]")
    }
}

/// When a traversal stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Visit every declaration
    FullScan,
    /// Stop after the first match
    FirstMatch,
}

impl Traversal {
    pub fn for_filter(filter: &QualifiedName) -> Self {
        if filter.is_any() {
            Traversal::FullScan
        } else {
            Traversal::FirstMatch
        }
    }

    fn stop_after_match(self) -> bool {
        self == Traversal::FirstMatch
    }
}

/// Matches declarations of a tree against one filter.
#[derive(Debug, Clone)]
pub struct Locator<'a> {
    filter: &'a QualifiedName,
    traversal: Traversal,
    within: Option<Range<usize>>,
}

impl<'a> Locator<'a> {
    pub fn new(filter: &'a QualifiedName) -> Self {
        Self {
            filter,
            traversal: Traversal::for_filter(filter),
            within: None,
        }
    }

    /// Only consider declarations whose offset falls inside `range`.
    pub fn within(mut self, range: Range<usize>) -> Self {
        self.within = Some(range);
        self
    }

    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    /// Walk the tree in source order and collect matches.
    pub fn locate(&self, tree: &SyntaxTree) -> MatchResult {
        let mut result = MatchResult::default();

        for entry in tree.entries() {
            let decl = match entry {
                TopLevelDecl::Resolved(decl) => decl,
                TopLevelDecl::Unresolved(unresolved) => {
                    if self.in_range(unresolved.offset) {
                        log::warn!("{}", unresolved);
                        result.diagnostics.push(unresolved.clone());
                    }
                    continue;
                }
            };

            if !self.in_range(decl.offset()) || !self.filter.matches(decl) {
                continue;
            }

            log::debug!("matched {} at byte {}", decl, decl.offset());
            result.matches.push(FuncMatch::from_decl(decl));

            if self.traversal.stop_after_match() {
                break;
            }
        }

        result
    }

    fn in_range(&self, offset: usize) -> bool {
        self.within
            .as_ref()
            .map_or(true, |range| range.contains(&offset))
    }
}

/// Locate `filter` in `tree` with the traversal policy the filter implies.
pub fn locate(tree: &SyntaxTree, filter: &QualifiedName) -> MatchResult {
    Locator::new(filter).locate(tree)
}
