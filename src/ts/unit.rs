//! Concatenation of input files into one virtual compilation unit.
//!
//! Every declaration across all inputs is addressed through a single byte
//! offset space. Only the first input (the target) lines up with those
//! offsets on disk; later files are shifted by the length of everything
//! before them.

use crate::pool::with_parser;
use crate::ts::errors::TreeSitterError;
use crate::ts::tree::SyntaxTree;
use crate::ts::validator::validate_syntax;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// One input file's slice of the unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSegment {
    pub path: PathBuf,
    /// Byte range of this file inside the concatenated text
    pub range: Range<usize>,
}

/// A resolved source location. Line and column are 1-based and relative to
/// the file the offset falls in; column counts bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position<'a> {
    pub file: &'a Path,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

/// Concatenated text of all inputs plus the offset map back to files.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    text: String,
    segments: Vec<SourceSegment>,
    line_starts: Vec<usize>,
}

impl CompilationUnit {
    /// Read every path in order and concatenate the contents.
    ///
    /// Fails on the first unreadable file; nothing is returned for the files
    /// read before it.
    pub fn read<P: AsRef<Path>>(paths: &[P]) -> Result<Self, TreeSitterError> {
        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let bytes = fs::read(path).map_err(|source| TreeSitterError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let text = decode(path, bytes)?;
            log::debug!("read {} ({} bytes)", path.display(), text.len());
            sources.push((path.to_path_buf(), text));
        }
        Self::from_sources(sources)
    }

    /// Build a unit from text already in memory.
    pub fn from_sources<I, P, S>(sources: I) -> Result<Self, TreeSitterError>
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<PathBuf>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        let mut segments = Vec::new();

        for (path, source) in sources {
            let start = text.len();
            text.push_str(source.as_ref());
            segments.push(SourceSegment {
                path: path.into(),
                range: start..text.len(),
            });
        }

        if segments.is_empty() {
            return Err(TreeSitterError::NoSources);
        }

        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Ok(Self {
            text,
            segments,
            line_starts,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn segments(&self) -> &[SourceSegment] {
        &self.segments
    }

    /// The first input. Referrer queries address offsets against this path.
    pub fn target(&self) -> &SourceSegment {
        &self.segments[0]
    }

    /// Find the segment an offset falls in.
    ///
    /// Empty files own no bytes, so an offset always lands in the last
    /// segment starting at or before it that is non-empty.
    pub fn segment_at(&self, offset: usize) -> Option<&SourceSegment> {
        if offset >= self.text.len() {
            return None;
        }
        let idx = self
            .segments
            .partition_point(|seg| seg.range.start <= offset)
            .checked_sub(1)?;
        self.segments[..=idx]
            .iter()
            .rev()
            .find(|seg| seg.range.contains(&offset))
    }

    /// Map a unit offset back to its file, line and column.
    pub fn position(&self, offset: usize) -> Option<Position<'_>> {
        let segment = self.segment_at(offset)?;

        let line_of = |at: usize| self.line_starts.partition_point(|&start| start <= at) - 1;
        let line = line_of(offset);
        let first_line = line_of(segment.range.start);

        // A file without a trailing newline shares its last line with the
        // start of the next file; columns restart at the segment boundary.
        let line_start = self.line_starts[line].max(segment.range.start);

        Some(Position {
            file: &segment.path,
            line: line - first_line + 1,
            column: offset - line_start + 1,
            offset,
        })
    }

    /// Parse the whole unit as one Go source file.
    ///
    /// Any syntax error aborts; the first one is reported.
    pub fn parse(&self) -> Result<SyntaxTree, TreeSitterError> {
        with_parser(|parser| {
            let parsed = parser.parse_with_source(&self.text)?;
            validate_syntax(self, &parsed)?;
            Ok(SyntaxTree::from_parsed(&parsed))
        })?
    }
}

/// Source text must be UTF-8; the first bad byte is reported by line and
/// column.
fn decode(path: &Path, bytes: Vec<u8>) -> Result<String, TreeSitterError> {
    String::from_utf8(bytes).map_err(|err| {
        let valid = &err.as_bytes()[..err.utf8_error().valid_up_to()];
        let line_start = valid
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        TreeSitterError::InvalidUtf8 {
            path: path.to_path_buf(),
            line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
            column: valid.len() - line_start + 1,
        }
    })
}

/// Read, concatenate and parse `paths` in one step.
pub fn parse_files<P: AsRef<Path>>(
    paths: &[P],
) -> Result<(CompilationUnit, SyntaxTree), TreeSitterError> {
    let unit = CompilationUnit::read(paths)?;
    let tree = unit.parse()?;
    log::debug!(
        "parsed {} file(s), {} bytes, {} declaration(s)",
        unit.segments().len(),
        unit.len(),
        tree.len()
    );
    Ok((unit, tree))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_in_order() {
        let unit =
            CompilationUnit::from_sources([("a.go", "func A() {}\n"), ("b.go", "func B() {}\n")])
                .unwrap();

        assert_eq!(unit.text(), "func A() {}\nfunc B() {}\n");
        assert_eq!(unit.segments().len(), 2);
        assert_eq!(unit.segments()[1].range, 12..24);
        assert_eq!(unit.target().path, PathBuf::from("a.go"));
    }

    #[test]
    fn position_is_relative_to_file() {
        let unit = CompilationUnit::from_sources([
            ("a.go", "package a\n\nfunc A() {}\n"),
            ("b.go", "package a\nfunc B() {}\n"),
        ])
        .unwrap();

        let b = unit.text().find("B()").unwrap();
        let pos = unit.position(b).unwrap();
        assert_eq!(pos.file, Path::new("b.go"));
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 6);

        let a = unit.text().find("A()").unwrap();
        let pos = unit.position(a).unwrap();
        assert_eq!(pos.file, Path::new("a.go"));
        assert_eq!(pos.line, 3);
        assert_eq!(pos.column, 6);
    }

    #[test]
    fn position_without_trailing_newline() {
        let unit =
            CompilationUnit::from_sources([("a.go", "func A() {}"), ("b.go", "func B() {}")])
                .unwrap();

        let pos = unit.position(16).unwrap();
        assert_eq!(pos.file, Path::new("b.go"));
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 6);
    }

    #[test]
    fn empty_files_are_skipped_for_lookup() {
        let unit =
            CompilationUnit::from_sources([("a.go", "func A() {}\n"), ("empty.go", ""), ("c.go", "x")])
                .unwrap();

        assert_eq!(unit.segment_at(12).unwrap().path, PathBuf::from("c.go"));
        assert!(unit.position(13).is_none());
    }

    #[test]
    fn parses_concatenated_files() {
        let unit = CompilationUnit::from_sources([
            ("a.go", "package main\n\nfunc A() {}\n"),
            ("b.go", "package main\n\nfunc (b *B) M() {}\n"),
        ])
        .unwrap();

        let tree = unit.parse().unwrap();
        let names: Vec<_> = tree.declarations().map(|d| d.qualified_name()).collect();
        assert_eq!(names, ["A", "B.M"]);
    }

    #[test]
    fn syntax_error_aborts_parse() {
        let unit = CompilationUnit::from_sources([("a.go", "func A( {\n")]).unwrap();
        assert!(matches!(
            unit.parse(),
            Err(TreeSitterError::SyntaxError { .. })
        ));
    }

    #[test]
    fn no_sources_is_an_error() {
        let sources: Vec<(PathBuf, String)> = Vec::new();
        let result = CompilationUnit::from_sources(sources);
        assert!(matches!(result, Err(TreeSitterError::NoSources)));
    }

    #[test]
    fn unreadable_file_aborts() {
        let dir = tempfile::TempDir::new().unwrap();
        let good = dir.path().join("good.go");
        fs::write(&good, "func Good() {}\n").unwrap();
        let missing = dir.path().join("missing.go");

        let result = CompilationUnit::read(&[good, missing.clone()]);
        match result {
            Err(TreeSitterError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected I/O error, got {:?}", other),
        }
    }

    #[test]
    fn invalid_utf8_is_positioned() {
        let dir = tempfile::TempDir::new().unwrap();
        let bad = dir.path().join("bad.go");
        fs::write(&bad, b"package main\n\nfunc F\xff() {}\n").unwrap();

        match CompilationUnit::read(&[bad.clone()]) {
            Err(TreeSitterError::InvalidUtf8 { path, line, column }) => {
                assert_eq!(path, bad);
                assert_eq!(line, 3);
                assert_eq!(column, 7);
            }
            other => panic!("expected invalid UTF-8 error, got {:?}", other),
        }
    }
}
