use crate::ts::errors::TreeSitterError;
use crate::ts::parser::ParsedSource;
use crate::ts::unit::CompilationUnit;

/// Node kinds allowed directly under `source_file`.
const TOP_LEVEL_KINDS: &[&str] = &[
    "package_clause",
    "import_declaration",
    "function_declaration",
    "method_declaration",
    "type_declaration",
    "var_declaration",
    "const_declaration",
    "comment",
];

/// A syntax problem: its byte span and a short description.
struct Problem {
    byte_start: usize,
    byte_end: usize,
    detail: String,
}

/// Validate that a parsed unit has no syntax errors.
///
/// Reports the first problem in document order, positioned in the file it
/// falls in, together with the total number found. Problems are ERROR and
/// MISSING nodes plus statements at the top level, which the grammar
/// accepts but Go does not.
pub fn validate_syntax(
    unit: &CompilationUnit,
    parsed: &ParsedSource<'_>,
) -> Result<(), TreeSitterError> {
    let mut problems: Vec<Problem> = parsed
        .error_nodes()
        .into_iter()
        .map(|node| Problem {
            byte_start: node.byte_start,
            byte_end: node.byte_end,
            detail: node.describe(),
        })
        .collect();
    problems.extend(stray_top_level(parsed));

    if problems.is_empty() {
        if parsed.has_errors() {
            return Err(TreeSitterError::ParseFailed);
        }
        return Ok(());
    }

    let count = problems.len();
    let Some(first) = problems.into_iter().min_by_key(|p| p.byte_start) else {
        return Err(TreeSitterError::ParseFailed);
    };

    // MISSING nodes are zero-width and may sit at the very end of the text
    let at = first.byte_start.min(unit.len().saturating_sub(1));
    let (file, line, column) = match unit.position(at) {
        Some(pos) => (pos.file.to_path_buf(), pos.line, pos.column),
        None => (unit.target().path.clone(), 1, 1),
    };

    Err(TreeSitterError::SyntaxError {
        file,
        line,
        column,
        detail: first.detail,
        byte_start: first.byte_start,
        byte_end: first.byte_end,
        count,
    })
}

fn stray_top_level(parsed: &ParsedSource<'_>) -> Vec<Problem> {
    let root = parsed.root_node();
    let mut cursor = root.walk();
    root.named_children(&mut cursor)
        // ERROR nodes are already reported
        .filter(|node| !node.is_error() && !TOP_LEVEL_KINDS.contains(&node.kind()))
        .map(|node| Problem {
            byte_start: node.start_byte(),
            byte_end: node.end_byte(),
            detail: format!("non-declaration statement outside function body ({})", node.kind()),
        })
        .collect()
}
