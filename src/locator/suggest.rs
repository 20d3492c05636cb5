use crate::locator::QualifiedName;
use crate::ts::SyntaxTree;

const MIN_SIMILARITY: f64 = 0.8;

/// Qualified names of declarations that look like `filter`, best first.
///
/// Only declarations of the kind the filter asks for are considered, so a
/// `Type.Method` filter is never answered with a plain function. Returns
/// nothing for the empty filter.
pub fn suggest(tree: &SyntaxTree, filter: &QualifiedName, limit: usize) -> Vec<String> {
    let wanted = match filter {
        QualifiedName::Any => return Vec::new(),
        QualifiedName::Function(_) => false,
        QualifiedName::Method { .. } => true,
    };
    let target = filter.to_string();

    let mut scored: Vec<(f64, String)> = tree
        .declarations()
        .filter(|decl| decl.is_method() == wanted)
        .map(|decl| decl.qualified_name())
        .filter(|name| *name != target)
        .map(|name| (strsim::jaro_winkler(&target, &name), name))
        .filter(|(score, _)| *score >= MIN_SIMILARITY)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    scored.dedup_by(|a, b| a.1 == b.1);
    scored.into_iter().take(limit).map(|(_, name)| name).collect()
}
