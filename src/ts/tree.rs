use crate::ts::parser::ParsedSource;
use std::fmt;
use tree_sitter::Node;

/// A top-level function or method declaration.
///
/// `offset` is the byte offset of the declared name, which is the position
/// referrer tools resolve the symbol from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationNode {
    Function {
        name: String,
        offset: usize,
    },
    Method {
        /// Base named type of the receiver, pointer indirection removed
        receiver: String,
        name: String,
        offset: usize,
    },
}

impl DeclarationNode {
    pub fn name(&self) -> &str {
        match self {
            DeclarationNode::Function { name, .. } | DeclarationNode::Method { name, .. } => name,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            DeclarationNode::Function { offset, .. } | DeclarationNode::Method { offset, .. } => {
                *offset
            }
        }
    }

    pub fn is_method(&self) -> bool {
        matches!(self, DeclarationNode::Method { .. })
    }

    /// `Receiver.Method` for methods, the bare name for functions.
    pub fn qualified_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DeclarationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationNode::Function { name, .. } => f.write_str(name),
            DeclarationNode::Method { receiver, name, .. } => write!(f, "{receiver}.{name}"),
        }
    }
}

/// A method whose receiver type is not a named type or a pointer to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReceiver {
    pub method: String,
    /// Receiver type as written, or empty when the receiver has no type
    pub receiver: String,
    pub offset: usize,
}

impl fmt::Display for UnresolvedReceiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot resolve receiver type `{}` of method {} at byte {}",
            self.receiver, self.method, self.offset
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopLevelDecl {
    Resolved(DeclarationNode),
    Unresolved(UnresolvedReceiver),
}

/// Top-level declarations of a compilation unit, in source order.
///
/// Holds names and offsets only; the tree-sitter tree and source text are
/// not retained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxTree {
    decls: Vec<TopLevelDecl>,
}

impl SyntaxTree {
    pub fn new(decls: Vec<TopLevelDecl>) -> Self {
        Self { decls }
    }

    /// Classify every top-level function and method declaration.
    pub fn from_parsed(parsed: &ParsedSource<'_>) -> Self {
        let root = parsed.root_node();
        let mut cursor = root.walk();
        let decls = root
            .named_children(&mut cursor)
            .filter_map(|node| classify(parsed, node))
            .collect();
        Self { decls }
    }

    pub fn entries(&self) -> &[TopLevelDecl] {
        &self.decls
    }

    /// Successfully classified declarations in source order.
    pub fn declarations(&self) -> impl Iterator<Item = &DeclarationNode> {
        self.decls.iter().filter_map(|entry| match entry {
            TopLevelDecl::Resolved(decl) => Some(decl),
            TopLevelDecl::Unresolved(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

fn classify(parsed: &ParsedSource<'_>, node: Node<'_>) -> Option<TopLevelDecl> {
    let name_node = node.child_by_field_name("name")?;
    let name = parsed.node_text(name_node).to_string();
    let offset = name_node.start_byte();

    match node.kind() {
        "function_declaration" => Some(TopLevelDecl::Resolved(DeclarationNode::Function {
            name,
            offset,
        })),
        "method_declaration" => {
            let receiver_type = node
                .child_by_field_name("receiver")
                .and_then(first_receiver_type);

            let decl = match receiver_type.and_then(|ty| base_type_name(parsed, ty)) {
                Some(receiver) => TopLevelDecl::Resolved(DeclarationNode::Method {
                    receiver,
                    name,
                    offset,
                }),
                None => TopLevelDecl::Unresolved(UnresolvedReceiver {
                    method: name,
                    receiver: receiver_type
                        .map(|ty| parsed.node_text(ty).to_string())
                        .unwrap_or_default(),
                    offset,
                }),
            };
            Some(decl)
        }
        _ => None,
    }
}

/// Type node of the first parameter in a receiver list.
fn first_receiver_type(receiver: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = receiver.walk();
    let param = receiver
        .named_children(&mut cursor)
        .find(|n| n.kind() == "parameter_declaration")?;
    param.child_by_field_name("type")
}

/// `T` and `*T` resolve to `T`; anything else (generics, parenthesized or
/// qualified types) does not resolve.
fn base_type_name(parsed: &ParsedSource<'_>, ty: Node<'_>) -> Option<String> {
    let base = if ty.kind() == "pointer_type" {
        let mut cursor = ty.walk();
        let inner = ty
            .named_children(&mut cursor)
            .find(|n| n.kind() != "comment")?;
        inner
    } else {
        ty
    };

    (base.kind() == "type_identifier").then(|| parsed.node_text(base).to_string())
}
