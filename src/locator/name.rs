use crate::ts::DeclarationNode;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("name '{0}' contains whitespace")]
    Whitespace(String),

    #[error("method name '{0}' must have the form Type.Method")]
    IncompleteMethod(String),
}

/// The declaration a run is looking for.
///
/// A `.` selects method matching and its absence selects function matching;
/// one filter never tries both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QualifiedName {
    /// Empty filter: every declaration
    #[default]
    Any,
    Function(String),
    Method {
        receiver: String,
        method: String,
    },
}

impl QualifiedName {
    /// Parse a filter without validating its shape.
    ///
    /// Splits at the first `.`, so `A.B.C` asks for method `B.C` on `A` and
    /// can never match a Go declaration.
    pub fn parse(filter: &str) -> Self {
        if filter.is_empty() {
            return QualifiedName::Any;
        }
        match filter.split_once('.') {
            Some((receiver, method)) => QualifiedName::Method {
                receiver: receiver.to_string(),
                method: method.to_string(),
            },
            None => QualifiedName::Function(filter.to_string()),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, QualifiedName::Any)
    }

    /// Exact, case-sensitive match against a classified declaration.
    pub fn matches(&self, decl: &DeclarationNode) -> bool {
        match (self, decl) {
            (QualifiedName::Any, _) => true,
            (QualifiedName::Function(want), DeclarationNode::Function { name, .. }) => want == name,
            (
                QualifiedName::Method { receiver, method },
                DeclarationNode::Method {
                    receiver: recv,
                    name,
                    ..
                },
            ) => receiver == recv && method == name,
            _ => false,
        }
    }
}

impl FromStr for QualifiedName {
    type Err = NameError;

    /// Parse and reject filters that cannot name a declaration.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().any(char::is_whitespace) {
            return Err(NameError::Whitespace(s.to_string()));
        }
        let name = Self::parse(s);
        if let QualifiedName::Method { receiver, method } = &name {
            if receiver.is_empty() || method.is_empty() {
                return Err(NameError::IncompleteMethod(s.to_string()));
            }
        }
        Ok(name)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualifiedName::Any => Ok(()),
            QualifiedName::Function(name) => f.write_str(name),
            QualifiedName::Method { receiver, method } => write!(f, "{receiver}.{method}"),
        }
    }
}
