//! Terms that can occupy a triple position

use super::store::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stable identifier (URI)
///
/// Serializes as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    /// Create an IRI without validation (trusted constants and rewrites)
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    /// Create an IRI from untrusted input
    ///
    /// Rejects empty strings, whitespace, angle brackets and strings without a scheme.
    pub fn parse(iri: impl Into<String>) -> GraphResult<Self> {
        let iri = iri.into();
        let has_scheme = iri
            .split_once(':')
            .map(|(scheme, _)| {
                !scheme.is_empty()
                    && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                    && scheme
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            })
            .unwrap_or(false);
        let illegal = iri
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '{' | '}' | '\\'));

        if !has_scheme || illegal {
            return Err(GraphError::InvalidIri(iri));
        }
        Ok(Self(iri))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the final `/`
    pub fn last_segment(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Replace every occurrence of `from` with `to`
    pub fn replace(&self, from: &str, to: &str) -> Self {
        Self(self.0.replace(from, to))
    }

    /// Substitute a leading namespace, if present
    pub fn rebase(&self, from: &str, to: &str) -> Option<Self> {
        self.0.strip_prefix(from).map(|rest| Self(format!("{}{}", to, rest)))
    }
}

impl std::fmt::Display for Iri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Iri {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&Iri> for Iri {
    fn from(iri: &Iri) -> Self {
        iri.clone()
    }
}

/// An anonymous identity, unique within one run
///
/// Tokens are random UUIDs, so anonymous identities allocated anywhere in a
/// run never collide when graphs are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlankNode(Uuid);

impl BlankNode {
    /// Allocate a fresh anonymous identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a BlankNode from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Stable token for this identity (hyphen-free UUID)
    pub fn token(&self) -> String {
        self.0.simple().to_string()
    }
}

impl Default for BlankNode {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BlankNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "_:b{}", self.token())
    }
}

/// A literal value, optionally language-tagged or datatyped
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    datatype: Option<Iri>,
}

impl Literal {
    /// A plain string literal
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    /// A language-tagged literal. The tag is kept as given.
    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    /// A literal with a declared datatype
    pub fn typed(value: impl Into<String>, datatype: impl Into<Iri>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: Some(datatype.into()),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn datatype(&self) -> Option<&Iri> {
        self.datatype.as_ref()
    }

    /// True if the language tag equals `language` (case-insensitive)
    pub fn has_language(&self, language: &str) -> bool {
        self.language
            .as_deref()
            .map(|l| l.eq_ignore_ascii_case(language))
            .unwrap_or(false)
    }
}

/// A subject position: identifier or anonymous identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Node {
    Iri(Iri),
    Blank(BlankNode),
}

impl Node {
    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Blank(_))
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Node::Iri(iri) => Some(iri),
            Node::Blank(_) => None,
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Iri(iri) => write!(f, "{}", iri),
            Node::Blank(b) => write!(f, "{}", b),
        }
    }
}

impl From<Iri> for Node {
    fn from(iri: Iri) -> Self {
        Node::Iri(iri)
    }
}

impl From<&Iri> for Node {
    fn from(iri: &Iri) -> Self {
        Node::Iri(iri.clone())
    }
}

impl From<BlankNode> for Node {
    fn from(b: BlankNode) -> Self {
        Node::Blank(b)
    }
}

impl From<&Node> for Node {
    fn from(node: &Node) -> Self {
        node.clone()
    }
}

/// An object position: identifier, anonymous identity, or literal
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Object {
    Iri(Iri),
    Blank(BlankNode),
    Literal(Literal),
}

impl Object {
    /// The object as a node, if it is not a literal
    pub fn as_node(&self) -> Option<Node> {
        match self {
            Object::Iri(iri) => Some(Node::Iri(iri.clone())),
            Object::Blank(b) => Some(Node::Blank(*b)),
            Object::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Object::Literal(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Object::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Object::Blank(_))
    }
}

impl From<Iri> for Object {
    fn from(iri: Iri) -> Self {
        Object::Iri(iri)
    }
}

impl From<&Iri> for Object {
    fn from(iri: &Iri) -> Self {
        Object::Iri(iri.clone())
    }
}

impl From<BlankNode> for Object {
    fn from(b: BlankNode) -> Self {
        Object::Blank(b)
    }
}

impl From<Literal> for Object {
    fn from(l: Literal) -> Self {
        Object::Literal(l)
    }
}

impl From<Node> for Object {
    fn from(node: Node) -> Self {
        match node {
            Node::Iri(iri) => Object::Iri(iri),
            Node::Blank(b) => Object::Blank(b),
        }
    }
}

impl From<&Node> for Object {
    fn from(node: &Node) -> Self {
        node.clone().into()
    }
}
