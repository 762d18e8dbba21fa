//! Subject–predicate–object statements

use super::term::{Iri, Node, Object};
use serde::{Deserialize, Serialize};

/// A single statement in a graph
///
/// Ordering is total so graphs iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Node,
    pub predicate: Iri,
    pub object: Object,
}

impl Triple {
    pub fn new(
        subject: impl Into<Node>,
        predicate: impl Into<Iri>,
        object: impl Into<Object>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// True if the subject or object is anonymous
    pub fn has_blank_node(&self) -> bool {
        self.subject.is_blank() || self.object.is_blank()
    }

    /// True if `iri` appears as subject or object
    pub fn mentions(&self, iri: &Iri) -> bool {
        self.subject.as_iri() == Some(iri) || self.object.as_iri() == Some(iri)
    }
}
