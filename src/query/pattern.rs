//! Triple patterns for locating statements

use crate::graph::{Graph, Iri, Node, Object, Triple};

/// A triple pattern; `None` positions match anything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: Option<Node>,
    pub predicate: Option<Iri>,
    pub object: Option<Object>,
    /// Only literal objects with this datatype
    pub object_datatype: Option<Iri>,
    /// Only literal objects with this language tag
    pub object_language: Option<String>,
}

impl TriplePattern {
    /// Create an empty pattern (matches all triples)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject: impl Into<Node>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_predicate(mut self, predicate: impl Into<Iri>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn with_object(mut self, object: impl Into<Object>) -> Self {
        self.object = Some(object.into());
        self
    }

    /// Filter to literal objects of the given datatype
    pub fn with_datatype(mut self, datatype: impl Into<Iri>) -> Self {
        self.object_datatype = Some(datatype.into());
        self
    }

    /// Filter to literal objects in the given language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.object_language = Some(language.into());
        self
    }

    /// Execute the pattern against a graph
    pub fn execute(&self, graph: &Graph) -> Vec<Triple> {
        graph.matching(self)
    }

    /// Check if a triple satisfies every bound position
    pub fn matches(&self, triple: &Triple) -> bool {
        if let Some(ref s) = self.subject {
            if &triple.subject != s {
                return false;
            }
        }

        if let Some(ref p) = self.predicate {
            if &triple.predicate != p {
                return false;
            }
        }

        if let Some(ref o) = self.object {
            if &triple.object != o {
                return false;
            }
        }

        if let Some(ref dt) = self.object_datatype {
            match triple.object.as_literal() {
                Some(l) if l.datatype() == Some(dt) => {}
                _ => return false,
            }
        }

        if let Some(ref lang) = self.object_language {
            match triple.object.as_literal() {
                Some(l) if l.has_language(lang) => {}
                _ => return false,
            }
        }

        true
    }
}
