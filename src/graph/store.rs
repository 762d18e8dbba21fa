//! Graph: an in-memory named set of triples

use super::term::{BlankNode, Iri, Node, Object};
use super::triple::Triple;
use crate::query::TriplePattern;
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

/// Errors that can occur in graph operations
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Invalid IRI: {0:?}")]
    InvalidIri(String),
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// A named, set-semantic collection of triples
///
/// Re-adding an existing triple is a no-op. Iteration order is the total
/// order of [`Triple`], so every traversal and serialization is deterministic.
/// Every query returns owned results, so callers can mutate the graph while
/// walking what they found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    /// Named-graph identifier
    name: Iri,
    triples: BTreeSet<Triple>,
}

impl Graph {
    /// Create an empty graph with the given name
    pub fn new(name: impl Into<Iri>) -> Self {
        Self {
            name: name.into(),
            triples: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &Iri {
        &self.name
    }

    /// Add a triple. Returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Add a triple from its parts
    pub fn add(
        &mut self,
        subject: impl Into<Node>,
        predicate: impl Into<Iri>,
        object: impl Into<Object>,
    ) -> bool {
        self.insert(Triple::new(subject, predicate, object))
    }

    /// Remove a triple. Returns false if it was not present.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        self.triples.remove(triple)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Add every triple from an iterator, returning how many were new
    pub fn extend(&mut self, triples: impl IntoIterator<Item = Triple>) -> usize {
        triples
            .into_iter()
            .filter(|t| self.triples.insert(t.clone()))
            .count()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// All triples in deterministic order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Materialize every triple matching the pattern
    pub fn matching(&self, pattern: &TriplePattern) -> Vec<Triple> {
        self.triples
            .iter()
            .filter(|t| pattern.matches(t))
            .cloned()
            .collect()
    }

    /// Remove every triple matching the pattern, returning the count
    pub fn remove_matching(&mut self, pattern: &TriplePattern) -> usize {
        let before = self.triples.len();
        self.triples.retain(|t| !pattern.matches(t));
        before - self.triples.len()
    }

    /// Objects of `(subject, predicate, ?)`
    pub fn objects(&self, subject: &Node, predicate: &Iri) -> Vec<Object> {
        self.triples
            .iter()
            .filter(|t| &t.subject == subject && &t.predicate == predicate)
            .map(|t| t.object.clone())
            .collect()
    }

    /// Subjects of `(?, predicate, object)`, deduplicated, in order
    pub fn subjects(&self, predicate: &Iri, object: &Object) -> Vec<Node> {
        let mut seen = HashSet::new();
        self.triples
            .iter()
            .filter(|t| &t.predicate == predicate && &t.object == object)
            .filter(|t| seen.insert(t.subject.clone()))
            .map(|t| t.subject.clone())
            .collect()
    }

    /// Subjects carrying `predicate` at least once, deduplicated, in order
    pub fn subjects_with(&self, predicate: &Iri) -> Vec<Node> {
        let mut seen = HashSet::new();
        self.triples
            .iter()
            .filter(|t| &t.predicate == predicate)
            .filter(|t| seen.insert(t.subject.clone()))
            .map(|t| t.subject.clone())
            .collect()
    }

    /// Subjects asserted to have `rdf_type` == `class`
    pub fn subjects_of_type(&self, rdf_type: &Iri, class: &Iri) -> Vec<Node> {
        self.subjects(rdf_type, &Object::Iri(class.clone()))
    }

    /// True if `(subject, predicate, object)` is asserted
    pub fn has(&self, subject: &Node, predicate: &Iri, object: &Object) -> bool {
        self.triples.contains(&Triple {
            subject: subject.clone(),
            predicate: predicate.clone(),
            object: object.clone(),
        })
    }

    /// Every distinct anonymous identity in subject or object position
    pub fn blank_nodes(&self) -> BTreeSet<BlankNode> {
        let mut found = BTreeSet::new();
        for t in &self.triples {
            if let Node::Blank(b) = &t.subject {
                found.insert(*b);
            }
            if let Object::Blank(b) = &t.object {
                found.insert(*b);
            }
        }
        found
    }

    /// Set union of two graphs, keeping this graph's name
    ///
    /// Neither operand is modified.
    pub fn union(&self, other: &Graph) -> Graph {
        let mut merged = self.clone();
        merged.triples.extend(other.triples.iter().cloned());
        merged
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = std::collections::btree_set::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::collections::btree_set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
