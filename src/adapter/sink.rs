//! GraphSink — the counting write handle passes mutate through

use super::types::PassReport;
use crate::graph::{Graph, Iri, Node, Object, Triple};
use crate::query::TriplePattern;

/// Wraps the graph under rewrite and tallies effective additions and
/// removals. Only changes that actually alter the set are counted.
pub struct GraphSink<'g> {
    graph: &'g mut Graph,
    added: usize,
    removed: usize,
    notes: Vec<String>,
}

impl<'g> GraphSink<'g> {
    pub fn new(graph: &'g mut Graph) -> Self {
        Self {
            graph,
            added: 0,
            removed: 0,
            notes: Vec::new(),
        }
    }

    /// Read access to the current state
    pub fn graph(&self) -> &Graph {
        self.graph
    }

    pub fn insert(&mut self, triple: Triple) -> bool {
        let fresh = self.graph.insert(triple);
        if fresh {
            self.added += 1;
        }
        fresh
    }

    pub fn add(
        &mut self,
        subject: impl Into<Node>,
        predicate: impl Into<Iri>,
        object: impl Into<Object>,
    ) -> bool {
        self.insert(Triple::new(subject, predicate, object))
    }

    pub fn remove(&mut self, triple: &Triple) -> bool {
        let present = self.graph.remove(triple);
        if present {
            self.removed += 1;
        }
        present
    }

    pub fn remove_matching(&mut self, pattern: &TriplePattern) -> usize {
        let n = self.graph.remove_matching(pattern);
        self.removed += n;
        n
    }

    /// Attach an operator-facing note to the report
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn into_report(self, pass_id: impl Into<String>) -> PassReport {
        PassReport {
            pass_id: pass_id.into(),
            added: self.added,
            removed: self.removed,
            notes: self.notes,
        }
    }
}
