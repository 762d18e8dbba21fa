//! PlaceholderCleaner — drops triples about identifiers that name nobody
//!
//! A person record with an empty id comes out of the namespace rewrite as the
//! bare artists namespace (`https://rkd.nl/explore/artists/`). Every triple
//! mentioning such an identifier, as subject or object, is removed before
//! anything else is derived from it.

use super::sink::GraphSink;
use super::traits::{Pass, PassContext};
use super::types::{PassError, PassReport};
use crate::graph::{Graph, Iri, Triple};
use async_trait::async_trait;
use tracing::debug;

#[derive(Debug, Default)]
pub struct PlaceholderCleaner;

impl PlaceholderCleaner {
    pub fn new() -> Self {
        Self
    }

    /// Triples that mention any configured placeholder identifier
    pub fn find(&self, graph: &Graph, ctx: &PassContext<'_>) -> Vec<Triple> {
        let placeholders: Vec<Iri> = ctx
            .config
            .placeholder_iris
            .iter()
            .map(|p| Iri::new(p.as_str()))
            .collect();
        graph
            .iter()
            .filter(|t| placeholders.iter().any(|p| t.mentions(p)))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Pass for PlaceholderCleaner {
    fn id(&self) -> &str {
        "placeholders"
    }

    async fn apply(&self, graph: &mut Graph, ctx: &PassContext<'_>) -> Result<PassReport, PassError> {
        let found = self.find(graph, ctx);
        debug!(triples = found.len(), "placeholder triples materialized");

        let mut sink = GraphSink::new(graph);
        for triple in &found {
            sink.remove(triple);
        }
        if !found.is_empty() {
            sink.note(format!("removed {} placeholder triples", found.len()));
        }
        Ok(sink.into_report(self.id()))
    }
}
