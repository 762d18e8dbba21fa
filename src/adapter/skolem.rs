//! Skolemizer — anonymous identities become published identifiers
//!
//! Runs last. Blank node labels do not survive independent loads of the same
//! serialization, so every anonymous identity is replaced by
//! `{authority}/.well-known/genid/{token}`, the token being the identity's
//! own run-scoped UUID.

use super::traits::{Pass, PassContext};
use super::types::{PassError, PassReport};
use crate::graph::{BlankNode, Graph, Iri, Node, Object, Triple};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::debug;

/// The published identifier for one anonymous identity
pub fn skolem_iri(authority: &str, blank: &BlankNode) -> Iri {
    Iri::new(format!(
        "{}/.well-known/genid/{}",
        authority.trim_end_matches('/'),
        blank.token()
    ))
}

/// Map every anonymous identity in `graph` to its published identifier.
///
/// Total over the graph's blank nodes; injective because tokens are unique.
pub fn mapping(graph: &Graph, authority: &str) -> BTreeMap<BlankNode, Iri> {
    graph
        .blank_nodes()
        .into_iter()
        .map(|b| {
            let iri = skolem_iri(authority, &b);
            (b, iri)
        })
        .collect()
}

fn rewrite(triple: &Triple, map: &BTreeMap<BlankNode, Iri>) -> Triple {
    let subject = match &triple.subject {
        Node::Blank(b) => map.get(b).cloned().map(Node::Iri).unwrap_or(Node::Blank(*b)),
        other => other.clone(),
    };
    let object = match &triple.object {
        Object::Blank(b) => map.get(b).cloned().map(Object::Iri).unwrap_or(Object::Blank(*b)),
        other => other.clone(),
    };
    Triple {
        subject,
        predicate: triple.predicate.clone(),
        object,
    }
}

#[derive(Debug, Default)]
pub struct Skolemizer;

impl Skolemizer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Pass for Skolemizer {
    fn id(&self) -> &str {
        "skolemize"
    }

    async fn apply(&self, graph: &mut Graph, ctx: &PassContext<'_>) -> Result<PassReport, PassError> {
        let map = mapping(graph, &ctx.config.skolem_authority);
        debug!(identities = map.len(), "skolemizing");

        let affected: Vec<Triple> = graph.iter().filter(|t| t.has_blank_node()).cloned().collect();
        let mut report = PassReport::new(self.id());
        for triple in &affected {
            if graph.remove(triple) {
                report.removed += 1;
            }
        }
        report.added = graph.extend(affected.iter().map(|t| rewrite(t, &map)));
        Ok(report.with_note(format!("skolemized {} identities", map.len())))
    }
}
