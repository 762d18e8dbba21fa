//! LabelNormalizer — reconcile thesaurus labels with an authoritative source
//!
//! Every concept (an IRI containing the configured concept marker) that
//! carries a `name` loses all of its names and gets back exactly the
//! English and Dutch preferred labels found in the authoritative source,
//! plus a `DefinedTerm` type. At most one label per language survives.

use super::sink::GraphSink;
use super::traits::{Pass, PassContext};
use super::types::{PassError, PassReport};
use crate::graph::{Graph, Iri, Literal, Node, Object};
use crate::query::TriplePattern;
use crate::vocab::lang;
use async_trait::async_trait;
use tracing::debug;

const LANGUAGES: [&str; 2] = [lang::EN, lang::NL];

/// Pass that replaces noisy concept names with authoritative labels.
#[derive(Debug, Default)]
pub struct LabelNormalizer;

impl LabelNormalizer {
    pub fn new() -> Self {
        Self
    }
}

/// First literal in `language` among `objects`
fn first_in_language(objects: Vec<Object>, language: &str) -> Option<Literal> {
    objects
        .into_iter()
        .filter_map(|o| o.as_literal().cloned())
        .find(|l| l.has_language(language))
}

/// Authoritative label for one concept and language.
///
/// Preferred labels are read from the auxiliary graph, then the target
/// graph. Only when neither has one does a `name` in the auxiliary graph
/// count; the target graph's own names are what is being replaced.
pub(crate) fn authoritative_label(
    concept: &Node,
    language: &str,
    target: &Graph,
    ctx: &PassContext<'_>,
) -> Option<String> {
    let v = ctx.vocab;
    first_in_language(ctx.auxiliary.objects(concept, &v.pref_label), language)
        .or_else(|| first_in_language(target.objects(concept, &v.pref_label), language))
        .or_else(|| first_in_language(ctx.auxiliary.objects(concept, &v.name), language))
        .map(|l| l.value().to_string())
}

#[async_trait]
impl Pass for LabelNormalizer {
    fn id(&self) -> &str {
        "labels"
    }

    async fn apply(&self, graph: &mut Graph, ctx: &PassContext<'_>) -> Result<PassReport, PassError> {
        let v = ctx.vocab;
        let marker = ctx.config.concept_marker.as_str();

        let target: &Graph = graph;
        let plans: Vec<(Node, Vec<Literal>)> = target
            .subjects_with(&v.name)
            .into_iter()
            .filter(|s| s.as_iri().map(|i| is_concept(i, marker)).unwrap_or(false))
            .map(|concept| {
                let labels = LANGUAGES
                    .iter()
                    .filter_map(|l| {
                        authoritative_label(&concept, l, target, ctx).map(|value| Literal::lang(value, *l))
                    })
                    .collect();
                (concept, labels)
            })
            .collect();
        debug!(concepts = plans.len(), "concepts selected for label cleanup");

        let mut sink = GraphSink::new(graph);
        let mut unlabelled = 0usize;
        for (concept, labels) in &plans {
            sink.remove_matching(
                &TriplePattern::new()
                    .with_subject(concept)
                    .with_predicate(&v.name),
            );
            if labels.is_empty() {
                unlabelled += 1;
            }
            for label in labels {
                sink.add(concept, &v.name, label.clone());
            }
            sink.add(concept, &v.rdf_type, &v.defined_term);
        }

        sink.note(format!(
            "normalized {} concepts, {} without authoritative labels",
            plans.len(),
            unlabelled
        ));
        Ok(sink.into_report(self.id()))
    }
}

/// Is `iri` a concept under the given marker?
pub fn is_concept(iri: &Iri, marker: &str) -> bool {
    iri.as_str().contains(marker)
}
