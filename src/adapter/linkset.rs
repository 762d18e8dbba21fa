//! Linksets — cross-dataset relations inferred by joining on identifiers
//!
//! - [`InventoryLinker`]: excerpt identifiers `<prefix>_<suffix>` are joined
//!   to the ArchiveComponent whose identifier is `<prefix>`, asserting
//!   `isPartOf`/`hasPart`.
//! - [`NotaryLinker`]: tabular rows (excerpt, notary, notary name) become
//!   `author` edges from the external item to the notary.
//!
//! A join that finds nothing asserts nothing; it is not an error.

use super::sink::GraphSink;
use super::traits::{Pass, PassContext};
use super::types::{PassError, PassReport};
use crate::graph::{Graph, Iri, Literal, Node, Object};
use crate::vocab::XSD_STRING;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Pass that links excerpts to the inventory component they came from.
///
/// Excerpts are searched in the union of the graph and the auxiliary
/// dataset; links are asserted into the graph only.
#[derive(Debug, Default)]
pub struct InventoryLinker;

impl InventoryLinker {
    pub fn new() -> Self {
        Self
    }
}

/// The inventory prefix of an excerpt identifier, if it has one
pub fn inventory_prefix(identifier: &str) -> Option<&str> {
    identifier.split_once('_').map(|(prefix, _)| prefix)
}

/// Simple-literal value: no language tag, no datatype other than xsd:string
fn simple_value(object: &Object) -> Option<&str> {
    let literal = object.as_literal()?;
    match (literal.language(), literal.datatype()) {
        (None, None) => Some(literal.value()),
        (None, Some(dt)) if dt.as_str() == XSD_STRING => Some(literal.value()),
        _ => None,
    }
}

#[async_trait]
impl Pass for InventoryLinker {
    fn id(&self) -> &str {
        "linkset:inventory"
    }

    async fn apply(&self, graph: &mut Graph, ctx: &PassContext<'_>) -> Result<PassReport, PassError> {
        let v = ctx.vocab;
        let view = graph.union(ctx.auxiliary);

        let mut inventories: HashMap<String, Vec<Node>> = HashMap::new();
        for component in view.subjects(&v.rdf_type, &Object::from(&v.archive_component)) {
            for id in view.objects(&component, &v.identifier) {
                if let Some(value) = simple_value(&id) {
                    inventories
                        .entry(value.to_string())
                        .or_default()
                        .push(component.clone());
                }
            }
        }

        let mut links: Vec<(Node, Node)> = Vec::new();
        let mut unmatched = 0usize;
        for excerpt in view.subjects(&v.rdf_type, &Object::from(&v.manuscript)) {
            for id in view.objects(&excerpt, &v.identifier) {
                let Some(prefix) = simple_value(&id).and_then(inventory_prefix) else {
                    continue;
                };
                match inventories.get(prefix) {
                    Some(found) => {
                        links.extend(found.iter().map(|inv| (excerpt.clone(), inv.clone())))
                    }
                    None => unmatched += 1,
                }
            }
        }
        drop(view);
        debug!(links = links.len(), unmatched, "inventory join materialized");

        let mut sink = GraphSink::new(graph);
        for (excerpt, inventory) in &links {
            sink.add(excerpt, &v.is_part_of, inventory);
            sink.add(inventory, &v.has_part, excerpt);
        }

        sink.note(format!(
            "linked {} excerpts to inventories, {} prefixed identifiers without inventory",
            links.len(),
            unmatched
        ));
        Ok(sink.into_report(self.id()))
    }
}

/// One row of the excerpt → notary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotaryRow {
    pub excerpt: String,
    #[serde(default)]
    pub notary: Option<String>,
    #[serde(default)]
    pub notary_name: Option<String>,
}

impl NotaryRow {
    pub fn new(excerpt: impl Into<String>, notary: Option<&str>, notary_name: Option<&str>) -> Self {
        Self {
            excerpt: excerpt.into(),
            notary: notary.map(str::to_string),
            notary_name: notary_name.map(str::to_string),
        }
    }

    /// The notary field, unless empty or a spreadsheet NaN
    fn notary_value(&self) -> Option<&str> {
        present(self.notary.as_deref())
    }

    fn name_value(&self) -> Option<&str> {
        present(self.notary_name.as_deref())
    }
}

fn present(field: Option<&str>) -> Option<&str> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("nan"))
}

/// Pass that asserts excerpt authorship by notaries from tabular rows.
pub struct NotaryLinker {
    rows: Vec<NotaryRow>,
}

impl NotaryLinker {
    pub fn new(rows: Vec<NotaryRow>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl Pass for NotaryLinker {
    fn id(&self) -> &str {
        "linkset:notary"
    }

    async fn apply(&self, graph: &mut Graph, ctx: &PassContext<'_>) -> Result<PassReport, PassError> {
        let v = ctx.vocab;
        let rewrite = &ctx.config.excerpt_item_rewrite;
        let mut sink = GraphSink::new(graph);
        let mut skipped = 0usize;
        let mut linked = 0usize;

        for row in &self.rows {
            let Some(notary) = row.notary_value() else {
                skipped += 1;
                continue;
            };
            let (Ok(notary), Ok(item)) = (
                Iri::parse(notary),
                Iri::parse(row.excerpt.trim().replace(&rewrite.from, &rewrite.to)),
            ) else {
                sink.note(format!(
                    "skipped row with unusable identifiers: excerpt={:?} notary={:?}",
                    row.excerpt, notary
                ));
                skipped += 1;
                continue;
            };

            sink.add(&notary, &v.rdf_type, &v.person);
            if let Some(name) = row.name_value() {
                sink.add(&notary, &v.name, Literal::plain(name));
            }
            sink.add(&item, &v.author, &notary);
            linked += 1;
        }

        sink.note(format!("linked {} rows, skipped {}", linked, skipped));
        Ok(sink.into_report(self.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::graph::Triple;
    use crate::vocab::Vocabulary;

    fn excerpt(graph: &mut Graph, v: &Vocabulary, iri: &str, id: &str) {
        graph.add(Iri::new(iri), &v.rdf_type, &v.manuscript);
        graph.add(Iri::new(iri), &v.identifier, Literal::plain(id));
    }

    fn inventory(graph: &mut Graph, v: &Vocabulary, iri: &str, id: &str) {
        graph.add(Iri::new(iri), &v.rdf_type, &v.archive_component);
        graph.add(Iri::new(iri), &v.identifier, Literal::plain(id));
    }

    async fn run(pass: &dyn Pass, graph: &mut Graph, aux: &Graph) -> PassReport {
        let config = PipelineConfig::default();
        let vocab = config.vocabulary();
        let ctx = PassContext::new(&vocab, &config, aux);
        pass.apply(graph, &ctx).await.unwrap()
    }

    #[test]
    fn prefix_splits_on_first_underscore() {
        assert_eq!(inventory_prefix("0380.220_3"), Some("0380.220"));
        assert_eq!(inventory_prefix("0380.220_3_b"), Some("0380.220"));
        assert_eq!(inventory_prefix("0380.220"), None);
    }

    #[tokio::test]
    async fn prefixed_excerpt_links_both_ways() {
        let v = Vocabulary::default();
        let mut inventories = Graph::new("urn:g");
        inventory(&mut inventories, &v, "https://rkd.nl/explore/archives/file/110432054", "0380.220");
        let mut excerpts = Graph::new("urn:aux");
        excerpt(&mut excerpts, &v, "https://data.rkd.nl/excerpts/780007", "0380.220_3");

        let report = run(&InventoryLinker::new(), &mut inventories, &excerpts).await;

        let e = Iri::new("https://data.rkd.nl/excerpts/780007");
        let inv = Iri::new("https://rkd.nl/explore/archives/file/110432054");
        assert!(inventories.contains(&Triple::new(&e, &v.is_part_of, &inv)));
        assert!(inventories.contains(&Triple::new(&inv, &v.has_part, &e)));
        assert_eq!(report.added, 2);
        // auxiliary stays untouched
        assert_eq!(excerpts.len(), 2);
    }

    #[tokio::test]
    async fn excerpt_without_underscore_is_not_linked() {
        let v = Vocabulary::default();
        let mut inventories = Graph::new("urn:g");
        inventory(&mut inventories, &v, "https://rkd.nl/explore/archives/file/110432054", "0380.220");
        let mut excerpts = Graph::new("urn:aux");
        excerpt(&mut excerpts, &v, "https://data.rkd.nl/excerpts/780008", "0380.220");

        let report = run(&InventoryLinker::new(), &mut inventories, &excerpts).await;

        assert!(report.is_noop());
    }

    #[tokio::test]
    async fn unknown_prefix_asserts_nothing() {
        let v = Vocabulary::default();
        let mut inventories = Graph::new("urn:g");
        inventory(&mut inventories, &v, "https://rkd.nl/explore/archives/file/1", "0380.220");
        let mut excerpts = Graph::new("urn:aux");
        excerpt(&mut excerpts, &v, "https://data.rkd.nl/excerpts/9", "0380.999_1");

        let report = run(&InventoryLinker::new(), &mut inventories, &excerpts).await;
        assert!(report.is_noop());
    }

    #[tokio::test]
    async fn notary_row_yields_three_triples() {
        let rows = vec![NotaryRow::new(
            "https://data.rkd.nl/excerpts/777565",
            Some("https://data.goldenagents.org/datasets/notarissennetwerk/person/1946"),
            Some("Palm Mathijsz"),
        )];
        let mut graph = Graph::new("urn:g");

        let report = run(&NotaryLinker::new(rows), &mut graph, &Graph::new("urn:aux")).await;

        let v = Vocabulary::default();
        let notary = Iri::new("https://data.goldenagents.org/datasets/notarissennetwerk/person/1946");
        let item = Iri::new("https://data.rkd.nl/collection/bredius/externalitem/777565");
        assert_eq!(graph.len(), 3);
        assert_eq!(report.added, 3);
        assert!(graph.contains(&Triple::new(&item, &v.author, &notary)));
        assert!(graph.contains(&Triple::new(&notary, &v.rdf_type, &v.person)));
        assert!(graph.contains(&Triple::new(&notary, &v.name, Literal::plain("Palm Mathijsz"))));
    }

    #[tokio::test]
    async fn empty_or_missing_notary_is_skipped() {
        let rows = vec![
            NotaryRow::new("https://data.rkd.nl/excerpts/1", None, None),
            NotaryRow::new("https://data.rkd.nl/excerpts/2", Some(""), Some("")),
            NotaryRow::new("https://data.rkd.nl/excerpts/3", Some("NaN"), Some("NaN")),
        ];
        let mut graph = Graph::new("urn:g");

        let report = run(&NotaryLinker::new(rows), &mut graph, &Graph::new("urn:aux")).await;

        assert!(graph.is_empty());
        assert!(report.is_noop());
        assert!(report.notes.iter().any(|n| n.contains("skipped 3")));
    }

    #[tokio::test]
    async fn notary_without_name_omits_name() {
        let rows = vec![NotaryRow::new(
            "https://data.rkd.nl/excerpts/1",
            Some("https://example.org/person/1"),
            None,
        )];
        let mut graph = Graph::new("urn:g");

        run(&NotaryLinker::new(rows), &mut graph, &Graph::new("urn:aux")).await;
        assert_eq!(graph.len(), 2);
    }
}
