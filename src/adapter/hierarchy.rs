//! HierarchyConverter — finding-aid tree to ArchiveComponent graph
//!
//! Walks the nested record tree with an explicit stack. Each visited record
//! emits its own fragment (type, name, identifier, mentioned persons) before
//! its children are pushed, and every parent/child pair gets both `hasPart`
//! and `isPartOf`. Person URIs are moved from the thesaurus namespace into
//! the canonical artists namespace.
//!
//! Top-level records hang off a collection root described by
//! [`CollectionConfig`] unless the converter is built without one.

use super::sink::GraphSink;
use super::traits::{Pass, PassContext};
use super::types::{PassError, PassReport};
use crate::config::{AgentConfig, CollectionConfig};
use crate::graph::{Graph, Iri, Literal};
use crate::vocab::{lang, Vocabulary};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A finding-aid export: `{"Collection": [record, ...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindingAid {
    #[serde(rename = "Collection", default)]
    pub collection: Vec<ComponentRecord>,
}

/// One node of the finding-aid tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    #[serde(rename = "URI")]
    pub uri: String,
    #[serde(rename = "Titel")]
    pub title: String,
    #[serde(rename = "Inventarisnummer")]
    pub inventory_number: String,
    #[serde(rename = "Onderdelen", default)]
    pub parts: Vec<ComponentRecord>,
    #[serde(rename = "Personen", default)]
    pub persons: Vec<PersonRecord>,
}

/// A person mentioned in a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(rename = "URI")]
    pub uri: String,
    #[serde(rename = "Naam")]
    pub name: String,
}

impl FindingAid {
    pub fn from_reader(reader: impl Read) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }
}

/// Pass that converts a finding aid into graph fragments.
pub struct HierarchyConverter {
    document: FindingAid,
    with_root: bool,
}

impl HierarchyConverter {
    /// Convert `document`, attaching top-level records to the configured collection root
    pub fn new(document: FindingAid) -> Self {
        Self {
            document,
            with_root: true,
        }
    }

    /// Convert `document` without a collection root
    pub fn without_root(document: FindingAid) -> Self {
        Self {
            document,
            with_root: false,
        }
    }
}

#[async_trait]
impl Pass for HierarchyConverter {
    fn id(&self) -> &str {
        "hierarchy"
    }

    async fn apply(&self, graph: &mut Graph, ctx: &PassContext<'_>) -> Result<PassReport, PassError> {
        let mut sink = GraphSink::new(graph);
        let root = if self.with_root {
            Some(emit_collection_root(&mut sink, ctx.vocab, &ctx.config.collection)?)
        } else {
            None
        };

        let people_ns = ctx.config.people_namespace.as_str();
        let artists_ns = ctx.config.artists_namespace.as_str();
        let v = ctx.vocab;

        let mut components = 0usize;
        let mut mentions = 0usize;
        let mut stack: Vec<(&ComponentRecord, Option<Iri>)> = self
            .document
            .collection
            .iter()
            .rev()
            .map(|r| (r, root.clone()))
            .collect();

        while let Some((record, parent)) = stack.pop() {
            let component = Iri::parse(record.uri.as_str())?;
            components += 1;

            sink.add(&component, &v.rdf_type, &v.archive_component);
            sink.add(&component, &v.name, Literal::lang(record.title.as_str(), lang::NL));
            sink.add(
                &component,
                &v.identifier,
                Literal::plain(record.inventory_number.as_str()),
            );

            if let Some(parent) = parent {
                sink.add(&parent, &v.has_part, &component);
                sink.add(&component, &v.is_part_of, &parent);
            }

            for person in &record.persons {
                let raw = Iri::parse(person.uri.as_str())?;
                let person_iri = raw.rebase(people_ns, artists_ns).unwrap_or(raw);
                mentions += 1;

                sink.add(&person_iri, &v.rdf_type, &v.person);
                sink.add(&person_iri, &v.name, Literal::plain(person.name.as_str()));
                sink.add(&component, &v.about, &person_iri);
                sink.add(&person_iri, &v.subject_of, &component);
            }

            for child in record.parts.iter().rev() {
                stack.push((child, Some(component.clone())));
            }
        }

        sink.note(format!(
            "converted {} components with {} person mentions",
            components, mentions
        ));
        Ok(sink.into_report(self.id()))
    }
}

/// Emit the collection root with its archive and creator, returning its IRI.
fn emit_collection_root(
    sink: &mut GraphSink<'_>,
    v: &Vocabulary,
    collection: &CollectionConfig,
) -> Result<Iri, PassError> {
    let root = Iri::parse(collection.iri.as_str())?;
    let archive = emit_agent(sink, v, &v.organization, &collection.holding_archive)?;
    let creator = emit_agent(sink, v, &v.person, &collection.creator)?;

    sink.add(&root, &v.rdf_type, &v.archive_component);
    sink.add(&root, &v.rdf_type, &v.collection);
    sink.add(&root, &v.name, name_literal(&collection.name, &collection.name_language));
    sink.add(&root, &v.temporal_coverage, Literal::plain(collection.temporal_coverage.as_str()));
    sink.add(&root, &v.size, Literal::plain(collection.size.as_str()));
    sink.add(&root, &v.holding_archive, archive);
    sink.add(&root, &v.creator, creator);
    sink.add(&root, &v.identifier, Literal::plain(collection.identifier.as_str()));
    sink.add(&root, &v.url, Iri::parse(collection.url.as_str())?);
    Ok(root)
}

fn emit_agent(
    sink: &mut GraphSink<'_>,
    v: &Vocabulary,
    class: &Iri,
    agent: &AgentConfig,
) -> Result<Iri, PassError> {
    let iri = Iri::parse(agent.iri.as_str())?;
    sink.add(&iri, &v.rdf_type, class);
    for (language, name) in &agent.names {
        sink.add(&iri, &v.name, name_literal(name, language));
    }
    Ok(iri)
}

fn name_literal(value: &str, language: &str) -> Literal {
    if language.is_empty() {
        Literal::plain(value)
    } else {
        Literal::lang(value, language)
    }
}
