//! RoleReifier — person mentions become Role entities
//!
//! A direct `Manuscript about Person` edge cannot say in what capacity the
//! person is mentioned without that statement leaking onto every entity the
//! person is later merged with. Each mention is therefore rewritten to
//! `Manuscript about Role about Person`, with every qualifier
//! (`additionalType`) moved from the Person to the Role as `roleName`, and
//! bilingual display labels `"{name} ({role})"` on the Role. The labels use
//! the lexically first qualifier.
//!
//! Every matched edge gets its own fresh Role; repeated mentions are not
//! merged.

use super::sink::GraphSink;
use super::traits::{Pass, PassContext};
use super::types::{PassError, PassReport};
use crate::graph::{BlankNode, Graph, Literal, Node, Object, Triple};
use crate::query::TriplePattern;
use crate::vocab::lang;
use async_trait::async_trait;
use tracing::debug;

/// Fallback role labels when a mention has no qualifier
const UNKNOWN_ROLE: [(&str, &str); 2] = [(lang::EN, "Unknown"), (lang::NL, "Onbekend")];

/// A qualifier term and the labels found for it
#[derive(Debug, Clone, PartialEq)]
pub struct Qualifier {
    pub term: Object,
    /// (language, label) pairs, at most one per language
    pub labels: Vec<(&'static str, String)>,
}

/// One `Manuscript about Person` edge, with everything needed to reify it
#[derive(Debug, Clone, PartialEq)]
pub struct RoleMention {
    pub manuscript: Node,
    pub person: Node,
    pub person_name: String,
    /// Every qualifier term on the Person
    pub qualifiers: Vec<Object>,
    /// The first qualifier, which names the role
    pub qualifier: Option<Qualifier>,
}

impl RoleMention {
    /// Display labels for the Role, as (language, text)
    pub fn role_labels(&self) -> Vec<(&'static str, String)> {
        match &self.qualifier {
            Some(q) => q
                .labels
                .iter()
                .map(|(l, label)| (*l, format!("{} ({})", self.person_name, label)))
                .collect(),
            None => UNKNOWN_ROLE
                .iter()
                .map(|(l, label)| (*l, format!("{} ({})", self.person_name, label)))
                .collect(),
        }
    }
}

/// Pass that reifies person mentions into Role nodes.
#[derive(Debug, Default)]
pub struct RoleReifier;

impl RoleReifier {
    pub fn new() -> Self {
        Self
    }

    /// Collect every mention in the graph. Nothing is mutated.
    pub fn find_mentions(&self, graph: &Graph, ctx: &PassContext<'_>) -> Vec<RoleMention> {
        let v = ctx.vocab;
        let manuscript_type = Object::from(&v.manuscript);
        let person_type = Object::from(&v.person);

        let mut mentions = Vec::new();
        for manuscript in graph.subjects(&v.rdf_type, &manuscript_type) {
            let about = TriplePattern::new()
                .with_subject(&manuscript)
                .with_predicate(&v.about)
                .execute(graph);
            for edge in about {
                let Some(person) = edge.object.as_node() else {
                    continue;
                };
                if !graph.has(&person, &v.rdf_type, &person_type) {
                    continue;
                }
                let Some(person_name) = first_literal(graph.objects(&person, &v.name)) else {
                    continue;
                };
                let qualifiers = graph.objects(&person, &v.additional_type);
                let qualifier = qualifiers.first().map(|term| Qualifier {
                    labels: qualifier_labels(term, graph, ctx),
                    term: term.clone(),
                });

                mentions.push(RoleMention {
                    manuscript: manuscript.clone(),
                    person,
                    person_name,
                    qualifiers,
                    qualifier,
                });
            }
        }
        mentions
    }
}

/// Lexically first literal value among `objects`
fn first_literal(objects: Vec<Object>) -> Option<String> {
    objects
        .into_iter()
        .find_map(|o| o.as_literal().map(|l| l.value().to_string()))
}

/// English and Dutch names of a qualifier term, auxiliary graph first
fn qualifier_labels(term: &Object, graph: &Graph, ctx: &PassContext<'_>) -> Vec<(&'static str, String)> {
    let Some(term) = term.as_node() else {
        return Vec::new();
    };
    let v = ctx.vocab;
    [lang::EN, lang::NL]
        .into_iter()
        .filter_map(|language| {
            [ctx.auxiliary, graph]
                .into_iter()
                .flat_map(|source| source.objects(&term, &v.name))
                .filter_map(|o| o.as_literal().cloned())
                .find(|l| l.has_language(language))
                .map(|l| (language, l.value().to_string()))
        })
        .collect()
}

#[async_trait]
impl Pass for RoleReifier {
    fn id(&self) -> &str {
        "roles"
    }

    async fn apply(&self, graph: &mut Graph, ctx: &PassContext<'_>) -> Result<PassReport, PassError> {
        let v = ctx.vocab;
        let mentions = self.find_mentions(graph, ctx);
        debug!(mentions = mentions.len(), "role mentions materialized");

        let mut sink = GraphSink::new(graph);
        for mention in &mentions {
            let manuscript = &mention.manuscript;
            let person = &mention.person;
            let role = BlankNode::new();

            sink.remove(&Triple::new(manuscript, &v.about, person));
            sink.add(role, &v.rdf_type, &v.role);
            sink.add(role, &v.about, person);
            sink.add(manuscript, &v.about, role);

            // Keep the inverse edge paired with the rewritten one
            if sink.remove(&Triple::new(person, &v.subject_of, manuscript)) {
                sink.add(person, &v.subject_of, role);
                sink.add(role, &v.subject_of, manuscript);
            }

            for term in &mention.qualifiers {
                sink.remove(&Triple::new(person, &v.additional_type, term.clone()));
                sink.add(role, &v.role_name, term.clone());
            }
            for (language, label) in mention.role_labels() {
                sink.add(role, &v.name, Literal::lang(label, language));
            }
        }

        sink.note(format!("created {} roles", mentions.len()));
        Ok(sink.into_report(self.id()))
    }
}
