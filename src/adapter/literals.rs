//! LiteralValidator — drops malformed date literals
//!
//! Dates hang two hops below a Manuscript (for instance
//! `Manuscript contentReferenceTime _:t . _:t startDate "1650-13-01"^^xsd:date`).
//! A literal that does not parse as a strict calendar date would be rejected
//! by the triple store, so the single offending triple is removed and the
//! finding is reported. Nothing here is fatal.

use super::sink::GraphSink;
use super::traits::{Pass, PassContext};
use super::types::{PassError, PassReport};
use crate::graph::{Graph, Literal, Node, Triple};
use crate::query::TriplePattern;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// True if `value` is `YYYY-MM-DD` (optionally with a leading `-`) naming a
/// real calendar day. Timezone suffixes are rejected.
pub fn is_strict_date(value: &str) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let bytes = unsigned.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    shape_ok && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// A date literal that failed strict parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLiteral {
    /// The Manuscript the date was found under
    pub manuscript: Node,
    /// The triple that carries the bad literal
    pub triple: Triple,
}

impl InvalidLiteral {
    pub fn literal(&self) -> Option<&Literal> {
        self.triple.object.as_literal()
    }
}

/// Pass that validates typed date literals.
#[derive(Debug, Default)]
pub struct LiteralValidator;

impl LiteralValidator {
    pub fn new() -> Self {
        Self
    }

    /// Every invalid date literal on a Manuscript's two-hop paths, without
    /// touching the graph. A triple reachable from several manuscripts is
    /// listed once, under the first.
    pub fn validate(&self, graph: &Graph, ctx: &PassContext<'_>) -> Vec<InvalidLiteral> {
        let v = ctx.vocab;
        let mut seen = BTreeSet::new();
        let mut invalid = Vec::new();

        for manuscript in graph.subjects_of_type(&v.rdf_type, &v.manuscript) {
            let intermediates = TriplePattern::new()
                .with_subject(&manuscript)
                .execute(graph)
                .into_iter()
                .filter_map(|t| t.object.as_node());

            for node in intermediates {
                let dated = TriplePattern::new()
                    .with_subject(&node)
                    .with_datatype(&v.xsd_date)
                    .execute(graph);
                for triple in dated {
                    let valid = triple
                        .object
                        .as_literal()
                        .map(|l| is_strict_date(l.value()))
                        .unwrap_or(true);
                    if !valid && seen.insert(triple.clone()) {
                        invalid.push(InvalidLiteral {
                            manuscript: manuscript.clone(),
                            triple,
                        });
                    }
                }
            }
        }
        invalid
    }
}

#[async_trait]
impl Pass for LiteralValidator {
    fn id(&self) -> &str {
        "literals"
    }

    async fn apply(&self, graph: &mut Graph, ctx: &PassContext<'_>) -> Result<PassReport, PassError> {
        let invalid = self.validate(graph, ctx);
        debug!(invalid = invalid.len(), "literal validation materialized");

        let mut sink = GraphSink::new(graph);
        for finding in &invalid {
            let value = finding.literal().map(Literal::value).unwrap_or_default();
            warn!(
                subject = %finding.manuscript,
                node = %finding.triple.subject,
                value,
                "removing invalid date literal"
            );
            sink.remove(&finding.triple);
            sink.note(format!(
                "invalid date {:?} under {}",
                value, finding.manuscript
            ));
        }
        Ok(sink.into_report(self.id()))
    }
}
