//! PermalinkLinker — public website links for every Manuscript

use super::sink::GraphSink;
use super::traits::{Pass, PassContext};
use super::types::{PassError, PassReport};
use crate::graph::Graph;
use async_trait::async_trait;

/// Adds `Manuscript url <permalink>`, the permalink being the manuscript's
/// own identifier with the configured rewrite applied.
#[derive(Debug, Default)]
pub struct PermalinkLinker;

impl PermalinkLinker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Pass for PermalinkLinker {
    fn id(&self) -> &str {
        "permalink"
    }

    async fn apply(&self, graph: &mut Graph, ctx: &PassContext<'_>) -> Result<PassReport, PassError> {
        let v = ctx.vocab;
        let rewrite = &ctx.config.permalink_rewrite;
        let manuscripts = graph.subjects_of_type(&v.rdf_type, &v.manuscript);

        let mut sink = GraphSink::new(graph);
        for manuscript in manuscripts {
            let Some(iri) = manuscript.as_iri() else {
                continue;
            };
            let permalink = iri.replace(&rewrite.from, &rewrite.to);
            sink.add(&manuscript, &v.url, permalink);
        }
        Ok(sink.into_report(self.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::graph::{BlankNode, Iri, Node, Object};

    #[tokio::test]
    async fn manuscripts_get_a_permalink() {
        let config = PipelineConfig::default();
        let v = config.vocabulary();
        let aux = Graph::new("urn:aux");
        let ctx = PassContext::new(&v, &config, &aux);

        let mut graph = Graph::new("urn:g");
        graph.add(Iri::new("https://data.rkd.nl/excerpts/780007"), &v.rdf_type, &v.manuscript);
        graph.add(BlankNode::new(), &v.rdf_type, &v.manuscript);
        graph.add(Iri::new("https://data.rkd.nl/artists/1"), &v.rdf_type, &v.person);

        let report = PermalinkLinker::new().apply(&mut graph, &ctx).await.unwrap();

        assert_eq!(report.added, 1);
        assert_eq!(
            graph.objects(&Node::from(Iri::new("https://data.rkd.nl/excerpts/780007")), &v.url),
            vec![Object::from(Iri::new("https://rkd.nl/explore/excerpts/780007"))]
        );

        let again = PermalinkLinker::new().apply(&mut graph, &ctx).await.unwrap();
        assert!(again.is_noop());
    }
}
