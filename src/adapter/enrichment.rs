//! ImageEnricher — thumbnail links from the external record API
//!
//! Each Manuscript's record key is the last path segment of its identifier.
//! Lookups run one resource at a time; a record that stays unavailable after
//! the bounded retry is skipped and the run carries on.

use super::sink::GraphSink;
use super::traits::{Pass, PassContext};
use super::types::{PassError, PassReport};
use crate::graph::{Graph, Iri};
use crate::records::{fetch_with_retry, Lookup, RecordClient};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

pub struct ImageEnricher {
    client: Arc<dyn RecordClient>,
}

impl ImageEnricher {
    pub fn new(client: Arc<dyn RecordClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Pass for ImageEnricher {
    fn id(&self) -> &str {
        "images"
    }

    async fn apply(&self, graph: &mut Graph, ctx: &PassContext<'_>) -> Result<PassReport, PassError> {
        let v = ctx.vocab;
        let api = &ctx.config.record_api;
        let manuscripts = graph.subjects_of_type(&v.rdf_type, &v.manuscript);
        info!(resources = manuscripts.len(), "looking up record images");

        let mut sink = GraphSink::new(graph);
        let mut skipped = 0;
        for manuscript in manuscripts {
            let Some(iri) = manuscript.as_iri() else {
                continue;
            };
            let key = iri.last_segment();
            if key.is_empty() {
                continue;
            }

            match fetch_with_retry(self.client.as_ref(), key, api.retry_delay()).await {
                Lookup::Found(record) => {
                    debug!(key, images = record.image_ids().len(), "record found");
                    for uuid in record.image_ids() {
                        sink.add(&manuscript, &v.image, Iri::new(api.image_url(uuid)));
                    }
                }
                Lookup::Absent => {
                    skipped += 1;
                    sink.note(format!("no record for {}", key));
                }
            }
        }
        if skipped > 0 {
            info!(skipped, "resources skipped without a record");
        }
        Ok(sink.into_report(self.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::graph::{Node, Object};
    use crate::records::{mock_record, MockRecordClient, RecordError};

    const MS1: &str = "https://data.rkd.nl/excerpts/780007";
    const MS2: &str = "https://data.rkd.nl/excerpts/780008";

    fn config() -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.record_api.retry_delay_ms = 0;
        config
    }

    fn manuscripts() -> Graph {
        let v = config().vocabulary();
        let mut graph = Graph::new("urn:g");
        graph.add(Iri::new(MS1), &v.rdf_type, &v.manuscript);
        graph.add(Iri::new(MS2), &v.rdf_type, &v.manuscript);
        graph
    }

    #[tokio::test]
    async fn attaches_one_image_edge_per_identifier() {
        let config = config();
        let v = config.vocabulary();
        let aux = Graph::new("urn:aux");
        let ctx = PassContext::new(&v, &config, &aux);
        let client = Arc::new(
            MockRecordClient::new()
                .with_response("780007", mock_record(&["aaa", "bbb"]))
                .with_response("780008", mock_record(&[])),
        );

        let mut graph = manuscripts();
        let report = ImageEnricher::new(client.clone())
            .apply(&mut graph, &ctx)
            .await
            .unwrap();

        assert_eq!(report.added, 2);
        let images = graph.objects(&Node::from(Iri::new(MS1)), &v.image);
        assert!(images.contains(&Object::from(Iri::new(
            "https://images.rkd.nl/rkd/thumb/650x650/aaa.jpg"
        ))));
        assert!(graph.objects(&Node::from(Iri::new(MS2)), &v.image).is_empty());
        assert_eq!(client.calls("780007"), 1);
    }

    #[tokio::test]
    async fn unavailable_record_is_skipped_after_retry() {
        let config = config();
        let v = config.vocabulary();
        let aux = Graph::new("urn:aux");
        let ctx = PassContext::new(&v, &config, &aux);
        let client = Arc::new(
            MockRecordClient::new()
                .with_failure("780007", RecordError::Malformed("<html>".to_string()))
                .with_response("780008", mock_record(&["ccc"])),
        );

        let mut graph = manuscripts();
        let report = ImageEnricher::new(client.clone())
            .apply(&mut graph, &ctx)
            .await
            .unwrap();

        assert_eq!(client.calls("780007"), 2);
        assert_eq!(report.added, 1);
        assert!(report.notes.iter().any(|n| n == "no record for 780007"));
        assert_eq!(graph.objects(&Node::from(Iri::new(MS2)), &v.image).len(), 1);
    }
}
