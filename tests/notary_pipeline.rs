//! Notary CSV → author linkset.

mod common;

use bredius::adapter::NotaryLinker;
use bredius::io::{read_graph_file, read_notary_rows_file, write_graph_file, Format};
use bredius::{Graph, Literal, Object, Pipeline};
use common::*;
use std::sync::Arc;

const ITEM: &str = "https://data.rkd.nl/collection/bredius/externalitem/780007";

#[tokio::test]
async fn table_to_linkset_file() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("notaries.csv");
    std::fs::write(&csv, NOTARIES_CSV).unwrap();

    let rows = read_notary_rows_file(&csv).unwrap();
    assert_eq!(rows.len(), 4);

    let config = test_config();
    let v = config.vocabulary();
    let graph = Graph::new(config.dataset_graph.as_str());
    let outcome = Pipeline::new(config)
        .with_pass(Arc::new(NotaryLinker::new(rows)))
        .run(graph, &Graph::new("urn:empty"))
        .await
        .unwrap();

    // full row: type, name, author; nameless row: type, author
    assert_eq!(outcome.graph.len(), 5);
    assert!(outcome.graph.has(&node(ITEM), &v.author, &iri_object(JANSZ)));
    assert!(outcome
        .graph
        .has(&node(JANSZ), &v.name, &Object::from(Literal::plain("Jan Jansz"))));
    assert!(outcome.graph.objects(&node("https://rkd.nl/explore/artists/5"), &v.name).is_empty());

    let out = dir.path().join("notaries.nq");
    write_graph_file(&outcome.graph, Format::NQuads, &out).unwrap();
    let back = read_graph_file(&out, "urn:back").unwrap();
    assert_eq!(back.len(), 5);
}
