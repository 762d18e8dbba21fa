//! Bredius: knowledge graph pipeline for the Bredius archival excerpts
//!
//! Turns the RKD exports of the Abraham Bredius archive (a nested finding
//! aid, an RDF dataset of digitized excerpts, and a table of notaries) into
//! one normalized graph ready for publication.
//!
//! # Core Concepts
//!
//! - **Graph**: an in-memory, named, set-semantic collection of triples
//! - **Pass**: one rewrite of the graph (role reification, label cleanup,
//!   literal validation, linksets, image enrichment, skolemization)
//! - **Pipeline**: runs passes strictly in sequence, each seeing the
//!   complete output of the previous
//!
//! # Example
//!
//! ```
//! use bredius::{Graph, Iri, PermalinkLinker, Pipeline, PipelineConfig};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), bredius::PassError> {
//! let config = PipelineConfig::default();
//! let vocab = config.vocabulary();
//! let mut graph = Graph::new(config.dataset_graph.as_str());
//! graph.add(Iri::new("https://data.rkd.nl/excerpts/780007"), &vocab.rdf_type, &vocab.manuscript);
//!
//! let pipeline = Pipeline::new(config).with_pass(Arc::new(PermalinkLinker::new()));
//! let outcome = pipeline.run(graph, &Graph::new("urn:empty")).await?;
//! assert_eq!(outcome.graph.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod config;
mod graph;
pub mod io;
pub mod query;
pub mod records;
pub mod vocab;

pub use adapter::{
    GraphSink, HierarchyConverter, ImageEnricher, InventoryLinker, LabelNormalizer,
    LiteralValidator, NotaryLinker, Pass, PassContext, PassError, PassReport, PermalinkLinker,
    Pipeline, PipelineOutcome, PlaceholderCleaner, RoleReifier, Skolemizer,
};
pub use config::{ConfigError, PipelineConfig};
pub use graph::{BlankNode, Graph, GraphError, GraphResult, Iri, Literal, Node, Object, Triple};
pub use io::{Format, IoError, ParseError};
pub use query::TriplePattern;
pub use records::{HttpRecordClient, RecordClient, RecordError};
pub use vocab::Vocabulary;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
