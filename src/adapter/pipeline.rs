//! Sequential pass pipeline
//!
//! Pipeline steps:
//! 1. Build the vocabulary once from configuration
//! 2. Hand the graph to each registered pass in order
//! 3. Collect one report per pass
//! 4. Return the final graph for serialization
//!
//! The first failing pass aborts the run; no partial graph is returned.

use super::traits::{Pass, PassContext};
use super::types::{PassError, PassReport};
use crate::config::PipelineConfig;
use crate::graph::Graph;
use crate::vocab::Vocabulary;
use std::sync::Arc;
use tracing::{debug, info};

/// The final graph together with every pass report
#[derive(Debug)]
pub struct PipelineOutcome {
    pub graph: Graph,
    pub reports: Vec<PassReport>,
}

/// Runs passes strictly in sequence over one graph.
pub struct Pipeline {
    config: PipelineConfig,
    vocab: Vocabulary,
    passes: Vec<Arc<dyn Pass>>,
}

impl Pipeline {
    /// Create a pipeline with no passes.
    pub fn new(config: PipelineConfig) -> Self {
        let vocab = config.vocabulary();
        Self {
            config,
            vocab,
            passes: Vec::new(),
        }
    }

    /// Register a pass at the end of the sequence.
    pub fn register_pass(&mut self, pass: Arc<dyn Pass>) {
        self.passes.push(pass);
    }

    pub fn with_pass(mut self, pass: Arc<dyn Pass>) -> Self {
        self.register_pass(pass);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Registered pass ids, in execution order
    pub fn pass_ids(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.id()).collect()
    }

    /// Run every pass over `graph`, with `auxiliary` as the read-only side input.
    pub async fn run(&self, mut graph: Graph, auxiliary: &Graph) -> Result<PipelineOutcome, PassError> {
        let ctx = PassContext::new(&self.vocab, &self.config, auxiliary);
        let mut reports = Vec::with_capacity(self.passes.len());

        for (step, pass) in self.passes.iter().enumerate() {
            info!(
                "{}/{} running pass '{}' ({} triples)",
                step + 1,
                self.passes.len(),
                pass.id(),
                graph.len()
            );
            let report = pass.apply(&mut graph, &ctx).await?;
            info!(
                pass = pass.id(),
                added = report.added,
                removed = report.removed,
                "pass finished"
            );
            for note in &report.notes {
                debug!(pass = pass.id(), "{}", note);
            }
            reports.push(report);
        }

        Ok(PipelineOutcome { graph, reports })
    }
}
