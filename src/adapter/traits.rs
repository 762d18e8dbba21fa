//! Pass trait — the contract every graph rewrite implements
//!
//! A pass takes the current graph, mutates it in place, and reports what it
//! changed. Passes run strictly one after another; each one sees the
//! complete output of the previous.

use super::types::{PassError, PassReport};
use crate::config::PipelineConfig;
use crate::graph::Graph;
use crate::vocab::Vocabulary;
use async_trait::async_trait;

/// Read-only inputs shared by every pass in a run.
#[derive(Debug, Clone, Copy)]
pub struct PassContext<'a> {
    pub vocab: &'a Vocabulary,
    pub config: &'a PipelineConfig,
    /// Auxiliary graph (vocabulary or joined dataset). May be empty; never mutated.
    pub auxiliary: &'a Graph,
}

impl<'a> PassContext<'a> {
    pub fn new(vocab: &'a Vocabulary, config: &'a PipelineConfig, auxiliary: &'a Graph) -> Self {
        Self {
            vocab,
            config,
            auxiliary,
        }
    }
}

/// The contract passes implement.
///
/// Implementations must collect everything they intend to change before
/// changing anything: the graph being rewritten is the graph being queried.
#[async_trait]
pub trait Pass: Send + Sync {
    /// Stable identifier used in reports and logs
    fn id(&self) -> &str;

    /// Rewrite `graph`, returning a summary of the mutation.
    async fn apply(&self, graph: &mut Graph, ctx: &PassContext<'_>) -> Result<PassReport, PassError>;
}
