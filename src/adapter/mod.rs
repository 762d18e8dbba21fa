//! Graph rewrite passes
//!
//! Every transformation of the graph is a [`Pass`]: it receives the current
//! graph and a read-only [`PassContext`], mutates through a [`GraphSink`],
//! and returns a [`PassReport`]. A [`Pipeline`] runs passes in order.

mod enrichment;
mod hierarchy;
mod labels;
mod linkset;
mod literals;
mod permalink;
mod pipeline;
mod placeholders;
mod roles;
mod sink;
mod skolem;
mod traits;
mod types;

pub use enrichment::ImageEnricher;
pub use hierarchy::{ComponentRecord, FindingAid, HierarchyConverter, PersonRecord};
pub use labels::{is_concept, LabelNormalizer};
pub use linkset::{inventory_prefix, InventoryLinker, NotaryLinker, NotaryRow};
pub use literals::{is_strict_date, InvalidLiteral, LiteralValidator};
pub use permalink::PermalinkLinker;
pub use pipeline::{Pipeline, PipelineOutcome};
pub use placeholders::PlaceholderCleaner;
pub use roles::{Qualifier, RoleMention, RoleReifier};
pub use sink::GraphSink;
pub use skolem::{mapping as skolem_mapping, skolem_iri, Skolemizer};
pub use traits::{Pass, PassContext};
pub use types::{PassError, PassReport, PassResult};
