//! Reading inputs and writing the published graph
//!
//! - [`rdf`]: RDF documents (N-Triples, N-Quads, Turtle, TriG, RDF/XML)
//! - [`tabular`]: the excerpt → notary CSV table
//! - finding-aid JSON documents for the hierarchy converter

pub mod rdf;
pub mod tabular;

pub use rdf::{read_graph, read_graph_file, write_graph, write_graph_file, Format, ParseError};
pub use tabular::{read_notary_rows, read_notary_rows_file};

use crate::adapter::FindingAid;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or writing files
#[derive(Debug, Error)]
pub enum IoError {
    #[error("IO error on {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IoError {
    pub(crate) fn file(path: &Path, source: std::io::Error) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Load a finding-aid export (`{"Collection": [...]}`)
pub fn read_finding_aid(path: &Path) -> Result<FindingAid, IoError> {
    let file = std::fs::File::open(path).map_err(|e| IoError::file(path, e))?;
    Ok(FindingAid::from_reader(std::io::BufReader::new(file))?)
}
