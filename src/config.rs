//! Pipeline configuration
//!
//! Every field has a built-in default matching the Bredius/RKD datasets, so a
//! YAML file only needs to name what differs.

use crate::vocab::{Vocabulary, DEFAULT_SCHEMA_NAMESPACE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A literal substring substitution applied to identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewrite {
    pub from: String,
    pub to: String,
}

impl Rewrite {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Settings for the external record API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordApiConfig {
    /// Base URL; the record key is appended as a path segment
    pub base_url: String,
    /// Image URL template; `{uuid}` is replaced by the image identifier
    pub image_template: String,
    /// Fixed wait before the single retry
    pub retry_delay_ms: u64,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for RecordApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://rkd.nl/api/record/excerpts".to_string(),
            image_template: "https://images.rkd.nl/rkd/thumb/650x650/{uuid}.jpg".to_string(),
            retry_delay_ms: 10_000,
            timeout_secs: 30,
        }
    }
}

impl RecordApiConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Render the image URL for one image identifier
    pub fn image_url(&self, uuid: &str) -> String {
        self.image_template.replace("{uuid}", uuid)
    }
}

/// An agent (organization or person) described on the collection root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub iri: String,
    /// Names keyed by language tag; an empty tag yields a plain literal
    pub names: Vec<(String, String)>,
}

/// Descriptive metadata for the root collection of a finding aid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    pub iri: String,
    pub name: String,
    pub name_language: String,
    pub temporal_coverage: String,
    pub size: String,
    pub identifier: String,
    pub url: String,
    pub holding_archive: AgentConfig,
    pub creator: AgentConfig,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            iri: "https://data.rkd.nl/collections/380".to_string(),
            name: "Archief Abraham Bredius".to_string(),
            name_language: "nl".to_string(),
            temporal_coverage: "1616/1940".to_string(),
            size: "7.5M".to_string(),
            identifier: "NL-HaRKD.0380".to_string(),
            url: "https://rkd.nl/explore/archives/details/NL-HaRKD-0380".to_string(),
            holding_archive: AgentConfig {
                iri: "https://rkd.nl/".to_string(),
                names: vec![
                    (
                        "nl".to_string(),
                        "RKD – Nederlands Instituut voor Kunstgeschiedenis".to_string(),
                    ),
                    (
                        "en".to_string(),
                        "RKD – Netherlands Institute for Art History".to_string(),
                    ),
                ],
            },
            creator: AgentConfig {
                iri: "https://rkd.nl/explore/artists/338895".to_string(),
                names: vec![(String::new(), "Abraham Bredius".to_string())],
            },
        }
    }
}

/// Top-level pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Named graph the output is published under
    pub dataset_graph: String,
    pub schema_namespace: String,
    /// Raw namespace person URIs arrive in
    pub people_namespace: String,
    /// Canonical namespace person URIs are rewritten into
    pub artists_namespace: String,
    /// Excerpt URI → external item URI (notary linkset)
    pub excerpt_item_rewrite: Rewrite,
    /// Excerpt URI → public permalink
    pub permalink_rewrite: Rewrite,
    /// Path segment identifying controlled-vocabulary concepts
    pub concept_marker: String,
    /// Identifiers whose triples are removed before anything is derived from them
    pub placeholder_iris: Vec<String>,
    /// Authority prefix for skolem IRIs
    pub skolem_authority: String,
    pub record_api: RecordApiConfig,
    pub collection: CollectionConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dataset_graph: "https://data.goldenagents.org/datasets/bredius/".to_string(),
            schema_namespace: DEFAULT_SCHEMA_NAMESPACE.to_string(),
            people_namespace: "https://rkd.nl/explore/thesaurus/people/".to_string(),
            artists_namespace: "https://rkd.nl/explore/artists/".to_string(),
            excerpt_item_rewrite: Rewrite::new("/excerpts/", "/collection/bredius/externalitem/"),
            permalink_rewrite: Rewrite::new("data.rkd.nl", "rkd.nl/explore"),
            concept_marker: "/thesaurus/".to_string(),
            placeholder_iris: vec!["https://rkd.nl/explore/artists/".to_string()],
            skolem_authority: "https://data.goldenagents.org/datasets/bredius".to_string(),
            record_api: RecordApiConfig::default(),
            collection: CollectionConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a YAML document; absent keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Load from `path`, else the default location if it exists, else defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => match default_config_path() {
                Some(p) if p.is_file() => Self::load(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    /// The vocabulary registry for this configuration
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary::schema_org(&self.schema_namespace)
    }
}

/// `<config_dir>/bredius/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bredius").join("config.yaml"))
}
