//! Fixed vocabulary registry
//!
//! Built once from the configured schema namespace and handed to every
//! pass through its context. Never mutated after construction.

use crate::graph::Iri;

/// Default schema.org namespace used by the RKD export
pub const DEFAULT_SCHEMA_NAMESPACE: &str = "http://schema.org/";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
pub const XSD_DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Language tags used for bilingual labels
pub mod lang {
    pub const EN: &str = "en";
    pub const NL: &str = "nl";
}

/// The predicates and classes every pass relies on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub rdf_type: Iri,
    pub name: Iri,
    pub identifier: Iri,
    pub has_part: Iri,
    pub is_part_of: Iri,
    pub about: Iri,
    pub subject_of: Iri,
    pub additional_type: Iri,
    pub role_name: Iri,
    pub url: Iri,
    pub image: Iri,
    pub author: Iri,
    pub content_reference_time: Iri,
    pub temporal_coverage: Iri,
    pub size: Iri,
    pub holding_archive: Iri,
    pub creator: Iri,

    pub archive_component: Iri,
    pub collection: Iri,
    pub manuscript: Iri,
    pub person: Iri,
    pub organization: Iri,
    pub role: Iri,
    pub defined_term: Iri,

    /// Authoritative preferred label in vocabulary datasets
    pub pref_label: Iri,
    pub xsd_date: Iri,
}

impl Vocabulary {
    /// Build the registry for a schema.org namespace (`http://` or `https://`)
    pub fn schema_org(namespace: &str) -> Self {
        let s = |local: &str| Iri::new(format!("{}{}", namespace, local));
        Self {
            rdf_type: Iri::new(RDF_TYPE),
            name: s("name"),
            identifier: s("identifier"),
            has_part: s("hasPart"),
            is_part_of: s("isPartOf"),
            about: s("about"),
            subject_of: s("subjectOf"),
            additional_type: s("additionalType"),
            role_name: s("roleName"),
            url: s("url"),
            image: s("image"),
            author: s("author"),
            content_reference_time: s("contentReferenceTime"),
            temporal_coverage: s("temporalCoverage"),
            size: s("size"),
            holding_archive: s("holdingArchive"),
            creator: s("creator"),

            archive_component: s("ArchiveComponent"),
            collection: s("Collection"),
            manuscript: s("Manuscript"),
            person: s("Person"),
            organization: s("Organization"),
            role: s("Role"),
            defined_term: s("DefinedTerm"),

            pref_label: Iri::new(SKOS_PREF_LABEL),
            xsd_date: Iri::new(XSD_DATE),
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::schema_org(DEFAULT_SCHEMA_NAMESPACE)
    }
}
