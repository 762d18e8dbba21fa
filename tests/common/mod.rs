//! Shared fixtures for the pipeline integration tests
//!
//! Small but complete samples of the three RKD exports: the excerpt
//! dataset, its vocabulary, the finding aid and the notary table.

#![allow(dead_code)]

use bredius::io::{read_graph, Format};
use bredius::{Graph, Iri, Node, Object, PipelineConfig};

pub const MS_1: &str = "https://data.rkd.nl/excerpts/780007";
pub const MS_2: &str = "https://data.rkd.nl/excerpts/780008";
pub const GREBBER: &str = "https://rkd.nl/explore/artists/33498";
pub const JANSZ: &str = "https://rkd.nl/explore/artists/41187";
pub const NOTARIS: &str = "https://rkd.nl/explore/thesaurus/notaris";
pub const START_DATE: &str = "http://schema.org/startDate";
pub const END_DATE: &str = "http://schema.org/endDate";

/// Excerpt dataset: two manuscripts, three person mentions, one noisy
/// concept, one invalid date and one named placeholder person
pub const EXCERPTS_NT: &str = r#"
<https://data.rkd.nl/excerpts/780007> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Manuscript> .
<https://data.rkd.nl/excerpts/780007> <http://schema.org/identifier> "0380.220_3" .
<https://data.rkd.nl/excerpts/780007> <http://schema.org/about> <https://rkd.nl/explore/artists/33498> .
<https://data.rkd.nl/excerpts/780007> <http://schema.org/about> <https://rkd.nl/explore/artists/41187> .
<https://data.rkd.nl/excerpts/780007> <http://schema.org/about> <https://rkd.nl/explore/artists/> .
<https://data.rkd.nl/excerpts/780007> <http://schema.org/contentReferenceTime> _:t1 .
_:t1 <http://schema.org/startDate> "1650-13-01"^^<http://www.w3.org/2001/XMLSchema#date> .
_:t1 <http://schema.org/endDate> "1650-12-31"^^<http://www.w3.org/2001/XMLSchema#date> .
<https://data.rkd.nl/excerpts/780008> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Manuscript> .
<https://data.rkd.nl/excerpts/780008> <http://schema.org/identifier> "0380.221" .
<https://data.rkd.nl/excerpts/780008> <http://schema.org/about> <https://rkd.nl/explore/artists/41187> .
<https://rkd.nl/explore/artists/33498> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .
<https://rkd.nl/explore/artists/33498> <http://schema.org/name> "Pieter de Grebber" .
<https://rkd.nl/explore/artists/33498> <http://schema.org/additionalType> <https://rkd.nl/explore/thesaurus/notaris> .
<https://rkd.nl/explore/artists/41187> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .
<https://rkd.nl/explore/artists/41187> <http://schema.org/name> "Jan Jansz" .
<https://rkd.nl/explore/artists/> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .
<https://rkd.nl/explore/artists/> <http://schema.org/name> "Onbekend" .
<https://rkd.nl/explore/thesaurus/notaris> <http://schema.org/name> "notaris"@nl .
<https://rkd.nl/explore/thesaurus/notaris> <http://schema.org/name> "Notaris"@nl .
<https://rkd.nl/explore/thesaurus/notaris> <http://schema.org/name> "notary public"@en .
<https://rkd.nl/explore/thesaurus/notaris> <http://schema.org/name> "NOTARIS" .
<https://rkd.nl/explore/thesaurus/notaris> <http://schema.org/name> "notarissen"@nl .
"#;

/// Vocabulary with authoritative labels for the concept
pub const VOCABULARY_NT: &str = r#"
<https://rkd.nl/explore/thesaurus/notaris> <http://www.w3.org/2004/02/skos/core#prefLabel> "notary"@en .
<https://rkd.nl/explore/thesaurus/notaris> <http://www.w3.org/2004/02/skos/core#prefLabel> "notaris"@nl .
"#;

/// Finding aid: inventory 0380.220 with one sub-component mentioning a
/// person and a person record with an empty id
pub const FINDING_AID_JSON: &str = r#"{
  "Collection": [
    {
      "URI": "https://data.rkd.nl/inventories/0380.220",
      "Titel": "Aantekeningen uit notariële archieven",
      "Inventarisnummer": "0380.220",
      "Onderdelen": [
        {
          "URI": "https://data.rkd.nl/inventories/0380.220.1",
          "Titel": "Delft",
          "Inventarisnummer": "0380.220.1",
          "Personen": [
            {"URI": "https://rkd.nl/explore/thesaurus/people/33498", "Naam": "Pieter de Grebber"},
            {"URI": "https://rkd.nl/explore/thesaurus/people/", "Naam": ""}
          ]
        }
      ]
    },
    {
      "URI": "https://data.rkd.nl/inventories/0380.221",
      "Titel": "Brieven",
      "Inventarisnummer": "0380.221"
    }
  ]
}"#;

/// Notary table: one full row, one without a notary, one NaN, one without a name
pub const NOTARIES_CSV: &str = "\
excerpt,notary,notary_name
https://data.rkd.nl/excerpts/780007,https://rkd.nl/explore/artists/41187,Jan Jansz
https://data.rkd.nl/excerpts/780008,,
https://data.rkd.nl/excerpts/780009,nan,
https://data.rkd.nl/excerpts/780010,https://rkd.nl/explore/artists/5,
";

/// Configuration for tests: no retry wait
pub fn test_config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.record_api.retry_delay_ms = 0;
    config
}

pub fn excerpts() -> Graph {
    read_graph(EXCERPTS_NT.as_bytes(), Format::NTriples, test_config().dataset_graph.as_str())
        .expect("excerpt fixture parses")
}

pub fn vocabulary() -> Graph {
    read_graph(VOCABULARY_NT.as_bytes(), Format::NTriples, "urn:test:vocabulary")
        .expect("vocabulary fixture parses")
}

pub fn node(iri: &str) -> Node {
    Node::from(Iri::new(iri))
}

pub fn iri_object(iri: &str) -> Object {
    Object::from(Iri::new(iri))
}
