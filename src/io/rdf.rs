//! RDF documents in and out
//!
//! Parsing and serialization are done by `oxrdfio`; this module maps its
//! terms onto the graph's own. Graph labels in dataset formats are accepted
//! and merged into one graph. Blank node labels are scoped to one load: each
//! distinct label gets a fresh run-scoped identity.

use super::IoError;
use crate::graph::{BlankNode, Graph, Iri, Literal, Node, Object, Triple};
use crate::vocab::DEFAULT_SCHEMA_NAMESPACE;
use oxrdf::vocab::xsd;
use oxrdfio::{RdfFormat, RdfParseError, RdfParser, RdfSerializer};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

/// Prefixes declared in Turtle, TriG and RDF/XML output
const PREFIXES: [(&str, &str); 4] = [
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("schema", DEFAULT_SCHEMA_NAMESPACE),
    ("skos", "http://www.w3.org/2004/02/skos/core#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

/// A document that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    /// 1-based line of the offending statement, when the parser knows it
    pub line: Option<usize>,
    pub message: String,
}

impl ParseError {
    fn unsupported(what: &str) -> Self {
        Self {
            line: None,
            message: format!("{} are not supported", what),
        }
    }
}

impl From<RdfParseError> for ParseError {
    fn from(e: RdfParseError) -> Self {
        let line = if let RdfParseError::Syntax(syntax) = &e {
            syntax.location().map(|range| range.start.line as usize + 1)
        } else {
            None
        };
        Self {
            line,
            message: e.to_string(),
        }
    }
}

/// Document syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    NTriples,
    /// Every statement carries the graph's name
    NQuads,
    Turtle,
    /// Turtle with the graph's name
    TriG,
    RdfXml,
}

impl Format {
    /// Guess the syntax from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "nt" => Some(Self::NTriples),
            "nq" => Some(Self::NQuads),
            "ttl" => Some(Self::Turtle),
            "trig" => Some(Self::TriG),
            "rdf" | "xml" | "owl" => Some(Self::RdfXml),
            _ => None,
        }
    }

    /// True if statements are written inside the graph's name
    pub fn has_graphs(self) -> bool {
        matches!(self, Self::NQuads | Self::TriG)
    }
}

impl From<Format> for RdfFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::NTriples => RdfFormat::NTriples,
            Format::NQuads => RdfFormat::NQuads,
            Format::Turtle => RdfFormat::Turtle,
            Format::TriG => RdfFormat::TriG,
            Format::RdfXml => RdfFormat::RdfXml,
        }
    }
}

/// Parse a document into a graph named `name`
pub fn read_graph(
    reader: impl Read,
    format: Format,
    name: impl Into<Iri>,
) -> Result<Graph, ParseError> {
    let mut graph = Graph::new(name);
    let mut labels = BlankLabels::default();
    for quad in RdfParser::from_format(format.into()).for_reader(reader) {
        let quad = quad?;
        graph.insert(labels.triple(quad)?);
    }
    Ok(graph)
}

/// Load a file, choosing the syntax by extension (N-Triples when unknown)
pub fn read_graph_file(path: &Path, name: impl Into<Iri>) -> Result<Graph, IoError> {
    let format = Format::from_path(path).unwrap_or_default();
    let file = std::fs::File::open(path).map_err(|e| IoError::file(path, e))?;
    read_graph(std::io::BufReader::new(file), format, name).map_err(|source| IoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a graph in the graph's triple order
pub fn write_graph(graph: &Graph, format: Format, out: impl Write) -> std::io::Result<()> {
    let graph_name = if format.has_graphs() {
        oxrdf::GraphName::from(named_node(graph.name()))
    } else {
        oxrdf::GraphName::DefaultGraph
    };
    let mut serializer = RdfSerializer::from_format(format.into());
    for (prefix, namespace) in PREFIXES {
        serializer = serializer
            .with_prefix(prefix, namespace)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    }

    let mut writer = serializer.for_writer(out);
    for triple in graph {
        writer.serialize_quad(&to_quad(triple, graph_name.clone()))?;
    }
    writer.finish()?.flush()
}

/// Write to `path` only once the whole serialization succeeded
pub fn write_graph_file(graph: &Graph, format: Format, path: &Path) -> Result<(), IoError> {
    let mut buffer = Vec::new();
    write_graph(graph, format, &mut buffer).map_err(|e| IoError::file(path, e))?;
    std::fs::write(path, buffer).map_err(|e| IoError::file(path, e))
}

/// Blank node labels seen in one document
#[derive(Default)]
struct BlankLabels(HashMap<String, BlankNode>);

impl BlankLabels {
    fn get(&mut self, node: &oxrdf::BlankNode) -> BlankNode {
        *self
            .0
            .entry(node.as_str().to_string())
            .or_insert_with(BlankNode::new)
    }

    #[allow(unreachable_patterns)]
    fn triple(&mut self, quad: oxrdf::Quad) -> Result<Triple, ParseError> {
        let subject = match quad.subject {
            oxrdf::Subject::NamedNode(n) => Node::Iri(Iri::new(n.into_string())),
            oxrdf::Subject::BlankNode(b) => Node::Blank(self.get(&b)),
            _ => return Err(ParseError::unsupported("quoted triples")),
        };
        let object = match quad.object {
            oxrdf::Term::NamedNode(n) => Object::Iri(Iri::new(n.into_string())),
            oxrdf::Term::BlankNode(b) => Object::Blank(self.get(&b)),
            oxrdf::Term::Literal(l) => Object::Literal(literal(&l)),
            _ => return Err(ParseError::unsupported("quoted triples")),
        };
        Ok(Triple {
            subject,
            predicate: Iri::new(quad.predicate.into_string()),
            object,
        })
    }
}

fn literal(literal: &oxrdf::Literal) -> Literal {
    if let Some(language) = literal.language() {
        Literal::lang(literal.value(), language)
    } else if literal.datatype() == xsd::STRING {
        Literal::plain(literal.value())
    } else {
        Literal::typed(literal.value(), literal.datatype().as_str())
    }
}

fn to_literal(l: &Literal) -> oxrdf::Literal {
    match (l.language(), l.datatype()) {
        (Some(language), _) => oxrdf::Literal::new_language_tagged_literal_unchecked(l.value(), language),
        (None, Some(datatype)) => oxrdf::Literal::new_typed_literal(l.value(), named_node(datatype)),
        (None, None) => oxrdf::Literal::new_simple_literal(l.value()),
    }
}

fn named_node(iri: &Iri) -> oxrdf::NamedNode {
    oxrdf::NamedNode::new_unchecked(iri.as_str())
}

fn blank_node(node: &BlankNode) -> oxrdf::BlankNode {
    oxrdf::BlankNode::new_unchecked(format!("b{}", node.token()))
}

fn to_quad(triple: &Triple, graph_name: oxrdf::GraphName) -> oxrdf::Quad {
    let subject: oxrdf::Subject = match &triple.subject {
        Node::Iri(i) => named_node(i).into(),
        Node::Blank(b) => blank_node(b).into(),
    };
    let object: oxrdf::Term = match &triple.object {
        Object::Iri(i) => named_node(i).into(),
        Object::Blank(b) => blank_node(b).into(),
        Object::Literal(l) => to_literal(l).into(),
    };
    oxrdf::Quad::new(subject, named_node(&triple.predicate), object, graph_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{RDF_TYPE, XSD_DATE};

    const SAMPLE: &str = r#"
# Bredius excerpt
<https://data.rkd.nl/excerpts/780007> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Manuscript> .
<https://data.rkd.nl/excerpts/780007> <http://schema.org/about> _:p1 .
_:p1 <http://schema.org/name> "Pieter \"de\" Grebber"@nl .
_:p1 <http://schema.org/birthDate> "1600-01-01"^^<http://www.w3.org/2001/XMLSchema#date> .
_:p2 <http://schema.org/name> "tab\there" .
"#;

    const RDF_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:schema="http://schema.org/">
  <schema:Manuscript rdf:about="https://data.rkd.nl/excerpts/780007">
    <schema:about rdf:nodeID="p1"/>
  </schema:Manuscript>
  <schema:Person rdf:nodeID="p1">
    <schema:name xml:lang="nl">Pieter de Grebber</schema:name>
  </schema:Person>
</rdf:RDF>
"#;

    fn sample() -> Graph {
        read_graph(SAMPLE.as_bytes(), Format::NTriples, "urn:g").unwrap()
    }

    fn manuscript() -> Node {
        Node::from(Iri::new("https://data.rkd.nl/excerpts/780007"))
    }

    #[test]
    fn reads_all_term_kinds() {
        let g = sample();
        assert_eq!(g.len(), 5);
        assert_eq!(g.blank_nodes().len(), 2);

        assert!(g.has(&manuscript(), &Iri::new(RDF_TYPE), &Object::from(Iri::new("http://schema.org/Manuscript"))));
        let literals: Vec<Literal> = g
            .iter()
            .filter_map(|t| t.object.as_literal().cloned())
            .collect();
        assert!(literals.contains(&Literal::lang("Pieter \"de\" Grebber", "nl")));
        assert!(literals.contains(&Literal::typed("1600-01-01", XSD_DATE)));
        assert!(literals.contains(&Literal::plain("tab\there")));
    }

    #[test]
    fn same_label_is_one_identity() {
        let g = sample();
        let person = g
            .objects(&manuscript(), &Iri::new("http://schema.org/about"))
            .remove(0)
            .as_node()
            .unwrap();
        assert_eq!(g.objects(&person, &Iri::new("http://schema.org/name")).len(), 1);
        assert_eq!(g.objects(&person, &Iri::new("http://schema.org/birthDate")).len(), 1);
    }

    #[test]
    fn rdf_xml_export_is_read() {
        let g = read_graph(RDF_XML.as_bytes(), Format::RdfXml, "urn:g").unwrap();
        assert_eq!(g.len(), 4);
        assert_eq!(g.blank_nodes().len(), 1);

        let person = g
            .objects(&manuscript(), &Iri::new("http://schema.org/about"))
            .remove(0)
            .as_node()
            .unwrap();
        assert!(g.has(&person, &Iri::new(RDF_TYPE), &Object::from(Iri::new("http://schema.org/Person"))));
        assert_eq!(
            g.objects(&person, &Iri::new("http://schema.org/name")),
            vec![Object::from(Literal::lang("Pieter de Grebber", "nl"))]
        );
    }

    #[test]
    fn quads_are_merged() {
        let text = "<urn:a> <urn:p> <urn:b> <urn:graph1> .\n<urn:a> <urn:p> <urn:c> .\n";
        let g = read_graph(text.as_bytes(), Format::NQuads, "urn:g").unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g.name().as_str(), "urn:g");
    }

    #[test]
    fn malformed_documents_are_rejected() {
        for text in [
            "<urn:a> <urn:p> <urn:b>\n",
            "\"lit\" <urn:p> <urn:b> .\n",
            "<urn:a> _:p <urn:b> .\n",
            "<not an iri> <urn:p> <urn:b> .\n",
        ] {
            assert!(read_graph(text.as_bytes(), Format::NTriples, "urn:g").is_err(), "{text:?}");
        }
        let err = read_graph(
            "<urn:a> <urn:p> <urn:b> .\n<urn:a> <urn:p> .\n".as_bytes(),
            Format::NTriples,
            "urn:g",
        )
        .unwrap_err();
        assert_eq!(err.line, Some(2));
    }

    #[test]
    fn format_follows_the_extension() {
        assert_eq!(Format::from_path(Path::new("export.xml")), Some(Format::RdfXml));
        assert_eq!(Format::from_path(Path::new("dataset.TTL")), Some(Format::Turtle));
        assert_eq!(Format::from_path(Path::new("out.trig")), Some(Format::TriG));
        assert_eq!(Format::from_path(Path::new("dataset")), None);
    }

    #[test]
    fn every_format_reads_back_the_same_shape() {
        let g = sample();
        for format in [
            Format::NTriples,
            Format::NQuads,
            Format::Turtle,
            Format::TriG,
            Format::RdfXml,
        ] {
            let mut out = Vec::new();
            write_graph(&g, format, &mut out).unwrap();
            let back = read_graph(out.as_slice(), format, "urn:g").unwrap();
            assert_eq!(back.len(), g.len(), "{format:?}");
            assert_eq!(back.blank_nodes().len(), 2, "{format:?}");
            assert!(back
                .iter()
                .any(|t| t.object.as_literal() == Some(&Literal::plain("tab\there"))));
        }
    }

    #[test]
    fn quads_carry_the_graph_name() {
        let mut g = Graph::new("https://data.goldenagents.org/datasets/bredius/");
        g.add(Iri::new("urn:a"), "urn:p", Iri::new("urn:b"));
        let mut out = Vec::new();
        write_graph(&g, Format::NQuads, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap().trim_end(),
            "<urn:a> <urn:p> <urn:b> <https://data.goldenagents.org/datasets/bredius/> ."
        );
    }

    #[test]
    fn output_is_deterministic() {
        let g = sample();
        let (mut a, mut b) = (Vec::new(), Vec::new());
        write_graph(&g, Format::Turtle, &mut a).unwrap();
        write_graph(&g.clone(), Format::Turtle, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn file_round_trip_picks_the_syntax_from_the_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ttl");
        write_graph_file(&sample(), Format::Turtle, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("@prefix schema:") || text.contains("PREFIX schema:"));

        let back = read_graph_file(&path, "urn:g").unwrap();
        assert_eq!(back.len(), 5);
    }
}
