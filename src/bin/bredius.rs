//! Bredius CLI — builds the publishable graphs from the RKD exports.
//!
//! Usage:
//!   bredius excerpts <dataset.xml> [--vocabulary vocab.ttl] [--offline]
//!   bredius inventories <finding-aid.json> [--excerpts dataset.xml]
//!   bredius notaries <links.csv>
//!
//! Common flags: `--config <yaml>`, `--format nt|nq|ttl|trig|xml`, `-o <file>`, `-v`.
//! RDF inputs are read in the syntax their extension names (`.xml`/`.rdf`,
//! `.ttl`, `.trig`, `.nq`, else N-Triples). Output is written only after
//! every pass succeeded.

use bredius::adapter::{
    HierarchyConverter, ImageEnricher, InventoryLinker, LabelNormalizer, LiteralValidator,
    NotaryLinker, PermalinkLinker, PlaceholderCleaner, RoleReifier, Skolemizer,
};
use bredius::io::{self, Format, IoError};
use bredius::{
    ConfigError, Graph, HttpRecordClient, Iri, PassError, Pipeline, PipelineConfig, RecordError,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bredius",
    version,
    about = "Knowledge graph pipeline for the Bredius archival excerpts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Pipeline configuration (YAML); defaults to <config_dir>/bredius/config.yaml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Output syntax
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Nt)]
    format: OutputFormat,
    /// Write the graph to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean and enrich the excerpt dataset
    Excerpts {
        /// Excerpt dataset (RDF/XML, Turtle, TriG, N-Triples or N-Quads)
        input: PathBuf,
        /// Vocabulary dataset with authoritative labels
        #[arg(long)]
        vocabulary: Option<PathBuf>,
        /// Skip the image lookups against the record API
        #[arg(long)]
        offline: bool,
    },
    /// Convert the finding aid and link excerpts to their inventories
    Inventories {
        /// Finding-aid JSON export
        input: PathBuf,
        /// Excerpt dataset to link against
        #[arg(long)]
        excerpts: Option<PathBuf>,
    },
    /// Build the excerpt → notary linkset
    Notaries {
        /// CSV with columns excerpt, notary, notary_name
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// N-Triples
    Nt,
    /// N-Quads in the dataset graph
    Nq,
    /// Turtle
    Ttl,
    /// TriG in the dataset graph
    Trig,
    /// RDF/XML
    Xml,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Nt => Format::NTriples,
            OutputFormat::Nq => Format::NQuads,
            OutputFormat::Ttl => Format::Turtle,
            OutputFormat::Trig => Format::TriG,
            OutputFormat::Xml => Format::RdfXml,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Pass(#[from] PassError),
    #[error("record API client: {0}")]
    Record(#[from] RecordError),
    #[error("writing output: {0}")]
    Output(#[from] std::io::Error),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("bredius=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bredius=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Auxiliary graphs are named after the file they came from
fn load_auxiliary(path: Option<&Path>) -> Result<Graph, IoError> {
    match path {
        Some(p) => io::read_graph_file(p, Iri::new(format!("file://{}", p.display()))),
        None => Ok(Graph::new("urn:bredius:empty")),
    }
}

async fn cmd_excerpts(
    config: PipelineConfig,
    input: &Path,
    vocabulary: Option<&Path>,
    offline: bool,
) -> Result<Graph, CliError> {
    let graph = io::read_graph_file(input, config.dataset_graph.as_str())?;
    let auxiliary = load_auxiliary(vocabulary)?;
    info!(triples = graph.len(), vocabulary = auxiliary.len(), "excerpt dataset loaded");

    let mut pipeline = Pipeline::new(config)
        .with_pass(Arc::new(PermalinkLinker::new()))
        .with_pass(Arc::new(LabelNormalizer::new()))
        .with_pass(Arc::new(PlaceholderCleaner::new()))
        .with_pass(Arc::new(LiteralValidator::new()))
        .with_pass(Arc::new(RoleReifier::new()));
    if !offline {
        let client = HttpRecordClient::new(&pipeline.config().record_api)?;
        pipeline.register_pass(Arc::new(ImageEnricher::new(Arc::new(client))));
    }
    pipeline.register_pass(Arc::new(Skolemizer::new()));

    Ok(pipeline.run(graph, &auxiliary).await?.graph)
}

async fn cmd_inventories(
    config: PipelineConfig,
    input: &Path,
    excerpts: Option<&Path>,
) -> Result<Graph, CliError> {
    let finding_aid = io::read_finding_aid(input)?;
    let auxiliary = load_auxiliary(excerpts)?;
    info!(
        records = finding_aid.collection.len(),
        excerpts = auxiliary.len(),
        "finding aid loaded"
    );

    let graph = Graph::new(config.dataset_graph.as_str());
    let pipeline = Pipeline::new(config)
        .with_pass(Arc::new(HierarchyConverter::new(finding_aid)))
        .with_pass(Arc::new(PlaceholderCleaner::new()))
        .with_pass(Arc::new(InventoryLinker::new()))
        .with_pass(Arc::new(Skolemizer::new()));

    Ok(pipeline.run(graph, &auxiliary).await?.graph)
}

async fn cmd_notaries(config: PipelineConfig, input: &Path) -> Result<Graph, CliError> {
    let rows = io::read_notary_rows_file(input)?;
    info!(rows = rows.len(), "notary table loaded");

    let graph = Graph::new(config.dataset_graph.as_str());
    let pipeline = Pipeline::new(config).with_pass(Arc::new(NotaryLinker::new(rows)));

    Ok(pipeline.run(graph, &Graph::new("urn:bredius:empty")).await?.graph)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = PipelineConfig::resolve(cli.config.as_deref())?;
    let graph = match cli.command {
        Commands::Excerpts {
            input,
            vocabulary,
            offline,
        } => cmd_excerpts(config, &input, vocabulary.as_deref(), offline).await?,
        Commands::Inventories { input, excerpts } => {
            cmd_inventories(config, &input, excerpts.as_deref()).await?
        }
        Commands::Notaries { input } => cmd_notaries(config, &input).await?,
    };

    let format = Format::from(cli.format);
    match cli.output {
        Some(path) => io::write_graph_file(&graph, format, &path)?,
        None => {
            let mut buffer = Vec::new();
            io::write_graph(&graph, format, &mut buffer)?;
            std::io::Write::write_all(&mut std::io::stdout().lock(), &buffer)?;
        }
    }
    info!(triples = graph.len(), "graph written");
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
