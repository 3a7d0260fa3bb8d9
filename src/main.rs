use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use graph_rdf::{
    AdapterConfig, GraphStore, Literal, NamedNode, RdfFormat, RdfObject, RdfPredicate, TripleStore,
    TriplePattern,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "graph-rdf", version, about = "Query a property graph as RDF triples")]
struct Args {
    /// Adapter configuration file (YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RDF document to load (.ttl or .nt)
    #[arg(short, long)]
    input: PathBuf,

    /// Subject IRI to match
    #[arg(short, long)]
    subject: Option<String>,

    /// Predicate IRI to match
    #[arg(short, long)]
    predicate: Option<String>,

    /// Object to match: <iri> or a (quoted) literal
    #[arg(short, long)]
    object: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "ntriples")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Ntriples,
    Turtle,
}

impl From<OutputFormat> for RdfFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Ntriples => RdfFormat::NTriples,
            OutputFormat::Turtle => RdfFormat::Turtle,
        }
    }
}

fn parse_iri(value: &str) -> Result<NamedNode> {
    let iri = value
        .strip_prefix('<')
        .and_then(|v| v.strip_suffix('>'))
        .unwrap_or(value);
    NamedNode::new(iri).with_context(|| format!("invalid IRI: {}", value))
}

fn parse_object(value: &str) -> Result<RdfObject> {
    if value.starts_with('<') {
        return Ok(parse_iri(value)?.into());
    }
    let lexical = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    Ok(Literal::new_simple_literal(lexical).into())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AdapterConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AdapterConfig::default(),
    };

    let Some(input_format) = RdfFormat::from_path(&args.input) else {
        bail!("can't tell the RDF format of {}", args.input.display());
    };
    let input = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let mut store = TripleStore::with_config(GraphStore::new(), config);
    let loaded = store.load(&input, input_format)?;
    info!("graph-rdf v{}: {} triples from {}", graph_rdf::version(), loaded, args.input.display());

    let pattern = TriplePattern::new(
        args.subject.as_deref().map(parse_iri).transpose()?.map(Into::into),
        args.predicate
            .as_deref()
            .map(parse_iri)
            .transpose()?
            .map(RdfPredicate::from),
        args.object.as_deref().map(parse_object).transpose()?,
    );

    print!("{}", store.dump(&pattern, args.format.into())?);
    Ok(())
}
