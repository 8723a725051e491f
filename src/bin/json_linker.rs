//! json-linker: move related objects between embedded and linked JSON documents
//!
//! Usage:
//!   # Replace nested authors and tags with links, wrapped in an envelope
//!   json-linker link --relations author,tags --root posts post.json
//!
//!   # Turn envelopes back into embedded objects, one per line
//!   cat envelopes.jsonl | json-linker embed --root posts --ndjson
//!
//!   # Take relations and root from a config file
//!   json-linker link --config linker.json posts.json

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use json_linker::{embed_json, link_json, DocumentWriter, JsonLinker, LinkerConfig, Object};
use log::{debug, warn};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};

#[derive(Parser, Debug)]
#[command(name = "json-linker", version)]
#[command(about = "Link and embed related objects in JSON documents", long_about = None)]
struct Args {
    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace embedded relations with links and wrap each object in an envelope
    Link(Options),

    /// Resolve the links of envelopes back into embedded objects
    Embed(Options),
}

#[derive(clap::Args, Debug)]
struct Options {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Process newline-delimited JSON (one JSON object per line)
    #[arg(long)]
    ndjson: bool,

    /// Comma-separated relation fields to link
    #[arg(long, short = 'r')]
    relations: Option<String>,

    /// Envelope attribute holding the primary resource
    #[arg(long)]
    root: Option<String>,

    /// JSON file with `relations` and `root_attribute`
    #[arg(long, short = 'c')]
    config: Option<String>,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    stderrlog::new()
        .module(module_path!())
        .quiet(args.quiet)
        .verbosity(args.verbose as usize + 1)
        .init()
        .context("Failed to initialize logger")?;

    match args.command {
        Command::Link(options) => run(options, Mode::Link),
        Command::Embed(options) => run(options, Mode::Embed),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Link,
    Embed,
}

fn run(options: Options, mode: Mode) -> Result<()> {
    let linker = JsonLinker::new(build_config(&options)?);
    debug!("using {:?}", linker.config());

    let mut content = Vec::new();
    let mut reader = if let Some(file_path) = &options.input {
        Box::new(BufReader::new(
            File::open(file_path).with_context(|| format!("Failed to open file: {}", file_path))?,
        )) as Box<dyn Read>
    } else {
        Box::new(std::io::stdin()) as Box<dyn Read>
    };
    reader.read_to_end(&mut content).context("Failed to read input")?;

    let stdout = std::io::stdout();
    let mut writer = DocumentWriter::new(stdout.lock()).pretty(!options.compact);

    if options.ndjson {
        match mode {
            Mode::Link => link_json(Cursor::new(content), &mut writer, &linker)?,
            Mode::Embed => embed_json(Cursor::new(content), &mut writer, &linker)?,
        }
    } else {
        for (idx, document) in parse_documents(content)?.into_iter().enumerate() {
            let result = match mode {
                Mode::Link => linker.to_envelope(Some(&document)),
                Mode::Embed => linker.from_envelope(Some(&document)),
            };
            let output = result.with_context(|| format!("Failed to process document {}", idx + 1))?;
            writer.write_document(output.as_ref())?;
        }
    }

    writer.flush()?;

    if writer.written() == 0 {
        warn!("No JSON objects written");
    }
    if writer.skipped() > 0 {
        debug!("skipped {} empty results", writer.skipped());
    }

    Ok(())
}

/// Config file first, then command-line relations appended and root overridden
fn build_config(options: &Options) -> Result<LinkerConfig> {
    let mut config = match &options.config {
        Some(path) => LinkerConfig::from_file(path)?,
        None => LinkerConfig::default(),
    };

    if let Some(relations) = &options.relations {
        config = config.relations(
            relations
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        );
    }
    if let Some(root) = &options.root {
        config = config.with_root(root.as_str());
    }

    Ok(config)
}

/// Parse a single JSON document; a top-level array is a stream of documents
fn parse_documents(content: Vec<u8>) -> Result<Vec<Object>> {
    // simd-json parses in place, keep the original bytes for the fallback
    let mut scratch = content.clone();
    let value: Value = match simd_json::serde::from_slice(&mut scratch) {
        Ok(value) => value,
        Err(err) => {
            debug!("simd-json parse failed ({}), falling back to serde_json", err);
            serde_json::from_slice(&content).context("Failed to parse JSON input")?
        }
    };

    let values = match value {
        Value::Array(items) => items,
        other => vec![other],
    };

    values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| match value {
            Value::Object(obj) => Ok(obj),
            _ => bail!("Expected a JSON object for document {}", idx + 1),
        })
        .collect()
}
