pub mod cli;
pub mod error;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

use std::io::Write;

use anyhow::{Context, bail};
use clap::Parser;
use rand::rngs::StdRng;
use tracing::{error, info};

use crate::cli::Cli;
use crate::model::GenerateOptions;
use crate::processor::{Generator, Vm};

pub fn run() -> anyhow::Result<()> {
    let args = Cli::parse();
    run_with(&args, &mut std::io::stdout().lock())
}

/// Generate from every file named in `args`, writing the results to `out`.
///
/// All files are checked up front; nothing is written if any is missing.
pub fn run_with<W: Write>(args: &Cli, out: &mut W) -> anyhow::Result<()> {
    let base = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Reading {}", path.display()))?;
            serde_json::from_str::<GenerateOptions>(&json)
                .with_context(|| format!("Parsing config {}", path.display()))?
        }
        None => GenerateOptions::default(),
    };
    let options = args.options(base);

    let missing: Vec<_> = args.files.iter().filter(|f| !f.exists()).collect();
    for file in &missing {
        error!("could not find file '{}'", file.display());
    }
    if !missing.is_empty() {
        let names: Vec<_> = missing.iter().map(|f| f.display().to_string()).collect();
        bail!("missing input file(s): {}", names.join(", "));
    }

    let mut generator = Generator::new(Vm::<StdRng>::default());
    let total = args.files.len();

    for (index, file) in args.files.iter().enumerate() {
        // 1. ── Load ───────────────────────────────────────────────────────
        let pattern = parser::load_file(file)?;
        info!(file = %file.display(), definitions = pattern.refs.len(), "loaded");

        // 2. ── Process ────────────────────────────────────────────────────
        let processed = processor::run(&mut generator, &pattern, &options, args.bytecode)
            .with_context(|| format!("Generating words from {}", file.display()))?;

        // 3. ── Write ──────────────────────────────────────────────────────
        let name = file.display().to_string();
        writer::text::emit(out, &name, &processed, &args.word_separator, (index, total))
            .with_context(|| "Writing output")?;
    }

    Ok(())
}
