pub mod cli;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

pub use processor::parse;

use anyhow::{Context, anyhow};
use clap::Parser;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // 1. ── Load ───────────────────────────────────────────────────────
    let raw_level = parser::load(args.input.as_deref(), args.name.as_deref())
        .with_context(|| "Loading level script")?;

    // 2. ── Process ────────────────────────────────────────────────────
    let processed = processor::run(&raw_level);

    // 3. ── Write output ───────────────────────────────────────────────
    match &args.output {
        Some(out_dir) => {
            std::fs::create_dir_all(out_dir)
                .with_context(|| format!("Creating {}", out_dir.display()))?;
            let path = writer::json::emit(&processed.document, out_dir)
                .with_context(|| "Writing level JSON")?;
            log::info!("Wrote {}", path.display());
        }
        None => writer::json::print(&processed.document, std::io::stdout().lock())
            .with_context(|| "Printing level JSON")?,
    }

    if args.strict && !processed.diagnostics.is_empty() {
        return Err(anyhow!(
            "{} problem(s) while parsing `{}`, first: {}",
            processed.diagnostics.len(),
            raw_level.name,
            processed.diagnostics[0]
        ));
    }

    Ok(())
}
