//! Emit the level as compact JSON.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::LevelDocument;

/// Writes `<lvlname>.json` into `out_dir` and returns its path.
pub fn emit(document: &LevelDocument, out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join(format!("{}.json", document.lvlname));
    let json = document.to_json().with_context(|| "Serialising level")?;
    std::fs::write(&path, json).with_context(|| format!("Writing {}", path.display()))?;
    Ok(path)
}

/// Prints the JSON followed by a newline.
pub fn print(document: &LevelDocument, mut out: impl Write) -> Result<()> {
    let json = document.to_json().with_context(|| "Serialising level")?;
    writeln!(out, "{json}")?;
    Ok(())
}
