use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::model::RawLevel;

/// Name used when nothing better is known (stdin input, no `--name`).
pub const DEFAULT_LEVEL_NAME: &str = "level";

/// Load the level script.
///
/// `input` of `None` or `-` reads stdin. The level name is `name` when given,
/// otherwise the input file stem.
pub fn load(input: Option<&Path>, name: Option<&str>) -> Result<RawLevel> {
    let source = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Reading {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .with_context(|| "Reading stdin")?;
            buf
        }
    };
    log::info!("Script loaded, size: {} bytes", source.len());

    let name = match name {
        Some(name) => name.to_string(),
        None => level_name_for(input)?,
    };

    load_from_str(source, name)
}

pub fn load_from_str(source: impl Into<String>, name: impl Into<String>) -> Result<RawLevel> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(anyhow!("level name must not be empty"));
    }

    Ok(RawLevel {
        source: source.into(),
        name,
    })
}

fn level_name_for(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow!("can't derive a level name from {}", path.display())),
        _ => Ok(DEFAULT_LEVEL_NAME.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_name_for() {
        let test_cases = vec![
            (Some(Path::new("levels/level_03.cpp")), "level_03"),
            (Some(Path::new("-")), DEFAULT_LEVEL_NAME),
            (None, DEFAULT_LEVEL_NAME),
        ];

        for (input, expected) in test_cases {
            assert_eq!(level_name_for(input).unwrap(), expected);
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = load_from_str("Level(1, 2)", "  ").unwrap_err();
        assert_eq!(err.to_string(), "level name must not be empty");
    }
}
