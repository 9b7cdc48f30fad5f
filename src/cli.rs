use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Level script to convert; `-` or nothing reads stdin
    pub input: Option<PathBuf>,
    /// Level name, defaults to the input file stem
    #[arg(short, long)]
    pub name: Option<String>,
    /// Write `<name>.json` into this directory instead of printing to stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Fail when any part of the script could not be decoded
    #[arg(long)]
    pub strict: bool,
}
