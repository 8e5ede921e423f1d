//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

/// Pick an avatar from a gallery directory or a URL.
#[derive(Parser, Debug)]
#[command(name = "avatar", version, about)]
pub struct Cli {
    /// Directory to pick the newest image from.
    #[arg(short, long, conflicts_with = "url")]
    pub gallery: Option<PathBuf>,

    /// URL to download the image from.
    #[arg(short, long, conflicts_with = "gallery")]
    pub url: Option<String>,

    /// How many times to press "choose image".
    #[arg(short = 'n', long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub presses: u32,

    /// Output file path (auto-generated if not specified).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Avatar edge length in pixels; 0 keeps the original size.
    #[arg(short, long)]
    pub size: Option<u32>,

    /// Output format: jpeg, png, webp.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}
