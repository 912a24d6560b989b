use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hydrate",
    about = "Inspect, check, and re-key tagged JSON documents",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with codec settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Mapping key that names a node's tag
    #[arg(long, global = true)]
    pub tag_key: Option<String>,

    /// Mapping key that holds a tagged node's payload
    #[arg(long, global = true)]
    pub data_key: Option<String>,

    #[arg(long, global = true)]
    pub max_depth: Option<usize>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Count tagged nodes by tag
    Scan(ScanArgs),
    /// Decode a document against a set of known tags
    Check(CheckArgs),
    /// Rewrite a document under a different tag key and data key
    Rekey(RekeyArgs),
}

#[derive(Args)]
pub struct ScanArgs {
    /// Input file, or `-` for stdin
    pub input: String,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Input file, or `-` for stdin
    pub input: String,
    /// Known tags; when empty every tag is accepted
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
    /// Treat unknown tags as plain mappings instead of failing
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Args)]
pub struct RekeyArgs {
    /// Input file, or `-` for stdin
    pub input: String,
    #[arg(long)]
    pub to_tag_key: String,
    /// Defaults to the source data key
    #[arg(long)]
    pub to_data_key: Option<String>,
    #[arg(long)]
    pub compact: bool,
}
