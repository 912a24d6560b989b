use std::io::Read;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use hydrate_codec::{Codec, CodecConfig, UnknownTagPolicy};
use hydrate_node::{DomainValue, Node};
use hydrate_registry::{OpaqueValue, TypeRegistry};
use tracing::debug;

use crate::cli::*;
use crate::scan::{scan, ScanReport};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let output = match cli.command {
        Command::Scan(args) => cmd_scan(&config, args, &cli.format)?,
        Command::Check(args) => cmd_check(&config, args, &cli.format)?,
        Command::Rekey(args) => cmd_rekey(&config, args)?,
    };
    println!("{output}");
    Ok(())
}

/// Codec settings from `--config`, then the key and depth flags on top.
fn load_config(cli: &Cli) -> anyhow::Result<CodecConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => CodecConfig::default(),
    };
    if let Some(key) = &cli.tag_key {
        config.tag_key = key.clone();
    }
    if let Some(key) = &cli.data_key {
        config.data_key = key.clone();
    }
    if let Some(depth) = cli.max_depth {
        config.max_depth = depth;
    }
    config.validate()?;
    debug!(tag_key = %config.tag_key, data_key = %config.data_key, max_depth = config.max_depth, "codec configured");
    Ok(config)
}

fn read_config(path: &Path) -> anyhow::Result<CodecConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Read a document from a file, or from stdin when `input` is `-`.
fn read_document(input: &str) -> anyhow::Result<Node> {
    let text = if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        text
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {input}"))?
    };
    Node::from_json_str(&text).with_context(|| format!("parsing {input}"))
}

fn cmd_scan(config: &CodecConfig, args: ScanArgs, format: &OutputFormat) -> anyhow::Result<String> {
    let node = read_document(&args.input)?;
    let report = scan(&node, &config.tag_key);
    node.dismantle();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => Ok(render_scan(&report, config)),
    }
}

fn render_scan(report: &ScanReport, config: &CodecConfig) -> String {
    let mut lines = vec![
        format!("Tag key: {}", config.tag_key.cyan()),
        format!("Depth: {}", report.depth.to_string().bold()),
        format!("Tagged: {}", report.tagged.to_string().bold()),
    ];
    if report.malformed > 0 {
        lines.push(format!("Malformed: {}", report.malformed.to_string().red().bold()));
    }
    let width = report.tags.keys().map(String::len).max().unwrap_or(0);
    for (tag, count) in &report.tags {
        lines.push(format!("  {}  {}", format!("{tag:<width$}").yellow(), count));
    }
    lines.join("\n")
}

/// A registry that hydrates each listed tag opaquely, or every tag when none
/// are listed.
fn check_registry(tags: &[String]) -> TypeRegistry {
    if tags.is_empty() {
        return TypeRegistry::opaque();
    }
    let mut registry = TypeRegistry::new();
    for tag in tags {
        let owned = tag.clone();
        registry.register(tag.as_str(), move |payload| {
            Ok(DomainValue::new(OpaqueValue::new(owned.clone(), payload)))
        });
    }
    registry
}

fn cmd_check(config: &CodecConfig, args: CheckArgs, format: &OutputFormat) -> anyhow::Result<String> {
    let node = read_document(&args.input)?;
    let report = scan(&node, &config.tag_key);
    let policy = if args.lenient {
        UnknownTagPolicy::Lenient
    } else {
        UnknownTagPolicy::Strict
    };
    let registry = check_registry(&args.tags);
    let codec = Codec::new(&registry, config.clone().with_unknown_tags(policy))?;
    codec
        .decode(node)
        .with_context(|| format!("checking {}", args.input))?
        .dismantle();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => Ok(format!(
            "{} {} tagged nodes hydrated (depth {})",
            "✓".green().bold(),
            report.tagged,
            report.depth
        )),
    }
}

fn cmd_rekey(config: &CodecConfig, args: RekeyArgs) -> anyhow::Result<String> {
    let target = config
        .clone()
        .with_tag_key(args.to_tag_key)
        .with_data_key(args.to_data_key.unwrap_or_else(|| config.data_key.clone()));
    let registry = TypeRegistry::opaque();
    let from = Codec::new(&registry, config.clone())?;
    let to = Codec::new(&registry, target)?;

    let hydrated = from
        .decode(read_document(&args.input)?)
        .with_context(|| format!("decoding {}", args.input))?;
    let text = if args.compact {
        to.to_json_string(hydrated)?
    } else {
        to.to_json_string_pretty(hydrated)?
    };
    Ok(text)
}
