//! Builds a legacy export file from a JSON dump of the upstream records.
//!
//! Usage: `build_export <cadtpg|cadtipopag> <input.json> [output]`
//!
//! The input is the JSON array the upstream API returns for
//! `/empresas/{id}/prazo` or `/empresas/{id}/cadtipopag`. The output defaults to
//! the file name the legacy importer expects.

use anyhow::{Context, Result};
use std::fs;
use vemovel_export_api::export::ExportKind;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 3 {
        anyhow::bail!("Usage: build_export <cadtpg|cadtipopag> <input.json> [output]");
    }

    let kind: ExportKind = args[0].parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let input = &args[1];
    let output = args
        .get(2)
        .cloned()
        .unwrap_or_else(|| kind.file_name().to_string());

    let json_content =
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?;
    let items: Vec<serde_json::Value> = serde_json::from_str(&json_content)
        .with_context(|| format!("{} is not a JSON array", input))?;
    tracing::info!("Loaded {} items from {}", items.len(), input);

    let content = kind
        .build_file(items)
        .with_context(|| format!("Failed to build {}", kind.file_name()))?;

    fs::write(&output, content.as_bytes())
        .with_context(|| format!("Failed to write {}", output))?;

    println!("✓ Wrote {} ({} bytes)", output, content.len());
    Ok(())
}
