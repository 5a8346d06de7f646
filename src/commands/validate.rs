use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde_json::Value;
use whatson_core::content::decode_entries;

/// Decode every entry in the export and report what passed.
///
/// Entries of other content types are skipped, not failed: exports
/// routinely mix events with sponsors, assets and the like.
pub fn run(file: &Path, locale: &str) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let payload: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    let results = decode_entries(locale, &payload)
        .with_context(|| format!("{} is not a content export", file.display()))?;

    let mut decoded = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for result in &results {
        match result {
            Ok(event) => {
                decoded += 1;
                println!("{} {} ({})", "ok".green(), event.name, event.id.dimmed());
            }
            Err(err) if err.is_wrong_content_type() => {
                skipped += 1;
                println!("{} {}", "skip".dimmed(), err.dimmed());
            }
            Err(err) => {
                failed += 1;
                println!("{} {}", "fail".red(), err);
            }
        }
    }

    println!();
    println!(
        "{decoded} decoded, {skipped} skipped, {failed} failed (locale {locale})"
    );

    if failed > 0 {
        anyhow::bail!("{failed} entries failed to decode");
    }
    Ok(())
}
