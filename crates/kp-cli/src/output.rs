//! Human and JSON rendering of command results.

use anyhow::Result;
use kp_core::units::{format_bitrate, format_bytes};
use kp_core::{FileStats, ReportExtra, SupportedFormats};
use kp_media::{ArchiveEntry, DispatchOutcome};
use serde_json::json;
use std::path::PathBuf;

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_stats(stats: &[FileStats], as_json: bool) -> Result<()> {
    if as_json {
        return print_json(&stats);
    }
    for s in stats {
        println!("File: {}", s.path);
        println!("  Size: {}", format_bytes(s.size_bytes, 2));
        println!("  Type: {}", s.category);
        println!("  Can compress: {}", if s.can_compress { "Yes" } else { "No" });
        if let (Some(lines), Some(chars), Some(words)) = (s.line_count, s.character_count, s.word_count) {
            println!("  Lines: {lines}");
            println!("  Characters: {chars}");
            println!("  Words: {words}");
        }
        println!();
    }
    Ok(())
}

/// Short human summary of the category-specific report fields.
pub fn describe_extra(extra: &ReportExtra) -> String {
    match extra {
        ReportExtra::Code { characters_removed } => format!("{characters_removed} bytes removed"),
        ReportExtra::Image { quality } => format!("quality {quality}%"),
        ReportExtra::Video { quality, fps, bitrate: Some(bps) } => {
            format!("quality {quality}%, {fps} fps, {}", format_bitrate(u64::from(*bps)))
        }
        ReportExtra::Video { quality, fps, bitrate: None } => format!("quality {quality}%, {fps} fps"),
        ReportExtra::Archive { entries } => format!("{entries} entries"),
    }
}

/// Print each result and return how many failed.
pub fn print_outcomes(results: &[(PathBuf, kp_core::Result<DispatchOutcome>)], as_json: bool) -> Result<usize> {
    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    if as_json {
        let rows: Vec<_> = results
            .iter()
            .map(|(path, r)| match r {
                Ok(outcome) => json!({ "input": path, "outcome": outcome }),
                Err(e) => json!({ "input": path, "error": e.to_string() }),
            })
            .collect();
        print_json(&rows)?;
        return Ok(failed);
    }
    for (path, result) in results {
        match result {
            Ok(o) => {
                let r = &o.report;
                let detail = describe_extra(&r.extra);
                println!(
                    "{} -> {}: {} -> {} ({:.1}% reduction, {})",
                    path.display(),
                    o.output.display(),
                    format_bytes(r.original_size, 2),
                    format_bytes(r.compressed_size, 2),
                    r.compression_ratio_percent,
                    detail
                );
            }
            Err(e) => eprintln!("{}: {e}", path.display()),
        }
    }
    Ok(failed)
}

pub fn print_formats(formats: &SupportedFormats, as_json: bool) -> Result<()> {
    if as_json {
        return print_json(formats);
    }
    println!("Images: {}", formats.images.join(" "));
    println!("Videos: {}", formats.videos.join(" "));
    println!("Code:   {}", formats.code.join(" "));
    Ok(())
}

pub fn print_entries(entries: &[ArchiveEntry], as_json: bool) -> Result<()> {
    if as_json {
        return print_json(&entries);
    }
    for e in entries {
        println!("{} ({})", e.name, format_bytes(e.size, 2));
    }
    Ok(())
}
