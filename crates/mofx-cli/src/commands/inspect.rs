//! Inspect command
//!
//! Usage: mofx inspect <FILE> [--skipped] [--json]

use clap::Args;
use mofx_core::inspect::rules_by_class;
use mofx_core::load_document;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// MOF document to read
    pub file: PathBuf,

    /// Only list rules carrying the skip marker
    #[arg(long)]
    pub skipped: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: InspectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(&args.file)?;
    let groups = rules_by_class(&doc, args.skipped);

    if args.json {
        return super::print_json(&groups);
    }

    println!(
        "{}: {} instances, {} rules",
        args.file.display(),
        doc.instances.len(),
        doc.rules.len()
    );
    for group in &groups {
        println!();
        println!("{} ({} rules)", group.class_name, group.rules.len());
        for rule in &group.rules {
            let skipped = if rule.is_skipped { " (skipped)" } else { "" };
            println!("  {} [{}]{}", rule.rule_id, rule.category, skipped);
        }
    }

    Ok(())
}
