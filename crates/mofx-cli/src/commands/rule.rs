//! Rule command
//!
//! Usage: mofx rule <FILE> <RULE_ID> [--raw] [--json]

use clap::Args;
use mofx_core::inspect::{display_properties, instance_preview, DEFAULT_PREVIEW_LEN};
use mofx_core::present::export_properties;
use mofx_core::{load_document, MofxError};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RuleArgs {
    /// MOF document to read
    pub file: PathBuf,

    /// Rule id, e.g. V-1234
    pub rule_id: String,

    /// Also print the raw contributing lines
    #[arg(long)]
    pub raw: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct RuleView<'a> {
    rule: &'a mofx_core::Rule,
    instances: Vec<InstanceView<'a>>,
}

#[derive(Serialize)]
struct InstanceView<'a> {
    class_name: &'a str,
    instance_name: Option<&'a str>,
    preview: String,
}

pub fn execute(args: RuleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(&args.file)?;
    let rule = doc.rule(&args.rule_id).ok_or_else(|| MofxError::RuleNotFound {
        rule_id: args.rule_id.clone(),
    })?;

    let instances: Vec<InstanceView<'_>> = doc
        .contributing_instances(&rule.rule_id)
        .into_iter()
        .map(|inst| InstanceView {
            class_name: &inst.class_name,
            instance_name: inst.instance_name.as_deref(),
            preview: instance_preview(&inst.properties, DEFAULT_PREVIEW_LEN),
        })
        .collect();

    if args.json {
        return super::print_json(&RuleView { rule, instances });
    }

    let skipped = if rule.is_skipped { " (skipped)" } else { "" };
    println!("{} [{}]{}", rule.rule_id, rule.category, skipped);
    for line in export_properties(display_properties(&rule.details)).lines() {
        println!("  {}", line);
    }

    println!();
    println!("Instances ({}):", instances.len());
    for inst in &instances {
        println!(
            "  {} {}: {}",
            inst.class_name,
            inst.instance_name.unwrap_or("-"),
            inst.preview
        );
    }

    if args.raw {
        println!();
        println!("{}", rule.raw_text);
    }

    Ok(())
}
