//! Compare command
//!
//! Usage: mofx compare <FILE1> <FILE2> [--different] [--missing]
//!        [--matches] [--version-only] [--by-category] [--json]

use clap::Args;
use mofx_core::diff::{compare_documents, group_by_category, OverallStatus, RuleComparison};
use mofx_core::present::{export_comparisons, StatusFilter};
use mofx_core::{load_pair, MofxConfig};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// First (baseline) document
    pub file1: PathBuf,

    /// Second document
    pub file2: PathBuf,

    /// Show rules whose properties differ
    #[arg(long)]
    pub different: bool,

    /// Show rules present in only one document
    #[arg(long)]
    pub missing: bool,

    /// Show rules that match
    #[arg(long)]
    pub matches: bool,

    /// Show rules that differ only by version tokens
    #[arg(long)]
    pub version_only: bool,

    /// Group output under category headings
    #[arg(long)]
    pub by_category: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl CompareArgs {
    /// Flags on the command line replace the configured toggles entirely
    fn filter(&self, config: &MofxConfig) -> StatusFilter {
        let flags = StatusFilter {
            different: self.different,
            missing: self.missing,
            matches: self.matches,
            version_only: self.version_only,
        };
        if flags.is_empty() {
            config.filter
        } else {
            flags
        }
    }
}

pub fn execute(args: CompareArgs, config: &MofxConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (doc1, doc2) = load_pair(&args.file1, &args.file2)?;
    let results = compare_documents(&doc1, &doc2);
    let shown = args.filter(config).apply(&results);

    if args.json {
        return super::print_json(&shown);
    }

    if args.by_category {
        let owned: Vec<RuleComparison> = shown.iter().map(|r| (*r).clone()).collect();
        for (category, group) in group_by_category(&owned) {
            println!("[{}] ({} rules)", category, group.len());
            println!("{}", export_comparisons(group));
            println!();
        }
    } else if !shown.is_empty() {
        println!("{}", export_comparisons(shown.iter().copied()));
        println!();
    }

    println!("{}", summary_line(&results));
    Ok(())
}

fn summary_line(results: &[RuleComparison]) -> String {
    let mut counts: BTreeMap<OverallStatus, usize> = BTreeMap::new();
    for result in results {
        *counts.entry(result.status).or_default() += 1;
    }
    let parts: Vec<String> = counts
        .iter()
        .map(|(status, count)| format!("{}: {}", status, count))
        .collect();
    format!("{} rules compared. {}", results.len(), parts.join(", "))
}
