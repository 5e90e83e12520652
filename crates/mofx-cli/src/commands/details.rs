//! Details command
//!
//! Usage: mofx details <FILE1> <FILE2> <RULE_ID> [--hide-same]
//!        [--hide-version-only] [--sort <COLUMN>] [--desc] [--lines] [--json]

use clap::{Args, ValueEnum};
use mofx_core::diff::{rule_detail, AlignedLinePair};
use mofx_core::present::{export_rows, RowColumn, RowFilter, RowSort};
use mofx_core::{load_pair, MofxConfig};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortColumn {
    Key,
    Doc1,
    Doc2,
    Status,
}

impl From<SortColumn> for RowColumn {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Key => RowColumn::Key,
            SortColumn::Doc1 => RowColumn::Doc1,
            SortColumn::Doc2 => RowColumn::Doc2,
            SortColumn::Status => RowColumn::Status,
        }
    }
}

#[derive(Debug, Args)]
pub struct DetailsArgs {
    /// First (baseline) document
    pub file1: PathBuf,

    /// Second document
    pub file2: PathBuf,

    /// Rule id, e.g. V-1234
    pub rule_id: String,

    /// Hide properties with identical values
    #[arg(long)]
    pub hide_same: bool,

    /// Hide properties that differ only by version tokens
    #[arg(long)]
    pub hide_version_only: bool,

    /// Sort the property table by this column
    #[arg(long, value_enum)]
    pub sort: Option<SortColumn>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Print the aligned raw lines after the property table
    #[arg(long)]
    pub lines: bool,

    /// Truncate raw lines longer than this (overrides config)
    #[arg(long)]
    pub max_line_len: Option<usize>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: DetailsArgs, config: &MofxConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (doc1, doc2) = load_pair(&args.file1, &args.file2)?;
    let max_line_len = args.max_line_len.unwrap_or(config.max_line_len);
    let mut detail = rule_detail(&doc1, &doc2, &args.rule_id, max_line_len)?;

    let sort = RowSort {
        column: args.sort.map(RowColumn::from),
        descending: args.desc,
    };
    sort.apply(&mut detail.rows);

    let filter = RowFilter {
        hide_same: args.hide_same,
        hide_version_only: args.hide_version_only,
    };

    if args.json {
        detail.rows.retain(|row| filter.allows(row));
        return super::print_json(&detail);
    }

    println!("{}: {}", detail.rule_id, detail.status);
    println!("{}", export_rows(filter.apply(&detail.rows)));

    if args.lines {
        println!();
        for line in &detail.lines {
            println!("{}", render_line(line));
        }
    }

    Ok(())
}

/// Unified-diff style marker plus the line text
fn render_line(line: &AlignedLinePair) -> String {
    match (&line.line_from_doc1, &line.line_from_doc2) {
        (Some(left), Some(_)) if !line.changed => format!("  {}", left),
        (Some(left), Some(right)) => format!("~ {} | {}", left, right),
        (Some(left), None) => format!("- {}", left),
        (None, Some(right)) => format!("+ {}", right),
        (None, None) => String::new(),
    }
}
