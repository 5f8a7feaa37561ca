use std::collections::BTreeSet;
use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use mastery_core::ConceptId;
use mastery_graph::{assess_present, Curriculum, MasteryReport};
use tracing::info;

use super::{read_json, write_json};
use crate::config::EngineConfig;

#[derive(Args, Debug)]
pub struct PropagateArgs {
    /// Curriculum JSON holding the graph, concepts and optional texts.
    #[arg(long)]
    pub curriculum: PathBuf,
    /// JSON array of concept identifiers detected in the explanation.
    #[arg(long)]
    pub present: PathBuf,
    /// Output directory for `mastery_report.json`.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &PropagateArgs, config: &EngineConfig) -> Result<MasteryReport, Box<dyn Error>> {
    let curriculum: Curriculum = read_json(&args.curriculum)?;
    let present: BTreeSet<ConceptId> = read_json(&args.present)?;
    let report = assess_present(&present, &curriculum, &config.compose);
    info!(
        valid = report.result.valid_nodes.len(),
        isolated = report.result.isolated_nodes.len(),
        missing = report.missing.len(),
        "mastery report written"
    );
    write_json(&args.out.join("mastery_report.json"), &report)?;
    Ok(report)
}
