use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use mastery_core::OptionId;
use mastery_path::{
    evaluate_final_pathway, evaluate_incorrect_options, evaluate_pathway, FinalPathwayScore,
    IncorrectOptionsReport, PathwayEvaluation, ReasoningPathway,
};
use serde::Serialize;
use tracing::info;

use super::{read_json, write_json};

#[derive(Args, Debug)]
pub struct PathwayArgs {
    /// JSON array of candidate pathways for the question.
    #[arg(long)]
    pub pathways: PathBuf,
    /// JSON array of option identifiers in submitted order.
    #[arg(long)]
    pub submission: PathBuf,
    /// Output directory for the evaluation and the per-position CSV.
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct IncorrectArgs {
    /// JSON pathway selected in the first phase.
    #[arg(long)]
    pub pathway: PathBuf,
    /// JSON array of option identifiers the student flagged as incorrect.
    #[arg(long)]
    pub flagged: PathBuf,
    /// Output directory for `incorrect_options.json`.
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct FinalArgs {
    /// JSON pathway selected in the first phase.
    #[arg(long)]
    pub pathway: PathBuf,
    /// JSON array of option identifiers after correction.
    #[arg(long)]
    pub submission: PathBuf,
    /// Output directory for `final_score.json`.
    #[arg(long)]
    pub out: PathBuf,
}

/// Phase-two counts together with their rendered summary.
#[derive(Debug, Serialize)]
pub struct IncorrectOptionsOutput {
    /// Independent counts.
    #[serde(flatten)]
    pub report: IncorrectOptionsReport,
    /// Human readable summary.
    pub summary: String,
}

pub fn run(args: &PathwayArgs) -> Result<PathwayEvaluation, Box<dyn Error>> {
    let candidates: Vec<ReasoningPathway> = read_json(&args.pathways)?;
    let submitted: Vec<OptionId> = read_json(&args.submission)?;
    let evaluation = evaluate_pathway(&candidates, &submitted);
    info!(
        correct = evaluation.correct_steps,
        positions = evaluation.results.len(),
        "pathway evaluated"
    );
    write_json(&args.out.join("pathway_evaluation.json"), &evaluation)?;
    write_classification_csv(&args.out.join("classifications.csv"), &submitted, &evaluation)?;
    Ok(evaluation)
}

pub fn run_incorrect(args: &IncorrectArgs) -> Result<IncorrectOptionsOutput, Box<dyn Error>> {
    let pathway: ReasoningPathway = read_json(&args.pathway)?;
    let flagged: Vec<OptionId> = read_json(&args.flagged)?;
    let report = evaluate_incorrect_options(&pathway, &flagged);
    let output = IncorrectOptionsOutput {
        summary: report.to_string(),
        report,
    };
    write_json(&args.out.join("incorrect_options.json"), &output)?;
    Ok(output)
}

pub fn run_final(args: &FinalArgs) -> Result<FinalPathwayScore, Box<dyn Error>> {
    let pathway: ReasoningPathway = read_json(&args.pathway)?;
    let submitted: Vec<OptionId> = read_json(&args.submission)?;
    let score = evaluate_final_pathway(&pathway, &submitted);
    info!(correct = score.correct, total = score.total, "final pathway scored");
    write_json(&args.out.join("final_score.json"), &score)?;
    Ok(score)
}

fn write_classification_csv(
    path: &Path,
    submitted: &[OptionId],
    evaluation: &PathwayEvaluation,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["position", "option_id", "result"])?;
    for (position, (option, result)) in submitted.iter().zip(&evaluation.results).enumerate() {
        writer.write_record([
            position.to_string(),
            option.as_raw().to_string(),
            result.as_str().to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
