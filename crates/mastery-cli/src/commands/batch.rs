use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use mastery_graph::{assess_batch, AssessJob, MasteryReport};

use super::{read_json, write_json};
use crate::config::EngineConfig;

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSON array of assessment jobs.
    #[arg(long)]
    pub jobs: PathBuf,
    /// Overrides the configured worker count.
    #[arg(long)]
    pub concurrency: Option<usize>,
    /// Output directory for `batch_reports.json`.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &BatchArgs, config: &EngineConfig) -> Result<Vec<MasteryReport>, Box<dyn Error>> {
    let jobs: Vec<AssessJob> = read_json(&args.jobs)?;
    let mut batch = config.batch.clone();
    if let Some(concurrency) = args.concurrency {
        batch.concurrency = concurrency;
    }
    let reports = assess_batch(&jobs, &config.compose, &batch)?;
    write_json(&args.out.join("batch_reports.json"), &reports)?;
    Ok(reports)
}
