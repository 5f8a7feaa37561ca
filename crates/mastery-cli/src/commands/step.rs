use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use mastery_step::{check_step, QuestionAttempt, SolveStep, StepOutcome, StepSubmission};
use tracing::info;

use super::{read_json, write_json};
use crate::config::EngineConfig;

#[derive(Args, Debug)]
pub struct StepArgs {
    /// JSON definition of the solve step.
    #[arg(long)]
    pub step: PathBuf,
    /// JSON submission with an optional option id and free-form answer.
    #[arg(long)]
    pub submission: PathBuf,
    /// Running aggregate from earlier steps of the same attempt.
    #[arg(long)]
    pub prior: Option<PathBuf>,
    /// Closes the attempt after recording this step.
    #[arg(long, default_value_t = false)]
    pub finalize: bool,
    /// Output directory for `step_outcome.json` and `attempt.json`.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &StepArgs, config: &EngineConfig) -> Result<StepOutcome, Box<dyn Error>> {
    let step: SolveStep = read_json(&args.step)?;
    let submission: StepSubmission = read_json(&args.submission)?;
    let prior: Option<QuestionAttempt> = args
        .prior
        .as_deref()
        .map(read_json::<QuestionAttempt>)
        .transpose()?;
    if let Some(prior) = &prior {
        prior.validate()?;
    }

    let mut outcome = check_step(&step, &submission, prior.as_ref(), &config.step)?;
    if args.finalize {
        outcome.aggregate.finalize();
    }
    info!(
        step = %outcome.step_id,
        is_correct = outcome.is_correct,
        score = outcome.aggregate.score,
        "step recorded"
    );
    write_json(&args.out.join("step_outcome.json"), &outcome)?;
    write_json(&args.out.join("attempt.json"), &outcome.aggregate)?;
    Ok(outcome)
}
