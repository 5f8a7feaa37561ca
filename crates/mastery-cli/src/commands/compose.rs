use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use mastery_core::ConceptId;
use mastery_graph::{compose, Curriculum};

use super::{read_json, write_json};
use crate::config::EngineConfig;

#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Curriculum JSON providing concept texts and similar concepts.
    #[arg(long)]
    pub curriculum: PathBuf,
    /// JSON array of concept identifiers to phrase, in priority order.
    #[arg(long)]
    pub concepts: PathBuf,
    /// Overrides the configured separator.
    #[arg(long)]
    pub separator: Option<String>,
    /// Output directory for `prompts.json`.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &ComposeArgs, config: &EngineConfig) -> Result<Vec<String>, Box<dyn Error>> {
    let curriculum: Curriculum = read_json(&args.curriculum)?;
    let concept_ids: Vec<ConceptId> = read_json(&args.concepts)?;
    let separator = args
        .separator
        .as_deref()
        .unwrap_or(&config.compose.separator);
    let prompts = compose(
        &concept_ids,
        separator,
        &curriculum.concepts,
        &curriculum.text_by_id,
    );
    write_json(&args.out.join("prompts.json"), &prompts)?;
    Ok(prompts)
}
