use std::collections::{BTreeMap, BTreeSet};

use mastery_core::errors::{ErrorInfo, MasteryError};
use mastery_core::{ConceptDetector, ConceptId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::compose::{compose, ComposeOpts};
use crate::concept::Concept;
use crate::graph::ConceptGraph;
use crate::hash::canonical_hash;
use crate::propagate::{missing_prerequisites, propagate, MasteryResult};

fn default_concurrency() -> usize {
    1
}

/// Options controlling batch assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOpts {
    /// Number of worker threads used for independent assessments.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for BatchOpts {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

/// Prerequisite graph plus the concept texts needed to phrase follow-ups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curriculum {
    /// Prerequisite DAG for the question.
    pub graph: ConceptGraph,
    /// Concept definitions, including alternate phrasings.
    #[serde(default)]
    pub concepts: Vec<Concept>,
    /// Optional per-concept text overriding [`Concept::text`].
    #[serde(default)]
    pub text_by_id: BTreeMap<ConceptId, String>,
}

/// Outcome of assessing one explanation against a curriculum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasteryReport {
    /// Valid/isolated split of the detected concepts.
    pub result: MasteryResult,
    /// Undemonstrated prerequisites blocking the isolated concepts.
    pub missing: Vec<ConceptId>,
    /// Follow-up prompts for the question generator.
    pub prompts: Vec<String>,
    /// Detected concepts that are not part of the graph.
    pub dropped: Vec<ConceptId>,
    /// Canonical hash of the graph the report was computed on.
    pub graph_hash: String,
}

/// One entry of a batch assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessJob {
    /// Caller supplied label echoed in logs.
    #[serde(default)]
    pub label: String,
    /// Curriculum the explanation is scored against.
    pub curriculum: Curriculum,
    /// Concepts detected in the explanation.
    pub present: BTreeSet<ConceptId>,
}

/// Assesses an already detected set of concepts.
///
/// Concepts outside the graph are dropped before propagation. Prompts are
/// composed from the missing prerequisites, or from the isolated concepts
/// when nothing upstream is missing.
pub fn assess_present(
    present: &BTreeSet<ConceptId>,
    curriculum: &Curriculum,
    opts: &ComposeOpts,
) -> MasteryReport {
    let graph = &curriculum.graph;
    let (inside, dropped): (BTreeSet<ConceptId>, BTreeSet<ConceptId>) =
        present.iter().partition(|id| graph.contains(id));
    if !dropped.is_empty() {
        debug!(dropped = dropped.len(), "ignoring concepts outside the graph");
    }

    let result = propagate(&inside, graph);
    let missing = missing_prerequisites(&result, graph);
    let targets = if missing.is_empty() {
        &result.isolated_nodes
    } else {
        &missing
    };
    let prompts = compose(
        targets,
        &opts.separator,
        &curriculum.concepts,
        &curriculum.text_by_id,
    );

    MasteryReport {
        graph_hash: canonical_hash(graph),
        dropped: dropped.into_iter().collect(),
        result,
        missing,
        prompts,
    }
}

/// Detects concepts in `text` and assesses them against the curriculum.
#[instrument(skip_all, fields(chars = text.len()))]
pub fn assess_explanation(
    detector: &dyn ConceptDetector,
    text: &str,
    curriculum: &Curriculum,
    opts: &ComposeOpts,
) -> Result<MasteryReport, MasteryError> {
    let present = detector.detect(text)?;
    debug!(detected = present.len(), "concepts detected");
    Ok(assess_present(&present, curriculum, opts))
}

/// Runs independent assessments in parallel, preserving input order.
pub fn assess_batch(
    jobs: &[AssessJob],
    compose_opts: &ComposeOpts,
    opts: &BatchOpts,
) -> Result<Vec<MasteryReport>, MasteryError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.concurrency.max(1))
        .build()
        .map_err(|err| {
            MasteryError::Config(
                ErrorInfo::new("thread-pool", err.to_string())
                    .with_context("concurrency", opts.concurrency),
            )
        })?;
    info!(
        jobs = jobs.len(),
        threads = opts.concurrency.max(1),
        "assessing batch"
    );
    let reports: Vec<MasteryReport> = pool.install(|| {
        jobs.par_iter()
            .map(|job| {
                debug!(label = %job.label, "assessing job");
                assess_present(&job.present, &job.curriculum, compose_opts)
            })
            .collect()
    });
    Ok(reports)
}
