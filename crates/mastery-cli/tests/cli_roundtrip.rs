use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use mastery_cli::commands::{batch, compose, pathway, propagate, step};
use mastery_cli::EngineConfig;
use mastery_core::{ConceptId, OptionId, PathwayId, StepId};
use mastery_graph::{AssessJob, Concept, ConceptGraph, Curriculum, MasteryReport};
use mastery_path::{PathwayStep, ReasoningPathway, StepResult};
use mastery_step::{QuestionAttempt, SolveStep, StepOption, StepSubmission};
use serde::Serialize;
use tempfile::TempDir;

fn cid(raw: u64) -> ConceptId {
    ConceptId::from_raw(raw)
}

fn opt(raw: u64) -> OptionId {
    OptionId::from_raw(raw)
}

fn write<T: Serialize>(dir: &Path, name: &str, value: &T) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    path
}

fn read<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

fn chain_curriculum() -> Curriculum {
    let graph = ConceptGraph::new(
        [cid(1), cid(2), cid(3)],
        [(cid(1), cid(2)), (cid(2), cid(3))],
        [cid(1)],
    )
    .unwrap();
    Curriculum {
        graph,
        concepts: vec![
            Concept::new(cid(1), "variables"),
            Concept::new(cid(2), "linear equations"),
            Concept::new(cid(3), "systems of equations"),
        ],
        text_by_id: BTreeMap::new(),
    }
}

fn sample_pathway() -> ReasoningPathway {
    ReasoningPathway::new(
        PathwayId::from_raw(1),
        vec![
            PathwayStep::correct(0, opt(10)),
            PathwayStep::incorrect(1, opt(11), Some(opt(21))),
            PathwayStep::correct(2, opt(12)),
        ],
    )
    .unwrap()
}

#[test]
fn propagate_writes_report() {
    let dir = TempDir::new().unwrap();
    let args = propagate::PropagateArgs {
        curriculum: write(dir.path(), "curriculum.json", &chain_curriculum()),
        present: write(dir.path(), "present.json", &[cid(1), cid(3)]),
        out: dir.path().join("out"),
    };
    let report = propagate::run(&args, &EngineConfig::default()).unwrap();
    assert_eq!(report.result.valid_nodes, vec![cid(1)]);
    assert_eq!(report.result.isolated_nodes, vec![cid(3)]);
    assert_eq!(report.missing, vec![cid(2)]);
    assert_eq!(report.prompts, vec!["linear equations".to_string()]);

    let on_disk: MasteryReport = read(&dir.path().join("out/mastery_report.json"));
    assert_eq!(on_disk, report);
}

#[test]
fn compose_honors_separator_override() {
    let dir = TempDir::new().unwrap();
    let mut curriculum = chain_curriculum();
    curriculum.concepts[0] = Concept::new(cid(1), "variables").with_similar([cid(2)]);
    let args = compose::ComposeArgs {
        curriculum: write(dir.path(), "curriculum.json", &curriculum),
        concepts: write(dir.path(), "concepts.json", &[cid(1), cid(2), cid(3)]),
        separator: Some(" / ".to_string()),
        out: dir.path().to_path_buf(),
    };
    let prompts = compose::run(&args, &EngineConfig::default()).unwrap();
    assert_eq!(
        prompts,
        vec![
            "variables / linear equations".to_string(),
            "systems of equations".to_string()
        ]
    );
    let on_disk: Vec<String> = read(&dir.path().join("prompts.json"));
    assert_eq!(on_disk, prompts);
}

#[test]
fn pathway_phases_write_outputs() {
    let dir = TempDir::new().unwrap();
    let pathway_path = write(dir.path(), "pathway.json", &sample_pathway());

    let evaluation = pathway::run(&pathway::PathwayArgs {
        pathways: write(dir.path(), "pathways.json", &vec![sample_pathway()]),
        submission: write(dir.path(), "submission.json", &[opt(10), opt(12), opt(11)]),
        out: dir.path().to_path_buf(),
    })
    .unwrap();
    assert_eq!(
        evaluation.results,
        vec![StepResult::Correct, StepResult::WrongPosition, StepResult::Wrong]
    );
    let csv_text = fs::read_to_string(dir.path().join("classifications.csv")).unwrap();
    let lines: Vec<&str> = csv_text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "position,option_id,result",
            "0,10,CORRECT",
            "1,12,WRONG_POSITION",
            "2,11,WRONG"
        ]
    );

    let incorrect = pathway::run_incorrect(&pathway::IncorrectArgs {
        pathway: pathway_path.clone(),
        flagged: write(dir.path(), "flagged.json", &[opt(11), opt(10)]),
        out: dir.path().to_path_buf(),
    })
    .unwrap();
    assert_eq!(incorrect.report.identified, 1);
    assert_eq!(
        incorrect.summary,
        "1 option was marked as incorrect but is correct."
    );
    let on_disk: serde_json::Value = read(&dir.path().join("incorrect_options.json"));
    assert_eq!(on_disk["incorrectly_marked"], 1);
    assert_eq!(on_disk["summary"], incorrect.summary.as_str());

    let score = pathway::run_final(&pathway::FinalArgs {
        pathway: pathway_path,
        submission: write(dir.path(), "final.json", &[opt(10), opt(21), opt(12)]),
        out: dir.path().to_path_buf(),
    })
    .unwrap();
    assert_eq!((score.correct, score.total), (3, 3));
    assert!(dir.path().join("final_score.json").exists());
}

#[test]
fn step_chains_attempt_and_rejects_after_finalize() {
    let dir = TempDir::new().unwrap();
    let solve_step = SolveStep {
        id: StepId::from_raw(1),
        options: vec![
            StepOption {
                id: opt(5),
                is_correct: true,
            },
            StepOption {
                id: opt(6),
                is_correct: false,
            },
        ],
        accepted_answers: vec!["42".to_string()],
    };
    let step_path = write(dir.path(), "step.json", &solve_step);
    let config = EngineConfig::default();

    let first = step::run(
        &step::StepArgs {
            step: step_path.clone(),
            submission: write(
                dir.path(),
                "first.json",
                &StepSubmission {
                    option_id: Some(opt(5)),
                    answer: Some(" 42.004 ".to_string()),
                },
            ),
            prior: None,
            finalize: false,
            out: dir.path().join("first"),
        },
        &config,
    )
    .unwrap();
    assert!(first.is_correct);
    assert_eq!(first.aggregate.steps_completed, 1);

    let second = step::run(
        &step::StepArgs {
            step: step_path.clone(),
            submission: write(
                dir.path(),
                "second.json",
                &StepSubmission {
                    option_id: Some(opt(6)),
                    answer: Some("42".to_string()),
                },
            ),
            prior: Some(dir.path().join("first/attempt.json")),
            finalize: true,
            out: dir.path().join("second"),
        },
        &config,
    )
    .unwrap();
    assert!(!second.is_correct);
    assert_eq!(second.aggregate.overall.attempts, 2);
    assert_eq!(second.aggregate.score, 0.5);
    let stored: QuestionAttempt = read(&dir.path().join("second/attempt.json"));
    assert!(stored.finalized);

    let rejected = step::run(
        &step::StepArgs {
            step: step_path,
            submission: dir.path().join("first.json"),
            prior: Some(dir.path().join("second/attempt.json")),
            finalize: false,
            out: dir.path().join("third"),
        },
        &config,
    );
    assert!(rejected.is_err());
    assert!(!dir.path().join("third/attempt.json").exists());
}

#[test]
fn tampered_prior_attempt_is_rejected() {
    let dir = TempDir::new().unwrap();
    let solve_step = SolveStep {
        id: StepId::from_raw(2),
        options: Vec::new(),
        accepted_answers: vec!["3".to_string()],
    };
    let prior = serde_json::json!({
        "overall": {"attempts": 1, "correct": 4},
        "reasoning": {"attempts": 0, "correct": 0},
        "evaluation": {"attempts": 1, "correct": 4},
        "steps_completed": 4,
        "score": 4.0,
        "reasoning_score": 0.0,
        "evaluation_score": 4.0
    });
    let result = step::run(
        &step::StepArgs {
            step: write(dir.path(), "step.json", &solve_step),
            submission: write(
                dir.path(),
                "submission.json",
                &StepSubmission {
                    option_id: None,
                    answer: Some("3".to_string()),
                },
            ),
            prior: Some(write(dir.path(), "prior.json", &prior)),
            finalize: false,
            out: dir.path().join("out"),
        },
        &EngineConfig::default(),
    );
    let err = result.unwrap_err();
    assert!(err.to_string().contains("attempt-inconsistent"));
    assert!(!dir.path().join("out/attempt.json").exists());
}

#[test]
fn batch_preserves_job_order() {
    let dir = TempDir::new().unwrap();
    let jobs = vec![
        AssessJob {
            label: "partial".to_string(),
            curriculum: chain_curriculum(),
            present: [cid(1), cid(3)].into_iter().collect(),
        },
        AssessJob {
            label: "complete".to_string(),
            curriculum: chain_curriculum(),
            present: [cid(1), cid(2), cid(3)].into_iter().collect(),
        },
    ];
    let reports = batch::run(
        &batch::BatchArgs {
            jobs: write(dir.path(), "jobs.json", &jobs),
            concurrency: Some(2),
            out: dir.path().to_path_buf(),
        },
        &EngineConfig::default(),
    )
    .unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].missing, vec![cid(2)]);
    assert!(reports[1].result.isolated_nodes.is_empty());
    let on_disk: Vec<MasteryReport> = read(&dir.path().join("batch_reports.json"));
    assert_eq!(on_disk, reports);
}

#[test]
fn missing_input_is_reported() {
    let dir = TempDir::new().unwrap();
    let args = propagate::PropagateArgs {
        curriculum: dir.path().join("absent.json"),
        present: dir.path().join("absent.json"),
        out: dir.path().to_path_buf(),
    };
    let err = propagate::run(&args, &EngineConfig::default()).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}
