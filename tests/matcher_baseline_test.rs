//! Fixture-driven regression corpus for the title matcher.
//!
//! Pins the classification of borderline titles so a change to the similarity
//! measure or the normalizer shows up as a diff here.

mod common;

use serde::Deserialize;

use ra_backlog_lib::services::matcher::{
    resolve, resolve_all, Candidate, MatchJob, MatchKind, MatchThresholds,
};

#[derive(Debug, Deserialize)]
struct BaselineCase {
    title: String,
    candidates: Vec<String>,
    kind: MatchKind,
    matched: Option<String>,
}

fn load_cases() -> Vec<BaselineCase> {
    serde_json::from_str(include_str!("fixtures/matcher_baseline.json"))
        .expect("baseline fixture should parse")
}

fn to_job(case: &BaselineCase) -> MatchJob {
    MatchJob {
        title: case.title.clone(),
        candidates: case
            .candidates
            .iter()
            .enumerate()
            .map(|(i, t)| Candidate::new(i.to_string(), t.as_str()))
            .collect(),
    }
}

#[test]
fn baseline_classifications_hold() {
    common::init_logger();
    let cases = load_cases();
    let jobs: Vec<MatchJob> = cases.iter().map(to_job).collect();
    let results = resolve_all(&jobs, &MatchThresholds::default());

    assert_eq!(results.len(), cases.len());
    let mut failures = Vec::new();
    for (case, result) in cases.iter().zip(&results) {
        let matched = result.candidate().map(|c| c.title.clone());
        if result.kind() != case.kind || matched != case.matched {
            failures.push(format!(
                "{:?}: expected {:?} {:?}, got {:?} {:?} ({:.4})",
                case.title,
                case.kind,
                case.matched,
                result.kind(),
                matched,
                result.score()
            ));
        }
    }
    assert!(failures.is_empty(), "baseline drift:\n{}", failures.join("\n"));
}

#[test]
fn parallel_resolution_matches_sequential() {
    let cases = load_cases();
    let jobs: Vec<MatchJob> = cases.iter().map(to_job).collect();
    let parallel = resolve_all(&jobs, &MatchThresholds::default());

    for (job, result) in jobs.iter().zip(parallel) {
        assert_eq!(resolve(&job.title, &job.candidates), result, "title: {}", job.title);
    }
}

#[test]
fn baseline_is_independent_of_candidate_order() {
    for case in load_cases() {
        let mut job = to_job(&case);
        let forward = resolve(&job.title, &job.candidates);
        job.candidates.reverse();
        let backward = resolve(&job.title, &job.candidates);
        assert_eq!(forward, backward, "title: {}", case.title);
    }
}
