use super::*;
use crate::services::backlog::BacklogEntry;
use crate::services::matcher::{Candidate, MatchResult};
use crate::services::progress::ProgressRecord;

fn row(
    title: &str,
    system: &str,
    points: u32,
    result: Option<MatchResult>,
    hltb: (Option<f64>, Option<f64>),
    ra_master: Option<f64>,
) -> ExportRow {
    let entry = BacklogEntry {
        id: 1,
        title: title.to_string(),
        system: system.to_string(),
        achievements: 10,
        points,
    };
    let record = result.map(|r| {
        let mut record = ProgressRecord::from_match(&r, "HLTB");
        record.beat_hours = hltb.0;
        record.complete_hours = hltb.1;
        record.ra_master_hours = ra_master;
        record
    });
    ExportRow::new(&entry, record.as_ref())
}

fn exact(title: &str) -> Option<MatchResult> {
    Some(MatchResult::Exact {
        candidate: Candidate::new("1", title),
    })
}

fn sample_rows() -> Vec<ExportRow> {
    vec![
        row("Sonic", "Genesis/Mega Drive", 400, exact("Sonic"), (Some(2.0), Some(4.0)), Some(8.0)),
        row(
            "Aladdin",
            "Genesis/Mega Drive",
            300,
            Some(MatchResult::Loose {
                candidate: Candidate::new("2", "Disney's Aladdin"),
                score: 0.63,
            }),
            (Some(1.5), Some(3.5)),
            None,
        ),
        row("Zelda", "SNES/Super Famicom", 500, exact("Zelda"), (Some(20.0), Some(40.0)), Some(50.0)),
        row("Obscure", "PC Engine", 100, Some(MatchResult::NoMatch), (None, None), None),
        row("Pending", "PC Engine", 50, None, (None, None), None),
    ]
}

#[test]
fn test_summary_counts() {
    let summary = BacklogSummary::from_rows(&sample_rows(), 5);

    assert_eq!(summary.total, 5);
    assert_eq!(summary.with_hltb, 3);
    assert_eq!(summary.with_ra_master, 2);
    assert_eq!(summary.total_points, 1350);
    assert_eq!(summary.total_mastery_hours, 58.0);
    assert_eq!(summary.average_mastery_hours, Some(29.0));
    assert_eq!(
        summary.quality,
        MatchQuality {
            exact: 2,
            fuzzy: 0,
            loose: 1,
            poor: 0,
            none: 1,
            unscanned: 1,
        }
    );
    assert_eq!(summary.missing_time, vec!["Obscure", "Pending"]);
}

#[test]
fn test_summary_systems_sorted_by_count_then_name() {
    let summary = BacklogSummary::from_rows(&sample_rows(), 5);
    let systems: Vec<(&str, usize)> = summary
        .systems
        .iter()
        .map(|s| (s.system.as_str(), s.games))
        .collect();

    assert_eq!(
        systems,
        vec![
            ("Genesis/Mega Drive", 2),
            ("PC Engine", 2),
            ("SNES/Super Famicom", 1),
        ]
    );
    assert_eq!(summary.systems[0].mastery_hours, 8.0);
}

#[test]
fn test_summary_rankings() {
    let summary = BacklogSummary::from_rows(&sample_rows(), 2);

    let longest: Vec<&str> = summary.longest.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(longest, vec!["Zelda", "Sonic"]);

    // Sonic 400/8 = 50, Aladdin 300/3.5 = 85.7, Zelda 500/50 = 10
    let efficient: Vec<&str> = summary.most_efficient.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(efficient, vec!["Aladdin", "Sonic"]);
}

#[test]
fn test_summary_time_comparison() {
    let comparison = BacklogSummary::from_rows(&sample_rows(), 5)
        .comparison
        .unwrap();
    assert_eq!(comparison.games, 2);
    assert_eq!(comparison.avg_hltb_complete, 22.0);
    assert_eq!(comparison.avg_ra_master, 29.0);
}

#[test]
fn test_empty_summary() {
    let summary = BacklogSummary::from_rows(&[], 5);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.average_mastery_hours, None);
    assert!(summary.comparison.is_none());
    assert!(summary.systems.is_empty());
}

#[test]
fn test_completion_estimate() {
    let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let estimate = CompletionEstimate::new(520.0, 10.0, today).unwrap();

    assert_eq!(estimate.weeks, 52.0);
    assert_eq!(estimate.years, 1.0);
    assert!((estimate.months - 52.0 / 4.33).abs() < 1e-9);
    assert_eq!(estimate.completion_date, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    assert_eq!(estimate.verdict, Verdict::Achievable);
}

#[test]
fn test_completion_verdicts() {
    let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    assert_eq!(
        CompletionEstimate::new(1000.0, 5.0, today).unwrap().verdict,
        Verdict::MultiYear
    );
    assert_eq!(
        CompletionEstimate::new(5000.0, 5.0, today).unwrap().verdict,
        Verdict::PrioritizeByEfficiency
    );
}

#[test]
fn test_completion_rejects_bad_input() {
    let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    assert!(matches!(
        CompletionEstimate::new(100.0, 0.0, today),
        Err(AppError::Config(_))
    ));
    assert!(matches!(
        CompletionEstimate::new(0.0, 10.0, today),
        Err(AppError::NotFound(_))
    ));
}
