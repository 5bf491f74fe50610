use super::AppContext;
use crate::services::matcher::{explain, Candidate, MatchReport};

/// Printable trace of one resolution.
pub fn render_report(title: &str, report: &MatchReport) -> Vec<String> {
    let mut lines = vec![format!("Title: {title}")];
    lines.push(format!("Variants: {}", report.variants.join(" | ")));

    for ranking in &report.rankings {
        lines.push(format!("Scores for '{}':", ranking.variant));
        for ranked in &ranking.ranked {
            lines.push(format!(
                "  {:.4}  {} ({})",
                ranked.score, ranked.title, ranked.normalized
            ));
        }
    }

    let result = &report.result;
    match result.candidate() {
        Some(candidate) => lines.push(format!(
            "Result: {} -> {} ({:.4})",
            result.kind(),
            candidate.title,
            result.score()
        )),
        None => lines.push(format!("Result: {}", result.kind())),
    }
    lines
}

/// Run the matcher offline against the given candidate titles.
pub fn match_title(ctx: &AppContext, title: &str, candidate_titles: &[String]) {
    let candidates: Vec<Candidate> = candidate_titles
        .iter()
        .enumerate()
        .map(|(i, t)| Candidate::new((i + 1).to_string(), t.as_str()))
        .collect();
    let report = explain(title, &candidates, &ctx.settings.thresholds);
    for line in render_report(title, &report) {
        println!("{line}");
    }
}

#[cfg(test)]
#[path = "tests/match_cmds_tests.rs"]
mod tests;
