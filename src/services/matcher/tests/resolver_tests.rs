use super::*;

fn candidates(titles: &[&str]) -> Vec<Candidate> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| Candidate::new(format!("{}", i + 1), *title))
        .collect()
}

fn chosen_title(result: &MatchResult) -> Option<&str> {
    result.candidate().map(|c| c.title.as_str())
}

#[test]
fn test_empty_candidates_is_no_match() {
    for raw in ["Aladdin", "", "Pokémon FireRed Version", "HeartGold | SoulSilver"] {
        assert_eq!(resolve(raw, &[]), MatchResult::NoMatch, "raw: {raw:?}");
    }
}

#[test]
fn test_empty_title_is_no_match() {
    let pool = candidates(&["Aladdin"]);
    assert_eq!(resolve("", &pool), MatchResult::NoMatch);
    assert_eq!(resolve("   ", &pool), MatchResult::NoMatch);
    assert_eq!(resolve("[Subset - Bonus]", &pool), MatchResult::NoMatch);
}

#[test]
fn test_all_scores_at_floor_is_no_match() {
    let pool = candidates(&["zzzz"]);
    assert_eq!(resolve("qqq", &pool), MatchResult::NoMatch);
}

#[test]
fn test_pokemon_firered_exact() {
    let pool = candidates(&["Pokemon FireRed"]);
    let report = explain("Pokémon FireRed Version", &pool, &MatchThresholds::default());
    assert_eq!(report.variants[0], "pokemon firered");
    assert_eq!(report.result.kind(), MatchKind::Exact);
    assert_eq!(chosen_title(&report.result), Some("Pokemon FireRed"));
    assert_eq!(report.result.score(), 1.0);
}

#[test]
fn test_aladdin_prefers_base_game_over_sequel() {
    let pool = candidates(&["Disney's Aladdin", "Aladdin III"]);
    let result = resolve("Aladdin (Genesis/Mega Drive)", &pool);

    assert_eq!(chosen_title(&result), Some("Disney's Aladdin"));
    assert_eq!(result.kind(), MatchKind::Loose);
    assert!((result.score() - 12.0 / 19.0).abs() < 1e-9);
    assert_eq!(
        result.comment("HLTB"),
        "Loose match (63%): Disney's Aladdin"
    );
}

#[test]
fn test_result_independent_of_candidate_order() {
    let mut pool = candidates(&["Aladdin III", "Disney's Aladdin", "Aladdin: The Sequel"]);
    let forward = resolve("Aladdin (Genesis/Mega Drive)", &pool);
    pool.reverse();
    let backward = resolve("Aladdin (Genesis/Mega Drive)", &pool);
    assert_eq!(forward, backward);
}

#[test]
fn test_tie_prefers_closest_raw_length() {
    let mut pool = vec![
        Candidate::new("10", "Mario: Kart"),
        Candidate::new("20", "Mario Kart"),
    ];
    let first = resolve("Mario", &pool);
    pool.reverse();
    let second = resolve("Mario", &pool);

    assert_eq!(chosen_title(&first), Some("Mario Kart"));
    assert_eq!(first, second);
}

#[test]
fn test_full_tie_falls_back_to_id() {
    let mut pool = vec![Candidate::new("b", "Mario Kart"), Candidate::new("a", "Mario Kart")];
    let first = resolve("Mario", &pool);
    pool.reverse();
    let second = resolve("Mario", &pool);

    assert_eq!(first.candidate().map(|c| c.id.as_str()), Some("a"));
    assert_eq!(first, second);
}

#[test]
fn test_fallback_variant_used_when_primary_weak() {
    let pool = candidates(&["Pokemon SoulSilver"]);
    let report = explain("HeartGold | SoulSilver", &pool, &MatchThresholds::default());

    assert_eq!(report.rankings.len(), 2);
    assert_eq!(report.result.kind(), MatchKind::Loose);
    assert!((report.result.score() - 0.72).abs() < 1e-9);
}

#[test]
fn test_fallback_variant_exact_match() {
    let pool = candidates(&["Zelda"]);
    let result = resolve("Tetris | Zelda", &pool);
    assert_eq!(result.kind(), MatchKind::Exact);
}

#[test]
fn test_fallback_not_tried_when_primary_acceptable() {
    let pool = candidates(&["HeartGold", "SoulSilver"]);
    let report = explain("HeartGold | SoulSilver", &pool, &MatchThresholds::default());

    assert_eq!(report.rankings.len(), 1);
    assert_eq!(chosen_title(&report.result), Some("HeartGold"));
    assert_eq!(report.result.kind(), MatchKind::Exact);
}

#[test]
fn test_engineered_boundaries() {
    let fuzzy = resolve("Zelda", &candidates(&["Zelde"]));
    assert_eq!(fuzzy.kind(), MatchKind::Fuzzy);
    assert_eq!(fuzzy.score(), 0.80);
    assert_eq!(fuzzy.comment("HLTB"), "Fuzzy match: Zelde");

    let loose = resolve("Tron", &candidates(&["Trap"]));
    assert_eq!(loose.kind(), MatchKind::Loose);
    assert_eq!(loose.score(), 0.50);
}

#[test]
fn test_poor_match_comment() {
    let result = resolve("Tetris", &candidates(&["Zelda"]));
    assert_eq!(result.kind(), MatchKind::Poor);
    assert_eq!(result.comment("HLTB"), "Poor match (17%): Zelda - VERIFY");
}

#[test]
fn test_sequel_penalty_changes_winner() {
    let pool = candidates(&["Super Game 2", "Sup Game"]);
    let result = resolve("Super Game", &pool);
    assert_eq!(chosen_title(&result), Some("Sup Game"));
    assert_eq!(result.kind(), MatchKind::Fuzzy);
}

#[test]
fn test_classify_boundaries() {
    let t = MatchThresholds::default();
    assert_eq!(classify(0.80, false, &t), MatchKind::Fuzzy);
    assert_eq!(classify(0.7999, false, &t), MatchKind::Loose);
    assert_eq!(classify(0.50, false, &t), MatchKind::Loose);
    assert_eq!(classify(0.4999, false, &t), MatchKind::Poor);
    assert_eq!(classify(0.0, false, &t), MatchKind::NoMatch);
    assert_eq!(classify(0.3, true, &t), MatchKind::Exact);
}

#[test]
fn test_custom_thresholds() {
    let strict = MatchThresholds {
        fuzzy: 0.95,
        loose: 0.85,
        ..MatchThresholds::default()
    };
    let result = resolve_with("Zelda", &candidates(&["Zelde"]), &strict);
    assert_eq!(result.kind(), MatchKind::Poor);
}

#[test]
fn test_no_match_comment_names_lookup() {
    assert_eq!(MatchResult::NoMatch.comment("HLTB"), "No HLTB match found");
    let exact = MatchResult::Exact {
        candidate: Candidate::new("1", "Zelda"),
    };
    assert_eq!(exact.comment("HLTB"), "");
}
