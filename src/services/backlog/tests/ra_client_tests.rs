use super::*;
use crate::services::backlog::models::WantToPlayPage;

#[test]
fn test_progression_converts_seconds_to_hours() {
    let progression: GameProgression = serde_json::from_str(
        r#"{
            "MedianTimeToBeat": 18000,
            "MedianTimeToMaster": 90360,
            "MedianTimeToBeatHardcore": 0,
            "NumDistinctPlayers": 1234
        }"#,
    )
    .unwrap();

    let stats = progression_to_stats(progression);
    assert_eq!(stats.beat_hours, Some(5.0));
    assert_eq!(stats.master_hours, Some(25.1));
    assert_eq!(stats.beat_hardcore_hours, None);
    assert_eq!(stats.master_hardcore_hours, None);
    assert_eq!(stats.players, Some(1234));
}

#[test]
fn test_empty_progression_is_empty_stats() {
    let progression: GameProgression = serde_json::from_str("{}").unwrap();
    assert!(progression_to_stats(progression).is_empty());
}

#[test]
fn test_want_to_play_page_maps_entries() {
    let page: WantToPlayPage = serde_json::from_str(
        r#"{
            "Count": 1,
            "Total": 1,
            "Results": [{
                "ID": 1451,
                "Title": "~Hack~ Super Mario Bros. 3 [Subset - Bonus]",
                "ImageIcon": "/Images/000001.png",
                "ConsoleID": 7,
                "ConsoleName": "NES/Famicom",
                "PointsTotal": 400,
                "AchievementsPublished": 40
            }]
        }"#,
    )
    .unwrap();

    assert_eq!(page.total, 1);
    let entries: Vec<BacklogEntry> = page.results.into_iter().map(BacklogEntry::from).collect();
    assert_eq!(
        entries,
        vec![BacklogEntry {
            id: 1451,
            title: "~Hack~ Super Mario Bros. 3 [Subset - Bonus]".to_string(),
            system: "NES/Famicom".to_string(),
            achievements: 40,
            points: 400,
        }]
    );
}

#[test]
fn test_endpoint_encodes_parameters() {
    let client = RaClient::new(
        "https://retroachievements.org/API/",
        Credentials::new("Some User", "key&123"),
    )
    .unwrap();

    let url = client.endpoint("API_GetGame.php", &[("u", "Some User".to_string())]);
    assert_eq!(
        url,
        "https://retroachievements.org/API/API_GetGame.php?y=key%26123&u=Some%20User"
    );
}
