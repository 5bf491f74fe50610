use super::*;

#[test]
fn test_parse_scan_flags() {
    let cli = Cli::try_parse_from([
        "ra-backlog-timer",
        "-o",
        "out.csv",
        "scan",
        "--fresh",
        "--yes",
        "--system",
        "SNES/Super Famicom",
        "--system",
        "Game Boy",
        "--exclude-system",
        "PC Engine",
    ])
    .unwrap();

    assert_eq!(cli.output, Some(PathBuf::from("out.csv")));
    let Command::Scan(args) = cli.command else {
        panic!("expected scan");
    };
    assert!(args.fresh);
    assert!(args.yes);
    assert!(!args.refresh);
    assert!(!args.reset_creds);
    assert_eq!(args.systems, vec!["SNES/Super Famicom", "Game Boy"]);
    assert_eq!(args.exclude_systems, vec!["PC Engine"]);
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["ra-backlog-timer", "summary", "-v", "--config", "s.json"]).unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.config, Some(PathBuf::from("s.json")));
    assert!(matches!(cli.command, Command::Summary));
}

#[test]
fn test_parse_match_requires_candidates() {
    assert!(Cli::try_parse_from(["ra-backlog-timer", "match", "Aladdin"]).is_err());

    let cli = Cli::try_parse_from([
        "ra-backlog-timer",
        "match",
        "Aladdin",
        "--candidate",
        "Disney's Aladdin",
        "-c",
        "Aladdin III",
    ])
    .unwrap();
    match cli.command {
        Command::Match { title, candidates } => {
            assert_eq!(title, "Aladdin");
            assert_eq!(candidates, vec!["Disney's Aladdin", "Aladdin III"]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_estimate_and_account() {
    let cli = Cli::try_parse_from(["ra-backlog-timer", "estimate", "--hours-per-week", "7.5"]).unwrap();
    assert!(matches!(cli.command, Command::Estimate { hours_per_week } if hours_per_week == 7.5));

    let cli = Cli::try_parse_from(["ra-backlog-timer", "account", "clear"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Account {
            action: AccountAction::Clear
        }
    ));

    let cli = Cli::try_parse_from(["ra-backlog-timer", "lookup", "1234"]).unwrap();
    assert!(matches!(cli.command, Command::Lookup { ref query } if query == "1234"));
}

#[test]
fn test_context_uses_settings_and_output_override() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("settings.json");

    let cli = Cli::try_parse_from([
        "ra-backlog-timer",
        "--config",
        config.to_str().unwrap(),
        "summary",
    ])
    .unwrap();
    let ctx = AppContext::from_cli(&cli).unwrap();
    assert_eq!(ctx.output_path, PathBuf::from("HowLongToBeat.xlsx"));
    assert_eq!(ctx.settings, AppSettings::default());

    let cli = Cli::try_parse_from([
        "ra-backlog-timer",
        "--config",
        config.to_str().unwrap(),
        "--output",
        "mine.csv",
        "summary",
    ])
    .unwrap();
    let ctx = AppContext::from_cli(&cli).unwrap();
    assert_eq!(ctx.output_path, PathBuf::from("mine.csv"));
}

#[test]
fn test_context_rejects_malformed_settings() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("settings.json");
    std::fs::write(&config, "{ not json").unwrap();

    let cli = Cli::try_parse_from([
        "ra-backlog-timer",
        "--config",
        config.to_str().unwrap(),
        "summary",
    ])
    .unwrap();
    assert!(AppContext::from_cli(&cli).is_err());
}
