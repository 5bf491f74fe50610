use super::*;
use std::io::Cursor;

#[test]
fn test_read_credentials() {
    let mut input = Cursor::new("player1\nsecret-key\n");
    let mut output = Vec::new();

    let creds = read_credentials(&mut input, &mut output, "").unwrap();
    assert_eq!(creds, Credentials::new("player1", "secret-key"));

    let shown = String::from_utf8(output).unwrap();
    assert!(shown.contains("Username: "));
    assert!(shown.contains("Web API key: "));
}

#[test]
fn test_read_credentials_keeps_existing_username() {
    let mut input = Cursor::new("\nsecret-key\n");
    let mut output = Vec::new();

    let creds = read_credentials(&mut input, &mut output, "player1").unwrap();
    assert_eq!(creds.username, "player1");
    assert!(String::from_utf8(output).unwrap().contains("[player1]"));
}

#[test]
fn test_empty_answers_cancel() {
    let mut output = Vec::new();
    assert!(matches!(
        read_credentials(&mut Cursor::new("\n"), &mut output, ""),
        Err(AppError::Cancelled)
    ));
    assert!(matches!(
        read_credentials(&mut Cursor::new("player1\n\n"), &mut output, ""),
        Err(AppError::Cancelled)
    ));
    // EOF
    assert!(matches!(
        read_credentials(&mut Cursor::new(""), &mut output, ""),
        Err(AppError::Cancelled)
    ));
}

#[test]
fn test_read_confirmation() {
    let mut output = Vec::new();
    for (answer, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("\n", false), ("maybe\n", false)] {
        let confirmed = read_confirmation(&mut Cursor::new(answer), &mut output, "Sure?").unwrap();
        assert_eq!(confirmed, expected, "answer: {answer:?}");
    }
    assert!(String::from_utf8(output).unwrap().contains("Sure? (y/n): "));
}
