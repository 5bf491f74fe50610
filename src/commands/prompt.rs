//! Interactive stdin prompts.
use std::io::{self, BufRead, Write};

use crate::services::config::Credentials;
use crate::types::errors::{AppError, AppResult};

const API_KEY_URL: &str = "https://retroachievements.org/settings";

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> AppResult<String> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Ask for a username and Web API key. An empty answer cancels.
pub fn read_credentials<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    existing_username: &str,
) -> AppResult<Credentials> {
    writeln!(output, "RetroAchievements login")?;
    writeln!(output, "Your Web API key is listed at {API_KEY_URL}")?;

    let question = if existing_username.is_empty() {
        "Username: ".to_string()
    } else {
        format!("Username [{existing_username}]: ")
    };
    let mut username = ask(input, output, &question)?;
    if username.is_empty() {
        username = existing_username.to_string();
    }
    if username.is_empty() {
        return Err(AppError::Cancelled);
    }

    let api_key = ask(input, output, "Web API key: ")?;
    if api_key.is_empty() {
        return Err(AppError::Cancelled);
    }
    Ok(Credentials::new(username, api_key))
}

/// Yes/no question; anything but `y`/`yes` is a no.
pub fn read_confirmation<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> AppResult<bool> {
    let answer = ask(input, output, &format!("{question} (y/n): "))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

pub fn prompt_credentials(existing_username: &str) -> AppResult<Credentials> {
    read_credentials(&mut io::stdin().lock(), &mut io::stdout(), existing_username)
}

pub fn confirm(question: &str) -> AppResult<bool> {
    read_confirmation(&mut io::stdin().lock(), &mut io::stdout(), question)
}

#[cfg(test)]
#[path = "tests/prompt_tests.rs"]
mod tests;
