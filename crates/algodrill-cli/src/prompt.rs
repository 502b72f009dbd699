//! Small stdin prompt helpers for the interactive run loop.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use anyhow::Result;

/// Read one trimmed line. Fails when stdin closes, so a piped run cannot
/// spin forever on an exhausted input.
pub fn read_line(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    let bytes = io::stdin().read_line(&mut line)?;
    if bytes == 0 {
        anyhow::bail!("input stream closed");
    }
    Ok(line.trim().to_string())
}

/// Prompt until the input parses as `T`.
pub fn read_parse<T>(label: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    loop {
        match read_line(label)?.parse::<T>() {
            Ok(value) => return Ok(value),
            Err(e) => eprintln!("invalid input: {e}"),
        }
    }
}

/// Like [`read_parse`], but an empty line means "no value".
pub fn read_optional<T>(label: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    loop {
        let raw = read_line(label)?;
        if raw.is_empty() {
            return Ok(None);
        }
        match raw.parse::<T>() {
            Ok(value) => return Ok(Some(value)),
            Err(e) => eprintln!("invalid input: {e}"),
        }
    }
}

/// Prompt for a yes/no answer.
pub fn read_bool(label: &str) -> Result<bool> {
    loop {
        match read_line(&format!("{label} [y/n]"))?.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => eprintln!("answer y or n"),
        }
    }
}

/// Prompt for a 1-based choice out of `len` options; returns the zero-based
/// index.
pub fn read_choice(label: &str, len: usize) -> Result<usize> {
    loop {
        let picked = read_parse::<usize>(label)?;
        if (1..=len).contains(&picked) {
            return Ok(picked - 1);
        }
        eprintln!("pick a number between 1 and {len}");
    }
}
