//! User interaction utilities for the create command
//!
//! Each prompt reads one line at a time; end of input means the user
//! backed out and surfaces as [`Cancelled`].

use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};

use create_mn_app::errors::Cancelled;

/// Read one trimmed line, or `Cancelled` on end of input
fn read_answer<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Cancelled.into());
    }
    Ok(line.trim().to_string())
}

/// Free-text prompt with a default and a validator.
///
/// Invalid answers print the validator's message and ask again.
pub fn text_with<R, W, F>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default: &str,
    validate: F,
) -> Result<String>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<(), String>,
{
    loop {
        write!(output, "{} {} ({}): ", "?".cyan(), question.bold(), default.dimmed())?;
        output.flush()?;

        let answer = read_answer(input)?;
        let answer = if answer.is_empty() {
            default.to_string()
        } else {
            answer
        };

        match validate(&answer) {
            Ok(()) => return Ok(answer),
            Err(problem) => writeln!(output, "{} {}", "✖".red(), problem)?,
        }
    }
}

/// Yes/no prompt; an empty answer takes `default`
pub fn confirm_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default: bool,
) -> Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        write!(output, "{} {} {}: ", "?".cyan(), question.bold(), hint)?;
        output.flush()?;

        match read_answer(input)?.to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(output, "Please answer y or n")?,
        }
    }
}

/// Numbered menu; returns the chosen index. Empty answer picks `default`.
pub fn select_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    choices: &[(&str, &str)],
    default: usize,
) -> Result<usize> {
    writeln!(output, "{} {}", "?".cyan(), question.bold())?;
    for (i, (label, description)) in choices.iter().enumerate() {
        writeln!(output, "  {}) {} {}", i + 1, label, format!("- {description}").dimmed())?;
    }

    loop {
        write!(output, "  Choose 1-{} ({}): ", choices.len(), default + 1)?;
        output.flush()?;

        let answer = read_answer(input)?;
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=choices.len()).contains(&n) => return Ok(n - 1),
            _ => writeln!(output, "Please enter a number between 1 and {}", choices.len())?,
        }
    }
}

pub fn text<F>(question: &str, default: &str, validate: F) -> Result<String>
where
    F: Fn(&str) -> Result<(), String>,
{
    text_with(&mut io::stdin().lock(), &mut io::stdout(), question, default, validate)
}

pub fn confirm(question: &str, default: bool) -> Result<bool> {
    confirm_with(&mut io::stdin().lock(), &mut io::stdout(), question, default)
}

pub fn select(question: &str, choices: &[(&str, &str)], default: usize) -> Result<usize> {
    select_with(&mut io::stdin().lock(), &mut io::stdout(), question, choices, default)
}

/// Prompts make sense only when a person is at the keyboard
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout)
}
