//! Line-based terminal prompts
//!
//! Invalid answers print an error and ask again. End of input ends the
//! session with `PromptError::Closed`.

use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Errors that end a prompt session
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed before all values were entered")]
    Closed,

    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Why a typed answer was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0:?} is not a whole number")]
    NotANumber(String),

    #[error("{value} is outside {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },

    #[error("{0:?} is not one of the listed choices")]
    UnknownChoice(String),
}

/// Parse a whole number and check it against an inclusive range
pub fn parse_in_range(raw: &str, range: &RangeInclusive<i64>) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    let value = raw
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber(raw.to_string()))?;

    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Resolve a 1-based menu number or a case-insensitive choice name
pub fn parse_choice<'a>(raw: &str, choices: &[&'a str]) -> Result<&'a str, ValidationError> {
    let raw = raw.trim();

    if let Ok(n) = raw.parse::<usize>() {
        if let Some(choice) = n.checked_sub(1).and_then(|i| choices.get(i)) {
            return Ok(*choice);
        }
    }

    choices
        .iter()
        .find(|c| c.eq_ignore_ascii_case(raw))
        .copied()
        .ok_or_else(|| ValidationError::UnknownChoice(raw.to_string()))
}

/// Prompts over any line reader and writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self, label: &str) -> Result<String, PromptError> {
        write!(self.output, "{label} ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }

    /// Show a numbered menu and return the chosen entry
    pub fn select<'a>(&mut self, title: &str, choices: &[&'a str]) -> Result<&'a str, PromptError> {
        writeln!(self.output, "Select {}:", title.green())?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, choice)?;
        }

        loop {
            let answer = self.read_answer(">")?;
            match parse_choice(&answer, choices) {
                Ok(choice) => return Ok(choice),
                Err(_) => writeln!(
                    self.output,
                    "{}",
                    format!("Please choose 1-{} or type a listed name", choices.len()).red()
                )?,
            }
        }
    }

    /// Ask for a whole number within `range`, re-prompting with `invalid` on
    /// bad input
    pub fn number_in_range(
        &mut self,
        label: &str,
        range: &RangeInclusive<i64>,
        invalid: &str,
    ) -> Result<i64, PromptError> {
        loop {
            let answer = self.read_answer(&format!("Enter {}:", label.green()))?;
            match parse_in_range(&answer, range) {
                Ok(value) => return Ok(value),
                Err(err) => writeln!(self.output, "{} ({err})", invalid.red())?,
            }
        }
    }
}
