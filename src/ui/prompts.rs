//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! operations requiring confirmation must be forced or fail with a clear
//! error message.

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Prompt for confirmation (yes/no) on the terminal.
///
/// Returns `Ok(true)` if the user confirms, `Ok(false)` if they decline.
/// Returns `Err(PromptError::NotInteractive)` if not in interactive mode.
pub fn confirm(message: &str, default: bool, interactive: bool) -> Result<bool, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    let stdin = io::stdin();
    confirm_with(&mut stdin.lock(), &mut io::stderr(), message, default)
}

/// Prompt for confirmation using explicit input and output streams.
///
/// An empty answer selects `default`. Unrecognized answers ask again.
/// End of input counts as a cancellation.
pub fn confirm_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default: bool,
) -> Result<bool, PromptError> {
    let suffix = if default { "[Y/n]" } else { "[y/N]" };

    loop {
        write!(output, "{} {} ", message, suffix).map_err(|e| PromptError::IoError(e.to_string()))?;
        output
            .flush()
            .map_err(|e| PromptError::IoError(e.to_string()))?;

        let mut answer = String::new();
        let read = input
            .read_line(&mut answer)
            .map_err(|e| PromptError::IoError(e.to_string()))?;
        if read == 0 {
            return Err(PromptError::Cancelled);
        }

        match answer.trim().to_ascii_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => {
                writeln!(output, "Please answer 'y' or 'n'.")
                    .map_err(|e| PromptError::IoError(e.to_string()))?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str, default: bool) -> (Result<bool, PromptError>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = confirm_with(&mut reader, &mut out, "Proceed?", default);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn non_interactive_is_rejected() {
        assert!(matches!(
            confirm("x", true, false),
            Err(PromptError::NotInteractive)
        ));
    }

    #[test]
    fn empty_answer_uses_default() {
        assert!(ask("\n", true).0.unwrap());
        assert!(!ask("\n", false).0.unwrap());
    }

    #[test]
    fn explicit_answers() {
        assert!(ask("yes\n", false).0.unwrap());
        assert!(!ask("N\n", true).0.unwrap());
    }

    #[test]
    fn reasks_on_garbage() {
        let (result, out) = ask("maybe\ny\n", false);
        assert!(result.unwrap());
        assert_eq!(out.matches("Proceed? [y/N]").count(), 2);
        assert!(out.contains("Please answer"));
    }

    #[test]
    fn eof_cancels() {
        assert!(matches!(ask("", false).0, Err(PromptError::Cancelled)));
    }
}
