//! Console and file plumbing
//!
//! Text comes from a file or a single console line; results go to a file or
//! stdout. Candidate selection for polyalphabetic hacking happens here too,
//! so the cipher engine never prompts.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use quill_cipher::Candidate;

/// Whole file at `path`, or one line from `console` (without its line ending).
pub fn read_text(path: Option<&Path>, console: &mut impl BufRead) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read input file {}", path.display())),
        None => read_line(console),
    }
}

fn read_line(console: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    console.read_line(&mut line).context("cannot read from console")?;
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

/// Write `text` to `path`, or print it to `console`.
pub fn write_text(path: Option<&Path>, text: &str, console: &mut impl Write) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("cannot write output file {}", path.display())),
        None => {
            writeln!(console, "{text}")?;
            Ok(())
        }
    }
}

/// Pick one of the candidates: `choice` (1-based) if given, otherwise list
/// them on `out` and read the number from `input`.
pub fn select_candidate<'a>(
    candidates: &'a [Candidate],
    choice: Option<usize>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<&'a Candidate> {
    let choice = match choice {
        Some(choice) => choice,
        None => {
            writeln!(out, "What key do you prefer?")?;
            for (i, candidate) in candidates.iter().enumerate() {
                writeln!(out, "{}) {};", i + 1, candidate.key)?;
            }
            out.flush()?;

            let line = read_line(input)?;
            line.trim()
                .parse()
                .with_context(|| format!("expected a key number, got {line:?}"))?
        }
    };

    if choice == 0 || choice > candidates.len() {
        bail!("key number must be between 1 and {}, got {choice}", candidates.len());
    }
    Ok(&candidates[choice - 1])
}
