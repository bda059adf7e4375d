//! Interactive confirmation before destructive actions.

use std::io::{self, BufRead, Write};

use tokio::runtime::{Handle, RuntimeFlavor};

/// Asks the user a yes/no question.
pub trait Confirm: Send {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool + Send,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Answers yes without asking, for `--yes` style invocations.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Reads a y/N answer from stdin. Anything but "y"/"yes" declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        off_runtime(|| ask(prompt, io::stdin().lock(), io::stdout()))
    }
}

/// Write the prompt and read one answer line.
pub fn ask<R: BufRead, W: Write>(prompt: &str, mut input: R, mut out: W) -> bool {
    if write!(out, "{prompt} [y/N] ").and_then(|_| out.flush()).is_err() {
        return false;
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => is_yes(&answer),
        Err(_) => false,
    }
}

/// Run blocking terminal I/O without stalling other tasks on a
/// multi-threaded runtime.
fn off_runtime<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => tokio::task::block_in_place(f),
        _ => f(),
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
