//! Interactive checklist session
//!
//! A [`Session`] owns the current snapshot and replaces it after every
//! mutation. Commands are read one line at a time; malformed lines are
//! reported and the loop keeps going.

use crate::render;
use checkgate_core::{Checklist, Summary, Thresholds};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Help text printed by the `help` command
pub const HELP: &str = "\
commands:
  toggle <section> <node>   flip one node
  reset                     uncheck everything
  status                    progress and gate state
  incomplete                list unchecked nodes
  submit                    open the submission target if the gate allows
  help                      this text
  quit                      leave the session";

/// One parsed session line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Toggle { section: String, node: String },
    Reset,
    Status,
    Incomplete,
    Submit,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = SessionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(SessionError::Empty);
        };
        let args: Vec<&str> = words.collect();

        let command = match verb {
            "toggle" | "t" => match args.as_slice() {
                [section, node] => Self::Toggle {
                    section: (*section).to_owned(),
                    node: (*node).to_owned(),
                },
                _ => return Err(SessionError::Usage("toggle <section> <node>")),
            },
            "reset" => Self::Reset,
            "status" => Self::Status,
            "incomplete" => Self::Incomplete,
            "submit" => Self::Submit,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(SessionError::Unknown(other.to_owned())),
        };

        let takes_args = matches!(command, Self::Toggle { .. });
        if !takes_args && !args.is_empty() {
            return Err(SessionError::Usage(match command {
                Self::Reset => "reset",
                Self::Status => "status",
                Self::Incomplete => "incomplete",
                Self::Submit => "submit",
                Self::Help => "help",
                _ => "quit",
            }));
        }
        Ok(command)
    }
}

/// Unparsable session line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Whether the loop continues after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Checklist session state
#[derive(Debug, Clone)]
pub struct Session {
    checklist: Checklist,
    thresholds: Thresholds,
    submit_url: Option<String>,
}

impl Session {
    /// Start a session from `checklist`
    #[must_use]
    pub fn new(checklist: Checklist, thresholds: Thresholds, submit_url: Option<String>) -> Self {
        Self {
            checklist,
            thresholds,
            submit_url,
        }
    }

    /// Current snapshot
    #[inline]
    #[must_use]
    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    /// Summary of the current snapshot
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::of(&self.checklist, self.thresholds)
    }

    /// Apply one command, writing its output
    ///
    /// # Errors
    /// Returns error if writing fails
    pub fn apply<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> io::Result<Flow> {
        match command {
            SessionCommand::Toggle { section, node } => {
                if self.checklist.node(&section, &node).is_none() {
                    tracing::debug!(section = %section, node = %node, "toggle target not found");
                    writeln!(out, "no node '{node}' in section '{section}'")?;
                    return Ok(Flow::Continue);
                }
                self.checklist = self.checklist.toggle(&section, &node);
                writeln!(out, "{}", render::status_line(&self.checklist))?;
            }
            SessionCommand::Reset => {
                self.checklist = self.checklist.reset();
                writeln!(out, "{}", render::status_line(&self.checklist))?;
            }
            SessionCommand::Status => {
                let summary = self.summary();
                writeln!(out, "{}", render::status_line(&self.checklist))?;
                writeln!(out, "status: {} - {}", summary.status, summary.status.message())?;
            }
            SessionCommand::Incomplete => render::write_incomplete(out, &self.checklist)?,
            SessionCommand::Submit => self.submit(out)?,
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn submit<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if !self.checklist.can_submit() {
            let blocking = self.checklist.blocking_items().len();
            writeln!(out, "cannot submit: {blocking} top-level item(s) unchecked")?;
            return render::write_gate(out, &self.checklist);
        }
        match self
            .submit_url
            .as_deref()
            .and_then(|url| self.checklist.submission_target(url))
        {
            Some(url) => {
                tracing::info!(url, "checklist submitted");
                writeln!(out, "ready to submit: {url}")
            }
            None => writeln!(out, "ready to submit (no submission URL configured)"),
        }
    }

    /// Read commands from `input` until `quit` or end of input
    ///
    /// # Errors
    /// Returns error if reading or writing fails
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", render::status_line(&self.checklist))?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<SessionCommand>() {
                Ok(command) => {
                    if self.apply(command, &mut out)? == Flow::Quit {
                        break;
                    }
                }
                Err(err) => writeln!(out, "error: {err}")?,
            }
            out.flush()?;
        }
        Ok(())
    }
}
