//! Splitting of multi-statement DDL scripts.
//!
//! Scripts use `;` as statement terminator by default. A `SET TERM`
//! directive switches to `^` so procedure bodies, which contain `;`, travel
//! as one statement, and a second directive switches back:
//!
//! ```text
//! SET TERM ^ ;
//! CREATE PROCEDURE P AS BEGIN END^
//! SET TERM ; ^
//! ```
//!
//! Splitting is a fold over lines with an explicit [`SplitState`]; the
//! directive lines themselves are never part of a statement. Lines end at
//! `\r\n`, `\n` or a lone `\r`.

mod loader;

pub use loader::{find_script, load_script};

use std::fmt;

use serde::Serialize;

/// Keyword that starts a terminator-switch directive.
const SET_TERM: &str = "SET TERM";

/// Statement terminator currently in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Terminator {
    /// `;`
    #[default]
    Semicolon,
    /// `^`, used around procedure bodies.
    Caret,
}

impl Terminator {
    pub fn as_str(self) -> &'static str {
        match self {
            Terminator::Semicolon => ";",
            Terminator::Caret => "^",
        }
    }

    /// Terminator selected by a `SET TERM` directive line.
    ///
    /// Pattern based rather than parsed: `^` without `;` and `^ ;` select
    /// the caret, `; ^` restores the semicolon. Any other phrasing keeps
    /// `self`.
    fn after_directive(self, line: &str) -> Self {
        if line.contains('^') && !line.contains(';') {
            Terminator::Caret
        } else if line.contains("^ ;") {
            Terminator::Caret
        } else if line.contains("; ^") {
            Terminator::Semicolon
        } else {
            self
        }
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single executable SQL statement, terminator removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Statement(String);

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Statement(sql.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank statements carry nothing to execute.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// `COMMIT` or `ROLLBACK`; transaction boundaries belong to the applier.
    pub fn is_transaction_control(&self) -> bool {
        let sql = self.0.trim();
        sql.eq_ignore_ascii_case("COMMIT") || sql.eq_ignore_ascii_case("ROLLBACK")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Statement {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Splitter state threaded through the line fold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitState {
    terminator: Terminator,
    buffer: String,
}

impl SplitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Terminator in effect for the next line.
    pub fn terminator(&self) -> Terminator {
        self.terminator
    }

    /// Text buffered since the last complete statement.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Consume one line, returning the next state and any completed statement.
    pub fn step(mut self, line: &str) -> (Self, Option<Statement>) {
        let trimmed = line.trim();

        if is_set_term(trimmed) {
            self.terminator = self.terminator.after_directive(trimmed);
            return (self, None);
        }

        self.buffer.push_str(line);
        self.buffer.push('\n');

        let term = self.terminator.as_str();
        if !self.buffer.trim_end().ends_with(term) {
            return (self, None);
        }

        let text = self.buffer.trim();
        let body = match text.rfind(term) {
            Some(pos) => &text[..pos],
            None => text,
        };
        let body = body.trim();
        let statement = (!body.is_empty()).then(|| Statement::new(body));

        self.buffer.clear();
        (self, statement)
    }

    /// Finish the fold, returning unterminated trailing text if any.
    ///
    /// Trailing text is not a statement; callers decide whether to report it.
    pub fn finish(self) -> Option<String> {
        let rest = self.buffer.trim();
        (!rest.is_empty()).then(|| rest.to_string())
    }
}

fn is_set_term(trimmed: &str) -> bool {
    trimmed
        .get(..SET_TERM.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(SET_TERM))
}

/// Result of splitting a script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitScript {
    /// Statements in script order.
    pub statements: Vec<Statement>,
    /// Text after the last terminator that never completed a statement.
    pub discarded: Option<String>,
}

/// Split a script and keep any discarded trailing text.
pub fn split_script_detailed(script: &str) -> SplitScript {
    let (state, statements) = script_lines(script).fold(
        (SplitState::new(), Vec::new()),
        |(state, mut statements), line| {
            let (next, statement) = state.step(line);
            statements.extend(statement);
            (next, statements)
        },
    );

    SplitScript {
        statements,
        discarded: state.finish(),
    }
}

/// Lines of `script` without their line breaks; a final line break does not
/// start another line.
fn script_lines(script: &str) -> impl Iterator<Item = &str> {
    let is_break = |c: char| c == '\r' || c == '\n';
    let body = script
        .strip_suffix("\r\n")
        .or_else(|| script.strip_suffix(is_break))
        .unwrap_or(script);
    body.split("\r\n").flat_map(move |chunk| chunk.split(is_break))
}

/// Split a script into executable statements.
///
/// Unterminated trailing text is dropped.
pub fn split_script(script: &str) -> Vec<Statement> {
    split_script_detailed(script).statements
}
