//! Centralised error hierarchy for the **Lox interpreter**.
//!
//! Scanner and parser problems are *recoverable*: they are handed to a
//! [`Reporter`] and processing continues so one pass can surface many of
//! them.  Runtime failures are *fatal* to the current batch and travel up
//! to [`Interpreter::interpret`](crate::interpreter::Interpreter::interpret)
//! as a [`RuntimeError`].
//!
//! The module **does not** print diagnostics itself, except through the
//! opt‑in echo of [`Diagnostics`].

use std::io;
use thiserror::Error;

use log::info;

use crate::token::Token;

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.  `location` is `" at 'lexeme'"` or
    /// `" at end"`.
    #[error("[line {line}] Error{location}: {message}")]
    Parse {
        message: String,
        location: String,
        line: usize,
    },

    /// Runtime evaluation error.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// UTF‑8 decoding failure when ingesting external text.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**; the location is derived from
    /// the offending token.
    pub fn parse<S: Into<String>>(token: &Token<'_>, msg: S) -> Self {
        let message: String = msg.into();

        let location: String = if token.is_eof() {
            " at end".to_string()
        } else {
            format!(" at '{}'", token.lexeme)
        };

        info!(
            "Creating Parse error: line={}, location={}, msg={}",
            token.line, location, message
        );

        LoxError::Parse {
            message,
            location,
            line: token.line,
        }
    }

    /// Scan/parse problems, as opposed to runtime or I/O failures.
    pub fn is_syntax(&self) -> bool {
        matches!(self, LoxError::Lex { .. } | LoxError::Parse { .. })
    }

    pub fn is_runtime(&self) -> bool {
        matches!(self, LoxError::Runtime(_))
    }
}

/// Failure raised while evaluating a program.  Token‑bearing variants keep
/// the offending token's line and lexeme for the diagnostic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// An operator received operands of the wrong dynamic type.
    #[error("{message}\n[line {line}]")]
    TypeMismatch {
        message: String,
        lexeme: String,
        line: usize,
    },

    /// `/` with a right operand of exactly zero.
    #[error("Division by zero.\n[line {line}]")]
    DivisionByZero { lexeme: String, line: usize },

    /// Lookup or assignment of a name no active scope declares.
    #[error("Undefined variable '{name}'.\n[line {line}]")]
    UndefinedVariable { name: String, line: usize },

    /// The print sink refused a write.
    #[error("Failed to write output: {0}")]
    Output(String),
}

impl RuntimeError {
    pub fn type_mismatch<S: Into<String>>(token: &Token<'_>, msg: S) -> Self {
        let message: String = msg.into();

        info!(
            "Creating TypeMismatch error: line={}, operator={}, msg={}",
            token.line, token.lexeme, message
        );

        RuntimeError::TypeMismatch {
            message,
            lexeme: token.lexeme.to_string(),
            line: token.line,
        }
    }

    pub fn division_by_zero(token: &Token<'_>) -> Self {
        info!("Creating DivisionByZero error: line={}", token.line);

        RuntimeError::DivisionByZero {
            lexeme: token.lexeme.to_string(),
            line: token.line,
        }
    }

    pub fn undefined_variable(name: &Token<'_>) -> Self {
        info!(
            "Creating UndefinedVariable error: line={}, name={}",
            name.line, name.lexeme
        );

        RuntimeError::UndefinedVariable {
            name: name.lexeme.to_string(),
            line: name.line,
        }
    }

    /// Source line of the offending token, if the error has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            RuntimeError::TypeMismatch { line, .. }
            | RuntimeError::DivisionByZero { line, .. }
            | RuntimeError::UndefinedVariable { line, .. } => Some(*line),
            RuntimeError::Output(_) => None,
        }
    }
}

impl From<io::Error> for RuntimeError {
    fn from(e: io::Error) -> Self {
        RuntimeError::Output(e.to_string())
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;

// ─────────────────────────────────────────────────────────────────────────────
// Reporting collaborator
// ─────────────────────────────────────────────────────────────────────────────

/// Sink for diagnostics raised by the scanner, parser and interpreter.
///
/// Reporting never stops the caller: the scanner and parser keep going after
/// each report, the interpreter reports once and then aborts its batch.
pub trait Reporter {
    fn report(&mut self, error: LoxError);
}

impl Reporter for Vec<LoxError> {
    fn report(&mut self, error: LoxError) {
        self.push(error);
    }
}

/// The driver's reporter: records every error and optionally echoes each one
/// to stderr as it arrives.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<LoxError>,
    echo: bool,
}

impl Diagnostics {
    /// Silent collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collector that also prints each diagnostic to stderr.
    pub fn echoing() -> Self {
        Self {
            errors: Vec::new(),
            echo: true,
        }
    }

    pub fn errors(&self) -> &[LoxError] {
        &self.errors
    }

    pub fn had_syntax_error(&self) -> bool {
        self.errors.iter().any(LoxError::is_syntax)
    }

    pub fn had_runtime_error(&self) -> bool {
        self.errors.iter().any(LoxError::is_runtime)
    }

    /// Forget everything reported so far (between REPL lines).
    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl Reporter for Diagnostics {
    fn report(&mut self, error: LoxError) {
        if self.echo {
            eprintln!("{}", error);
        }

        self.errors.push(error);
    }
}
