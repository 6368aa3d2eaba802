//! Tree‑walking interpreter for a small Lox‑family language.
//!
//! Source text flows through three stages: [`scanner::Scanner`] produces
//! tokens, [`parser::Parser`] builds statement trees, and
//! [`interpreter::Interpreter`] evaluates them against a chain of
//! [`environment::Environment`]s.  Diagnostics from every stage go to a
//! [`error::Reporter`].
//!
//! ```
//! use treelox::error::Diagnostics;
//! use treelox::interpreter::Interpreter;
//! use treelox::{run_source, RunStatus};
//!
//! let mut out: Vec<u8> = Vec::new();
//! let mut interpreter = Interpreter::with_output(&mut out);
//! let mut diagnostics = Diagnostics::new();
//!
//! let status = run_source("var a = 1; { a = a + 1; } print a;", &mut interpreter, &mut diagnostics);
//!
//! assert_eq!(status, RunStatus::Completed);
//! drop(interpreter);
//! assert_eq!(out, b"2\n");
//! ```

pub mod ast;
pub mod ast_printer;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod value;

use std::io::Write;

use log::info;

use error::{LoxError, Reporter};
use interpreter::Interpreter;
use parser::Parser;
use scanner::Scanner;

/// How a batch of source ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    /// At least one lex/parse error; nothing was executed.
    SyntaxError,
    /// Execution stopped at a runtime error.
    RuntimeError,
}

impl RunStatus {
    /// Conventional process exit status for the outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Completed => 0,
            RunStatus::SyntaxError => 65,
            RunStatus::RuntimeError => 70,
        }
    }
}

/// Counts syntax errors on their way to the wrapped reporter.
struct SyntaxTally<'r> {
    inner: &'r mut dyn Reporter,
    syntax_errors: usize,
}

impl Reporter for SyntaxTally<'_> {
    fn report(&mut self, error: LoxError) {
        if error.is_syntax() {
            self.syntax_errors += 1;
        }

        self.inner.report(error);
    }
}

/// Scans, parses and (if the source is free of syntax errors) runs `source`
/// on `interpreter`.  State defined by the batch stays in the interpreter.
pub fn run_source<W: Write>(
    source: &str,
    interpreter: &mut Interpreter<W>,
    reporter: &mut dyn Reporter,
) -> RunStatus {
    let mut tally = SyntaxTally {
        inner: reporter,
        syntax_errors: 0,
    };

    let tokens = Scanner::new(source).scan_tokens(&mut tally);
    let statements = Parser::new(&tokens).parse(&mut tally);

    if tally.syntax_errors > 0 {
        info!(
            "Skipping execution: {} syntax errors",
            tally.syntax_errors
        );

        return RunStatus::SyntaxError;
    }

    if interpreter.interpret(&statements, tally.inner) {
        RunStatus::Completed
    } else {
        RunStatus::RuntimeError
    }
}
