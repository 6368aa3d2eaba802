//! Abstract syntax tree produced by the [`Parser`](crate::parser::Parser).
//!
//! Both hierarchies are closed sum types; consumers dispatch with `match`, so
//! adding a variant forces every walker to handle it.  Nodes own their
//! children, while tokens are borrowed from the parser's token slice and may
//! be shared between nodes.

use serde::Serialize;

use crate::token::Token;

/// A **literal constant** that appears directly in the source code.
///
/// The parser copies the value out of the token at parse time, so evaluating
/// a literal never has to look at the token again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiteralValue {
    /// Numeric literal ‑ stored as IEEE‑754 `f64`.
    /// Integral lexemes such as `"3"` are still parsed as `3.0`.
    Number(f64),

    /// String literal without surrounding quotes.
    Str(String),

    /// The boolean constant `true`.
    True,

    /// The boolean constant `false`.
    False,

    /// The `nil` literal (Lox’s `null`).
    Nil,
}

/// **Expression** nodes.  Lifetimes tie token references back to the
/// borrowed token slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr<'a> {
    /// Assignment expression: `identifier "=" expression`
    Assign {
        name: &'a Token<'a>,
        value: Box<Expr<'a>>,
    },

    /// Infix binary operator expression
    /// *Example:* `a + b`, `x <= y`
    Binary {
        left: Box<Expr<'a>>,
        /// Operator token such as `+`, `*`, `==`, …
        operator: &'a Token<'a>,
        right: Box<Expr<'a>>,
    },

    /// Parenthesised sub‑expression: `"(" expression ")"`.
    Grouping(Box<Expr<'a>>),

    /// A literal constant: number, string, `true`, `false`, or `nil`.
    Literal(LiteralValue),

    /// Prefix unary operator expression
    /// *Example:* `!isReady` or `-42`
    Unary {
        /// The operator token (`!` or `-`).
        operator: &'a Token<'a>,
        /// Operand to which the operator is applied.
        right: Box<Expr<'a>>,
    },

    /// Variable access ‑ resolves to the identifier’s current value at runtime.
    Variable(&'a Token<'a>),
}

/// **Statement** nodes.  A program is a sequence of these returned by
/// [`Parser::parse`](crate::parser::Parser::parse).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt<'a> {
    /// Braced scope containing zero or more declarations/statements.
    Block(Vec<Stmt<'a>>),

    /// Stand‑alone expression terminated by a semicolon.
    Expression(Expr<'a>),

    /// `print` statement used for output.
    Print(Expr<'a>),

    /// Variable declaration: `"var" IDENT ("=" initializer)? ";"`.
    /// A missing initializer binds `nil`.
    Var {
        name: &'a Token<'a>,
        initializer: Option<Expr<'a>>,
    },
}
