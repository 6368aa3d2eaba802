use std::fmt;

use crate::ast::LiteralValue;

/// Runtime value produced by evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
    Bool(bool),
    Nil,
}

impl Value {
    /// `nil` and `false` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            _ => true,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Name of the value's dynamic type, used in log output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Nil => "nil",
        }
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Number(n) => Value::Number(*n),
            LiteralValue::Str(s) => Value::String(s.clone()),
            LiteralValue::True => Value::Bool(true),
            LiteralValue::False => Value::Bool(false),
            LiteralValue::Nil => Value::Nil,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write_number(f, *n, false),

            Value::String(s) => write!(f, "{}", s),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Nil => write!(f, "nil"),
        }
    }
}

/// Largest magnitude printed through the integer fast path.
const EXACT_INT_LIMIT: f64 = 1e15;

/// Writes `n` in Lox's textual form.  Integral values print without a
/// fractional part unless `keep_fraction` is set, in which case `.0` is
/// appended (`3` vs `3.0`).
pub(crate) fn write_number<W: fmt::Write>(out: &mut W, n: f64, keep_fraction: bool) -> fmt::Result {
    if n.fract() != 0.0 || !n.is_finite() {
        return write!(out, "{}", n);
    }

    if n.abs() < EXACT_INT_LIMIT {
        if n == 0.0 && n.is_sign_negative() {
            out.write_char('-')?;
        }

        let mut buf = itoa::Buffer::new();
        out.write_str(buf.format(n as i64))?;
    } else {
        write!(out, "{}", n)?;
    }

    if keep_fraction {
        out.write_str(".0")?;
    }

    Ok(())
}
