use std::cell::RefCell;
use std::io::{self, Stdout, Write};
use std::rc::Rc;

use log::{debug, info};

use crate::ast::{Expr, Stmt};
use crate::environment::Environment;
use crate::error::{LoxError, Reporter, RuntimeError};
use crate::token::{Token, TokenType};
use crate::value::Value;

/// Convenient alias for interpreter results.
pub type IResult<T> = Result<T, RuntimeError>;

/// Tree‑walking evaluator.
///
/// The interpreter owns the root environment for its whole lifetime, so a
/// REPL can feed it one parsed line after another and keep its variables.
/// `print` output goes to `W`.
pub struct Interpreter<W: Write = Stdout> {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    out: W,
}

impl Interpreter<Stdout> {
    /// Creates an interpreter printing to stdout.
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Interpreter<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    /// Creates an interpreter printing to `out`.
    pub fn with_output(out: W) -> Self {
        info!("Initializing Interpreter");

        let globals = Rc::new(RefCell::new(Environment::new()));

        Self {
            environment: Rc::clone(&globals),
            globals,
            out,
        }
    }

    /// The root scope shared by every batch run on this interpreter.
    pub fn globals(&self) -> Rc<RefCell<Environment>> {
        Rc::clone(&self.globals)
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Interprets a list of statements (a "program").  The first runtime
    /// error is reported and ends the batch; returns whether every statement
    /// ran.
    pub fn interpret(&mut self, statements: &[Stmt<'_>], reporter: &mut dyn Reporter) -> bool {
        debug!("Interpreting {} statements", statements.len());

        for stmt in statements {
            if let Err(e) = self.execute(stmt) {
                debug!("Runtime error: {}", e);
                reporter.report(LoxError::Runtime(e));

                return false;
            }
        }

        if let Err(e) = self.out.flush() {
            reporter.report(LoxError::Runtime(e.into()));

            return false;
        }

        info!("Interpretation completed successfully");

        true
    }

    /// Executes a single statement.
    pub fn execute(&mut self, stmt: &Stmt<'_>) -> IResult<()> {
        match stmt {
            Stmt::Expression(expr) => {
                debug!("Evaluating expression statement");
                let _ = self.evaluate(expr)?;
                Ok(())
            }

            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.out, "{}", value)?;
                debug!("Printed value: {}", value);
                Ok(())
            }

            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.environment.borrow_mut().define(name.lexeme, value);
                Ok(())
            }

            Stmt::Block(statements) => {
                let scope = Environment::with_enclosing(Rc::clone(&self.environment));
                self.execute_block(statements, scope)
            }
        }
    }

    /// Runs `statements` inside `scope`, then puts the previous environment
    /// back whether or not they failed.
    pub fn execute_block(&mut self, statements: &[Stmt<'_>], scope: Environment) -> IResult<()> {
        debug!("Entering block with {} statements", statements.len());

        let previous = std::mem::replace(&mut self.environment, Rc::new(RefCell::new(scope)));

        let result = statements.iter().try_for_each(|stmt| self.execute(stmt));

        self.environment = previous;

        debug!("Exited block");

        result
    }

    /// Evaluates an expression and returns a Value.
    pub fn evaluate(&mut self, expr: &Expr<'_>) -> IResult<Value> {
        let value = match expr {
            Expr::Literal(literal) => Value::from(literal),
            Expr::Grouping(inner) => self.evaluate(inner)?,
            Expr::Unary { operator, right } => self.evaluate_unary(operator, right)?,
            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right)?,
            Expr::Variable(name) => self.environment.borrow().get(name)?,
            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.environment.borrow_mut().assign(name, value.clone())?;
                debug!("Assigned {} to '{}'", value, name.lexeme);
                value
            }
        };

        debug!("Expression evaluated to: {}", value);

        Ok(value)
    }

    /// Evaluates a unary expression.
    fn evaluate_unary(&mut self, op: &Token<'_>, expr: &Expr<'_>) -> IResult<Value> {
        let right_val = self.evaluate(expr)?;

        match op.token_type {
            TokenType::MINUS => match right_val {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::type_mismatch(op, "Operand must be a number.")),
            },
            TokenType::BANG => Ok(Value::Bool(!right_val.is_truthy())),
            _ => Err(RuntimeError::type_mismatch(op, "Invalid unary operator.")),
        }
    }

    /// Evaluates a binary expression.  Both operands are evaluated, left
    /// first, before any type check.
    fn evaluate_binary(
        &mut self,
        left: &Expr<'_>,
        op: &Token<'_>,
        right: &Expr<'_>,
    ) -> IResult<Value> {
        let left_val = self.evaluate(left)?;
        let right_val = self.evaluate(right)?;

        debug!(
            "Binary '{}' on {} and {}",
            op.lexeme,
            left_val.type_name(),
            right_val.type_name()
        );

        match op.token_type {
            TokenType::PLUS => add(op, left_val, right_val),

            TokenType::MINUS => {
                let (a, b) = number_operands(op, &left_val, &right_val)?;
                Ok(Value::Number(a - b))
            }

            TokenType::STAR => {
                let (a, b) = number_operands(op, &left_val, &right_val)?;
                Ok(Value::Number(a * b))
            }

            TokenType::SLASH => {
                let (a, b) = number_operands(op, &left_val, &right_val)?;
                if b == 0.0 {
                    return Err(RuntimeError::division_by_zero(op));
                }
                Ok(Value::Number(a / b))
            }

            TokenType::GREATER => {
                let (a, b) = number_operands(op, &left_val, &right_val)?;
                Ok(Value::Bool(a > b))
            }

            TokenType::GREATER_EQUAL => {
                let (a, b) = number_operands(op, &left_val, &right_val)?;
                Ok(Value::Bool(a >= b))
            }

            TokenType::LESS => {
                let (a, b) = number_operands(op, &left_val, &right_val)?;
                Ok(Value::Bool(a < b))
            }

            TokenType::LESS_EQUAL => {
                let (a, b) = number_operands(op, &left_val, &right_val)?;
                Ok(Value::Bool(a <= b))
            }

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(is_equal(&left_val, &right_val))),

            TokenType::BANG_EQUAL => Ok(Value::Bool(!is_equal(&left_val, &right_val))),

            _ => Err(RuntimeError::type_mismatch(op, "Invalid binary operator.")),
        }
    }
}

/// `+` adds numbers and concatenates strings; a string on either side pulls a
/// number operand into the concatenation in its display form.
fn add(op: &Token<'_>, left: Value, right: Value) -> IResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
        (Value::String(a), right @ Value::Number(_)) => Ok(Value::String(format!("{}{}", a, right))),
        (left @ Value::Number(_), Value::String(b)) => Ok(Value::String(format!("{}{}", left, b))),
        _ => Err(RuntimeError::type_mismatch(
            op,
            "Operands must be two numbers or two strings.",
        )),
    }
}

fn number_operands(op: &Token<'_>, left: &Value, right: &Value) -> IResult<(f64, f64)> {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(RuntimeError::type_mismatch(op, "Operands must be numbers.")),
    }
}

/// `nil` equals only `nil`; otherwise values of the same kind compare by
/// value and values of different kinds are never equal.
fn is_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Nil, Value::Nil) => true,
        _ => false,
    }
}
