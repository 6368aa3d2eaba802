use treelox as lox;

use lox::error::{Diagnostics, LoxError, RuntimeError};
use lox::interpreter::Interpreter;
use lox::parser::Parser;
use lox::scanner::Scanner;
use lox::value::Value;
use lox::{run_source, RunStatus};

/// Runs `code` on a fresh interpreter and returns the status, what the program
/// printed, and every diagnostic reported.
fn run(code: &str) -> (RunStatus, String, Vec<LoxError>) {
    let mut buffer: Vec<u8> = Vec::new();
    let mut errors: Vec<LoxError> = Vec::new();

    let status = {
        let mut interpreter = Interpreter::with_output(&mut buffer);
        run_source(code, &mut interpreter, &mut errors)
    };

    let output = String::from_utf8(buffer).expect("utf-8 output");

    (status, output, errors)
}

fn output_of(code: &str) -> String {
    let (status, output, errors) = run(code);

    assert_eq!(status, RunStatus::Completed, "errors: {:?}", errors);

    output
}

/// Evaluates a single expression.
fn eval(source: &str) -> Result<Value, RuntimeError> {
    let mut errors: Vec<LoxError> = Vec::new();
    let tokens = Scanner::new(source).scan_tokens(&mut errors);
    let expr = Parser::new(&tokens)
        .parse_expression(&mut errors)
        .expect("expression parses");

    assert!(errors.is_empty(), "{:?}", errors);

    Interpreter::with_output(Vec::new()).evaluate(&expr)
}

fn runtime_error(code: &str) -> RuntimeError {
    let (status, _, mut errors) = run(code);

    assert_eq!(status, RunStatus::RuntimeError);
    assert_eq!(errors.len(), 1);

    match errors.remove(0) {
        LoxError::Runtime(e) => e,
        other => panic!("expected runtime error, got {:?}", other),
    }
}

#[test]
fn arithmetic_precedence_and_associativity() {
    assert_eq!(eval("1 - 2 - 3"), Ok(Value::Number(-4.0)));
    assert_eq!(eval("1 + 2 * 3"), Ok(Value::Number(7.0)));
    assert_eq!(eval("(1 + 2) * 3"), Ok(Value::Number(9.0)));
    assert_eq!(eval("8 / 2 / 2"), Ok(Value::Number(2.0)));
    assert_eq!(eval("--3"), Ok(Value::Number(3.0)));
}

#[test]
fn comparison_and_equality() {
    assert_eq!(eval("1 < 2"), Ok(Value::Bool(true)));
    assert_eq!(eval("2 <= 2"), Ok(Value::Bool(true)));
    assert_eq!(eval("1 > 2"), Ok(Value::Bool(false)));
    assert_eq!(eval("3 >= 4"), Ok(Value::Bool(false)));
    assert_eq!(eval("1 == 1"), Ok(Value::Bool(true)));
    assert_eq!(eval("1 != 1"), Ok(Value::Bool(false)));
    assert_eq!(eval("\"a\" == \"a\""), Ok(Value::Bool(true)));
    assert_eq!(eval("nil == nil"), Ok(Value::Bool(true)));
    assert_eq!(eval("nil == false"), Ok(Value::Bool(false)));
    assert_eq!(eval("1 == \"1\""), Ok(Value::Bool(false)));
    assert_eq!(eval("true != false"), Ok(Value::Bool(true)));
}

#[test]
fn truthiness() {
    assert_eq!(eval("!nil"), Ok(Value::Bool(true)));
    assert_eq!(eval("!false"), Ok(Value::Bool(true)));
    assert_eq!(eval("!0"), Ok(Value::Bool(false)));
    assert_eq!(eval("!\"\""), Ok(Value::Bool(false)));
    assert_eq!(eval("!!true"), Ok(Value::Bool(true)));
}

#[test]
fn plus_concatenates_strings_and_numbers() {
    assert_eq!(eval("\"x\" + 1"), Ok(Value::String("x1".into())));
    assert_eq!(eval("2.5 + \"y\""), Ok(Value::String("2.5y".into())));
    assert_eq!(eval("\"a\" + \"b\""), Ok(Value::String("ab".into())));
}

#[test]
fn type_mismatches() {
    assert!(matches!(
        eval("-\"a\""),
        Err(RuntimeError::TypeMismatch { ref message, .. }) if message == "Operand must be a number."
    ));
    assert!(matches!(
        eval("true + 1"),
        Err(RuntimeError::TypeMismatch { ref message, .. })
            if message == "Operands must be two numbers or two strings."
    ));
    assert!(matches!(
        eval("\"a\" < 1"),
        Err(RuntimeError::TypeMismatch { ref message, .. }) if message == "Operands must be numbers."
    ));
    assert!(matches!(eval("nil * 2"), Err(RuntimeError::TypeMismatch { .. })));
}

#[test]
fn division_by_zero() {
    assert!(matches!(eval("1 / 0"), Err(RuntimeError::DivisionByZero { .. })));
    assert!(matches!(eval("0 / -0"), Err(RuntimeError::DivisionByZero { .. })));
    assert_eq!(eval("1 / 4"), Ok(Value::Number(0.25)));
}

#[test]
fn print_formats_values() {
    let output = output_of("print 3; print 2.5; print -0.5; print nil; print true; print \"s\"; print 10 / 4;");

    assert_eq!(output, "3\n2.5\n-0.5\nnil\ntrue\ns\n2.5\n");
}

#[test]
fn var_without_initializer_is_nil() {
    assert_eq!(output_of("var a; print a;"), "nil\n");
}

#[test]
fn redeclaration_replaces_binding() {
    assert_eq!(output_of("var a = 1; var a = \"two\"; print a;"), "two\n");
}

#[test]
fn inner_declaration_shadows() {
    assert_eq!(output_of("var a = 1; { var a = 2; } print a;"), "1\n");
}

#[test]
fn assignment_reaches_enclosing_scope() {
    assert_eq!(output_of("var a = 1; { a = 2; } print a;"), "2\n");
}

#[test]
fn assignment_is_an_expression() {
    assert_eq!(output_of("var a; var b; a = b = 3; print a + b;"), "6\n");
}

#[test]
fn variable_scoping() {
    let code = "\
        var a = \"global a\";\n\
        var b = \"global b\";\n\
        var c = \"global c\";\n\
        {\n\
            var a = \"outer a\";\n\
            var b = \"outer b\";\n\
            {\n\
                var a = \"inner a\";\n\
                print a;\n\
                print b;\n\
                print c;\n\
            }\n\
            print a;\n\
            print b;\n\
            print c;\n\
        }\n\
        print a;\n\
        print b;\n\
        print c;";

    let expected = "\
        inner a\n\
        outer b\n\
        global c\n\
        outer a\n\
        outer b\n\
        global c\n\
        global a\n\
        global b\n\
        global c\n";

    assert_eq!(output_of(code), expected);
}

#[test]
fn undefined_variable() {
    let e = runtime_error("print missing;");

    assert_eq!(
        e,
        RuntimeError::UndefinedVariable {
            name: "missing".into(),
            line: 1
        }
    );
    assert_eq!(e.to_string(), "Undefined variable 'missing'.\n[line 1]");
}

#[test]
fn assignment_never_declares() {
    let e = runtime_error("{ fresh = 1; }");

    assert!(matches!(e, RuntimeError::UndefinedVariable { ref name, .. } if name == "fresh"));
}

#[test]
fn block_local_is_gone_after_block() {
    let e = runtime_error("{ var inner = 1; }\nprint inner;");

    assert_eq!(e.line(), Some(2));
}

#[test]
fn output_before_runtime_error_is_kept() {
    let (status, output, errors) = run("print 1;\nprint 2 / 0;\nprint 3;");

    assert_eq!(status, RunStatus::RuntimeError);
    assert_eq!(output, "1\n");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "Division by zero.\n[line 2]");
}

#[test]
fn syntax_errors_prevent_execution() {
    let (status, output, errors) = run("print 1;\nprint ;\nvar = 2;");

    assert_eq!(status, RunStatus::SyntaxError);
    assert_eq!(status.exit_code(), 65);
    assert_eq!(output, "");
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(LoxError::is_syntax));
}

#[test]
fn lex_errors_prevent_execution() {
    let (status, output, _) = run("print 1; @");

    assert_eq!(status, RunStatus::SyntaxError);
    assert_eq!(output, "");
}

#[test]
fn environment_is_restored_after_error_in_block() {
    let mut buffer: Vec<u8> = Vec::new();
    let mut diagnostics = Diagnostics::new();

    {
        let mut interpreter = Interpreter::with_output(&mut buffer);

        let status = run_source(
            "var a = \"outer\"; { var a = \"inner\"; print nope; }",
            &mut interpreter,
            &mut diagnostics,
        );
        assert_eq!(status, RunStatus::RuntimeError);
        assert_eq!(status.exit_code(), 70);

        let status = run_source("print a;", &mut interpreter, &mut diagnostics);
        assert_eq!(status, RunStatus::Completed);
    }

    assert!(diagnostics.had_runtime_error());
    assert!(!diagnostics.had_syntax_error());
    assert_eq!(String::from_utf8(buffer).unwrap(), "outer\n");
}

#[test]
fn state_persists_across_batches() {
    let mut interpreter = Interpreter::with_output(Vec::new());
    let mut diagnostics = Diagnostics::new();

    for line in ["var count = 1;", "count = count + 1;", "print count;"] {
        assert_eq!(
            run_source(line, &mut interpreter, &mut diagnostics),
            RunStatus::Completed
        );
    }

    assert_eq!(interpreter.output().as_slice(), b"2\n");
    assert!(diagnostics.errors().is_empty());
}

#[test]
fn diagnostics_clear_between_lines() {
    let mut interpreter = Interpreter::with_output(Vec::new());
    let mut diagnostics = Diagnostics::new();

    run_source("print ;", &mut interpreter, &mut diagnostics);
    assert!(diagnostics.had_syntax_error());

    diagnostics.clear();
    run_source("print 1;", &mut interpreter, &mut diagnostics);
    assert!(!diagnostics.had_syntax_error());
    assert_eq!(interpreter.into_output(), b"1\n");
}
