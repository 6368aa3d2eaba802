use std::cell::RefCell;
use std::rc::Rc;

use treelox as lox;

use lox::environment::Environment;
use lox::error::RuntimeError;
use lox::token::{Token, TokenType};
use lox::value::Value;

fn ident(name: &str) -> Token<'_> {
    Token::new(TokenType::IDENTIFIER, name, 7)
}

#[test]
fn define_and_get() {
    let mut env = Environment::new();
    env.define("a", Value::Number(1.0));

    assert_eq!(env.get(&ident("a")), Ok(Value::Number(1.0)));
}

#[test]
fn define_overwrites() {
    let mut env = Environment::new();
    env.define("a", Value::Number(1.0));
    env.define("a", Value::Nil);

    assert_eq!(env.get(&ident("a")), Ok(Value::Nil));
}

#[test]
fn get_walks_to_enclosing() {
    let root = Rc::new(RefCell::new(Environment::new()));
    root.borrow_mut().define("a", Value::Bool(true));

    let child = Environment::with_enclosing(Rc::clone(&root));

    assert_eq!(child.get(&ident("a")), Ok(Value::Bool(true)));
    assert!(child.enclosing().is_some());
    assert!(root.borrow().enclosing().is_none());
}

#[test]
fn nearest_binding_wins() {
    let root = Rc::new(RefCell::new(Environment::new()));
    root.borrow_mut().define("a", Value::Number(1.0));

    let mut child = Environment::with_enclosing(Rc::clone(&root));
    child.define("a", Value::Number(2.0));

    assert_eq!(child.get(&ident("a")), Ok(Value::Number(2.0)));

    child.assign(&ident("a"), Value::Number(3.0)).unwrap();

    assert_eq!(child.get(&ident("a")), Ok(Value::Number(3.0)));
    assert_eq!(root.borrow().get(&ident("a")), Ok(Value::Number(1.0)));
}

#[test]
fn assign_updates_enclosing_in_place() {
    let root = Rc::new(RefCell::new(Environment::new()));
    root.borrow_mut().define("a", Value::Number(1.0));

    let mut child = Environment::with_enclosing(Rc::clone(&root));
    child
        .assign(&ident("a"), Value::String("x".into()))
        .unwrap();

    assert_eq!(root.borrow().get(&ident("a")), Ok(Value::String("x".into())));
}

#[test]
fn undefined_names_fail() {
    let mut env = Environment::with_enclosing(Rc::new(RefCell::new(Environment::new())));

    let expected = RuntimeError::UndefinedVariable {
        name: "ghost".into(),
        line: 7,
    };

    assert_eq!(env.get(&ident("ghost")), Err(expected.clone()));
    assert_eq!(env.assign(&ident("ghost"), Value::Nil), Err(expected));
    assert_eq!(
        env.get(&ident("ghost")).unwrap_err().to_string(),
        "Undefined variable 'ghost'.\n[line 7]"
    );
}
