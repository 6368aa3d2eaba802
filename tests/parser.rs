#[cfg(test)]
mod parser_tests {
    use treelox as lox;

    use lox::ast::{Expr, LiteralValue, Stmt};
    use lox::ast_printer::AstPrinter;
    use lox::error::LoxError;
    use lox::parser::Parser;
    use lox::scanner::Scanner;
    use lox::token::Token;

    fn tokens(source: &str) -> Vec<Token<'_>> {
        let mut errors: Vec<LoxError> = Vec::new();
        let tokens = Scanner::new(source).scan_tokens(&mut errors);
        assert!(errors.is_empty(), "unexpected lex errors: {:?}", errors);
        tokens
    }

    /// Parses `source` and prints every statement in prefix form.
    fn parse_printed(source: &str) -> (Vec<String>, Vec<String>) {
        let tokens = tokens(source);
        let mut errors: Vec<LoxError> = Vec::new();
        let statements = Parser::new(&tokens).parse(&mut errors);

        (
            statements.iter().map(AstPrinter::print_stmt).collect(),
            errors.iter().map(|e| e.to_string()).collect(),
        )
    }

    fn print_expr(source: &str) -> String {
        let tokens = tokens(source);
        let mut errors: Vec<LoxError> = Vec::new();
        let expr = Parser::new(&tokens).parse_expression(&mut errors);

        assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
        AstPrinter::print(&expr.expect("expression"))
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(print_expr("1 - 2 - 3"), "(- (- 1.0 2.0) 3.0)");
    }

    #[test]
    fn factor_binds_tighter_than_term() {
        assert_eq!(print_expr("1 + 2 * 3"), "(+ 1.0 (* 2.0 3.0))");
        assert_eq!(print_expr("(1 + 2) * 3"), "(* (group (+ 1.0 2.0)) 3.0)");
    }

    #[test]
    fn precedence_ladder() {
        assert_eq!(
            print_expr("-a * 2 < 3 == !true"),
            "(== (< (* (- a) 2.0) 3.0) (! true))"
        );
        assert_eq!(print_expr("1 >= 2 != nil"), "(!= (>= 1.0 2.0) nil)");
    }

    #[test]
    fn assignment_is_right_associative() {
        assert_eq!(print_expr("a = b = 1.5"), "(= a (= b 1.5))");
    }

    #[test]
    fn literals_keep_their_values() {
        let tokens = tokens("\"hi\" ; 4.25; false;");
        let mut errors: Vec<LoxError> = Vec::new();
        let statements = Parser::new(&tokens).parse(&mut errors);

        let literals: Vec<&LiteralValue> = statements
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Expression(Expr::Literal(lit)) => Some(lit),
                _ => None,
            })
            .collect();

        assert_eq!(
            literals,
            vec![
                &LiteralValue::Str("hi".into()),
                &LiteralValue::Number(4.25),
                &LiteralValue::False
            ]
        );
    }

    #[test]
    fn statements_and_blocks() {
        let (printed, errors) = parse_printed("var a; var b = 1; { print a; b = 2; }");

        assert!(errors.is_empty());
        assert_eq!(
            printed,
            vec![
                "(var a)",
                "(var b 1.0)",
                "(block (print a) (; (= b 2.0)))"
            ]
        );
    }

    #[test]
    fn variable_node_shares_the_scanned_token() {
        let tokens = tokens("x;");
        let mut errors: Vec<LoxError> = Vec::new();
        let statements = Parser::new(&tokens).parse(&mut errors);

        match &statements[0] {
            Stmt::Expression(Expr::Variable(name)) => {
                assert!(std::ptr::eq(*name, &tokens[0]));
            }
            other => panic!("unexpected statement {:?}", other),
        }
    }

    #[test]
    fn invalid_assignment_target() {
        let (printed, errors) = parse_printed("1 = 2; print 3;");

        assert_eq!(errors, vec!["[line 1] Error at '=': Invalid assignment target."]);
        assert_eq!(printed, vec!["(print 3.0)"]);
    }

    #[test]
    fn grouping_is_not_an_assignment_target() {
        let (_, errors) = parse_printed("(a) = 1;");

        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn reports_every_independent_error() {
        let (printed, errors) = parse_printed("print ;\nvar = 1;\nprint 1;");

        assert_eq!(
            errors,
            vec![
                "[line 1] Error at ';': Expect expression.",
                "[line 2] Error at '=': Expect variable name.",
            ]
        );
        assert_eq!(printed, vec!["(print 1.0)"]);
    }

    #[test]
    fn synchronizes_on_statement_keyword() {
        // no ';' after the broken expression: recovery stops at `print`
        let (printed, errors) = parse_printed("1 + ) 2 3 print 4;");

        assert_eq!(errors, vec!["[line 1] Error at ')': Expect expression."]);
        assert_eq!(printed, vec!["(print 4.0)"]);
    }

    #[test]
    fn error_inside_block_keeps_the_rest_of_the_block() {
        let (printed, errors) = parse_printed("{ print ; print 1; }");

        assert_eq!(errors.len(), 1);
        assert_eq!(printed, vec!["(block (print 1.0))"]);
    }

    #[test]
    fn missing_tokens_at_end_of_input() {
        let (_, errors) = parse_printed("{ print 1;");
        assert_eq!(errors, vec!["[line 1] Error at end: Expect '}' after block."]);

        let (_, errors) = parse_printed("print (1");
        assert_eq!(errors, vec!["[line 1] Error at end: Expect ')' after expression."]);

        let (_, errors) = parse_printed("var a = 1");
        assert_eq!(
            errors,
            vec!["[line 1] Error at end: Expect ';' after variable declaration."]
        );

        let (_, errors) = parse_printed("a");
        assert_eq!(errors, vec!["[line 1] Error at end: Expect ';' after expression."]);
    }

    #[test]
    fn parse_expression_rejects_trailing_tokens() {
        let tokens = tokens("1 2");
        let mut errors: Vec<LoxError> = Vec::new();
        let expr = Parser::new(&tokens).parse_expression(&mut errors);

        assert!(expr.is_none());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn empty_input() {
        let (printed, errors) = parse_printed("");
        assert!(printed.is_empty());
        assert!(errors.is_empty());

        let mut errors: Vec<LoxError> = Vec::new();
        assert!(Parser::new(&[]).parse(&mut errors).is_empty());
    }
}
