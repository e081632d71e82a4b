use quarkdsl::{
    ast::{BinaryOperator, Domain, Expression, Program, Statement, Type, UnaryOperator},
    error::{LexError, ParseError},
    interpreter::{
        lexer::{Position, Token, tokenize},
        parser::core::parse,
    },
};

fn kinds(src: &str) -> Vec<Token> {
    tokenize(src).unwrap().into_iter().map(|(t, _)| t).collect()
}

fn parse_src(src: &str) -> Program {
    let tokens = tokenize(src).unwrap_or_else(|e| panic!("Lexing failed: {e}"));
    parse(&tokens).unwrap_or_else(|e| panic!("Parsing failed: {e}\n{src}"))
}

fn parse_err(src: &str) -> ParseError {
    let tokens = tokenize(src).unwrap();
    match parse(&tokens) {
        Ok(program) => panic!("Parsed {program:?} but expected an error"),
        Err(e) => e,
    }
}

/// Parses `fn main() -> int { return <expr>; }` and returns `<expr>`.
fn returned(expr: &str) -> Expression {
    let program = parse_src(&format!("fn main() -> int {{ return {expr}; }}"));
    match program.functions[0].body.as_slice() {
        [Statement::Return(e)] => e.clone(),
        other => panic!("Unexpected body {other:?}"),
    }
}

#[test]
fn tokenizes_keywords_operators_and_literals() {
    assert_eq!(kinds("let x = 3.5 <= 2 && !true;"),
               vec![Token::Let,
                    Token::Identifier("x".to_string()),
                    Token::Equals,
                    Token::FloatLiteral(3.5),
                    Token::LessEqual,
                    Token::IntLiteral(2),
                    Token::AndAnd,
                    Token::Bang,
                    Token::BoolLiteral(true),
                    Token::Semicolon,
                    Token::EndOfInput]);
}

#[test]
fn identifiers_may_start_with_keywords() {
    assert_eq!(kinds("format letter inner"),
               vec![Token::Identifier("format".to_string()),
                    Token::Identifier("letter".to_string()),
                    Token::Identifier("inner".to_string()),
                    Token::EndOfInput]);
}

#[test]
fn range_is_not_a_float() {
    assert_eq!(kinds("0..10"),
               vec![Token::IntLiteral(0), Token::DotDot, Token::IntLiteral(10), Token::EndOfInput]);
}

#[test]
fn comments_and_unknown_annotations_are_skipped() {
    assert_eq!(kinds("// header\n@inline fn // trailing\n"),
               vec![Token::Fn, Token::EndOfInput]);
}

#[test]
fn tokens_carry_line_and_column() {
    let tokens = tokenize("fn\n  main").unwrap();
    assert_eq!(tokens[0].1, Position { line: 1, column: 1 });
    assert_eq!(tokens[1].1, Position { line: 2, column: 3 });
}

#[test]
fn empty_source_is_just_end_of_input() {
    assert_eq!(kinds(""), vec![Token::EndOfInput]);
    assert_eq!(parse_src("").functions.len(), 0);
}

#[test]
fn unrecognized_character_is_a_lex_error() {
    let err = tokenize("fn main() -> int {\n  return 1 $ 2;\n}").unwrap_err();
    assert_eq!(err,
               LexError::UnrecognizedCharacter { character: '$',
                                                 line:      2,
                                                 column:    12, });
}

#[test]
fn oversized_integer_is_a_lex_error() {
    let err = tokenize("99999999999999999999").unwrap_err();
    assert!(matches!(err, LexError::IntegerTooLarge { .. }));
}

#[test]
fn parses_annotated_functions() {
    let program = parse_src("@gpu fn a() -> void {}\n@quantum fn b(q: qubit) -> int { return 0; }\nfn c() -> int { return 1; }");
    let domains: Vec<_> = program.functions.iter().map(|f| f.domain).collect();
    assert_eq!(domains, vec![Domain::Gpu, Domain::Quantum, Domain::Classical]);
    assert_eq!(program.functions[1].params[0].ty, Type::Qubit);
}

#[test]
fn parses_compound_types() {
    let program = parse_src("fn f(a: [float; 4], b: [int], t: tensor<float>, s: qstate) -> [bool] { return a; }");
    let types: Vec<_> = program.functions[0].params.iter().map(|p| p.ty.clone()).collect();
    assert_eq!(types,
               vec![Type::Array(Box::new(Type::Float), Some(4)),
                    Type::Array(Box::new(Type::Int), None),
                    Type::Tensor(Box::new(Type::Float)),
                    Type::QState]);
    assert_eq!(program.functions[0].return_type, Type::Array(Box::new(Type::Bool), None));
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(returned("1 + 2 * 3"),
               Expression::Binary { op:    BinaryOperator::Add,
                                    left:  Box::new(Expression::IntLiteral(1)),
                                    right: Box::new(Expression::Binary { op:    BinaryOperator::Mul,
                                                                         left:  Box::new(Expression::IntLiteral(2)),
                                                                         right: Box::new(Expression::IntLiteral(3)), }), });
}

#[test]
fn binary_operators_are_left_associative() {
    assert_eq!(returned("8 - 4 - 2"),
               Expression::Binary { op:    BinaryOperator::Sub,
                                    left:  Box::new(Expression::Binary { op:    BinaryOperator::Sub,
                                                                         left:  Box::new(Expression::IntLiteral(8)),
                                                                         right: Box::new(Expression::IntLiteral(4)), }),
                                    right: Box::new(Expression::IntLiteral(2)), });
}

#[test]
fn logical_or_binds_loosest() {
    let Expression::Binary { op, .. } = returned("a && b || c == d") else {
        panic!("expected a binary expression");
    };
    assert_eq!(op, BinaryOperator::Or);
}

#[test]
fn unary_operators_nest() {
    assert_eq!(returned("-!x"),
               Expression::Unary { op:      UnaryOperator::Negate,
                                   operand: Box::new(Expression::Unary { op:      UnaryOperator::Not,
                                                                         operand: Box::new(Expression::Variable("x".to_string())), }), });
}

#[test]
fn postfix_calls_and_indices() {
    assert_eq!(returned("f(1, 2)[0]"),
               Expression::Index { array: Box::new(Expression::Call { function: "f".to_string(),
                                                                      args:     vec![Expression::IntLiteral(1),
                                                                                     Expression::IntLiteral(2)], }),
                                   index: Box::new(Expression::IntLiteral(0)), });
}

#[test]
fn map_is_its_own_expression() {
    assert_eq!(returned("map(square, [1, 2])"),
               Expression::Map { function: "square".to_string(),
                                 array:    Box::new(Expression::ArrayLiteral(vec![Expression::IntLiteral(1),
                                                                                  Expression::IntLiteral(2)])), });
}

#[test]
fn statements_of_every_kind() {
    let program = parse_src("fn main() -> int {
                                 let a: [int] = [1, 2];
                                 a[0] = 5;
                                 let n = 0;
                                 n = n + 1;
                                 for i in 0..3 { n = n + i; }
                                 if n > 2 { n = 0; } else { n = 1; }
                                 println(n);
                                 return n;
                             }");
    let body = &program.functions[0].body;
    assert!(matches!(&body[0], Statement::Let { ty: Some(Type::Array(..)), .. }));
    assert!(matches!(&body[1], Statement::Assign { index: Some(_), .. }));
    assert!(matches!(&body[3], Statement::Assign { index: None, .. }));
    assert!(matches!(&body[4], Statement::For { .. }));
    assert!(matches!(&body[5], Statement::If { else_body: Some(_), .. }));
    assert!(matches!(&body[6], Statement::Expression(Expression::Call { .. })));
    assert!(matches!(&body[7], Statement::Return(Expression::Variable(_))));
}

#[test]
fn else_if_nests_an_if() {
    let program = parse_src("fn main() -> int { if a { } else if b { } else { } }");
    let Statement::If { else_body: Some(else_body), .. } = &program.functions[0].body[0] else {
        panic!("expected an if statement");
    };
    assert!(matches!(else_body.as_slice(), [Statement::If { else_body: Some(_), .. }]));
}

#[test]
fn semicolon_before_closing_brace_is_optional() {
    let program = parse_src("fn main() -> int { println(1); return 2 }");
    assert_eq!(program.functions[0].body.len(), 2);
}

#[test]
fn bare_return_returns_zero() {
    let program = parse_src("fn main() -> void { return; }");
    assert_eq!(program.functions[0].body, vec![Statement::Return(Expression::IntLiteral(0))]);
}

#[test]
fn missing_token_reports_position() {
    let err = parse_err("fn main() -> int {\n  let x 5;\n}");
    assert!(matches!(err, ParseError::UnexpectedToken { line: 2, column: 9, .. }), "{err}");
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn parameters_need_types() {
    assert!(matches!(parse_err("fn f(a) -> int { return a; }"),
                     ParseError::UnexpectedToken { .. }));
}

#[test]
fn unclosed_block_reports_end_of_input() {
    let err = parse_err("fn main() -> int { return 1;");
    assert!(err.to_string().contains("end of input"), "{err}");
}

#[test]
fn stray_top_level_tokens_are_rejected() {
    assert!(matches!(parse_err("let x = 1;"), ParseError::UnexpectedToken { .. }));
}
