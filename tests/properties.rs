use proptest::prelude::*;
use quarkdsl::{
    compile, execute_with,
    interpreter::{
        evaluator::core::ExecutionConfig,
        lexer::{Token, tokenize},
    },
};

fn config() -> ExecutionConfig {
    ExecutionConfig { seed: Some(1),
                      ..ExecutionConfig::default() }
}

fn returned(src: &str) -> String {
    let result = execute_with(src, "main", &config());
    assert!(result.success, "{src}\n{:?}", result.error);
    result.return_value.map(|v| v.to_string()).unwrap_or_default()
}

proptest! {
    #[test]
    fn tokenizer_never_panics(source in "\\PC{0,64}") {
        if let Ok(tokens) = tokenize(&source) {
            prop_assert_eq!(tokens.last().map(|(t, _)| t), Some(&Token::EndOfInput));
        }
    }

    #[test]
    fn tokenizer_accepts_identifier_soup(source in "[a-z_ (){};,+*/<>=-]{0,80}") {
        prop_assert!(tokenize(&source).is_ok());
    }

    #[test]
    fn front_end_is_deterministic(a in 0i64..1000, b in 1i64..1000, n in 0i64..20) {
        let src = format!("fn main() -> int {{ let s = {a}; for i in 0..{n} {{ s = s + i % {b}; }} return s; }}");
        let first = compile(&src);
        let second = compile(&src);
        prop_assert!(first.success);
        prop_assert_eq!(first.ast, second.ast);
        prop_assert_eq!(first.ir, second.ir);
    }

    #[test]
    fn for_loop_runs_n_times(n in 0u32..300) {
        let src = format!("fn main() -> int {{ let c = 0; for i in 0..{n} {{ c = c + 1; }} return c; }}");
        prop_assert_eq!(returned(&src), n.to_string());
    }

    #[test]
    fn integer_arithmetic_matches_host(a in -1000i64..1000, b in -1000i64..1000, c in -1000i64..1000) {
        let src = format!("fn main() -> int {{ return {a} + {b} * {c} - ({a} - {b}); }}");
        let expected = a + b * c - (a - b);
        prop_assert_eq!(returned(&src), expected.to_string());
    }
}
