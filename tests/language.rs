use quarkdsl::{
    Error, execute, execute_with,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{ExecutionConfig, MAX_CALL_DEPTH, MAX_ITERATIONS},
        value::core::Value,
    },
    try_execute, try_execute_with,
};

fn seeded() -> ExecutionConfig {
    ExecutionConfig { seed: Some(7),
                      ..ExecutionConfig::default() }
}

fn run_main(src: &str) -> quarkdsl::interpreter::evaluator::core::Execution {
    try_execute_with(src, "main", &seeded()).unwrap_or_else(|e| panic!("Script failed: {e}\n{src}"))
}

fn assert_returns(src: &str, expected: &str) {
    let run = run_main(src);
    assert_eq!(run.return_value.to_string(), expected, "script:\n{src}");
}

fn assert_failure(src: &str) -> Error {
    match try_execute_with(src, "main", &seeded()) {
        Ok(run) => panic!("Script succeeded with {} but was expected to fail", run.return_value),
        Err(e) => e,
    }
}

#[test]
fn arithmetic_follows_precedence() {
    assert_returns("fn main() -> int { let x = 5; let y = 10; return x + y * 2 - 14; }", "11");
    assert_returns("fn main() -> int { return (2 + 3) * 4; }", "20");
    assert_returns("fn main() -> int { return 17 % 5; }", "2");
    assert_returns("fn main() -> float { return 7 / 2; }", "3.5");
    assert_returns("fn main() -> int { return -3 - -3; }", "0");
}

#[test]
fn division_by_zero_is_infinite() {
    assert_returns("fn main() -> float { return 1 / 0; }", "Infinity");
    assert_returns("fn main() -> float { return -1 / 0; }", "-Infinity");
    assert_returns("fn main() -> float { return 0 / 0; }", "NaN");
}

#[test]
fn comparisons_and_logic_yield_booleans() {
    assert_returns("fn main() -> bool { return 1 < 2; }", "true");
    assert_returns("fn main() -> bool { return 2 <= 1; }", "false");
    assert_returns("fn main() -> bool { return 1 == 1.0; }", "true");
    assert_returns("fn main() -> bool { return true == 1; }", "true");
    assert_returns("fn main() -> bool { return 1 < 2 && 3 > 4; }", "false");
    assert_returns("fn main() -> bool { return 0 || 5; }", "true");
    assert_returns("fn main() -> bool { return !0; }", "true");
}

#[test]
fn booleans_coerce_in_arithmetic() {
    assert_returns("fn main() -> int { return true + true; }", "2");
    assert_returns("fn main() -> int { return -false; }", "0");
}

#[test]
fn for_loop_accumulates() {
    assert_returns("fn main() -> int { let s = 0; for i in 0..10 { s = s + i; } return s; }",
                   "45");
}

#[test]
fn for_loop_with_empty_range_never_runs() {
    assert_returns("fn main() -> int { let s = 7; for i in 0..0 { s = 1; } return s; }", "7");
    assert_returns("fn main() -> int { let s = 7; for i in 5..2 { s = 1; } return s; }", "7");
}

#[test]
fn loop_variable_outlives_the_loop() {
    assert_returns("fn main() -> int { for i in 0..4 { } return i; }", "4");
}

#[test]
fn user_functions_receive_arguments_in_order() {
    assert_returns("fn sub(a: int, b: int) -> int { return a - b; }
                    fn main() -> int { return sub(10, 4); }",
                   "6");
    assert_returns("fn add(a: int, b: int) -> int { return a + b; }
                    fn main() -> int { return add(10, 20); }",
                   "30");
}

#[test]
fn recursion_works() {
    assert_returns("fn fact(n: int) -> int { if n <= 1 { return 1; } return n * fact(n - 1); }
                    fn main() -> int { return fact(10); }",
                   "3628800");
}

#[test]
fn conditionals_pick_one_branch() {
    let src = "fn classify(n: int) -> int {
                   if n < 0 { return -1; } else if n == 0 { return 0; } else { return 1; }
               }
               fn main() -> int { return classify(-5) * 100 + classify(0) * 10 + classify(9); }";
    assert_returns(src, "-99");
}

#[test]
fn early_return_skips_the_rest() {
    let run = run_main("fn main() -> int { println(1); return 2; println(3); }");
    assert_eq!(run.return_value, Value::Number(2.0));
    assert_eq!(run.output, vec!["1"]);
}

#[test]
fn falling_off_the_end_returns_zero() {
    assert_returns("fn main() -> void { let x = 1; }", "0");
    assert_returns("fn main() -> void { return; }", "0");
    assert_returns("fn main() -> int { if false { return 1; } }", "0");
}

#[test]
fn print_joins_arguments_with_spaces() {
    let run = run_main("fn main() -> int { print(1, true); println([1, 2.5], 3); println(); return 0; }");
    assert_eq!(run.output, vec!["1 true", "[1, 2.5] 3", ""]);
}

#[test]
fn math_builtins() {
    assert_returns("fn main() -> float { return sqrt(16); }", "4");
    assert_returns("fn main() -> float { return abs(-2.5); }", "2.5");
    assert_returns("fn main() -> float { return floor(2.7) + ceil(2.2); }", "5");
    assert_returns("fn main() -> float { return round(2.5); }", "3");
    assert_returns("fn main() -> float { return round(-2.5); }", "-2");
    assert_returns("fn main() -> float { return log(1) + exp(0); }", "1");
    assert_returns("fn main() -> float { return min(3, 1, 2) + max([4, 9, 2]); }", "10");
    assert_returns("fn main() -> float { return min(); }", "Infinity");
    assert_returns("fn main() -> int { return len([1, 2, 3]); }", "3");
}

#[test]
fn random_is_in_unit_interval() {
    assert_returns("fn main() -> bool { let r = random(); return r >= 0 && r < 1; }", "true");
}

#[test]
fn arrays_index_and_mutate() {
    assert_returns("fn main() -> int { let a = [10, 20, 30]; a[1] = 5; return a[0] + a[1] + a[2]; }",
                   "45");
    assert_returns("fn main() -> int { let m = [[1, 2], [3, 4]]; return m[1][0]; }", "3");
}

#[test]
fn arrays_are_shared_by_reference() {
    let src = "fn poke(a: [int]) -> void { a[0] = 99; }
               fn main() -> int { let a = [1, 2]; let b = a; poke(b); return a[0]; }";
    assert_returns(src, "99");
}

#[test]
fn map_applies_user_and_builtin_functions() {
    let run = run_main("fn square(x: int) -> int { return x * x; }
                        fn main() -> int { println(map(square, [1, 2, 3])); println(map(sqrt, [4, 9])); return 0; }");
    assert_eq!(run.output, vec!["[1, 4, 9]", "[2, 3]"]);
}

#[test]
fn map_runs_nested_calls() {
    let src = "fn inc(x: int) -> int { return x + 1; }
               fn twice(x: int) -> int { return inc(inc(x)); }
               fn main() -> int { let r = map(twice, [0, 10]); return r[0] + r[1]; }";
    assert_returns(src, "14");
}

#[test]
fn map_recurses_through_itself() {
    let src = "fn f(x: int) -> int { if x > 2000 { return x; } let r = map(f, [x + 1]); return r[0]; }
               fn main() -> int { return f(0); }";
    assert_returns(src, "2001");
}

#[test]
fn map_collects_every_element_of_a_user_function() {
    let src = "fn neg(x: int) -> int { return -x; }
               fn main() -> int { let a = [1, 2, 3]; let b = map(neg, a); let e = map(neg, []); println(b, e, a); return len(b); }";
    let run = run_main(src);
    assert_eq!(run.output, vec!["[-1, -2, -3] [] [1, 2, 3]"]);
    assert_eq!(run.return_value, Value::Number(3.0));
}

#[test]
fn map_of_an_unknown_function_fails() {
    let err = assert_failure("fn main() -> int { let r = map(nothing, []); return 0; }");
    assert!(matches!(err, Error::Runtime(RuntimeError::UndefinedFunction { .. })), "{err}");
}

#[test]
fn self_containing_arrays_print_a_marker() {
    let run = run_main("fn main() -> int { let a = [1, 2]; a[0] = a; let b = [a, a]; println(a); println(b); return 0; }");
    assert_eq!(run.output, vec!["[[...], 2]", "[[[...], 2], [[...], 2]]"]);
}

#[test]
fn self_containing_arrays_serialize() {
    let result = execute_with("fn main() -> int { let a = [1]; a[0] = a; return a; }", "main", &seeded());
    assert!(result.success, "{:?}", result.error);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["returnValue"], serde_json::json!(["[...]"]));
}

#[test]
fn gate_synonyms_reach_the_simulator() {
    let run = run_main("fn main() -> int {
                            hadamard(0); pauli_x(1); pauli_y(1); pauli_z(0);
                            y(2); z(2); cz(0, 1);
                            return 0;
                        }");
    assert_eq!(run.gate_log,
               vec!["H q0", "X q1", "Y q1", "Z q0", "Y q2", "Z q2", "CZ q0, q1"]);
}

#[test]
fn bell_state_is_correlated() {
    let src = "@quantum fn bell() -> int { h(0); cx(0, 1); return 0; }
               fn main() -> int { bell(); return 0; }";
    let run = run_main(src);

    assert_eq!(run.gate_log, vec!["H q0", "CX q0, q1"]);
    assert_eq!(run.quantum_counts.values().sum::<usize>(), 1024);
    for outcome in run.quantum_counts.keys() {
        assert!(outcome == "00000000" || outcome == "00000011", "unexpected outcome {outcome}");
    }
    assert_eq!(run.quantum_counts.len(), 2);
}

#[test]
fn measurement_collapses_the_state() {
    let src = "fn main() -> int { h(0); cnot(0, 1); let a = measure(0); let b = measure(1); return a == b; }";
    let run = run_main(src);
    assert_eq!(run.return_value, Value::Bool(true));
    assert_eq!(run.quantum_counts.len(), 1);
    assert!(run.gate_log[2].starts_with("MEASURE q0 -> "));
}

#[test]
fn rotation_gates_log_their_angle() {
    let run = run_main("fn main() -> int { rx(0.5, 0); ry(1, 1); rz(0.25, 2); return 0; }");
    assert_eq!(run.gate_log, vec!["RX(0.5000) q0", "RY(1.0000) q1", "RZ(0.2500) q2"]);
}

#[test]
fn x_gate_flips_a_qubit() {
    let run = run_main("fn main() -> int { x(2); return measure(2); }");
    assert_eq!(run.return_value, Value::Number(1.0));
    assert_eq!(run.quantum_counts.get("00000100"), Some(&1024));
}

#[test]
fn default_entry_runs_with_entropy() {
    let result = execute("fn main() -> int { return 1; }", "main");
    assert!(result.success);
    assert_eq!(result.quantum_counts.unwrap().get("00000000"), Some(&1024));
}

#[test]
fn entry_function_starts_without_locals() {
    let err = try_execute("fn main(x: int) -> int { return x; }", "main").unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::UndefinedVariable { .. })));
}

#[test]
fn missing_entry_point_is_reported() {
    let result = execute("fn helper() -> int { return 1; }", "main");
    assert!(!result.success);
    assert!(result.error.unwrap().contains("'main'"));
    assert!(result.output.is_empty());
}

#[test]
fn duplicate_functions_are_rejected() {
    let err = assert_failure("fn main() -> int { return 1; } fn main() -> int { return 2; }");
    assert_eq!(err.stage(), "compile");
}

#[test]
fn runtime_errors() {
    assert_failure("fn main() -> int { return y; }");
    assert_failure("fn main() -> int { return nope(1); }");
    assert_failure("fn main() -> int { return [1] + 1; }");
    assert_failure("fn main() -> int { let a = [1, 2]; return a[2]; }");
    assert_failure("fn main() -> int { let a = [1, 2]; return a[-1]; }");
    assert_failure("fn main() -> int { let a = [1, 2]; return a[0.5]; }");
    assert_failure("fn main() -> int { let a = 3; return a[0]; }");
    assert_failure("fn main() -> int { return sqrt(1, 2); }");
    assert_failure("fn f(a: int) -> int { return a; } fn main() -> int { return f(); }");
    assert_failure("fn main() -> int { h(8); return 0; }");
    assert_failure("fn main() -> int { cx(1, 1); return 0; }");
    assert_failure("fn main() -> int { h(1.5); return 0; }");
}

#[test]
fn infinite_loop_hits_the_iteration_limit() {
    let err = assert_failure("fn spin() -> int { for i in 0..1000000 { } return 0; }
                              fn main() -> int { return spin(); }");
    assert!(matches!(err,
                     Error::Runtime(RuntimeError::IterationLimitExceeded { limit: MAX_ITERATIONS })));
}

#[test]
fn iteration_limit_is_configurable() {
    let config = ExecutionConfig { max_iterations: 10,
                                   ..seeded() };
    let result = execute_with("fn main() -> int { let s = 0; for i in 0..100 { s = s + 1; } return s; }",
                              "main",
                              &config);
    assert!(!result.success);
    assert!(result.error.unwrap().contains("10 instructions"));
}

#[test]
fn unbounded_recursion_hits_the_call_depth_limit() {
    let config = ExecutionConfig { max_iterations: 1_000_000,
                                   ..seeded() };
    let err = try_execute_with("fn down(n: int) -> int { return down(n + 1); }
                                fn main() -> int { return down(0); }",
                               "main",
                               &config).unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::CallDepthExceeded { limit: MAX_CALL_DEPTH })));
}

#[test]
fn deep_recursion_fits_in_the_instruction_budget() {
    let src = "fn sum(n: int) -> int { if n == 0 { return 0; } return n + sum(n - 1); }
               fn main() -> int { return sum(2000); }";
    assert_returns(src, "2001000");
}

#[test]
fn call_depth_is_configurable() {
    let config = ExecutionConfig { max_call_depth: 50,
                                   ..seeded() };
    let err = try_execute_with("fn down(n: int) -> int { if n == 0 { return 0; } return down(n - 1); }
                                fn main() -> int { return down(100); }",
                               "main",
                               &config).unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::CallDepthExceeded { limit: 50 })));
}

#[test]
fn errors_report_their_stage() {
    assert_eq!(assert_failure("fn main() -> int { return 1 # 2; }").stage(), "lex");
    assert_eq!(assert_failure("fn main() -> int { return 1 +; }").stage(), "parse");
    assert_eq!(assert_failure("fn main() -> int { return q; }").stage(), "runtime");
}

#[test]
fn execute_result_serializes_in_camel_case() {
    let result = execute_with("fn main() -> int { println(1); return 2; }", "main", &seeded());
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["returnValue"], 2.0);
    assert_eq!(json["output"][0], "1");
    assert_eq!(json["quantumCounts"]["00000000"], 1024);
    assert!(json["gateLog"].as_array().unwrap().is_empty());
    assert!(json.get("error").is_none());
}

#[test]
fn sums_an_array_in_a_loop() {
    assert_returns("fn main() -> int {
                        let a = [1, 2, 3, 4, 5];
                        let s = 0;
                        for i in 0..5 { s = s + a[i]; }
                        return s;
                    }",
                   "15");
}

#[test]
fn branch_on_a_variable() {
    assert_returns("fn main() -> int { let x = 10; if x > 5 { return 1 } else { return 0 } }",
                   "1");
}

#[test]
fn bell_measurements_agree_across_trials() {
    let src = "fn main() -> int { h(0); cx(0, 1); let a = measure(0); let b = measure(1); return a * 10 + b; }";
    for seed in 0..50 {
        let config = ExecutionConfig { seed: Some(seed),
                                       ..ExecutionConfig::default() };
        let run = try_execute_with(src, "main", &config).unwrap();
        let Value::Number(n) = run.return_value else {
            panic!("expected a number");
        };
        assert!(n == 0.0 || n == 11.0, "seed {seed} gave {n}");
    }
}

#[test]
fn execute_never_escapes_with_an_error() {
    for src in ["", "fn", "fn main() -> int { return 1 / ; }", "@quantum fn main() -> int { h(99); }"] {
        let result = execute(src, "main");
        assert!(!result.success);
        assert!(result.error.is_some());
    }
}
