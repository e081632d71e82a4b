use std::{collections::BTreeMap, fs};

use quarkdsl::{execute_with, interpreter::evaluator::core::ExecutionConfig};
use walkdir::WalkDir;

fn run_demo(name: &str) -> quarkdsl::ExecuteResult {
    let path = format!("demos/{name}");
    let source = fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path}: {e}"));
    execute_with(&source,
                 "main",
                 &ExecutionConfig { seed: Some(2024),
                                    ..ExecutionConfig::default() })
}

#[test]
fn demos_run() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "qk"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let result = execute_with(&source, "main", &ExecutionConfig::default());
        assert!(result.success,
                "Demo {:?} failed:\n{}\nError: {:?}",
                path,
                source,
                result.error);
    }

    assert!(count > 0, "No demos found in demos/");
}

#[test]
fn sum_demo() {
    let result = run_demo("sum.qk");
    assert_eq!(result.output, vec!["385"]);
}

#[test]
fn arrays_demo() {
    let result = run_demo("arrays.qk");
    assert_eq!(result.output, vec!["[10, 11, 12, 13, 14]"]);
    assert_eq!(result.return_value.map(|v| v.to_string()).as_deref(), Some("1"));
}

#[test]
fn gpu_map_demo() {
    let result = run_demo("gpu_map.qk");
    assert_eq!(result.output, vec!["[2.5, 5, 7.5, 10]", "[1, 2, 3, 4]"]);
    assert_eq!(result.return_value.map(|v| v.to_string()).as_deref(), Some("10"));
}

#[test]
fn bell_demo_agrees() {
    let result = run_demo("bell.qk");
    assert_eq!(result.output, vec!["true"]);
    assert_eq!(result.gate_log.unwrap().len(), 4);
}

#[test]
fn ghz_demo_is_all_or_nothing() {
    let result = run_demo("ghz.qk");
    let counts: BTreeMap<String, usize> = result.quantum_counts.unwrap();

    assert_eq!(counts.values().sum::<usize>(), 1024);
    assert!(counts.keys().all(|k| k == "00000000" || k == "00000111"), "{counts:?}");
    assert_eq!(result.gate_log.unwrap(), vec!["H q0", "CX q0, q1", "CX q1, q2"]);
}

#[test]
fn rotations_demo_prints_builtins() {
    let result = run_demo("rotations.qk");
    assert_eq!(result.output, vec!["1 9 3"]);
    assert_eq!(result.gate_log.unwrap().len(), 6);
}
