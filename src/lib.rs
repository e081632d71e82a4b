//! # quarkdsl
//!
//! quarkdsl is the core toolchain of a small language that mixes classical,
//! GPU-tagged and quantum-tagged functions. Source text is tokenized, parsed
//! into a syntax tree, lowered to stack bytecode and executed by a stack
//! machine that drives an 8-qubit state-vector simulator.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{collections::BTreeMap, time::Instant};

use serde::Serialize;

use crate::{
    ast::Program,
    interpreter::{
        bytecode::Module,
        compiler::core::compile as lower,
        evaluator::core::{self as evaluator, Execution, ExecutionConfig},
        lexer::tokenize,
        parser::core::parse,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Program`, `Function`, `Statement` and
/// `Expression` types that represent the syntactic structure of source code
/// as a tree. The tree is built by the parser and lowered by the compiler.
///
/// # Responsibilities
/// - Defines function, statement, expression and type nodes for all language
///   constructs.
/// - Carries the inert domain tag of every function.
pub mod ast;
/// Provides unified error types for every pipeline stage.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// lowering or executing code, plus the crate-level [`Error`](error::Error)
/// that wraps them.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, compiler,
///   interpreter, simulator).
/// - Attaches positions or the executing function for context.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, lowering, evaluation and value
/// representations.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, compiler, evaluator,
///   and value types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The quantum state-vector simulator and its gate matrices.
pub mod quantum;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64`, `usize`, and `f64` without silent data
///   loss.
pub mod util;

pub use error::Error;

/// The front-end artifacts of a successful compilation.
#[derive(Debug, Clone)]
pub struct Compiled {
    /// The parsed syntax tree.
    pub program: Program,
    /// The lowered bytecode.
    pub module:  Module,
}

/// The flat result of [`compile`].
///
/// Serializes with camelCase field names; absent fields are omitted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResult {
    /// Whether every stage succeeded.
    pub success: bool,
    /// The syntax tree, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ast:     Option<Program>,
    /// The bytecode module, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ir:      Option<Module>,
    /// The error message, on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error:   Option<String>,
}

/// The flat result of [`execute`].
///
/// Serializes with camelCase field names; absent fields are omitted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResult {
    /// Whether every stage succeeded.
    pub success:        bool,
    /// The value returned by the entry function, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_value:   Option<Value>,
    /// Lines printed by the program.
    pub output:         Vec<String>,
    /// Sampled measurement counts keyed by bit string, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantum_counts: Option<BTreeMap<String, usize>>,
    /// Applied gates and measurements, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate_log:       Option<Vec<String>>,
    /// Elapsed time in milliseconds.
    pub execution_time: f64,
    /// The error message, on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error:          Option<String>,
}

/// Tokenizes, parses and lowers `source`.
///
/// # Errors
/// Returns the first lexical, syntax or lowering error.
///
/// # Example
/// ```
/// let compiled = quarkdsl::try_compile("fn main() -> int { return 1; }").unwrap();
///
/// assert_eq!(compiled.program.functions.len(), 1);
/// assert!(compiled.module.function("main").is_some());
/// ```
pub fn try_compile(source: &str) -> Result<Compiled, Error> {
    let tokens = tokenize(source)?;
    let program = parse(&tokens)?;
    let module = lower(&program)?;
    Ok(Compiled { program, module })
}

/// Compiles and runs `entry` with the default configuration.
///
/// # Errors
/// Returns the first error of any stage.
pub fn try_execute(source: &str, entry: &str) -> Result<Execution, Error> {
    try_execute_with(source, entry, &ExecutionConfig::default())
}

/// Compiles and runs `entry` with an explicit configuration.
///
/// # Errors
/// Returns the first error of any stage.
pub fn try_execute_with(source: &str,
                        entry: &str,
                        config: &ExecutionConfig)
                        -> Result<Execution, Error> {
    let Compiled { module, .. } = try_compile(source)?;
    Ok(evaluator::execute(&module, entry, config)?)
}

/// Compiles `source`, reporting success or a single error message.
///
/// No error escapes this function; failures are folded into the result.
///
/// # Example
/// ```
/// let ok = quarkdsl::compile("@gpu fn double(x: float) -> float { return x * 2.0; }");
/// assert!(ok.success);
/// assert!(ok.ir.is_some());
///
/// let bad = quarkdsl::compile("fn broken( -> int {}");
/// assert!(!bad.success);
/// assert!(bad.error.unwrap().contains("line 1"));
/// ```
#[must_use]
pub fn compile(source: &str) -> CompileResult {
    match try_compile(source) {
        Ok(Compiled { program, module }) => CompileResult { success: true,
                                                            ast:     Some(program),
                                                            ir:      Some(module),
                                                            error:   None, },
        Err(e) => CompileResult { success: false,
                                  ast:     None,
                                  ir:      None,
                                  error:   Some(e.to_string()), },
    }
}

/// Compiles `source` and runs `entry`, reporting success or a single error
/// message.
///
/// # Example
/// ```
/// let source = "
///     fn add(a: int, b: int) -> int { return a + b; }
///     fn main() -> int { return add(10, 20); }
/// ";
/// let result = quarkdsl::execute(source, "main");
///
/// assert!(result.success);
/// assert_eq!(result.return_value.unwrap().to_string(), "30");
/// ```
#[must_use]
pub fn execute(source: &str, entry: &str) -> ExecuteResult {
    execute_with(source, entry, &ExecutionConfig::default())
}

/// Like [`execute`], with an explicit configuration.
#[must_use]
pub fn execute_with(source: &str, entry: &str, config: &ExecutionConfig) -> ExecuteResult {
    let start = Instant::now();
    match try_execute_with(source, entry, config) {
        Ok(run) => ExecuteResult { success:        true,
                                   return_value:   Some(run.return_value),
                                   output:         run.output,
                                   quantum_counts: Some(run.quantum_counts),
                                   gate_log:       Some(run.gate_log),
                                   execution_time: run.execution_time.as_secs_f64() * 1000.0,
                                   error:          None, },
        Err(e) => ExecuteResult { success:        false,
                                  return_value:   None,
                                  output:         Vec::new(),
                                  quantum_counts: None,
                                  gate_log:       None,
                                  execution_time: start.elapsed().as_secs_f64() * 1000.0,
                                  error:          Some(e.to_string()), },
    }
}
