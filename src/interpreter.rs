/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// identifiers, operators, delimiters, keywords and domain annotations. This
/// is the first stage of the pipeline.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line and column.
/// - Skips whitespace and `//` comments.
/// - Reports lexical errors for unrecognized characters.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// a [`Program`](crate::ast::Program): a list of annotated functions with
/// statement bodies.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (functions, statements,
///   expressions, types).
/// - Validates the grammar, reporting the first error with its position.
pub mod parser;
/// The instruction set and bytecode containers.
///
/// Defines the stack-machine [`Instruction`](bytecode::Instruction), compiled
/// functions and the insertion-ordered module, with a textual listing.
pub mod bytecode;
/// The compiler lowers the AST to bytecode.
///
/// # Responsibilities
/// - Emits instructions for every statement and expression.
/// - Resolves forward jumps through labels.
/// - Classifies calls as builtin, gate or user calls.
pub mod compiler;
/// The evaluator module executes bytecode.
///
/// A single operand stack is shared by a stack of call frames. The dispatch
/// loop runs instructions, calls builtins and drives the quantum simulator.
///
/// # Responsibilities
/// - Executes every instruction kind.
/// - Manages frames, including nested host-driven invocations for `map`.
/// - Enforces the iteration and call-depth ceilings.
pub mod evaluator;
/// The value module defines the runtime data types for evaluation.
///
/// Numbers, booleans and shared mutable arrays, with conversion, truthiness
/// and printing rules.
pub mod value;
