use quarkdsl::{
    ast::{Domain, Expression, Function, Program, Statement, Type},
    error::CompileError,
    interpreter::{
        bytecode::{Instruction, Module},
        compiler::{
            core::{FunctionBuilder, compile},
            expression::{CallKind, classify_call},
            labels::Labels,
        },
        lexer::tokenize,
        parser::core::parse,
    },
};

fn lower(src: &str) -> Module {
    let tokens = tokenize(src).unwrap();
    compile(&parse(&tokens).unwrap()).unwrap_or_else(|e| panic!("Lowering failed: {e}"))
}

fn instructions(src: &str, name: &str) -> Vec<Instruction> {
    lower(src).function(name)
              .unwrap_or_else(|| panic!("no function '{name}'"))
              .instructions
              .clone()
}

fn function(name: &str, body: Vec<Statement>) -> Function {
    Function { name: name.to_string(),
               params: Vec::new(),
               return_type: Type::Int,
               body,
               domain: Domain::Classical }
}

#[test]
fn return_of_arithmetic() {
    assert_eq!(instructions("fn main() -> int { return 1 + 2 * 3; }", "main"),
               vec![Instruction::PushNumber(1.0),
                    Instruction::PushNumber(2.0),
                    Instruction::PushNumber(3.0),
                    Instruction::Mul,
                    Instruction::Add,
                    Instruction::Return]);
}

#[test]
fn missing_return_gets_an_epilogue() {
    assert_eq!(instructions("fn main() -> void { let x = true; }", "main"),
               vec![Instruction::PushBool(true),
                    Instruction::Store("x".to_string()),
                    Instruction::PushNumber(0.0),
                    Instruction::Return]);
}

#[test]
fn empty_function_returns_zero() {
    assert_eq!(instructions("fn main() -> void {}", "main"),
               vec![Instruction::PushNumber(0.0), Instruction::Return]);
}

#[test]
fn expression_statements_are_popped() {
    assert_eq!(instructions("fn main() -> int { println(1, 2); return 0; }", "main"),
               vec![Instruction::PushNumber(1.0),
                    Instruction::PushNumber(2.0),
                    Instruction::CallBuiltin { name: "println".to_string(),
                                               argc: 2, },
                    Instruction::Pop,
                    Instruction::PushNumber(0.0),
                    Instruction::Return]);
}

#[test]
fn calls_are_classified() {
    let code = instructions("fn f(q: qubit) -> int { return q; }
                             fn main() -> int { h(0); f(1); return sqrt(4); }",
                            "main");
    assert!(code.contains(&Instruction::CallGate { name: "h".to_string(),
                                                   argc: 1, }));
    assert!(code.contains(&Instruction::Call { name: "f".to_string(),
                                               argc: 1, }));
    assert!(code.contains(&Instruction::CallBuiltin { name: "sqrt".to_string(),
                                                      argc: 1, }));

    assert_eq!(classify_call("measure"), CallKind::Gate);
    assert_eq!(classify_call("len"), CallKind::Builtin);
    assert_eq!(classify_call("bell"), CallKind::User);
}

#[test]
fn map_lowers_to_a_prefixed_builtin() {
    assert_eq!(instructions("fn main() -> int { return map(abs, [1]); }", "main"),
               vec![Instruction::PushNumber(1.0),
                    Instruction::MakeArray(1),
                    Instruction::CallBuiltin { name: "map:abs".to_string(),
                                               argc: 1, },
                    Instruction::Return]);
}

#[test]
fn indexed_assignment_pushes_index_then_value() {
    assert_eq!(instructions("fn main() -> void { a[2] = 7; }", "main")[..3],
               [Instruction::PushNumber(2.0),
                Instruction::PushNumber(7.0),
                Instruction::StoreIndex("a".to_string())]);
}

#[test]
fn if_else_jumps_are_patched() {
    let code = instructions("fn main() -> int { if c { return 1; } else { return 2; } }", "main");
    assert_eq!(code,
               vec![Instruction::Load("c".to_string()),
                    Instruction::JumpIfFalse(5),
                    Instruction::PushNumber(1.0),
                    Instruction::Return,
                    Instruction::Jump(7),
                    Instruction::PushNumber(2.0),
                    Instruction::Return,
                    Instruction::PushNumber(0.0),
                    Instruction::Return]);
}

#[test]
fn for_loop_shape() {
    let code = instructions("fn main() -> void { for i in 0..3 { } }", "main");
    assert_eq!(code,
               vec![Instruction::PushNumber(0.0),
                    Instruction::Store("i".to_string()),
                    Instruction::Load("i".to_string()),
                    Instruction::PushNumber(3.0),
                    Instruction::Lt,
                    Instruction::JumpIfFalse(11),
                    Instruction::Load("i".to_string()),
                    Instruction::PushNumber(1.0),
                    Instruction::Add,
                    Instruction::Store("i".to_string()),
                    Instruction::Jump(2),
                    Instruction::PushNumber(0.0),
                    Instruction::Return]);
}

#[test]
fn every_jump_lands_inside_the_function() {
    let module = lower("fn main() -> int {
                            let s = 0;
                            for i in 0..4 { if i % 2 == 0 { s = s + i; } else if i == 3 { s = s - 1; } }
                            return s;
                        }");
    for function in module.functions.values() {
        let len = function.instructions.len();
        for instruction in &function.instructions {
            if let Instruction::Jump(target) | Instruction::JumpIfFalse(target) = instruction {
                assert!(*target < len, "jump to {target} in a body of {len}");
            }
        }
    }
}

#[test]
fn functions_keep_declaration_order_and_domain() {
    let module = lower("fn z() -> int { return 0; } @quantum fn a() -> int { return 0; } @gpu fn m() -> int { return 0; }");
    let names: Vec<_> = module.functions.keys().cloned().collect();
    assert_eq!(names, vec!["z", "a", "m"]);
    assert_eq!(module.functions["a"].domain, Domain::Quantum);
    assert_eq!(module.functions["m"].domain, Domain::Gpu);
}

#[test]
fn duplicate_function_names_are_rejected() {
    let program = Program { functions: vec![function("f", Vec::new()), function("f", Vec::new())] };
    assert_eq!(compile(&program).unwrap_err(),
               CompileError::DuplicateFunction { name: "f".to_string() });
}

#[test]
fn oversized_literals_are_rejected() {
    let body = vec![Statement::Return(Expression::IntLiteral(1 << 60))];
    let program = Program { functions: vec![function("main", body)] };
    assert!(matches!(compile(&program), Err(CompileError::LiteralTooLarge { .. })));
}

#[test]
fn empty_names_are_rejected() {
    let body = vec![Statement::Return(Expression::Variable(String::new()))];
    let program = Program { functions: vec![function("main", body)] };
    assert!(matches!(compile(&program), Err(CompileError::EmptyName { .. })));
}

#[test]
fn labels_resolve_forward_and_backward() {
    let mut labels = Labels::default();
    let back = labels.fresh();
    let forward = labels.fresh();
    labels.place(back, 0);

    let mut code = vec![Instruction::JumpIfFalse(0), Instruction::Jump(0), Instruction::Pop];
    labels.record(0, forward);
    labels.record(1, back);
    labels.place(forward, 2);

    assert!(labels.targets(2));
    assert!(!labels.targets(1));

    labels.resolve(&mut code, "f").unwrap();
    assert_eq!(code, vec![Instruction::JumpIfFalse(2), Instruction::Jump(0), Instruction::Pop]);
}

#[test]
fn unplaced_label_is_an_error() {
    let mut labels = Labels::default();
    let label = labels.fresh();
    labels.record(0, label);

    let mut code = vec![Instruction::Jump(0)];
    assert_eq!(labels.resolve(&mut code, "f"),
               Err(CompileError::UnresolvedLabel { label:    0,
                                                   function: "f".to_string(), }));
}

#[test]
fn builder_appends_epilogue_when_a_label_targets_the_end() {
    let mut builder = FunctionBuilder::new("f");
    let end = builder.fresh_label();
    builder.emit_jump(Instruction::JumpIfFalse, end);
    builder.emit(Instruction::PushNumber(1.0));
    builder.emit(Instruction::Return);
    builder.place(end);

    assert_eq!(builder.finish().unwrap(),
               vec![Instruction::JumpIfFalse(3),
                    Instruction::PushNumber(1.0),
                    Instruction::Return,
                    Instruction::PushNumber(0.0),
                    Instruction::Return]);
}

#[test]
fn listing_shows_domain_and_instructions() {
    let module = lower("@quantum fn bell(q: qubit) -> int { h(q); return 0; }\nfn main() -> int { return bell(0); }");
    let listing = module.to_string();

    assert_eq!(listing,
               "@quantum\n\
                fn bell(q) {\n  \
                0: load q\n  \
                1: call_gate h/1\n  \
                2: pop\n  \
                3: push 0\n  \
                4: return\n\
                }\n\
                \n\
                fn main() {\n  \
                0: push 0\n  \
                1: call bell/1\n  \
                2: return\n\
                }");
}

#[test]
fn instruction_display() {
    assert_eq!(Instruction::PushNumber(2.5).to_string(), "push 2.5");
    assert_eq!(Instruction::JumpIfFalse(4).to_string(), "jump_if_false 4");
    assert_eq!(Instruction::CallBuiltin { name: "len".to_string(),
                                          argc: 1, }.to_string(),
               "call_builtin len/1");
}
