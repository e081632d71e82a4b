use std::{fs, process::ExitCode};

use clap::Parser;
use quarkdsl::{
    Error,
    interpreter::evaluator::core::{ExecutionConfig, MAX_ITERATIONS, SHOTS},
    try_compile, try_execute_with,
};
use tracing_subscriber::EnvFilter;

/// quarkdsl compiles and runs programs that mix classical, GPU-tagged and
/// quantum functions on a simulated 8-qubit register.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat `contents` as a path to a source file instead of source text.
    #[arg(short, long)]
    file: bool,

    /// The function to run.
    #[arg(short, long, default_value = "main")]
    entry: String,

    /// Print the syntax tree as JSON and exit.
    #[arg(long)]
    dump_ast: bool,

    /// Print the bytecode listing and exit.
    #[arg(long)]
    dump_ir: bool,

    /// Print the full execution result as JSON.
    #[arg(long)]
    json: bool,

    /// Seed for measurements and `random()`.
    #[arg(long)]
    seed: Option<u64>,

    /// Instruction ceiling before execution is aborted.
    #[arg(long, default_value_t = MAX_ITERATIONS)]
    max_iterations: usize,

    /// Samples drawn from the final quantum state.
    #[arg(long, default_value_t = SHOTS)]
    shots: usize,

    contents: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env())
                             .with_writer(std::io::stderr)
                             .init();

    let args = Args::parse();

    let source = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents.clone()
    };

    match run(&args, &source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args, source: &str) -> Result<(), Error> {
    if args.dump_ast || args.dump_ir {
        let compiled = try_compile(source)?;
        if args.dump_ast {
            match serde_json::to_string_pretty(&compiled.program) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("Failed to serialize the syntax tree: {e}"),
            }
        }
        if args.dump_ir {
            println!("{}", compiled.module);
        }
        return Ok(());
    }

    let config = ExecutionConfig { max_iterations: args.max_iterations,
                                   shots: args.shots,
                                   seed: args.seed,
                                   ..ExecutionConfig::default() };

    if args.json {
        let result = quarkdsl::execute_with(source, &args.entry, &config);
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to serialize the result: {e}"),
        }
        return Ok(());
    }

    let run = try_execute_with(source, &args.entry, &config)?;
    for line in &run.output {
        println!("{line}");
    }
    println!("=> {}", run.return_value);
    if !run.gate_log.is_empty() {
        for (outcome, count) in &run.quantum_counts {
            println!("|{outcome}> {count}");
        }
    }
    Ok(())
}
