//! Foldy CLI — run a Foldy program given on the command line.
//!
//! Exit codes:
//! - 0: Program terminated (or --check was declined)
//! - 1: Usage or load error
//! - 3: Runtime error

use std::io;
use std::process;

use foldy_engine::Engine;

/// Default tick budget. Pass `-i 0` to run without one.
const DEFAULT_ITERATIONS: u64 = 50_000;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        print_usage();
        process::exit(1);
    }

    let mut code: Option<String> = None;
    let mut check = false;
    let mut iterations = DEFAULT_ITERATIONS;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            "-c" | "--check" => check = true,
            "-i" | "--iterations" => {
                let Some(value) = iter.next() else {
                    eprintln!("error: {arg} requires a value");
                    process::exit(1);
                };
                iterations = match value.parse() {
                    Ok(n) => n,
                    Err(_) => {
                        eprintln!("error: invalid iteration count '{value}'");
                        process::exit(1);
                    }
                };
            }
            other if code.is_none() => code = Some(other.to_string()),
            other => {
                eprintln!("error: unexpected argument '{other}'");
                eprintln!();
                print_usage();
                process::exit(1);
            }
        }
    }

    let Some(code) = code else {
        eprintln!("error: no code given");
        eprintln!();
        print_usage();
        process::exit(1);
    };

    let mut engine = match Engine::new(&code) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    if check && !confirm(&engine, iterations) {
        return;
    }

    if let Err(e) = engine.run(iterations) {
        eprintln!("runtime error: {e}");
        process::exit(3);
    }
}

/// Show the grid and the effective arguments, then ask whether to run.
/// Returns false when the answer is "no".
fn confirm<R, W>(engine: &Engine<R, W>, iterations: u64) -> bool {
    println!();
    println!("Grid:\n{engine}");
    println!();
    println!("Arguments:\n-i, --iterations: {iterations}");
    println!();
    println!("Type \"no\" (without quotes) to cancel execution.");
    println!("Type anything else to continue.");

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    !answer.trim().eq_ignore_ascii_case("no")
}

fn print_usage() {
    eprintln!("Usage: foldy <code> [options]");
    eprintln!();
    eprintln!("Runs Foldy, a 1D programming language that doesn't stay 1D.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --check             Show grid and flags before running code");
    eprintln!("  -i, --iterations ITER   Run for ITER iterations; 0 = run forever");
    eprintln!("                          (default: {DEFAULT_ITERATIONS})");
    eprintln!("  -h, --help              Show this help");
}
