
use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

mod builtin;
mod error;
mod number;
mod read;
mod runtime;
mod value;

/// Interpreter for a small parenthesized expression language.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Program file to run; it must hold one top-level form.
    file: PathBuf,
}

fn main() {
    let args = Args::parse();

    let source = fs::read_to_string(&args.file).unwrap_or_else(|err| {
        eprintln!("failed to read '{}': {}", args.file.display(), err);
        process::exit(1);
    });

    let program = read::read(&source).unwrap_or_else(|err| {
        eprintln!("error: {}", err);
        process::exit(1);
    });

    let mut env = builtin::initial_environment();
    if let Err(err) = program.eval(&mut env) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
