//! mxcalc command line
//!
//! Reads lines from stdin and evaluates each against the matrix table:
//! - `A = [[1, 2], [3, 4]]` stores a matrix literal
//! - `A = identity 3x3` stores a generated matrix
//! - `A = B * inv(C)` stores an expression result (matrices only)
//! - anything else is evaluated and printed
//!
//! `--context table.json` preloads the table from a JSON object mapping
//! labels to nested arrays; `--seed N` fixes the generator seed.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use mxcalc::{CalcError, Matrix, MatrixCalculator, Value};
use tracing::{debug, warn};

struct Args {
    context_path: Option<String>,
    seed: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        context_path: None,
        seed: None,
    };
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--context" => {
                args.context_path = Some(
                    iter.next()
                        .ok_or_else(|| "--context requires a file path".to_string())?,
                );
            }
            "--seed" => {
                let raw = iter
                    .next()
                    .ok_or_else(|| "--seed requires a number".to_string())?;
                args.seed = Some(
                    raw.parse()
                        .map_err(|_| format!("invalid seed: {}", raw))?,
                );
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(args)
}

/// Load a JSON table of `label -> nested rows` into the calculator.
fn load_context(calc: &mut MatrixCalculator, path: &str) -> Result<(), String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))?;
    let table: HashMap<String, Vec<Vec<f64>>> =
        serde_json::from_str(&raw).map_err(|e| format!("invalid JSON in {}: {}", path, e))?;

    for (label, rows) in table {
        let matrix =
            Matrix::from_rows(rows).map_err(|e| format!("matrix {}: {}", label, e))?;
        calc.insert(label, matrix);
    }
    Ok(())
}

/// `A = ...` with a single identifier on the left.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let (lhs, rhs) = line.split_once('=')?;
    let label = lhs.trim();
    if !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some((label, rhs.trim()))
    } else {
        None
    }
}

/// `identity 3x3` style factory request.
fn parse_factory(rhs: &str) -> Option<(&str, usize, usize)> {
    let mut parts = rhs.split_whitespace();
    let kind = parts.next()?;
    let dims = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let (rows, cols) = dims.split_once('x')?;
    Some((kind, rows.parse().ok()?, cols.parse().ok()?))
}

fn assign(calc: &mut MatrixCalculator, label: &str, rhs: &str) {
    // Literal first, then factory syntax, then a full expression.
    if let Ok(rows) = serde_json::from_str::<Vec<Vec<f64>>>(rhs) {
        match Matrix::from_rows(rows) {
            Ok(matrix) => {
                println!("{} = {}", label, matrix);
                calc.insert(label, matrix);
            }
            Err(err) => report(&err),
        }
        return;
    }

    if let Some((kind, rows, cols)) = parse_factory(rhs) {
        match calc.create(kind, rows, cols) {
            Ok(creation) => {
                if let Some(note) = &creation.error_message {
                    warn!("{}", note);
                    eprintln!("note: {}", note);
                }
                println!("{} = {}", label, creation.data);
                calc.insert(label, creation.data);
                return;
            }
            Err(CalcError::Domain { .. }) => {
                // Not a known kind tag; fall through to expression handling.
                debug!(kind, "not a factory kind, trying as expression");
            }
            Err(err) => {
                report(&err);
                return;
            }
        }
    }

    match calc.evaluate(rhs) {
        Ok(Value::Matrix(matrix)) => {
            println!("{} = {}", label, matrix);
            calc.insert(label, matrix);
        }
        Ok(other) => eprintln!(
            "error: can only assign a matrix to {}, got {}",
            label,
            other.type_name()
        ),
        Err(err) => report(&err),
    }
}

fn report(err: &CalcError) {
    eprintln!("error[{}]: {}", err.code(), err);
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("usage: mxcalc [--context table.json] [--seed N]");
            return ExitCode::FAILURE;
        }
    };

    let mut calc = match args.seed {
        Some(seed) => MatrixCalculator::with_seed(seed),
        None => MatrixCalculator::new(),
    };

    if let Some(path) = &args.context_path {
        if let Err(message) = load_context(&mut calc, path) {
            eprintln!("error: {}", message);
            return ExitCode::FAILURE;
        }
        debug!(matrices = calc.matrices().len(), "context loaded");
    }

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("error: {}", e);
                break;
            }
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        if let Some((label, rhs)) = split_assignment(line) {
            assign(&mut calc, label, rhs);
            continue;
        }

        match calc.evaluate(line) {
            Ok(value) => println!("{}", value),
            Err(err) => report(&err),
        }
    }

    ExitCode::SUCCESS
}
