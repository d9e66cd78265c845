//! Expression Tabulation Example
//!
//! Tabulates an expression over a small box and prints the grid as JSON,
//! one `z` column per line, with `null` for undefined cells.
//!
//! Run with: cargo run --example tabulate -- MODE EXPRESSION X1 X2 Y1 Y2 Z1 Z2
//!
//! For example:
//!   cargo run --example tabulate -- i "100 / (x - y)" -2 2 -2 2 0 0

use std::process::ExitCode;

use gentab::expression::{
    error::TabulateError,
    tabulator::{Bounds, Tabulator},
};

const USAGE: &str = "usage: tabulate MODE EXPRESSION X1 X2 Y1 Y2 Z1 Z2 (MODE is i, d or bi)";

fn parse_bound(text: &str) -> Result<i32, String> {
    text.parse()
        .map_err(|e| format!("invalid bound '{}': {}", text, e))
}

fn run(args: &[String]) -> Result<(), String> {
    let [mode, expression, rest @ ..] = args else {
        return Err(USAGE.to_string());
    };
    let bounds = rest
        .iter()
        .map(|arg| parse_bound(arg))
        .collect::<Result<Vec<_>, _>>()?;
    let [x1, x2, y1, y2, z1, z2] = bounds[..] else {
        return Err(USAGE.to_string());
    };

    let table = Tabulator::new()
        .tabulate_mode(mode, expression, &Bounds::new(x1..=x2, y1..=y2, z1..=z2))
        .map_err(|err| match &err {
            TabulateError::Syntax(syntax) => syntax.format_with_source(expression),
            _ => err.to_string(),
        })?;

    println!("mode: {}", table.kind());
    println!("shape: {:?}", table.shape());
    println!("undefined: {}", table.undefined_count());
    let json = table.to_json();
    for (i, plane) in json.as_array().into_iter().flatten().enumerate() {
        for (j, column) in plane.as_array().into_iter().flatten().enumerate() {
            println!("x={} y={}: {}", x1 + i as i32, y1 + j as i32, column);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
