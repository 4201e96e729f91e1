//! cellgrid - line-driven front end for the cell engine.
//!
//! The binary is deliberately thin: it owns a [`Sheet`], feeds it
//! statements (from `-c` or stdin), and prints what queries return. All
//! cell semantics live in the library crates.

use std::io::{self, BufRead};
use std::process;

use anyhow::Context;
use cellgrid_core::{Bounds, Sheet, script};

fn print_usage() {
    eprintln!("Usage: cellgrid [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <SCRIPT>    Run `;`-separated statements and exit");
    eprintln!("      --cols <N>            Grid width in columns (default 26)");
    eprintln!("      --rows <N>            Grid height in rows (default 100)");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Statements: `A1=text` edits a cell (`B2==A1+1` stores the formula");
    eprintln!("`=A1+1`), `?A1` prints a display value, `?` dumps the sheet.");
    eprintln!("Without -c, statements are read line by line from stdin.");
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut command: Option<String> = None;
    let mut cols = 26usize;
    let mut rows = 100usize;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            "-c" | "--command" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --command requires a script");
                    process::exit(1);
                }
                command = Some(args[i].clone());
            }
            "--cols" => {
                i += 1;
                cols = parse_dimension(&args, i, "--cols")?;
            }
            "--rows" => {
                i += 1;
                rows = parse_dimension(&args, i, "--rows")?;
            }
            arg => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut sheet = Sheet::new(Bounds::new(cols, rows));

    if let Some(src) = command {
        let lines = script::run_script(&mut sheet, &src)?;
        for line in lines {
            println!("{line}");
        }
        return Ok(());
    }

    repl(&mut sheet)
}

fn parse_dimension(args: &[String], i: usize, flag: &str) -> anyhow::Result<usize> {
    let value = args
        .get(i)
        .with_context(|| format!("{flag} requires a value"))?;
    value
        .parse()
        .with_context(|| format!("{flag} expects a positive integer, got `{value}`"))
}

fn repl(sheet: &mut Sheet) -> anyhow::Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        // Statement errors are not fatal in the REPL.
        match script::run_script(sheet, &line) {
            Ok(out) => {
                for printed in out {
                    println!("{printed}");
                }
            }
            Err(err) => eprintln!("Error: {err}"),
        }
    }
    Ok(())
}
