use std::env;
use std::error::Error as StdError;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use minidb::{Database, QueryResult};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command-line options: `minidb [--csv] [SCRIPT]`.
#[derive(Debug, Default)]
struct Options {
    csv: bool,
    script: Option<PathBuf>,
}

impl Options {
    fn from_args(args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut options = Self::default();
        for arg in args {
            match arg.as_str() {
                "--csv" => options.csv = true,
                "--help" | "-h" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-v" => {
                    println!("minidb v{VERSION}");
                    process::exit(0);
                }
                flag if flag.starts_with('-') => return Err(format!("unknown option {flag}")),
                path if options.script.is_none() => options.script = Some(PathBuf::from(path)),
                extra => return Err(format!("unexpected argument {extra}")),
            }
        }
        Ok(options)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn StdError>> {
    let options = Options::from_args(env::args().skip(1))?;
    let mut db = Database::new();

    match &options.script {
        Some(path) => {
            let script = fs::read_to_string(path)?;
            let results = db.execute_batch(&script)?;
            for result in results.iter().filter(|r| !r.is_empty()) {
                print_result(result, options.csv);
            }
            Ok(())
        }
        None => interactive_mode(&mut db, options.csv),
    }
}

fn print_help() {
    println!(
        "minidb v{VERSION} - minimal in-memory SQL engine

Usage:
  minidb [--csv] [SCRIPT]

Without SCRIPT an interactive shell reads statements from stdin.
Statements end with ';'. Set RUST_LOG (e.g. RUST_LOG=debug) for engine logs.

Options:
  --csv        print results as CSV instead of a text table
  -h, --help   show this help
  -v, --version"
    );
}

fn print_result(result: &QueryResult, csv: bool) {
    if csv {
        print!("{}", result.to_csv());
    } else {
        println!("{result}");
    }
}

fn interactive_mode(db: &mut Database, csv: bool) -> Result<(), Box<dyn StdError>> {
    println!("minidb v{VERSION}");
    println!("Type '.help' for help, '.quit' to exit\n");

    let stdin = io::stdin();
    let mut buffer = String::new();
    let mut pending = String::new();

    loop {
        print!("{}", if pending.is_empty() { "minidb> " } else { "   ...> " });
        io::stdout().flush()?;

        buffer.clear();
        if stdin.lock().read_line(&mut buffer)? == 0 {
            break;
        }
        let input = buffer.trim();

        if input.starts_with('.') && pending.is_empty() {
            if !run_meta_command(db, input) {
                break;
            }
            continue;
        }
        if input.is_empty() {
            continue;
        }

        pending.push_str(input);
        pending.push('\n');
        if !input.ends_with(';') {
            continue;
        }

        match db.execute_batch(&pending) {
            Ok(results) => {
                for result in &results {
                    if result.is_empty() {
                        println!("OK");
                    } else {
                        print_result(result, csv);
                    }
                }
            }
            Err(e) => {
                eprintln!("Error: {e}");
            }
        }
        pending.clear();
    }

    Ok(())
}

/// Handles a `.command`. Returns `false` when the shell should exit.
fn run_meta_command(db: &Database, input: &str) -> bool {
    let mut parts = input.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(".quit" | ".exit"), _) => return false,
        (Some(".help"), _) => {
            println!(".tables          list tables");
            println!(".schema TABLE    show the columns of TABLE");
            println!(".memory          bytes held by all tables");
            println!(".quit            exit the shell");
        }
        (Some(".tables"), _) => {
            for name in db.list_tables() {
                println!("{name}");
            }
        }
        (Some(".schema"), Some(name)) => match db.get_table(name) {
            Some(table) => {
                for column in table.columns() {
                    println!("{} {}", column.name, column.declared_type);
                }
            }
            None => eprintln!("Error: table {name:?} does not exist"),
        },
        (Some(".memory"), _) => println!("{} bytes", db.memory_usage()),
        _ => eprintln!("Error: unknown command {input}, try .help"),
    }
    true
}
