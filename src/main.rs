// ABOUTME: CLI driver - runs a script file or drops into an interactive REPL

use clap::Parser;
use lisp_core::builtins::register_builtins;
use lisp_core::env::Environment;
use lisp_core::eval::eval;
use lisp_core::reader::{self, read_next};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::rc::Rc;

/// A small Lisp interpreter
#[derive(Parser, Debug)]
#[command(name = "lisp")]
#[command(version)]
#[command(about = "Reads and evaluates Lisp source, as a script or an interactive REPL")]
struct CliArgs {
    /// Script file to execute (if omitted, starts the REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let env = Environment::new();
    register_builtins(&env);

    match args.script {
        Some(path) => run_script(&path, &env),
        None => {
            run_repl(&env)?;
            Ok(())
        }
    }
}

/// Reads and evaluates one top-level form at a time, printing a
/// diagnostic for any read or eval error and continuing to the next
/// form rather than aborting the file.
fn run_script(path: &PathBuf, env: &Rc<Environment>) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read script file {}: {}", path.display(), e))?;
    let display_path = path.display();

    let mut remaining = source.as_str();
    loop {
        match read_next(&source, remaining) {
            Ok(None) => break,
            Ok(Some((expr, rest))) => {
                remaining = rest;
                match eval(env, &expr) {
                    Ok(_) => {}
                    Err(e) => {
                        if let lisp_core::value::ValueKind::Error(msg) = &*e.kind {
                            eprintln!("{display_path}:{}: {msg}", e.loc);
                        }
                    }
                }
            }
            Err(e) => {
                eprintln!("{display_path}:{}: {e}", e.loc());
                break;
            }
        }
    }

    Ok(())
}

fn run_repl(env: &Rc<Environment>) -> Result<(), Box<dyn std::error::Error>> {
    let mut rl = DefaultEditor::new()?;
    let history_file = ".lisp_history";
    let _ = rl.load_history(history_file);

    loop {
        match rl.readline("lisp> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                if trimmed == "(quit)" {
                    break;
                }

                match reader::read(trimmed) {
                    Ok(Some(expr)) => match eval(env, &expr) {
                        Ok(result) => println!("=> {result}"),
                        Err(e) => {
                            if let lisp_core::value::ValueKind::Error(msg) = &*e.kind {
                                eprintln!("{}: {msg}", e.loc);
                            }
                        }
                    },
                    Ok(None) => {}
                    Err(e) => eprintln!("{}: {e}", e.loc()),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{err}");
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
    Ok(())
}
