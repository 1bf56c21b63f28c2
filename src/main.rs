use std::{fs, path::PathBuf};

use clap::Parser;
use logoscript::interpreter::evaluator::core::{Context, DEFAULT_CORPUS_DIR};
use rustyline::{DefaultEditor, error::ReadlineError};

/// logoscript is an interpreter for a Logo-family language.
///
/// Runs a script given on the command line or in a file, or starts an
/// interactive session when no script is given.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells logoscript to read CONTENTS as a file path instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Logs tokens, parsed programs and procedure calls to standard error.
    #[arg(short, long)]
    debug: bool,

    /// Directory that `load` reads scripts from.
    #[arg(short, long, default_value = DEFAULT_CORPUS_DIR)]
    corpus: PathBuf,

    contents: Option<String>,
}

fn main() {
    let args = Args::parse();

    let level = if args.debug { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()
                                                  .add_directive(level.into()))
                             .with_writer(std::io::stderr)
                             .init();

    let mut context = Context::new().with_corpus_dir(args.corpus);

    let Some(contents) = args.contents else {
        run_repl(&mut context);
        return;
    };

    let script = if args.file {
        fs::read_to_string(&contents).unwrap_or_else(|_| {
                                         eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
                                         std::process::exit(1);
                                     })
    } else {
        contents
    };

    if let Err(e) = context.run_source(&script) {
        eprintln!("{e}");
    }
}

/// Reads instructions line by line until end of input.
///
/// A line starting with `to` opens a definition; the following lines are
/// collected until one ending in `end`, and the whole definition is run at
/// once. Errors are reported and the session continues.
fn run_repl(context: &mut Context) {
    println!("logoscript {}", env!("CARGO_PKG_VERSION"));
    println!("Define procedures with `to NAME ... end`. Press Ctrl+D to exit.");

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Could not start the interactive session: {e}");
            return;
        },
    };

    let mut definition = String::new();

    loop {
        let prompt = if definition.is_empty() { "? " } else { "> " };
        match rl.readline(prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());

                if definition.is_empty() && !starts_definition(&line) {
                    if line.trim().is_empty() {
                        continue;
                    }
                    report(context.run_source(&line));
                    continue;
                }

                definition.push_str(&line);
                definition.push('\n');
                if ends_definition(&line) {
                    report(context.run_source(&definition));
                    definition.clear();
                }
            },
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(e) => {
                eprintln!("Error: {e:?}");
                break;
            },
        }
    }
}

fn starts_definition(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|word| word.eq_ignore_ascii_case("to"))
}

/// A definition closes on a line whose last word is `end`, which also
/// covers a whole `to ... end` typed on one line.
fn ends_definition(line: &str) -> bool {
    line.split_whitespace()
        .next_back()
        .is_some_and(|word| word.eq_ignore_ascii_case("end"))
}

fn report<E: std::fmt::Display>(result: Result<(), E>) {
    if let Err(e) = result {
        eprintln!("{e}");
    }
}
