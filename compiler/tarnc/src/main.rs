//! Tarn front-end driver.
//!
//! Reads a whole module, lexes and parses it, runs the per-declaration
//! implicit elaboration, and prints the resulting declarations. Any
//! failure aborts with a single rendered diagnostic.

mod report;

use std::process::ExitCode;
use tarn_diagnostic::{Diagnostic, ErrorCode};
use tarn_elab::Context;
use tarn_lexer::LexError;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        print_usage();
        return ExitCode::FAILURE;
    }

    match args[1].as_str() {
        "parse" => parse_file(&args[2]),
        "lex" => lex_file(&args[2]),
        other => {
            eprintln!("error: unknown command `{other}`");
            eprintln!();
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("Usage: tarn <command> <file.tarn>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  parse    Parse a module and print its declarations");
    eprintln!("  lex      Print the token stream");
}

fn read_source(path: &str) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(source) => Some(source),
        Err(error) => {
            eprintln!("error: cannot read `{path}`: {error}");
            None
        }
    }
}

fn lex_file(path: &str) -> ExitCode {
    let Some(source) = read_source(path) else {
        return ExitCode::FAILURE;
    };
    match tarn_lexer::lex(&source) {
        Ok(tokens) => {
            for token in tokens.as_slice() {
                println!("{token:?}");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            report::render(&source, &lex_diagnostic(&error));
            ExitCode::FAILURE
        }
    }
}

fn parse_file(path: &str) -> ExitCode {
    let Some(source) = read_source(path) else {
        return ExitCode::FAILURE;
    };
    let tokens = match tarn_lexer::lex(&source) {
        Ok(tokens) => tokens,
        Err(error) => {
            report::render(&source, &lex_diagnostic(&error));
            return ExitCode::FAILURE;
        }
    };
    match tarn_parse::parse_module(&tokens, Context::new()) {
        Ok((decls, _ctx)) => {
            for decl in decls {
                println!("{decl};");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            report::render(&source, &error.to_diagnostic());
            ExitCode::FAILURE
        }
    }
}

/// Lift a lexer error into a diagnostic.
fn lex_diagnostic(error: &LexError) -> Diagnostic {
    let code = match error {
        LexError::UnterminatedString { .. } => ErrorCode::E0001,
        LexError::InvalidCharacter { .. } => ErrorCode::E0002,
        LexError::IntOutOfRange { .. } => ErrorCode::E0003,
        LexError::InvalidEscape { .. } => ErrorCode::E0004,
    };
    Diagnostic::error(code)
        .with_message(error.to_string())
        .with_label(error.span(), "here")
}
