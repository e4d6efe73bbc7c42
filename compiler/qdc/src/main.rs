//! querydown CLI
//!
//! Token dumps and lexical checks for query text.

use std::process::ExitCode;

use qdc::commands::{check_file, explain_code, lex_file, list_kinds, Options};
use qdc::CliError;

fn main() -> ExitCode {
    qdc::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_usage();
        return ExitCode::FAILURE;
    };

    let result = match command.as_str() {
        "lex" => Options::parse(&args[1..]).and_then(|(options, path)| {
            let path = path.ok_or(CliError::MissingInput)?;
            lex_file(&path, &options)
        }),
        "check" => Options::parse(&args[1..]).and_then(|(options, path)| {
            let path = path.ok_or(CliError::MissingInput)?;
            check_file(&path, &options)
        }),
        "kinds" => Options::parse(&args[1..]).and_then(|(options, path)| match path {
            Some(extra) => Err(CliError::UnexpectedArgument(extra)),
            None => list_kinds(&options),
        }),
        "explain" => Options::parse(&args[1..])
            .and_then(|(options, code)| explain_code(code.as_deref(), &options)),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(true)
        }
        "version" | "--version" | "-V" => {
            println!("qd {}", env!("CARGO_PKG_VERSION"));
            Ok(true)
        }
        other => Err(CliError::UnknownCommand(other.to_string())),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            if matches!(err, CliError::UnknownCommand(_) | CliError::MissingInput) {
                eprintln!();
                print_usage();
            }
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("querydown tokenizer");
    eprintln!();
    eprintln!("Usage: qd <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  lex <file|->     Print the token stream");
    eprintln!("  check <file|->   Report lexical errors only");
    eprintln!("  kinds            List every token kind name");
    eprintln!("  explain [code]   Describe a diagnostic code, or list them all");
    eprintln!("  help             Show this message");
    eprintln!("  version          Show version information");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --json                       Machine-readable output");
    eprintln!("  --no-trivia                  Omit whitespace and comment tokens");
    eprintln!("  --color=<auto|always|never>  Colored diagnostics (default: auto)");
    eprintln!();
    eprintln!("Use '-' to read the query from stdin.");
    eprintln!("Set RUST_LOG=qd_lexer=trace to trace mode transitions.");
}
