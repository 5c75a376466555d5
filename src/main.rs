use std::{fs::read_to_string, path::PathBuf, process};

use clap::Parser as CliParser;
use log::info;
use monkey::{display_error, lexer::lexer::Lexer, parser::parser::Parser};

/// Lexes and parses a monkey source file, printing the result.
#[derive(CliParser, Debug)]
#[command(name = "monkey", version)]
struct Cli {
    /// Source file to parse
    file: PathBuf,

    /// Print the token stream instead of the parsed program
    #[arg(long)]
    tokens: bool,

    /// Character that marks the end of input [default: NUL]
    #[arg(long, value_name = "CHAR")]
    end_token: Option<char>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.to_string_lossy().into_owned());

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", cli.file.display(), error);
            process::exit(1);
        }
    };

    let mut lexer = Lexer::new(source.clone(), Some(file_name.clone()));
    if let Some(end_token) = cli.end_token {
        lexer = lexer.with_end_token(end_token);
    }

    if cli.tokens {
        for token in lexer {
            println!("{}", token);
        }
        return;
    }

    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    info!(
        "parsed {} statements with {} errors",
        program.len(),
        parser.errors().len()
    );

    if parser.has_errors() {
        for error in parser.errors() {
            eprint!("{}", display_error(error, &source, &file_name));
        }
        process::exit(1);
    }

    for stmt in program.iter() {
        println!("{}", stmt);
    }
}
