//! Prints the structure tree of a GEDCOM 7 file together with the type
//! identifier and value of every structure.
//!
//! Settings are read from `gedcom7.toml` in the working directory when it
//! exists, then from `GEDCOM7_*` environment variables. Log output is
//! controlled through `RUST_LOG` and defaults to warnings.

use std::path::PathBuf;
use std::process::ExitCode;

// used for the command line arguments
use clap::Parser as _;

use gedcom7::config::Loader;
use gedcom7::{Document, Node, ParseMode, Parser};

/// Print the typed structure tree of a GEDCOM 7 file
#[derive(clap::Parser)]
#[command(name = "gedcom7", version, about, long_about = None)]
struct Cli {
    /// The GEDCOM 7 file to read
    file: PathBuf,
    /// Fail on the first malformed line instead of skipping it
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = match Loader::new()
        .with_optional_file("gedcom7.toml")
        .with_environment()
        .build()
    {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };
    let parser = match Parser::from_settings(&settings) {
        Ok(parser) if cli.strict => parser.mode(ParseMode::Strict),
        Ok(parser) => parser,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };
    let text = match std::fs::read_to_string(&cli.file) {
        Ok(text) => text,
        Err(error) => {
            eprintln!("{}: {}", cli.file.display(), error);
            return ExitCode::FAILURE;
        }
    };
    match parser.parse(&text) {
        Ok(document) => {
            print_tree(&document);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}: {}", cli.file.display(), error);
            ExitCode::FAILURE
        }
    }
}

// depth first, with an explicit stack so deep nesting cannot overflow
fn print_tree(document: &Document) {
    let mut pending: Vec<Node> = document.records();
    pending.reverse();
    while let Some(node) = pending.pop() {
        print_node(node);
        pending.extend(node.children().into_iter().rev());
    }
}

fn print_node(node: Node) {
    let indent = "  ".repeat(node.level());
    let mut heading = format!("{}{}", indent, node.tag());
    if let Some(xref) = node.xref() {
        heading = format!("{} {}", heading, xref);
    }
    if let Some(pointer) = node.pointer() {
        heading = format!("{} -> {}", heading, pointer);
    }
    match node.type_id() {
        Ok(type_id) => {
            println!("{} <{}>", heading, type_id);
            match node.value() {
                Ok(Some(value)) => println!("{}  = {:?}", indent, value),
                Ok(None) => (),
                Err(error) => println!("{}  ! {}", indent, error),
            }
        }
        Err(error) => println!("{} ! {}", heading, error),
    }
}
