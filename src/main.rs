//! viewcore CLI
//!
//! Usage:
//!   viewcore [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>          Runtime configuration (TOML format)
//!   -l, --load <NAME[:PARENT]>   Load a template, optionally into the element with id PARENT
//!   -d, --dump <FORMAT>          Dump the error log afterwards (text, console, url)
//!   -q, --quiet                  Do not print the resulting document
//!   -h, --help                   Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use viewcore::diagnostics::{ErrorManager, StdoutViewer, TerminalSink};
use viewcore::dom::to_html;
use viewcore::{Runtime, RuntimeConfig, RuntimeError};

#[derive(Parser)]
#[command(name = "viewcore")]
#[command(about = "Load view templates into a document and report failures")]
struct Cli {
    /// Markup file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Runtime configuration (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Template to load, as NAME or NAME:PARENT_ID (repeatable)
    #[arg(short, long = "load", value_name = "NAME[:PARENT]")]
    load: Vec<String>,

    /// Dump the error log after loading
    #[arg(short, long, value_enum)]
    dump: Option<DumpFormat>,

    /// Do not print the resulting document
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DumpFormat {
    /// Numbered plain text on stdout
    Text,
    /// Colored dump on stderr
    Console,
    /// A data: URL holding the plain-text dump
    Url,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match RuntimeConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => RuntimeConfig::default(),
    };

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let errors = Rc::new(
        ErrorManager::from_config(&config)
            .with_sink(TerminalSink)
            .with_viewer(StdoutViewer),
    );

    let mut runtime = match Runtime::from_source(&source, config, Rc::clone(&errors)) {
        Ok(runtime) => runtime,
        Err(RuntimeError::Parse(parse_errors)) => {
            for e in &parse_errors {
                eprint!("{}", e.format(&source, &filename));
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if runtime.templates.is_empty() && !cli.load.is_empty() {
        tracing::warn!("{} declares no templates", filename);
    }

    for spec in &cli.load {
        let (name, parent) = match spec.split_once(':') {
            Some((name, parent)) => (name, Some(parent)),
            None => (spec.as_str(), None),
        };
        runtime.load_or_report(name, parent);
    }

    if !cli.quiet {
        println!("{}", to_html(&runtime.document, runtime.document.body()));
    }

    match cli.dump {
        Some(DumpFormat::Text) => println!("{}", errors.dump()),
        Some(DumpFormat::Console) => errors.dump_console(),
        Some(DumpFormat::Url) => {
            errors.dump_text();
        }
        None => {}
    }

    if !errors.is_empty() {
        std::process::exit(2);
    }
}
