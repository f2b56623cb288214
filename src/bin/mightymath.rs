//! Command-line interface for mightymath
//!
//! Usage:
//!   mightymath compile [`<path>`|-] [--inline] [--pretty] [--format `<format>`]  - Compile one expression
//!   mightymath render `<path>` [--delimiter `<marker>`]                         - Render notation inside prose
//!   mightymath list-formats                                                  - List output formats
//!
//! Global options: `--config <file>` layers a TOML file over the defaults,
//! `--log-level <level>` turns on logging to stderr.

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{debug, LevelFilter};
use mightymath::math::document::render_document;
use mightymath::math::formats::FormatRegistry;
use mightymath::{
    compile_tree, compile_with, CompileOptions, Loader, MightyMathConfig, MightyMathError,
};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::io::Read;

fn main() {
    let matches = Command::new("mightymath")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compiles plain-text math notation into MathML")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults")
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log verbosity, written to stderr")
                .value_parser(["off", "error", "warn", "info", "debug", "trace"])
                .default_value("warn")
                .global(true),
        )
        .subcommand(
            Command::new("compile")
                .about("Compile a file (or stdin) as one expression")
                .arg(
                    Arg::new("path")
                        .help("Path to the notation file, or '-' for stdin")
                        .default_value("-")
                        .index(1),
                )
                .arg(
                    Arg::new("inline")
                        .long("inline")
                        .help("Render an inline <math> root instead of a block")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("format"),
                )
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .help("Indent the emitted markup")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format from the registry (e.g. 'treeviz', 'json')"),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Compile every delimited block in a document")
                .arg(
                    Arg::new("path")
                        .help("Path to the document, or '-' for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("delimiter")
                        .long("delimiter")
                        .short('d')
                        .help("Marker around notation blocks"),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    init_logging(&matches);

    let result = match matches.subcommand() {
        Some(("compile", compile_matches)) => handle_compile_command(&matches, compile_matches),
        Some(("render", render_matches)) => handle_render_command(&matches, render_matches),
        Some(("list-formats", _)) => {
            handle_list_formats_command();
            Ok(())
        }
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(matches: &ArgMatches) {
    let level = match matches.get_one::<String>("log-level").map(String::as_str) {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    };
    // Fails only if a logger is already installed.
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn read_source(path: &str) -> Result<String, MightyMathError> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| MightyMathError::io("<stdin>", e))?;
        Ok(source)
    } else {
        std::fs::read_to_string(path).map_err(|e| MightyMathError::io(path, e))
    }
}

fn load_config(
    matches: &ArgMatches,
    overrides: &[(&str, String)],
) -> Result<MightyMathConfig, MightyMathError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        debug!("layering config file {}", path);
        loader = loader.with_file(path);
    }
    for (key, value) in overrides {
        loader = loader.set_override(key, value.as_str())?;
    }
    Ok(loader.build()?)
}

fn emit(output: &str) {
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
}

/// Handle the compile command
fn handle_compile_command(
    global: &ArgMatches,
    matches: &ArgMatches,
) -> Result<(), MightyMathError> {
    let mut overrides = Vec::new();
    if matches.get_flag("inline") {
        overrides.push(("output.display", "inline".to_string()));
    }
    if matches.get_flag("pretty") {
        overrides.push(("output.pretty", "true".to_string()));
    }
    let config = load_config(global, &overrides)?;
    let options = CompileOptions::from(&config);

    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    let source = read_source(path)?;

    let output = match matches.get_one::<String>("format") {
        None => compile_with(&source, &options),
        Some(format) => {
            let registry = FormatRegistry::with_options(&options);
            let tree = compile_tree(&source, &options);
            registry.serialize(&tree, format)?
        }
    };
    emit(&output);
    Ok(())
}

/// Handle the render command
fn handle_render_command(
    global: &ArgMatches,
    matches: &ArgMatches,
) -> Result<(), MightyMathError> {
    let mut overrides = Vec::new();
    if let Some(delimiter) = matches.get_one::<String>("delimiter") {
        overrides.push(("input.delimiter", delimiter.clone()));
    }
    let config = load_config(global, &overrides)?;
    let options = CompileOptions::from(&config);

    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    let source = read_source(path)?;

    print!(
        "{}",
        render_document(&source, &config.input.delimiter, &options)
    );
    Ok(())
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let description = registry
            .get(&name)
            .map(|formatter| formatter.description())
            .unwrap_or("");
        println!("  {}", name);
        println!("    {}", description);
    }
}
