//! Command-line interface for signwriting
//! This binary converts, parses and searches SignWriting text in either spelling.
//!
//! Usage:
//!   signwriting convert `<text>` --to `<fsw|swu>`       - Convert text between spellings
//!   signwriting parse `<query>`                         - Show the parsed query
//!   signwriting regex `<query>`                         - Show the regex program of a query
//!   signwriting range `<min>` `<max>` [--hex]           - Show the regex of a range
//!   signwriting search `<query>` [`<path>`] [--lines]   - Search a corpus file (or stdin)
//!   signwriting to-query `<sign>` --flags `<flags>`     - Build a query from a sign

mod commands;

use clap::{Arg, ArgAction, ArgMatches, Command};
use signwriting::query::SearchMode;
use signwriting_config::{Loader, SignwritingConfig};
use std::io::Read;

fn main() {
    let matches = build_cli().get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    init_tracing(&config.log.level);

    let result = match matches.subcommand() {
        Some(("convert", sub)) => handle_convert_command(sub, &config),
        Some(("parse", sub)) => commands::parse(required(sub, "query"), config.output.format),
        Some(("regex", sub)) => commands::regex(
            required(sub, "query"),
            config.query.variance,
            config.output.format,
        ),
        Some(("range", sub)) => commands::range(
            required(sub, "min"),
            required(sub, "max"),
            sub.get_flag("hex"),
            config.output.format,
        ),
        Some(("search", sub)) => handle_search_command(sub, &config),
        Some(("to-query", sub)) => commands::to_query(
            required(sub, "sign"),
            required(sub, "flags"),
            config.output.format,
        ),
        _ => unreachable!("subcommand_required is set"),
    };

    match result {
        Ok(output) if output.is_empty() => {}
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn build_cli() -> Command {
    Command::new("signwriting")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting, parsing and searching SignWriting text")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults")
                .global(true),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: text or json (default: output.format)")
                .value_parser(["text", "json"])
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert text between FSW and SWU")
                .arg(Arg::new("text").help("FSW or SWU text").required(true).index(1))
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target spelling")
                        .value_parser(["fsw", "swu"])
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a query and print its structure")
                .arg(Arg::new("query").required(true).index(1)),
        )
        .subcommand(
            Command::new("regex")
                .about("Compile a query into its regex program, one stage per line")
                .arg(Arg::new("query").required(true).index(1)),
        )
        .subcommand(
            Command::new("range")
                .about("Compile a numeric range (or an SWU character range) into a regex")
                .arg(Arg::new("min").required(true).index(1))
                .arg(Arg::new("max").required(true).index(2))
                .arg(
                    Arg::new("hex")
                        .long("hex")
                        .help("Bounds are hexadecimal")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("search")
                .about("Search a corpus for signs matching a query")
                .arg(Arg::new("query").required(true).index(1))
                .arg(
                    Arg::new("path")
                        .help("Corpus file (default: stdin)")
                        .index(2),
                )
                .arg(
                    Arg::new("lines")
                        .long("lines")
                        .help("Each corpus line starts with a sign; print whole lines")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("signs"),
                )
                .arg(
                    Arg::new("signs")
                        .long("signs")
                        .help("The corpus is free text containing signs; print the signs")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("to-query")
                .about("Build a query matching signs like the given one")
                .arg(Arg::new("sign").required(true).index(1))
                .arg(
                    Arg::new("flags")
                        .long("flags")
                        .help(
                            "A: prefix, a: general prefix, S: symbols, \
                             s: general symbols, L: locations",
                        )
                        .required(true),
                ),
        )
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_default()
}

/// Defaults, then the `--config` file, then command-line overrides.
fn load_config(matches: &ArgMatches) -> Result<SignwritingConfig, String> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader
            .set_override("output.format", format.as_str())
            .map_err(|e| e.to_string())?;
    }
    loader.build().map_err(|e| format!("Invalid configuration: {}", e))
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn handle_convert_command(
    matches: &ArgMatches,
    config: &SignwritingConfig,
) -> Result<String, String> {
    let to = commands::Spelling::from_name(required(matches, "to"))?;
    commands::convert_text(required(matches, "text"), to, config.output.format)
}

fn handle_search_command(
    matches: &ArgMatches,
    config: &SignwritingConfig,
) -> Result<String, String> {
    let corpus = match matches.get_one::<String>("path") {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read '{}': {}", path, e))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            buffer
        }
    };

    let mode = if matches.get_flag("lines") {
        SearchMode::Lines
    } else if matches.get_flag("signs") {
        SearchMode::Signs
    } else {
        config.search.mode
    };

    commands::search(
        required(matches, "query"),
        &corpus,
        mode,
        config.query.variance,
        config.output.format,
    )
}
