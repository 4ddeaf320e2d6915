//! Command-line interface for objj-brackets
//! This binary is what the editor runs when `]` is typed, and doubles as a tool for
//! inspecting how a line is tokenized and resolved.
//!
//! Usage:
//!   objj-brackets balance [--line `<line>`] [--index `<n>`]       - Print the balanced snippet
//!   objj-brackets tokens `<line>` [--format `<format>`] [--all]   - Print the tokens of a line
//!   objj-brackets resolve `<line>` [--caret `<n>`]                - Print the resolution as JSON
//!
//! Without `--line`, `balance` reads the line and caret column from the editor
//! environment variables named in the configuration.
//!
//! Configuration is layered: built-in defaults, then `objj-brackets.toml` in the user's
//! configuration directory if present, then `--config`, then `--marker`/`--no-escape`.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use objj_brackets::objj::config::{user_config_path, BracketsConfig, Loader};
use objj_brackets::objj::error::Result;
use objj_brackets::objj::lexing::{significant_tokens, tokenize};
use objj_brackets::objj::resolving::resolve;
use objj_brackets::objj::snippet::Request;

fn main() {
    env_logger::init();

    let matches = Command::new("objj-brackets")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Balances brackets around Objective-J message sends")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("marker")
                .long("marker")
                .short('m')
                .global(true)
                .help("Caret marker placed in the snippet"),
        )
        .arg(
            Arg::new("no-escape")
                .long("no-escape")
                .global(true)
                .help("Do not escape snippet characters")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("balance")
                .about("Print the snippet that replaces the line when ] is typed")
                .arg(
                    Arg::new("line")
                        .long("line")
                        .short('l')
                        .help("Current line (defaults to the editor environment)"),
                )
                .arg(
                    Arg::new("index")
                        .long("index")
                        .short('i')
                        .value_parser(value_parser!(usize))
                        .help("Caret column in characters (defaults to the end of the line)"),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the tokens of a line")
                .arg(
                    Arg::new("line")
                        .help("Line to tokenize")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .short('a')
                        .help("Keep whitespace and terminator tokens")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("resolve")
                .about("Print where the opening bracket goes, as JSON")
                .arg(
                    Arg::new("line")
                        .help("Line to resolve")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("caret")
                        .long("caret")
                        .value_parser(value_parser!(usize))
                        .help("Caret column in characters (defaults to the end of the line)"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("balance", balance_matches)) => handle_balance_command(balance_matches),
        Some(("tokens", tokens_matches)) => handle_tokens_command(tokens_matches),
        Some(("resolve", resolve_matches)) => handle_resolve_command(resolve_matches),
        _ => unreachable!(),
    }
}

fn load_config(matches: &ArgMatches) -> Result<BracketsConfig> {
    let mut loader = Loader::new();
    if let Some(path) = user_config_path() {
        loader = loader.with_optional_file(path);
    }
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(marker) = matches.get_one::<String>("marker") {
        loader = loader.set_override("snippet.caret_marker", marker.as_str())?;
    }
    if matches.get_flag("no-escape") {
        loader = loader.set_override("snippet.escape", false)?;
    }
    loader.build()
}

/// Handle the balance command
fn handle_balance_command(matches: &ArgMatches) {
    let config = load_config(matches).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let request = match matches.get_one::<String>("line") {
        Some(line) => {
            let index = matches
                .get_one::<usize>("index")
                .copied()
                .unwrap_or_else(|| line.chars().count());
            Request::new(line.as_str(), index)
        }
        None => Request::from_env(&config.editor).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }),
    };

    print!("{}", request.balance(&config.snippet));
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) {
    let Some(line) = matches.get_one::<String>("line") else {
        unreachable!("clap requires the line argument")
    };
    let tokens = if matches.get_flag("all") {
        tokenize(line)
    } else {
        significant_tokens(line)
    };

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => {
            let json = serde_json::to_string_pretty(&tokens).unwrap_or_else(|e| {
                eprintln!("Error formatting tokens: {}", e);
                std::process::exit(1);
            });
            println!("{}", json);
        }
        _ => {
            for token in &tokens {
                println!("{}", token);
            }
        }
    }
}

/// Handle the resolve command
fn handle_resolve_command(matches: &ArgMatches) {
    let Some(line) = matches.get_one::<String>("line") else {
        unreachable!("clap requires the line argument")
    };
    let caret = matches
        .get_one::<usize>("caret")
        .copied()
        .unwrap_or_else(|| line.chars().count());
    let before_caret: String = line.chars().take(caret).collect();

    let resolution = resolve(&significant_tokens(&before_caret));
    let json = serde_json::to_string_pretty(&resolution).unwrap_or_else(|e| {
        eprintln!("Error formatting resolution: {}", e);
        std::process::exit(1);
    });
    println!("{}", json);
}
