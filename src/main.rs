use clap::value_parser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use std::io::{IsTerminal, Read};
use std::path::Path;
use tracing::{debug, info};

use robotdata::formatting::{self, DumpOptions, Identity, SeparatorStyle};
use robotdata::language::{LoadingError, RobotFile, RobotVersion};
use robotdata::parsing::{self, ParserOptions};
use robotdata::rendering::Terminal;
use robotdata::variables::{self, ContainerId, VariableStructure};

mod problem;

fn robot_version() -> Arg {
    Arg::new("robot-version")
        .long("robot-version")
        .value_name("VERSION")
        .value_parser(|text: &str| {
            RobotVersion::parse(text).ok_or_else(|| format!("'{}' is not a version like 3.1", text))
        })
        .help("Version of Robot Framework the test data is written for. Defaults to 3.1.")
}

fn filename() -> Arg {
    Arg::new("filename")
        .required(true)
        .help("The file containing the test data, or '-' to read standard input.")
}

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("robotdata")
        .version(VERSION)
        .propagate_version(true)
        .author("Andrew Cowie")
        .about("Read, check and write Robot Framework test data.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log what is going on to standard error. Repeat for more detail."),
        )
        .subcommand(
            Command::new("check")
                .about("Parse the given test data and report any problems found")
                .arg(robot_version())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .value_parser(["full", "concise"])
                        .default_value("full")
                        .help("Whether to show each problem with the offending line, or one per line."),
                )
                .arg(filename()),
        )
        .subcommand(
            Command::new("format")
                .about("Write the given test data back out, optionally highlighted")
                .arg(robot_version())
                .arg(
                    Arg::new("separator")
                        .long("separator")
                        .value_name("STYLE")
                        .value_parser(|text: &str| {
                            SeparatorStyle::parse(text)
                                .ok_or_else(|| "expected 'pipe', 'tab' or a number of spaces".to_string())
                        })
                        .help("Separator for lines that have to be written from scratch: 'pipe', 'tab', or a number of spaces."),
                )
                .arg(
                    Arg::new("raw-control-chars")
                        .short('R')
                        .long("raw-control-chars")
                        .action(ArgAction::SetTrue)
                        .help("Emit ANSI escape codes for syntax highlighting even if output is redirected to a pipe or file."),
                )
                .arg(filename()),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the classified tokens of the given test data")
                .arg(robot_version())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the tokens as JSON."),
                )
                .arg(filename()),
        )
        .subcommand(
            Command::new("variables")
                .about("Show the variables and item accesses found in a piece of cell text")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the structure as JSON."),
                )
                .arg(
                    Arg::new("text")
                        .required(true)
                        .value_parser(value_parser!(String))
                        .help("The cell text to analyse, for example '${a${b}}[0]'."),
                ),
        )
        .get_matches();

    let level = match matches.get_count("verbose") {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("check", submatches)) => check(submatches),
        Some(("format", submatches)) => format(submatches),
        Some(("tokens", submatches)) => tokens(submatches),
        Some(("variables", submatches)) => show_variables(submatches),
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: robotdata [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn options(submatches: &ArgMatches) -> ParserOptions {
    let mut options = ParserOptions::default();
    if let Some(version) = submatches.get_one::<RobotVersion>("robot-version") {
        options.version = *version;
    }
    options
}

/// Read the named file, or standard input for `-`. Exits on failure.
fn read(filename: &Path) -> String {
    let result = if filename.to_str() == Some("-") {
        let mut content = String::new();
        match std::io::stdin().read_to_string(&mut content) {
            Ok(_) => Ok(content),
            Err(error) => {
                debug!(?error);
                Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                })
            }
        }
    } else {
        parsing::load(filename)
    };

    match result {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            std::process::exit(1);
        }
    }
}

fn load_and_parse(submatches: &ArgMatches) -> (String, RobotFile, String) {
    let name = submatches
        .get_one::<String>("filename")
        .map_or("-", |name| name.as_str());
    let filename = Path::new(name);

    let content = read(filename);
    let options = options(submatches);
    info!("Parsing {} for version {}", filename.display(), options.version);

    let file = parsing::parse(&content, &options);
    (content, file, name.to_string())
}

fn check(submatches: &ArgMatches) {
    let (content, file, name) = load_and_parse(submatches);
    let filename = Path::new(&name);
    let concise = submatches
        .get_one::<String>("output")
        .map_or(false, |output| output == "concise");

    let renderer = Terminal;
    for diagnostic in &file.diagnostics {
        if concise {
            eprintln!(
                "{}",
                problem::concise_diagnostic(diagnostic, filename, &content, &renderer)
            );
        } else {
            eprintln!(
                "{}\n",
                problem::full_diagnostic(diagnostic, filename, &content, &renderer)
            );
        }
    }

    let errors = file
        .errors()
        .count();
    if errors > 0 {
        eprintln!(
            "{}: {} error{} in {}",
            "error".bright_red(),
            errors,
            if errors == 1 { "" } else { "s" },
            filename.display()
        );
        std::process::exit(1);
    }
    info!("No errors in {}", filename.display());
}

fn format(submatches: &ArgMatches) {
    let (_, file, _) = load_and_parse(submatches);

    let options = DumpOptions {
        separator: submatches
            .get_one::<SeparatorStyle>("separator")
            .copied(),
        eol: None,
    };

    let raw_output = submatches.get_flag("raw-control-chars");
    let result = if raw_output || std::io::stdout().is_terminal() {
        formatting::render(&Terminal, &file, &options)
    } else {
        formatting::render(&Identity, &file, &options)
    };

    print!("{}", result);
}

fn tokens(submatches: &ArgMatches) {
    let (_, file, _) = load_and_parse(submatches);

    if submatches.get_flag("json") {
        match serde_json::to_string_pretty(file.tokens()) {
            Ok(json) => println!("{}", json),
            Err(error) => {
                eprintln!("{}: {}", "error".bright_red(), error);
                std::process::exit(1);
            }
        }
        return;
    }

    for line in file.lines() {
        for id in line.tokens() {
            let token = file.token(id);
            let column = token
                .position()
                .map_or(0, |position| position.column);
            println!(
                "{}:{}\t{:?}\t{:?}",
                line.number,
                column + 1,
                token.kind(),
                token.text()
            );
        }
    }
}

fn show_variables(submatches: &ArgMatches) {
    let text = submatches
        .get_one::<String>("text")
        .map_or("", |text| text.as_str());
    let structure = variables::extract(text);

    if submatches.get_flag("json") {
        match serde_json::to_string_pretty(&structure) {
            Ok(json) => println!("{}", json),
            Err(error) => {
                eprintln!("{}: {}", "error".bright_red(), error);
                std::process::exit(1);
            }
        }
        return;
    }

    print_container(&structure, structure.root());
    for warning in structure.warnings() {
        println!(
            "{}: missing '{}' at offset {}",
            "warning".bright_yellow(),
            warning.expected,
            warning.offset
        );
    }
}

fn print_container(structure: &VariableStructure, id: ContainerId) {
    let container = structure.container(id);
    let depth = structure.depth(id);
    println!(
        "{:indent$}{:?} {}..{} {:?}{}",
        "",
        container.kind,
        container.start,
        container.end,
        structure.name(id),
        if container.closed { "" } else { " (unclosed)" },
        indent = depth * 4
    );
    for child in structure.children(id) {
        print_container(structure, child);
    }
}
