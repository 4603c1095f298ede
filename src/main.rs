use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{Arg, ArgAction, Command};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use pmlunit::discovery;
use pmlunit::output;
use pmlunit::parsing;
use pmlunit::problem;
use pmlunit::rendering::{Identity, Render, Terminal};
use pmlunit::resolving::{FileMap, IndexResolver, Resolve, SimpleResolver};
use pmlunit::stack::PmlError;

/// Environment variable controlling log output, eg PMLUNIT_LOG=debug
const LOG_VARIABLE: &str = "PMLUNIT_LOG";

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let filter = EnvFilter::try_from_env(LOG_VARIABLE).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("pmlunit")
        .version(VERSION)
        .propagate_version(true)
        .author("pmlunit contributors")
        .about("Unit testing for PML.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("raw-control-chars")
                .short('R')
                .long("raw-control-chars")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit ANSI escape codes for highlighting even if output is redirected to a pipe or file."),
        )
        .subcommand(
            Command::new("check")
                .about("Parse the given object definition and list the tests it declares")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the PML object definition."),
                ),
        )
        .subcommand(
            Command::new("discover")
                .about("Find all the test suites in one or more PML libraries")
                .arg(
                    Arg::new("directory")
                        .action(ArgAction::Append)
                        .help("Library directories to search. Defaults to the entries of PMLLIB."),
                ),
        )
        .subcommand(
            Command::new("trace")
                .about("Present an error reported by the host, with its stack trace")
                .arg(
                    Arg::new("resolve")
                        .long("resolve")
                        .action(ArgAction::Append)
                        .help("Library directory used to find the files named in the stack trace. Defaults to the entries of PMLLIB."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the error message followed by its stack lines."),
                ),
        )
        .get_matches();

    let raw = *matches
        .get_one::<bool>("raw-control-chars")
        .unwrap_or(&false);

    let renderer: &dyn Render = if raw
        || std::io::stdout()
            .is_terminal()
    {
        &Terminal
    } else {
        &Identity
    };

    match matches.subcommand() {
        Some(("check", submatches)) => {
            let filename = submatches
                .get_one::<String>("filename")
                .map(Path::new)
                .unwrap_or(Path::new("-"));
            std::process::exit(check(filename, renderer));
        }
        Some(("discover", submatches)) => {
            let roots: Vec<PathBuf> = match submatches.get_many::<String>("directory") {
                Some(values) => values
                    .map(PathBuf::from)
                    .collect(),
                None => discovery::library_from_env(),
            };
            std::process::exit(discover(&roots));
        }
        Some(("trace", submatches)) => {
            let filename = submatches
                .get_one::<String>("filename")
                .map(Path::new)
                .unwrap_or(Path::new("-"));
            let roots: Vec<PathBuf> = match submatches.get_many::<String>("resolve") {
                Some(values) => values
                    .map(PathBuf::from)
                    .collect(),
                None => discovery::library_from_env(),
            };
            std::process::exit(trace(filename, &roots, renderer));
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: pmlunit [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn check(filename: &Path, renderer: &dyn Render) -> i32 {
    info!("Checking file: {}", filename.display());

    let content = match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error, renderer));
            return 1;
        }
    };

    match parsing::parse(filename, &content) {
        Ok(case) => {
            println!("{}", case.name());
            if case.has_set_up() {
                println!("    (setUp)");
            }
            for test in case.tests() {
                println!("    {}", test.name());
            }
            if case.has_tear_down() {
                println!("    (tearDown)");
            }
            0
        }
        Err(error) => {
            eprintln!(
                "{}",
                problem::full_parsing_error(&error, filename, &content, renderer)
            );
            1
        }
    }
}

fn discover(roots: &[PathBuf]) -> i32 {
    if roots.is_empty() {
        eprintln!(
            "No library directories given, and {} is not set.",
            discovery::LIBRARY_VARIABLE
        );
        return 1;
    }

    info!("Discovering tests in {} libraries", roots.len());
    let found = discovery::discover(roots);

    match output::report(&found) {
        Ok(report) => {
            print!("{}", report);
            0
        }
        Err(error) => {
            eprintln!("Unable to render report: {}", error);
            1
        }
    }
}

fn trace(filename: &Path, roots: &[PathBuf], renderer: &dyn Render) -> i32 {
    info!("Tracing error in: {}", filename.display());

    let content = match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error, renderer));
            return 1;
        }
    };

    let mut index = FileMap::new();
    for root in roots {
        match FileMap::load(root) {
            Ok(map) => index.extend(map),
            Err(error) => debug!(root = %root.display(), %error, "Unable to index"),
        }
    }

    let result = if index.is_empty() {
        resolve_error(&content, &SimpleResolver)
    } else {
        resolve_error(&content, &IndexResolver::new(index))
    };

    match result {
        Ok(Some(error)) => {
            println!("{}", problem::present_error(&error, renderer));
            0
        }
        Ok(None) => {
            println!("No error");
            0
        }
        Err(error) => {
            eprintln!("Malformed error payload: {}", error);
            1
        }
    }
}

fn resolve_error(
    content: &str,
    resolver: &dyn Resolve,
) -> Result<Option<PmlError>, pmlunit::stack::StackError> {
    PmlError::from_string_with(content, resolver)
}
