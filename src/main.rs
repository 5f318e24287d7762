//! skillshell - interactive driver
//!
//! A thin command-line front end over the session layer: reads lines
//! from stdin, runs them as cells, and prints results or error records.
//! Intended for manual use and smoke testing; kernel front ends embed
//! the library directly.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use tracing::error;

use skillshell::{ConfigLoader, Error, Result, ShellConfig, ShellSession};

/// Command line options
#[derive(Debug, Default)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Enable debug logging
    debug: bool,
}

impl AppArgs {
    fn parse() -> Result<Self> {
        let args: Vec<String> = env::args().collect();
        let mut app_args = AppArgs::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        app_args.config_path = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    } else {
                        return Err("Missing config file path".into());
                    }
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--help" | "-h" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-v" => {
                    println!("{} v{}", skillshell::NAME, skillshell::VERSION);
                    process::exit(0);
                }
                arg => {
                    return Err(format!("Unknown option: {}", arg).into());
                }
            }
            i += 1;
        }

        Ok(app_args)
    }
}

fn print_help() {
    println!("skillshell - drive a SKILL interpreter over a pseudoterminal");
    println!();
    println!("USAGE:");
    println!("    skillshell [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>    Configuration file (TOML or JSON)");
    println!("    -d, --debug            Enable debug logging");
    println!("    -h, --help             Show this help");
    println!("    -v, --version          Show version");
    println!();
    println!("Lines read from stdin are executed as cells. Meta-commands:");
    println!("    :matches <token>       List completions for a prefix");
    println!("    :info <token>          Show help for a name");
    println!("    :quit                  Shut the interpreter down and exit");
}

fn run(args: AppArgs) -> Result<()> {
    let config = match &args.config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let mut session = ShellSession::spawn(config)?;
    println!("{}", session.banner().unwrap_or_default());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        if let Some(token) = line.strip_prefix(":matches ") {
            match session.get_matches(token.trim()) {
                Ok(names) => println!("{}", names.join(" ")),
                Err(e) => eprintln!("error: {}", e),
            }
            continue;
        }
        if let Some(token) = line.strip_prefix(":info ") {
            match session.get_info(token.trim()) {
                Ok(info) => println!("{}", info),
                Err(e) => eprintln!("error: {}", e),
            }
            continue;
        }
        if line == ":quit" {
            break;
        }

        match session.run_cell(line) {
            Ok(output) => println!("{}", output),
            Err(Error::Evaluation(record)) => eprintln!("*Error* {}", record),
            Err(e) => return Err(e),
        }
    }

    session.shutdown(false)
}

fn main() {
    let args = match AppArgs::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    let filter = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(args) {
        error!("{}", e);
        process::exit(1);
    }
}
