mod cli;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use cli::{Cli, Commands, InputArgs};
use fidlc::driver::{self, CompileError};
use fidlc::limits::CompilerLimits;

/// Use `RUST_LOG` to override the default filter
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_limits(args: &InputArgs) -> Result<CompilerLimits, Box<dyn std::error::Error>> {
    let limits = CompilerLimits::from_config_toml(&args.config)?;
    limits.validate()?;
    Ok(limits)
}

fn run_parse(args: &InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let limits = load_limits(args)?;
    let file = driver::compile_file(&args.file, &limits)?;
    print!("{}", file);
    Ok(())
}

fn run_tokens(args: &InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let limits = load_limits(args)?;
    let source = driver::read_source(&args.file)?;
    let tokens = driver::tokenize(&source, &limits)?;

    for token in tokens.iter() {
        let text = token.text(&source);
        if text.is_empty() {
            println!("{:?}", token.kind);
        } else {
            println!("{:?} {}", token.kind, text);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Parse(args) => run_parse(args),
        Commands::Tokens(args) => run_tokens(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Parse diagnostics are already fully rendered
            match err.downcast_ref::<CompileError>() {
                Some(CompileError::Parse { diagnostics }) => {
                    for diagnostic in diagnostics {
                        eprint!("{}", diagnostic);
                    }
                }
                _ => eprintln!("{}", err),
            }
            ExitCode::FAILURE
        }
    }
}
