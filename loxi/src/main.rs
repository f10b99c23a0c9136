//! `lox` - CLI for the Lox lexer/parser/resolver/tree-walking interpreter
//! (spec.md §6).
//!
//! Given a `.lox` file, runs it and exits with the code spec.md §6
//! assigns to the outcome. Given no file, starts a REPL that reads from
//! stdin line by line, echoing every expression statement's value.

mod config;
mod error;

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;
use loxc_drv::{EmitType, Session};

#[derive(Parser, Debug)]
#[command(name = "lox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lexer, parser, resolver, and tree-walking interpreter for Lox")]
struct Cli {
    /// `.lox` file to run. Omit to start an interactive REPL.
    script: Option<PathBuf>,

    /// Enable the §9 "extra features" syntax.
    #[arg(long, conflicts_with = "no_extra_features")]
    extra_features: bool,

    /// Disable the §9 "extra features" syntax.
    #[arg(long)]
    no_extra_features: bool,

    /// Stop after this pipeline stage and print its output.
    #[arg(long, value_enum, default_value_t = EmitArg::Run)]
    emit: EmitArg,

    /// Diagnostic coloring.
    #[arg(long, value_enum, default_value_t = ColorArg::Auto)]
    color: ColorArg,

    /// Path to a config file, overriding the default search location.
    #[arg(long, env = "LOX_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug-level logging.
    #[arg(short, long, env = "LOX_VERBOSE")]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum EmitArg {
    Tokens,
    Ast,
    Run,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ColorArg {
    Auto,
    Always,
    Never,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let verbose = cli.verbose || config.verbose;
    init_logging(verbose, resolve_color(cli.color, &config))?;

    let extra_features = if cli.no_extra_features {
        false
    } else if cli.extra_features {
        true
    } else {
        config.extra_features
    };

    let drv_config = loxc_drv::Config {
        input: cli.script.clone(),
        emit: match cli.emit {
            EmitArg::Tokens => EmitType::Tokens,
            EmitArg::Ast => EmitType::Ast,
            EmitArg::Run => EmitType::Run,
        },
        extra_features,
    };
    let mut session = Session::new(drv_config);

    let code = if cli.script.is_some() {
        session.run().context("running script")?
    } else {
        run_repl(&mut session)
    };
    std::process::exit(code);
}

fn load_config(path: Option<&std::path::Path>) -> error::Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

fn resolve_color(arg: ColorArg, config: &Config) -> bool {
    match arg {
        ColorArg::Always => true,
        ColorArg::Never => false,
        ColorArg::Auto => config.color != "never" && io::stdout().is_terminal(),
    }
}

fn init_logging(verbose: bool, color: bool) -> error::Result<()> {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };
    let subscriber = fmt::layer().with_ansi(color).with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| error::LoxiError::Logging(e.to_string()))
}

/// Reads stdin line by line, running each line as its own program through
/// the same [`Session`] so globals persist across lines (spec.md §6).
/// Returns the exit code of the *last* line run, or success if stdin was
/// empty.
fn run_repl(session: &mut Session) -> i32 {
    session.set_repl(true);
    let stdin = io::stdin();
    let mut code = loxc_drv::exit_code::SUCCESS;
    print!("> ");
    let _ = io::stdout().flush();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        code = session.run_source("<repl>", &line);
        print!("> ");
        let _ = io::stdout().flush();
    }
    println!();
    code
}
