//! loxc-drv - pipeline orchestration tying lexer, parser, resolver, and
//! interpreter together (spec.md §2, §6, §7).
//!
//! A [`Session`] owns the [`loxc_util::SourceMap`] and a persistent
//! [`loxc_interp::Interpreter`], so a caller (the `loxi` REPL, or a test)
//! can feed it one source at a time and keep global state across calls,
//! the same way [`loxc_interp::Interpreter::exec_program`] does on its own.
//! Each stage refuses to hand its output to the next once its [`Handler`]
//! has reported an error (spec.md §7).

use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use loxc_interp::{Interpreter, RuntimeError};
use loxc_util::{Handler, SourceMap};

/// What to do with a source after running it through the pipeline
/// (spec.md §6's introspection flags). `Run` is the only variant that
/// reaches the interpreter; `Tokens`/`Ast` stop early and print the
/// intermediate representation instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitType {
    /// Print the token stream and stop.
    Tokens,
    /// Print the parsed AST and stop.
    Ast,
    /// Resolve and interpret (the default).
    #[default]
    Run,
}

/// Driver configuration (spec.md §6).
#[derive(Debug, Clone)]
pub struct Config {
    /// `.lox` file to run. `None` means read from stdin as a single program.
    pub input: Option<PathBuf>,
    /// What stage to stop at and print.
    pub emit: EmitType,
    /// Whether the lexer/parser accept the §9 "extra features" syntax.
    pub extra_features: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { input: None, emit: EmitType::Run, extra_features: true }
    }
}

/// Errors that can prevent a [`Session`] from even attempting to run a
/// source — as opposed to [`RuntimeError`], which is a Lox-level runtime
/// error surfaced through the normal diagnostic path.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, #[source] source: std::io::Error },
    #[error("failed to read standard input: {0}")]
    Stdin(#[source] std::io::Error),
}

pub type DriverResult<T> = Result<T, DriverError>;

/// Process exit codes (spec.md §6). `65`/`70` are reserved for a future
/// reference-Lox-compatible mode and are not produced by this interpreter.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const RUNTIME_ERROR: i32 = 1;
    pub const STATIC_ERROR: i32 = 2;
    #[allow(dead_code)]
    pub const RESERVED_DATA_ERROR: i32 = 65;
    #[allow(dead_code)]
    pub const RESERVED_IO_ERROR: i32 = 70;
}

/// Drives one or more sources through lex → parse → resolve → interpret.
///
/// Holds a single [`Interpreter`] across calls to [`Session::run_source`]
/// so that globals persist between successive programs, the way a REPL
/// needs (spec.md §6).
pub struct Session {
    config: Config,
    sources: SourceMap,
    interp: Interpreter,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let interp = Interpreter::with_writer(Box::new(std::io::stdout()), config.extra_features);
        Self { config, sources: SourceMap::new(), interp }
    }

    /// Read the configured input (a file, or stdin if none was given) and
    /// run it. Returns the process exit code per spec.md §6.
    ///
    /// The input is read as raw bytes and passed through
    /// [`loxc_lex::sanitize_utf8`] rather than `read_to_string`: spec.md
    /// §4.1 requires an invalid leading byte to be diagnosed and replaced,
    /// not to abort the run before a single token is lexed.
    pub fn run(&mut self) -> DriverResult<i32> {
        let (name, bytes) = self.read_source()?;
        let mut handler = Handler::new();
        let source = loxc_lex::sanitize_utf8(&bytes, &mut handler);

        if self.config.emit == EmitType::Tokens {
            self.emit_tokens(&source);
            return Ok(exit_code::SUCCESS);
        }
        Ok(self.run_source_with_handler(&name, &source, handler))
    }

    fn read_source(&self) -> DriverResult<(String, Vec<u8>)> {
        match &self.config.input {
            Some(path) => {
                let content =
                    std::fs::read(path).map_err(|source| DriverError::Io { path: path.clone(), source })?;
                Ok((display_name(path), content))
            },
            None => {
                let mut content = Vec::new();
                std::io::stdin().read_to_end(&mut content).map_err(DriverError::Stdin)?;
                Ok(("<stdin>".to_string(), content))
            },
        }
    }

    /// Run a single named source string through the full pipeline. Returns
    /// the exit code spec.md §6 assigns to the outcome. A stage never hands
    /// its output to the next once its handler has reported an error
    /// (spec.md §7).
    ///
    /// Each call gets its own [`SourceMap`] rather than appending to a
    /// shared one: `loxc_lex`/`loxc_par` stamp every span with
    /// [`loxc_util::FileId::DUMMY`] (they have no file-table of their own),
    /// so a fresh map whose first (and only) file is also assigned id 0
    /// keeps every span's `file_id` pointing at the source that actually
    /// produced it, call after call.
    pub fn run_source(&mut self, name: &str, source: &str) -> i32 {
        self.run_source_with_handler(name, source, Handler::new())
    }

    /// Shared by [`Session::run`] and [`Session::run_source`]: the caller
    /// supplies the [`Handler`] so diagnostics raised before parsing even
    /// starts (e.g. [`loxc_lex::sanitize_utf8`]'s UTF-8 repairs) still
    /// accumulate with parse/resolve/runtime diagnostics and get reported
    /// together.
    fn run_source_with_handler(&mut self, name: &str, source: &str, mut handler: Handler) -> i32 {
        self.sources = SourceMap::new();
        self.sources.add_file(name, source.to_string());

        debug!(name, len = source.len(), "parsing");
        let options = loxc_par::ParserOptions { preserve_comments: false, extra_features: self.config.extra_features };
        let program = loxc_par::parse_with_options(source, &mut handler, options);
        if handler.has_errors() {
            report(&handler, &self.sources);
            return exit_code::STATIC_ERROR;
        }

        if self.config.emit == EmitType::Ast {
            println!("{program:#?}");
            return exit_code::SUCCESS;
        }

        debug!(statements = program.len(), "resolving");
        let resolutions = loxc_sem::resolve(&program, &handler);
        if handler.has_errors() {
            report(&handler, &self.sources);
            return exit_code::STATIC_ERROR;
        }

        debug!("interpreting");
        match self.interp.exec_program(&program, &resolutions) {
            Ok(()) => exit_code::SUCCESS,
            Err(err) => { report_runtime_error(&err, &self.sources); exit_code::RUNTIME_ERROR },
        }
    }

    /// Tokenize `source` and print every token, per `--emit tokens`
    /// (spec.md §6). Does not touch the shared interpreter state.
    pub fn emit_tokens(&self, source: &str) {
        let mut handler = Handler::new();
        let mut lexer = loxc_lex::Lexer::new(source, &mut handler);
        loop {
            let token = lexer.next_token();
            let done = token == loxc_lex::Token::Eof;
            println!("{token:?}");
            if done { break; }
        }
    }

    /// Put the shared interpreter into REPL mode: every expression
    /// statement's value is echoed after its own effects (spec.md §6).
    pub fn set_repl(&mut self, repl: bool) {
        self.interp.repl = repl;
    }
}

fn display_name(path: &Path) -> String {
    path.display().to_string()
}

/// Renders every diagnostic as spec.md §4.5/§6 require: `file:line:col:
/// severity: message`, then the offending line, then a caret/tilde
/// underline (`SourceMap::format_span`).
fn report(handler: &Handler, sources: &SourceMap) {
    for diag in handler.diagnostics() {
        eprintln!("{}: {}", diag.level, diag.message);
        if let Some(rendered) = sources.format_span(diag.span) {
            eprintln!("{rendered}");
        }
    }
}

fn report_runtime_error(err: &RuntimeError, sources: &SourceMap) {
    let handler = Handler::new();
    err.emit(&handler);
    report(&handler, sources);
}
