//! Thin binary wrapper around [`loxc_drv::Session`]. `loxi` is the real
//! user-facing CLI (argument parsing, config file, REPL); this binary
//! exists for running the driver standalone during development.

use std::path::PathBuf;

use loxc_drv::{Config, EmitType, Session};

fn main() {
    let mut config = Config::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--emit=tokens" => config.emit = EmitType::Tokens,
            "--emit=ast" => config.emit = EmitType::Ast,
            "--no-extra-features" => config.extra_features = false,
            path => config.input = Some(PathBuf::from(path)),
        }
    }

    let mut session = Session::new(config);
    let code = match session.run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            loxc_drv::exit_code::STATIC_ERROR
        },
    };
    std::process::exit(code);
}
