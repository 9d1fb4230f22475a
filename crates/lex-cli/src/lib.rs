//! Shared plumbing for the `extract_element` and `get_stack_order` binaries:
//! argument parsing, stderr logging, and fatal-error exits.
use std::io::{self, IsTerminal as _, Write as _};
use std::path::PathBuf;

use clap::Parser;
use lex_core::Error;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout stays clean for JSON. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .init();
}

/// Like `P::parse()`, but usage errors exit with status 1.
pub fn parse_args<P: Parser>() -> P {
    P::try_parse().unwrap_or_else(|e| {
        if e.use_stderr() {
            let _ = e.print();
            std::process::exit(1);
        }
        e.exit()
    })
}

pub fn fail(err: &Error) -> ! {
    match err {
        Error::NoMatch { .. } => eprintln!("warning: {}", err),
        _ => eprintln!("error: {}", err),
    }
    std::process::exit(1);
}

/// Pretty JSON on stdout, newline terminated.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> lex_core::Result<()> {
    let write_err = |source: io::Error| Error::Write {
        path: PathBuf::from("<stdout>"),
        source,
    };
    let s = lex_core::to_pretty_json(value).map_err(|e| write_err(io::Error::other(e)))?;
    let mut out = io::stdout().lock();
    writeln!(out, "{}", s)
        .and_then(|_| out.flush())
        .map_err(write_err)
}
