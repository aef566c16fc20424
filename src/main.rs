// Compress or decompress from stdin to stdout:
//  - no arguments: compress
//  - a single -d: decompress
//  - anything else: print usage and exit 1
//
// The exit status is the pump outcome code, 0 on success.

use bzpipe::errors::*;
use bzpipe::{Outcome, Pump, Transfer};

use clap::{App, AppSettings, Arg};
use error_chain::ChainedError;
use std::io;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const APP_NAME: &str = "bzpipe";
const ABOUT_STR: &str = "Streams stdin through a bzip2 encoder or decoder into stdout";

const USAGE: &str = const_format::formatcp!("{} usage: {} [-d] < source > dest", APP_NAME, APP_NAME);

fn run(decompress: bool) -> Result<Transfer> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let pump = Pump::default();

    if decompress {
        pump.decompress(stdin.lock(), stdout.lock())
    } else {
        pump.compress(stdin.lock(), stdout.lock())
    }
}

fn describe(e: &Error) -> &'static str {
    match e.kind() {
        ErrorKind::SourceRead => "error reading stdin",
        ErrorKind::SinkWrite => "error writing stdout",
        _ => Outcome::from(e).message(),
    }
}

fn main() {
    // Logs go to stderr, stdout carries the stream.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let m = match App::new(APP_NAME)
        .about(ABOUT_STR)
        .setting(AppSettings::DisableHelpFlags)
        .setting(AppSettings::DisableVersion)
        .arg(
            Arg::with_name("decompress")
                .short("d")
                .help("decompress instead of compress"),
        )
        .get_matches_safe()
    {
        Ok(m) => m,
        Err(_) => {
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    let result = run(m.is_present("decompress"));
    if let Err(e) = &result {
        debug!("{}", e.display_chain());
        eprintln!("{}: {}", APP_NAME, describe(e));
    }

    std::process::exit(Outcome::of(&result).code());
}
