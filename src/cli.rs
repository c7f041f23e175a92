use std::path::PathBuf;

use eyre::{bail, Result};
use pico_args::Arguments;

use crate::config::Driver;

const USAGE: &str = "\
Usage: mcis [OPTIONS] FILENAME1 FILENAME2

Enumerate maximal common induced subgraphs between two labelled graphs.

Arguments:
  FILENAME1             first graph, \"n m / labels / edges\" text format
  FILENAME2             second graph, same format

Options:
  -c, --connected        restrict search to connected common subgraphs
      --driver <DRIVER>  explicit|implicit, connected search only (default: explicit)
  -t, --timeout <SECS>   abort after SECS wall-clock seconds, 0 for none (default: 0)
  -q, --quiet            suppress per-solution output
  -v, --verbose          trace search progress at debug level
  -h, --help             print this message and exit";

#[derive(Debug)]
pub struct AppArgs {
    pub filename1: PathBuf,
    pub filename2: PathBuf,
    pub quiet: bool,
    pub verbose: bool,
    pub connected: bool,
    pub driver: Driver,
    pub timeout: u64,
}

/// Parses `std::env::args`, following the shape (and the `pico-args` choice)
/// of the teacher's own `cli::main()`. Prints the usage message and exits 0
/// on `-h/--help`; any other argument-parsing failure is returned as an
/// [`eyre::Report`] so `main` can map it to exit code 2.
pub fn parse() -> Result<AppArgs> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        println!("{USAGE}");
        std::process::exit(0);
    }

    let quiet = pargs.contains(["-q", "--quiet"]);
    let verbose = pargs.contains(["-v", "--verbose"]);
    let connected = pargs.contains(["-c", "--connected"]);
    let timeout = pargs
        .opt_value_from_str(["-t", "--timeout"])?
        .unwrap_or(0u64);
    let driver = pargs.opt_value_from_str("--driver")?;

    let filename1 = pargs.free_from_os_str(as_path_buf)?;
    let filename2 = pargs.free_from_os_str(as_path_buf)?;

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        bail!("unrecognized argument(s): {:?}\n\n{}", remaining, USAGE);
    }

    if driver == Some(Driver::Implicit) && !connected {
        bail!("--driver implicit requires -c/--connected\n\n{}", USAGE);
    }
    let driver = driver.unwrap_or_default();

    Ok(AppArgs {
        filename1,
        filename2,
        quiet,
        verbose,
        connected,
        driver,
        timeout,
    })
}

fn as_path_buf(arg: &std::ffi::OsStr) -> Result<PathBuf, &'static str> {
    Ok(arg.into())
}
