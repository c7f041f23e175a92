mod cli;
mod timeout;

use std::path::Path;
use std::time::Instant;

use eyre::Result;

use mcis::config::Config;
use mcis::error::Error;
use mcis::search::{self, AbortFlag, VtxPair};
use mcis::{graph, Graph};

fn main() -> Result<()> {
    let args = match cli::parse() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_logging(args.verbose);

    let g0 = load_graph(&args.filename1)?;
    let g1 = load_graph(&args.filename2)?;
    log::debug!("graph 1: {g0}");
    log::debug!("graph 2: {g1}");

    let config = Config::new(
        args.driver,
        args.connected,
        args.quiet,
        args.verbose,
        args.timeout,
    );
    log::debug!("config: {config}");

    let abort = AbortFlag::new();
    let guard = timeout::TimeoutGuard::start(config.timeout, abort.clone());

    let start = Instant::now();
    let stats = search::run(&g0, &g1, &config, &abort, |mapping| {
        if !config.quiet {
            print_mapping(mapping);
        }
    });
    let elapsed_ms = start.elapsed().as_millis();

    let timed_out = guard.stop();

    println!("Solutions:                  {}", stats.solutions);
    println!("Nodes:                      {}", stats.nodes);
    println!("CPU time (ms):              {elapsed_ms}");
    if timed_out {
        println!("TIMEOUT");
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn load_graph(path: &Path) -> Result<Graph> {
    graph::parse(path).map_err(|err| match err {
        Error::Io { .. } => eyre::eyre!("Cannot open file"),
        Error::ParseGraph { .. } => eyre::Report::new(err),
    })
}

fn print_mapping(mapping: &[VtxPair]) {
    let mut line = String::new();
    for pair in mapping {
        line.push_str(&format!("  ({} {})", pair.v, pair.w));
    }
    println!("{line}");
}
