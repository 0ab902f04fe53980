use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process;

use bstree::interpreter::Interpreter;
use clap::{ArgAction, Parser, ValueHint};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

/// Runs a program written in the binary search tree command language
/// (insert <item>, delete <item>, trim, traverse, stats)
#[derive(Parser, Debug)]
#[command(name = "bstree")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more to stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    debug: u8,

    /// File containing the program to run
    #[arg(value_hint = ValueHint::FilePath)]
    program: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let file = match File::open(&cli.program) {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(error = %e, path = %cli.program.display(), "open failed");
            eprintln!("Unable to open {} for input.", cli.program.display());
            process::exit(2);
        }
    };

    let stdout = BufWriter::new(io::stdout().lock());
    let mut interpreter = Interpreter::new(cli.program.display().to_string(), stdout);
    if let Err(e) = interpreter.run(BufReader::new(file)) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn setup_logging(verbosity: u8) {
    let filter = level_for(verbosity);
    let fmt_layer = fmt::layer().with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    tracing::debug!(?filter, "logging initialized");
}
