//! Replay recorded progress snapshots through the estimator.
//!
//! Input is newline-delimited JSON, one snapshot per line, e.g.
//! ```txt
//! {"countBuilt": 1, "countTodo": 9, "timeBuilt": 10.0, "timeTodo": [90.0, 0]}
//! ```
//! Each line is one sample. After the last line, the last snapshot keeps
//! being sampled until Ctrl-C.
use std::io::BufRead as _;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use pistonite_eta as eta;
use eta::pre::*;

#[derive(Debug, Parser)]
#[clap(about = "Replay build progress snapshots and print the estimated progress")]
struct Cli {
    /// File with one JSON snapshot per line. Reads stdin if not set
    input: Option<PathBuf>,
    /// Seconds between two samples
    #[clap(short, long, default_value_t = 1.0)]
    interval: f64,
    /// Don't wait between samples (the estimate still assumes `interval` has passed)
    #[clap(long)]
    no_wait: bool,
    /// Also set the terminal title
    #[clap(long)]
    title: bool,
    /// Also forward to the external progress program
    #[clap(long)]
    program: bool,
    /// Stop after the input runs out, instead of waiting for Ctrl-C
    #[clap(long)]
    exit: bool,
    /// Verbose. More -v makes it more verbose (opposite of --quiet)
    #[clap(short = 'v', long, action(clap::ArgAction::Count))]
    verbose: u8,
    /// Quiet. More -q makes it more quiet (opposite of --verbose)
    #[clap(short = 'q', long, action(clap::ArgAction::Count))]
    quiet: u8,
}

fn main() -> eta::Result<()> {
    let args = Cli::parse();
    let level = args.verbose.min(2) as i8 - args.quiet.min(2) as i8;
    eta::init_print_options(level.into());

    let snapshots = read_snapshots(args.input.as_deref())?;
    eta::ensure!(!snapshots.is_empty(), "no snapshots in input");
    eta::debug!("read {} snapshots", snapshots.len());

    let interval = Duration::try_from_secs_f64(args.interval)
        .with_context(|| format!("invalid interval: {}", args.interval))?;
    let mut config = eta::ProgressConfig::default()
        .interval(interval)
        .sleep(!args.no_wait)
        .titlebar(args.title);
    if !args.program {
        config = config.program("");
    }
    config.validate()?;

    let cancel = eta::CancelToken::on_ctrlc()?;
    let total = snapshots.len();
    let mut snapshots = snapshots.into_iter();
    let mut last = eta::Snapshot::default();
    let mut sampled = 0usize;
    let accessor = {
        let cancel = cancel.clone();
        move || {
            if let Some(next) = snapshots.next() {
                last = next;
            }
            sampled += 1;
            if args.exit && sampled >= total {
                cancel.cancel();
            }
            last.clone()
        }
    };

    let mut forward = eta::config_sink(&config);
    eta::display(
        &config,
        accessor,
        |message| {
            println!("{message}");
            forward(message);
        },
        &cancel,
    );
    Ok(())
}

fn read_snapshots(input: Option<&std::path::Path>) -> eta::Result<Vec<eta::Snapshot>> {
    let reader: Box<dyn std::io::BufRead> = match input {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("failed to open '{}'", path.display()))?;
            Box::new(std::io::BufReader::new(file))
        }
        None => Box::new(std::io::stdin().lock()),
    };
    let mut snapshots = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.context("failed to read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let snapshot: eta::Snapshot = serde_json::from_str(line)
            .with_context(|| format!("failed to parse snapshot on line {}", i + 1))?;
        snapshots.push(snapshot);
    }
    Ok(snapshots)
}
