use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

#[derive(Parser)]
#[command(name = "pw-latency")]
#[command(about = "Compute per-run page walk latency from a perf stat log")]
struct Cli {
    #[arg(
        allow_hyphen_values = true,
        help = "Log written by perf stat around the benchmark runs"
    )]
    perf_log: PathBuf,
}

fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            println!("{}", Cli::command().render_usage());
            process::exit(1);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = parse_args();

    // The whole log is loaded before analysis starts
    let contents = fs::read_to_string(&cli.perf_log)
        .with_context(|| format!("Failed to read perf log: {}", cli.perf_log.display()))?;
    let lines: Vec<&str> = contents.lines().collect();
    log::debug!("Loaded {} lines from {}", lines.len(), cli.perf_log.display());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = perf_log::analyze(&lines, &mut out).context("Failed to write report")?;
    out.flush().context("Failed to write report")?;

    log::debug!("Analyzed {} runs", summary.runs());

    Ok(())
}
