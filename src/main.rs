use std::io::{self, BufWriter};
use std::process;

use anyhow::{Context, Result};
use student_roster::{roster, Config};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // stdout carries the roster, logs go to stderr
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::default();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    roster::run(&config, &mut out)
        .with_context(|| format!("reading {}", config.input.display()))?;
    Ok(())
}
