use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};
use streamrank::StreamCapture;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File of whitespace-separated integers; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Largest ingestable value
    #[arg(short, long, default_value_t = 999)]
    bound: usize,

    /// Count ingested values strictly less than V (repeatable)
    #[arg(long, value_name = "V")]
    less: Vec<usize>,

    /// Count ingested values strictly greater than V (repeatable)
    #[arg(long, value_name = "V")]
    greater: Vec<usize>,

    /// Count ingested values within [L, U] inclusive (repeatable)
    #[arg(long, num_args = 2, value_names = ["L", "U"])]
    between: Vec<usize>,
}

#[derive(Serialize)]
struct Report {
    query: &'static str,
    args: Vec<usize>,
    count: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let text = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            buf
        }
    };

    let mut capture = StreamCapture::new(args.bound);
    for token in text.split_whitespace() {
        let value: usize = token
            .parse()
            .with_context(|| format!("invalid integer {token:?}"))?;
        capture
            .add(value)
            .with_context(|| format!("ingesting {value}"))?;
    }
    log::info!(
        "ingested {} values over domain [0, {}]",
        capture.total(),
        capture.bound()
    );

    let stats = capture.stats();
    let mut reports = Vec::new();
    for &value in &args.less {
        reports.push(Report {
            query: "less",
            args: vec![value],
            count: stats.less(value)?,
        });
    }
    for &value in &args.greater {
        reports.push(Report {
            query: "greater",
            args: vec![value],
            count: stats.greater(value)?,
        });
    }
    for pair in args.between.chunks_exact(2) {
        reports.push(Report {
            query: "between",
            args: pair.to_vec(),
            count: stats.between(pair[0], pair[1])?,
        });
    }
    if reports.is_empty() {
        reports.push(Report {
            query: "total",
            args: Vec::new(),
            count: capture.total(),
        });
    }

    for report in reports {
        println!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}
