// SPDX-License-Identifier: Apache-2.0

//! Time statejson against serde_json on one document.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser as _;
use log::{debug, info};
use statejson::{parse_with_options, ParseOptions};

#[derive(clap::Parser, Debug)]
#[command(about = "Compare JSON parsing strategies on one document")]
struct Args {
    /// JSON file to parse
    file: PathBuf,
    /// Parses per strategy
    #[arg(short, long, default_value_t = 100)]
    iterations: u32,
}

fn time<T, E: std::fmt::Display>(
    name: &str,
    iterations: u32,
    mut run: impl FnMut() -> Result<T, E>,
) -> Result<Duration, String> {
    let start = Instant::now();
    for _ in 0..iterations {
        run().map_err(|e| format!("{name}: {e}"))?;
    }
    let elapsed = start.elapsed();
    let per_parse = elapsed / iterations.max(1);
    println!("{name:<20} {per_parse:>12?} per parse");
    Ok(per_parse)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let text = match fs::read_to_string(&args.file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: Unable to read file '{}': {}", args.file.display(), e);
            std::process::exit(1);
        }
    };
    info!("Read {} bytes from {}", text.len(), args.file.display());

    let results = [
        time("statejson-strict", args.iterations, || {
            parse_with_options(&text, ParseOptions::default())
        }),
        time("statejson-trusted", args.iterations, || {
            parse_with_options(&text, ParseOptions::trusted())
        }),
        time("serde_json", args.iterations, || {
            serde_json::from_str::<serde_json::Value>(&text)
        }),
    ];

    let mut fastest: Option<(&str, Duration)> = None;
    for (name, result) in ["statejson-strict", "statejson-trusted", "serde_json"]
        .into_iter()
        .zip(results)
    {
        match result {
            Ok(per_parse) => {
                debug!("{name} finished");
                if fastest.map_or(true, |(_, best)| per_parse < best) {
                    fastest = Some((name, per_parse));
                }
            }
            Err(e) => {
                eprintln!("Error: JSON parsing failed: {e}");
                std::process::exit(1);
            }
        }
    }
    if let Some((name, _)) = fastest {
        println!("Fastest is {name}");
    }
}
