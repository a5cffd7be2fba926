//! Cache-parity log comparison for the Connect-4 search engine.
//!
//! Main entry point for the comparison tool.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use c4_compare::compare::{CompareError, compare_files};
use c4_compare::parse::ParseError;
use c4_compare::report::CompareReport;

/// Compare a cache-enabled search log against a cache-disabled one
#[derive(Parser, Debug)]
#[command(name = "c4-compare")]
#[command(author, version, about = "Verify that the transposition cache does not change search behavior", long_about = None)]
struct Args {
    /// Log file from the cache-enabled run
    docache: PathBuf,

    /// Log file from the cache-disabled run
    nocache: PathBuf,

    /// Print totals after the comparison
    #[arg(short = 's', long = "summary")]
    summary: bool,

    /// Emit the full report as JSON instead of per-mismatch lines
    #[arg(long = "json")]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut report = CompareReport::new();
    let result = compare_files(&args.docache, &args.nocache, &mut report);

    // Everything found before a fatal error still gets reported.
    if args.json {
        println!("{}", report.to_json());
    } else {
        for mismatch in &report.mismatches {
            println!("{}", mismatch);
        }
    }

    match result {
        Ok(()) => {
            if !args.json {
                println!("Logs compare okay");
            }
            if args.summary {
                report.print_summary();
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let Some((do_key, no_key)) = err.cursor_keys() {
                println!("do={}", do_key);
                println!("no={}", no_key);
                eprintln!("Bad Compare");
            } else if let CompareError::Parse {
                source: source @ ParseError::MalformedRecord(_),
                ..
            } = &err
            {
                // Keep the historical diagnostic byte-for-byte.
                eprintln!("{}", source);
            } else {
                eprintln!("{}", err);
            }
            ExitCode::FAILURE
        }
    }
}
