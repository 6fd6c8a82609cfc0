use std::path::PathBuf;

use dotenvy::dotenv;
use shamir_reconstruction::{
    Config,
    test_cases::processor::{ProcessingOptions, process_test_cases},
};
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

const BANNER_WIDTH: usize = 60;

// Reconstructs the secret of every test case file given as argument.
// Run via
// ```
// cargo run -- <input1.json> [input2.json] ...
// ```
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    if let Err(err) = dotenv()
        && !err.not_found()
    {
        return Err(anyhow::anyhow!("Error while loading .env file: {err}"));
    }

    let config = match Config::parse_environment() {
        Ok(c) => c,
        Err(e) => {
            return Err(anyhow::anyhow!(
                "Failed to parse environment variables for configuration: {e}"
            ));
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(Into::<LevelFilter>::into(config.log_level)),
        )
        .init();

    let paths = std::env::args().skip(1).map(PathBuf::from).collect::<Vec<_>>();
    if paths.is_empty() {
        return Err(anyhow::anyhow!(
            "Usage: shamir_reconstruction <input1.json> [input2.json] ..."
        ));
    }

    info!(
        "Processing {} test cases with {:?} selection, up to {} at a time",
        paths.len(),
        config.selection_mode,
        config.concurrency
    );

    let reports = process_test_cases(paths, &ProcessingOptions::from(&config)).await;

    let mut failures = 0;
    for report in &reports {
        println!("{}", "=".repeat(BANNER_WIDTH));
        println!(
            "Processing Test Case {}: {}",
            report.index,
            report.path.display()
        );
        println!("{}", "=".repeat(BANNER_WIDTH));
        match &report.result {
            Ok(secret) => println!("SECRET FOR TEST CASE {}: {}\n", report.index, secret),
            Err(e) => {
                failures += 1;
                error!("Error processing {}: {}", report.path.display(), e);
                println!("FAILED TEST CASE {}: {}\n", report.index, e);
            }
        }
    }

    if failures > 0 {
        return Err(anyhow::anyhow!(
            "{failures} of {} test cases failed",
            reports.len()
        ));
    }

    Ok(())
}
