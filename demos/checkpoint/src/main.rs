//! checkpoint: staffing experiment for a two-stage airport security
//! checkpoint.
//!
//! Runs `--runs` independent six-hour simulations (by default) of passengers
//! arriving at 50 per minute, passing a boarding-pass check and then the
//! shortest personal-scanner queue, and reports how often the mean wait stayed
//! within the target.
//!
//! ```console
//! $ cargo run --release -p checkpoint -- --checkers 30 --scanners 30
//! $ cargo run --release -p checkpoint -- --output output/checkpoint --verbose
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ap_core::AirportConfig;
use ap_output::{CsvWriter, ExperimentOutputObserver};
use ap_runner::{Experiment, ExperimentResult, NoopExperimentObserver};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "checkpoint", about = "Airport security checkpoint staffing experiment")]
struct Args {
    /// Independent runs to average over
    #[arg(long = "runs", default_value_t = AirportConfig::default().num_runs)]
    num_runs: u32,

    /// Boarding-pass checkers (one shared queue)
    #[arg(long = "checkers", default_value_t = AirportConfig::default().num_checkers)]
    num_checkers: u32,

    /// Personal scanners (one queue each)
    #[arg(long = "scanners", default_value_t = AirportConfig::default().num_scanners)]
    num_scanners: u32,

    /// Passenger arrivals per minute
    #[arg(long, default_value_t = AirportConfig::default().arrival_rate)]
    arrival_rate: f64,

    /// Mean boarding-pass check time in minutes
    #[arg(long, default_value_t = AirportConfig::default().boarding_pass_mean)]
    boarding_pass_mean: f64,

    /// Minimum personal-scan time in minutes
    #[arg(long, default_value_t = AirportConfig::default().min_scan)]
    min_scan: f64,

    /// Maximum personal-scan time in minutes
    #[arg(long, default_value_t = AirportConfig::default().max_scan)]
    max_scan: f64,

    /// Length of each run in minutes
    #[arg(long, default_value_t = AirportConfig::default().sim_time)]
    sim_time: f64,

    /// Target mean wait in minutes
    #[arg(long = "threshold", default_value_t = AirportConfig::default().wait_threshold)]
    wait_threshold: f64,

    /// Seed of the first run; run i uses seed + i
    #[arg(long = "seed", default_value_t = AirportConfig::default().base_seed)]
    base_seed: u64,

    /// Write passengers.csv, run_summaries.csv and experiment.csv here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the experiment result as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Log experiment progress
    #[arg(short, long)]
    verbose: bool,

    /// Log every run
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn config(&self) -> AirportConfig {
        AirportConfig {
            num_runs:           self.num_runs,
            num_checkers:       self.num_checkers,
            num_scanners:       self.num_scanners,
            arrival_rate:       self.arrival_rate,
            boarding_pass_mean: self.boarding_pass_mean,
            min_scan:           self.min_scan,
            max_scan:           self.max_scan,
            sim_time:           self.sim_time,
            wait_threshold:     self.wait_threshold,
            base_seed:          self.base_seed,
        }
    }

    fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

/// `RUST_LOG` wins over the flags when set.
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level());

    let config = args.config();
    let experiment = Experiment::new(config.clone()).context("invalid configuration")?;

    let t0 = Instant::now();
    let result = match &args.output {
        Some(dir) => {
            let writer = CsvWriter::new(dir)
                .with_context(|| format!("creating output in {}", dir.display()))?;
            let mut obs = ExperimentOutputObserver::new(writer, config.wait_threshold);
            let result = experiment.run_with(&mut obs)?;
            if let Some(e) = obs.take_error() {
                eprintln!("output error: {e}");
            }
            info!(dir = %dir.display(), "output written");
            result
        }
        None => experiment.run_with(&mut NoopExperimentObserver)?,
    };
    let elapsed = t0.elapsed();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_report(&config, &result);
    println!();
    println!("Total simulation run time: {:.3} s", elapsed.as_secs_f64());

    Ok(())
}

fn print_report(config: &AirportConfig, result: &ExperimentResult) {
    println!("=== checkpoint: airport security staffing ===");
    println!(
        "Checkers: {}  |  Scanners: {}  |  Runs: {}  |  Horizon: {} min",
        config.num_checkers, config.num_scanners, config.num_runs, config.sim_time
    );
    println!(
        "Offered load: check {:.2}  |  scan {:.2}",
        config.checker_utilisation(),
        config.scanner_utilisation()
    );
    println!();

    println!(
        "{:<6} {:<8} {:>9} {:>10} {:>15}",
        "Run", "Seed", "Arrivals", "Completed", "Avg Wait Time"
    );
    println!("{}", "-".repeat(52));
    for run in &result.runs {
        let mean = run
            .mean_wait
            .map_or_else(|| "-".to_owned(), |w| format!("{w:.4}"));
        println!(
            "{:<6} {:<8} {:>9} {:>10} {:>15}",
            run.run.0 + 1,
            run.seed,
            run.arrivals,
            run.completed,
            mean
        );
    }
    println!();

    println!(
        "% of runs where wait time is at most {} mins with {} boarding pass checkers and {} personal scanners is {:.1}%",
        result.threshold,
        config.num_checkers,
        config.num_scanners,
        result.success_rate * 100.0
    );
    match result.grand_mean {
        Some(mean) => println!("Avg Wait Time across runs: {mean:.4}"),
        None => println!("Avg Wait Time across runs: no passenger completed"),
    }
}
