use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pufrel_core::{
    append_record, load_or_init, results_path, run_experiment, ExperimentConfig, TracingSink,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Reliability of binary-coded-with-padding CRP subsets on a simulated XOR Arbiter PUF.
#[derive(Parser, Debug)]
#[command(name = "pufrel-experiment-bp", version)]
struct Cli {
    /// Directory receiving the results CSV
    #[arg(long, default_value = "./Results/")]
    outdir: PathBuf,

    /// Random seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Challenge length in bits
    #[arg(long = "n-bits", default_value_t = 64)]
    n_bits: usize,

    /// The number of parallel arbiter chains in the XOR PUF
    #[arg(long, default_value_t = 1)]
    k: usize,

    /// Number of CRPs to be generated
    #[arg(long = "n-CRPs", default_value_t = 1 << 16)]
    n_crps: usize,

    /// Number of repeated noisy measurements
    #[arg(long = "n-evals", default_value_t = 10)]
    n_evals: usize,

    /// Noise factor added to PUF parameters
    #[arg(long, default_value_t = 0.1)]
    noise: f64,

    /// JSON configuration file; created from the other flags when missing
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn experiment_config(&self) -> ExperimentConfig {
        ExperimentConfig {
            seed: self.seed,
            n_bits: self.n_bits,
            k: self.k,
            n_crps: self.n_crps,
            n_evals: self.n_evals,
            noise: self.noise,
        }
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => load_or_init(path, || cli.experiment_config())?,
        None => cli.experiment_config(),
    };

    info!(
        seed = config.seed,
        n_bits = config.n_bits,
        k = config.k,
        n_crps = config.n_crps,
        n_evals = config.n_evals,
        noise = config.noise,
        "running reliability experiment"
    );

    let record = run_experiment(&config, &TracingSink).context("experiment failed")?;

    let path = results_path(&cli.outdir, config.k);
    append_record(&path, &record)?;

    println!("bit-error rate (reliability): {}", record.reliability);
    println!("results appended to {}", path.display());

    Ok(())
}
