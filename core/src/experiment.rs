//! End-to-end reliability experiment on binary-coded-with-padding challenges.

use crate::challenge::generate_with_sink;
use crate::config::ExperimentConfig;
use crate::error::Result;
use crate::events::EventSink;
use crate::metrics::ReliabilityRecord;
use crate::puf::XorArbiterPuf;
use crate::reliability::evaluate_with_sink;

/// Runs one experiment described by `config`.
///
/// A noiseless and a noisy XOR Arbiter PUF are built from the same seed, the
/// challenge subset is generated, and the noisy instance is measured
/// `n_evals` times against the noiseless responses.
pub fn run_experiment(
    config: &ExperimentConfig,
    sink: &dyn EventSink,
) -> Result<ReliabilityRecord> {
    config.validate()?;

    let mut reference = XorArbiterPuf::new(config.n_bits, config.k, config.seed)?;
    let mut noisy =
        XorArbiterPuf::new(config.n_bits, config.k, config.seed)?.with_noise(config.noise)?;

    let challenges = generate_with_sink(config.n_bits, config.n_crps, sink)?;
    let result = evaluate_with_sink(
        &challenges,
        &mut reference,
        &mut noisy,
        config.n_evals,
        sink,
    )?;

    Ok(ReliabilityRecord::new(config, &result))
}
