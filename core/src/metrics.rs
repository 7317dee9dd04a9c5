use serde::{Deserialize, Serialize};

use crate::config::ExperimentConfig;
use crate::reliability::ReliabilityResult;

/// One result row of a reliability experiment.
///
/// `reliability` holds the bit-error rate of the noisy instance: lower is
/// more reliable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityRecord {
    pub seed: u64,
    pub n_bits: usize,
    pub k: usize,
    #[serde(rename = "n_CRPs")]
    pub n_crps: usize,
    pub noise: f64,
    pub reliability: f64,
}

impl ReliabilityRecord {
    pub const COLUMNS: [&'static str; 6] = [
        "seed",
        "n_bits",
        "k",
        "n_CRPs",
        "noise",
        "reliability",
    ];

    pub fn new(config: &ExperimentConfig, result: &ReliabilityResult) -> Self {
        Self {
            seed: config.seed,
            n_bits: config.n_bits,
            k: config.k,
            n_crps: config.n_crps,
            noise: config.noise,
            reliability: result.bit_error_rate(),
        }
    }

    /// Comma-separated values in [`Self::COLUMNS`] order.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.seed,
            self.n_bits,
            self.k,
            self.n_crps,
            format_float(self.noise),
            format_float(self.reliability)
        )
    }
}

// Plain notation for whole numbers keeps a trailing `.0`; magnitudes below
// 1e-4 or from 1e16 up use a signed, two-digit exponent (`1.5e-06`).
fn format_float(value: f64) -> String {
    let magnitude = value.abs();
    if value.is_finite() && value != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let scientific = format!("{value:e}");
        if let Some((mantissa, exponent)) = scientific.split_once('e') {
            if let Ok(exponent) = exponent.parse::<i32>() {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{mantissa}e{sign}{:02}", exponent.abs());
            }
        }
        scientific
    } else if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(noise: f64, reliability: f64) -> ReliabilityRecord {
        ReliabilityRecord {
            seed: 3,
            n_bits: 64,
            k: 2,
            n_crps: 1000,
            noise,
            reliability,
        }
    }

    #[test]
    fn csv_row_follows_column_order() {
        assert_eq!(record(0.1, 0.0125).to_csv_row(), "3,64,2,1000,0.1,0.0125");
    }

    #[test]
    fn whole_floats_keep_decimal_point() {
        assert_eq!(record(0.0, 0.0).to_csv_row(), "3,64,2,1000,0.0,0.0");
    }

    #[test]
    fn tiny_and_huge_floats_use_exponent_notation() {
        assert_eq!(format_float(1.52587890625e-06), "1.52587890625e-06");
        assert_eq!(format_float(1e-5), "1e-05");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1e-4), "0.0001");
        assert_eq!(format_float(123.0), "123.0");
        assert_eq!(
            record(0.1, 1.52587890625e-06).to_csv_row(),
            "3,64,2,1000,0.1,1.52587890625e-06"
        );
    }

    #[test]
    fn serializes_with_crp_column_name() {
        let json = serde_json::to_value(record(0.1, 0.5)).unwrap();
        assert_eq!(json["n_CRPs"], 1000);
        assert_eq!(json["reliability"], 0.5);
    }
}
