use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::challenge::validate_width;
use crate::error::Error;

/// Parameters of one reliability experiment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub seed: u64,
    /// Challenge length in bits.
    pub n_bits: usize,
    /// Number of arbiter chains XORed together.
    pub k: usize,
    #[serde(rename = "n_CRPs")]
    pub n_crps: usize,
    /// Number of repeated noisy measurements.
    pub n_evals: usize,
    /// Noise factor of the noisy instance.
    pub noise: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            n_bits: 64,
            k: 1,
            n_crps: 1 << 16,
            n_evals: 10,
            noise: 0.1,
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> crate::Result<()> {
        validate_width(self.n_bits)?;
        if self.k == 0 {
            return Err(Error::InvalidConfig("k must be at least 1".into()));
        }
        if self.n_crps == 0 {
            return Err(Error::InvalidConfig("n_CRPs must be at least 1".into()));
        }
        if self.n_evals == 0 {
            return Err(Error::InvalidConfig("n_evals must be at least 1".into()));
        }
        if !self.noise.is_finite() || self.noise < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "noise must be a non-negative number, got {}",
                self.noise
            )));
        }
        Ok(())
    }
}

/// Load a JSON configuration from disk, creating it with the provided initializer if missing.
pub fn load_or_init<T, F>(path: &Path, initializer: F) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
{
    if path.exists() {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let value = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;
        Ok(value)
    } else {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let value = initializer();
        let serialized = serde_json::to_string_pretty(&value)?;
        fs::write(path, serialized)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ExperimentConfig::default().validate().is_ok());
    }

    #[test]
    fn json_uses_crp_column_name() {
        let json = serde_json::to_value(ExperimentConfig::default()).unwrap();
        assert_eq!(json["n_CRPs"], 65536);
        assert!(json.get("n_crps").is_none());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ExperimentConfig = serde_json::from_str(r#"{"seed": 4, "k": 2}"#).unwrap();
        assert_eq!(config.seed, 4);
        assert_eq!(config.k, 2);
        assert_eq!(config.n_bits, 64);
        assert_eq!(config.n_evals, 10);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let cases = [
            ExperimentConfig {
                n_bits: 48,
                ..Default::default()
            },
            ExperimentConfig {
                k: 0,
                ..Default::default()
            },
            ExperimentConfig {
                n_crps: 0,
                ..Default::default()
            },
            ExperimentConfig {
                n_evals: 0,
                ..Default::default()
            },
            ExperimentConfig {
                noise: -1.0,
                ..Default::default()
            },
        ];

        for config in cases {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn load_or_init_writes_then_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.json");

        let created: ExperimentConfig = load_or_init(&path, || ExperimentConfig {
            seed: 9,
            ..Default::default()
        })
        .unwrap();
        assert!(path.exists());

        let loaded: ExperimentConfig = load_or_init(&path, ExperimentConfig::default).unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.seed, 9);
    }
}
