use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::metrics::ReliabilityRecord;

/// Result file for experiments XORing `k` chains, inside `outdir`.
pub fn results_path(outdir: &Path, k: usize) -> PathBuf {
    outdir.join(format!("out_rel_regular_pattern_{k}XOR.csv"))
}

/// Append `record` to the CSV file at `path`.
///
/// A missing file is created (with its parent directories) and starts with the
/// header row; an existing file only receives the new row.
pub fn append_record(path: &Path, record: &ReliabilityRecord) -> Result<()> {
    let is_new = !path.exists();
    if is_new {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open results file {}", path.display()))?;

    let mut content = String::new();
    if is_new {
        content.push_str(&ReliabilityRecord::COLUMNS.join(","));
        content.push('\n');
    }
    content.push_str(&record.to_csv_row());
    content.push('\n');

    file.write_all(content.as_bytes())
        .with_context(|| format!("failed to append result to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seed: u64) -> ReliabilityRecord {
        ReliabilityRecord {
            seed,
            n_bits: 32,
            k: 1,
            n_crps: 16,
            noise: 0.1,
            reliability: 0.25,
        }
    }

    #[test]
    fn path_names_xor_width() {
        assert_eq!(
            results_path(Path::new("Results"), 4),
            Path::new("Results/out_rel_regular_pattern_4XOR.csv")
        );
    }

    #[test]
    fn header_is_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep/out.csv");

        append_record(&path, &record(0)).unwrap();
        append_record(&path, &record(1)).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "seed,n_bits,k,n_CRPs,noise,reliability\n\
             0,32,1,16,0.1,0.25\n\
             1,32,1,16,0.1,0.25\n"
        );
    }
}
