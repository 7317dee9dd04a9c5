use std::fs;

use pufrel_core::{
    append_record, evaluate, generate, results_path, run_experiment, ExperimentConfig, NullSink,
    XorArbiterPuf,
};

#[test]
fn zero_noise_instance_reproduces_reference() {
    let challenges = generate(64, 4096).unwrap();
    let mut reference = XorArbiterPuf::new(64, 2, 0).unwrap();
    let mut noisy = XorArbiterPuf::new(64, 2, 0).unwrap().with_noise(0.0).unwrap();

    let result = evaluate(&challenges, &mut reference, &mut noisy, 10).unwrap();
    assert_eq!(result.bit_error_rate(), 0.0);
}

#[test]
fn noiseless_model_against_itself_is_perfectly_reliable() {
    let challenges = generate(32, 1024).unwrap();
    let mut reference = XorArbiterPuf::new(32, 4, 17).unwrap();
    let mut copy = XorArbiterPuf::new(32, 4, 17).unwrap();

    let result = evaluate(&challenges, &mut reference, &mut copy, 5).unwrap();
    assert_eq!(result.mismatches(), 0);
}

#[test]
fn more_noise_means_more_bit_errors() {
    let challenges = generate(64, 8192).unwrap();
    let rate = |noise: f64| {
        let mut reference = XorArbiterPuf::new(64, 1, 21).unwrap();
        let mut noisy = XorArbiterPuf::new(64, 1, 21).unwrap().with_noise(noise).unwrap();
        evaluate(&challenges, &mut reference, &mut noisy, 5)
            .unwrap()
            .bit_error_rate()
    };

    let low = rate(0.02);
    let high = rate(0.5);
    assert!((0.0..=1.0).contains(&low));
    assert!((0.0..=1.0).contains(&high));
    assert!(low < high, "low {low}, high {high}");
}

#[test]
fn experiment_rows_accumulate_in_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = results_path(dir.path(), 1);

    for seed in 0..2 {
        let config = ExperimentConfig {
            seed,
            n_bits: 32,
            k: 1,
            n_crps: 512,
            n_evals: 2,
            noise: 0.1,
        };
        let record = run_experiment(&config, &NullSink).unwrap();
        append_record(&path, &record).unwrap();
    }

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "seed,n_bits,k,n_CRPs,noise,reliability");
    assert!(lines[1].starts_with("0,32,1,512,0.1,"));
    assert!(lines[2].starts_with("1,32,1,512,0.1,"));
}
