//! Additive-delay XOR Arbiter PUF simulation.
//!
//! Each of the `k` arbiter chains holds `n` Gaussian weights. A challenge is
//! mapped to the parity feature vector `phi_i = prod_{j >= i} c_j`; a chain
//! answers with the sign of `w . phi` (plus evaluation noise), and the PUF
//! answers with the product of its chains.

use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal, StandardNormal};

use crate::challenge::ChallengeSet;
use crate::error::{Error, Result};
use crate::reliability::{PrimitiveModel, ResponseSet};
use crate::rng::{stream_rng, NOISE_STREAM, WEIGHT_STREAM};

#[derive(Debug)]
pub struct XorArbiterPuf {
    n: usize,
    k: usize,
    /// `k` rows of `n` weights.
    weights: Vec<f64>,
    noise: Option<(Normal<f64>, StdRng)>,
    seed: u64,
}

impl XorArbiterPuf {
    /// Noiseless instance; the same `(n, k, seed)` always yields the same weights.
    pub fn new(n: usize, k: usize, seed: u64) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidConfig("challenge length must be positive".into()));
        }
        if k == 0 {
            return Err(Error::InvalidConfig("at least one arbiter chain is required".into()));
        }

        let mut rng = stream_rng(seed, WEIGHT_STREAM);
        let weights = (0..n * k)
            .map(|_| StandardNormal.sample(&mut rng))
            .collect();

        Ok(Self {
            n,
            k,
            weights,
            noise: None,
            seed,
        })
    }

    /// Adds Gaussian delay noise with deviation `sqrt(n) * noisiness` per chain
    /// and evaluation. A noisiness of zero keeps the instance noiseless.
    pub fn with_noise(mut self, noisiness: f64) -> Result<Self> {
        if !noisiness.is_finite() || noisiness < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "noisiness must be a non-negative number, got {noisiness}"
            )));
        }

        self.noise = if noisiness == 0.0 {
            None
        } else {
            let sigma = (self.n as f64).sqrt() * noisiness;
            let normal = Normal::new(0.0, sigma)
                .map_err(|err| Error::InvalidConfig(format!("noise distribution: {err}")))?;
            Some((normal, stream_rng(self.seed, NOISE_STREAM)))
        };
        Ok(self)
    }

    pub fn challenge_length(&self) -> usize {
        self.n
    }

    pub fn chains(&self) -> usize {
        self.k
    }

    pub fn is_noisy(&self) -> bool {
        self.noise.is_some()
    }

    fn respond(&mut self, challenge: &[i8], features: &mut [f64]) -> i8 {
        let mut product = 1.0;
        for (feature, &bit) in features.iter_mut().zip(challenge).rev() {
            product *= f64::from(bit);
            *feature = product;
        }

        let mut response = 1i8;
        for chain in self.weights.chunks_exact(self.n) {
            let mut delay: f64 = chain.iter().zip(features.iter()).map(|(w, f)| w * f).sum();
            if let Some((normal, rng)) = self.noise.as_mut() {
                delay += normal.sample(rng);
            }
            if delay < 0.0 {
                response = -response;
            }
        }
        response
    }
}

impl PrimitiveModel for XorArbiterPuf {
    fn evaluate(&mut self, challenges: &ChallengeSet) -> Result<ResponseSet> {
        if challenges.width() != self.n {
            return Err(Error::ChallengeWidthMismatch {
                expected: self.n,
                actual: challenges.width(),
            });
        }

        let mut features = vec![0.0; self.n];
        let responses = challenges
            .rows()
            .map(|challenge| self.respond(challenge, &mut features))
            .collect::<Vec<_>>();
        Ok(ResponseSet::new(responses))
    }
}
