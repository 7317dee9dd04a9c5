//! Repeated noisy evaluation against a noiseless reference.

use serde::{Deserialize, Serialize};

use crate::challenge::ChallengeSet;
use crate::error::{Error, Result};
use crate::events::{Event, EventSink, NullSink};

/// Responses aligned 1:1 with the rows of a [`ChallengeSet`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseSet(Vec<i8>);

impl ResponseSet {
    pub fn new(responses: Vec<i8>) -> Self {
        Self(responses)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[i8] {
        &self.0
    }

    /// Number of positions where the two sets disagree.
    ///
    /// Both sets must have the same length; only the common prefix is
    /// compared otherwise.
    pub fn mismatches(&self, other: &ResponseSet) -> usize {
        debug_assert_eq!(self.len(), other.len(), "response sets are not aligned");
        self.0
            .iter()
            .zip(&other.0)
            .filter(|(left, right)| left != right)
            .count()
    }
}

impl From<Vec<i8>> for ResponseSet {
    fn from(responses: Vec<i8>) -> Self {
        Self::new(responses)
    }
}

/// A challenge-response primitive under test.
///
/// Noisy implementations draw fresh randomness on every call.
pub trait PrimitiveModel {
    fn evaluate(&mut self, challenges: &ChallengeSet) -> Result<ResponseSet>;
}

/// Outcome of one reliability evaluation.
///
/// The scalar is a bit-error rate: `0.0` means every noisy trial reproduced
/// the reference exactly, larger values mean less reliable responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliabilityResult {
    mismatches: u64,
    challenges: usize,
    trials: usize,
}

impl ReliabilityResult {
    pub fn mismatches(&self) -> u64 {
        self.mismatches
    }

    pub fn challenges(&self) -> usize {
        self.challenges
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Mismatched responses divided by `challenges * trials`.
    pub fn bit_error_rate(&self) -> f64 {
        self.mismatches as f64 / (self.challenges as f64 * self.trials as f64)
    }
}

/// Evaluates `challenges` once on `reference` and `trials` times on `noisy`,
/// aggregating the mismatches into a bit-error rate.
///
/// Model failures are returned as-is.
pub fn evaluate<R, N>(
    challenges: &ChallengeSet,
    reference: &mut R,
    noisy: &mut N,
    trials: usize,
) -> Result<ReliabilityResult>
where
    R: PrimitiveModel + ?Sized,
    N: PrimitiveModel + ?Sized,
{
    evaluate_with_sink(challenges, reference, noisy, trials, &NullSink)
}

/// Same as [`evaluate`], reporting progress to `sink`.
pub fn evaluate_with_sink<R, N>(
    challenges: &ChallengeSet,
    reference: &mut R,
    noisy: &mut N,
    trials: usize,
    sink: &dyn EventSink,
) -> Result<ReliabilityResult>
where
    R: PrimitiveModel + ?Sized,
    N: PrimitiveModel + ?Sized,
{
    if trials == 0 || challenges.is_empty() {
        return Err(Error::EmptyEvaluation);
    }

    let expected = reference.evaluate(challenges)?;
    ensure_aligned(challenges, &expected)?;
    sink.record(Event::ReferenceEvaluated {
        responses: expected.len(),
    });

    let mut mismatches = 0u64;
    for trial in 0..trials {
        let observed = noisy.evaluate(challenges)?;
        ensure_aligned(challenges, &observed)?;

        let errors = expected.mismatches(&observed);
        sink.record(Event::TrialCompleted {
            trial,
            mismatches: errors,
        });
        mismatches += errors as u64;
    }

    let result = ReliabilityResult {
        mismatches,
        challenges: challenges.len(),
        trials,
    };
    sink.record(Event::EvaluationFinished {
        bit_error_rate: result.bit_error_rate(),
    });

    Ok(result)
}

fn ensure_aligned(challenges: &ChallengeSet, responses: &ResponseSet) -> Result<()> {
    if responses.len() != challenges.len() {
        return Err(Error::ResponseCount {
            expected: challenges.len(),
            actual: responses.len(),
        });
    }
    Ok(())
}
