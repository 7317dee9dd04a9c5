//! Binary-coded-with-padding challenge construction.
//!
//! Every challenge starts as a 16-bit counter codeword (high byte, low byte,
//! most significant bit first). Wider challenges interleave constant `-1`
//! filler bits into the codeword and then add cyclically rotated copies of the
//! padded population. Rows are de-duplicated in construction order.

use std::collections::HashSet;
use std::slice::ChunksExact;

use crate::error::{Error, Result};
use crate::events::{Event, EventSink, NullSink};

/// Width of the counter codeword every challenge is built from.
pub const BASE_WIDTH: usize = 16;

/// Upper bound on the number of distinct challenges handed out for any width.
pub const MAX_CHALLENGES: usize = (1 << 18) - 3;

const BASE_POPULATION: usize = 1 << BASE_WIDTH;
const BYTE_VALUES: usize = 256;
const PADDING: i8 = -1;

/// An ordered set of distinct bipolar challenges sharing one width.
///
/// Rows are stored back to back; every element is `-1` or `+1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeSet {
    width: usize,
    bits: Vec<i8>,
}

impl ChallengeSet {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.bits.len() / self.width
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[i8]> {
        let start = index.checked_mul(self.width)?;
        let end = start.checked_add(self.width)?;
        self.bits.get(start..end)
    }

    pub fn rows(&self) -> ChunksExact<'_, i8> {
        self.bits.chunks_exact(self.width)
    }

    /// All rows concatenated in order.
    pub fn as_flat(&self) -> &[i8] {
        &self.bits
    }
}

/// Shape parameters derived from a requested challenge width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Layout {
    n_bits: usize,
    multiplier: usize,
    padding_iterations: usize,
}

impl Layout {
    fn for_width(n_bits: usize) -> Result<Self> {
        if n_bits == 0 || n_bits % BASE_WIDTH != 0 {
            return Err(Error::InvalidWidth {
                n_bits,
                reason: format!("must be a positive multiple of {BASE_WIDTH}"),
            });
        }

        let multiplier = n_bits / BASE_WIDTH;
        let padding_iterations = padding_iterations(multiplier);
        let padded_width = u32::try_from(padding_iterations)
            .ok()
            .and_then(|shift| 1usize.checked_shl(shift))
            .and_then(|factor| factor.checked_mul(BASE_WIDTH));

        if padded_width != Some(n_bits) {
            return Err(Error::InvalidWidth {
                n_bits,
                reason: format!(
                    "{padding_iterations} padding iteration(s) do not produce {n_bits} bits"
                ),
            });
        }

        Ok(Self {
            n_bits,
            multiplier,
            padding_iterations,
        })
    }

    /// Padded codeword for one (high byte, low byte) pair, before rotation.
    fn base_row(&self, high: u8, low: u8) -> Vec<i8> {
        let mut row = Vec::with_capacity(self.n_bits);
        push_byte_bits(&mut row, high);
        push_byte_bits(&mut row, low);

        for iteration in 0..self.padding_iterations {
            row = insert_padding(&row, BASE_WIDTH << iteration);
        }

        row
    }
}

/// Checks that `n_bits` is a width the construction can reach exactly.
pub fn validate_width(n_bits: usize) -> Result<()> {
    Layout::for_width(n_bits).map(|_| ())
}

/// Builds `count` distinct challenges of `n_bits` bits each.
///
/// The output is fully determined by `(n_bits, count)`.
pub fn generate(n_bits: usize, count: usize) -> Result<ChallengeSet> {
    generate_with_sink(n_bits, count, &NullSink)
}

/// Same as [`generate`], reporting progress to `sink`.
pub fn generate_with_sink(
    n_bits: usize,
    count: usize,
    sink: &dyn EventSink,
) -> Result<ChallengeSet> {
    let layout = Layout::for_width(n_bits)?;
    if count > MAX_CHALLENGES {
        return Err(Error::InsufficientCandidates {
            requested: count,
            available: MAX_CHALLENGES,
        });
    }

    sink.record(Event::GenerationStarted {
        n_bits,
        requested: count,
    });

    let (high, low) = byte_ramps();
    for iteration in 0..layout.padding_iterations {
        sink.record(Event::PaddingApplied {
            iteration,
            width: BASE_WIDTH << (iteration + 1),
        });
    }

    // Candidates are visited in construction order (unrotated block first,
    // then shifts 1..multiplier), so keeping the first occurrence of each row
    // and stopping at `count` matches de-duplicating the full set.
    let mut seen = HashSet::with_capacity(count);
    let mut bits = Vec::with_capacity(count * n_bits);
    let mut kept = 0;

    'blocks: for shift in 0..layout.multiplier {
        if kept == count {
            break;
        }
        if shift > 0 {
            sink.record(Event::RotationBlockAppended { shift });
        }

        for index in 0..BASE_POPULATION {
            let mut row = layout.base_row(high[index], low[index]);
            row.rotate_right(shift);
            if seen.insert(pack_row(&row)) {
                bits.extend_from_slice(&row);
                kept += 1;
                if kept == count {
                    break 'blocks;
                }
            }
        }
    }

    if kept < count {
        return Err(Error::InsufficientCandidates {
            requested: count,
            available: kept,
        });
    }

    sink.record(Event::GenerationFinished {
        kept,
        requested: count,
    });

    Ok(ChallengeSet {
        width: n_bits,
        bits,
    })
}

/// Number of padding passes for a width multiplier: `floor(sqrt(multiplier))`,
/// or none when the challenge is exactly one codeword wide.
fn padding_iterations(multiplier: usize) -> usize {
    if multiplier <= 1 {
        return 0;
    }

    let mut root = (multiplier as f64).sqrt() as usize;
    while root * root > multiplier {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= multiplier {
        root += 1;
    }
    root
}

/// High and low byte sequences of the base population.
///
/// The low byte cycles through `0..=255` (`index mod 256`); the high byte is
/// the same sequence stably sorted, giving 256 runs of 256 equal values.
fn byte_ramps() -> (Vec<u8>, Vec<u8>) {
    let low: Vec<u8> = (0..BASE_POPULATION)
        .map(|index| (index % BYTE_VALUES) as u8)
        .collect();
    let mut high = low.clone();
    high.sort();
    (high, low)
}

fn push_byte_bits(row: &mut Vec<i8>, byte: u8) {
    for shift in (0..8).rev() {
        let bit = (byte >> shift) & 1;
        row.push(2 * bit as i8 - 1);
    }
}

/// Places a filler bit after each of the first `count` entries of `row`.
fn insert_padding(row: &[i8], count: usize) -> Vec<i8> {
    let mut padded = Vec::with_capacity(row.len() + count);
    for (position, &value) in row.iter().enumerate() {
        padded.push(value);
        if position < count {
            padded.push(PADDING);
        }
    }
    padded
}

fn pack_row(row: &[i8]) -> Vec<u64> {
    let mut words = vec![0u64; row.len().div_ceil(64)];
    for (position, &value) in row.iter().enumerate() {
        if value > 0 {
            words[position / 64] |= 1 << (position % 64);
        }
    }
    words
}
