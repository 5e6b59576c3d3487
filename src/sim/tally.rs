//! Accumulation of first-win draw indices into cumulative counts, and the empirical CDFs they produce

use core::fmt;
use std::ops::Index;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::Counting;
use crate::error::{LingoError, Result};

/// Cumulative win counts over a number of trials
///
/// `counts[i]` is the number of trials that had already won by draw index `i`, so the counts never decrease along the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {

    counts: Vec<u64>,

    trials: u64,

}

impl Tally {

    /// Create an empty tally for a card with `len` open cells
    pub fn new(len: usize) -> Self {
        Self { counts: vec![0; len], trials: 0 }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Record one finished trial, which won at draw index `hit` (or never registered a win)
    pub fn record(&mut self, hit: Option<usize>) {
        self.trials += 1;
        if let Some(index) = hit {
            for count in &mut self.counts[index..] {
                *count += 1;
            }
        }
    }

    /// Fold another tally over the same card into this one
    pub fn merge(&mut self, other: &Tally) -> Result<()> {
        if self.len() != other.len() {
            return Err(LingoError::LengthMismatch { left: self.len(), right: other.len() });
        }
        for (count, &more) in self.counts.iter_mut().zip(&other.counts) {
            *count += more;
        }
        self.trials += other.trials;
        Ok(())
    }

    /// Normalize by the number of trials (an empty tally gives all zeros)
    pub fn cdf(&self) -> Cdf {
        if self.trials == 0 {
            return Cdf(vec![0.0; self.counts.len()]);
        }
        let trials = self.trials as f64;
        Cdf(self.counts.iter().map(|&count| count as f64 / trials).collect())
    }
}

/// An empirical cumulative distribution over draw indices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cdf(Vec<f64>);

impl Cdf {

    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Whether `self` is stochastically dominated by `reference` from index `from` onwards
    ///
    /// That is, at every draw index from `from` on, a win under `self` is at most as likely as under `reference`, so `self` takes at least as long to win.
    /// Entries past the end of the shorter vector are not compared.
    pub fn dominated_by(&self, reference: &Cdf, from: usize) -> bool {
        self.0.iter().zip(&reference.0).skip(from).all(|(mine, theirs)| mine <= theirs)
    }

    /// The largest absolute difference between two CDFs, over their common indices
    pub fn max_distance(&self, other: &Cdf) -> f64 {
        self.iter().zip(other.iter()).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max)
    }

    /// Expected number of draws until the win, for a CDF estimated with `counting`
    ///
    /// Probability mass never registered by the end of the vector is ignored.
    pub fn mean(&self, counting: Counting) -> f64 {
        let mut prev = 0.0;
        let mut mean = 0.0;
        for (index, p) in self.iter().enumerate() {
            mean += counting.draws(index) as f64 * (p - prev);
            prev = p;
        }
        mean
    }
}

impl Index<usize> for Cdf {
    type Output = f64;
    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl From<Vec<f64>> for Cdf {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Display like a vector of probabilities, i.e. `[0.0000000, 0.0625054, ...]`
///
/// The precision can be set with the usual specifier, e.g. `{:.3}`.
impl fmt::Display for Cdf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(7);
        write!(f, "[{}]", self.iter().map(|p| format!("{:.*}", precision, p)).join(", "))
    }
}
