//! Named defaults for experiments: the standard Lingo card, the standard trial count, and the published CDF of that card

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::Result;

/// Side length of the standard card
pub const STANDARD_DIM: usize = 5;

/// Flat indices of the cells that are crossed off on the standard card before the finale starts
pub const STANDARD_MARKED: [usize; 9] = [1, 3, 7, 8, 11, 13, 19, 20, 23];

/// Number of simulated finales for a publication-quality estimate
pub const STANDARD_TRIALS: u64 = 10_000_000;

/// The CDF of the standard card, estimated with [STANDARD_TRIALS] trials and legacy counting
pub const REFERENCE_CDF: [f64; 16] = [
    0.0, 0.0625054, 0.1250665, 0.1982667, 0.2911126, 0.4093409, 0.5512241, 0.703243,
    0.841298, 0.9392275, 0.9868886, 0.9990809, 1.0, 1.0, 1.0, 1.0,
];

/// The standard Lingo card
pub fn standard_card() -> Card {
    LingoConfig::default().card().expect("the standard layout is valid")
}

/// Which card to simulate and how much effort to put into it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LingoConfig {

    pub dim: usize,

    /// Flat indices of the cells crossed off before the finale
    pub marked: Vec<usize>,

    pub trials: u64,

}

impl LingoConfig {

    /// Build the card this configuration describes
    pub fn card(&self) -> Result<Card> {
        Card::from_marked(self.dim, &self.marked)
    }

    pub fn with_trials(self, trials: u64) -> Self {
        Self { trials, ..self }
    }
}

impl Default for LingoConfig {
    fn default() -> Self {
        Self {
            dim: STANDARD_DIM,
            marked: STANDARD_MARKED.to_vec(),
            trials: STANDARD_TRIALS,
        }
    }
}
