//! Monte Carlo toolkit for the Lingo finale, estimating how many draws a card needs before it completes a row, column, or diagonal.
//!
//! Also, includes a randomized search for card layouts that perform worse than a reference layout, plotting of the resulting distributions, and the `lingo` command-line program.
//!

pub mod card;
pub mod sim;
pub mod search;
pub mod plot;
pub mod config;
pub mod error;
pub mod cli;

pub mod combrs;

pub use card::{Card, Cell, Line};
pub use error::{LingoError, Result};
pub use search::{find_dominated_layout, LayoutSearch, SearchOutcome};
pub use sim::{estimate_cdf, estimate_cdf_coupled, Cdf, Counting, Estimator, Tally};

use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use rand_seeder::Seeder;

/// Construct a random number generator from a seed string, or use a default-initialized one if no seed is provided
///
/// Every shuffle and layout sample in this crate draws from an RNG passed in by the caller, so a seeded RNG makes whole experiments repeatable.
pub fn rng_from_seed<S: AsRef<[u8]>>(seed: Option<S>) -> Box<dyn RngCore> {
    match seed {
        // with a seed, create a ChaCha20Rng from the seed
        Some(seed) => Box::new(Seeder::from(seed.as_ref()).into_rng::<ChaCha20Rng>()),
        // without a seed, use the default random number generator
        None => Box::new(rand::rng()),
    }
}
