//! Monte Carlo estimation of how many draws a card needs before it has Lingo
//!
//! Each trial starts from a private copy of the card, draws its open cells in a uniformly random order, and records the draw index at which a line first becomes complete. The records of many trials are folded into a [Tally], whose normalized form is the [Cdf].
//!
//! ## Counting
//!
//! The classic estimator checks for Lingo *before* applying each draw. As a consequence, `CDF[i]` is the probability of winning within `i` draws (rather than `i + 1`), and a win that only completes on the very last draw is never recorded. This is kept as [Counting::Legacy], which is the default so results stay comparable with previously published numbers.
//!
//! [Counting::Corrected] checks after each draw as well, so a win completed by draw `k` is recorded at index `k - 1` and `CDF[i]` is the probability of winning within `i + 1` draws.
//!
//! ## Coupling
//!
//! [Estimator::cdf_coupled] runs two cards over one shared permutation of draw *positions*, so both cards see the same relative draw order in every trial. The two estimates are then positively correlated, which makes comparisons between them far less noisy than two independent runs.
//!

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::{LingoError, Result};

pub mod tally;

pub use tally::{Cdf, Tally};

/// When a trial checks for a completed line, relative to applying a draw
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Counting {

    /// Check only before each draw is applied (off by one, and misses wins on the last draw)
    #[default]
    Legacy,

    /// Check before the first draw and after every draw
    Corrected,

}

impl Counting {

    /// Number of draws a win recorded at `index` took
    pub fn draws(self, index: usize) -> usize {
        match self {
            Counting::Legacy => index,
            Counting::Corrected => index + 1,
        }
    }
}

/// A single card's progress through one trial
struct Walk {

    card: Card,

    /// The draw index this trial recorded its win at, if any yet
    hit: Option<usize>,

}

impl Walk {

    fn new(card: &Card) -> Self {
        Self { card: card.clone(), hit: None }
    }

    /// Start over from `card`, reusing the working copy's buffer
    fn reset(&mut self, card: &Card) {
        self.card.copy_from(card);
        self.hit = None;
    }

    fn done(&self) -> bool {
        self.hit.is_some()
    }

    /// Apply the draw at `step`, which marks `cell`, checking for Lingo according to `counting`
    fn draw(&mut self, step: usize, cell: usize, counting: Counting) {
        if self.done() {
            return;
        }
        if self.card.has_lingo() {
            self.hit = Some(step);
            return;
        }
        self.card.mark(cell);
        if counting == Counting::Corrected && self.card.has_lingo() {
            self.hit = Some(step);
        }
    }
}

/// Play out one draw order on a fresh copy of `card`, returning the index its win is recorded at
pub fn first_lingo(card: &Card, order: &[usize], counting: Counting) -> Option<usize> {
    let mut walk = Walk::new(card);
    for (step, &cell) in order.iter().enumerate() {
        walk.draw(step, cell, counting);
        if walk.done() {
            break;
        }
    }
    walk.hit
}

/// Configuration for Monte Carlo CDF estimation
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimator {

    /// Number of independent trials (i.e. simulated finales) per estimate
    pub trials: u64,

    pub counting: Counting,

}

impl Estimator {

    /// Create an estimator with the default ([Counting::Legacy]) counting
    pub fn new(trials: u64) -> Self {
        Self { trials, counting: Counting::default() }
    }

    pub fn with_counting(self, counting: Counting) -> Self {
        Self { counting, ..self }
    }

    fn check_trials(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(LingoError::NoTrials);
        }
        Ok(())
    }

    /// Run all trials over one card, and return the raw tally
    pub fn tally<R: Rng>(&self, card: &Card, rng: &mut R) -> Result<Tally> {
        self.check_trials()?;

        // the open cells are fixed by the original card, only their order changes per trial
        let mut order = card.open_cells();
        let mut tally = Tally::new(order.len());
        let mut walk = Walk::new(card);

        for _ in 0..self.trials {
            walk.reset(card);
            order.shuffle(rng);

            for (step, &cell) in order.iter().enumerate() {
                walk.draw(step, cell, self.counting);
                if walk.done() {
                    break;
                }
            }
            tally.record(walk.hit);
        }
        Ok(tally)
    }

    /// Estimate the CDF of the number of draws until `card` has Lingo
    pub fn cdf<R: Rng>(&self, card: &Card, rng: &mut R) -> Result<Cdf> {
        Ok(self.tally(card, rng)?.cdf())
    }

    /// Run all trials over two cards with a shared draw order, and return both raw tallies
    ///
    /// Both cards must have the same dimension and the same number of open cells, which is checked before anything is simulated.
    pub fn tally_coupled<R: Rng>(&self, card1: &Card, card2: &Card, rng: &mut R) -> Result<(Tally, Tally)> {
        if card1.dim() != card2.dim() {
            return Err(LingoError::DimensionMismatch { left: card1.dim(), right: card2.dim() });
        }
        let open1 = card1.open_cells();
        let open2 = card2.open_cells();
        if open1.len() != open2.len() {
            return Err(LingoError::OpenCountMismatch { left: open1.len(), right: open2.len() });
        }
        self.check_trials()?;

        let mut positions: Vec<usize> = (0..open1.len()).collect();
        let mut tally1 = Tally::new(open1.len());
        let mut tally2 = Tally::new(open2.len());
        let mut walk1 = Walk::new(card1);
        let mut walk2 = Walk::new(card2);

        for _ in 0..self.trials {
            walk1.reset(card1);
            walk2.reset(card2);
            positions.shuffle(rng);

            // the position, not the cell, is shared, so each card draws its own cell at that position
            for (step, &pos) in positions.iter().enumerate() {
                walk1.draw(step, open1[pos], self.counting);
                walk2.draw(step, open2[pos], self.counting);
                if walk1.done() && walk2.done() {
                    break;
                }
            }
            tally1.record(walk1.hit);
            tally2.record(walk2.hit);
        }
        Ok((tally1, tally2))
    }

    /// Estimate the CDFs of two cards under a shared draw order
    pub fn cdf_coupled<R: Rng>(&self, card1: &Card, card2: &Card, rng: &mut R) -> Result<(Cdf, Cdf)> {
        let (tally1, tally2) = self.tally_coupled(card1, card2, rng)?;
        Ok((tally1.cdf(), tally2.cdf()))
    }
}

/// Estimate the CDF of the number of draws until `card` has Lingo, over `trials` simulated finales
///
/// `CDF[i]` is the fraction of trials that had Lingo by draw index `i`, using [Counting::Legacy].
pub fn estimate_cdf<R: Rng>(card: &Card, trials: u64, rng: &mut R) -> Result<Cdf> {
    Estimator::new(trials).cdf(card, rng)
}

/// Estimate the CDFs of two cards at once, coupling them through a shared draw order
pub fn estimate_cdf_coupled<R: Rng>(card1: &Card, card2: &Card, trials: u64, rng: &mut R) -> Result<(Cdf, Cdf)> {
    Estimator::new(trials).cdf_coupled(card1, card2, rng)
}
