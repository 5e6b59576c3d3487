//! Randomized search for card layouts that are stochastically dominated by a reference
//!
//! A candidate layout crosses off `(dim - 2)^2` cells of a `dim x dim` card, chosen uniformly at random. Each distinct candidate gets its CDF estimated, and the search stops at the first one whose CDF lies on or below the reference CDF from the third draw onwards, i.e. a layout that never wins sooner than the reference does.
//!
//! Candidates that were already tried are skipped without counting as an attempt, so `max_attempts` bounds the number of *distinct* failures. Once every possible layout has been seen, the search gives up early.

use indexmap::IndexSet;
use log::{debug, info, warn};
use rand::Rng;

use crate::card::Card;
use crate::combrs::{layout_count, sample_sorted};
use crate::error::{LingoError, Result};
use crate::sim::{Cdf, Counting, Estimator};

/// First draw index at which candidates are compared against the reference
pub const DOMINANCE_FROM: usize = 2;

/// A layout that was tried, with its estimated CDF
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {

    /// Sorted flat indices of the crossed-off cells
    pub marked: Vec<usize>,

    pub card: Card,

    pub cdf: Cdf,

    /// Whether the reference dominates this candidate
    pub dominated: bool,

}

/// Everything a finished search knows
#[derive(Debug, Clone)]
pub struct SearchOutcome {

    /// The dominated layout, if one was found
    pub found: Option<Candidate>,

    /// Number of distinct candidates that were estimated and failed the comparison
    pub attempts: usize,

    /// Every layout that was estimated, in the order they were tried
    pub tried: IndexSet<Vec<usize>>,

    /// Whether the search stopped because no untried layouts were left
    pub exhausted: bool,

}

/// Configuration of a layout search
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LayoutSearch {

    /// Side length of the candidate cards
    pub dim: usize,

    /// Number of distinct failed candidates before giving up
    pub max_attempts: usize,

    /// How each candidate's CDF is estimated
    pub estimator: Estimator,

    /// Only consider layouts that start with some line one draw away from completion
    pub require_near_lingo: bool,

}

impl LayoutSearch {

    pub fn new(dim: usize, max_attempts: usize, trials: u64) -> Self {
        Self { dim, max_attempts, estimator: Estimator::new(trials), require_near_lingo: false }
    }

    pub fn with_near_lingo(self, require_near_lingo: bool) -> Self {
        Self { require_near_lingo, ..self }
    }

    pub fn with_counting(self, counting: Counting) -> Self {
        Self { estimator: self.estimator.with_counting(counting), ..self }
    }

    /// Number of crossed-off cells on every candidate
    pub fn num_marked(&self) -> usize {
        self.dim.saturating_sub(2).pow(2)
    }

    /// Number of open cells on every candidate, which is also the length of their CDFs
    pub fn num_open(&self) -> usize {
        self.dim * self.dim - self.num_marked()
    }

    fn validate(&self, reference: &Cdf) -> Result<()> {
        if self.dim < 2 {
            return Err(LingoError::SearchDimension(self.dim));
        }
        if reference.len() != self.num_open() {
            return Err(LingoError::ReferenceLength { actual: reference.len(), expected: self.num_open(), dim: self.dim });
        }
        if self.estimator.trials == 0 {
            return Err(LingoError::NoTrials);
        }
        Ok(())
    }

    /// Run the search against `reference`
    pub fn run<R: Rng>(&self, reference: &Cdf, rng: &mut R) -> Result<SearchOutcome> {
        self.run_with(reference, rng, |_| {})
    }

    /// Run the search against `reference`, calling `on_candidate` for every candidate that gets estimated
    pub fn run_with<R: Rng, F: FnMut(&Candidate)>(&self, reference: &Cdf, rng: &mut R, mut on_candidate: F) -> Result<SearchOutcome> {
        self.validate(reference)?;

        let num_cells = self.dim * self.dim;
        let num_marked = self.num_marked();
        // without a count, the space is too large to ever exhaust
        let total = layout_count(num_cells, num_marked);
        if total.is_none() {
            debug!("too many layouts of a {}x{} card to count, exhaustion is not tracked", self.dim, self.dim);
        }

        let mut tried: IndexSet<Vec<usize>> = IndexSet::new();
        // layouts thrown out by the near-lingo filter, only kept so the space can be exhausted
        let mut rejected: IndexSet<Vec<usize>> = IndexSet::new();
        let mut attempts = 0;

        while attempts < self.max_attempts {
            if let Some(total) = total.filter(|&total| (tried.len() + rejected.len()) as u128 >= total) {
                warn!("all {} layouts of a {}x{} card have been seen, giving up", total, self.dim, self.dim);
                return Ok(SearchOutcome { found: None, attempts, tried, exhausted: true });
            }

            let marked = sample_sorted(num_cells, num_marked, rng);
            if tried.contains(&marked) || rejected.contains(&marked) {
                continue;
            }

            let card = Card::from_marked(self.dim, &marked)?;
            if self.require_near_lingo && !card.near_lingo() {
                rejected.insert(marked);
                continue;
            }
            tried.insert(marked.clone());

            let cdf = self.estimator.cdf(&card, rng)?;
            let dominated = cdf.dominated_by(reference, DOMINANCE_FROM);
            let candidate = Candidate { marked, card, cdf, dominated };
            debug!("attempt {}: layout {:?} has CDF {}", attempts, candidate.marked, candidate.cdf);
            on_candidate(&candidate);

            if dominated {
                info!("found a dominated layout {:?} after {} failed attempts", candidate.marked, attempts);
                return Ok(SearchOutcome { found: Some(candidate), attempts, tried, exhausted: false });
            }
            attempts += 1;
        }

        info!("no dominated layout found in {} attempts", attempts);
        Ok(SearchOutcome { found: None, attempts, tried, exhausted: false })
    }
}

/// Search for a layout of a `dim x dim` card that is dominated by `reference`, returning its crossed-off cells and CDF
///
/// Gives up with `None` after `max_attempts` distinct layouts failed, or once every layout has been tried.
pub fn find_dominated_layout<R: Rng>(
    reference: &Cdf,
    dim: usize,
    max_attempts: usize,
    trials: u64,
    require_near_lingo: bool,
    rng: &mut R,
) -> Result<Option<(Vec<usize>, Cdf)>> {
    let outcome = LayoutSearch::new(dim, max_attempts, trials)
        .with_near_lingo(require_near_lingo)
        .run(reference, rng)?;
    Ok(outcome.found.map(|c| (c.marked, c.cdf)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng_from_seed;

    fn never_dominated(len: usize) -> Cdf {
        Cdf::new(vec![0.0; len])
    }

    fn always_dominated(len: usize) -> Cdf {
        Cdf::new(vec![1.0; len])
    }

    #[test]
    fn finds_first_candidate_against_trivial_reference() {
        let mut rng = rng_from_seed(Some("trivial"));
        let (marked, cdf) = find_dominated_layout(&always_dominated(16), 5, 10, 100, false, &mut rng)
            .unwrap()
            .expect("every layout is dominated by an all-ones CDF");
        assert_eq!(marked.len(), 9);
        assert!(marked.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(cdf.len(), 16);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let mut rng = rng_from_seed(Some("give-up"));
        let mut seen = Vec::new();
        let outcome = LayoutSearch::new(4, 5, 50)
            .run_with(&never_dominated(12), &mut rng, |c| seen.push(c.marked.clone()))
            .unwrap();
        assert!(outcome.found.is_none());
        assert!(!outcome.exhausted);
        assert_eq!(outcome.attempts, 5);
        assert_eq!(outcome.tried.len(), 5);
        // every reported candidate is distinct, and in the order they were tried
        assert_eq!(outcome.tried.iter().cloned().collect::<Vec<_>>(), seen);
    }

    #[test]
    fn small_space_is_exhausted() {
        // a 3x3 card has only nine single-cell layouts
        let mut rng = rng_from_seed(Some("exhaust"));
        let outcome = LayoutSearch::new(3, 100, 20).run(&never_dominated(8), &mut rng).unwrap();
        assert!(outcome.found.is_none());
        assert!(outcome.exhausted);
        assert_eq!(outcome.attempts, 9);
        let mut tried = outcome.tried.into_iter().collect::<Vec<_>>();
        tried.sort();
        assert_eq!(tried, (0..9).map(|i| vec![i]).collect::<Vec<_>>());
    }

    #[test]
    fn large_cards_search_without_counting_layouts() {
        let mut rng = rng_from_seed(Some("large"));
        for dim in [14, 30] {
            let num_open = 4 * dim - 4;
            // below any CDF, so no candidate can be dominated by it
            let floor = Cdf::new(vec![-1.0; num_open]);
            let outcome = LayoutSearch::new(dim, 1, 1).run(&floor, &mut rng).unwrap();
            assert!(outcome.found.is_none());
            assert!(!outcome.exhausted);
            assert_eq!(outcome.attempts, 1);
            assert_eq!(outcome.tried.len(), 1);
        }
    }

    #[test]
    fn near_lingo_filter_can_reject_everything() {
        // one crossed cell can never leave a line of three with a single open cell
        let mut rng = rng_from_seed(Some("reject"));
        let outcome = LayoutSearch::new(3, 100, 20)
            .with_near_lingo(true)
            .run(&always_dominated(8), &mut rng)
            .unwrap();
        assert!(outcome.found.is_none());
        assert!(outcome.exhausted);
        assert_eq!(outcome.attempts, 0);
        assert!(outcome.tried.is_empty());
    }

    #[test]
    fn near_lingo_filter_keeps_matching_layouts() {
        let mut rng = rng_from_seed(Some("near"));
        let outcome = LayoutSearch::new(4, 20, 20)
            .with_near_lingo(true)
            .run(&always_dominated(12), &mut rng)
            .unwrap();
        let found = outcome.found.expect("some 4-cell layout has three cells on a line");
        assert!(found.card.near_lingo());
        assert!(found.dominated);
    }

    #[test]
    fn validates_inputs() {
        let mut rng = rng_from_seed(Some("validate"));
        assert!(matches!(
            find_dominated_layout(&always_dominated(1), 1, 1, 1, false, &mut rng),
            Err(LingoError::SearchDimension(1))
        ));
        assert!(matches!(
            find_dominated_layout(&always_dominated(10), 5, 1, 1, false, &mut rng),
            Err(LingoError::ReferenceLength { actual: 10, expected: 16, dim: 5 })
        ));
        assert!(matches!(
            find_dominated_layout(&always_dominated(16), 5, 1, 0, false, &mut rng),
            Err(LingoError::NoTrials)
        ));
    }

    #[test]
    fn zero_attempts_never_estimates() {
        let mut rng = rng_from_seed(Some("zero"));
        let outcome = LayoutSearch::new(5, 0, 10).run(&always_dominated(16), &mut rng).unwrap();
        assert!(outcome.found.is_none());
        assert!(outcome.tried.is_empty());
    }
}
