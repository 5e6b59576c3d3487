//! Program to run Lingo experiments from a command-line interface (CLI), such as a terminal.
//!
//! Examples:
//!
//! ```shell
//! # default: estimate the CDF of the standard card with 10 million trials, and save a plot of it
//! $ cargo run --release --bin lingo -- cdf --plot Final_CDF_Lingo
//!
//! # compare two cards under a shared draw order
//! $ cargo run --release --bin lingo -- compare --other 00001/00001/01111/11111/11111 --trials 100000
//!
//! # look for a layout that is never better than the standard card, only among layouts that start one draw away from Lingo
//! $ cargo run --release --bin lingo -- --seed abc search --tries 50 --trials 100000 --near-lingo
//!
//! # prints the help and usage information, describing all the options
//! $ cargo run --bin lingo -- --help
//! ```
//!

use clap::{Args as ClapArgs, Parser, Subcommand};
use kdam::{tqdm, BarExt};
use log::info;
use rand::Rng;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use crate::{
    card::Card,
    config::{LingoConfig, STANDARD_DIM, STANDARD_MARKED, STANDARD_TRIALS},
    error::LingoError,
    plot::{plot_cdf, plot_cdfs, svg_path},
    rng_from_seed,
    search::{LayoutSearch, DOMINANCE_FROM},
    sim::{Cdf, Counting, Estimator, Tally},
};

/// Number of trials per progress bar update
const CHUNK: u64 = 10_000;

/// Arguments for the Lingo CLI, which pick the experiment and its shared settings.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Randomness seed string for deterministic generation.
    ///
    /// If not provided, a default-initialized RNG will be used.
    #[arg(short, long, global = true)]
    pub seed: Option<String>,

    /// Print more log output, repeat for even more (-v for info, -vv for debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// The experiments the CLI can run.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Estimate the CDF of the number of draws until a card has Lingo.
    Cdf {
        #[command(flatten)]
        card: CardArgs,

        #[command(flatten)]
        sim: SimArgs,

        /// Save a plot of the CDF under this name (as SVG).
        #[arg(short, long)]
        plot: Option<String>,
    },

    /// Estimate the CDFs of two cards under a shared draw order, and check whether the second is never better than the first.
    Compare {
        #[command(flatten)]
        card: CardArgs,

        /// The card to compare against the first one, as rows of 1 (open) and 0 (marked).
        #[arg(short, long)]
        other: Card,

        #[command(flatten)]
        sim: SimArgs,

        /// Save a plot of both CDFs under this name (as SVG).
        #[arg(short, long)]
        plot: Option<String>,
    },

    /// Search random layouts for one that is never better than a reference card.
    Search {
        // the reference card
        #[command(flatten)]
        card: CardArgs,

        /// Maximum number of distinct failed layouts before giving up.
        #[arg(long, default_value_t = 100)]
        tries: usize,

        /// Number of trials for each candidate layout.
        #[arg(short, long, default_value_t = 100_000)]
        trials: u64,

        /// Number of trials for the reference card (defaults to the candidate trials).
        #[arg(long)]
        reference_trials: Option<u64>,

        /// Only consider layouts where some line is one draw away from Lingo.
        #[arg(long)]
        near_lingo: bool,

        /// Check for Lingo after every draw, instead of only before.
        #[arg(long)]
        corrected: bool,
    },
}

/// Which card to use, either as explicit rows, or as a dimension and list of marked cells.
#[derive(ClapArgs, Debug)]
pub struct CardArgs {
    /// The card as rows of 1 (open) and 0 (marked), separated by '/', e.g. 10101/11001/10101/11110/01101.
    #[arg(short, long, conflicts_with_all = ["dim", "marked"])]
    pub card: Option<Card>,

    /// Side length of the card.
    #[arg(short, long, default_value_t = STANDARD_DIM)]
    pub dim: usize,

    /// Flat indices (row-major) of the cells crossed off before the finale.
    #[arg(short, long, value_delimiter = ',', default_values_t = STANDARD_MARKED)]
    pub marked: Vec<usize>,
}

/// How to run the simulation.
#[derive(ClapArgs, Debug)]
pub struct SimArgs {
    /// Number of simulated finales.
    #[arg(short, long, default_value_t = STANDARD_TRIALS)]
    pub trials: u64,

    /// Check for Lingo after every draw, instead of only before.
    #[arg(long)]
    pub corrected: bool,
}

impl CardArgs {

    /// Turn the card arguments into a configuration, with `trials` as its effort
    pub fn config(&self, trials: u64) -> LingoConfig {
        match &self.card {
            Some(card) => LingoConfig { dim: card.dim(), marked: card.marked_cells(), trials },
            None => LingoConfig { dim: self.dim, marked: self.marked.clone(), trials },
        }
    }
}

fn counting(corrected: bool) -> Counting {
    if corrected { Counting::Corrected } else { Counting::Legacy }
}

/// Estimate a card's tally in chunks, showing the progress as it goes
fn tally_with_progress<R: Rng>(estimator: &Estimator, card: &Card, rng: &mut R) -> std::result::Result<Tally, Box<dyn std::error::Error>> {
    if estimator.trials == 0 {
        return Err(LingoError::NoTrials.into());
    }
    let mut tally = Tally::new(card.open_count());
    let mut pb = tqdm!(total = estimator.trials as usize, desc = "trials");
    let mut left = estimator.trials;
    while left > 0 {
        let num = left.min(CHUNK);
        tally.merge(&Estimator { trials: num, ..*estimator }.tally(card, rng)?)?;
        pb.update(num as usize)?;
        left -= num;
    }
    eprintln!();
    Ok(tally)
}

impl Args {

    /// Run the Lingo CLI with parsed arguments, useful as an entrypoint for the program.
    pub fn run(self) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let level = match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        };
        TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;

        // create the RNG from the provided seed (or, a default-initialized one if no seed is provided)
        let mut rng = rng_from_seed(self.seed);

        match self.command {
            Command::Cdf { card, sim, plot } => {
                let config = card.config(sim.trials);
                run_cdf(&config, counting(sim.corrected), plot.as_deref(), &mut rng)
            },
            Command::Compare { card, other, sim, plot } => {
                let config = card.config(sim.trials);
                run_compare(&config, &other, counting(sim.corrected), plot.as_deref(), &mut rng)
            },
            Command::Search { card, tries, trials, reference_trials, near_lingo, corrected } => {
                let config = card.config(reference_trials.unwrap_or(trials));
                let search = LayoutSearch::new(config.dim, tries, trials)
                    .with_near_lingo(near_lingo)
                    .with_counting(counting(corrected));
                run_search(&config, &search, &mut rng)
            },
        }
    }
}

/// Estimate and print the CDF of the configured card, optionally plotting it
pub fn run_cdf<R: Rng>(config: &LingoConfig, counting: Counting, plot: Option<&str>, rng: &mut R) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let card = config.card()?;
    info!("estimating card {} with {} trials ({:?} counting)", card, config.trials, counting);

    let estimator = Estimator::new(config.trials).with_counting(counting);
    let cdf = tally_with_progress(&estimator, &card, rng)?.cdf();

    println!("The Lingo sheet CDF is {}", cdf);
    println!("Expected number of draws until Lingo: {:.4}", cdf.mean(counting));

    if let Some(name) = plot {
        let path = svg_path(name);
        let title = if *config == LingoConfig::default().with_trials(config.trials) {
            "The CDF of the standard Lingo card".to_string()
        } else {
            format!("The CDF of Lingo card {}", card)
        };
        plot_cdf(&cdf, &title, &path)?;
        println!("Saved plot to {}", path.display());
    }
    Ok(())
}

/// Estimate two cards under a shared draw order, and report whether the second one is dominated
pub fn run_compare<R: Rng>(config: &LingoConfig, other: &Card, counting: Counting, plot: Option<&str>, rng: &mut R) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let card = config.card()?;
    info!("comparing card {} against {} with {} trials", card, other, config.trials);

    let (cdf1, cdf2) = Estimator::new(config.trials).with_counting(counting).cdf_coupled(&card, other, rng)?;

    println!("CDF of {}: {}", card, cdf1);
    println!("CDF of {}: {}", other, cdf2);
    if cdf2.dominated_by(&cdf1, DOMINANCE_FROM) {
        println!("{} is never better than {} from draw {} on", other, card, DOMINANCE_FROM);
    } else {
        println!("{} is sometimes better than {}", other, card);
    }

    if let Some(name) = plot {
        let path = svg_path(name);
        let (label1, label2) = (card.to_string(), other.to_string());
        plot_cdfs(&[(label1.as_str(), &cdf1), (label2.as_str(), &cdf2)], "Coupled Lingo CDFs", &path)?;
        println!("Saved plot to {}", path.display());
    }
    Ok(())
}

/// Estimate the reference card, then search for a layout it dominates
pub fn run_search<R: Rng>(config: &LingoConfig, search: &LayoutSearch, rng: &mut R) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let card = config.card()?;
    let estimator = Estimator::new(config.trials).with_counting(search.estimator.counting);
    let reference: Cdf = tally_with_progress(&estimator, &card, rng)?.cdf();
    println!("Reference CDF of {}: {}", card, reference);

    let mut pb = tqdm!(total = search.max_attempts, desc = "layouts");
    let mut progress_error = None;
    let outcome = search.run_with(&reference, rng, |candidate| {
        if !candidate.dominated {
            if let Err(err) = pb.update(1) {
                progress_error.get_or_insert(err);
            }
        }
    })?;
    if let Some(err) = progress_error {
        return Err(err.into());
    }
    eprintln!();

    match outcome.found {
        Some(candidate) => {
            println!("I've found a worse one!");
            println!("Layout {:?} ({}) has CDF {}", candidate.marked, candidate.card, candidate.cdf);
        },
        None if outcome.exhausted => {
            println!("I could not find a worse one, all {} possible layouts were tried", outcome.tried.len());
        },
        None => {
            println!("I could not find a worse one in {} attempts...", outcome.attempts);
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cdf_defaults() {
        let args = Args::try_parse_from(["lingo", "cdf"]).unwrap();
        match args.command {
            Command::Cdf { card, sim, plot } => {
                assert_eq!(card.config(sim.trials), LingoConfig::default());
                assert!(!sim.corrected);
                assert!(plot.is_none());
            },
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn parses_card_rows() {
        let args = Args::try_parse_from(["lingo", "--seed", "x", "cdf", "--card", "110/101/011", "--trials", "5"]).unwrap();
        assert_eq!(args.seed.as_deref(), Some("x"));
        match args.command {
            Command::Cdf { card, sim, .. } => {
                let config = card.config(sim.trials);
                assert_eq!(config, LingoConfig { dim: 3, marked: vec![2, 4, 6], trials: 5 });
            },
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn card_conflicts_with_marked() {
        assert!(Args::try_parse_from(["lingo", "cdf", "--card", "11/11", "--marked", "1,2"]).is_err());
    }

    #[test]
    fn parses_search() {
        let args = Args::try_parse_from(["lingo", "search", "--tries", "3", "--trials", "10", "--near-lingo"]).unwrap();
        match args.command {
            Command::Search { card, tries, trials, reference_trials, near_lingo, corrected } => {
                assert_eq!(card.config(1).marked, STANDARD_MARKED.to_vec());
                assert_eq!((tries, trials, reference_trials, near_lingo, corrected), (3, 10, None, true, false));
            },
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn runs_small_experiments() {
        let mut rng = rng_from_seed(Some("cli"));
        let config = LingoConfig { trials: 200, ..LingoConfig::default() };
        run_cdf(&config, Counting::Legacy, None, &mut rng).unwrap();

        let other: Card = "00001/00001/01111/11111/11111".parse().unwrap();
        run_compare(&config, &other, Counting::Corrected, None, &mut rng).unwrap();

        let search = LayoutSearch::new(5, 2, 50);
        run_search(&LingoConfig { trials: 50, ..LingoConfig::default() }, &search, &mut rng).unwrap();
    }
}
