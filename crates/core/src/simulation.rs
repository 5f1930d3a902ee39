use std::collections::VecDeque;

use rand::Rng;

/// Outcome of a single coin flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flip {
    Heads,
    Tails,
}

impl Flip {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Flip::Heads => "H",
            Flip::Tails => "T",
        }
    }
}

/// Running tally of repeated coin flips with a bounded outcome history.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinFlipSimulator {
    heads: u64,
    tails: u64,
    probability_heads: f64,
    history: VecDeque<Flip>,
    max_history: usize,
}

impl CoinFlipSimulator {
    pub const DEFAULT_MAX_HISTORY: usize = 5_000;
    pub const BULK_FLIPS: u32 = 1_000;

    /// A fair coin.
    #[must_use]
    pub fn new() -> Self {
        Self::with_probability(0.5)
    }

    /// Probabilities outside `0.0..=1.0` are clamped.
    #[must_use]
    pub fn with_probability(probability_heads: f64) -> Self {
        let probability_heads = if probability_heads.is_nan() {
            0.5
        } else {
            probability_heads.clamp(0.0, 1.0)
        };
        Self {
            heads: 0,
            tails: 0,
            probability_heads,
            history: VecDeque::new(),
            max_history: Self::DEFAULT_MAX_HISTORY,
        }
    }

    #[must_use]
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self.trim_history();
        self
    }

    pub fn flip<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Flip {
        let outcome = if rng.random_bool(self.probability_heads) {
            Flip::Heads
        } else {
            Flip::Tails
        };
        self.record(outcome);
        outcome
    }

    pub fn flip_many<R: Rng + ?Sized>(&mut self, rng: &mut R, count: u32) {
        for _ in 0..count {
            self.flip(rng);
        }
    }

    pub fn record(&mut self, outcome: Flip) {
        match outcome {
            Flip::Heads => self.heads += 1,
            Flip::Tails => self.tails += 1,
        }
        self.history.push_back(outcome);
        self.trim_history();
    }

    fn trim_history(&mut self) {
        while self.history.len() > self.max_history {
            self.history.pop_front();
        }
    }

    pub fn reset(&mut self) {
        self.heads = 0;
        self.tails = 0;
        self.history.clear();
    }

    #[must_use]
    pub fn heads(&self) -> u64 {
        self.heads
    }

    #[must_use]
    pub fn tails(&self) -> u64 {
        self.tails
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.heads + self.tails
    }

    /// Relative frequency of heads; zero before the first flip.
    #[must_use]
    pub fn heads_frequency(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.heads as f64 / total as f64,
        }
    }

    #[must_use]
    pub fn history(&self) -> &VecDeque<Flip> {
        &self.history
    }

    /// Proportion of heads after each flip still held in the history.
    #[must_use]
    pub fn running_proportion(&self) -> Vec<f64> {
        let mut heads = 0u64;
        self.history
            .iter()
            .enumerate()
            .map(|(i, flip)| {
                if *flip == Flip::Heads {
                    heads += 1;
                }
                heads as f64 / (i + 1) as f64
            })
            .collect()
    }
}

impl Default for CoinFlipSimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Faces of two dice thrown together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceThrow {
    pub first: u8,
    pub second: u8,
}

impl DiceThrow {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            first: rng.random_range(1..=6),
            second: rng.random_range(1..=6),
        }
    }

    #[must_use]
    pub fn sum(self) -> u8 {
        self.first + self.second
    }
}
