//! Reel outcome generation
//!
//! Higher bets lower the chance of a gold symbol by one percentage point per
//! level. The energy symbol stays in the non-gold pool, so its odds are
//! `(1 - gold_chance / 100) / 9` rather than a flat ninth.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use rand::SeedableRng;

use super::types::{SpinResult, Symbol, BASE_GOLD_CHANCE};

/// Chance of a gold symbol, in percent, for the given bet
pub fn gold_chance(bet: u32) -> u32 {
    BASE_GOLD_CHANCE.saturating_sub(bet.saturating_sub(1))
}

/// Anything that can produce reel symbols for a bet
pub trait OutcomeSource {
    /// Draw a single reel symbol
    fn draw_symbol(&mut self, bet: u32) -> Symbol;

    /// Draw three independent symbols
    fn draw_result(&mut self, bet: u32) -> SpinResult {
        SpinResult::new([
            self.draw_symbol(bet),
            self.draw_symbol(bet),
            self.draw_symbol(bet),
        ])
    }
}

/// Outcome source backed by `rand`
#[derive(Debug, Default)]
pub struct RandomOutcome {
    /// Optional seeded RNG for reproducible sessions
    rng: Option<StdRng>,
}

impl RandomOutcome {
    /// Uses the thread-local RNG
    pub fn new() -> Self {
        Self { rng: None }
    }

    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }

    /// Roll a percentage in `0..100`, using seeded RNG if available
    fn roll_percent(&mut self) -> u32 {
        match &mut self.rng {
            Some(rng) => rng.random_range(0..100),
            None => rand::rng().random_range(0..100),
        }
    }

    fn choose_non_gold(&mut self) -> Symbol {
        let picked = match &mut self.rng {
            Some(rng) => Symbol::NON_GOLD.choose(rng).copied(),
            None => Symbol::NON_GOLD.choose(&mut rand::rng()).copied(),
        };
        // The pool is a non-empty constant
        picked.unwrap_or(Symbol::ENERGY)
    }
}

impl OutcomeSource for RandomOutcome {
    fn draw_symbol(&mut self, bet: u32) -> Symbol {
        if self.roll_percent() < gold_chance(bet) {
            Symbol::GOLD
        } else {
            self.choose_non_gold()
        }
    }
}
