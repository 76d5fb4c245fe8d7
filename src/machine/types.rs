//! Core types for the slot machine
//!
//! Reel symbols, spin results and the fixed rules of the game.

use std::fmt;

/// Maximum energy a player can hold
pub const MAX_ENERGY: u32 = 50;
/// Bet limits
pub const MIN_BET: u32 = 1;
pub const MAX_BET: u32 = 15;

/// Starting resources
pub const STARTING_ENERGY: u32 = MAX_ENERGY;
pub const STARTING_GOLD: u32 = 100;
pub const STARTING_BET: u32 = MIN_BET;

/// Chance (in percent) of a gold symbol at the lowest bet
pub const BASE_GOLD_CHANCE: u32 = 25;

/// Timing, in milliseconds
pub const SPIN_DURATION_MS: u64 = 1000;
pub const REEL_TICK_MS: u64 = 50;
pub const ENERGY_RECOVERY_MS: u64 = 60_000;

/// Gold paid for one energy
pub const ENERGY_PRICE_GOLD: u32 = 10;
/// Gold received for selling one energy
pub const GOLD_PER_ENERGY: u32 = 10;
/// Energy consumed by a single spin
pub const SPIN_ENERGY_COST: u32 = 1;

/// Rewards
pub const JACKPOT_BET_MULTIPLIER: u32 = 10;
pub const JACKPOT_BONUS: u32 = 50;
pub const TRIPLE_MATCH_GOLD: u32 = 50;
pub const MEGA_BOOST_ENERGY: u32 = 10;

/// Number of reels on the machine
pub const REEL_COUNT: usize = 3;

/// A single reel position, always in `0..=9`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u8);

impl Symbol {
    /// Pays out gold
    pub const GOLD: Symbol = Symbol(5);
    /// Pays out energy
    pub const ENERGY: Symbol = Symbol(0);

    /// Every symbol a reel can show other than GOLD
    pub const NON_GOLD: [Symbol; 9] = [
        Symbol(0),
        Symbol(1),
        Symbol(2),
        Symbol(3),
        Symbol(4),
        Symbol(6),
        Symbol(7),
        Symbol(8),
        Symbol(9),
    ];

    /// Returns `None` for values outside `0..=9`
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Symbol(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_gold(self) -> bool {
        self == Symbol::GOLD
    }

    pub fn is_energy(self) -> bool {
        self == Symbol::ENERGY
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three symbols shown after (or during) a spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpinResult(pub [Symbol; REEL_COUNT]);

impl SpinResult {
    pub fn new(symbols: [Symbol; REEL_COUNT]) -> Self {
        Self(symbols)
    }

    /// Build a result from raw reel values, rejecting anything outside `0..=9`
    pub fn from_values(values: [u8; REEL_COUNT]) -> Option<Self> {
        Some(Self([
            Symbol::new(values[0])?,
            Symbol::new(values[1])?,
            Symbol::new(values[2])?,
        ]))
    }

    pub fn symbols(&self) -> &[Symbol; REEL_COUNT] {
        &self.0
    }

    /// The shared symbol when all reels match
    pub fn triple(&self) -> Option<Symbol> {
        let [a, b, c] = self.0;
        (a == b && b == c).then_some(a)
    }

    pub fn count(&self, symbol: Symbol) -> u32 {
        self.0.iter().filter(|s| **s == symbol).count() as u32
    }
}

impl Default for SpinResult {
    fn default() -> Self {
        Self([Symbol::ENERGY; REEL_COUNT])
    }
}

impl fmt::Display for SpinResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{} | {} | {}", a, b, c)
    }
}
