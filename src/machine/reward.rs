//! Reward evaluation
//!
//! Turns a finished spin into gold and energy gains. Pure: all randomness
//! happens before a result reaches this module.

use super::message::GameMessage;
use super::types::{
    SpinResult, Symbol, JACKPOT_BET_MULTIPLIER, JACKPOT_BONUS, MEGA_BOOST_ENERGY,
    TRIPLE_MATCH_GOLD,
};

/// How a spin paid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinKind {
    /// Three gold symbols
    Jackpot,
    /// Three energy symbols
    MegaEnergyBoost,
    /// Three of any neutral symbol
    TripleMatch,
    /// Some gold or energy symbols without a triple
    Bonus,
    NoWin,
}

/// Gains produced by a single spin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    pub gold_gain: u32,
    pub energy_gain: u32,
    pub kind: WinKind,
}

impl Reward {
    /// Message announcing this reward to the player
    pub fn message(&self) -> GameMessage {
        match self.kind {
            WinKind::Jackpot => GameMessage::Jackpot {
                gold: self.gold_gain,
            },
            WinKind::MegaEnergyBoost => GameMessage::MegaEnergyBoost,
            WinKind::TripleMatch => GameMessage::TripleMatch,
            WinKind::Bonus => GameMessage::Bonus {
                gold: self.gold_gain,
                energy: self.energy_gain,
            },
            WinKind::NoWin => GameMessage::NoWin,
        }
    }
}

/// Evaluate a finished spin at the given bet
pub fn evaluate(result: &SpinResult, bet: u32) -> Reward {
    match result.triple() {
        Some(symbol) if symbol.is_gold() => Reward {
            gold_gain: bet
                .saturating_mul(JACKPOT_BET_MULTIPLIER)
                .saturating_add(JACKPOT_BONUS),
            energy_gain: 0,
            kind: WinKind::Jackpot,
        },
        Some(symbol) if symbol.is_energy() => Reward {
            gold_gain: 0,
            energy_gain: MEGA_BOOST_ENERGY,
            kind: WinKind::MegaEnergyBoost,
        },
        Some(_) => Reward {
            gold_gain: TRIPLE_MATCH_GOLD,
            energy_gain: 0,
            kind: WinKind::TripleMatch,
        },
        None => {
            let gold_gain = result.count(Symbol::GOLD).saturating_mul(bet);
            let energy_gain = result.count(Symbol::ENERGY);
            let kind = if gold_gain > 0 || energy_gain > 0 {
                WinKind::Bonus
            } else {
                WinKind::NoWin
            };
            Reward {
                gold_gain,
                energy_gain,
                kind,
            }
        }
    }
}
