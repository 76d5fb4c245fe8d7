//! Player-facing messages
//!
//! Every message the machine can show lives here so the renderer only has to
//! call `to_string()`.

use std::fmt;

use super::types::{ENERGY_PRICE_GOLD, GOLD_PER_ENERGY, MEGA_BOOST_ENERGY, TRIPLE_MATCH_GOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMessage {
    Welcome,
    Spinning,
    Jackpot { gold: u32 },
    MegaEnergyBoost,
    TripleMatch,
    /// Partial win; either gain may be zero but not both
    Bonus { gold: u32, energy: u32 },
    NoWin,
    NotEnoughGoldToSpin,
    NotEnoughEnergyToSpin,
    EnergyRestored,
    BetIncreased(u32),
    BetDecreased(u32),
    BoughtEnergy,
    BoughtGold,
    NotEnoughGoldForEnergy,
    NotEnoughEnergyForGold,
}

impl fmt::Display for GameMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMessage::Welcome => write!(f, "Welcome to Slot Machine! Press SPACE to spin!"),
            GameMessage::Spinning => write!(f, "🔄 Spinning..."),
            GameMessage::Jackpot { gold } => write!(f, "🎉 JACKPOT! +{} GOLD!", gold),
            GameMessage::MegaEnergyBoost => {
                write!(f, "⚡ MEGA ENERGY BOOST! +{} Energy!", MEGA_BOOST_ENERGY)
            }
            GameMessage::TripleMatch => write!(f, "💰 TRIPLE MATCH! +{} GOLD!", TRIPLE_MATCH_GOLD),
            GameMessage::Bonus { gold, energy } => {
                let mut clauses = Vec::new();
                if *gold > 0 {
                    clauses.push(format!("💰 Gold Bonus! +{} GOLD", gold));
                }
                if *energy > 0 {
                    clauses.push(format!("⚡ Energy Bonus! +{} Energy", energy));
                }
                write!(f, "{}", clauses.join(" "))
            }
            GameMessage::NoWin => write!(f, "😕 No significant win this time!"),
            GameMessage::NotEnoughGoldToSpin => write!(f, "⚠️ Not enough gold to spin!"),
            GameMessage::NotEnoughEnergyToSpin => write!(f, "⚠️ Not enough energy to spin!"),
            GameMessage::EnergyRestored => write!(f, "⚡ Energy restored by 1!"),
            GameMessage::BetIncreased(bet) => write!(f, "🎯 Bet increased to {}", bet),
            GameMessage::BetDecreased(bet) => write!(f, "🎯 Bet decreased to {}", bet),
            GameMessage::BoughtEnergy => {
                write!(f, "⚡ Bought 1 Energy for {} Gold", ENERGY_PRICE_GOLD)
            }
            GameMessage::BoughtGold => write!(f, "💰 Bought {} Gold for 1 Energy", GOLD_PER_ENERGY),
            GameMessage::NotEnoughGoldForEnergy => write!(f, "⚠️ Not enough gold to buy energy!"),
            GameMessage::NotEnoughEnergyForGold => write!(f, "⚠️ Not enough energy to buy gold!"),
        }
    }
}
