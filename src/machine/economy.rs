//! Gold, energy and bet tracking for the slot machine
//!
//! `Economy` is the only place these values change. Every mutation keeps
//! `energy <= MAX_ENERGY` and `MIN_BET <= bet <= MAX_BET`; gold is unsigned.

use thiserror::Error;

use super::message::GameMessage;
use super::types::{
    ENERGY_PRICE_GOLD, GOLD_PER_ENERGY, MAX_BET, MAX_ENERGY, MIN_BET, SPIN_ENERGY_COST,
    STARTING_BET, STARTING_ENERGY, STARTING_GOLD,
};

/// Why a purchase or spin could not be paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Shortfall {
    #[error("not enough gold to spin")]
    GoldForSpin,
    #[error("not enough energy to spin")]
    EnergyForSpin,
    #[error("not enough gold to buy energy")]
    GoldForEnergy,
    #[error("not enough energy to buy gold")]
    EnergyForGold,
}

impl Shortfall {
    /// Message shown to the player for this shortfall
    pub fn message(self) -> GameMessage {
        match self {
            Shortfall::GoldForSpin => GameMessage::NotEnoughGoldToSpin,
            Shortfall::EnergyForSpin => GameMessage::NotEnoughEnergyToSpin,
            Shortfall::GoldForEnergy => GameMessage::NotEnoughGoldForEnergy,
            Shortfall::EnergyForGold => GameMessage::NotEnoughEnergyForGold,
        }
    }
}

/// The player's resources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Economy {
    energy: u32,
    gold: u32,
    bet: u32,
}

impl Default for Economy {
    fn default() -> Self {
        Self::new()
    }
}

impl Economy {
    /// Create a ledger with the starting resources
    pub fn new() -> Self {
        Self {
            energy: STARTING_ENERGY,
            gold: STARTING_GOLD,
            bet: STARTING_BET,
        }
    }

    /// Create a ledger with explicit values, clamped into range
    pub fn with_balances(energy: u32, gold: u32, bet: u32) -> Self {
        Self {
            energy: energy.min(MAX_ENERGY),
            gold,
            bet: bet.clamp(MIN_BET, MAX_BET),
        }
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn bet(&self) -> u32 {
        self.bet
    }

    pub fn energy_full(&self) -> bool {
        self.energy >= MAX_ENERGY
    }

    /// Check if the player can pay for a spin at the current bet
    pub fn can_afford_spin(&self) -> bool {
        self.check_spin().is_ok()
    }

    fn check_spin(&self) -> Result<(), Shortfall> {
        if self.gold < self.bet {
            return Err(Shortfall::GoldForSpin);
        }
        if self.energy < SPIN_ENERGY_COST {
            return Err(Shortfall::EnergyForSpin);
        }
        Ok(())
    }

    /// Deduct the bet and one energy for a spin.
    /// Leaves the ledger untouched when the player cannot pay.
    pub fn reserve_for_spin(&mut self) -> Result<(), Shortfall> {
        self.check_spin()?;
        self.gold -= self.bet;
        self.energy -= SPIN_ENERGY_COST;
        self.check_invariants();
        Ok(())
    }

    /// Credit spin winnings. Energy above the cap is discarded.
    /// Returns the energy actually credited.
    pub fn apply_reward(&mut self, gold_gain: u32, energy_gain: u32) -> u32 {
        self.gold = self.gold.saturating_add(gold_gain);
        let credited = self.credit_energy(energy_gain);
        self.check_invariants();
        credited
    }

    /// Add energy up to the cap, returning how much was added
    pub fn credit_energy(&mut self, amount: u32) -> u32 {
        let before = self.energy;
        self.energy = self.energy.saturating_add(amount).min(MAX_ENERGY);
        self.energy - before
    }

    pub fn increase_bet(&mut self) -> u32 {
        self.bet = (self.bet + 1).min(MAX_BET);
        self.bet
    }

    pub fn decrease_bet(&mut self) -> u32 {
        self.bet = self.bet.saturating_sub(1).max(MIN_BET);
        self.bet
    }

    /// Trade gold for one energy.
    /// At full energy the gold is still spent and the energy is lost to the cap.
    pub fn buy_energy(&mut self) -> Result<(), Shortfall> {
        if self.gold < ENERGY_PRICE_GOLD {
            return Err(Shortfall::GoldForEnergy);
        }
        self.gold -= ENERGY_PRICE_GOLD;
        self.credit_energy(1);
        self.check_invariants();
        Ok(())
    }

    /// Trade one energy for gold
    pub fn buy_gold(&mut self) -> Result<(), Shortfall> {
        if self.energy < 1 {
            return Err(Shortfall::EnergyForGold);
        }
        self.energy -= 1;
        self.gold = self.gold.saturating_add(GOLD_PER_ENERGY);
        self.check_invariants();
        Ok(())
    }

    fn check_invariants(&self) {
        debug_assert!(self.energy <= MAX_ENERGY, "energy {} above cap", self.energy);
        debug_assert!(
            (MIN_BET..=MAX_BET).contains(&self.bet),
            "bet {} out of range",
            self.bet
        );
    }

    /// Get a summary string for display
    pub fn summary(&self) -> String {
        format!(
            "Energy: {} | Gold: {} | Bet: {}",
            self.energy, self.gold, self.bet
        )
    }
}
