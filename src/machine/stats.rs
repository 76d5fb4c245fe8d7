//! Session statistics

use log::info;

use super::reward::WinKind;
use super::spin::SpinCompletion;

/// Running totals for one play session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub spins_started: u32,
    pub spins_completed: u32,
    pub jackpots: u32,
    pub mega_boosts: u32,
    pub triple_matches: u32,
    pub partial_wins: u32,
    pub losses: u32,
    pub gold_wagered: u64,
    pub gold_won: u64,
    pub energy_won: u64,
    pub energy_regenerated: u64,
    pub energy_bought: u32,
    pub gold_bought: u32,
}

impl SessionStats {
    pub fn record_spin_started(&mut self, bet: u32) {
        self.spins_started += 1;
        self.gold_wagered += u64::from(bet);
    }

    pub fn record_completion(&mut self, completion: &SpinCompletion) {
        self.spins_completed += 1;
        self.gold_won += u64::from(completion.reward.gold_gain);
        self.energy_won += u64::from(completion.energy_credited);
        match completion.reward.kind {
            WinKind::Jackpot => self.jackpots += 1,
            WinKind::MegaEnergyBoost => self.mega_boosts += 1,
            WinKind::TripleMatch => self.triple_matches += 1,
            WinKind::Bonus => self.partial_wins += 1,
            WinKind::NoWin => self.losses += 1,
        }
    }

    /// Gold won minus gold wagered
    pub fn net_gold(&self) -> i64 {
        self.gold_won as i64 - self.gold_wagered as i64
    }

    /// Share of completed spins that paid anything, in percent
    pub fn win_rate(&self) -> f32 {
        if self.spins_completed == 0 {
            return 0.0;
        }
        (self.spins_completed - self.losses) as f32 / self.spins_completed as f32 * 100.0
    }

    pub fn log_summary(&self) {
        info!("Spins started: {}", self.spins_started);
        info!("Spins completed: {}", self.spins_completed);
        info!(
            "Jackpots: {}, Mega boosts: {}, Triple matches: {}, Partial wins: {}, Losses: {}",
            self.jackpots, self.mega_boosts, self.triple_matches, self.partial_wins, self.losses
        );
        info!(
            "Gold wagered: {}, Gold won: {}, Net gold: {}",
            self.gold_wagered,
            self.gold_won,
            self.net_gold()
        );
        info!(
            "Energy won: {}, Energy regenerated: {}",
            self.energy_won, self.energy_regenerated
        );
        info!(
            "Conversions: {} energy bought, {} gold bought",
            self.energy_bought, self.gold_bought
        );
        info!("Win rate: {:.1}%", self.win_rate());
    }
}
