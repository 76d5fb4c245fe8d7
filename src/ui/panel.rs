//! Text panel drawn every frame

use crate::machine::{MachineSnapshot, ENERGY_PRICE_GOLD, GOLD_PER_ENERGY};

const RULE: &str = "--------------------------------";

/// Render the machine state as lines of text
pub fn render(snapshot: &MachineSnapshot) -> Vec<String> {
    vec![
        "🎰🎲 SLOT MACHINE 🎲🎰".to_string(),
        RULE.to_string(),
        format!(
            "⚡ Energy: {} | 💰 Gold: {} | 🎯 Bet: {}",
            snapshot.energy, snapshot.gold, snapshot.bet
        ),
        format!(
            "🕒 Next Energy in: {}s",
            snapshot.seconds_until_next_energy.unwrap_or(0)
        ),
        RULE.to_string(),
        format!("🎰 [ {} ] 🎰", snapshot.current_result),
        RULE.to_string(),
        format!("📢 {}", snapshot.message),
        RULE.to_string(),
        "🔄 Press SPACEBAR to SPIN 🎰".to_string(),
        "🔼 Up to INCREASE BET 📈".to_string(),
        "🔽 Down to DECREASE BET 📉".to_string(),
        format!(
            "💲 ⚡ Press B to BUY ENERGY (+1 Energy for {} Gold)",
            ENERGY_PRICE_GOLD
        ),
        format!(
            "💲 💰 Press N to BUY GOLD (+{} Gold for 1 Energy)",
            GOLD_PER_ENERGY
        ),
        "❌ Press Q to QUIT".to_string(),
    ]
}
