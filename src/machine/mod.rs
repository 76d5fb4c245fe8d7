//! Slot machine engine
//!
//! All game logic lives here: reel draws, reward evaluation, the resource
//! ledger, energy regeneration and spin sequencing. It has no terminal
//! dependency and can be driven entirely from tests on a virtual clock.

mod economy;
mod engine;
mod message;
mod outcome;
mod regeneration;
mod reward;
mod scheduler;
mod spin;
mod stats;
mod types;

pub use economy::{Economy, Shortfall};
pub use engine::{Command, CommandOutcome, MachineSnapshot, Rejection, SlotMachine};
pub use message::GameMessage;
pub use outcome::{gold_chance, OutcomeSource, RandomOutcome};
pub use regeneration::{RecoveryTick, Regeneration};
pub use reward::{evaluate, Reward, WinKind};
pub use scheduler::{FiredTimer, Repeat, Scheduler, TimerId, TimerKind};
pub use spin::{SpinCompletion, SpinOrchestrator, SpinPhase, SpinRejected, SpinSession};
pub use stats::SessionStats;
pub use types::{
    SpinResult, Symbol, BASE_GOLD_CHANCE, ENERGY_PRICE_GOLD, ENERGY_RECOVERY_MS, GOLD_PER_ENERGY,
    JACKPOT_BET_MULTIPLIER, JACKPOT_BONUS, MAX_BET, MAX_ENERGY, MEGA_BOOST_ENERGY, MIN_BET,
    REEL_COUNT, REEL_TICK_MS, SPIN_DURATION_MS, SPIN_ENERGY_COST, STARTING_BET, STARTING_ENERGY,
    STARTING_GOLD, TRIPLE_MATCH_GOLD,
};
