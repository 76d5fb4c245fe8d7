//! The slot machine engine that ties everything together
//!
//! `SlotMachine` owns the ledger, the timers, the spin state machine and the
//! message line. A front end feeds it commands and elapsed time and reads
//! back snapshots; nothing else touches the game state.

use log::{debug, info};

use super::economy::{Economy, Shortfall};
use super::message::GameMessage;
use super::outcome::{OutcomeSource, RandomOutcome};
use super::regeneration::Regeneration;
use super::scheduler::{FiredTimer, Scheduler, TimerKind};
use super::spin::{SpinOrchestrator, SpinPhase, SpinRejected};
use super::stats::SessionStats;
use super::types::SpinResult;

/// Player intents accepted by the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Spin,
    IncreaseBet,
    DecreaseBet,
    BuyEnergy,
    BuyGold,
    Quit,
}

/// Why a command had no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A spin is in progress
    Busy,
    NotEnoughGold,
    NotEnoughEnergy,
    /// The machine has already been shut down
    ShutDown,
}

impl From<Shortfall> for Rejection {
    fn from(shortfall: Shortfall) -> Self {
        match shortfall {
            Shortfall::GoldForSpin | Shortfall::GoldForEnergy => Rejection::NotEnoughGold,
            Shortfall::EnergyForSpin | Shortfall::EnergyForGold => Rejection::NotEnoughEnergy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Accepted,
    Rejected(Rejection),
    /// All timers were cancelled; the front end should exit
    Quit,
}

/// Read-only view of the machine for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineSnapshot {
    pub energy: u32,
    pub gold: u32,
    pub bet: u32,
    pub spinning: bool,
    pub current_result: SpinResult,
    pub message: GameMessage,
    /// `None` when energy is full and no recovery is scheduled
    pub seconds_until_next_energy: Option<u64>,
}

pub struct SlotMachine {
    economy: Economy,
    scheduler: Scheduler,
    regeneration: Regeneration,
    spin: SpinOrchestrator,
    message: GameMessage,
    stats: SessionStats,
    shut_down: bool,
}

impl Default for SlotMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotMachine {
    fn new_internal(
        economy: Economy,
        reels: Box<dyn OutcomeSource>,
        outcomes: Box<dyn OutcomeSource>,
    ) -> Self {
        Self {
            economy,
            scheduler: Scheduler::new(),
            regeneration: Regeneration::new(),
            spin: SpinOrchestrator::new(reels, outcomes),
            message: GameMessage::Welcome,
            stats: SessionStats::default(),
            shut_down: false,
        }
    }

    /// Create a machine with starting resources and thread-local randomness
    pub fn new() -> Self {
        Self::new_internal(
            Economy::new(),
            Box::new(RandomOutcome::new()),
            Box::new(RandomOutcome::new()),
        )
    }

    /// Create a machine with a seeded RNG for reproducible sessions
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_internal(
            Economy::new(),
            Box::new(RandomOutcome::new_with_seed(seed.wrapping_add(1))),
            Box::new(RandomOutcome::new_with_seed(seed)),
        )
    }

    /// Create a machine whose paying draws come from `outcomes`.
    /// The reel animation keeps using its own RNG.
    pub fn with_outcome_source(economy: Economy, outcomes: Box<dyn OutcomeSource>) -> Self {
        Self::new_internal(economy, Box::new(RandomOutcome::new()), outcomes)
    }

    /// Create a machine with both the reel animation and the paying draws
    /// supplied by the caller
    pub fn with_sources(
        economy: Economy,
        reels: Box<dyn OutcomeSource>,
        outcomes: Box<dyn OutcomeSource>,
    ) -> Self {
        Self::new_internal(economy, reels, outcomes)
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn regeneration(&self) -> &Regeneration {
        &self.regeneration
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn message(&self) -> GameMessage {
        self.message
    }

    pub fn spin_phase(&self) -> &SpinPhase {
        self.spin.phase()
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_spinning()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn current_result(&self) -> SpinResult {
        self.spin.visible_result()
    }

    pub fn seconds_until_next_energy(&self) -> Option<u64> {
        self.regeneration.seconds_until_next(self.scheduler.now())
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            energy: self.economy.energy(),
            gold: self.economy.gold(),
            bet: self.economy.bet(),
            spinning: self.is_spinning(),
            current_result: self.current_result(),
            message: self.message,
            seconds_until_next_energy: self.seconds_until_next_energy(),
        }
    }

    /// Apply a player command
    pub fn handle(&mut self, command: Command) -> CommandOutcome {
        if self.shut_down {
            return CommandOutcome::Rejected(Rejection::ShutDown);
        }
        if self.is_spinning() && command != Command::Quit {
            debug!("Ignoring {:?} while spinning", command);
            return CommandOutcome::Rejected(Rejection::Busy);
        }

        match command {
            Command::Spin => self.request_spin(),
            Command::IncreaseBet => {
                let bet = self.economy.increase_bet();
                self.message = GameMessage::BetIncreased(bet);
                CommandOutcome::Accepted
            }
            Command::DecreaseBet => {
                let bet = self.economy.decrease_bet();
                self.message = GameMessage::BetDecreased(bet);
                CommandOutcome::Accepted
            }
            Command::BuyEnergy => match self.economy.buy_energy() {
                Ok(()) => {
                    self.stats.energy_bought += 1;
                    self.message = GameMessage::BoughtEnergy;
                    CommandOutcome::Accepted
                }
                Err(shortfall) => {
                    self.message = shortfall.message();
                    CommandOutcome::Rejected(shortfall.into())
                }
            },
            Command::BuyGold => match self.economy.buy_gold() {
                Ok(()) => {
                    self.stats.gold_bought += 1;
                    self.message = GameMessage::BoughtGold;
                    CommandOutcome::Accepted
                }
                Err(shortfall) => {
                    self.message = shortfall.message();
                    CommandOutcome::Rejected(shortfall.into())
                }
            },
            Command::Quit => {
                self.shutdown();
                CommandOutcome::Quit
            }
        }
    }

    fn request_spin(&mut self) -> CommandOutcome {
        let bet = self.economy.bet();
        match self
            .spin
            .request_spin(&mut self.economy, &mut self.regeneration, &mut self.scheduler)
        {
            Ok(()) => {
                self.stats.record_spin_started(bet);
                self.message = GameMessage::Spinning;
                CommandOutcome::Accepted
            }
            Err(SpinRejected::Busy) => CommandOutcome::Rejected(Rejection::Busy),
            Err(SpinRejected::Unaffordable(shortfall)) => {
                debug!("Spin refused: {}", shortfall);
                self.message = shortfall.message();
                CommandOutcome::Rejected(shortfall.into())
            }
        }
    }

    /// Move time forward by `delta_ms`, firing every timer that comes due
    pub fn advance(&mut self, delta_ms: u64) {
        let target = self.scheduler.now().saturating_add(delta_ms);
        while let Some(fired) = self.scheduler.pop_due(target) {
            self.dispatch(fired);
        }
        self.scheduler.advance_clock(target);
    }

    /// Jump straight to the next armed timer and fire it.
    /// Returns false when nothing is scheduled.
    pub fn advance_to_next_event(&mut self) -> bool {
        match self.scheduler.next_deadline() {
            Some(deadline) => {
                let delta = deadline.saturating_sub(self.scheduler.now());
                self.advance(delta);
                true
            }
            None => false,
        }
    }

    /// Run time forward until the current spin has paid out
    pub fn finish_spin(&mut self) {
        while self.is_spinning() && self.advance_to_next_event() {}
    }

    fn dispatch(&mut self, fired: FiredTimer) {
        match fired.kind {
            TimerKind::ReelTick => self.spin.on_reel_tick(),
            TimerKind::SpinComplete => {
                if let Some(completion) = self
                    .spin
                    .on_spin_complete(&mut self.economy, &mut self.scheduler)
                {
                    self.stats.record_completion(&completion);
                    self.message = completion.reward.message();
                }
            }
            TimerKind::EnergyRecovery => {
                let tick = self
                    .regeneration
                    .on_tick(&mut self.economy, &mut self.scheduler);
                if tick.restored {
                    self.stats.energy_regenerated += 1;
                    self.message = GameMessage::EnergyRestored;
                }
            }
        }
    }

    /// Cancel every timer the machine owns. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.spin.cancel(&mut self.scheduler);
        self.regeneration.stop(&mut self.scheduler);
        let leftover = self.scheduler.cancel_all();
        if !self.shut_down {
            info!("Slot machine shut down at t={}ms", self.scheduler.now());
        }
        debug_assert_eq!(leftover, 0, "timers left behind after shutdown");
        self.shut_down = true;
    }

    /// Print a summary of the machine state
    pub fn print_summary(&self) {
        println!("=== Slot Machine ===");
        println!("Time: {:.2}s", self.scheduler.now() as f64 / 1000.0);
        println!("{}", self.economy.summary());
        println!("Reels: [ {} ]", self.current_result());
        println!("Message: {}", self.message);
        match self.seconds_until_next_energy() {
            Some(secs) => println!("Next energy in: {}s", secs),
            None => println!("Energy full"),
        }
        println!(
            "Spins: {} | Gold won: {} | Net gold: {}",
            self.stats.spins_completed,
            self.stats.gold_won,
            self.stats.net_gold()
        );
    }
}
