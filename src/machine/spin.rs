//! Spin sequencing
//!
//! A spin moves Idle -> Spinning -> Idle. While spinning, a reel ticker keeps
//! drawing throwaway results for the display. When the spin window closes the
//! ticker is cancelled first, then a single authoritative draw decides the
//! reward.

use log::{debug, info};
use thiserror::Error;

use super::economy::{Economy, Shortfall};
use super::outcome::OutcomeSource;
use super::regeneration::Regeneration;
use super::reward::{evaluate, Reward};
use super::scheduler::{Scheduler, TimerId, TimerKind};
use super::types::{SpinResult, REEL_TICK_MS, SPIN_DURATION_MS};

/// Why a spin request was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpinRejected {
    #[error("a spin is already in progress")]
    Busy,
    #[error(transparent)]
    Unaffordable(#[from] Shortfall),
}

/// A spin in progress
#[derive(Debug, Clone)]
pub struct SpinSession {
    pub started_at: u64,
    /// Bet the spin was paid at
    pub bet: u32,
    /// Latest decorative result
    pub intermediate: SpinResult,
    reel_timer: TimerId,
    finish_timer: TimerId,
}

#[derive(Debug, Clone, Default)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning(SpinSession),
}

/// Outcome of a completed spin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinCompletion {
    pub result: SpinResult,
    pub reward: Reward,
    /// Energy actually added after the cap
    pub energy_credited: u32,
}

pub struct SpinOrchestrator {
    phase: SpinPhase,
    /// Result currently on display
    visible: SpinResult,
    /// Source for the reel animation only
    reels: Box<dyn OutcomeSource>,
    /// Source for the result that pays out
    outcomes: Box<dyn OutcomeSource>,
}

impl SpinOrchestrator {
    pub fn new(reels: Box<dyn OutcomeSource>, outcomes: Box<dyn OutcomeSource>) -> Self {
        Self {
            phase: SpinPhase::Idle,
            visible: SpinResult::default(),
            reels,
            outcomes,
        }
    }

    pub fn phase(&self) -> &SpinPhase {
        &self.phase
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, SpinPhase::Spinning(_))
    }

    pub fn visible_result(&self) -> SpinResult {
        self.visible
    }

    /// Start a spin: make sure regeneration runs, pay for the spin and arm the
    /// reel ticker and the completion timer.
    pub fn request_spin(
        &mut self,
        economy: &mut Economy,
        regeneration: &mut Regeneration,
        scheduler: &mut Scheduler,
    ) -> Result<(), SpinRejected> {
        if self.is_spinning() {
            return Err(SpinRejected::Busy);
        }

        regeneration.start(scheduler);
        economy.reserve_for_spin()?;

        let finish_timer = scheduler.schedule_once(SPIN_DURATION_MS, TimerKind::SpinComplete);
        let reel_timer = scheduler.schedule_every(REEL_TICK_MS, TimerKind::ReelTick);
        self.phase = SpinPhase::Spinning(SpinSession {
            started_at: scheduler.now(),
            bet: economy.bet(),
            intermediate: self.visible,
            reel_timer,
            finish_timer,
        });
        info!("Spin started at bet {} ({})", economy.bet(), economy.summary());
        Ok(())
    }

    /// Publish a fresh decorative result
    pub fn on_reel_tick(&mut self) {
        if let SpinPhase::Spinning(session) = &mut self.phase {
            session.intermediate = self.reels.draw_result(session.bet);
            self.visible = session.intermediate;
        }
    }

    /// Close the spin window and pay out. Returns `None` if no spin was running.
    pub fn on_spin_complete(
        &mut self,
        economy: &mut Economy,
        scheduler: &mut Scheduler,
    ) -> Option<SpinCompletion> {
        let session = match std::mem::take(&mut self.phase) {
            SpinPhase::Spinning(session) => session,
            SpinPhase::Idle => return None,
        };
        scheduler.cancel(session.reel_timer);
        scheduler.cancel(session.finish_timer);

        let result = self.outcomes.draw_result(session.bet);
        let reward = evaluate(&result, session.bet);
        let energy_credited = economy.apply_reward(reward.gold_gain, reward.energy_gain);
        self.visible = result;

        info!(
            "Spin finished [{}]: {:?} +{} gold +{} energy ({})",
            result,
            reward.kind,
            reward.gold_gain,
            energy_credited,
            economy.summary()
        );

        Some(SpinCompletion {
            result,
            reward,
            energy_credited,
        })
    }

    /// Abandon a running spin without paying out. Safe to call when idle.
    pub fn cancel(&mut self, scheduler: &mut Scheduler) {
        if let SpinPhase::Spinning(session) = std::mem::take(&mut self.phase) {
            scheduler.cancel(session.reel_timer);
            scheduler.cancel(session.finish_timer);
            debug!("Spin started at t={}ms abandoned", session.started_at);
        }
    }
}
