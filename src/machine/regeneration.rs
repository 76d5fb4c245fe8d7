//! Passive energy regeneration
//!
//! Idle until the first spin attempt, then restores one energy per minute
//! until the cap is reached, at which point the timer is torn down again.

use log::{debug, info};

use super::economy::Economy;
use super::scheduler::{Scheduler, TimerId, TimerKind};
use super::types::ENERGY_RECOVERY_MS;

/// What happened on a regeneration tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecoveryTick {
    /// Energy was restored this tick
    pub restored: bool,
    /// Energy reached the cap and the timer was cancelled
    pub stopped: bool,
}

#[derive(Debug, Default)]
pub struct Regeneration {
    /// Armed recovery timer; `None` while idle
    timer: Option<TimerId>,
    /// Virtual time of the next restoration
    next_tick: Option<u64>,
}

impl Regeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn next_tick(&self) -> Option<u64> {
        self.next_tick
    }

    /// Whole seconds until the next restoration, rounded up
    pub fn seconds_until_next(&self, now: u64) -> Option<u64> {
        self.next_tick
            .map(|next| next.saturating_sub(now).div_ceil(1000))
    }

    /// Arm the recovery timer unless it is already running.
    /// Returns true if the timer was armed by this call.
    pub fn start(&mut self, scheduler: &mut Scheduler) -> bool {
        if self.timer.is_some() {
            return false;
        }
        let id = scheduler.schedule_every(ENERGY_RECOVERY_MS, TimerKind::EnergyRecovery);
        let next = scheduler.now().saturating_add(ENERGY_RECOVERY_MS);
        self.timer = Some(id);
        self.next_tick = Some(next);
        debug!("Energy recovery started, next tick at t={}ms", next);
        true
    }

    /// Handle the recovery timer firing
    pub fn on_tick(&mut self, economy: &mut Economy, scheduler: &mut Scheduler) -> RecoveryTick {
        let mut tick = RecoveryTick::default();

        if !economy.energy_full() {
            economy.credit_energy(1);
            self.next_tick = Some(scheduler.now().saturating_add(ENERGY_RECOVERY_MS));
            tick.restored = true;
            info!("Energy restored to {}", economy.energy());
        }

        if economy.energy_full() {
            self.stop(scheduler);
            tick.stopped = true;
        }

        tick
    }

    /// Cancel the recovery timer. Safe to call when already idle.
    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.timer.take() {
            scheduler.cancel(id);
            debug!("Energy recovery stopped");
        }
        self.next_tick = None;
    }
}
