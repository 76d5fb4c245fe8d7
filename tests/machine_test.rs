//! Slot machine engine tests
//!
//! Drives the machine on its virtual clock with scripted paying draws, so no
//! test waits on real time.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slot_machine::machine::{
    Command, CommandOutcome, Economy, GameMessage, OutcomeSource, Regeneration, Rejection,
    Scheduler, SlotMachine, SpinPhase, SpinResult, Symbol, TimerKind, ENERGY_RECOVERY_MS, MAX_BET,
    MAX_ENERGY, MIN_BET, REEL_TICK_MS, SPIN_DURATION_MS,
};

/// Paying draws taken from a script; falls back to a losing result
struct Scripted {
    results: VecDeque<SpinResult>,
    draws: Rc<Cell<u32>>,
}

impl OutcomeSource for Scripted {
    fn draw_symbol(&mut self, _bet: u32) -> Symbol {
        Symbol::new(3).expect("3 is a valid symbol")
    }

    fn draw_result(&mut self, _bet: u32) -> SpinResult {
        self.draws.set(self.draws.get() + 1);
        self.results.pop_front().unwrap_or_else(losing)
    }
}

fn losing() -> SpinResult {
    SpinResult::from_values([1, 2, 3]).expect("valid reels")
}

fn result(values: [u8; 3]) -> SpinResult {
    SpinResult::from_values(values).expect("valid reels")
}

fn scripted_machine(economy: Economy, results: &[SpinResult]) -> (SlotMachine, Rc<Cell<u32>>) {
    let draws = Rc::new(Cell::new(0));
    let source = Scripted {
        results: results.iter().copied().collect(),
        draws: Rc::clone(&draws),
    };
    (
        SlotMachine::with_outcome_source(economy, Box::new(source)),
        draws,
    )
}

#[test]
fn test_initial_snapshot() {
    let machine = SlotMachine::new();
    let snapshot = machine.snapshot();
    assert_eq!(snapshot.energy, 50);
    assert_eq!(snapshot.gold, 100);
    assert_eq!(snapshot.bet, 1);
    assert!(!snapshot.spinning);
    assert_eq!(snapshot.current_result, result([0, 0, 0]));
    assert_eq!(snapshot.message, GameMessage::Welcome);
    assert_eq!(snapshot.seconds_until_next_energy, None);
}

#[test]
fn test_spin_lifecycle() {
    let (mut machine, draws) =
        scripted_machine(Economy::with_balances(50, 100, 1), &[result([5, 5, 5])]);

    assert_eq!(machine.handle(Command::Spin), CommandOutcome::Accepted);
    assert!(machine.is_spinning());
    assert_eq!(machine.message(), GameMessage::Spinning);
    assert_eq!(machine.economy().gold(), 99);
    assert_eq!(machine.economy().energy(), 49);

    // Halfway through only decorative draws have happened
    machine.advance(SPIN_DURATION_MS / 2);
    assert!(machine.is_spinning());
    assert_eq!(draws.get(), 0);

    machine.advance(SPIN_DURATION_MS / 2);
    assert!(!machine.is_spinning());
    assert_eq!(draws.get(), 1);
    assert_eq!(machine.current_result(), result([5, 5, 5]));
    assert_eq!(machine.message(), GameMessage::Jackpot { gold: 60 });
    assert_eq!(machine.economy().gold(), 159);
    assert_eq!(machine.economy().energy(), 49);

    let stats = machine.stats();
    assert_eq!(stats.spins_completed, 1);
    assert_eq!(stats.jackpots, 1);
    assert_eq!(stats.gold_won, 60);
    assert_eq!(stats.net_gold(), 59);
}

#[test]
fn test_reel_ticker_stops_before_final_draw() {
    let (mut machine, draws) = scripted_machine(Economy::new(), &[result([7, 7, 7])]);
    machine.handle(Command::Spin);

    // Reel ticker, completion timer and recovery timer
    assert_eq!(machine.scheduler().pending(), 3);

    // The reel ticker is also due at the end of the window
    assert_eq!(SPIN_DURATION_MS % REEL_TICK_MS, 0);
    machine.advance(SPIN_DURATION_MS);

    assert_eq!(draws.get(), 1);
    assert_eq!(machine.current_result(), result([7, 7, 7]));
    // Only energy recovery remains armed
    assert_eq!(machine.scheduler().pending(), 1);

    // Later time never repaints the reels
    machine.advance(10 * REEL_TICK_MS);
    assert_eq!(machine.current_result(), result([7, 7, 7]));
    assert_eq!(draws.get(), 1);
}

/// Reel animation frames taken from a script, counting every draw
struct ReelFrames {
    frames: Vec<SpinResult>,
    draws: Rc<Cell<u32>>,
}

impl OutcomeSource for ReelFrames {
    fn draw_symbol(&mut self, _bet: u32) -> Symbol {
        Symbol::ENERGY
    }

    fn draw_result(&mut self, _bet: u32) -> SpinResult {
        let frame = self.frames[self.draws.get() as usize % self.frames.len()];
        self.draws.set(self.draws.get() + 1);
        frame
    }
}

fn frame(index: u8) -> SpinResult {
    result([index % 10, (index + 1) % 10, (index + 3) % 10])
}

#[test]
fn test_reel_animation_during_spin() {
    let reel_draws = Rc::new(Cell::new(0));
    let paying_draws = Rc::new(Cell::new(0));
    let frames: Vec<SpinResult> = (0..20).map(frame).collect();
    let reels = ReelFrames {
        frames: frames.clone(),
        draws: Rc::clone(&reel_draws),
    };
    let outcomes = Scripted {
        results: VecDeque::from([result([3, 3, 3])]),
        draws: Rc::clone(&paying_draws),
    };
    let mut machine =
        SlotMachine::with_sources(Economy::new(), Box::new(reels), Box::new(outcomes));

    machine.handle(Command::Spin);
    machine.advance(2 * REEL_TICK_MS + 20);
    assert_eq!(reel_draws.get(), 2);
    assert_eq!(machine.current_result(), frames[1]);
    match machine.spin_phase() {
        SpinPhase::Spinning(session) => {
            assert_eq!(session.started_at, 0);
            assert_eq!(session.bet, 1);
            assert_eq!(session.intermediate, frames[1]);
        }
        SpinPhase::Idle => panic!("spin should still be running"),
    }

    // Last reel tick inside the window lands at 950ms
    machine.advance(SPIN_DURATION_MS - REEL_TICK_MS - (2 * REEL_TICK_MS + 20));
    assert_eq!(machine.now(), SPIN_DURATION_MS - REEL_TICK_MS);
    assert_eq!(reel_draws.get(), 19);
    assert_eq!(machine.current_result(), frames[18]);
    assert_eq!(paying_draws.get(), 0);

    // The reel tick due together with completion never runs
    machine.advance(REEL_TICK_MS);
    assert_eq!(reel_draws.get(), 19);
    assert_eq!(paying_draws.get(), 1);
    assert!(matches!(machine.spin_phase(), SpinPhase::Idle));
    assert_eq!(machine.current_result(), result([3, 3, 3]));
    assert_eq!(machine.message(), GameMessage::TripleMatch);

    machine.advance(SPIN_DURATION_MS);
    assert_eq!(reel_draws.get(), 19);
}

#[test]
fn test_recovery_timer_tracks_next_tick() {
    let (mut machine, _) = scripted_machine(Economy::with_balances(20, 100, 1), &[]);
    assert_eq!(machine.regeneration().timer_id(), None);

    machine.handle(Command::Spin);
    let timer = machine
        .regeneration()
        .timer_id()
        .expect("spin starts recovery");
    assert!(machine.scheduler().is_armed(timer));
    assert_eq!(machine.scheduler().due_time(timer), Some(ENERGY_RECOVERY_MS));

    machine.advance(ENERGY_RECOVERY_MS);
    assert_eq!(machine.regeneration().timer_id(), Some(timer));
    assert_eq!(
        machine.scheduler().due_time(timer),
        Some(2 * ENERGY_RECOVERY_MS)
    );
    assert_eq!(
        machine.regeneration().next_tick(),
        machine.scheduler().due_time(timer)
    );

    machine.handle(Command::Quit);
    assert!(!machine.scheduler().is_armed(timer));
    assert_eq!(machine.scheduler().due_time(timer), None);
}

#[test]
fn test_advance_saturates_at_end_of_clock() {
    let mut machine = SlotMachine::new_with_seed(5);
    machine.advance(u64::MAX);
    machine.advance(1);
    assert_eq!(machine.now(), u64::MAX);

    // Armed timers still fire on the way to the end of the clock
    let (mut machine, draws) = scripted_machine(Economy::new(), &[result([1, 1, 1])]);
    machine.handle(Command::Spin);
    machine.advance(u64::MAX);
    assert_eq!(machine.now(), u64::MAX);
    assert_eq!(draws.get(), 1);
    assert_eq!(machine.economy().energy(), MAX_ENERGY);
    assert_eq!(machine.scheduler().pending(), 0);
}

#[test]
fn test_quit_when_idle() {
    let mut machine = SlotMachine::new_with_seed(3);
    assert_eq!(machine.handle(Command::Quit), CommandOutcome::Quit);
    assert!(machine.is_shut_down());
    assert_eq!(
        machine.handle(Command::Quit),
        CommandOutcome::Rejected(Rejection::ShutDown)
    );
}

#[test]
fn test_commands_rejected_while_spinning() {
    let (mut machine, _) = scripted_machine(Economy::new(), &[]);
    machine.handle(Command::Spin);

    for command in [
        Command::Spin,
        Command::IncreaseBet,
        Command::DecreaseBet,
        Command::BuyEnergy,
        Command::BuyGold,
    ] {
        assert_eq!(
            machine.handle(command),
            CommandOutcome::Rejected(Rejection::Busy)
        );
    }
    assert_eq!(machine.economy().bet(), 1);
    assert_eq!(machine.economy().gold(), 99);
    assert_eq!(machine.economy().energy(), 49);
    assert_eq!(machine.message(), GameMessage::Spinning);

    machine.finish_spin();
    assert_eq!(machine.handle(Command::IncreaseBet), CommandOutcome::Accepted);
    assert_eq!(machine.message(), GameMessage::BetIncreased(2));
}

#[test]
fn test_spin_without_gold() {
    let (mut machine, draws) = scripted_machine(Economy::with_balances(50, 0, 1), &[]);

    assert_eq!(
        machine.handle(Command::Spin),
        CommandOutcome::Rejected(Rejection::NotEnoughGold)
    );
    assert!(!machine.is_spinning());
    assert_eq!(machine.economy().gold(), 0);
    assert_eq!(machine.economy().energy(), 50);
    assert_eq!(machine.message(), GameMessage::NotEnoughGoldToSpin);
    assert_eq!(draws.get(), 0);

    // Recovery was started anyway and shuts itself off at full energy
    assert!(machine.regeneration().is_active());
    machine.advance(ENERGY_RECOVERY_MS);
    assert!(!machine.regeneration().is_active());
    assert_eq!(machine.economy().energy(), 50);
    assert_eq!(machine.seconds_until_next_energy(), None);
    assert_eq!(machine.message(), GameMessage::NotEnoughGoldToSpin);
}

#[test]
fn test_spin_without_energy() {
    let (mut machine, _) = scripted_machine(Economy::with_balances(0, 100, 1), &[]);
    assert_eq!(
        machine.handle(Command::Spin),
        CommandOutcome::Rejected(Rejection::NotEnoughEnergy)
    );
    assert_eq!(machine.message(), GameMessage::NotEnoughEnergyToSpin);
    assert_eq!(machine.economy().gold(), 100);
}

#[test]
fn test_regeneration_reaches_cap_and_stops() {
    let (mut machine, _) = scripted_machine(Economy::with_balances(50, 100, 1), &[]);
    machine.handle(Command::Spin);
    machine.finish_spin();
    assert_eq!(machine.economy().energy(), 49);
    assert_eq!(machine.seconds_until_next_energy(), Some(59));

    machine.advance(ENERGY_RECOVERY_MS - SPIN_DURATION_MS - 1);
    assert_eq!(machine.seconds_until_next_energy(), Some(1));
    assert_eq!(machine.economy().energy(), 49);

    machine.advance(1);
    assert_eq!(machine.economy().energy(), 50);
    assert_eq!(machine.message(), GameMessage::EnergyRestored);
    assert!(!machine.regeneration().is_active());
    assert_eq!(machine.regeneration().next_tick(), None);
    assert_eq!(machine.seconds_until_next_energy(), None);
    assert_eq!(machine.scheduler().pending(), 0);
    assert_eq!(machine.stats().energy_regenerated, 1);
}

#[test]
fn test_regeneration_keeps_running_below_cap() {
    let (mut machine, _) = scripted_machine(Economy::with_balances(10, 100, 1), &[]);
    machine.handle(Command::Spin);
    machine.finish_spin();
    assert_eq!(machine.economy().energy(), 9);

    machine.advance(3 * ENERGY_RECOVERY_MS);
    assert_eq!(machine.economy().energy(), 12);
    assert!(machine.regeneration().is_active());
    assert_eq!(
        machine.regeneration().next_tick(),
        Some(4 * ENERGY_RECOVERY_MS)
    );

    // A second spin does not arm a second recovery timer
    machine.handle(Command::Spin);
    machine.finish_spin();
    let recovery_timers = machine.scheduler().pending();
    assert_eq!(recovery_timers, 1);
}

#[test]
fn test_regeneration_standalone() {
    let mut scheduler = Scheduler::new();
    let mut regeneration = Regeneration::new();
    let mut economy = Economy::with_balances(49, 0, 1);

    assert!(regeneration.start(&mut scheduler));
    assert!(!regeneration.start(&mut scheduler));
    assert_eq!(regeneration.next_tick(), Some(ENERGY_RECOVERY_MS));

    let fired = scheduler
        .pop_due(ENERGY_RECOVERY_MS)
        .expect("recovery timer is due");
    assert_eq!(fired.kind, TimerKind::EnergyRecovery);

    let tick = regeneration.on_tick(&mut economy, &mut scheduler);
    assert!(tick.restored);
    assert!(tick.stopped);
    assert_eq!(economy.energy(), MAX_ENERGY);
    assert!(!regeneration.is_active());
    assert_eq!(regeneration.next_tick(), None);
    assert_eq!(scheduler.pending(), 0);

    // Stopping again is harmless
    regeneration.stop(&mut scheduler);
    assert!(!regeneration.is_active());
}

#[test]
fn test_scheduler_ordering_and_cancel() {
    let mut scheduler = Scheduler::new();
    let every = scheduler.schedule_every(50, TimerKind::ReelTick);
    let once = scheduler.schedule_once(100, TimerKind::SpinComplete);

    let first = scheduler.pop_due(1000).expect("ticker due at 50");
    assert_eq!((first.id, first.at), (every, 50));
    assert_eq!(scheduler.now(), 50);

    // Both due at 100; the one-shot was armed before the re-armed ticker
    let second = scheduler.pop_due(1000).expect("completion due at 100");
    assert_eq!((second.id, second.at), (once, 100));

    assert!(scheduler.cancel(every));
    assert!(!scheduler.cancel(every));
    assert!(scheduler.pop_due(1000).is_none());

    scheduler.advance_clock(400);
    assert_eq!(scheduler.now(), 400);
    scheduler.advance_clock(10);
    assert_eq!(scheduler.now(), 400);
}

#[test]
fn test_bet_and_conversion_commands() {
    let (mut machine, _) = scripted_machine(Economy::with_balances(50, 100, 1), &[]);

    assert_eq!(machine.handle(Command::DecreaseBet), CommandOutcome::Accepted);
    assert_eq!(machine.message(), GameMessage::BetDecreased(1));
    assert_eq!(machine.message().to_string(), "🎯 Bet decreased to 1");

    for _ in 0..20 {
        machine.handle(Command::IncreaseBet);
    }
    assert_eq!(machine.economy().bet(), MAX_BET);
    assert_eq!(machine.message().to_string(), "🎯 Bet increased to 15");

    assert_eq!(machine.handle(Command::BuyGold), CommandOutcome::Accepted);
    assert_eq!(machine.economy().gold(), 110);
    assert_eq!(machine.economy().energy(), 49);
    assert_eq!(
        machine.message().to_string(),
        "💰 Bought 10 Gold for 1 Energy"
    );

    assert_eq!(machine.handle(Command::BuyEnergy), CommandOutcome::Accepted);
    assert_eq!(machine.economy().gold(), 100);
    assert_eq!(machine.economy().energy(), 50);
    assert_eq!(
        machine.message().to_string(),
        "⚡ Bought 1 Energy for 10 Gold"
    );
    assert_eq!(machine.stats().energy_bought, 1);
    assert_eq!(machine.stats().gold_bought, 1);
}

#[test]
fn test_failed_conversions_leave_state_unchanged() {
    let (mut machine, _) = scripted_machine(Economy::with_balances(0, 5, 1), &[]);

    assert_eq!(
        machine.handle(Command::BuyEnergy),
        CommandOutcome::Rejected(Rejection::NotEnoughGold)
    );
    assert_eq!(machine.message(), GameMessage::NotEnoughGoldForEnergy);
    assert_eq!(
        machine.handle(Command::BuyGold),
        CommandOutcome::Rejected(Rejection::NotEnoughEnergy)
    );
    assert_eq!(machine.message(), GameMessage::NotEnoughEnergyForGold);
    assert_eq!(machine.economy().gold(), 5);
    assert_eq!(machine.economy().energy(), 0);
}

#[test]
fn test_quit_cancels_all_timers() {
    let (mut machine, draws) = scripted_machine(Economy::new(), &[result([5, 5, 5])]);
    machine.handle(Command::Spin);
    machine.advance(200);
    assert!(machine.scheduler().pending() > 0);

    assert_eq!(machine.handle(Command::Quit), CommandOutcome::Quit);
    assert!(machine.is_shut_down());
    assert!(!machine.is_spinning());
    assert_eq!(machine.scheduler().pending(), 0);
    assert_eq!(machine.seconds_until_next_energy(), None);

    // Nothing fires afterwards and the abandoned spin never pays out
    machine.advance(10 * ENERGY_RECOVERY_MS);
    assert_eq!(draws.get(), 0);
    assert_eq!(machine.economy().gold(), 99);

    assert_eq!(
        machine.handle(Command::Spin),
        CommandOutcome::Rejected(Rejection::ShutDown)
    );
    machine.shutdown();
    assert_eq!(machine.scheduler().pending(), 0);
}

#[test]
fn test_mega_boost_restores_energy_and_stops_recovery_on_next_tick() {
    let (mut machine, _) =
        scripted_machine(Economy::with_balances(45, 100, 1), &[result([0, 0, 0])]);
    machine.handle(Command::Spin);
    machine.finish_spin();

    assert_eq!(machine.economy().energy(), MAX_ENERGY);
    assert_eq!(machine.stats().mega_boosts, 1);
    assert_eq!(machine.stats().energy_won, 6);

    // Recovery is still armed until its next tick notices the cap
    assert!(machine.regeneration().is_active());
    machine.advance(ENERGY_RECOVERY_MS);
    assert!(!machine.regeneration().is_active());
    assert_eq!(machine.message(), GameMessage::MegaEnergyBoost);
}

#[test]
fn test_invariants_under_random_play() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut machine = SlotMachine::new_with_seed(11);

    for _ in 0..3000 {
        let command = match rng.random_range(0..6) {
            0 | 1 => Command::Spin,
            2 => Command::IncreaseBet,
            3 => Command::DecreaseBet,
            4 => Command::BuyEnergy,
            _ => Command::BuyGold,
        };
        let was_spinning = machine.is_spinning();
        let outcome = machine.handle(command);
        if was_spinning {
            assert_eq!(outcome, CommandOutcome::Rejected(Rejection::Busy));
        }

        machine.advance(rng.random_range(0..2 * SPIN_DURATION_MS));

        let snapshot = machine.snapshot();
        assert!(snapshot.energy <= MAX_ENERGY);
        assert!((MIN_BET..=MAX_BET).contains(&snapshot.bet));
        assert_eq!(
            snapshot.seconds_until_next_energy.is_some(),
            machine.regeneration().is_active()
        );
        if let Some(secs) = snapshot.seconds_until_next_energy {
            assert!(secs <= ENERGY_RECOVERY_MS / 1000);
        }
    }

    let stats = machine.stats();
    assert!(stats.spins_completed <= stats.spins_started);
    assert!(stats.spins_started - stats.spins_completed <= 1);
}
