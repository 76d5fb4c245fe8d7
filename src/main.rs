use anyhow::Result;
use clap::Parser;
use log::info;

use slot_machine::machine::{
    Command, CommandOutcome, SlotMachine, ENERGY_PRICE_GOLD, ENERGY_RECOVERY_MS, MAX_BET, MIN_BET,
};

#[derive(Parser)]
#[command(name = "slot_machine")]
#[command(about = "Terminal slot machine with a gold and energy economy")]
struct Cli {
    /// Play automatically without the terminal UI
    #[arg(long)]
    headless: bool,

    /// Number of spins to play in headless mode
    #[arg(long, default_value = "100")]
    spins: u32,

    /// Seed for reproducible reels
    #[arg(long)]
    seed: Option<u64>,

    /// Starting bet in headless mode (clamped to the allowed range)
    #[arg(long, default_value = "1")]
    bet: u32,

    /// Panel refresh rate for the terminal UI
    #[arg(long, default_value = "24")]
    fps: u32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,slot_machine=info"),
    )
    .init();

    let cli = Cli::parse();
    let mut machine = match cli.seed {
        Some(seed) => SlotMachine::new_with_seed(seed),
        None => SlotMachine::new(),
    };

    if cli.headless {
        run_headless(&mut machine, cli.spins, cli.bet);
        return Ok(());
    }

    run_with_ui(&mut machine, cli.fps)
}

/// Play the requested number of spins on the virtual clock
fn run_headless(machine: &mut SlotMachine, spins: u32, bet: u32) {
    println!("Running slot machine in headless mode...");
    println!("Spins: {}, Starting bet: {}", spins, bet);
    println!();

    let target_bet = bet.clamp(MIN_BET, MAX_BET);
    while machine.economy().bet() < target_bet {
        machine.handle(Command::IncreaseBet);
    }

    println!("Initial state:");
    machine.print_summary();
    println!();

    let mut played = 0;
    while played < spins {
        match machine.handle(Command::Spin) {
            CommandOutcome::Accepted => {
                machine.finish_spin();
                played += 1;
                println!("--- After spin {} ---", played);
                machine.print_summary();
                println!();
            }
            CommandOutcome::Rejected(_) => restock(machine),
            CommandOutcome::Quit => break,
        }
    }

    machine.handle(Command::Quit);

    println!("=== Final State ===");
    machine.print_summary();

    info!("=== SESSION COMPLETE ===");
    info!("Simulated time: {:.1}s", machine.now() as f64 / 1000.0);
    machine.stats().log_summary();
}

/// Recover from a refused spin by converting currencies or waiting for energy
fn restock(machine: &mut SlotMachine) {
    let economy = machine.economy();
    let (gold, energy, bet) = (economy.gold(), economy.energy(), economy.bet());

    if gold < bet && bet > 1 {
        machine.handle(Command::DecreaseBet);
    } else if gold < bet && energy > 1 {
        machine.handle(Command::BuyGold);
    } else if energy == 0 && gold >= ENERGY_PRICE_GOLD + bet {
        machine.handle(Command::BuyEnergy);
    } else if !machine.advance_to_next_event() {
        // Recovery only disarms at full energy, so this should not happen
        machine.advance(ENERGY_RECOVERY_MS);
    }
}

#[cfg(feature = "ui")]
fn run_with_ui(machine: &mut SlotMachine, fps: u32) -> Result<()> {
    slot_machine::ui::run(machine, fps)?;
    println!("👋 Exiting...");
    Ok(())
}

#[cfg(not(feature = "ui"))]
fn run_with_ui(_machine: &mut SlotMachine, _fps: u32) -> Result<()> {
    anyhow::bail!("UI feature is not enabled. Rebuild with --features ui or pass --headless")
}
