//! Terminal front end
//!
//! This module is purely glue - all game logic is in the `machine` module.
//! Each frame feeds real elapsed time into the machine, redraws the panel
//! from a snapshot and waits for a key until the next frame is due.

mod input;
mod panel;

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, MoveToNextLine, Show};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use log::debug;

use crate::machine::{CommandOutcome, SlotMachine};

pub use input::command_for_key;
pub use panel::render;

/// Play interactively until the player quits
pub fn run(machine: &mut SlotMachine, fps: u32) -> Result<()> {
    terminal::enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
        let _ = terminal::disable_raw_mode();
        return Err(err).context("Failed to enter alternate screen");
    }

    let result = run_loop(machine, fps, &mut stdout);

    // Restore the terminal even if the loop failed
    let restored = restore_terminal(&mut stdout);
    result.and(restored)
}

fn restore_terminal(stdout: &mut Stdout) -> Result<()> {
    execute!(stdout, Show, LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    terminal::disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

fn run_loop(machine: &mut SlotMachine, fps: u32, stdout: &mut Stdout) -> Result<()> {
    let frame = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
    let mut last = Instant::now();
    // Sub-millisecond remainder carried between frames
    let mut carry = Duration::ZERO;

    loop {
        let now = Instant::now();
        let elapsed = carry + (now - last);
        last = now;
        let millis = elapsed.as_millis() as u64;
        carry = elapsed - Duration::from_millis(millis);
        machine.advance(millis);

        draw(machine, stdout)?;

        if !event::poll(frame).context("Failed to poll terminal events")? {
            continue;
        }
        if let Event::Key(key) = event::read().context("Failed to read terminal event")? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(command) = command_for_key(key) {
                let outcome = machine.handle(command);
                debug!("{:?} -> {:?}", command, outcome);
                if outcome == CommandOutcome::Quit {
                    return Ok(());
                }
            }
        }
    }
}

fn draw(machine: &SlotMachine, stdout: &mut Stdout) -> Result<()> {
    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
    for line in render(&machine.snapshot()) {
        queue!(stdout, Print(line), MoveToNextLine(1))?;
    }
    stdout.flush().context("Failed to flush terminal")?;
    Ok(())
}
