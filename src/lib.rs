//! Slot Machine Library
//!
//! A terminal slot machine with a gold and energy economy. The engine runs
//! on its own virtual clock and can be played headless or through the
//! terminal UI.

pub mod machine;

#[cfg(feature = "ui")]
pub mod ui;
