//! Walks every facility of the card once, against the mock backend.
//!
//! Run with `cargo run --example exercise`. On a Raspberry Pi, swap
//! `mock_parts()` for `hal::rpi::open(&CardConfig::default())?` (requires
//! the `rpi` feature) to drive the real card.

use anyhow::Result;
use machine_card::hal::mock_parts;
use machine_card::{Direction, MachineCard, Switch};

fn main() -> Result<()> {
    let mut card = MachineCard::new(mock_parts());

    // Mains power.
    card.power().set(1, Switch::On)?;
    println!("power 1: {}", card.power().get(1)?.as_str());

    // A unidirectional motor.
    card.motor().set(2, Switch::On)?;
    card.motor().set(2, Switch::Off)?;

    // A two-way motor: up at 80%, reverse (stop-and-settle happens
    // inside), then brake and release.
    card.two_way_motor().set_speed(4, 0.8)?;
    card.two_way_motor().set(4, Direction::UP)?;
    card.two_way_motor().set(4, Direction::DOWN)?;
    println!(
        "motor 4: {} at {:.0}%",
        card.two_way_motor().direction(4)?.as_str(),
        card.two_way_motor().speed(4)? * 100.0
    );
    card.two_way_motor().set(4, Direction::Brake)?;
    card.two_way_motor().set(4, Direction::Off)?;

    // Generic I/O: line 3 as an output, line 16 (chip B) as an input.
    card.io().set(3, Switch::On)?;
    println!("io 16: {}", card.io().get(16)?);

    // Temperature; the mock probe has no sensor attached.
    match card.temperature() {
        Some(celsius) => println!("card temperature: {celsius:.1}°C"),
        None => println!("no temperature sensor"),
    }

    card.power().set(1, Switch::Off)?;
    Ok(())
}
