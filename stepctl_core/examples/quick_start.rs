//! Quick Start Example
//!
//! Drives a stepper the way a UI shell would: a tap, a press-and-hold with
//! the real repeat ticker, and a direct text edit.

use std::time::Duration;

use stepctl_core::{Direction, PressSession, Stepper};
use stepctl_traits::MonotonicClock;

fn main() -> Result<(), eyre::Report> {
    let mut stepper = Stepper::builder()
        .with_limits(Some(0.0), Some(200.0))
        .with_step(10.0)
        .with_repeat_interval(Duration::from_millis(200))
        .with_observer(|outcome| {
            if let Err(error) = outcome {
                println!("validation: {error}");
            }
        })
        .build()?;

    stepper.tap(Direction::Up);
    println!("after tap:  {}", stepper.display_text());

    // Hold the plus button for three repeat ticks; the multiplier grows
    // each tick, so this moves further than three taps would.
    let mut session = PressSession::begin(&mut stepper, Direction::Up, MonotonicClock::new());
    for _ in 0..3 {
        if !session.pump_blocking(&mut stepper, Duration::from_millis(500)) {
            break;
        }
    }
    session.finish(&mut stepper);
    println!("after hold: {}", stepper.display_text());

    // Type a value directly; 125 is off the step lattice and snaps down.
    stepper.edit_begin();
    let len = stepper.display_text().len();
    stepper.edit_candidate(0..len, "125");
    stepper.edit_commit();
    println!("after edit: {}", stepper.display_text());

    Ok(())
}
