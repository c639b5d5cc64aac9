//! Scripted event driver for the `run` subcommand.
//!
//! A script is a comma-separated op list driving one stepper through taps,
//! holds, edits, and reconfiguration, printing the display text after each
//! op and every validation event as it fires.

use std::time::Duration;

use eyre::{WrapErr, bail};
use stepctl_config::Config;
use stepctl_core::mocks::RecordingObserver;
use stepctl_core::{Direction, Stepper, ValidationError};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Tap(Direction),
    Hold(Direction, u32),
    Edit(String),
    SetStep(f64),
    SetLimits(Option<f64>, Option<f64>),
}

/// Stable snake_case name for structured output.
pub fn error_name(error: ValidationError) -> &'static str {
    match error {
        ValidationError::IncorrectSymbols => "incorrect_symbols",
        ValidationError::CrossedMax => "crossed_max",
        ValidationError::CrossedMin => "crossed_min",
        ValidationError::NonMultiple => "non_multiple",
    }
}

pub fn parse_script(script: &str) -> eyre::Result<Vec<Op>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|op| !op.is_empty())
        .map(parse_op)
        .collect()
}

fn parse_op(op: &str) -> eyre::Result<Op> {
    match op {
        "+" => return Ok(Op::Tap(Direction::Up)),
        "-" => return Ok(Op::Tap(Direction::Down)),
        _ => {}
    }
    if let Some(ticks) = op.strip_prefix("hold+:") {
        let ticks = ticks
            .parse()
            .wrap_err_with(|| format!("bad tick count in {op:?}"))?;
        return Ok(Op::Hold(Direction::Up, ticks));
    }
    if let Some(ticks) = op.strip_prefix("hold-:") {
        let ticks = ticks
            .parse()
            .wrap_err_with(|| format!("bad tick count in {op:?}"))?;
        return Ok(Op::Hold(Direction::Down, ticks));
    }
    if let Some(text) = op.strip_prefix("edit:") {
        return Ok(Op::Edit(text.to_string()));
    }
    if let Some(step) = op.strip_prefix("step:") {
        let step = step
            .parse()
            .wrap_err_with(|| format!("bad step in {op:?}"))?;
        return Ok(Op::SetStep(step));
    }
    if let Some(range) = op.strip_prefix("limits:") {
        let Some((lo, hi)) = range.split_once("..") else {
            bail!("limits op must look like limits:LO..HI, got {op:?}");
        };
        let parse_side = |side: &str, which: &str| -> eyre::Result<Option<f64>> {
            if side.is_empty() {
                return Ok(None);
            }
            side.parse()
                .map(Some)
                .wrap_err_with(|| format!("bad {which} limit in {op:?}"))
        };
        return Ok(Op::SetLimits(
            parse_side(lo, "lower")?,
            parse_side(hi, "upper")?,
        ));
    }
    bail!("unknown op {op:?}")
}

fn op_label(op: &Op) -> String {
    match op {
        Op::Tap(Direction::Up) => "+".to_string(),
        Op::Tap(Direction::Down) => "-".to_string(),
        Op::Hold(Direction::Up, n) => format!("hold+:{n}"),
        Op::Hold(Direction::Down, n) => format!("hold-:{n}"),
        Op::Edit(text) => format!("edit:{text}"),
        Op::SetStep(step) => format!("step:{step}"),
        Op::SetLimits(lo, hi) => format!(
            "limits:{}..{}",
            lo.map(|v| v.to_string()).unwrap_or_default(),
            hi.map(|v| v.to_string()).unwrap_or_default()
        ),
    }
}

fn apply_op(stepper: &mut Stepper, op: &Op) -> eyre::Result<()> {
    match op {
        Op::Tap(direction) => stepper.tap(*direction),
        Op::Hold(direction, ticks) => {
            stepper.press_begin(*direction);
            for _ in 0..*ticks {
                // A hard-limit snap aborts the press; remaining ticks are
                // dropped exactly as a cancelled timer would drop them.
                if !stepper.press_active() {
                    break;
                }
                stepper.press_tick(*direction);
            }
            stepper.press_end();
        }
        Op::Edit(text) => {
            stepper.edit_begin();
            let len = stepper.display_text().len();
            stepper.edit_candidate(0..len, "");
            for ch in text.chars() {
                let end = stepper.display_text().len();
                stepper.edit_candidate(end..end, ch.encode_utf8(&mut [0u8; 4]));
            }
            stepper.edit_commit();
        }
        Op::SetStep(step) => stepper.set_step(*step)?,
        Op::SetLimits(min, max) => stepper.set_limits(*min, *max)?,
    }
    Ok(())
}

pub fn run_script(cfg: &Config, script: &str, json: bool) -> eyre::Result<()> {
    let ops = parse_script(script)?;
    let recorder = RecordingObserver::new();

    let mut builder = Stepper::builder()
        .with_limits(cfg.limits.min, cfg.limits.max)
        .with_step(cfg.stepping.step)
        .with_min_fraction_digits(cfg.display.min_fraction_digits)
        .with_repeat_interval(Duration::from_millis(cfg.stepping.repeat_interval_ms))
        .with_observer(recorder.observer());
    if let Some(initial) = cfg.stepping.initial {
        builder = builder.with_initial(initial);
    }
    let mut stepper = builder.build()?;
    tracing::info!(value = stepper.value(), ops = ops.len(), "script starting");

    for op in &ops {
        apply_op(&mut stepper, op)?;
        report(&stepper, &recorder, op, json);
        recorder.clear();
    }

    if json {
        println!(
            "{}",
            serde_json::json!({
                "final": stepper.display_text(),
                "value": stepper.value(),
                "can_step_up": stepper.can_step_up(),
                "can_step_down": stepper.can_step_down(),
            })
        );
    } else {
        println!("final -> {}", stepper.display_text());
    }
    Ok(())
}

fn report(stepper: &Stepper, recorder: &RecordingObserver, op: &Op, json: bool) {
    if json {
        let events: Vec<_> = recorder
            .errors()
            .into_iter()
            .map(|error| {
                serde_json::json!({
                    "event": error_name(error),
                    "message": stepper.error_message(error),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::json!({
                "op": op_label(op),
                "display": stepper.display_text(),
                "value": stepper.value(),
                "events": events,
            })
        );
    } else {
        for error in recorder.errors() {
            println!("event: {}", stepper.error_message(error));
        }
        println!("{:<12} -> {}", op_label(op), stepper.display_text());
    }
}
