//! Repeat-press timing.
//!
//! `RepeatTicker` is the scoped timer behind press-and-hold: one background
//! thread delivers ticks over a bounded channel at a fixed interval.
//! Dropping the ticker signals shutdown and joins the thread, so a press
//! gesture can never leak a running timer regardless of how it ends.

use crossbeam_channel as xch;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use stepctl_traits::clock::Clock;

use crate::state::{Direction, Stepper};

pub struct RepeatTicker {
    rx: xch::Receiver<()>,
    /// Shutdown flag for immediate response (atomic for lock-free check)
    shutdown: Arc<AtomicBool>,
    /// Join handle for graceful thread cleanup
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl RepeatTicker {
    /// Spawn the ticker thread. The first tick arrives one full `interval`
    /// after spawn; the immediate step on press-begin is the caller's job.
    pub fn spawn<C: Clock + Send + Sync + 'static>(interval: Duration, clock: C) -> Self {
        let (tx, rx) = xch::bounded(1);
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_flag = shutdown.clone();

        let join_handle = std::thread::spawn(move || {
            loop {
                if shutdown_flag.load(Ordering::Relaxed) {
                    break;
                }
                clock.sleep(interval);
                // Check again after the sleep so cancellation never waits a
                // full extra interval to take effect.
                if shutdown_flag.load(Ordering::Relaxed) {
                    break;
                }
                match tx.try_send(()) {
                    // A full channel means the consumer has not drained the
                    // previous tick; skipping keeps a stalled shell from
                    // receiving a burst of queued steps when it resumes.
                    Ok(()) | Err(xch::TrySendError::Full(())) => {}
                    Err(xch::TrySendError::Disconnected(())) => break,
                }
            }
            tracing::trace!("repeat ticker thread exiting");
        });

        Self {
            rx,
            shutdown,
            join_handle: Some(join_handle),
        }
    }

    /// Number of ticks delivered since the last poll (at most one pending).
    pub fn poll(&self) -> usize {
        self.rx.try_iter().count()
    }

    /// Block until the next tick or `timeout`; true when a tick arrived.
    pub fn wait(&self, timeout: Duration) -> bool {
        self.rx.recv_timeout(timeout).is_ok()
    }
}

impl Drop for RepeatTicker {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.join_handle.take() {
            if let Err(e) = handle.join() {
                tracing::warn!(?e, "repeat ticker thread panicked during shutdown");
            }
        }
    }
}

/// Owns the repeat ticker for one press gesture.
///
/// `begin` performs the immediate first step and starts the timer; `pump`
/// feeds pending ticks into the state machine, stopping as soon as a
/// hard-limit snap aborts the press; `finish` (or drop) cancels the timer.
/// Creating a new session for the same stepper implicitly ends the previous
/// press, so duplicate tickers cannot stack.
pub struct PressSession {
    direction: Direction,
    ticker: RepeatTicker,
}

impl PressSession {
    pub fn begin<C: Clock + Send + Sync + 'static>(
        stepper: &mut Stepper,
        direction: Direction,
        clock: C,
    ) -> Self {
        let interval = stepper.repeat_interval();
        stepper.press_begin(direction);
        Self {
            direction,
            ticker: RepeatTicker::spawn(interval, clock),
        }
    }

    /// Drain pending ticks into the state machine. Returns how many steps
    /// were applied.
    pub fn pump(&mut self, stepper: &mut Stepper) -> usize {
        let mut applied = 0;
        for _ in 0..self.ticker.poll() {
            if !stepper.press_active() {
                break;
            }
            stepper.press_tick(self.direction);
            applied += 1;
        }
        applied
    }

    /// Block up to `timeout` for one tick and apply it. Returns whether a
    /// step was applied.
    pub fn pump_blocking(&mut self, stepper: &mut Stepper, timeout: Duration) -> bool {
        if !stepper.press_active() {
            return false;
        }
        if self.ticker.wait(timeout) {
            stepper.press_tick(self.direction);
            true
        } else {
            false
        }
    }

    /// End the gesture: resets acceleration and cancels the timer.
    pub fn finish(self, stepper: &mut Stepper) {
        stepper.press_end();
        // ticker joins on drop
    }
}
