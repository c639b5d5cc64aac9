//! Test and helper doubles for stepctl_core.

use std::sync::{Arc, Mutex};

use crate::state::Observer;
use crate::validate::{Validation, ValidationError};

/// Observer double that records every callback. Clone the handle before
/// handing the observer to the stepper, then assert on `events()`.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<Validation>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boxed observer wired to this recorder.
    pub fn observer(&self) -> Observer {
        let events = self.events.clone();
        Box::new(move |outcome| {
            if let Ok(mut log) = events.lock() {
                log.push(outcome);
            }
        })
    }

    pub fn events(&self) -> Vec<Validation> {
        self.events.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Just the error kinds, in order.
    pub fn errors(&self) -> Vec<ValidationError> {
        self.events()
            .into_iter()
            .filter_map(|outcome| outcome.err())
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut log) = self.events.lock() {
            log.clear();
        }
    }
}
