//! User-facing progress output
//!
//! The pipeline talks to the terminal only through [`Reporter`]; the `tui`
//! feature provides the cliclack implementation.

use std::sync::Mutex;

/// Receives progress from a scaffolding run
pub trait Reporter {
    fn info(&self, message: &str);

    fn warning(&self, message: &str);

    /// Start an indeterminate progress indicator
    fn spinner_start(&self, message: &str);

    /// Stop the indicator started last, marking it succeeded or failed
    fn spinner_stop(&self, success: bool, message: &str);
}

/// Kind of message a [`SilentReporter`] recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Info,
    Warning,
    SpinnerStart,
    SpinnerSucceeded,
    SpinnerFailed,
}

/// [`Reporter`] that prints nothing and remembers everything
#[derive(Debug, Default)]
pub struct SilentReporter {
    events: Mutex<Vec<(Event, String)>>,
}

impl SilentReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(Event, String)> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn record(&self, event: Event, message: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push((event, message.to_string()));
        }
    }
}

impl Reporter for SilentReporter {
    fn info(&self, message: &str) {
        self.record(Event::Info, message);
    }

    fn warning(&self, message: &str) {
        self.record(Event::Warning, message);
    }

    fn spinner_start(&self, message: &str) {
        self.record(Event::SpinnerStart, message);
    }

    fn spinner_stop(&self, success: bool, message: &str) {
        let event = if success {
            Event::SpinnerSucceeded
        } else {
            Event::SpinnerFailed
        };
        self.record(event, message);
    }
}
