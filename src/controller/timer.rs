use crossbeam_channel as cbc;
use log::debug;
use std::time::{Duration, Instant};

/**
 * One-shot timer that plugs into a `select!` loop.
 *
 * Idle timers hold a `never` receiver; `start` swaps in an `after` receiver
 * that fires once when the duration has passed. A started timer always runs
 * to completion.
 */
pub struct Timer {
    name: &'static str,
    duration: Duration,
    rx: cbc::Receiver<Instant>,
}

impl Timer {
    pub fn new(name: &'static str, duration: Duration) -> Timer {
        Timer {
            name,
            duration,
            rx: cbc::never(),
        }
    }

    pub fn start(&mut self) {
        debug!("{} timer started ({:?})", self.name, self.duration);
        self.rx = cbc::after(self.duration);
    }

    /// Marks the timer idle after its tick has been received.
    pub fn expire(&mut self) {
        self.rx = cbc::never();
    }

    pub fn receiver(&self) -> &cbc::Receiver<Instant> {
        &self.rx
    }
}
