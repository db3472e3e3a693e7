//! Single-shot settle timers.
//!
//! The spin machine arms exactly one timer per spin and is told about the
//! expiry through its ticket. In the browser the expiry comes from a
//! `gloo_timers` timeout; headless callers drive a [`ManualTimer`].

use crate::spin::SpinTicket;
use gloo_timers::callback::Timeout;
use log::{debug, warn};
use std::time::Duration;
use yew::Callback;

pub trait SpinTimer {
    /// Arm the timer to report `ticket` after `delay`. Replaces any armed ticket.
    fn arm(&mut self, ticket: SpinTicket, delay: Duration);

    /// Disarm without firing. Only used when the owner is torn down.
    fn cancel(&mut self);
}

/// Simulated clock for tests and headless sessions.
#[derive(Debug, Default)]
pub struct ManualTimer {
    now: Duration,
    armed: Option<(SpinTicket, Duration)>,
    armed_count: usize,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Total number of times the timer has been armed.
    pub fn armed_count(&self) -> usize {
        self.armed_count
    }

    pub fn pending(&self) -> Option<SpinTicket> {
        self.armed.map(|(ticket, _)| ticket)
    }

    /// Move the clock forward, returning the ticket if its deadline passed.
    pub fn advance(&mut self, by: Duration) -> Option<SpinTicket> {
        self.now += by;
        match self.armed {
            Some((ticket, deadline)) if self.now >= deadline => {
                self.armed = None;
                Some(ticket)
            }
            _ => None,
        }
    }
}

impl SpinTimer for ManualTimer {
    fn arm(&mut self, ticket: SpinTicket, delay: Duration) {
        self.armed = Some((ticket, self.now + delay));
        self.armed_count += 1;
    }

    fn cancel(&mut self) {
        self.armed = None;
    }
}

/// Browser timer; reports expiry through a Yew callback bound after mount.
#[derive(Default)]
pub struct GlooTimer {
    on_fire: Option<Callback<SpinTicket>>,
    pending: Option<Timeout>,
}

impl GlooTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, on_fire: Callback<SpinTicket>) {
        self.on_fire = Some(on_fire);
    }

    pub fn is_bound(&self) -> bool {
        self.on_fire.is_some()
    }
}

impl SpinTimer for GlooTimer {
    fn arm(&mut self, ticket: SpinTicket, delay: Duration) {
        let Some(on_fire) = self.on_fire.clone() else {
            warn!("Settle timer armed before it was bound; spin {:?} will not settle", ticket);
            return;
        };
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        debug!("Arming settle timer for {:?} in {} ms", ticket, millis);
        // Replacing the handle drops (and so cancels) any earlier timeout
        self.pending = Some(Timeout::new(millis, move || on_fire.emit(ticket)));
    }

    fn cancel(&mut self) {
        // Dropping a gloo Timeout clears it
        self.pending = None;
    }
}
