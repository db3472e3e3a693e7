//! Spin lifecycle: `Idle -> Spinning -> Settled(winner) -> Spinning -> ...`
//!
//! The winner is resolved the moment a spin starts, against a snapshot of
//! the option list. Edits made while the wheel turns never change it. The
//! settle timer is single-shot and cannot be cancelled by the user.

use crate::audio::{AudioPlayer, SoundId};
use crate::confetti::{ParticleEffect, Point};
use crate::config::MIN_OPTIONS_TO_SPIN;
use crate::store::{SpinDuration, WheelStore};
use crate::timer::SpinTimer;
use crate::wheel::next_rotation;
use crate::{AngleSource, SpinOutcome};
use log::{debug, info};

/// Identifies one spin so late or duplicate timer callbacks can be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpinTicket(u64);

impl SpinTicket {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning,
    Settled(String),
}

/// What the view needs to animate a spin that just started.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinStart {
    pub ticket: SpinTicket,
    pub angle: u32,
    /// Cumulative disc rotation to animate to, in degrees.
    pub rotation: u64,
    pub duration: SpinDuration,
    pub winner_index: usize,
}

#[derive(Debug)]
struct InFlight {
    ticket: SpinTicket,
    snapshot: Vec<String>,
    outcome: SpinOutcome,
}

pub struct SpinMachine<T, A> {
    phase: SpinPhase,
    timer: T,
    angles: A,
    in_flight: Option<InFlight>,
    rotation: u64,
    spins_started: u64,
}

impl<T: SpinTimer, A: AngleSource> SpinMachine<T, A> {
    pub fn new(timer: T, angles: A) -> Self {
        Self {
            phase: SpinPhase::Idle,
            timer,
            angles,
            in_flight: None,
            rotation: 0,
            spins_started: 0,
        }
    }

    pub fn phase(&self) -> &SpinPhase {
        &self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    /// Winner on display, if the last spin has settled.
    pub fn winner(&self) -> Option<&str> {
        match &self.phase {
            SpinPhase::Settled(winner) => Some(winner.as_str()),
            _ => None,
        }
    }

    /// Cumulative rotation of the disc, in degrees.
    pub fn rotation(&self) -> u64 {
        self.rotation
    }

    /// Diagnostics: spins started so far, which is also the last ticket id.
    pub fn spins_started(&self) -> u64 {
        self.spins_started
    }

    /// The list the wheel should draw: the frozen snapshot while spinning,
    /// otherwise the live list.
    pub fn wheel_options<'a>(&'a self, live: &'a [String]) -> &'a [String] {
        match &self.in_flight {
            Some(flight) => &flight.snapshot,
            None => live,
        }
    }

    /// Diagnostics: the angle source, e.g. to see how many scripted
    /// angles a headless session has left.
    pub fn angles(&self) -> &A {
        &self.angles
    }

    /// Diagnostics: the settle timer, e.g. a `ManualTimer`'s arm count.
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Used to bind a browser timer after mount and to drive a manual one.
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Start a spin over `options`.
    ///
    /// Returns `None` without touching anything when fewer than two options
    /// exist or a spin is already in flight.
    pub fn spin(
        &mut self,
        options: &[String],
        duration: SpinDuration,
        audio: &mut dyn AudioPlayer,
    ) -> Option<SpinStart> {
        if self.is_spinning() {
            debug!("Spin ignored: wheel is already spinning");
            return None;
        }
        if options.len() < MIN_OPTIONS_TO_SPIN {
            debug!("Spin ignored: {} options, need {}", options.len(), MIN_OPTIONS_TO_SPIN);
            return None;
        }

        let angle = self.angles.draw();
        let outcome = SpinOutcome::resolve(angle, options)?;
        self.spins_started += 1;
        let ticket = SpinTicket::new(self.spins_started);
        self.rotation = next_rotation(self.rotation, angle);

        let start = SpinStart {
            ticket,
            angle,
            rotation: self.rotation,
            duration,
            winner_index: outcome.index,
        };
        info!(
            "Spin {} started: angle {}, {} options, {}s",
            ticket.id(),
            angle,
            options.len(),
            duration
        );

        self.phase = SpinPhase::Spinning;
        self.in_flight = Some(InFlight {
            ticket,
            snapshot: options.to_vec(),
            outcome,
        });
        audio.play(SoundId::Spin);
        self.timer.arm(ticket, duration.as_duration());
        Some(start)
    }

    /// Finish the spin identified by `ticket`: record the winner, swap the
    /// spin sound for the win sound and launch the celebration.
    ///
    /// Tickets that do not belong to the spin in flight are ignored.
    pub fn settle(
        &mut self,
        ticket: SpinTicket,
        store: &mut WheelStore,
        audio: &mut dyn AudioPlayer,
        particles: &mut dyn ParticleEffect,
        origin: Point,
    ) -> Option<String> {
        let flight = match self.in_flight.take() {
            Some(flight) if flight.ticket == ticket => flight,
            other => {
                debug!("Ignoring settle for stale ticket {:?}", ticket);
                self.in_flight = other;
                return None;
            }
        };

        let winner = flight.outcome.winner;
        info!("Spin {} settled on {:?}", ticket.id(), winner);
        self.phase = SpinPhase::Settled(winner.clone());
        store.add_winner(winner.clone());
        audio.stop(SoundId::Spin);
        audio.play(SoundId::Win);
        particles.launch(origin);
        Some(winner)
    }

    /// Disarm the timer on teardown. The in-flight spin is abandoned.
    pub fn dispose(&mut self) {
        self.timer.cancel();
    }
}
