//! A wheel session: the store, the spin machine and the collaborators the
//! machine drives (audio, particles), owned together so a UI only has to
//! forward user actions and timer expiries.

use crate::audio::{AudioPlayer, AudioService};
use crate::confetti::{CanvasConfetti, ParticleEffect, Point};
use crate::spin::{SpinMachine, SpinPhase, SpinStart, SpinTicket};
use crate::store::{BulkImport, SpinDuration, WheelStore};
use crate::timer::{GlooTimer, ManualTimer, SpinTimer};
use crate::{AngleSource, RandomAngles, WheelError};
use rand::rngs::ThreadRng;
use std::time::Duration;

/// The session the browser app runs.
pub type BrowserSession = WheelSession<GlooTimer, RandomAngles<ThreadRng>, AudioService, CanvasConfetti>;

pub struct WheelSession<T, A, Au, P> {
    store: WheelStore,
    machine: SpinMachine<T, A>,
    audio: Au,
    particles: P,
}

impl BrowserSession {
    pub fn browser() -> Self {
        Self::new(
            GlooTimer::new(),
            RandomAngles::thread(),
            AudioService::new(),
            CanvasConfetti::new(),
        )
    }
}

impl<T, A, Au, P> WheelSession<T, A, Au, P>
where
    T: SpinTimer,
    A: AngleSource,
    Au: AudioPlayer,
    P: ParticleEffect,
{
    pub fn new(timer: T, angles: A, audio: Au, particles: P) -> Self {
        Self {
            store: WheelStore::new(),
            machine: SpinMachine::new(timer, angles),
            audio,
            particles,
        }
    }

    pub fn init(&mut self) {
        self.audio.init();
    }

    pub fn dispose(&mut self) {
        self.machine.dispose();
        self.audio.dispose();
        self.particles.dispose();
    }

    pub fn store(&self) -> &WheelStore {
        &self.store
    }

    pub fn machine(&self) -> &SpinMachine<T, A> {
        &self.machine
    }

    pub fn timer_mut(&mut self) -> &mut T {
        self.machine.timer_mut()
    }

    pub fn audio(&self) -> &Au {
        &self.audio
    }

    pub fn phase(&self) -> &SpinPhase {
        self.machine.phase()
    }

    pub fn options(&self) -> &[String] {
        self.store.options()
    }

    /// Options as the wheel should draw them right now.
    pub fn wheel_options(&self) -> &[String] {
        self.machine.wheel_options(self.store.options())
    }

    pub fn winners(&self) -> &[String] {
        self.store.winners()
    }

    pub fn spin_duration(&self) -> SpinDuration {
        self.store.spin_duration()
    }

    /// Whether the spin control should be enabled.
    pub fn can_spin(&self) -> bool {
        self.store.can_spin() && !self.machine.is_spinning()
    }

    pub fn add_option(&mut self, input: &str) -> Result<String, WheelError> {
        self.store.add_option(input)
    }

    pub fn add_options_from_text(&mut self, text: &str) -> BulkImport {
        self.store.add_options_from_text(text)
    }

    pub fn remove_option(&mut self, index: usize) -> Result<String, WheelError> {
        self.store.remove_option(index)
    }

    pub fn clear_options(&mut self) -> usize {
        self.store.clear_options()
    }

    pub fn remove_winner(&mut self, index: usize) -> Result<String, WheelError> {
        self.store.remove_winner(index)
    }

    pub fn clear_history(&mut self) -> usize {
        self.store.clear_history()
    }

    pub fn set_spin_duration(&mut self, secs: f64) -> Result<SpinDuration, WheelError> {
        self.store.set_spin_duration(secs)
    }

    pub fn spin(&mut self) -> Option<SpinStart> {
        let duration = self.store.spin_duration();
        self.machine
            .spin(self.store.options(), duration, &mut self.audio)
    }

    pub fn settle(&mut self, ticket: SpinTicket, origin: Point) -> Option<String> {
        self.machine.settle(
            ticket,
            &mut self.store,
            &mut self.audio,
            &mut self.particles,
            origin,
        )
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.audio.toggle_mute()
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }
}

impl<A, Au, P> WheelSession<ManualTimer, A, Au, P>
where
    A: AngleSource,
    Au: AudioPlayer,
    P: ParticleEffect,
{
    /// Move simulated time forward, settling the spin if it is due.
    pub fn advance(&mut self, by: Duration) -> Option<String> {
        let ticket = self.machine.timer_mut().advance(by)?;
        self.settle(ticket, Point::default())
    }
}
