//! Sound effects.
//!
//! [`AudioService`] owns the preloaded `<audio>` handles and the mute flag.
//! It is created once by the app, initialised on mount, disposed on unmount
//! and handed to whatever needs to make noise. Playback problems (missing
//! file, autoplay policy) are logged and otherwise ignored.

use crate::config::{SPIN_SOUND_SRC, WIN_SOUND_SRC};
use log::{info, warn};
use std::collections::HashMap;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Spin,
    Win,
}

impl SoundId {
    pub const ALL: [SoundId; 2] = [SoundId::Spin, SoundId::Win];

    pub fn name(self) -> &'static str {
        match self {
            SoundId::Spin => "spin",
            SoundId::Win => "win",
        }
    }

    pub fn src(self) -> &'static str {
        match self {
            SoundId::Spin => SPIN_SOUND_SRC,
            SoundId::Win => WIN_SOUND_SRC,
        }
    }
}

pub trait AudioPlayer {
    /// Acquire resources. Called once when the owner mounts.
    fn init(&mut self) {}
    /// Release resources. Called once when the owner unmounts.
    fn dispose(&mut self) {}

    fn play(&mut self, sound: SoundId);
    fn stop(&mut self, sound: SoundId);
    /// Set the mute flag and return the new value.
    fn set_muted(&mut self, muted: bool) -> bool;
    fn is_muted(&self) -> bool;

    fn toggle_mute(&mut self) -> bool {
        let muted = !self.is_muted();
        self.set_muted(muted)
    }
}

/// Browser audio backed by preloaded `HtmlAudioElement`s.
#[derive(Default)]
pub struct AudioService {
    elements: HashMap<SoundId, HtmlAudioElement>,
    muted: bool,
}

impl AudioService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioPlayer for AudioService {
    /// Preload every sound. Safe to call again; existing handles are replaced.
    fn init(&mut self) {
        for sound in SoundId::ALL {
            match HtmlAudioElement::new_with_src(sound.src()) {
                Ok(element) => {
                    element.set_preload("auto");
                    self.elements.insert(sound, element);
                }
                Err(err) => warn!("Could not preload sound {}: {:?}", sound.name(), err),
            }
        }
        info!("Audio initialised with {} sounds", self.elements.len());
    }

    /// Stop everything and release the handles.
    fn dispose(&mut self) {
        for sound in SoundId::ALL {
            self.stop(sound);
        }
        self.elements.clear();
        info!("Audio disposed");
    }

    fn play(&mut self, sound: SoundId) {
        if self.muted {
            return;
        }
        let Some(element) = self.elements.get(&sound) else {
            warn!("Sound {} is not loaded", sound.name());
            return;
        };
        element.set_current_time(0.0);
        match element.play() {
            Ok(promise) => {
                let name = sound.name();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = JsFuture::from(promise).await {
                        warn!("Error playing sound {}: {:?}", name, err);
                    }
                });
            }
            Err(err) => warn!("Error playing sound {}: {:?}", sound.name(), err),
        }
    }

    fn stop(&mut self, sound: SoundId) {
        if let Some(element) = self.elements.get(&sound) {
            if let Err(err) = element.pause() {
                warn!("Error stopping sound {}: {:?}", sound.name(), err);
            }
            element.set_current_time(0.0);
        }
    }

    fn set_muted(&mut self, muted: bool) -> bool {
        self.muted = muted;
        self.muted
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    Played(SoundId),
    Stopped(SoundId),
}

/// Headless player that records what it was asked to do.
///
/// Muted plays are dropped, matching [`AudioService`].
#[derive(Debug, Default)]
pub struct RecordingAudio {
    events: Vec<AudioEvent>,
    muted: bool,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[AudioEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<AudioEvent> {
        std::mem::take(&mut self.events)
    }
}

impl AudioPlayer for RecordingAudio {
    fn play(&mut self, sound: SoundId) {
        if !self.muted {
            self.events.push(AudioEvent::Played(sound));
        }
    }

    fn stop(&mut self, sound: SoundId) {
        self.events.push(AudioEvent::Stopped(sound));
    }

    fn set_muted(&mut self, muted: bool) -> bool {
        self.muted = muted;
        self.muted
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}
