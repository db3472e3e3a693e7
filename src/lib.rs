use log::debug;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use wasm_bindgen::prelude::*;

pub mod audio;
pub mod config;
pub mod confetti;
pub mod session;
pub mod spin;
pub mod store;
pub mod timer;
pub mod utils;
pub mod wheel;

pub use crate::audio::{AudioEvent, AudioPlayer, AudioService, RecordingAudio, SoundId};
pub use crate::confetti::{CanvasConfetti, NoParticles, ParticleEffect, Point};
pub use crate::session::{BrowserSession, WheelSession};
pub use crate::spin::{SpinMachine, SpinPhase, SpinStart, SpinTicket};
pub use crate::store::{BulkImport, SpinDuration, WheelStore};
pub use crate::timer::{GlooTimer, ManualTimer, SpinTimer};

use config::{BASE_ROTATION_DEG, EXTRA_ROTATION_DEG, FULL_TURN_DEG};

// Errors surfaced to the user next to the input that caused them
#[derive(Debug, Clone, PartialEq)]
pub enum WheelError {
    EmptyOption,
    DuplicateOption(String),
    DurationOutOfRange(f64),
    InvalidDuration(String),
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for WheelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WheelError::EmptyOption => write!(f, "Please enter an option"),
            WheelError::DuplicateOption(_) => write!(f, "This option already exists"),
            WheelError::DurationOutOfRange(secs) => write!(
                f,
                "Spin duration {}s is outside {}s to {}s",
                secs,
                config::MIN_SPIN_SECS,
                config::MAX_SPIN_SECS
            ),
            WheelError::InvalidDuration(input) => write!(
                f,
                "Invalid duration \"{}\". Use: 4.5, 4.5s or 4500ms",
                input
            ),
            WheelError::IndexOutOfRange { index, len } => write!(
                f,
                "Index {} is out of range for a list of {} entries",
                index, len
            ),
        }
    }
}

impl std::error::Error for WheelError {}

/// Source of spin angles, in whole degrees.
pub trait AngleSource {
    fn draw(&mut self) -> u32;
}

/// Draws `1080 + [0, 720) + [0, 360)`: at least three full turns, up to two
/// extra turns, and a uniformly distributed landing offset.
pub struct RandomAngles<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomAngles<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomAngles<ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl RandomAngles<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> AngleSource for RandomAngles<R> {
    fn draw(&mut self) -> u32 {
        BASE_ROTATION_DEG
            + self.rng.random_range(0..EXTRA_ROTATION_DEG)
            + self.rng.random_range(0..FULL_TURN_DEG)
    }
}

/// Replays a fixed sequence of angles. Once exhausted it keeps returning
/// the minimum spin of three full turns.
#[derive(Debug, Default, Clone)]
pub struct ScriptedAngles {
    queue: VecDeque<u32>,
}

impl ScriptedAngles {
    pub fn new(angles: impl IntoIterator<Item = u32>) -> Self {
        Self {
            queue: angles.into_iter().collect(),
        }
    }

    pub fn push(&mut self, angle: u32) {
        self.queue.push_back(angle);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl AngleSource for ScriptedAngles {
    fn draw(&mut self) -> u32 {
        self.queue.pop_front().unwrap_or(BASE_ROTATION_DEG)
    }
}

/// Index of the winning option for a wheel of `len` equal sectors that
/// came to rest after rotating `angle` degrees clockwise.
///
/// Sectors are laid out clockwise in list order from the pointer, so the
/// raw sector count is mirrored: `len - 1 - floor((angle % 360) / slice)`.
///
/// Returns `None` for an empty wheel.
pub fn resolve_winner_index(angle: u32, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let normalized = f64::from(angle % FULL_TURN_DEG);
    let slice = f64::from(FULL_TURN_DEG) / len as f64;
    // Clamp absorbs float error when `normalized` sits just under 360.
    let sector = ((normalized / slice).floor() as usize).min(len - 1);
    let index = len - 1 - sector;
    debug!(
        "Resolved angle {} (normalized {}, slice {:.3}) to sector {} -> option {}",
        angle, normalized, slice, sector, index
    );
    Some(index)
}

/// The winning option itself, see [`resolve_winner_index`].
pub fn resolve_winner<S: AsRef<str>>(angle: u32, options: &[S]) -> Option<&str> {
    resolve_winner_index(angle, options.len()).map(|i| options[i].as_ref())
}

/// Result of one completed resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpinOutcome {
    pub angle: u32,
    pub index: usize,
    pub winner: String,
}

impl SpinOutcome {
    pub fn resolve<S: AsRef<str>>(angle: u32, options: &[S]) -> Option<Self> {
        let index = resolve_winner_index(angle, options.len())?;
        Some(Self {
            angle,
            index,
            winner: options[index].as_ref().to_string(),
        })
    }
}

/// Page-script entry point for resolving a winner without the Yew UI.
///
/// # Arguments
/// * `angle` - Total clockwise rotation in degrees
/// * `options_js` - Array of option strings in wheel order
///
/// # Returns
/// A serialized [`SpinOutcome`], `null` for an empty list, or an error string
#[wasm_bindgen]
pub fn resolve_winner_js(angle: u32, options_js: JsValue) -> JsValue {
    let options: Vec<String> = match serde_wasm_bindgen::from_value(options_js) {
        Ok(o) => o,
        Err(e) => {
            return serde_wasm_bindgen::to_value(&format!("Failed to deserialize options: {}", e))
                .unwrap_or(JsValue::NULL);
        }
    };

    match SpinOutcome::resolve(angle, &options) {
        Some(outcome) => serde_wasm_bindgen::to_value(&outcome).unwrap_or(JsValue::NULL),
        None => JsValue::NULL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn abcd() -> Vec<String> {
        ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn four_options_map_quarter_turns_in_reverse() {
        let options = abcd();
        assert_eq!(resolve_winner(0, &options), Some("D"));
        assert_eq!(resolve_winner(89, &options), Some("D"));
        assert_eq!(resolve_winner(90, &options), Some("C"));
        assert_eq!(resolve_winner(180, &options), Some("B"));
        assert_eq!(resolve_winner(269, &options), Some("B"));
        assert_eq!(resolve_winner(270, &options), Some("A"));
        assert_eq!(resolve_winner(359, &options), Some("A"));
    }

    #[test]
    fn full_turns_are_ignored() {
        let options = abcd();
        assert_eq!(resolve_winner(1080 + 95, &options), Some("C"));
        assert_eq!(resolve_winner(1800 + 359, &options), Some("A"));
    }

    #[test]
    fn empty_wheel_has_no_winner() {
        let options: Vec<String> = Vec::new();
        assert_eq!(resolve_winner_index(123, 0), None);
        assert_eq!(resolve_winner(123, &options), None);
        assert_eq!(SpinOutcome::resolve(123, &options), None);
    }

    #[test]
    fn single_option_always_wins() {
        for angle in [0, 1, 179, 359, 2158] {
            assert_eq!(resolve_winner(angle, &["Only"]), Some("Only"));
        }
    }

    #[test]
    fn uneven_slices_stay_in_range() {
        // 360 / 7 is not a whole number of degrees
        for angle in 0..360 {
            let idx = resolve_winner_index(angle, 7).unwrap();
            assert!(idx < 7, "angle {} gave {}", angle, idx);
        }
        assert_eq!(resolve_winner_index(359, 7), Some(0));
        assert_eq!(resolve_winner_index(0, 7), Some(6));
    }

    #[test]
    fn outcome_carries_angle_index_and_name() {
        let outcome = SpinOutcome::resolve(1170, &abcd()).unwrap();
        assert_eq!(
            outcome,
            SpinOutcome {
                angle: 1170,
                index: 2,
                winner: "C".to_string()
            }
        );
    }

    #[test]
    fn random_angles_stay_within_bounds() {
        let mut angles = RandomAngles::seeded(7);
        for _ in 0..5_000 {
            let a = angles.draw();
            assert!((1080..1080 + 720 + 360).contains(&a), "angle {}", a);
        }
    }

    #[test]
    fn seeded_angles_repeat() {
        let mut a = RandomAngles::seeded(42);
        let mut b = RandomAngles::seeded(42);
        let first: Vec<u32> = (0..10).map(|_| a.draw()).collect();
        let second: Vec<u32> = (0..10).map(|_| b.draw()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn scripted_angles_fall_back_to_minimum_spin() {
        let mut angles = ScriptedAngles::new([1200, 1500]);
        assert_eq!(angles.draw(), 1200);
        assert_eq!(angles.draw(), 1500);
        assert_eq!(angles.draw(), 1080);
    }

    #[test]
    fn error_messages_read_naturally() {
        assert_eq!(WheelError::EmptyOption.to_string(), "Please enter an option");
        assert_eq!(
            WheelError::DuplicateOption("Pizza".into()).to_string(),
            "This option already exists"
        );
        assert!(WheelError::DurationOutOfRange(9.0).to_string().contains("9s"));
    }

    proptest! {
        #[test]
        fn winner_is_always_an_option(angle in any::<u32>(), len in 1usize..64) {
            let options: Vec<String> = (0..len).map(|i| format!("opt-{}", i)).collect();
            let winner = resolve_winner(angle, &options).unwrap();
            prop_assert!(options.iter().any(|o| o == winner));
        }

        #[test]
        fn whole_turns_do_not_change_the_winner(angle in 0u32..360, turns in 0u32..1000, len in 1usize..64) {
            prop_assert_eq!(
                resolve_winner_index(angle, len),
                resolve_winner_index(angle + turns * 360, len)
            );
        }

        #[test]
        fn matches_closed_form(angle in any::<u32>(), len in 1usize..64) {
            let slice = 360.0 / len as f64;
            let sector = (f64::from(angle % 360) / slice).floor() as usize;
            prop_assert_eq!(resolve_winner_index(angle, len), Some(len - 1 - sector.min(len - 1)));
        }
    }
}
