//! In-memory application state: the option list, the winners history and
//! the spin duration.
//!
//! Nothing here is persisted. Mutations return the affected value so the UI
//! can announce it, and validation failures come back as [`WheelError`].

use crate::config::{
    DEFAULT_SPIN_SECS, MAX_SPIN_SECS, MIN_OPTIONS_TO_SPIN, MIN_SPIN_SECS, SPIN_STEP_SECS,
};
use crate::utils::{snap_to_step, speed_label, split_option_list, validate_new_option};
use crate::WheelError;
use log::{debug, info};
use std::time::Duration;

/// Spin length in seconds, always inside `[2.0, 8.0]` on a 0.5 s grid.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SpinDuration(f64);

impl SpinDuration {
    /// Validate `secs` and snap it to the nearest half second.
    pub fn try_from_secs(secs: f64) -> Result<Self, WheelError> {
        if !secs.is_finite() || !(MIN_SPIN_SECS..=MAX_SPIN_SECS).contains(&secs) {
            return Err(WheelError::DurationOutOfRange(secs));
        }
        Ok(Self(snap_to_step(secs, SPIN_STEP_SECS)))
    }

    /// Saturate `secs` into range, then snap.
    pub fn clamped(secs: f64) -> Self {
        let secs = if secs.is_nan() { DEFAULT_SPIN_SECS } else { secs };
        Self(snap_to_step(secs.clamp(MIN_SPIN_SECS, MAX_SPIN_SECS), SPIN_STEP_SECS))
    }

    pub fn secs(self) -> f64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.0)
    }

    /// Milliseconds for browser timers and CSS transitions.
    pub fn as_millis(self) -> u32 {
        (self.0 * 1000.0).round() as u32
    }

    pub fn speed_label(self) -> &'static str {
        speed_label(self.0)
    }
}

impl Default for SpinDuration {
    fn default() -> Self {
        Self(DEFAULT_SPIN_SECS)
    }
}

impl std::fmt::Display for SpinDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Summary of a pasted list import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkImport {
    pub added: Vec<String>,
    pub duplicates: usize,
    pub empty: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WheelStore {
    options: Vec<String>,
    winners: Vec<String>,
    spin_duration: SpinDuration,
}

impl WheelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Past winners, most recent first.
    pub fn winners(&self) -> &[String] {
        &self.winners
    }

    pub fn spin_duration(&self) -> SpinDuration {
        self.spin_duration
    }

    pub fn can_spin(&self) -> bool {
        self.options.len() >= MIN_OPTIONS_TO_SPIN
    }

    /// Append a trimmed option. Exact (case-sensitive) duplicates are rejected.
    pub fn add_option(&mut self, input: &str) -> Result<String, WheelError> {
        let option = validate_new_option(input, &self.options)?;
        debug!("Adding option {:?} at position {}", option, self.options.len());
        self.options.push(option.clone());
        Ok(option)
    }

    /// Add every entry of a comma/newline separated list, skipping blanks
    /// and duplicates (including duplicates within the pasted text).
    pub fn add_options_from_text(&mut self, text: &str) -> BulkImport {
        let mut report = BulkImport::default();
        for entry in split_option_list(text) {
            match self.add_option(&entry) {
                Ok(option) => report.added.push(option),
                Err(WheelError::DuplicateOption(_)) => report.duplicates += 1,
                Err(_) => report.empty += 1,
            }
        }
        info!(
            "Imported {} options ({} duplicates, {} empty entries skipped)",
            report.added.len(),
            report.duplicates,
            report.empty
        );
        report
    }

    pub fn remove_option(&mut self, index: usize) -> Result<String, WheelError> {
        if index >= self.options.len() {
            return Err(WheelError::IndexOutOfRange {
                index,
                len: self.options.len(),
            });
        }
        Ok(self.options.remove(index))
    }

    /// Remove every option, returning how many were dropped.
    pub fn clear_options(&mut self) -> usize {
        let count = self.options.len();
        self.options.clear();
        count
    }

    /// Record a winner at the front of the history.
    pub fn add_winner(&mut self, winner: impl Into<String>) {
        self.winners.insert(0, winner.into());
    }

    pub fn remove_winner(&mut self, index: usize) -> Result<String, WheelError> {
        if index >= self.winners.len() {
            return Err(WheelError::IndexOutOfRange {
                index,
                len: self.winners.len(),
            });
        }
        Ok(self.winners.remove(index))
    }

    pub fn clear_history(&mut self) -> usize {
        let count = self.winners.len();
        self.winners.clear();
        count
    }

    pub fn set_spin_duration(&mut self, secs: f64) -> Result<SpinDuration, WheelError> {
        let duration = SpinDuration::try_from_secs(secs)?;
        self.spin_duration = duration;
        Ok(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_option_is_rejected_once_trimmed() {
        let mut store = WheelStore::new();
        assert_eq!(store.add_option("Pizza").unwrap(), "Pizza");
        assert_eq!(
            store.add_option("  Pizza "),
            Err(WheelError::DuplicateOption("Pizza".into()))
        );
        assert_eq!(store.options(), ["Pizza"]);
    }

    #[test]
    fn duplicates_are_case_sensitive() {
        let mut store = WheelStore::new();
        store.add_option("pizza").unwrap();
        store.add_option("Pizza").unwrap();
        assert_eq!(store.options().len(), 2);
    }

    #[test]
    fn blank_option_is_rejected() {
        let mut store = WheelStore::new();
        assert_eq!(store.add_option(" \n "), Err(WheelError::EmptyOption));
        assert!(store.options().is_empty());
    }

    #[test]
    fn options_keep_insertion_order() {
        let mut store = WheelStore::new();
        for o in ["C", "A", "B"] {
            store.add_option(o).unwrap();
        }
        assert_eq!(store.options(), ["C", "A", "B"]);
        assert_eq!(store.remove_option(1).unwrap(), "A");
        assert_eq!(store.options(), ["C", "B"]);
    }

    #[test]
    fn stale_index_is_reported() {
        let mut store = WheelStore::new();
        store.add_option("A").unwrap();
        assert_eq!(
            store.remove_option(3),
            Err(WheelError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(
            store.remove_winner(0),
            Err(WheelError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn clear_reports_count() {
        let mut store = WheelStore::new();
        assert_eq!(store.clear_options(), 0);
        store.add_option("A").unwrap();
        store.add_option("B").unwrap();
        assert_eq!(store.clear_options(), 2);
        assert!(store.options().is_empty());
    }

    #[test]
    fn can_spin_needs_two_options() {
        let mut store = WheelStore::new();
        assert!(!store.can_spin());
        store.add_option("A").unwrap();
        assert!(!store.can_spin());
        store.add_option("B").unwrap();
        assert!(store.can_spin());
    }

    #[test]
    fn winners_are_most_recent_first_and_survive_option_removal() {
        let mut store = WheelStore::new();
        store.add_option("A").unwrap();
        store.add_winner("A");
        store.add_winner("B");
        store.clear_options();
        assert_eq!(store.winners(), ["B", "A"]);
        assert_eq!(store.remove_winner(0).unwrap(), "B");
        assert_eq!(store.clear_history(), 1);
        assert!(store.winners().is_empty());
    }

    #[test]
    fn bulk_import_counts_skips() {
        let mut store = WheelStore::new();
        store.add_option("Pizza").unwrap();
        let report = store.add_options_from_text("Pizza, Sushi\nTacos,,Sushi");
        assert_eq!(report.added, vec!["Sushi", "Tacos"]);
        assert_eq!(report.duplicates, 2);
        assert_eq!(report.empty, 1);
        assert_eq!(store.options(), ["Pizza", "Sushi", "Tacos"]);
    }

    #[test]
    fn duration_defaults_to_five_seconds() {
        let store = WheelStore::new();
        assert_eq!(store.spin_duration().secs(), 5.0);
        assert_eq!(store.spin_duration().as_millis(), 5_000);
        assert_eq!(store.spin_duration().speed_label(), "Slow");
    }

    #[test]
    fn duration_is_range_checked_and_snapped() {
        let mut store = WheelStore::new();
        assert_eq!(store.set_spin_duration(3.3).unwrap().secs(), 3.5);
        assert_eq!(store.set_spin_duration(2.0).unwrap().secs(), 2.0);
        assert_eq!(store.set_spin_duration(8.0).unwrap().secs(), 8.0);
        assert_eq!(
            store.set_spin_duration(1.5),
            Err(WheelError::DurationOutOfRange(1.5))
        );
        assert!(store.set_spin_duration(f64::NAN).is_err());
        assert_eq!(store.spin_duration().secs(), 8.0);
    }

    #[test]
    fn clamped_duration_saturates() {
        assert_eq!(SpinDuration::clamped(0.0).secs(), 2.0);
        assert_eq!(SpinDuration::clamped(99.0).secs(), 8.0);
        assert_eq!(SpinDuration::clamped(6.2).secs(), 6.0);
        assert_eq!(SpinDuration::clamped(f64::NAN).secs(), 5.0);
        assert_eq!(
            SpinDuration::clamped(2.5).as_duration(),
            Duration::from_millis(2_500)
        );
    }
}
