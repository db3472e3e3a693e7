use crate::config::{FAST_BELOW_SECS, MEDIUM_BELOW_SECS};
use crate::WheelError;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

// Compiled regexes for duration parsing
static DURATION_SECS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?|\.\d+)\s*(?:s|sec|secs|seconds)?$").expect("valid regex")
});
static DURATION_MS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*ms$").expect("valid regex"));

/// Trim user input into an option label.
pub fn normalize_option(input: &str) -> Result<String, WheelError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(WheelError::EmptyOption);
    }
    Ok(trimmed.to_string())
}

/// Validate a new entry against the options already on the wheel.
/// Duplicates are exact, case-sensitive matches after trimming.
pub fn validate_new_option<S: AsRef<str>>(input: &str, existing: &[S]) -> Result<String, WheelError> {
    let option = normalize_option(input)?;
    if existing.iter().any(|o| o.as_ref() == option) {
        return Err(WheelError::DuplicateOption(option));
    }
    Ok(option)
}

/// Parse a spin duration typed by the user into seconds.
///
/// Supported formats:
/// - Plain seconds: "4.5"
/// - Seconds with a unit: "4.5s", "4.5 sec", "3 seconds"
/// - Milliseconds: "4500ms"
///
/// Range checking is left to [`crate::SpinDuration`].
pub fn parse_duration_secs(input: &str) -> Result<f64, WheelError> {
    let trimmed = input.trim().to_ascii_lowercase();
    let invalid = || WheelError::InvalidDuration(input.trim().to_string());

    if let Some(captures) = DURATION_MS_REGEX.captures(&trimmed) {
        let ms: u64 = captures[1].parse().map_err(|_| invalid())?;
        return Ok(ms as f64 / 1000.0);
    }

    if let Some(captures) = DURATION_SECS_REGEX.captures(&trimmed) {
        return captures[1].parse::<f64>().map_err(|_| invalid());
    }

    Err(invalid())
}

/// Round `value` to the nearest multiple of `step`.
pub fn snap_to_step(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    (value / step).round() * step
}

/// Human label shown under the duration slider.
pub fn speed_label(secs: f64) -> &'static str {
    if secs < FAST_BELOW_SECS {
        "Fast"
    } else if secs < MEDIUM_BELOW_SECS {
        "Medium"
    } else {
        "Slow"
    }
}

/// Format seconds with one decimal, e.g. `5.0s`.
pub fn format_secs(secs: f64) -> String {
    format!("{:.1}s", secs)
}

/// Split pasted text into candidate option labels.
///
/// Entries are separated by commas or newlines; CSV quoting lets an entry
/// contain a comma (`"Salt, pepper"`). Entries are trimmed but empty ones
/// are kept so the caller can count them.
pub fn split_option_list(text: &str) -> Vec<String> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut out = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        match record {
            Ok(record) => out.extend(record.iter().map(|field| field.to_string())),
            Err(e) => debug!("Warning: skipping unreadable record {}: {}", i + 1, e),
        }
    }
    out
}

/// Shorten a label for drawing on a wheel sector.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}
