//! Configuration surface consumed from the host
//!
//! Mirrors the named options the host stores (camelCase keys on the
//! wire). The struct is plain data: the host reads its settings store,
//! deserializes once per invocation, and hands the result in. Defaults
//! follow common subtitle-editing practice.

use serde::Deserialize;
use srt_core::{ScanConfig, TimeMs};

/// How the split command picks the split instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Weighted by the character-length ratio of the two halves
    Length,
    /// Temporal midpoint
    Half,
    /// Ask interactively every time
    Ask,
}

/// All named options the core consumes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Master toggle for live annotation
    pub enabled: bool,
    /// Minimum inter-subtitle gap in ms
    pub min_pause: TimeMs,
    /// Minimum subtitle display length in ms
    pub min_duration: TimeMs,
    /// Treat "closer than minPause" as needing a timing fix too
    pub fix_bad_min_pause: bool,
    /// When fixing, leave minPause of room instead of touching intervals
    pub fix_with_min_pause: bool,
    /// Leave minPause of room between the two halves of a split
    pub split_with_min_pause: bool,
    /// How the split instant is chosen
    pub split_mode: SplitMode,
    /// Default shift amount offered in prompts, ms
    #[serde(rename = "shiftMS")]
    pub shift_ms: TimeMs,
    /// Pad inlay hint text with a leading space
    pub extra_spaces: bool,
    /// Always show characters-per-second in duration hints
    pub cps: bool,
    /// Show characters-per-second when it exceeds `max_cps`
    pub cps_warning: bool,
    /// Characters-per-second threshold
    #[serde(rename = "maxCPS")]
    pub max_cps: f64,
    /// Show inter-record pause hints
    pub show_pause: bool,
    /// Warn when a subtitle overlaps its predecessor
    pub overlap_warning: bool,
    /// Include the character count in duration hints
    pub length: bool,
    /// Re-run the index fixer automatically after structural edits
    pub autofix_index: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_pause: 100,
            min_duration: 500,
            fix_bad_min_pause: false,
            fix_with_min_pause: true,
            split_with_min_pause: true,
            split_mode: SplitMode::Length,
            shift_ms: 100,
            extra_spaces: true,
            cps: false,
            cps_warning: true,
            max_cps: 21.0,
            show_pause: true,
            overlap_warning: true,
            length: false,
            autofix_index: false,
        }
    }
}

impl EditorConfig {
    /// Project the annotation-scanner slice of the configuration.
    #[must_use]
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            min_pause: self.min_pause,
            max_cps: self.max_cps,
            show_cps: self.cps,
            cps_warning: self.cps_warning,
            show_pause: self.show_pause,
            overlap_warning: self.overlap_warning,
            show_length: self.length,
            extra_spaces: self.extra_spaces,
        }
    }

    /// Pause applied by the split command, honoring the toggle.
    #[must_use]
    pub const fn split_pause(&self) -> TimeMs {
        if self.split_with_min_pause {
            self.min_pause
        } else {
            0
        }
    }
}
