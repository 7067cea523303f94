//! Text cleanup applied to cell and paragraph content on ingestion.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Selection markers emitted for checkboxes, longest variants first.
const SELECTION_MARKS: [&str; 4] = ["\n:unselected:", "\n:selected:", ":unselected:", ":selected:"];

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Strip selection markers and trim
    #[default]
    Minimal,
    /// Minimal + NFC normalization + whitespace collapsing
    Standard,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Remove `:selected:` / `:unselected:` checkbox markers
    pub strip_selection_marks: bool,

    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Collapse runs of spaces and tabs into one space
    pub collapse_whitespace: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            strip_selection_marks: true,
            normalize_unicode: false,
            collapse_whitespace: false,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            strip_selection_marks: true,
            normalize_unicode: true,
            collapse_whitespace: true,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::minimal()
    }
}

/// Text cleanup pipeline.
#[derive(Debug, Clone, Default)]
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.strip_selection_marks {
            for mark in SELECTION_MARKS {
                result = result.replace(mark, "");
            }
        }

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.collapse_whitespace {
            result = blank_run_regex().replace_all(&result, " ").to_string();
        }

        result.trim().to_string()
    }
}

fn blank_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]{2,}").expect("valid blank-run pattern"))
}
