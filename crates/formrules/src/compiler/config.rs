//! Compiler settings.

use serde::{Deserialize, Serialize};

use crate::validators::LengthMode;

/// Default `chrono` format for date values and literal `minDate` bounds.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Knobs that apply to every field of a compile.
///
/// ```json
/// { "dateFormat": "%Y-%m-%d", "lengthMode": "chars", "trimStrings": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    /// `chrono` format string date values must match.
    pub date_format: String,

    /// How `minLength`/`maxLength` count characters.
    pub length_mode: LengthMode,

    /// Trim string values before length, pattern, and membership checks.
    /// Whitespace-only strings count as absent either way.
    pub trim_strings: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
            length_mode: LengthMode::Chars,
            trim_strings: true,
        }
    }
}

impl CompilerConfig {
    /// Sets the date format.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Sets the length mode.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_length_mode(mut self, mode: LengthMode) -> Self {
        self.length_mode = mode;
        self
    }

    /// Enables or disables trimming.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_trim_strings(mut self, trim: bool) -> Self {
        self.trim_strings = trim;
        self
    }
}
