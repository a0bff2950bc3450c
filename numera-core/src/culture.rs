//! Culture type for parser and formatter selection

use std::fmt;
use std::str::FromStr;

use crate::error::NumeraError;

/// Supported cultures for numeric resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Culture {
    /// English, period decimal mark, spelled-out number words
    #[default]
    English,
    /// Spanish, comma decimal mark, spelled-out number words
    Spanish,
    /// Chinese, logographic numerals with traditional-form substitution
    Chinese,
    /// Japanese, logographic numerals with 割/分/厘 percentage idioms
    Japanese,
}

impl Culture {
    /// Get the culture code
    pub fn code(&self) -> &'static str {
        match self {
            Culture::English => "en",
            Culture::Spanish => "es",
            Culture::Chinese => "zh",
            Culture::Japanese => "ja",
        }
    }

    /// Get the full culture name
    pub fn name(&self) -> &'static str {
        match self {
            Culture::English => "English",
            Culture::Spanish => "Spanish",
            Culture::Chinese => "Chinese",
            Culture::Japanese => "Japanese",
        }
    }

    /// Whether this culture writes numbers with logographic numeral characters
    pub fn is_logographic(&self) -> bool {
        matches!(self, Culture::Chinese | Culture::Japanese)
    }

    /// All supported cultures
    pub fn all() -> &'static [Culture] {
        &[
            Culture::English,
            Culture::Spanish,
            Culture::Chinese,
            Culture::Japanese,
        ]
    }
}

impl FromStr for Culture {
    type Err = NumeraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "eng" | "english" | "en-us" | "en-gb" => Ok(Culture::English),
            "es" | "spa" | "spanish" | "es-es" | "es-mx" => Ok(Culture::Spanish),
            "zh" | "chi" | "chinese" | "zh-cn" | "zh-tw" => Ok(Culture::Chinese),
            "ja" | "jpn" | "japanese" | "ja-jp" => Ok(Culture::Japanese),
            _ => Err(NumeraError::UnsupportedCulture(s.to_string())),
        }
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
