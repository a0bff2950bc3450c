//! Serde schema for the per-culture configuration bundles

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One culture's raw configuration data, as authored in TOML.
///
/// Word maps and patterns are pure data owned by the configuration
/// collaborator; the engine only validates shape, never content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CultureData {
    pub metadata: MetadataData,
    pub separators: SeparatorData,
    pub patterns: PatternData,
    #[serde(default)]
    pub cardinals: HashMap<String, i64>,
    #[serde(default)]
    pub ordinals: HashMap<String, i64>,
    #[serde(default)]
    pub round_numbers: HashMap<String, i64>,
    #[serde(default)]
    pub range: Option<RangeData>,
    #[serde(default)]
    pub logographic: Option<LogographicData>,
}

/// Equality-marker patterns for interval phrasing, one per alternative
/// phrasing shape (inline, suffix, separately tokenized)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeData {
    pub more_or_equal: String,
    pub less_or_equal: String,
    #[serde(default)]
    pub more_or_equal_suffix: Option<String>,
    #[serde(default)]
    pub less_or_equal_suffix: Option<String>,
    #[serde(default)]
    pub more_or_equal_separate: Option<String>,
    #[serde(default)]
    pub less_or_equal_separate: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataData {
    pub code: String,
    pub name: String,
    pub decimal_separator: char,
    pub group_separator: char,
}

/// Written separator tokens for composite phrases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeparatorData {
    /// Token joining words of one number phrase ("and")
    pub word: String,
    /// Words marking the decimal point ("point", "coma")
    #[serde(default)]
    pub written_decimal: Vec<String>,
    /// Words marking digit grouping inside spelled-out numbers
    #[serde(default)]
    pub written_group: Vec<String>,
    /// Words joining integer sub-phrases ("and" in "hundred and five")
    #[serde(default)]
    pub written_integer: Vec<String>,
    /// Words separating the integer part from a fraction ("and" in "one and a half")
    #[serde(default)]
    pub written_fraction: Vec<String>,
    /// Token synthesized between numerator and denominator ("over")
    pub fraction_marker: String,
    /// Replacement text for the half-a-dozen idiom
    #[serde(default)]
    pub half_a_dozen_text: Option<String>,
}

/// Regex sources, compiled once at load time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternData {
    /// Round-number words or magnitude suffixes inside digit strings
    pub digital_number: String,
    /// Leading negative sign or word
    pub negative_sign: String,
    /// "numerator PREP denominator" form
    pub fraction_preposition: String,
    /// The half-a-dozen idiom
    #[serde(default)]
    pub half_a_dozen: Option<String>,
}

/// Character-level extension for logographic cultures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogographicData {
    /// Digit characters to values (零 → 0, 两 → 2)
    pub digits: HashMap<String, f64>,
    /// Round-unit characters to scales (十 → 10, 萬 → 10000)
    pub round_units: HashMap<String, i64>,
    pub sets: LogographicSets,
    pub patterns: LogographicPatterns,
    /// Full-width to half-width digit substitution
    #[serde(default)]
    pub full_to_half: HashMap<String, String>,
    /// Traditional to simplified character substitution
    #[serde(default)]
    pub tra_to_sim: HashMap<String, String>,
    /// Multi-character unit rewrites applied before integer resolution
    #[serde(default)]
    pub unit_rewrites: HashMap<String, String>,
    /// Idiomatic percentage data
    pub special_percent: SpecialPercentData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogographicSets {
    /// Round units that commit their partial sum immediately (万, 億, 兆)
    pub direct_round: Vec<String>,
    /// The "ten" characters (十, 拾)
    pub ten: Vec<String>,
    /// The canonical zero glyph (also the implied integer part of bare
    /// fractions)
    pub zero: String,
    /// Zero glyphs that trigger suppression; the canonical glyph is always
    /// included
    #[serde(default)]
    pub zero_chars: Vec<String>,
    /// Ordinal prefix character (第)
    pub ordinal_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogographicPatterns {
    /// Decimal point characters (点, 點)
    pub point: String,
    /// Fraction separator (分之, 分の)
    pub frac_split: String,
    /// Dozen suffix (打, ダース)
    #[serde(default)]
    pub dozen: Option<String>,
    /// Pair suffix (双, 対)
    #[serde(default)]
    pub pair: Option<String>,
    /// Negative sign prefix (负, マイナス)
    pub negative_sign: String,
    /// Percent marker stripped before numeric resolution (百分之, パーセント)
    pub percent_marker: String,
    /// Percent sign variants with optional magnitude suffix letters
    pub digit_percent: String,
    /// Round unit directly closing a decimal (the 万 in 一点五万)
    #[serde(default)]
    pub double_and_round: Option<String>,
    /// Digit runs to be read as round numbers, not positional digits
    pub round_as_integer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialPercentData {
    /// Tenth-valued unit characters (割, 成) and their scales
    pub units: HashMap<String, f64>,
    /// The half character (半), worth five on the tenths scale
    pub half: String,
    /// Whole phrases resolving to 50
    #[serde(default)]
    pub half_phrases: Vec<String>,
    /// Whole phrases resolving to 100
    #[serde(default)]
    pub full_phrases: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_culture_data_deserialize() {
        let toml_str = r#"
            [metadata]
            code = "en"
            name = "English"
            decimal_separator = "."
            group_separator = ","

            [separators]
            word = "and"
            written_decimal = ["point"]
            written_integer = ["and"]
            written_fraction = ["and"]
            fraction_marker = "over"

            [patterns]
            digital_number = '\b(hundred|thousand)\b'
            negative_sign = '^\s*(minus\s+)'
            fraction_preposition = '^(?P<numerator>.+)\s+over\s+(?P<denominator>.+)$'

            [cardinals]
            one = 1
            two = 2

            [ordinals]
            first = 1

            [round_numbers]
            hundred = 100
        "#;

        let data: CultureData = toml::from_str(toml_str).unwrap();
        assert_eq!(data.metadata.code, "en");
        assert_eq!(data.cardinals["two"], 2);
        assert_eq!(data.round_numbers["hundred"], 100);
        assert!(data.logographic.is_none());
    }

    #[test]
    fn test_logographic_section_deserialize() {
        let toml_str = r#"
            [metadata]
            code = "zh"
            name = "Chinese"
            decimal_separator = "."
            group_separator = ","

            [separators]
            word = ""
            fraction_marker = ""

            [patterns]
            digital_number = '[十百千]'
            negative_sign = '^负'
            fraction_preposition = '分之'

            [logographic]
            digits = { "零" = 0.0, "一" = 1.0 }
            round_units = { "十" = 10, "万" = 10000 }

            [logographic.sets]
            direct_round = ["万"]
            ten = ["十"]
            zero = "零"
            ordinal_prefix = "第"

            [logographic.patterns]
            point = '[点點]'
            frac_split = '分之'
            negative_sign = '^[负負]'
            percent_marker = '^百分之'
            digit_percent = '[%％]$'
            round_as_integer = '[十百千万]'

            [logographic.special_percent]
            units = { "成" = 10.0 }
            half = "半"
            half_phrases = ["半数"]
        "#;

        let data: CultureData = toml::from_str(toml_str).unwrap();
        let logo = data.logographic.unwrap();
        assert_eq!(logo.digits["一"], 1.0);
        assert_eq!(logo.round_units["万"], 10000);
        assert_eq!(logo.sets.zero, "零");
        assert_eq!(logo.special_percent.units["成"], 10.0);
    }
}
