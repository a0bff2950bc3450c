//! Compiled per-culture configuration
//!
//! Bridges the raw TOML data and the hot-path parser interface: word maps are
//! held as hash maps, pattern sources are compiled once, and the alternation
//! over every known number word is built longest-first so the tokenizer never
//! takes a partial-word match.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use super::types::{CultureData, LogographicData};
use crate::culture::Culture;
use crate::error::{NumeraError, Result};
use crate::format;

/// Compiled configuration for one culture.
///
/// Built once at startup, immutable for the process lifetime, shared
/// read-only by every parser instance for the culture.
#[derive(Debug)]
pub struct NumberConfig {
    pub culture: Culture,
    pub decimal_separator: char,
    pub group_separator: char,
    /// Token joining words of one number phrase
    pub word_separator: String,
    pub written_decimal_separators: Vec<String>,
    pub written_group_separators: Vec<String>,
    pub written_integer_separators: Vec<String>,
    pub written_fraction_separators: Vec<String>,
    /// Token synthesized between a numerator and a denominator span
    pub fraction_marker: String,
    pub half_a_dozen_text: Option<String>,

    pub cardinal_map: HashMap<String, i64>,
    pub ordinal_map: HashMap<String, i64>,
    pub round_number_map: HashMap<String, i64>,

    /// Round-number words or magnitude suffixes inside digit strings
    pub digital_number_regex: Regex,
    /// Leading negative sign or word
    pub negative_sign_regex: Regex,
    /// "numerator PREP denominator" form
    pub fraction_preposition_regex: Regex,
    pub half_a_dozen_regex: Option<Regex>,
    /// Longest-first alternation over every cardinal/ordinal/round word
    pub text_number_regex: Regex,
    /// Leading digit detection used when a span carries no subtype
    pub digit_detect_regex: Regex,

    /// Equality-marker patterns for interval phrasing
    pub range: Option<RangeConfig>,

    /// Character-level extension, present for logographic cultures only
    pub logographic: Option<LogographicConfig>,
}

/// Compiled equality markers for the range parser, one regex per phrasing
/// shape on each side
#[derive(Debug)]
pub struct RangeConfig {
    pub more_or_equal: Regex,
    pub less_or_equal: Regex,
    pub more_or_equal_suffix: Option<Regex>,
    pub less_or_equal_suffix: Option<Regex>,
    pub more_or_equal_separate: Option<Regex>,
    pub less_or_equal_separate: Option<Regex>,
}

impl RangeConfig {
    fn from_data(data: &super::types::RangeData) -> Result<Self> {
        Ok(Self {
            more_or_equal: compile(&data.more_or_equal)?,
            less_or_equal: compile(&data.less_or_equal)?,
            more_or_equal_suffix: data
                .more_or_equal_suffix
                .as_deref()
                .map(compile)
                .transpose()?,
            less_or_equal_suffix: data
                .less_or_equal_suffix
                .as_deref()
                .map(compile)
                .transpose()?,
            more_or_equal_separate: data
                .more_or_equal_separate
                .as_deref()
                .map(compile)
                .transpose()?,
            less_or_equal_separate: data
                .less_or_equal_separate
                .as_deref()
                .map(compile)
                .transpose()?,
        })
    }

    /// Whether a "more" phrasing carries an explicit equality marker
    pub fn includes_equal_more(&self, text: &str) -> bool {
        self.matches_any(
            text,
            &self.more_or_equal,
            self.more_or_equal_suffix.as_ref(),
            self.more_or_equal_separate.as_ref(),
        )
    }

    /// Whether a "less" phrasing carries an explicit equality marker
    pub fn includes_equal_less(&self, text: &str) -> bool {
        self.matches_any(
            text,
            &self.less_or_equal,
            self.less_or_equal_suffix.as_ref(),
            self.less_or_equal_separate.as_ref(),
        )
    }

    fn matches_any(
        &self,
        text: &str,
        inline: &Regex,
        suffix: Option<&Regex>,
        separate: Option<&Regex>,
    ) -> bool {
        inline.is_match(text)
            || suffix.is_some_and(|r| r.is_match(text))
            || separate.is_some_and(|r| r.is_match(text))
    }
}

impl NumberConfig {
    /// Compile a configuration from its raw data
    pub fn from_data(culture: Culture, data: &CultureData) -> Result<Self> {
        let cardinal_map = lowercase_keys(&data.cardinals);
        let ordinal_map = lowercase_keys(&data.ordinals);
        let round_number_map = lowercase_keys(&data.round_numbers);

        let text_number_regex = build_word_alternation(
            cardinal_map
                .keys()
                .chain(ordinal_map.keys())
                .chain(round_number_map.keys()),
        )?;

        let logographic = match &data.logographic {
            Some(logo) => Some(LogographicConfig::from_data(logo)?),
            None => None,
        };

        Ok(Self {
            culture,
            decimal_separator: data.metadata.decimal_separator,
            group_separator: data.metadata.group_separator,
            word_separator: data.separators.word.clone(),
            written_decimal_separators: data.separators.written_decimal.clone(),
            written_group_separators: data.separators.written_group.clone(),
            written_integer_separators: data.separators.written_integer.clone(),
            written_fraction_separators: data.separators.written_fraction.clone(),
            fraction_marker: data.separators.fraction_marker.clone(),
            half_a_dozen_text: data.separators.half_a_dozen_text.clone(),
            cardinal_map,
            ordinal_map,
            round_number_map,
            digital_number_regex: compile(&data.patterns.digital_number)?,
            negative_sign_regex: compile(&data.patterns.negative_sign)?,
            fraction_preposition_regex: compile(&data.patterns.fraction_preposition)?,
            half_a_dozen_regex: data
                .patterns
                .half_a_dozen
                .as_deref()
                .map(compile)
                .transpose()?,
            text_number_regex,
            digit_detect_regex: compile(r"^\s*[-+]?\s*\d")?,
            range: data.range.as_ref().map(RangeConfig::from_data).transpose()?,
            logographic,
        })
    }

    /// Culture-format a resolved value
    pub fn render(&self, value: f64) -> String {
        format::render(value, self.decimal_separator)
    }

    /// Value of a single cardinal or ordinal word, cardinal taking priority
    pub fn word_value(&self, word: &str) -> Option<i64> {
        self.cardinal_map
            .get(word)
            .or_else(|| self.ordinal_map.get(word))
            .copied()
    }

    /// Scale of a round-number word
    pub fn round_value(&self, word: &str) -> Option<i64> {
        self.round_number_map.get(word).copied()
    }

    /// Language hook for words the plain maps do not cover: hyphenated
    /// compounds sum their known parts ("twenty-one" → 21, "twenty-fifths"
    /// → 25). Unknown words resolve to 0.
    pub fn resolve_composite_word(&self, word: &str) -> i64 {
        if word.contains('-') {
            return word
                .split('-')
                .filter_map(|part| {
                    self.ordinal_map
                        .get(part)
                        .or_else(|| self.cardinal_map.get(part))
                        .copied()
                })
                .sum();
        }
        self.ordinal_map
            .get(word)
            .or_else(|| self.cardinal_map.get(word))
            .copied()
            .unwrap_or(0)
    }

    /// Tokenize a phrase into known number words, longest match first
    pub fn tokenize_number_words(&self, text: &str) -> Vec<String> {
        self.text_number_regex
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }

    /// Whether the span text looks like a digit sequence
    pub fn looks_like_digits(&self, text: &str) -> bool {
        self.digit_detect_regex.is_match(text)
    }
}

/// Character-level configuration for logographic cultures.
///
/// Every character of a numeral string classifies into exactly one of
/// digit, round-unit, structural (point/negative/dozen/pair) or other before
/// value accumulation begins.
#[derive(Debug)]
pub struct LogographicConfig {
    /// Digit characters to values (零 → 0, 两 → 2)
    pub char_values: HashMap<char, f64>,
    /// Round-unit characters to scales (十 → 10, 萬 → 10000)
    pub round_units: HashMap<char, i64>,
    /// Round units that commit their partial sum immediately
    pub direct_round: HashSet<char>,
    /// The "ten" characters
    pub ten_chars: HashSet<char>,
    pub zero_char: char,
    /// Zero glyphs that reset the digit run (零, 〇)
    pub zero_suppression: HashSet<char>,
    pub ordinal_prefix: char,
    pub full_to_half: HashMap<char, char>,
    pub tra_to_sim: HashMap<char, char>,
    /// Multi-character unit rewrites applied before integer resolution
    pub unit_rewrites: Vec<(String, String)>,

    pub point_regex: Regex,
    pub frac_split_regex: Regex,
    pub dozen_regex: Option<Regex>,
    pub pair_regex: Option<Regex>,
    pub negative_sign_regex: Regex,
    pub percent_marker_regex: Regex,
    pub digit_percent_regex: Regex,
    pub double_and_round_regex: Option<Regex>,
    pub round_as_integer_regex: Regex,

    /// Tenth-valued unit characters (割, 成, 分, 厘) and their scales
    pub special_percent_units: HashMap<char, f64>,
    /// The half character, worth five on the tenths scale
    pub special_half: char,
    /// Whole phrases resolving to 50
    pub half_phrases: HashSet<String>,
    /// Whole phrases resolving to 100
    pub full_phrases: HashSet<String>,
}

impl LogographicConfig {
    fn from_data(data: &LogographicData) -> Result<Self> {
        Ok(Self {
            char_values: char_keys_f64(&data.digits)?,
            round_units: char_keys_i64(&data.round_units)?,
            direct_round: char_set(&data.sets.direct_round)?,
            ten_chars: char_set(&data.sets.ten)?,
            zero_char: single_char(&data.sets.zero)?,
            zero_suppression: {
                let mut set = char_set(&data.sets.zero_chars)?;
                set.insert(single_char(&data.sets.zero)?);
                set
            },
            ordinal_prefix: single_char(&data.sets.ordinal_prefix)?,
            full_to_half: char_pairs(&data.full_to_half)?,
            tra_to_sim: char_pairs(&data.tra_to_sim)?,
            unit_rewrites: data
                .unit_rewrites
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            point_regex: compile(&data.patterns.point)?,
            frac_split_regex: compile(&data.patterns.frac_split)?,
            dozen_regex: data.patterns.dozen.as_deref().map(compile).transpose()?,
            pair_regex: data.patterns.pair.as_deref().map(compile).transpose()?,
            negative_sign_regex: compile(&data.patterns.negative_sign)?,
            percent_marker_regex: compile(&data.patterns.percent_marker)?,
            digit_percent_regex: compile(&data.patterns.digit_percent)?,
            double_and_round_regex: data
                .patterns
                .double_and_round
                .as_deref()
                .map(compile)
                .transpose()?,
            round_as_integer_regex: compile(&data.patterns.round_as_integer)?,
            special_percent_units: char_keys_f64(&data.special_percent.units)?,
            special_half: single_char(&data.special_percent.half)?,
            half_phrases: data.special_percent.half_phrases.iter().cloned().collect(),
            full_phrases: data.special_percent.full_phrases.iter().cloned().collect(),
        })
    }

    /// Apply traditional→simplified substitution
    pub fn to_simplified(&self, text: &str) -> String {
        substitute(text, &self.tra_to_sim)
    }

    /// Apply full-width→half-width digit substitution
    pub fn to_half_width(&self, text: &str) -> String {
        substitute(text, &self.full_to_half)
    }

    /// Apply multi-character unit rewrites (万万 → 亿)
    pub fn rewrite_units(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (from, to) in &self.unit_rewrites {
            out = out.replace(from, to);
        }
        out
    }

    /// Whether the character carries a round-unit scale
    pub fn is_round_unit(&self, ch: char) -> bool {
        self.round_units.contains_key(&ch)
    }
}

fn substitute(text: &str, map: &HashMap<char, char>) -> String {
    text.chars()
        .map(|c| map.get(&c).copied().unwrap_or(c))
        .collect()
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| NumeraError::Configuration(format!("invalid pattern {pattern:?}: {e}")))
}

fn lowercase_keys(map: &HashMap<String, i64>) -> HashMap<String, i64> {
    map.iter().map(|(k, v)| (k.to_lowercase(), *v)).collect()
}

/// Sort alternatives by descending length so the alternation never stops at
/// a partial-word match ("sixteen" before "six")
fn build_word_alternation<'a>(words: impl Iterator<Item = &'a String>) -> Result<Regex> {
    let mut alternatives: Vec<&str> = words.map(String::as_str).collect();
    alternatives.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    alternatives.dedup();
    let joined = alternatives
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    compile(&format!(r"(?i)\b({joined})\b"))
}

fn single_char(s: &str) -> Result<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(NumeraError::Configuration(format!(
            "expected a single character, got {s:?}"
        ))),
    }
}

fn char_keys_f64(map: &HashMap<String, f64>) -> Result<HashMap<char, f64>> {
    map.iter()
        .map(|(k, v)| Ok((single_char(k)?, *v)))
        .collect()
}

fn char_keys_i64(map: &HashMap<String, i64>) -> Result<HashMap<char, i64>> {
    map.iter()
        .map(|(k, v)| Ok((single_char(k)?, *v)))
        .collect()
}

fn char_pairs(map: &HashMap<String, String>) -> Result<HashMap<char, char>> {
    map.iter()
        .map(|(k, v)| Ok((single_char(k)?, single_char(v)?)))
        .collect()
}

fn char_set(list: &[String]) -> Result<HashSet<char>> {
    list.iter().map(|s| single_char(s)).collect()
}
