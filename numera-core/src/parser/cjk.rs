//! Logographic numeral parser
//!
//! Character-by-character resolution for cultures that write numbers with
//! CJK numerals: positional accumulation over round-unit characters with
//! zero-suppression, plus the idiomatic fraction, percentage and ordinal
//! forms those cultures use.

use std::sync::Arc;

use crate::config::{LogographicConfig, NumberConfig};
use crate::culture::Culture;
use crate::parser::numeric::{digital_value, power_number_parse};
use crate::parser::SpanParser;
use crate::span::{ParsedValue, SpanKind, SpanPayload, Subtype, TaggedSpan};

/// Parser for cultures that write numbers with logographic numeral characters
#[derive(Debug, Clone)]
pub struct CjkNumberParser {
    config: Arc<NumberConfig>,
    supported: Option<Vec<SpanKind>>,
}

impl CjkNumberParser {
    pub fn new(config: Arc<NumberConfig>) -> Self {
        Self {
            config,
            supported: None,
        }
    }

    /// Restrict the parser to an allow-list of span kinds
    pub fn with_supported_kinds(config: Arc<NumberConfig>, kinds: Vec<SpanKind>) -> Self {
        Self {
            config,
            supported: Some(kinds),
        }
    }

    pub fn config(&self) -> &Arc<NumberConfig> {
        &self.config
    }

    fn accepts(&self, kind: SpanKind) -> bool {
        match &self.supported {
            Some(kinds) => kinds.contains(&kind),
            None => true,
        }
    }

    fn logographic(&self) -> &LogographicConfig {
        self.config
            .logographic
            .as_ref()
            .expect("CJK parser is only built for logographic cultures")
    }

    /// Positional integer resolution over numeral characters.
    ///
    /// Keeps a partial sum per open round unit: a larger unit closes the open
    /// sum at its own scale, a smaller one accumulates, and direct-round
    /// units (万, 億) commit immediately instead of waiting to be subsumed.
    fn get_int_value(&self, text: &str) -> f64 {
        let logo = self.logographic();
        let mut text = text.to_string();

        let mut dozen = false;
        let mut pair = false;
        if let Some(regex) = &logo.dozen_regex {
            if regex.is_match(&text) {
                dozen = true;
                text = regex.replace_all(&text, "").into_owned();
            }
        }
        if let Some(regex) = &logo.pair_regex {
            if regex.is_match(&text) {
                pair = true;
                text = regex.replace_all(&text, "").into_owned();
            }
        }

        let mut negative = false;
        if logo.negative_sign_regex.is_match(&text) {
            negative = true;
            text = logo.negative_sign_regex.replace(&text, "").into_owned();
        }

        let chars: Vec<char> = text.chars().collect();
        let mut int_value = 0.0;
        let mut part_value = 0.0;
        // Digit run accumulated since the last round unit; 1 so a bare
        // leading unit ("十") counts itself
        let mut before_value = 1.0;
        let mut round_before: Option<i64> = None;
        let mut is_round_before = false;
        // Implicit scale for a bare trailing digit run ("一百五" → 150)
        let mut round_default: i64 = 1;
        let mut has_digit_run = false;

        for (i, &ch) in chars.iter().enumerate() {
            let is_last = i == chars.len() - 1;

            if let Some(&round_recent) = logo.round_units.get(&ch) {
                match round_before {
                    Some(open) if round_recent > open => {
                        // The new, larger unit closes the open partial sum
                        if is_round_before {
                            int_value += part_value * round_recent as f64;
                            is_round_before = false;
                        } else {
                            part_value += before_value * round_default as f64;
                            int_value += part_value * round_recent as f64;
                        }
                        round_before = None;
                        part_value = 0.0;
                    }
                    _ => {
                        is_round_before = true;
                        part_value += before_value * round_recent as f64;
                        round_before = Some(round_recent);

                        if is_last || logo.direct_round.contains(&ch) {
                            int_value += part_value;
                            part_value = 0.0;
                        }
                    }
                }

                round_default = round_recent / 10;
                before_value = 1.0;
                has_digit_run = false;
            } else if let Some(&digit) = logo.char_values.get(&ch) {
                let mut suppressed = false;
                if !is_last {
                    // Zero suppresses unless a scaling unit follows it; the
                    // ten characters never take a zero prefix
                    let next = chars[i + 1];
                    let not_round_next =
                        logo.ten_chars.contains(&next) || !logo.is_round_unit(next);
                    if logo.zero_suppression.contains(&ch) && not_round_next {
                        // Zero suppression: the run restarts at unit scale
                        suppressed = true;
                        before_value = 1.0;
                        round_default = 1;
                    } else {
                        before_value = if has_digit_run {
                            before_value * 10.0 + digit
                        } else {
                            digit
                        };
                        is_round_before = false;
                    }
                } else {
                    before_value = if has_digit_run {
                        before_value * 10.0 + digit
                    } else {
                        digit
                    };
                    part_value += before_value * round_default as f64;
                    int_value += part_value;
                    part_value = 0.0;
                }
                has_digit_run = ch.is_numeric() && !suppressed;
            }
            // Structural characters were stripped above; anything else is
            // inert by the classification invariant
        }

        if negative {
            int_value = -int_value;
        }
        if dozen {
            int_value *= 12.0;
        }
        if pair {
            int_value *= 2.0;
        }
        int_value
    }

    /// Integer subtype: unit rewrites (万万 → 亿), then positional resolution
    fn parse_integer(&self, text: &str) -> Option<f64> {
        let rewritten = self.logographic().rewrite_units(text);
        Some(self.get_int_value(&rewritten))
    }

    /// Decimal subtype: optional trailing round unit scales the whole value
    /// (一点五万 → 15000)
    fn parse_double(&self, text: &str) -> Option<f64> {
        let logo = self.logographic();

        let (negative, body) = strip_negative(logo, text);
        let mut body = body;

        let mut power = 1.0;
        if let Some(regex) = &logo.double_and_round_regex {
            if regex.is_match(&body) {
                let last = body.chars().last()?;
                power = *logo.round_units.get(&last)? as f64;
                body = body[..body.len() - last.len_utf8()].to_string();
            }
        }

        let (int_part, point_part) = match logo.point_regex.splitn(&body, 2).collect::<Vec<_>>()[..]
        {
            [int_part, point_part] => (int_part, Some(point_part)),
            [int_part] => (int_part, None),
            _ => return None,
        };

        // An empty integer part before the point is an explicit zero
        let mut value = if int_part.is_empty() {
            0.0
        } else {
            self.get_int_value(int_part)
        };
        if let Some(point_part) = point_part {
            value += self.get_point_value(point_part);
        }

        value *= power;
        Some(if negative { -value } else { value })
    }

    /// Decimal digits after the point character, one per shrinking power of ten
    fn get_point_value(&self, text: &str) -> f64 {
        let logo = self.logographic();
        let mut value = 0.0;
        let mut scale = 0.1;
        for ch in text.chars() {
            if let Some(&digit) = logo.char_values.get(&ch) {
                value += digit * scale;
                scale *= 0.1;
            }
        }
        value
    }

    /// Fraction subtype: split into integer/denominator/numerator parts.
    /// A two-part split has no integer part and defaults it to the zero
    /// glyph; a negative integer part subtracts the fraction.
    fn parse_fraction(&self, text: &str) -> Option<f64> {
        let logo = self.logographic();
        let zero = logo.zero_char.to_string();

        let parts: Vec<&str> = logo.frac_split_regex.split(text).collect();
        let (int_part, demo_part, num_part) = match parts[..] {
            [demo, num] => (zero.as_str(), demo, num),
            [int, demo, num] => (int, demo, num),
            _ => return None,
        };

        let negative = logo.negative_sign_regex.is_match(int_part);
        let int_value = self.resolve_part(int_part);
        let demo_value = self.resolve_part(demo_part);
        let num_value = self.resolve_part(num_part);

        Some(if negative {
            int_value - num_value / demo_value
        } else {
            int_value + num_value / demo_value
        })
    }

    /// Percentage subtype, three disjoint forms
    fn parse_percentage(&self, text: &str, subtype: Subtype) -> Option<f64> {
        let logo = self.logographic();

        if subtype == Subtype::SpecialPercentage {
            return self.parse_special_percentage(text);
        }
        if subtype == Subtype::Digits {
            return self.parse_digit_percentage(text);
        }

        if logo.frac_split_regex.is_match(text) {
            // "X分之Y": Y of X, rescaled onto the percent scale. The rescale
            // is asymmetric on either side of 100 and must stay that way.
            let parts: Vec<&str> = logo.frac_split_regex.split(text).collect();
            if parts.len() < 2 {
                return None;
            }
            let demo_value = self.resolve_part(parts[parts.len() - 2]);
            let num_value = self.resolve_part(parts[parts.len() - 1]);
            return Some(if demo_value < 100.0 {
                num_value * (100.0 / demo_value)
            } else {
                num_value / (demo_value / 100.0)
            });
        }

        if logo.percent_marker_regex.is_match(text) {
            let stripped = logo.percent_marker_regex.replace_all(text, "").into_owned();
            return Some(self.resolve_part(&stripped));
        }

        None
    }

    /// Idiomatic tenths form: whole-phrase table first, then digit/unit
    /// pairs (割/成 tenths, 分 ones, 厘 tenths-of-one) with a trailing half
    fn parse_special_percentage(&self, text: &str) -> Option<f64> {
        let logo = self.logographic();

        if logo.half_phrases.contains(text) {
            return Some(50.0);
        }
        if logo.full_phrases.contains(text) {
            return Some(100.0);
        }

        let mut value = 0.0;
        let mut pending: Option<f64> = None;
        for ch in text.chars() {
            if let Some(&digit) = logo.char_values.get(&ch) {
                pending = Some(digit);
            } else if let Some(&scale) = logo.special_percent_units.get(&ch) {
                if let Some(digit) = pending.take() {
                    value += digit * scale;
                }
            } else if ch == logo.special_half {
                value += 5.0;
            }
        }

        (value != 0.0).then_some(value)
    }

    /// Plain-digit percentage with optional magnitude suffix letters,
    /// case- and width-insensitive (k/M/G/T → 1e3/1e6/1e9/1e12)
    fn parse_digit_percentage(&self, text: &str) -> Option<f64> {
        let logo = self.logographic();
        let half = logo.to_half_width(text);
        let stripped = logo.digit_percent_regex.replace_all(&half, "").into_owned();
        let trimmed = stripped.trim();

        let mut power = 1.0;
        let mut body = trimmed;
        if let Some(last) = trimmed.chars().last() {
            let magnitude = match last.to_ascii_lowercase() {
                'k' => 1e3,
                'm' => 1e6,
                'g' => 1e9,
                't' => 1e12,
                _ => 1.0,
            };
            if magnitude != 1.0 {
                power = magnitude;
                body = &trimmed[..trimmed.len() - last.len_utf8()];
            }
        }

        Some(digital_value(
            body,
            power,
            self.config.decimal_separator,
            self.config.group_separator,
        ))
    }

    /// Digit subtype: round-unit characters multiply an accumulating power,
    /// the remaining half-width digits resolve as a plain digit string
    fn digit_number_parse(&self, text: &str) -> Option<f64> {
        let logo = self.logographic();
        let half = logo.to_half_width(text);
        let (negative, body) = strip_negative(logo, &half);

        let mut power = 1.0;
        let mut working = String::with_capacity(body.len());
        for ch in body.chars() {
            if let Some(&scale) = logo.round_units.get(&ch) {
                power *= scale as f64;
            } else {
                working.push(ch);
            }
        }

        let value = digital_value(
            &working,
            power,
            self.config.decimal_separator,
            self.config.group_separator,
        );
        Some(if negative { -value } else { value })
    }

    /// Ordinal subtype: strip the prefix, then read the remainder either as
    /// a round-number phrase or as positional digits
    fn parse_ordinal(&self, text: &str) -> Option<f64> {
        let logo = self.logographic();
        let stripped = text
            .strip_prefix(logo.ordinal_prefix)
            .unwrap_or(text);

        if logo.round_as_integer_regex.is_match(stripped) {
            Some(self.get_int_value(stripped))
        } else {
            Some(self.digit_run_value(stripped))
        }
    }

    /// Positional digit concatenation (一二三 → 123, also half-width runs)
    fn digit_run_value(&self, text: &str) -> f64 {
        let logo = self.logographic();
        let mut value = 0.0;
        for ch in text.chars() {
            if let Some(&digit) = logo.char_values.get(&ch) {
                value = value * 10.0 + digit;
            }
        }
        value
    }

    /// One fraction/percentage part: digit strings, decimals or numeral runs
    fn resolve_part(&self, text: &str) -> f64 {
        let logo = self.logographic();
        let half = logo.to_half_width(text);
        let has_digit = half.chars().any(|c| c.is_ascii_digit());
        let all_digital = half.chars().all(|c| {
            c.is_ascii_digit()
                || c == self.config.decimal_separator
                || c == self.config.group_separator
                || c == '-'
        });

        if has_digit && all_digital {
            digital_value(
                &half,
                1.0,
                self.config.decimal_separator,
                self.config.group_separator,
            )
        } else if logo.point_regex.is_match(&half) {
            self.parse_double(&half).unwrap_or(0.0)
        } else {
            self.get_int_value(&half)
        }
    }
}

impl SpanParser for CjkNumberParser {
    fn parse(&self, span: &TaggedSpan) -> Option<ParsedValue> {
        if !self.accepts(span.kind) {
            return None;
        }

        let subtype = match &span.payload {
            SpanPayload::Subtype(subtype) => *subtype,
            _ => {
                if self.config.looks_like_digits(&span.text) {
                    Subtype::Digits
                } else {
                    Subtype::Integer
                }
            }
        };

        let mut text = span.text.trim().to_string();
        if self.config.culture == Culture::Chinese {
            text = self.logographic().to_simplified(&text);
        }

        let (value, is_percent) = match subtype {
            Subtype::Percentage | Subtype::SpecialPercentage | Subtype::Digits
                if span.kind == SpanKind::Percentage =>
            {
                (self.parse_percentage(&text, subtype)?, true)
            }
            Subtype::Digits => (self.digit_number_parse(&text)?, false),
            Subtype::Power => {
                let half = self.logographic().to_half_width(&text);
                (
                    power_number_parse(&half, self.config.decimal_separator)?,
                    false,
                )
            }
            Subtype::Fraction | Subtype::WordFraction => (self.parse_fraction(&text)?, false),
            Subtype::Decimal => (self.parse_double(&text)?, false),
            Subtype::Integer | Subtype::Words => (self.parse_integer(&text)?, false),
            Subtype::Ordinal => (self.parse_ordinal(&text)?, false),
            Subtype::Percentage | Subtype::SpecialPercentage => {
                (self.parse_percentage(&text, subtype)?, true)
            }
        };

        let resolution = if is_percent {
            format!("{}%", self.config.render(value))
        } else {
            self.config.render(value)
        };
        Some(ParsedValue::number(span, value, resolution))
    }
}

fn strip_negative(logo: &LogographicConfig, text: &str) -> (bool, String) {
    match logo.negative_sign_regex.find(text) {
        Some(m) if m.start() == 0 => (true, text[m.end()..].to_string()),
        _ => (false, text.to_string()),
    }
}
