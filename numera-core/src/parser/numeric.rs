//! Word/digit numeric parser
//!
//! Resolves tagged spans for alphabetic cultures: digit strings with round
//! words mixed in, spelled-out composites, fraction phrases and power
//! notation. Dispatch order follows the subtype priority: digits, word
//! fraction, word composite, power.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::config::NumberConfig;
use crate::parser::composite;
use crate::parser::SpanParser;
use crate::span::{ParsedValue, SpanKind, SpanPayload, Subtype, TaggedSpan};

/// Parser for cultures that write numbers with words and Arabic digits
#[derive(Debug, Clone)]
pub struct NumericParser {
    config: Arc<NumberConfig>,
    /// Kinds this instance accepts; `None` accepts everything
    supported: Option<Vec<SpanKind>>,
}

impl NumericParser {
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

    fn subtype_of(&self, span: &TaggedSpan) -> Subtype {
        match &span.payload {
            SpanPayload::Subtype(subtype) => *subtype,
            _ => {
                if self.config.looks_like_digits(&span.text) {
                    Subtype::Digits
                } else {
                    Subtype::Words
                }
            }
        }
    }

    fn dispatch(&self, subtype: Subtype, text: &str) -> Option<f64> {
        match subtype {
            Subtype::Digits | Subtype::Integer | Subtype::Decimal => self.digit_number_parse(text),
            Subtype::WordFraction | Subtype::Fraction => self.frac_like_number_parse(text),
            Subtype::Words | Subtype::Ordinal => self.text_number_parse(text),
            Subtype::Power => power_number_parse(text, self.config.decimal_separator),
            // Percentage subtypes only reach the decorator or the CJK parser
            Subtype::Percentage | Subtype::SpecialPercentage => None,
        }
    }

    /// Digit string with round-number words or magnitude suffixes mixed in
    /// ("2 hundred", "3,400 thousand", "2k"). Each occurrence multiplies an
    /// accumulating power and is excised before the digits resolve.
    fn digit_number_parse(&self, text: &str) -> Option<f64> {
        let mut power = 1.0;
        let mut working = text.trim().to_string();

        loop {
            let found = self.config.digital_number_regex.captures(&working).map(|caps| {
                if let Some(word) = caps.name("word") {
                    (word.as_str().to_lowercase(), None)
                } else {
                    let suffix = caps
                        .name("suffix")
                        .expect("digital-number pattern names word or suffix");
                    (suffix.as_str().to_lowercase(), Some(suffix.range()))
                }
            });
            let Some((token, suffix_range)) = found else {
                break;
            };

            let scale = self
                .config
                .round_value(&token)
                .unwrap_or_else(|| panic!("round word {token:?} missing from round-number map"));
            power *= scale as f64;

            match suffix_range {
                // Magnitude letter: excise just the suffix
                Some(range) => {
                    working.replace_range(range, "");
                }
                // Round word: excise every occurrence, trimming the
                // whitespace left hanging before it
                None => {
                    let needle = token;
                    let mut search_from = 0;
                    while let Some(pos) =
                        working[search_from..].find(&needle).map(|p| p + search_from)
                    {
                        let front = working[..pos].trim_end().to_string();
                        search_from = front.len();
                        working = front + &working[pos + needle.len()..];
                    }
                }
            }
        }

        if working.trim().is_empty() && power == 1.0 {
            return None;
        }
        Some(digital_value(
            working.trim(),
            power,
            self.config.decimal_separator,
            self.config.group_separator,
        ))
    }

    /// Fraction phrase: either a direct "numerator PREP denominator" match,
    /// or a mixed number isolated into integer, numerator and denominator
    /// parts at the configured separator tokens.
    fn frac_like_number_parse(&self, text: &str) -> Option<f64> {
        let config = &*self.config;
        let handle = text.trim().to_lowercase();

        if let Some(caps) = config.fraction_preposition_regex.captures(&handle) {
            let numerator = caps.name("numerator")?.as_str().trim();
            let denominator = caps.name("denominator")?.as_str().trim();
            let small = self.resolve_side(numerator);
            let big = self.resolve_side(denominator);
            return Some(small / big);
        }

        let words: Vec<&str> = handle.split_whitespace().collect();
        let mut frac_words = normalize_token_set(config, &words);
        if frac_words.is_empty() {
            return None;
        }

        if frac_words.len() == 1 {
            // "half", "quarter": unit fraction
            return Some(1.0 / composite::resolve_integer(config, &frac_words));
        }

        let split_index = locate_denominator(config, &frac_words);

        // Denominator tokens, hyphenated compounds re-split so the fold can
        // absorb them pairwise
        let mut frac_part: Vec<String> = Vec::new();
        for word in &frac_words[split_index..] {
            if let Some((head, tail)) = word.split_once('-') {
                frac_part.push(head.to_string());
                frac_part.push("-".to_string());
                frac_part.push(tail.to_string());
            } else {
                frac_part.push(word.clone());
            }
        }
        frac_words.truncate(split_index);

        let denominator = composite::resolve_integer(config, &frac_part);

        // Numerator: the run after the last fraction separator, if any
        let mut mixed_index = frac_words.len();
        let mut numerator = 0.0;
        for i in (0..frac_words.len()).rev() {
            if i < frac_words.len() - 1
                && config
                    .written_fraction_separators
                    .iter()
                    .any(|s| s == &frac_words[i])
            {
                let numer_str = frac_words[i + 1..].join(" ");
                numerator =
                    composite::resolve_integer(config, &config.tokenize_number_words(&numer_str));
                mixed_index = i + 1;
                break;
            }
        }

        if mixed_index != frac_words.len() {
            let int_str = frac_words[..mixed_index].join(" ");
            let integer =
                composite::resolve_integer(config, &config.tokenize_number_words(&int_str));
            // Precedence: a proper numerator attaches to the integer part;
            // an improper one divides the whole integer-plus-numerator sum
            if numerator < denominator {
                Some(integer + numerator / denominator)
            } else {
                Some((integer + numerator) / denominator)
            }
        } else {
            let int_str = frac_words.join(" ");
            let integer =
                composite::resolve_integer(config, &config.tokenize_number_words(&int_str));
            Some(integer / denominator)
        }
    }

    /// One side of a "numerator PREP denominator" phrase: digits or words
    fn resolve_side(&self, text: &str) -> f64 {
        if text.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            digital_value(
                text,
                1.0,
                self.config.decimal_separator,
                self.config.group_separator,
            )
        } else {
            composite::resolve_integer(&self.config, &self.config.tokenize_number_words(text))
        }
    }

    /// Spelled-out composite, split once at the decimal-separator word
    fn text_number_parse(&self, text: &str) -> Option<f64> {
        let config = &*self.config;
        let mut handle = text.trim().to_lowercase();

        if let (Some(regex), Some(replacement)) =
            (&config.half_a_dozen_regex, &config.half_a_dozen_text)
        {
            handle = regex.replace(&handle, replacement.as_str()).into_owned();
        }

        // Malformed phrases with several decimal words are not rejected;
        // only the first split point is honored
        let (int_part, point_part) = split_at_decimal_word(config, &handle);

        let int_tokens = config.tokenize_number_words(int_part);
        let point_tokens = point_part.map(|p| config.tokenize_number_words(p));

        if int_tokens.is_empty() && point_tokens.as_ref().map_or(true, |t| t.is_empty()) {
            return None;
        }

        // An empty integer part before the decimal word is an explicit zero
        let mut value = composite::resolve_integer(config, &int_tokens);
        if let Some(tokens) = point_tokens {
            value += composite::resolve_decimal_fraction(config, &tokens);
        }
        Some(value)
    }
}

impl SpanParser for NumericParser {
    fn parse(&self, span: &TaggedSpan) -> Option<ParsedValue> {
        if !self.accepts(span.kind) {
            return None;
        }

        let subtype = self.subtype_of(span);

        // Strip the sign before dispatch so every sub-algorithm sees
        // unsigned input; the original text is restored on output
        let lowered = span.text.to_lowercase();
        let sign_end = self
            .config
            .negative_sign_regex
            .find(&lowered)
            .filter(|m| m.start() == 0)
            .map(|m| m.end());
        let (negative, unsigned) = match sign_end {
            Some(end) => (true, lowered[end..].to_string()),
            None => (false, lowered),
        };

        let value = self.dispatch(subtype, &unsigned)?;
        let value = if negative { -value } else { value };
        Some(ParsedValue::number(span, value, self.config.render(value)))
    }
}

/// Split hyphenated words whose suffix is an ordinal ("twenty-fifths" →
/// "twenty", "fifths"); other compounds stay whole for the composite hook
fn normalize_token_set(config: &NumberConfig, words: &[&str]) -> Vec<String> {
    let mut out = Vec::with_capacity(words.len());
    for word in words {
        match word.split_once('-') {
            Some((head, tail)) if config.ordinal_map.contains_key(tail) => {
                out.push(head.to_string());
                out.push(tail.to_string());
            }
            _ => out.push(word.to_string()),
        }
    }
    out
}

/// Walk backwards from the final word to find where the denominator part of
/// a mixed number begins. Separator tokens are stepped over; a word stops
/// the walk when it can no longer compose into the denominator.
fn locate_denominator(config: &NumberConfig, frac_words: &[String]) -> usize {
    const SM_HUNDREDS: i64 = 100;

    let mut current = config.resolve_composite_word(&frac_words[frac_words.len() - 1]);
    let mut round_value: i64 = 1;

    let mut i = frac_words.len() as isize - 2;
    while i >= 0 {
        let word = frac_words[i as usize].as_str();
        if config
            .written_fraction_separators
            .iter()
            .chain(config.written_integer_separators.iter())
            .any(|s| s.as_str() == word)
        {
            i -= 1;
            continue;
        }

        let previous = current;
        current = config.resolve_composite_word(word);

        let extends = (previous >= SM_HUNDREDS && previous > current)
            || (previous < SM_HUNDREDS && is_composable(current, previous));
        if !extends {
            return (i + 1) as usize;
        }

        if previous < SM_HUNDREDS {
            if current >= round_value {
                round_value = current;
            } else {
                return (i + 1) as usize;
            }
        }

        if i == 0 {
            // The whole phrase composed; re-scan forward for the boundary
            // between a round integer part and the denominator
            let mut split = 1;
            while split <= frac_words.len() - 2 {
                if config.resolve_composite_word(&frac_words[split]) >= SM_HUNDREDS
                    && !config
                        .written_fraction_separators
                        .iter()
                        .any(|s| s == &frac_words[split + 1])
                    && config.resolve_composite_word(&frac_words[split + 1]) < SM_HUNDREDS
                {
                    return split + 1;
                }
                split += 1;
            }
            return split;
        }

        i -= 1;
    }

    (i + 1) as usize
}

/// Whether `big` can follow `small` inside one denominator ("thirty" after
/// "fifths", "hundred" after "thirty")
fn is_composable(big: i64, small: i64) -> bool {
    let base = if small > 10 { 100 } else { 10 };
    big % base == 0 && big / base >= 1
}

fn split_at_decimal_word<'a>(
    config: &NumberConfig,
    handle: &'a str,
) -> (&'a str, Option<&'a str>) {
    for separator in &config.written_decimal_separators {
        if let Some(pos) = handle.find(separator.as_str()) {
            let int_part = &handle[..pos];
            let point_part = &handle[pos + separator.len()..];
            return (int_part, Some(point_part));
        }
    }
    (handle, None)
}

/// Resolve a raw digit string: group separators skipped, one decimal mark,
/// `/` fractions with an optional space-separated integer part, a leading
/// minus. The result scales by `power`.
pub(crate) fn digital_value(
    digits: &str,
    power: f64,
    decimal_separator: char,
    group_separator: char,
) -> f64 {
    let mut temp = 0.0;
    let mut scale = 10.0;
    let mut dot = false;
    let mut negative = false;
    let is_frac = digits.contains('/');

    let mut stack: SmallVec<[f64; 4]> = SmallVec::new();

    for ch in digits.chars() {
        if !is_frac && (ch == group_separator || ch == ' ') {
            continue;
        }

        if ch == ' ' || ch == '/' {
            stack.push(temp);
            temp = 0.0;
        } else if ch.is_ascii_digit() {
            let digit = (ch as u8 - b'0') as f64;
            if dot {
                temp += scale * digit;
                scale *= 0.1;
            } else {
                temp = temp * scale + digit;
            }
        } else if ch == decimal_separator {
            dot = true;
            scale = 0.1;
        } else if ch == '-' {
            negative = true;
        }
    }
    stack.push(temp);

    let mut result = if is_frac {
        let denominator = stack.pop().unwrap_or(1.0);
        let numerator = stack.pop().unwrap_or(0.0);
        let mut value = numerator / denominator;
        if let Some(integer) = stack.pop() {
            value += integer;
        }
        value
    } else {
        stack.iter().sum()
    };

    result *= power;
    if negative {
        -result
    } else {
        result
    }
}

/// Two-value stack machine over power/exponential notation. Digits
/// accumulate into the running value, `+`/`-` toggle the sign, each
/// delimiter pushes and resets. Exactly two values must come out.
pub(crate) fn power_number_parse(text: &str, decimal_separator: char) -> Option<f64> {
    let mut temp = 0.0;
    let mut scale = 10.0;
    let mut dot = false;
    let mut negative = false;
    let caret = text.contains('^');

    let mut stack: SmallVec<[f64; 2]> = SmallVec::new();

    for ch in text.trim().chars() {
        match ch {
            '^' | 'e' | 'E' => {
                stack.push(if negative { -temp } else { temp });
                temp = 0.0;
                scale = 10.0;
                dot = false;
                negative = false;
            }
            '0'..='9' => {
                let digit = (ch as u8 - b'0') as f64;
                if dot {
                    temp += scale * digit;
                    scale *= 0.1;
                } else {
                    temp = temp * scale + digit;
                }
            }
            '-' => negative = !negative,
            '+' => {}
            _ if ch == decimal_separator => {
                dot = true;
                scale = 0.1;
            }
            _ => {}
        }
    }
    stack.push(if negative { -temp } else { temp });

    if stack.len() != 2 {
        return None;
    }
    let (base, exponent) = (stack[0], stack[1]);
    Some(if caret {
        base.powf(exponent)
    } else {
        base * 10f64.powf(exponent)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::get_culture_config;
    use crate::culture::Culture;

    fn parser() -> NumericParser {
        NumericParser::new(get_culture_config(Culture::English))
    }

    fn parse_value(parser: &NumericParser, text: &str, subtype: Subtype) -> f64 {
        let span = TaggedSpan::new(0, text, SpanKind::Cardinal).with_subtype(subtype);
        parser
            .parse(&span)
            .and_then(|r| r.number_value())
            .unwrap_or_else(|| panic!("{text:?} should resolve"))
    }

    #[test]
    fn test_digit_with_multiplier() {
        let p = parser();
        assert_eq!(parse_value(&p, "2 hundred", Subtype::Digits), 200.0);
        assert_eq!(parse_value(&p, "3,400 thousand", Subtype::Digits), 3_400_000.0);
        assert_eq!(parse_value(&p, "2k", Subtype::Digits), 2000.0);
    }

    #[test]
    fn test_word_composites() {
        let p = parser();
        assert_eq!(
            parse_value(&p, "nine hundred and ninety nine thousand, forty-two", Subtype::Words),
            999_042.0
        );
        assert_eq!(parse_value(&p, "twenty-one", Subtype::Words), 21.0);
    }

    #[test]
    fn test_decimal_words() {
        let p = parser();
        let value = parse_value(&p, "one point twenty-five", Subtype::Words);
        assert!((value - 1.25).abs() < 1e-12);
        let value = parse_value(&p, "point five", Subtype::Words);
        assert!((value - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_fractions() {
        let p = parser();
        assert_eq!(parse_value(&p, "three quarters", Subtype::WordFraction), 0.75);
        assert_eq!(parse_value(&p, "2 over 5", Subtype::WordFraction), 0.4);
        assert_eq!(parse_value(&p, "one and a half", Subtype::WordFraction), 1.5);
        assert_eq!(parse_value(&p, "three fifths", Subtype::WordFraction), 0.6);
    }

    #[test]
    fn test_improper_numerator_divides_whole_sum() {
        let p = parser();
        // Numerator ≥ denominator: the whole sum divides, not just the tail
        assert_eq!(parse_value(&p, "one and three halves", Subtype::WordFraction), 2.0);
    }

    #[test]
    fn test_negative_sign_transparency() {
        let p = parser();
        let plain = parse_value(&p, "twenty-one", Subtype::Words);
        let negated = parse_value(&p, "minus twenty-one", Subtype::Words);
        assert_eq!(negated, -plain);

        let span = TaggedSpan::new(0, "minus twenty-one", SpanKind::Cardinal)
            .with_subtype(Subtype::Words);
        let result = p.parse(&span).unwrap();
        assert_eq!(result.text, "minus twenty-one");
    }

    #[test]
    fn test_power_notation() {
        let p = parser();
        assert_eq!(parse_value(&p, "1.5E3", Subtype::Power), 1500.0);
        assert_eq!(parse_value(&p, "2^10", Subtype::Power), 1024.0);
        assert_eq!(parse_value(&p, "1e-2", Subtype::Power), 0.01);
    }

    #[test]
    fn test_half_a_dozen() {
        let p = parser();
        assert_eq!(parse_value(&p, "half a dozen", Subtype::Words), 6.0);
    }

    #[test]
    fn test_restriction_list() {
        let p = NumericParser::with_supported_kinds(
            get_culture_config(Culture::English),
            vec![SpanKind::Ordinal],
        );
        let span = TaggedSpan::new(0, "twenty", SpanKind::Cardinal).with_subtype(Subtype::Words);
        assert!(p.parse(&span).is_none());
    }

    #[test]
    fn test_digital_value_mixed_fraction() {
        assert_eq!(digital_value("3 1/2", 1.0, '.', ','), 3.5);
        assert_eq!(digital_value("1/4", 1.0, '.', ','), 0.25);
        assert_eq!(digital_value("1,234.5", 1.0, '.', ','), 1234.5);
    }
}
