//! Number-range parser
//!
//! Composes two parsed numbers, or one number plus a comparison phrasing,
//! into an interval with bracket notation. The embedded numbers come from
//! the extraction seam; a primary extractor is tried first and an ordinal
//! extractor backs it up.

use std::sync::Arc;

use regex::Regex;

use crate::config::NumberConfig;
use crate::error::{NumeraError, Result};
use crate::parser::SpanParser;
use crate::span::{
    ParsedValue, RangeKind, ResolvedValue, SpanExtractor, SpanKind, SpanPayload, Subtype,
    TaggedSpan,
};

/// Parser for interval phrases ("between 20 and 30", "at least 20")
pub struct NumberRangeParser {
    config: Arc<NumberConfig>,
    number_parser: Arc<dyn SpanParser>,
    number_extractor: Arc<dyn SpanExtractor>,
    ordinal_extractor: Arc<dyn SpanExtractor>,
}

impl NumberRangeParser {
    pub fn new(
        config: Arc<NumberConfig>,
        number_parser: Arc<dyn SpanParser>,
        number_extractor: Arc<dyn SpanExtractor>,
        ordinal_extractor: Arc<dyn SpanExtractor>,
    ) -> Result<Self> {
        if config.range.is_none() {
            return Err(NumeraError::UnsupportedTarget {
                target: "Range".to_string(),
                culture: config.culture.code().to_string(),
            });
        }
        Ok(Self {
            config,
            number_parser,
            number_extractor,
            ordinal_extractor,
        })
    }

    /// Extract the expected number of embedded numeric spans, falling back
    /// from the primary to the ordinal extractor
    fn extract_numbers(&self, text: &str, expected: usize) -> Option<Vec<TaggedSpan>> {
        let spans = self.number_extractor.extract(text);
        if spans.len() == expected {
            return Some(spans);
        }
        let spans = self.ordinal_extractor.extract(text);
        (spans.len() == expected).then_some(spans)
    }

    fn parse_embedded(&self, spans: &[TaggedSpan]) -> Option<Vec<f64>> {
        let values: Vec<f64> = spans
            .iter()
            .filter_map(|span| self.number_parser.parse(span)?.number_value())
            .collect();
        (values.len() == spans.len()).then_some(values)
    }
}

impl SpanParser for NumberRangeParser {
    fn parse(&self, span: &TaggedSpan) -> Option<ParsedValue> {
        if span.kind != SpanKind::NumberRange {
            return None;
        }
        let kind = match &span.payload {
            SpanPayload::Range(kind) => *kind,
            _ => return None,
        };
        let rules = self
            .config
            .range
            .as_ref()
            .expect("construction requires range rules");

        let expected = match kind {
            RangeKind::Between | RangeKind::Till => 2,
            RangeKind::More | RangeKind::Less | RangeKind::Single => 1,
        };

        // A miscounted extraction is "nothing resolvable", not a failure of
        // the whole pipeline
        let Some(values) = self
            .extract_numbers(&span.text, expected)
            .and_then(|spans| self.parse_embedded(&spans))
        else {
            return Some(ParsedValue::unresolved(span));
        };

        let (start, end, open_bracket, close_bracket) = match kind {
            RangeKind::Between => {
                let (low, high) = ordered(values[0], values[1]);
                (Some(low), Some(high), '(', ')')
            }
            RangeKind::Till => {
                let (low, high) = ordered(values[0], values[1]);
                (Some(low), Some(high), '[', ')')
            }
            RangeKind::More => {
                let open = if rules.includes_equal_more(&span.text) {
                    '['
                } else {
                    '('
                };
                (Some(values[0]), None, open, ')')
            }
            RangeKind::Less => {
                let close = if rules.includes_equal_less(&span.text) {
                    ']'
                } else {
                    ')'
                };
                (None, Some(values[0]), '(', close)
            }
            RangeKind::Single => (Some(values[0]), Some(values[0]), '[', ']'),
        };

        let start_str = start.map(|v| self.config.render(v)).unwrap_or_default();
        let end_str = end.map(|v| self.config.render(v)).unwrap_or_default();
        let resolution = format!("{open_bracket}{start_str},{end_str}{close_bracket}");

        Some(ParsedValue {
            start: span.start,
            length: span.length,
            text: span.text.clone(),
            kind: span.kind,
            payload: span.payload.clone(),
            value: Some(ResolvedValue::Interval { start, end }),
            resolution: Some(resolution),
        })
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Minimal digit-sequence extractor: the default wiring for the range
/// parser and the test suite. Full extraction is a collaborator behind the
/// `SpanExtractor` seam.
pub struct DigitExtractor {
    pattern: Regex,
}

impl DigitExtractor {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"\d+(?:[.,]\d+)*").expect("digit pattern is valid"),
        }
    }
}

impl Default for DigitExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SpanExtractor for DigitExtractor {
    fn extract(&self, text: &str) -> Vec<TaggedSpan> {
        self.pattern
            .find_iter(text)
            .map(|m| {
                TaggedSpan::new(m.start(), m.as_str(), SpanKind::Integer)
                    .with_subtype(Subtype::Digits)
            })
            .collect()
    }
}

/// Ordinal-word extractor used as the range parser's fallback
pub struct OrdinalWordExtractor {
    config: Arc<NumberConfig>,
}

impl OrdinalWordExtractor {
    pub fn new(config: Arc<NumberConfig>) -> Self {
        Self { config }
    }
}

impl SpanExtractor for OrdinalWordExtractor {
    fn extract(&self, text: &str) -> Vec<TaggedSpan> {
        self.config
            .text_number_regex
            .find_iter(text)
            .filter(|m| self.config.ordinal_map.contains_key(&m.as_str().to_lowercase()))
            .map(|m| {
                TaggedSpan::new(m.start(), m.as_str(), SpanKind::Ordinal)
                    .with_subtype(Subtype::Words)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::get_culture_config;
    use crate::culture::Culture;
    use crate::parser::numeric::NumericParser;

    fn parser() -> NumberRangeParser {
        let config = get_culture_config(Culture::English);
        NumberRangeParser::new(
            config.clone(),
            Arc::new(NumericParser::new(config.clone())),
            Arc::new(DigitExtractor::new()),
            Arc::new(OrdinalWordExtractor::new(config)),
        )
        .unwrap()
    }

    fn range_span(text: &str, kind: RangeKind) -> TaggedSpan {
        TaggedSpan::new(0, text, SpanKind::NumberRange).with_payload(SpanPayload::Range(kind))
    }

    #[test]
    fn test_between_is_open_open() {
        let result = parser()
            .parse(&range_span("between 20 and 30", RangeKind::Between))
            .unwrap();
        assert_eq!(result.resolution.as_deref(), Some("(20,30)"));
        assert_eq!(
            result.value,
            Some(ResolvedValue::Interval {
                start: Some(20.0),
                end: Some(30.0)
            })
        );
    }

    #[test]
    fn test_till_is_closed_open() {
        let result = parser()
            .parse(&range_span("20 to 30", RangeKind::Till))
            .unwrap();
        assert_eq!(result.resolution.as_deref(), Some("[20,30)"));
    }

    #[test]
    fn test_out_of_order_bounds_are_sorted() {
        let result = parser()
            .parse(&range_span("between 30 and 20", RangeKind::Between))
            .unwrap();
        assert_eq!(result.resolution.as_deref(), Some("(20,30)"));
    }

    #[test]
    fn test_at_least_is_left_closed() {
        let result = parser()
            .parse(&range_span("at least 20", RangeKind::More))
            .unwrap();
        assert_eq!(result.resolution.as_deref(), Some("[20,)"));
        assert_eq!(
            result.value,
            Some(ResolvedValue::Interval {
                start: Some(20.0),
                end: None
            })
        );
    }

    #[test]
    fn test_more_than_is_left_open() {
        let result = parser()
            .parse(&range_span("more than 20", RangeKind::More))
            .unwrap();
        assert_eq!(result.resolution.as_deref(), Some("(20,)"));
    }

    #[test]
    fn test_no_more_than_is_right_closed() {
        let result = parser()
            .parse(&range_span("no more than 30", RangeKind::Less))
            .unwrap();
        assert_eq!(result.resolution.as_deref(), Some("(,30]"));
    }

    #[test]
    fn test_single_number_degenerate_interval() {
        let result = parser().parse(&range_span("20", RangeKind::Single)).unwrap();
        assert_eq!(result.resolution.as_deref(), Some("[20,20]"));
    }

    #[test]
    fn test_miscounted_extraction_resolves_to_nothing() {
        let result = parser()
            .parse(&range_span("between one and the other", RangeKind::Between))
            .unwrap();
        assert!(result.value.is_none());
        assert!(result.resolution.is_none());
    }
}
