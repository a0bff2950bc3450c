//! Percentage decorator
//!
//! Wraps a base number parser and combines the extraction stage's pre-split
//! sub-spans into one percentage value. Whatever shape comes in, the output
//! carries the original span's text and payload.

use std::sync::Arc;

use crate::config::NumberConfig;
use crate::parser::SpanParser;
use crate::span::{ParsedValue, SpanKind, SpanPayload, Subtype, TaggedSpan};

/// Decorator resolving percentage spans through a base parser
pub struct PercentageParser {
    inner: Arc<dyn SpanParser>,
    config: Arc<NumberConfig>,
}

impl PercentageParser {
    pub fn new(inner: Arc<dyn SpanParser>, config: Arc<NumberConfig>) -> Self {
        Self { inner, config }
    }

    fn percent_resolution(&self, value: f64) -> String {
        format!("{}%", self.config.render(value))
    }
}

impl SpanParser for PercentageParser {
    fn parse(&self, span: &TaggedSpan) -> Option<ParsedValue> {
        if span.kind != SpanKind::Percentage {
            return None;
        }

        match &span.payload {
            // Numerator and denominator sub-spans: synthesize a fraction
            // phrase with the configured marker and scale onto percent
            SpanPayload::Pair(numerator, denominator) => {
                let text = format!(
                    "{} {} {}",
                    numerator.text, self.config.fraction_marker, denominator.text
                );
                let fraction = TaggedSpan::new(span.start, text, SpanKind::Fraction)
                    .with_subtype(Subtype::WordFraction);
                let value = self.inner.parse(&fraction)?.number_value()? * 100.0;
                Some(ParsedValue::number(span, value, self.percent_resolution(value)))
            }

            // One sub-span with its own subtype: percent-scale only if the
            // sub-span was itself a fraction form
            SpanPayload::Single(sub) => {
                let mut value = self.inner.parse(sub)?.number_value()?;
                if matches!(
                    sub.payload,
                    SpanPayload::Subtype(Subtype::WordFraction | Subtype::Fraction)
                ) {
                    value *= 100.0;
                }
                Some(ParsedValue::number(span, value, self.percent_resolution(value)))
            }

            // No decomposition: delegate as-is; the rendering just needs to
            // end with a percent sign
            _ => {
                let inner = self.inner.parse(span)?;
                let value = inner.number_value()?;
                let resolution = match inner.resolution {
                    Some(r) if r.ends_with('%') => r,
                    _ => self.percent_resolution(value),
                };
                Some(ParsedValue::number(span, value, resolution))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::get_culture_config;
    use crate::culture::Culture;
    use crate::parser::numeric::NumericParser;

    fn parser() -> PercentageParser {
        let config = get_culture_config(Culture::English);
        PercentageParser::new(Arc::new(NumericParser::new(config.clone())), config)
    }

    #[test]
    fn test_pair_payload_scales_to_percent() {
        let p = parser();
        let numerator = TaggedSpan::new(0, "one", SpanKind::Cardinal).with_subtype(Subtype::Words);
        let denominator =
            TaggedSpan::new(0, "five", SpanKind::Cardinal).with_subtype(Subtype::Words);
        let span = TaggedSpan::new(0, "one in five", SpanKind::Percentage)
            .with_payload(SpanPayload::Pair(Box::new(numerator), Box::new(denominator)));

        let result = p.parse(&span).unwrap();
        assert_eq!(result.number_value(), Some(20.0));
        assert_eq!(result.resolution.as_deref(), Some("20%"));
        assert_eq!(result.text, "one in five");
    }

    #[test]
    fn test_single_fraction_payload_scales() {
        let p = parser();
        let sub = TaggedSpan::new(0, "three quarters", SpanKind::Fraction)
            .with_subtype(Subtype::WordFraction);
        let span = TaggedSpan::new(0, "three quarters", SpanKind::Percentage)
            .with_payload(SpanPayload::Single(Box::new(sub)));

        let result = p.parse(&span).unwrap();
        assert_eq!(result.number_value(), Some(75.0));
        assert_eq!(result.resolution.as_deref(), Some("75%"));
    }

    #[test]
    fn test_single_number_payload_keeps_scale() {
        let p = parser();
        let sub = TaggedSpan::new(0, "thirty", SpanKind::Cardinal).with_subtype(Subtype::Words);
        let span = TaggedSpan::new(0, "thirty percent", SpanKind::Percentage)
            .with_payload(SpanPayload::Single(Box::new(sub)));

        let result = p.parse(&span).unwrap();
        assert_eq!(result.number_value(), Some(30.0));
        assert_eq!(result.resolution.as_deref(), Some("30%"));
    }

    #[test]
    fn test_undecomposed_digit_percentage() {
        let p = parser();
        let span =
            TaggedSpan::new(0, "30%", SpanKind::Percentage).with_subtype(Subtype::Digits);
        let result = p.parse(&span).unwrap();
        assert_eq!(result.number_value(), Some(30.0));
        assert_eq!(result.resolution.as_deref(), Some("30%"));
    }

    #[test]
    fn test_non_percentage_kind_rejected() {
        let p = parser();
        let span = TaggedSpan::new(0, "thirty", SpanKind::Cardinal).with_subtype(Subtype::Words);
        assert!(p.parse(&span).is_none());
    }
}
