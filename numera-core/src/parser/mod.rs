//! Span parsers and their factory
//!
//! One parser resolves word/digit cultures, a second resolves logographic
//! cultures, and two composites (percentage, range) build on them. The
//! factory picks the right implementation for a culture and restricts which
//! span kinds the instance accepts.

pub mod cjk;
pub mod composite;
pub mod numeric;
pub mod percentage;
pub mod range;

use std::sync::Arc;

use tracing::debug;

use crate::config::get_culture_config;
use crate::culture::Culture;
use crate::error::Result;
use crate::span::{ParsedValue, SpanKind, TaggedSpan};

pub use cjk::CjkNumberParser;
pub use numeric::NumericParser;
pub use percentage::PercentageParser;
pub use range::{DigitExtractor, NumberRangeParser, OrdinalWordExtractor};

/// A resolver from tagged spans to numeric values.
///
/// `None` means "not resolvable by this parser" — a normal outcome letting
/// several restricted parsers coexist over one extraction stream. Instances
/// hold no mutable state and are safe to share across threads.
pub trait SpanParser: Send + Sync {
    fn parse(&self, span: &TaggedSpan) -> Option<ParsedValue>;
}

/// Number category a caller asks the factory for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserTarget {
    Cardinal,
    Integer,
    Double,
    Fraction,
    Ordinal,
    Percentage,
    /// Any plain number kind
    Number,
    /// Interval phrases
    Range,
}

impl ParserTarget {
    /// Span kinds a parser built for this target accepts
    fn supported_kinds(&self) -> Option<Vec<SpanKind>> {
        match self {
            ParserTarget::Cardinal => Some(vec![
                SpanKind::Cardinal,
                SpanKind::Integer,
                SpanKind::Double,
            ]),
            ParserTarget::Integer => Some(vec![SpanKind::Integer]),
            ParserTarget::Double => Some(vec![SpanKind::Double]),
            ParserTarget::Fraction => Some(vec![SpanKind::Fraction]),
            ParserTarget::Ordinal => Some(vec![SpanKind::Ordinal]),
            ParserTarget::Percentage => Some(vec![SpanKind::Percentage]),
            ParserTarget::Number | ParserTarget::Range => None,
        }
    }
}

/// Builds the right parser for a culture and target
pub struct ParserFactory;

impl ParserFactory {
    /// Create a parser for the given target and culture.
    ///
    /// Logographic cultures get the character-level parser (which handles
    /// its percentage idioms itself); word cultures get the percentage
    /// decorator over the base parser. The range target wires the default
    /// extractors through the extraction seam.
    pub fn create(target: ParserTarget, culture: Culture) -> Result<Arc<dyn SpanParser>> {
        debug!(culture = culture.code(), requested = ?target, "building parser");

        if target == ParserTarget::Range {
            let config = get_culture_config(culture);
            let number_parser = Self::base_parser(culture, None);
            let range = NumberRangeParser::new(
                config.clone(),
                number_parser,
                Arc::new(DigitExtractor::new()),
                Arc::new(OrdinalWordExtractor::new(config)),
            )?;
            return Ok(Arc::new(range));
        }

        if target == ParserTarget::Percentage && !culture.is_logographic() {
            let config = get_culture_config(culture);
            let inner = Self::base_parser(culture, None);
            return Ok(Arc::new(PercentageParser::new(inner, config)));
        }

        Ok(Self::base_parser(culture, target.supported_kinds()))
    }

    fn base_parser(culture: Culture, kinds: Option<Vec<SpanKind>>) -> Arc<dyn SpanParser> {
        let config = get_culture_config(culture);
        if culture.is_logographic() {
            match kinds {
                Some(kinds) => Arc::new(CjkNumberParser::with_supported_kinds(config, kinds)),
                None => Arc::new(CjkNumberParser::new(config)),
            }
        } else {
            match kinds {
                Some(kinds) => Arc::new(NumericParser::with_supported_kinds(config, kinds)),
                None => Arc::new(NumericParser::new(config)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::{SpanPayload, Subtype};

    #[test]
    fn test_factory_selects_by_culture() {
        let span = TaggedSpan::new(0, "twenty one", SpanKind::Cardinal)
            .with_subtype(Subtype::Words);
        let parser = ParserFactory::create(ParserTarget::Cardinal, Culture::English).unwrap();
        assert_eq!(parser.parse(&span).unwrap().number_value(), Some(21.0));

        let span = TaggedSpan::new(0, "二十一", SpanKind::Integer)
            .with_subtype(Subtype::Integer);
        let parser = ParserFactory::create(ParserTarget::Number, Culture::Chinese).unwrap();
        assert_eq!(parser.parse(&span).unwrap().number_value(), Some(21.0));
    }

    #[test]
    fn test_factory_restricts_kinds() {
        let parser = ParserFactory::create(ParserTarget::Ordinal, Culture::English).unwrap();
        let span = TaggedSpan::new(0, "twenty", SpanKind::Cardinal).with_subtype(Subtype::Words);
        assert!(parser.parse(&span).is_none());

        let span = TaggedSpan::new(0, "twenty first", SpanKind::Ordinal)
            .with_subtype(Subtype::Words);
        assert_eq!(parser.parse(&span).unwrap().number_value(), Some(21.0));
    }

    #[test]
    fn test_factory_percentage_wrapping() {
        let parser = ParserFactory::create(ParserTarget::Percentage, Culture::English).unwrap();
        let span = TaggedSpan::new(0, "30%", SpanKind::Percentage).with_subtype(Subtype::Digits);
        let result = parser.parse(&span).unwrap();
        assert_eq!(result.resolution.as_deref(), Some("30%"));
    }

    #[test]
    fn test_factory_cjk_percentage_direct() {
        let parser = ParserFactory::create(ParserTarget::Percentage, Culture::Japanese).unwrap();
        let span = TaggedSpan::new(0, "七割", SpanKind::Percentage)
            .with_subtype(Subtype::SpecialPercentage);
        let result = parser.parse(&span).unwrap();
        assert_eq!(result.number_value(), Some(70.0));
        assert_eq!(result.resolution.as_deref(), Some("70%"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = ParserFactory::create(ParserTarget::Number, Culture::English).unwrap();
        let span = TaggedSpan::new(3, "one and a half", SpanKind::Fraction)
            .with_payload(SpanPayload::Subtype(Subtype::WordFraction));
        let first = parser.parse(&span).unwrap();
        let second = parser.parse(&span).unwrap();
        assert_eq!(first, second);
    }
}
