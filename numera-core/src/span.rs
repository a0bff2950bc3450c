//! Span and result types exchanged with the extraction stage

/// Entity category attached to a span by the extraction stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// A whole or spelled-out number without further qualification
    Cardinal,
    /// An integer quantity
    Integer,
    /// A decimal quantity
    Double,
    /// A fraction phrase
    Fraction,
    /// An ordinal ("third", 第三)
    Ordinal,
    /// A percentage phrase
    Percentage,
    /// A numeric interval ("between 20 and 30")
    NumberRange,
}

/// Sub-algorithm selector attached to a span by the extraction stage.
///
/// Match arms in the parsers preserve the dispatch priority:
/// digits, word fraction, word composite, power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subtype {
    /// Plain digit sequence, possibly with round-number words or magnitude
    /// suffixes mixed in ("3,400 thousand", "2k")
    Digits,
    /// Spelled-out cardinal/ordinal composite ("nine hundred and ninety nine")
    Words,
    /// Fraction phrase over words or digits ("three quarters", "2 over 5")
    WordFraction,
    /// Exponential or caret notation ("1.5E3", "2^10")
    Power,
    /// Logographic fraction (五分之二, 三分の一)
    Fraction,
    /// Logographic decimal (一点五)
    Decimal,
    /// Logographic integer (一千二百三十四)
    Integer,
    /// Logographic ordinal (第三)
    Ordinal,
    /// Percentage phrase (百分之三十, 三十パーセント, "30%")
    Percentage,
    /// Idiomatic percentage form (半額, 七割半, 七割八分九厘)
    SpecialPercentage,
}

/// Interval side markers for number-range spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeKind {
    /// "between X and Y" phrasing, open on both sides
    Between,
    /// "X to Y" / "X~Y" phrasing, closed start, open end
    Till,
    /// "more than X" / "at least X" phrasing, right-unbounded
    More,
    /// "less than X" / "up to X" phrasing, left-unbounded
    Less,
    /// A bare number treated as a degenerate interval
    Single,
}

/// Parser payload carried in a span's `data` slot.
///
/// The extraction stage decomposes percentage phrases into sub-spans ahead of
/// time; the decorator reassembles them and restores the original span fields
/// on output.
#[derive(Debug, Clone, PartialEq)]
pub enum SpanPayload {
    /// No extra information; the parser infers the subtype from the text
    None,
    /// Direct sub-algorithm selector
    Subtype(Subtype),
    /// One pre-extracted numeric sub-span (percentage with a number part)
    Single(Box<TaggedSpan>),
    /// Numerator and denominator sub-spans (percentage over a fraction)
    Pair(Box<TaggedSpan>, Box<TaggedSpan>),
    /// Interval phrasing marker for number-range spans
    Range(RangeKind),
}

/// A located, typed substring produced by extraction and consumed by parsing.
///
/// `start`/`length` index into the original source text; parsers treat `text`
/// as authoritative and never re-read source text.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedSpan {
    pub start: usize,
    pub length: usize,
    pub text: String,
    pub kind: SpanKind,
    pub payload: SpanPayload,
}

impl TaggedSpan {
    /// Create a span covering `text` at the given offset
    pub fn new(start: usize, text: impl Into<String>, kind: SpanKind) -> Self {
        let text = text.into();
        Self {
            start,
            length: text.chars().count(),
            text,
            kind,
            payload: SpanPayload::None,
        }
    }

    /// Attach a sub-algorithm selector
    pub fn with_subtype(self, subtype: Subtype) -> Self {
        self.with_payload(SpanPayload::Subtype(subtype))
    }

    /// Replace the payload, returning a new span
    pub fn with_payload(mut self, payload: SpanPayload) -> Self {
        self.payload = payload;
        self
    }

    /// Replace the text, returning a new span; offsets are kept as-is since
    /// they always refer to the original source
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// A resolved numeric value
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    /// A single number
    Number(f64),
    /// An interval; an absent side is unbounded
    Interval {
        start: Option<f64>,
        end: Option<f64>,
    },
}

impl ResolvedValue {
    /// The scalar value, if this is a plain number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ResolvedValue::Number(v) => Some(*v),
            ResolvedValue::Interval { .. } => None,
        }
    }
}

/// Parse output: the input span plus the resolved value and its rendering.
///
/// `value == None` means "not resolvable by this parser" and must propagate
/// as a no-op; whenever `value` is set, `resolution` holds its fully
/// culture-formatted rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedValue {
    pub start: usize,
    pub length: usize,
    pub text: String,
    pub kind: SpanKind,
    pub payload: SpanPayload,
    pub value: Option<ResolvedValue>,
    pub resolution: Option<String>,
}

impl ParsedValue {
    /// A result that carries the span through unresolved
    pub fn unresolved(span: &TaggedSpan) -> Self {
        Self {
            start: span.start,
            length: span.length,
            text: span.text.clone(),
            kind: span.kind,
            payload: span.payload.clone(),
            value: None,
            resolution: None,
        }
    }

    /// A resolved scalar result for `span`
    pub fn number(span: &TaggedSpan, value: f64, resolution: String) -> Self {
        Self {
            start: span.start,
            length: span.length,
            text: span.text.clone(),
            kind: span.kind,
            payload: span.payload.clone(),
            value: Some(ResolvedValue::Number(value)),
            resolution: Some(resolution),
        }
    }

    /// The scalar value, if resolved to one
    pub fn number_value(&self) -> Option<f64> {
        self.value.as_ref().and_then(ResolvedValue::as_number)
    }
}

/// Boundary with the extraction stage: anything that scans raw text and
/// yields candidate numeric spans. The range parser consumes one primary and
/// one fallback extractor through this seam.
pub trait SpanExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Vec<TaggedSpan>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_functional_update() {
        let span = TaggedSpan::new(3, "twenty", SpanKind::Cardinal);
        let updated = span.clone().with_text("minus twenty");
        assert_eq!(span.text, "twenty");
        assert_eq!(updated.text, "minus twenty");
        assert_eq!(updated.start, 3);
    }

    #[test]
    fn test_unresolved_has_no_resolution() {
        let span = TaggedSpan::new(0, "foo", SpanKind::Cardinal);
        let result = ParsedValue::unresolved(&span);
        assert!(result.value.is_none());
        assert!(result.resolution.is_none());
    }
}
