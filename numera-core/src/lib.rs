//! Numeric resolution engine for natural-language quantities
//!
//! This crate resolves already-extracted text spans — digits, spelled-out
//! cardinals and ordinals, fractions, percentages, scientific notation and
//! CJK numeral strings — to exact numeric values plus a culture-formatted
//! rendering.
//!
//! # Architecture
//!
//! - **Configuration layer**: per-culture TOML data bundles (word and
//!   character maps, separator tokens, patterns) embedded at build time and
//!   compiled once into immutable runtime tables.
//! - **Parsers**: a word/digit parser for alphabetic cultures and a
//!   character-level parser for logographic cultures, plus percentage and
//!   range composites over them.
//! - **Factory**: picks the parser implementation by culture and restricts
//!   the span kinds an instance accepts.
//!
//! Parsing is synchronous and purely functional over immutable inputs;
//! parser instances are cheap to clone and safe to share across threads.
//!
//! # Example
//!
//! ```rust
//! use numera_core::{Culture, ParserFactory, ParserTarget, SpanKind, Subtype, TaggedSpan};
//!
//! let parser = ParserFactory::create(ParserTarget::Number, Culture::English).unwrap();
//!
//! let span = TaggedSpan::new(0, "nine hundred and ninety nine", SpanKind::Cardinal)
//!     .with_subtype(Subtype::Words);
//! let result = parser.parse(&span).unwrap();
//!
//! assert_eq!(result.number_value(), Some(999.0));
//! assert_eq!(result.resolution.as_deref(), Some("999"));
//! ```

pub mod config;
pub mod culture;
pub mod error;
pub mod format;
pub mod parser;
pub mod span;

pub use config::{get_culture_config, list_available_cultures, NumberConfig};
pub use culture::Culture;
pub use error::{NumeraError, Result};
pub use parser::{
    CjkNumberParser, NumberRangeParser, NumericParser, ParserFactory, ParserTarget,
    PercentageParser, SpanParser,
};
pub use span::{
    ParsedValue, RangeKind, ResolvedValue, SpanExtractor, SpanKind, SpanPayload, Subtype,
    TaggedSpan,
};
