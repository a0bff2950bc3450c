//! Per-culture configuration: raw data schema, embedded bundles, and the
//! compiled runtime form consumed by the parsers

mod loader;
mod runtime;
mod types;

pub use loader::{get_culture_config, list_available_cultures};
pub use runtime::{LogographicConfig, NumberConfig, RangeConfig};
pub use types::{
    CultureData, LogographicData, LogographicPatterns, LogographicSets, MetadataData,
    PatternData, RangeData, SeparatorData, SpecialPercentData,
};
