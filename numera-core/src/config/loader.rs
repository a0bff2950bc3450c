//! Embedded culture bundles and their memoized runtime forms

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use super::runtime::NumberConfig;
use super::types::CultureData;
use crate::culture::Culture;
use crate::error::{NumeraError, Result};

static CULTURE_CONFIGS: OnceLock<HashMap<Culture, Arc<NumberConfig>>> = OnceLock::new();

macro_rules! embed_culture_config {
    ($culture:expr, $path:expr) => {
        ($culture, include_str!($path))
    };
}

fn load_embedded_configs() -> Result<HashMap<Culture, Arc<NumberConfig>>> {
    let embedded = [
        embed_culture_config!(Culture::English, "../../configs/cultures/english.toml"),
        embed_culture_config!(Culture::Spanish, "../../configs/cultures/spanish.toml"),
        embed_culture_config!(Culture::Chinese, "../../configs/cultures/chinese.toml"),
        embed_culture_config!(Culture::Japanese, "../../configs/cultures/japanese.toml"),
    ];

    let mut configs = HashMap::new();
    for (culture, toml_content) in embedded {
        let data: CultureData = toml::from_str(toml_content).map_err(|e| {
            NumeraError::Configuration(format!("Failed to parse {} config: {e}", culture.code()))
        })?;

        if data.metadata.code != culture.code() {
            return Err(NumeraError::Configuration(format!(
                "Config code mismatch: expected {}, got {}",
                culture.code(),
                data.metadata.code
            )));
        }

        let compiled = NumberConfig::from_data(culture, &data)?;
        debug!(culture = culture.code(), "compiled culture configuration");
        configs.insert(culture, Arc::new(compiled));
    }

    Ok(configs)
}

fn configs() -> &'static HashMap<Culture, Arc<NumberConfig>> {
    CULTURE_CONFIGS
        .get_or_init(|| load_embedded_configs().expect("Failed to load embedded culture configs"))
}

/// Get the compiled configuration for a culture.
///
/// Configurations are built once per process and shared read-only.
pub fn get_culture_config(culture: Culture) -> Arc<NumberConfig> {
    configs()
        .get(&culture)
        .cloned()
        .expect("every Culture variant has an embedded config")
}

/// Codes of every culture with an embedded configuration
pub fn list_available_cultures() -> Vec<&'static str> {
    let mut codes: Vec<_> = configs().keys().map(|c| c.code()).collect();
    codes.sort_unstable();
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_culture_config_english() {
        let config = get_culture_config(Culture::English);
        assert_eq!(config.culture, Culture::English);
        assert!(!config.cardinal_map.is_empty());
        assert!(config.logographic.is_none());
    }

    #[test]
    fn test_get_culture_config_logographic() {
        for culture in [Culture::Chinese, Culture::Japanese] {
            let config = get_culture_config(culture);
            let logo = config
                .logographic
                .as_ref()
                .expect("CJK cultures carry character maps");
            assert!(!logo.char_values.is_empty());
            assert!(!logo.round_units.is_empty());
        }
    }

    #[test]
    fn test_list_available_cultures() {
        let cultures = list_available_cultures();
        assert_eq!(cultures, vec!["en", "es", "ja", "zh"]);
    }

    #[test]
    fn test_configs_are_shared() {
        let a = get_culture_config(Culture::English);
        let b = get_culture_config(Culture::English);
        assert!(Arc::ptr_eq(&a, &b));
    }
}
