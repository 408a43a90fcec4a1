//! Book configuration

use serde::Deserialize;

use crate::error::BookError;

/// How the predicates registered for one classifier type are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierMode {
    /// An account matches when every predicate accepts it
    #[default]
    All,
    /// Only the most recently registered predicate decides
    LastWins,
}

/// Book configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Combination rule for classifier predicates
    pub classifier_mode: ClassifierMode,
}

impl BookConfig {
    /// Loads configuration from environment
    ///
    /// Variables use the `BOOK` prefix, e.g. `BOOK_CLASSIFIER_MODE=last_wins`.
    pub fn from_env() -> Result<Self, BookError> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("BOOK"))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    pub fn with_classifier_mode(mut self, mode: ClassifierMode) -> Self {
        self.classifier_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_all() {
        assert_eq!(BookConfig::default().classifier_mode, ClassifierMode::All);
    }

    #[test]
    fn test_mode_deserializes_from_snake_case() {
        let config: BookConfig = config::Config::builder()
            .set_override("classifier_mode", "last_wins")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.classifier_mode, ClassifierMode::LastWins);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config: BookConfig = config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.classifier_mode, ClassifierMode::All);
    }
}
