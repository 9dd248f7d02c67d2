use crate::config::EngineConfig;
use crate::ConfigError;

/// Validates the engine configuration
pub fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    if config.min_word_len < 1 {
        return Err(ConfigError::Validation(
            "min_word_len must be >= 1".to_string(),
        ));
    }

    if config.top_words < 1 {
        return Err(ConfigError::Validation(
            "top_words must be >= 1".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&EngineConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = EngineConfig {
            concurrency: 0,
            ..EngineConfig::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_excessive_concurrency_rejected() {
        let config = EngineConfig {
            concurrency: 101,
            ..EngineConfig::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_min_word_len_rejected() {
        let config = EngineConfig {
            min_word_len: 0,
            ..EngineConfig::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_top_words_rejected() {
        let config = EngineConfig {
            top_words: 0,
            ..EngineConfig::default()
        };
        assert!(validate(&config).is_err());
    }
}
