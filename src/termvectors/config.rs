use serde::{Deserialize, Serialize};

use crate::error::{Result, TermVectorError};

/// Configuration of the term vector component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermVectorConfig {
    /// Name of the response section holding the term vectors.
    pub response_key: String,

    /// Whether the component runs when a request does not set `tv`.
    pub enabled_by_default: bool,
}

impl Default for TermVectorConfig {
    fn default() -> Self {
        Self {
            response_key: "termVectors".to_string(),
            enabled_by_default: false,
        }
    }
}

impl TermVectorConfig {
    /// Parse a configuration from JSON; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TermVectorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.response_key.trim().is_empty() {
            return Err(TermVectorError::invalid_config(
                "response_key must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TermVectorConfig::from_json("{}").unwrap();
        assert_eq!(config, TermVectorConfig::default());
        assert_eq!(config.response_key, "termVectors");
        assert!(!config.enabled_by_default);
    }

    #[test]
    fn test_partial_override() {
        let config = TermVectorConfig::from_json(r#"{"enabled_by_default": true}"#).unwrap();
        assert!(config.enabled_by_default);
        assert_eq!(config.response_key, "termVectors");
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            TermVectorConfig::from_json(r#"{"response_key": " "}"#),
            Err(TermVectorError::InvalidConfig(_))
        ));
        assert!(matches!(
            TermVectorConfig::from_json("not json"),
            Err(TermVectorError::Json(_))
        ));
    }
}
