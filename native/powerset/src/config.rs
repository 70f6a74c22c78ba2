//! Knobs for a determinization run.

use serde::{Deserialize, Serialize};

/// Configuration shared by the batch and incremental engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeterminizeConfig {
    /// Upper bound on the number of distinct state sets a run may discover.
    /// `None` lets the construction grow without limit.
    pub max_subsets: Option<usize>,
    /// Label every target state with the source states it stands for.
    pub label_states: bool,
}

impl Default for DeterminizeConfig {
    fn default() -> Self {
        Self {
            max_subsets: None,
            label_states: true,
        }
    }
}

impl DeterminizeConfig {
    pub fn with_max_subsets(mut self, limit: usize) -> Self {
        self.max_subsets = Some(limit);
        self
    }

    pub fn with_labels(mut self, label_states: bool) -> Self {
        self.label_states = label_states;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeterminizeConfig::default();
        assert_eq!(config.max_subsets, None);
        assert!(config.label_states);
    }

    #[test]
    fn test_builder_setters() {
        let config = DeterminizeConfig::default()
            .with_max_subsets(64)
            .with_labels(false);
        assert_eq!(config.max_subsets, Some(64));
        assert!(!config.label_states);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DeterminizeConfig = serde_json::from_str(r#"{"max_subsets": 8}"#).unwrap();
        assert_eq!(config.max_subsets, Some(8));
        assert!(config.label_states);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let parsed = serde_json::from_str::<DeterminizeConfig>(r#"{"max_states": 8}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = DeterminizeConfig::default().with_max_subsets(3);
        let text = serde_json::to_string(&config).unwrap();
        let back: DeterminizeConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
