use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use imgserve_core::ChainConfig;
use imgserve_observe::LoggerConfig;

/// Process configuration, read from an optional JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub logger: LoggerConfig,
    pub chain: ChainConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            logger: LoggerConfig::default(),
            chain: ChainConfig {
                require_source: true,
                limit: Some(4),
            },
        }
    }
}

impl AgentConfig {
    /// Load from `path`, or use defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_gives_defaults() {
        let cfg = AgentConfig::load(None).unwrap();
        assert_eq!(cfg.chain.limit, Some(4));
        assert!(cfg.chain.require_source);
    }

    #[test]
    fn nested_sections_are_parsed() {
        let cfg = AgentConfig::parse(
            r#"{"logger": {"format": "json"}, "chain": {"limit": 1, "require_source": false}}"#,
        )
        .unwrap();

        assert_eq!(cfg.logger.format.to_string(), "json");
        assert_eq!(cfg.chain.limit, Some(1));
        assert!(!cfg.chain.require_source);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = AgentConfig::load(Some(Path::new("/nonexistent/imgserve.json"))).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
