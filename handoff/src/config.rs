use serde::{Deserialize, Serialize};

/// Parameters of a single producer/consumer run.
///
/// Immutable once built. Constructed either from a toml file via
/// [`RunConfig::load`] or programmatically via [`RunConfig::builder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_capacity")]
    capacity: usize,

    #[serde(default = "default_items")]
    items: u64,

    #[serde(default = "default_value_bound")]
    value_bound: i32,
}

fn default_capacity() -> usize {
    10
}

fn default_items() -> u64 {
    20
}

fn default_value_bound() -> i32 {
    100
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            capacity: default_capacity(),
            items: default_items(),
            value_bound: default_value_bound(),
        }
    }
}

impl RunConfig {
    pub fn load(path: &str) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RunConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Start building a config from the required parameters.
    pub fn builder(capacity: usize, items: u64) -> RunConfigBuilder {
        RunConfigBuilder {
            capacity,
            items,
            value_bound: default_value_bound(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn items(&self) -> u64 {
        self.items
    }

    pub fn value_bound(&self) -> i32 {
        self.value_bound
    }
}

pub struct RunConfigBuilder {
    capacity: usize,
    items: u64,
    value_bound: i32,
}

impl RunConfigBuilder {
    /// Produced values are drawn from `[0, bound)`.
    pub fn value_bound(mut self, bound: i32) -> Self {
        self.value_bound = bound;
        self
    }

    pub fn build(self) -> RunConfig {
        RunConfig {
            capacity: self.capacity,
            items: self.items,
            value_bound: self.value_bound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use std::fs;
    use tempfile::TempDir;

    #[rstest]
    fn test_defaults_match_reference_run() {
        let config = RunConfig::default();
        assert_eq!(config.capacity(), 10);
        assert_eq!(config.items(), 20);
        assert_eq!(config.value_bound(), 100);
    }

    #[rstest]
    fn test_builder_required_and_optional() {
        let config = RunConfig::builder(4, 8).build();
        assert_eq!(config.capacity(), 4);
        assert_eq!(config.items(), 8);
        assert_eq!(config.value_bound(), 100);

        let config = RunConfig::builder(4, 8).value_bound(500).build();
        assert_eq!(config.value_bound(), 500);
    }

    #[rstest]
    fn test_load_partial_file_uses_defaults() -> eyre::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("run.toml");
        fs::write(&config_path, "capacity = 3\n")?;

        let config = RunConfig::load(config_path.to_str().unwrap())?;
        assert_eq!(config.capacity(), 3);
        assert_eq!(config.items(), 20);
        assert_eq!(config.value_bound(), 100);
        Ok(())
    }

    #[rstest]
    fn test_load_full_file() -> eyre::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("run.toml");
        fs::write(
            &config_path,
            "capacity = 5\nitems = 40\nvalue_bound = 1000\n",
        )?;

        let config = RunConfig::load(config_path.to_str().unwrap())?;
        assert_eq!(
            config,
            RunConfig::builder(5, 40).value_bound(1000).build()
        );
        Ok(())
    }

    #[rstest]
    fn test_load_missing_file_is_error() {
        assert!(RunConfig::load("/nonexistent/run.toml").is_err());
    }
}
