use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Open-set implementation used by the A* search.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FrontierStrategy {
    #[default]
    LinearScan,
    BinaryHeap,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GraphConfig {
    /// JSON document holding `nodes` and `edges` records.
    pub source_path: String,
    #[serde(default = "default_reload_queue_capacity")]
    pub reload_queue_capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NavigationConfig {
    #[serde(default)]
    pub frontier: FrontierStrategy,
    #[serde(default = "default_metrics_history")]
    pub metrics_history: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            frontier: FrontierStrategy::default(),
            metrics_history: default_metrics_history(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub graph: GraphConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
}

fn default_reload_queue_capacity() -> usize {
    16
}

fn default_metrics_history() -> usize {
    1024
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::with_prefix("WAYFIND").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// Load from an explicit file, still honouring environment overrides.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("WAYFIND").separator("__"))
            .build()?
            .try_deserialize()
    }
}
