//! Configuration loading and typed config structures for a Horde run.
//!
//! The canonical configuration lives in `horde-config.yaml` at the project
//! root. Every section and field is optional; anything left out falls back
//! to the defaults below, so an empty file is a valid configuration.

use std::path::Path;

use horde_agents::BehaviorConfig;
use horde_world::IntegrationSettings;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level run configuration.
///
/// Mirrors the structure of `horde-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World layout, timing, and command integration.
    #[serde(default)]
    pub world: WorldConfig,

    /// Decision thresholds and strengths.
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Initial population.
    #[serde(default)]
    pub scenario: ScenarioConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// World layout and timing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Random seed for the scenario layout.
    pub seed: u64,

    /// Real-time milliseconds to sleep between ticks. Zero runs flat out.
    pub tick_interval_ms: u64,

    /// Simulated seconds per tick.
    pub dt_secs: f64,

    /// Stop after this many ticks. Zero means unbounded.
    pub max_ticks: u64,

    /// Number of block columns.
    pub blocks_x: u32,

    /// Number of block rows.
    pub blocks_y: u32,

    /// Side length of one square block.
    pub block_size: f32,

    /// Command integration parameters.
    pub integration: IntegrationSettings,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_interval_ms: 100,
            dt_secs: 0.1,
            max_ticks: 600,
            blocks_x: 4,
            blocks_y: 4,
            block_size: 20.0,
            integration: IntegrationSettings::default(),
        }
    }
}

/// Initial population.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Survivors to spawn.
    pub survivors: u32,

    /// Zombies to spawn.
    pub zombies: u32,

    /// Resource piles to scatter.
    pub resource_piles: u32,

    /// Units per resource pile.
    pub pile_units: u32,

    /// Starting survivor health.
    pub survivor_health: f32,

    /// Starting zombie health.
    pub zombie_health: f32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            survivors: 12,
            zombies: 8,
            resource_piles: 10,
            pile_units: 6,
            survivor_health: 100.0,
            zombie_health: 60.0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is unset.
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.world.seed, 42);
        assert_eq!(config.world.blocks_x, 4);
        assert_eq!(config.scenario.survivors, 12);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.behavior, BehaviorConfig::default());
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(SimulationConfig::parse("").unwrap(), SimulationConfig::default());
        assert_eq!(
            SimulationConfig::parse("  \n").unwrap(),
            SimulationConfig::default()
        );
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
world:
  seed: 7
  tick_interval_ms: 0
  dt_secs: 0.25
  max_ticks: 50
  blocks_x: 2
  blocks_y: 3
  block_size: 15.0
  integration:
    max_speed: 2.0
    attack_damage: 25.0

behavior:
  perception_radius: 12.0
  barricade_threshold: 4
  mob_ratio: 0.5

scenario:
  survivors: 3
  zombies: 1
  resource_piles: 2
  pile_units: 9

logging:
  level: debug
  json: true
";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.max_ticks, 50);
        assert_eq!(config.world.blocks_y, 3);
        assert!((config.world.integration.max_speed - 2.0).abs() < f32::EPSILON);
        // Unlisted integration fields keep their defaults.
        assert_eq!(
            config.world.integration.enclose_threshold,
            IntegrationSettings::default().enclose_threshold
        );
        assert!((config.behavior.perception_radius - 12.0).abs() < f32::EPSILON);
        assert_eq!(config.behavior.barricade_threshold, 4);
        assert!(
            (config.behavior.mob_radius - BehaviorConfig::default().mob_radius).abs()
                < f32::EPSILON
        );
        assert_eq!(config.scenario.pile_units, 9);
        assert!((config.scenario.survivor_health - 100.0).abs() < f32::EPSILON);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let shipped = include_str!("../../../horde-config.yaml");
        assert_eq!(
            SimulationConfig::parse(shipped).unwrap(),
            SimulationConfig::default()
        );
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let config = SimulationConfig::parse("scenario:\n  zombies: 0\n").unwrap();
        assert_eq!(config.scenario.zombies, 0);
        assert_eq!(config.scenario.survivors, 12);
        assert_eq!(config.world, WorldConfig::default());
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        let result = SimulationConfig::parse("world: [not, a, map");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = SimulationConfig::from_file(Path::new("/definitely/not/here.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
