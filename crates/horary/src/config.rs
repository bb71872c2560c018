//! Engine configuration.
//!
//! Every knob has an explicit default; a TOML file only needs the values it
//! overrides.

use crate::error::HoraryError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Allow perfections that complete after either body changes sign
    #[serde(default)]
    pub allow_out_of_sign: bool,
    /// Daily motion below which a stationing body counts as near-station
    #[serde(default = "default_station_speed_threshold")]
    pub station_speed_threshold: f64,
}

fn default_station_speed_threshold() -> f64 {
    0.1
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            allow_out_of_sign: false,
            station_speed_threshold: default_station_speed_threshold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub direct_basic: i32,
    pub same_ruler: i32,
    pub house_placement: i32,
    pub translation_of_light: i32,
    pub collection_of_light: i32,
    pub hard_square_penalty: i32,
    pub hard_opposition_penalty: i32,
    pub mutual_rulership_bonus: i32,
    pub mutual_exaltation_bonus: i32,
    pub abscission: i32,
    pub frustration: i32,
    pub refranation: i32,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            direct_basic: 85,
            same_ruler: 80,
            house_placement: 75,
            translation_of_light: 80,
            collection_of_light: 75,
            hard_square_penalty: 15,
            hard_opposition_penalty: 20,
            mutual_rulership_bonus: 15,
            mutual_exaltation_bonus: 10,
            abscission: 70,
            frustration: 65,
            refranation: 75,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Translator must be faster than both significators
    pub require_speed_advantage: bool,
    /// Second leg must carry reception
    pub require_reception: bool,
    /// Separation must precede application
    pub require_proper_sequence: bool,
    /// Oldest separation (days) still able to carry light
    pub max_lookback_days: f64,
    /// Degrees past exact for the separating leg; unlimited when absent
    pub max_separation_deg: Option<f64>,
    /// Degrees to exact for the applying leg; unlimited when absent
    pub max_application_deg: Option<f64>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            require_speed_advantage: true,
            require_reception: false,
            require_proper_sequence: true,
            max_lookback_days: 7.0,
            max_separation_deg: None,
            max_application_deg: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Reject (instead of downgrade) a collector below `minimum_dignity_score`
    pub require_collector_dignity: bool,
    pub minimum_dignity_score: i32,
    /// Degrees to exact for each application to the collector; unlimited when absent
    pub max_application_deg: Option<f64>,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            require_collector_dignity: false,
            minimum_dignity_score: 0,
            max_application_deg: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerfectionConfig {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub confidence: ConfidenceConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub collection: CollectionConfig,
}

impl PerfectionConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, HoraryError> {
        let config: PerfectionConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file from disk.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
        Self::from_toml_str(&text)
            .map_err(|e| anyhow::anyhow!("Invalid perfection config {}: {e}", path.display()))
    }

    pub fn validate(&self) -> Result<(), HoraryError> {
        if !(self.timing.station_speed_threshold > 0.0) {
            return Err(HoraryError::invalid_config(
                "timing.station_speed_threshold",
                "must be positive",
            ));
        }

        let c = &self.confidence;
        let scores = [
            ("confidence.direct_basic", c.direct_basic),
            ("confidence.same_ruler", c.same_ruler),
            ("confidence.house_placement", c.house_placement),
            ("confidence.translation_of_light", c.translation_of_light),
            ("confidence.collection_of_light", c.collection_of_light),
            ("confidence.abscission", c.abscission),
            ("confidence.frustration", c.frustration),
            ("confidence.refranation", c.refranation),
        ];
        for (field, value) in scores {
            if !(0..=100).contains(&value) {
                return Err(HoraryError::invalid_config(field, format!("{value} not in 0..=100")));
            }
        }
        let adjustments = [
            ("confidence.hard_square_penalty", c.hard_square_penalty),
            ("confidence.hard_opposition_penalty", c.hard_opposition_penalty),
            ("confidence.mutual_rulership_bonus", c.mutual_rulership_bonus),
            ("confidence.mutual_exaltation_bonus", c.mutual_exaltation_bonus),
        ];
        for (field, value) in adjustments {
            if value < 0 {
                return Err(HoraryError::invalid_config(field, "must not be negative"));
            }
        }

        if !(self.translation.max_lookback_days >= 0.0) {
            return Err(HoraryError::invalid_config(
                "translation.max_lookback_days",
                "must not be negative",
            ));
        }
        let limits = [
            ("translation.max_separation_deg", self.translation.max_separation_deg),
            ("translation.max_application_deg", self.translation.max_application_deg),
            ("collection.max_application_deg", self.collection.max_application_deg),
        ];
        for (field, value) in limits {
            if let Some(deg) = value {
                if !(deg >= 0.0) {
                    return Err(HoraryError::invalid_config(field, "must not be negative"));
                }
            }
        }
        Ok(())
    }
}
