use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid value for '{name}': {value} (must be a positive, finite number)")]
    InvalidValue { name: &'static str, value: f64 },
    #[error("Invalid range: '{lower}' must be below '{upper}'")]
    InvalidRange {
        lower: &'static str,
        upper: &'static str,
    },
}

/// Distance (Angstrom) and angle (degree) thresholds for every detector.
///
/// Values are read-only for the duration of a detection run. Missing keys in a
/// TOML file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectionConfig {
    pub hydroph_dist_max: f64,

    pub hbond_dist_max: f64,
    pub hbond_don_angle_min: f64,

    pub pistack_dist_max: f64,
    pub pistack_ang_dev: f64,
    pub pistack_offset_max: f64,

    pub pication_dist_max: f64,
    pub pication_amine_angle_max: f64,

    pub saltbridge_dist_max: f64,

    pub halogen_dist_max: f64,
    pub halogen_acc_angle: f64,
    pub halogen_don_angle: f64,
    pub halogen_angle_dev: f64,

    pub water_bridge_mindist: f64,
    pub water_bridge_maxdist: f64,
    pub water_bridge_omega_min: f64,
    pub water_bridge_omega_max: f64,
    pub water_bridge_theta_min: f64,

    pub metal_dist_max: f64,
    /// A candidate geometry wins outright if the next one is worse by more than this.
    pub metal_rms_margin: f64,
    /// Otherwise the next candidate is taken if its RMS is below this cutoff.
    pub metal_rms_cutoff: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            hydroph_dist_max: 4.0,
            hbond_dist_max: 4.1,
            hbond_don_angle_min: 100.0,
            pistack_dist_max: 7.5,
            pistack_ang_dev: 30.0,
            pistack_offset_max: 2.0,
            pication_dist_max: 6.0,
            pication_amine_angle_max: 30.0,
            saltbridge_dist_max: 5.5,
            halogen_dist_max: 4.0,
            halogen_acc_angle: 120.0,
            halogen_don_angle: 165.0,
            halogen_angle_dev: 30.0,
            water_bridge_mindist: 2.5,
            water_bridge_maxdist: 4.0,
            water_bridge_omega_min: 75.0,
            water_bridge_omega_max: 140.0,
            water_bridge_theta_min: 100.0,
            metal_dist_max: 3.0,
            metal_rms_margin: 0.5,
            metal_rms_cutoff: 3.5,
        }
    }
}

impl DetectionConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("hydroph_dist_max", self.hydroph_dist_max),
            ("hbond_dist_max", self.hbond_dist_max),
            ("hbond_don_angle_min", self.hbond_don_angle_min),
            ("pistack_dist_max", self.pistack_dist_max),
            ("pistack_ang_dev", self.pistack_ang_dev),
            ("pistack_offset_max", self.pistack_offset_max),
            ("pication_dist_max", self.pication_dist_max),
            ("pication_amine_angle_max", self.pication_amine_angle_max),
            ("saltbridge_dist_max", self.saltbridge_dist_max),
            ("halogen_dist_max", self.halogen_dist_max),
            ("halogen_acc_angle", self.halogen_acc_angle),
            ("halogen_don_angle", self.halogen_don_angle),
            ("halogen_angle_dev", self.halogen_angle_dev),
            ("water_bridge_mindist", self.water_bridge_mindist),
            ("water_bridge_maxdist", self.water_bridge_maxdist),
            ("water_bridge_omega_min", self.water_bridge_omega_min),
            ("water_bridge_omega_max", self.water_bridge_omega_max),
            ("water_bridge_theta_min", self.water_bridge_theta_min),
            ("metal_dist_max", self.metal_dist_max),
            ("metal_rms_margin", self.metal_rms_margin),
            ("metal_rms_cutoff", self.metal_rms_cutoff),
        ];
        if let Some(&(name, value)) = positive
            .iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
        {
            return Err(ConfigError::InvalidValue { name, value });
        }

        if self.water_bridge_mindist > self.water_bridge_maxdist {
            return Err(ConfigError::InvalidRange {
                lower: "water_bridge_mindist",
                upper: "water_bridge_maxdist",
            });
        }
        if self.water_bridge_omega_min >= self.water_bridge_omega_max {
            return Err(ConfigError::InvalidRange {
                lower: "water_bridge_omega_min",
                upper: "water_bridge_omega_max",
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct DetectionConfigBuilder {
    config: DetectionConfig,
}

impl DetectionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hydroph_dist_max(mut self, value: f64) -> Self {
        self.config.hydroph_dist_max = value;
        self
    }
    pub fn hbond_dist_max(mut self, value: f64) -> Self {
        self.config.hbond_dist_max = value;
        self
    }
    pub fn hbond_don_angle_min(mut self, value: f64) -> Self {
        self.config.hbond_don_angle_min = value;
        self
    }
    pub fn pistack_dist_max(mut self, value: f64) -> Self {
        self.config.pistack_dist_max = value;
        self
    }
    pub fn pistack_ang_dev(mut self, value: f64) -> Self {
        self.config.pistack_ang_dev = value;
        self
    }
    pub fn pistack_offset_max(mut self, value: f64) -> Self {
        self.config.pistack_offset_max = value;
        self
    }
    pub fn pication_dist_max(mut self, value: f64) -> Self {
        self.config.pication_dist_max = value;
        self
    }
    pub fn pication_amine_angle_max(mut self, value: f64) -> Self {
        self.config.pication_amine_angle_max = value;
        self
    }
    pub fn saltbridge_dist_max(mut self, value: f64) -> Self {
        self.config.saltbridge_dist_max = value;
        self
    }
    pub fn halogen_dist_max(mut self, value: f64) -> Self {
        self.config.halogen_dist_max = value;
        self
    }
    pub fn halogen_acc_angle(mut self, value: f64) -> Self {
        self.config.halogen_acc_angle = value;
        self
    }
    pub fn halogen_don_angle(mut self, value: f64) -> Self {
        self.config.halogen_don_angle = value;
        self
    }
    pub fn halogen_angle_dev(mut self, value: f64) -> Self {
        self.config.halogen_angle_dev = value;
        self
    }
    pub fn water_bridge_distance(mut self, min: f64, max: f64) -> Self {
        self.config.water_bridge_mindist = min;
        self.config.water_bridge_maxdist = max;
        self
    }
    pub fn water_bridge_omega(mut self, min: f64, max: f64) -> Self {
        self.config.water_bridge_omega_min = min;
        self.config.water_bridge_omega_max = max;
        self
    }
    pub fn water_bridge_theta_min(mut self, value: f64) -> Self {
        self.config.water_bridge_theta_min = value;
        self
    }
    pub fn metal_dist_max(mut self, value: f64) -> Self {
        self.config.metal_dist_max = value;
        self
    }
    pub fn metal_rms_margin(mut self, value: f64) -> Self {
        self.config.metal_rms_margin = value;
        self
    }
    pub fn metal_rms_cutoff(mut self, value: f64) -> Self {
        self.config.metal_rms_cutoff = value;
        self
    }

    pub fn build(self) -> Result<DetectionConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn default_config_is_valid() {
        assert!(DetectionConfig::default().validate().is_ok());
    }

    #[test]
    fn builder_overrides_only_requested_thresholds() {
        let config = DetectionConfigBuilder::new()
            .saltbridge_dist_max(6.0)
            .metal_rms_cutoff(4.0)
            .build()
            .unwrap();
        assert_eq!(config.saltbridge_dist_max, 6.0);
        assert_eq!(config.metal_rms_cutoff, 4.0);
        assert_eq!(config.hydroph_dist_max, 4.0);
        assert_eq!(config.metal_rms_margin, 0.5);
    }

    #[test]
    fn builder_rejects_non_positive_values() {
        let result = DetectionConfigBuilder::new().hbond_dist_max(0.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                name: "hbond_dist_max",
                ..
            })
        ));
        let result = DetectionConfigBuilder::new()
            .pistack_dist_max(f64::NAN)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn builder_rejects_inverted_ranges() {
        let result = DetectionConfigBuilder::new()
            .water_bridge_distance(4.0, 2.5)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidRange {
                lower: "water_bridge_mindist",
                ..
            })
        ));
        let result = DetectionConfigBuilder::new()
            .water_bridge_omega(140.0, 140.0)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidRange { .. })));
    }

    #[test]
    fn load_succeeds_with_partial_toml_and_fills_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("thresholds.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "hydroph_dist_max = 3.6\nmetal_dist_max = 2.8").unwrap();

        let config = DetectionConfig::load(&file_path).unwrap();
        assert_eq!(config.hydroph_dist_max, 3.6);
        assert_eq!(config.metal_dist_max, 2.8);
        assert_eq!(config.hbond_dist_max, 4.1);
    }

    #[test]
    fn load_fails_for_nonexistent_file() {
        let result = DetectionConfig::load(Path::new("non_existent_thresholds.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn load_fails_for_unknown_keys_and_bad_syntax() {
        let dir = tempdir().unwrap();
        let unknown = dir.path().join("unknown.toml");
        std::fs::write(&unknown, "hydroph_distance = 4.0\n").unwrap();
        assert!(matches!(
            DetectionConfig::load(&unknown),
            Err(ConfigError::Toml { .. })
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "hydroph_dist_max = = 4.0\n").unwrap();
        assert!(matches!(
            DetectionConfig::load(&broken),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn load_validates_loaded_values() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("negative.toml");
        std::fs::write(&file_path, "metal_dist_max = -1.0\n").unwrap();
        assert!(matches!(
            DetectionConfig::load(&file_path),
            Err(ConfigError::InvalidValue {
                name: "metal_dist_max",
                ..
            })
        ));
    }
}
