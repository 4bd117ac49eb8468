/// Viewer configuration loaded from TOML
use serde::{Deserialize, Serialize};
use std::path::Path;
use trackball_core::{PhongLight, Shape, TrackballConfig};

use crate::error::AppError;

/// Top-level viewer settings. Every section uses `#[serde(default)]` so a
/// file overriding only `[light]` still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub shape: Shape,
    pub target_fps: u32,
    pub trackball: TrackballConfig,
    pub light: PhongLight,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            shape: Shape::default(),
            target_fps: 30,
            trackball: TrackballConfig::default(),
            light: PhongLight::default(),
        }
    }
}

impl AppConfig {
    /// Load settings from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = AppConfig::from_toml(
            r#"
            shape = "quad"

            [trackball]
            radius_fraction = 0.25

            [light]
            shininess = 32.0
            "#,
        )
        .unwrap();
        assert_eq!(config.shape, Shape::Quad);
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.trackball.radius_fraction, 0.25);
        assert_eq!(config.light.shininess, 32.0);
        assert_eq!(config.light.ambient, PhongLight::default().ambient);
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        let err = AppConfig::from_toml(r#"shape = "teapot""#).unwrap_err();
        assert!(matches!(err, AppError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = AppConfig::load(Path::new("/nonexistent/trackball.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/trackball.toml"));
    }
}
