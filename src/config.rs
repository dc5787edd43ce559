//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (optional, user overrides)
//! 3. Environment variables (`PFIELD_SECTION__KEY`)

use field_simulation::{FieldParams, ParamsError};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from the `config` directory and the environment
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, figment::Error> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // PFIELD_FIELD__PRESET=dust -> field.preset = "dust"
        figment = figment.merge(Env::prefixed("PFIELD_").split("__"));

        figment.extract()
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial inner width in logical pixels
    pub width: u32,
    /// Initial inner height in logical pixels
    pub height: u32,
    /// Present at the display refresh rate
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Particle Field".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

/// Named look for the field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Connected lavender points with glow and vignette
    #[default]
    Constellation,
    /// Faint white dots only
    Dust,
}

impl Preset {
    pub fn params(self) -> FieldParams {
        match self {
            Preset::Constellation => FieldParams::constellation(),
            Preset::Dust => FieldParams::dust(),
        }
    }
}

/// Particle field configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub preset: Preset,
    /// Surface area per particle; overrides the preset's count rule
    pub density: Option<f32>,
    /// Fixed seed for a reproducible layout
    pub seed: Option<u64>,
}

impl FieldConfig {
    /// Validated parameters for the animator
    pub fn params(&self) -> Result<FieldParams, ParamsError> {
        let mut params = self.preset.params();
        if let Some(density) = self.density {
            params = params.with_density(density);
        }
        params.validate()?;
        Ok(params)
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace); `RUST_LOG` wins when set
    pub log_level: String,
    /// Show FPS and particle count in the window title
    pub show_fps: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_fps: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> AppConfig {
        Figment::new()
            .merge(Toml::string(source))
            .extract()
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.field.preset, Preset::Constellation);
        assert_eq!(config.field.params().unwrap(), FieldParams::constellation());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("preset = \"constellation\""));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = from_toml(
            r#"
            [field]
            preset = "dust"
            seed = 7
            "#,
        );
        assert_eq!(config.field.preset, Preset::Dust);
        assert_eq!(config.field.seed, Some(7));
        assert_eq!(config.window.title, "Particle Field");
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_density_override() {
        let config = from_toml(
            r#"
            [field]
            preset = "dust"
            density = 10000.0
            "#,
        );
        let params = config.field.params().unwrap();
        assert_eq!(params.fixed_count, None);
        assert_eq!(params.particle_count(1000, 1000), 100);
    }

    #[test]
    fn test_invalid_density_rejected() {
        let config = from_toml(
            r#"
            [field]
            density = -5.0
            "#,
        );
        assert_eq!(
            config.field.params(),
            Err(ParamsError::NonPositiveDensity(-5.0))
        );
    }

    #[test]
    fn test_missing_directory_uses_defaults() {
        let config = AppConfig::load_from("does/not/exist").unwrap();
        assert_eq!(config.window.height, 720);
    }
}
