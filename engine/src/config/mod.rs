//! Config Module
//!
//! Centralized tunables for the menu, the physics world and the visuals.
//! Every default is the literal constant the menu ships with; a JSON file
//! can override any subset of fields.

pub mod menu_config;
pub mod physics_config;
pub mod visual_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MenuError, read_to_string};

pub use menu_config::{FontOptions, JointConfig, MenuConfig};
pub use physics_config::PhysicsConfig;
pub use visual_config::{CameraConfig, DirectionalLightConfig, VisualConfig};

/// Environment variable naming an optional JSON override file.
pub const CONFIG_ENV_VAR: &str = "MENU_CONFIG";

/// All configuration for one run of the menu.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub menu: MenuConfig,
    pub physics: PhysicsConfig,
    pub visual: VisualConfig,
}

impl AppConfig {
    /// Parse a (possibly partial) JSON document over the defaults.
    pub fn from_json(json: &str) -> Result<Self, MenuError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load overrides from a JSON file.
    pub fn load(path: &Path) -> Result<Self, MenuError> {
        Self::from_json(&read_to_string(path)?)
    }

    /// Load from `MENU_CONFIG` if set, defaults otherwise.
    pub fn from_env() -> Result<Self, MenuError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => {
                log::info!("Loading config overrides from {path}");
                Self::load(Path::new(&path))
            }
            _ => Ok(Self::default()),
        }
    }

    /// Reject values the builders cannot work with.
    pub fn validate(&self) -> Result<(), MenuError> {
        if self.menu.margin <= 0.0 {
            return Err(MenuError::Config(format!(
                "menu.margin must be positive, got {}",
                self.menu.margin
            )));
        }
        if self.menu.total_mass <= 0.0 {
            return Err(MenuError::Config(format!(
                "menu.total_mass must be positive, got {}",
                self.menu.total_mass
            )));
        }
        if self.menu.font.curve_segments == 0 {
            return Err(MenuError::Config("menu.font.curve_segments must be >= 1".into()));
        }
        if self.menu.font.bevel_size < 0.0 || self.menu.font.bevel_thickness < 0.0 {
            return Err(MenuError::Config(
                "menu.font bevel size and thickness must not be negative".into(),
            ));
        }
        if self.physics.timestep <= 0.0 {
            return Err(MenuError::Config(format!(
                "physics.timestep must be positive, got {}",
                self.physics.timestep
            )));
        }
        if self.physics.max_substeps == 0 {
            return Err(MenuError::Config("physics.max_substeps must be >= 1".into()));
        }
        Ok(())
    }
}
