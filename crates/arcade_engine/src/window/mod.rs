//! Render settings handed to a backend at initialization
//!
//! Settings are read once, when the backend builds its render target.
//! Backends may bind window or terminal resources to them at creation, so
//! there is no in-place update: changing resolution or fullscreen means
//! tearing the backend down and creating a new one (see
//! [`Host::reconfigure`](crate::Host::reconfigure)).

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};
use crate::foundation::math::Vector2u;

/// Backend initialization settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Render resolution in pixels
    pub size: Vector2u,
    /// Enable fullscreen
    pub fullscreen: bool,
}

impl RenderSettings {
    /// Windowed settings at the given resolution
    pub fn windowed(width: u32, height: u32) -> Self {
        Self {
            size: Vector2u::new(width, height),
            fullscreen: false,
        }
    }

    /// Set fullscreen mode
    #[must_use]
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size.x == 0 || self.size.y == 0 {
            return Err(ConfigError::Invalid(format!(
                "resolution must be non-zero, got {}x{}",
                self.size.x, self.size.y
            )));
        }
        Ok(())
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::windowed(800, 600)
    }
}

impl Config for RenderSettings {}
