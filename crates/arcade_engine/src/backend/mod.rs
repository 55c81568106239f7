//! # Backend Module
//!
//! Concrete implementations of the rendering and input contracts.
//!
//! ## Organization
//!
//! - **Recording**: headless backend that captures an abstract draw-command
//!   log; used for tests and for running games without a display
//! - **Terminal**: text-mode backend that paints sprites from their ASCII
//!   fallback through `crossterm`
//!
//! ## Design Principles
//!
//! - **Abstraction**: backends implement the traits in [`crate::render`]
//!   and are only ever handled as `Box<dyn Backend>`
//! - **Isolation**: application modules create entities through
//!   [`EntityFactory`] and never name a backend type
//! - **Versioning**: the contract carries [`INTERFACE_VERSION`]; a host
//!   refuses a backend built against another version

pub mod recording;
pub mod terminal;

use serde::{Deserialize, Serialize};

use crate::input::InputEvent;
use crate::render::{RenderError, RenderResult, RenderTarget, Sprite, Text};
use crate::window::RenderSettings;

pub use recording::{DrawCommand, RecordingBackend, RecordingLayer, RecordingTarget};
pub use terminal::{TerminalBackend, TerminalSprite, TerminalTarget};

/// Version of the backend/application contract
///
/// Bumped whenever a trait in [`crate::render`], [`crate::input`] or this
/// module changes shape.
pub const INTERFACE_VERSION: u32 = 1;

/// Creates the backend's drawable entities
///
/// Entities come back as trait objects; callers only see the capabilities.
pub trait EntityFactory {
    /// Create an unbound sprite at the origin
    fn create_sprite(&self) -> Box<dyn Sprite>;

    /// Create an empty text entity at the origin
    fn create_text(&self) -> Box<dyn Text>;
}

/// A running backend instance
///
/// Owns the one [`RenderTarget`] of the instance and is the source of input
/// events. Dropping the backend tears its target down.
pub trait Backend: EntityFactory {
    /// Human-readable backend name
    fn name(&self) -> &str;

    /// Contract version this backend was built against
    fn interface_version(&self) -> u32 {
        INTERFACE_VERSION
    }

    /// Settings the backend was created with
    fn settings(&self) -> &RenderSettings;

    /// The backend's render target
    fn target(&mut self) -> &mut dyn RenderTarget;

    /// Next pending input event, if any; never blocks
    ///
    /// Native keys with no [`KeyCode`](crate::input::KeyCode) mapping are
    /// delivered as `KeyCode::Unknown`.
    fn poll_event(&mut self) -> RenderResult<Option<InputEvent>>;

    /// View this backend as an entity factory
    fn as_factory(&self) -> &dyn EntityFactory;

    /// Downcast to concrete backend type for inspection
    fn as_any(&self) -> &dyn std::any::Any;

    /// Mutable downcast to concrete backend type
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// Available backend implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Headless command recorder
    Recording,
    /// Text-mode terminal renderer
    Terminal,
}

impl BackendKind {
    /// Every backend kind
    pub const ALL: [Self; 2] = [Self::Recording, Self::Terminal];

    /// Config name of the backend
    pub const fn name(self) -> &'static str {
        match self {
            Self::Recording => "recording",
            Self::Terminal => "terminal",
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| RenderError::InvalidArgument(format!("unknown backend: {s}")))
    }
}

/// Check that no backend would refuse `settings`
///
/// # Errors
/// [`RenderError::BackendInit`] for an unusable resolution.
pub fn check_settings(settings: &RenderSettings) -> RenderResult<()> {
    settings
        .validate()
        .map_err(|e| RenderError::BackendInit(e.to_string()))
}

/// Create and initialize a backend
///
/// # Errors
/// [`RenderError::BackendInit`] if the settings are unusable or the backend
/// cannot acquire its output surface.
pub fn create_backend(kind: BackendKind, settings: &RenderSettings) -> RenderResult<Box<dyn Backend>> {
    check_settings(settings)?;

    log::info!(
        "Creating {} backend at {}x{} (fullscreen: {})",
        kind.name(),
        settings.size.x,
        settings.size.y,
        settings.fullscreen
    );

    let backend: Box<dyn Backend> = match kind {
        BackendKind::Recording => Box::new(RecordingBackend::new(*settings)),
        BackendKind::Terminal => Box::new(TerminalBackend::new(*settings)?),
    };
    Ok(backend)
}
