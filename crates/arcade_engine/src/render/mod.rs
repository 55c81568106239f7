//! # Rendering contracts
//!
//! The capability traits every backend implements and every application
//! module consumes:
//!
//! ```text
//! Transformable          owns one Transform2D (the position)
//!      ▲
//!   Drawable             draw(&self, &mut dyn RenderTarget)
//!    ▲    ▲
//! Sprite  Text           image-backed / string-backed attributes
//! ```
//!
//! Capabilities compose as supertraits over a single embedded
//! [`Transform2D`], so a type that is both drawable and transformable has
//! exactly one position. Drawables reach backend primitives only through
//! [`RenderTarget`], passing plain draw descriptions ([`ImageDraw`],
//! [`TextDraw`]) that any target can consume.
//!
//! ## Resource policy
//!
//! Resource-bearing setters (`set_image_file`, `set_ascii_file`,
//! `set_font`) validate their file synchronously in every backend. A
//! missing, unreadable or unsupported file is reported as
//! [`RenderError::Resource`] by the setter and the previous value is kept.

mod color;
mod drawable;
mod resources;
mod sprite;
mod target;
mod text;
mod transformable;

pub use color::Color;
pub use drawable::Drawable;
pub use resources::{AsciiArt, BitmapInfo, FontFile};
pub use sprite::{Sprite, SpriteState, StandardSprite};
pub use target::{ImageDraw, RenderTarget, TextDraw};
pub use text::{StandardText, Text, TextSize, TextState};
pub use transformable::{Transform2D, Transformable};

use std::path::PathBuf;
use thiserror::Error;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// A referenced image, font or text-art file is missing, unreadable or
    /// in an unsupported format
    #[error("Resource error for {}: {reason}", path.display())]
    Resource {
        /// File that failed to load
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// A value outside its documented domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The backend could not stand up a render target from its settings
    ///
    /// Fatal to that backend instance. The host may retry with other
    /// settings or abort.
    #[error("Backend initialization failed: {0}")]
    BackendInit(String),

    /// Output or input device failure while running
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Build a resource error for `path`
    pub fn resource(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Resource {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this is a resource error
    pub const fn is_resource(&self) -> bool {
        matches!(self, Self::Resource { .. })
    }
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
