use std::path::Path;

use super::{AsciiArt, BitmapInfo, Color, RenderResult};
use crate::foundation::math::{SpriteTransform, Vector2f, Vector2u};

/// Image draw description handed from a sprite to a target
///
/// Carries everything the sprite owns, already loaded, so any target can
/// consume it without knowing which backend created the sprite.
#[derive(Debug, Clone, Copy)]
pub struct ImageDraw<'a> {
    /// Quad placement: translate, then rotate, then scale
    pub transform: SpriteTransform,
    /// Bound image file
    pub image_file: Option<&'a Path>,
    /// Probed bitmap, if the sprite's backend decodes images
    pub bitmap: Option<&'a BitmapInfo>,
    /// Text-mode fallback, if one is bound
    pub ascii: Option<&'a AsciiArt>,
}

impl ImageDraw<'_> {
    /// Screen-space corners of the quad
    pub fn corners(&self) -> [Vector2f; 4] {
        self.transform.corners()
    }
}

/// Text draw description handed from a text entity to a target
#[derive(Debug, Clone, Copy)]
pub struct TextDraw<'a> {
    /// Top-left of the first line
    pub position: Vector2f,
    /// String to render; never empty
    pub text: &'a str,
    /// Font file, or `None` for the target's default font
    pub font: Option<&'a Path>,
    /// Character size in pixels
    pub size: u32,
    /// Fill color
    pub color: Color,
}

/// Abstract render sink provided by a backend
///
/// One target exists per running backend and the backend owns it.
/// Drawables are only borrowed for the duration of a draw call; a target
/// keeps no reference to them between frames. Only one thread issues
/// draw calls against a target.
pub trait RenderTarget {
    /// Render resolution in pixels
    fn size(&self) -> Vector2u;

    /// Whether this target can paint bitmap images
    ///
    /// Targets that cannot paint bitmaps fall back to a sprite's text-mode
    /// art and fail with a resource error when none is bound.
    fn supports_bitmaps(&self) -> bool;

    /// Clear the frame to a solid color
    fn clear(&mut self, color: Color);

    /// Paint an image quad
    fn draw_image(&mut self, image: &ImageDraw<'_>) -> RenderResult<()>;

    /// Paint a string
    fn draw_text(&mut self, text: &TextDraw<'_>) -> RenderResult<()>;

    /// Present the finished frame
    fn display(&mut self) -> RenderResult<()>;
}
