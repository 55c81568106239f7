use std::num::NonZeroU32;
use std::path::Path;

use super::{Color, Drawable, FontFile, RenderError, RenderResult, RenderTarget, TextDraw, Transform2D, Transformable};

/// Character size for text entities, in pixels
///
/// Always positive. Zero and negative sizes are rejected with
/// [`RenderError::InvalidArgument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextSize(NonZeroU32);

impl TextSize {
    /// Size used by freshly created text entities
    pub const DEFAULT: Self = Self(match NonZeroU32::new(30) {
        Some(size) => size,
        None => unreachable!(),
    });

    /// Validate a pixel size
    pub fn new(size: u32) -> RenderResult<Self> {
        NonZeroU32::new(size)
            .map(Self)
            .ok_or_else(|| RenderError::InvalidArgument("text size must be positive, got 0".to_string()))
    }

    /// Size in pixels
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for TextSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for TextSize {
    type Error = RenderError;

    fn try_from(size: i64) -> Result<Self, Self::Error> {
        let size = u32::try_from(size).map_err(|_| {
            RenderError::InvalidArgument(format!("text size must be a positive 32-bit value, got {size}"))
        })?;
        Self::new(size)
    }
}

/// Capability: string-backed drawable
///
/// Drawing an empty string is a no-op. Without a font the target's default
/// font is used.
///
/// Text entities are single-owner: they move but do not clone.
pub trait Text: Drawable {
    /// Set the string to display
    fn set_text(&mut self, text: &str);

    /// Bind a font file
    ///
    /// # Errors
    /// [`RenderError::Resource`] if the file is missing, unreadable or not a
    /// font. The previous font is kept.
    fn set_font(&mut self, path: &Path) -> RenderResult<()>;

    /// Set the character size in pixels
    ///
    /// # Errors
    /// [`RenderError::InvalidArgument`] for zero. The previous size is kept.
    fn set_size(&mut self, size: u32) -> RenderResult<()>;

    /// Set the fill color
    fn set_color(&mut self, color: Color);

    /// Current string
    fn text(&self) -> &str;

    /// Bound font file, if any
    fn font(&self) -> Option<&Path>;

    /// Character size in pixels
    fn size(&self) -> u32;

    /// Fill color
    fn color(&self) -> Color;

    /// View this text as a plain drawable
    fn as_drawable(&self) -> &dyn Drawable;
}

/// Attribute storage for text implementations
///
/// Holds the entity's only [`Transform2D`] alongside its presentation
/// attributes.
#[derive(Debug, Default)]
pub struct TextState {
    transform: Transform2D,
    text: String,
    font: Option<FontFile>,
    size: TextSize,
    color: Color,
}

impl TextState {
    /// Create an empty text state at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Positional state
    pub const fn transform(&self) -> &Transform2D {
        &self.transform
    }

    /// Mutable positional state
    pub fn transform_mut(&mut self) -> &mut Transform2D {
        &mut self.transform
    }

    /// Replace the string
    pub fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    /// Validate and bind a font
    pub fn load_font(&mut self, path: &Path) -> RenderResult<()> {
        self.font = Some(FontFile::load(path)?);
        Ok(())
    }

    /// Validate and set the size
    pub fn set_size(&mut self, size: u32) -> RenderResult<()> {
        self.size = TextSize::new(size)?;
        Ok(())
    }

    /// Set the color
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Current string
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bound font path
    pub fn font(&self) -> Option<&Path> {
        self.font.as_ref().map(FontFile::path)
    }

    /// Size in pixels
    pub const fn size(&self) -> u32 {
        self.size.get()
    }

    /// Fill color
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Draw description, or `None` when there is nothing to draw
    pub fn text_draw(&self) -> Option<TextDraw<'_>> {
        if self.text.is_empty() {
            return None;
        }
        Some(TextDraw {
            position: *self.transform.position(),
            text: &self.text,
            font: self.font(),
            size: self.size.get(),
            color: self.color,
        })
    }

    /// Hand the current attributes to `target`; empty strings draw nothing
    pub fn draw_into(&self, target: &mut dyn RenderTarget) -> RenderResult<()> {
        match self.text_draw() {
            Some(draw) => target.draw_text(&draw),
            None => Ok(()),
        }
    }
}

/// Text entity that validates fonts eagerly
#[derive(Debug, Default)]
pub struct StandardText {
    state: TextState,
}

impl StandardText {
    /// Create an empty text entity at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Underlying attribute state
    pub const fn state(&self) -> &TextState {
        &self.state
    }
}

impl Transformable for StandardText {
    fn transform(&self) -> &Transform2D {
        self.state.transform()
    }

    fn transform_mut(&mut self) -> &mut Transform2D {
        self.state.transform_mut()
    }
}

impl Drawable for StandardText {
    fn draw(&self, target: &mut dyn RenderTarget) -> RenderResult<()> {
        self.state.draw_into(target)
    }
}

impl Text for StandardText {
    fn set_text(&mut self, text: &str) {
        self.state.set_text(text);
    }

    fn set_font(&mut self, path: &Path) -> RenderResult<()> {
        self.state.load_font(path)
    }

    fn set_size(&mut self, size: u32) -> RenderResult<()> {
        self.state.set_size(size)
    }

    fn set_color(&mut self, color: Color) {
        self.state.set_color(color);
    }

    fn text(&self) -> &str {
        self.state.text()
    }

    fn font(&self) -> Option<&Path> {
        self.state.font()
    }

    fn size(&self) -> u32 {
        self.state.size()
    }

    fn color(&self) -> Color {
        self.state.color()
    }

    fn as_drawable(&self) -> &dyn Drawable {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vector2f;

    #[test]
    fn test_zero_size_rejected() {
        let mut text = StandardText::new();
        let error = text.set_size(0).unwrap_err();

        assert!(matches!(error, RenderError::InvalidArgument(_)));
        assert_eq!(text.size(), TextSize::DEFAULT.get());
    }

    #[test]
    fn test_negative_size_rejected() {
        assert!(matches!(TextSize::try_from(-3_i64), Err(RenderError::InvalidArgument(_))));
        assert!(matches!(TextSize::try_from(0_i64), Err(RenderError::InvalidArgument(_))));
        assert_eq!(TextSize::try_from(12_i64).unwrap().get(), 12);
    }

    #[test]
    fn test_size_round_trip() {
        let mut text = StandardText::new();
        text.set_size(12).unwrap();
        assert_eq!(text.size(), 12);
    }

    #[test]
    fn test_attribute_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("arcade.otf");
        std::fs::write(&font, b"OTTO\0\0\0\0").unwrap();

        let mut text = StandardText::new();
        text.set_text("GAME OVER");
        text.set_font(&font).unwrap();
        text.set_color(Color::rgba(12, 34, 56, 78));

        assert_eq!(text.text(), "GAME OVER");
        assert_eq!(text.font(), Some(font.as_path()));
        assert_eq!(text.color(), Color::rgba(12, 34, 56, 78));
    }

    #[test]
    fn test_missing_font_keeps_previous() {
        let mut text = StandardText::new();
        let error = text.set_font(Path::new("nowhere/font.ttf")).unwrap_err();

        assert!(error.is_resource());
        assert_eq!(text.font(), None);
    }

    #[test]
    fn test_empty_text_has_no_draw() {
        let mut text = StandardText::new();
        text.move_to(Vector2f::new(4.0, 4.0));
        assert!(text.state().text_draw().is_none());

        text.set_text("1UP");
        let draw = text.state().text_draw().unwrap();
        assert_eq!(draw.text, "1UP");
        assert_eq!(draw.position, Vector2f::new(4.0, 4.0));
    }
}
