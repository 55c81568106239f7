use std::path::{Path, PathBuf};

use super::{
    AsciiArt, BitmapInfo, Drawable, ImageDraw, RenderError, RenderResult, RenderTarget, Transform2D,
    Transformable,
};
use crate::foundation::math::{SpriteTransform, Vector2f};

/// Capability: image-backed drawable
///
/// A sprite is constructed with nothing bound and draws nothing until an
/// image or text-art file is set. Getters return exactly what was last
/// set; rotation in particular is stored as given (degrees, positive is
/// clockwise on screen, no wrapping).
///
/// Sprites are single-owner: they move but do not clone.
pub trait Sprite: Drawable {
    /// Bind the primary image file
    ///
    /// # Errors
    /// [`RenderError::Resource`](super::RenderError::Resource) if the file is
    /// missing, unreadable or unsupported. The previous binding is kept.
    fn set_image_file(&mut self, path: &Path) -> RenderResult<()>;

    /// Bind the text-mode fallback file
    ///
    /// # Errors
    /// Same policy as [`set_image_file`](Self::set_image_file).
    fn set_ascii_file(&mut self, path: &Path) -> RenderResult<()>;

    /// Set the on-screen size in pixels
    fn set_size(&mut self, size: Vector2f);

    /// Set the rotation in degrees
    fn set_rotation(&mut self, rotation: f32);

    /// Primary image file, if bound
    fn image_file(&self) -> Option<&Path>;

    /// Text-mode fallback file, if bound
    fn ascii_file(&self) -> Option<&Path>;

    /// On-screen size in pixels
    fn size(&self) -> Vector2f;

    /// Rotation in degrees
    fn rotation(&self) -> f32;

    /// View this sprite as a plain drawable
    fn as_drawable(&self) -> &dyn Drawable;
}

/// Attribute storage for sprite implementations
///
/// Holds the sprite's only [`Transform2D`] alongside its presentation
/// attributes, so a backend sprite type can embed one `SpriteState` and
/// forward to it.
#[derive(Debug)]
pub struct SpriteState {
    transform: Transform2D,
    image_path: Option<PathBuf>,
    bitmap: Option<BitmapInfo>,
    ascii: Option<AsciiArt>,
    size: Vector2f,
    rotation: f32,
}

impl Default for SpriteState {
    fn default() -> Self {
        Self {
            transform: Transform2D::new(),
            image_path: None,
            bitmap: None,
            ascii: None,
            size: Vector2f::zeros(),
            rotation: 0.0,
        }
    }
}

impl SpriteState {
    /// Create an unbound sprite state at the origin
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

    /// Probe and bind a bitmap
    pub fn load_image(&mut self, path: &Path) -> RenderResult<()> {
        self.bitmap = Some(BitmapInfo::load(path)?);
        self.image_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Bind an image path after only checking that it is a readable file
    ///
    /// For backends that never paint bitmaps and so have no use for the
    /// decoded header.
    pub fn bind_image_path(&mut self, path: &Path) -> RenderResult<()> {
        let readable = std::fs::metadata(path)
            .and_then(|meta| std::fs::File::open(path).map(|_| meta.is_file()))
            .map_err(|e| RenderError::resource(path, e.to_string()))?;
        if !readable {
            return Err(RenderError::resource(path, "not a regular file"));
        }
        log::debug!("Bound image path {} without decoding", path.display());
        self.bitmap = None;
        self.image_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Load and bind text-mode art
    pub fn load_ascii(&mut self, path: &Path) -> RenderResult<()> {
        self.ascii = Some(AsciiArt::load(path)?);
        Ok(())
    }

    /// Set the size in pixels
    pub fn set_size(&mut self, size: Vector2f) {
        self.size = size;
    }

    /// Set the rotation in degrees
    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    /// Bound image path
    pub fn image_file(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    /// Bound text-art path
    pub fn ascii_file(&self) -> Option<&Path> {
        self.ascii.as_ref().map(AsciiArt::path)
    }

    /// Probed bitmap, if the backend decoded one
    pub const fn bitmap(&self) -> Option<&BitmapInfo> {
        self.bitmap.as_ref()
    }

    /// Loaded text art
    pub const fn ascii(&self) -> Option<&AsciiArt> {
        self.ascii.as_ref()
    }

    /// Size in pixels
    pub const fn size(&self) -> Vector2f {
        self.size
    }

    /// Rotation in degrees
    pub const fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Whether any representation is bound
    pub const fn is_bound(&self) -> bool {
        self.image_path.is_some() || self.ascii.is_some()
    }

    /// Quad placement for the current attributes
    pub fn sprite_transform(&self) -> SpriteTransform {
        SpriteTransform::new(*self.transform.position(), self.size, self.rotation)
    }

    /// Draw description for the current attributes
    pub fn image_draw(&self) -> ImageDraw<'_> {
        ImageDraw {
            transform: self.sprite_transform(),
            image_file: self.image_path.as_deref(),
            bitmap: self.bitmap.as_ref(),
            ascii: self.ascii.as_ref(),
        }
    }

    /// Hand the current attributes to `target`; unbound sprites draw nothing
    ///
    /// # Errors
    /// [`RenderError::Resource`] naming the image file when `target` cannot
    /// paint bitmaps and no text-mode art is bound. The target is not called.
    pub fn draw_into(&self, target: &mut dyn RenderTarget) -> RenderResult<()> {
        if !self.is_bound() {
            log::trace!("Skipping draw of unbound sprite");
            return Ok(());
        }
        if self.ascii.is_none() && !target.supports_bitmaps() {
            let path = self.image_path.clone().unwrap_or_default();
            return Err(RenderError::resource(
                path,
                "no text-mode art bound for a target without bitmap support",
            ));
        }
        target.draw_image(&self.image_draw())
    }
}

/// Sprite that probes bitmap headers and loads text art eagerly
///
/// The sprite type handed out by backends that can paint bitmaps.
/// It can be moved but not duplicated:
///
/// ```compile_fail
/// use arcade_engine::render::StandardSprite;
///
/// let sprite = StandardSprite::new();
/// let copy = sprite.clone();
/// ```
#[derive(Debug, Default)]
pub struct StandardSprite {
    state: SpriteState,
}

impl StandardSprite {
    /// Create an unbound sprite at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Underlying attribute state
    pub const fn state(&self) -> &SpriteState {
        &self.state
    }
}

impl Transformable for StandardSprite {
    fn transform(&self) -> &Transform2D {
        self.state.transform()
    }

    fn transform_mut(&mut self) -> &mut Transform2D {
        self.state.transform_mut()
    }
}

impl Drawable for StandardSprite {
    fn draw(&self, target: &mut dyn RenderTarget) -> RenderResult<()> {
        self.state.draw_into(target)
    }
}

impl Sprite for StandardSprite {
    fn set_image_file(&mut self, path: &Path) -> RenderResult<()> {
        self.state.load_image(path)
    }

    fn set_ascii_file(&mut self, path: &Path) -> RenderResult<()> {
        self.state.load_ascii(path)
    }

    fn set_size(&mut self, size: Vector2f) {
        self.state.set_size(size);
    }

    fn set_rotation(&mut self, rotation: f32) {
        self.state.set_rotation(rotation);
    }

    fn image_file(&self) -> Option<&Path> {
        self.state.image_file()
    }

    fn ascii_file(&self) -> Option<&Path> {
        self.state.ascii_file()
    }

    fn size(&self) -> Vector2f {
        self.state.size()
    }

    fn rotation(&self) -> f32 {
        self.state.rotation()
    }

    fn as_drawable(&self) -> &dyn Drawable {
        self
    }
}
