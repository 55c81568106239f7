//! Headless recording backend
//!
//! Paints nothing. Every draw call is captured as a [`DrawCommand`] so
//! tests (and tools) can check exactly what drawables asked a target to do,
//! independent of any real rendering library.

use std::collections::VecDeque;
use std::path::PathBuf;

use super::{Backend, EntityFactory};
use crate::foundation::math::{SpriteTransform, Vector2f, Vector2u};
use crate::input::InputEvent;
use crate::render::{
    Color, ImageDraw, RenderResult, RenderTarget, Sprite, StandardSprite, StandardText, Text, TextDraw,
};
use crate::window::RenderSettings;

/// One captured render-target call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Frame cleared
    Clear(Color),
    /// Image quad drawn
    Image {
        /// Placement as handed over by the sprite
        transform: SpriteTransform,
        /// Screen-space corners: top-left, top-right, bottom-right, bottom-left
        corners: [Vector2f; 4],
        /// Bound image file
        image: Option<PathBuf>,
        /// Bound text-art file
        ascii: Option<PathBuf>,
    },
    /// String drawn
    Text {
        /// Top-left of the first line
        position: Vector2f,
        /// Drawn string
        text: String,
        /// Font file, `None` for the default font
        font: Option<PathBuf>,
        /// Character size in pixels
        size: u32,
        /// Fill color
        color: Color,
    },
    /// Frame presented
    Display,
}

impl DrawCommand {
    /// Capture an image draw
    pub fn image(image: &ImageDraw<'_>) -> Self {
        Self::Image {
            transform: image.transform,
            corners: image.corners(),
            image: image.image_file.map(std::path::Path::to_path_buf),
            ascii: image.ascii.map(|a| a.path().to_path_buf()),
        }
    }

    /// Capture a text draw
    pub fn text(text: &TextDraw<'_>) -> Self {
        Self::Text {
            position: text.position,
            text: text.text.to_string(),
            font: text.font.map(std::path::Path::to_path_buf),
            size: text.size,
            color: text.color,
        }
    }
}

/// Render target that records instead of painting
#[derive(Debug)]
pub struct RecordingTarget {
    size: Vector2u,
    commands: Vec<DrawCommand>,
    frames_presented: u64,
}

impl RecordingTarget {
    /// Create a target with the given resolution
    pub const fn new(size: Vector2u) -> Self {
        Self {
            size,
            commands: Vec::new(),
            frames_presented: 0,
        }
    }

    /// Commands captured since the last [`take_commands`](Self::take_commands)
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the captured commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of `display` calls so far
    pub const fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl RenderTarget for RecordingTarget {
    fn size(&self) -> Vector2u {
        self.size
    }

    fn supports_bitmaps(&self) -> bool {
        true
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_image(&mut self, image: &ImageDraw<'_>) -> RenderResult<()> {
        self.commands.push(DrawCommand::image(image));
        Ok(())
    }

    fn draw_text(&mut self, text: &TextDraw<'_>) -> RenderResult<()> {
        self.commands.push(DrawCommand::text(text));
        Ok(())
    }

    fn display(&mut self) -> RenderResult<()> {
        self.commands.push(DrawCommand::Display);
        self.frames_presented += 1;
        Ok(())
    }
}

/// Wraps any target, recording each call before forwarding it
///
/// Lets a test capture what reached a real backend's target. Commands are
/// recorded only when the inner target accepted them.
pub struct RecordingLayer<'a> {
    inner: &'a mut dyn RenderTarget,
    commands: Vec<DrawCommand>,
}

impl<'a> RecordingLayer<'a> {
    /// Wrap `inner`
    pub fn new(inner: &'a mut dyn RenderTarget) -> Self {
        Self {
            inner,
            commands: Vec::new(),
        }
    }

    /// Commands that reached the inner target
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Unwrap into the recorded commands
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl RenderTarget for RecordingLayer<'_> {
    fn size(&self) -> Vector2u {
        self.inner.size()
    }

    fn supports_bitmaps(&self) -> bool {
        self.inner.supports_bitmaps()
    }

    fn clear(&mut self, color: Color) {
        self.inner.clear(color);
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_image(&mut self, image: &ImageDraw<'_>) -> RenderResult<()> {
        self.inner.draw_image(image)?;
        self.commands.push(DrawCommand::image(image));
        Ok(())
    }

    fn draw_text(&mut self, text: &TextDraw<'_>) -> RenderResult<()> {
        self.inner.draw_text(text)?;
        self.commands.push(DrawCommand::text(text));
        Ok(())
    }

    fn display(&mut self) -> RenderResult<()> {
        self.inner.display()?;
        self.commands.push(DrawCommand::Display);
        Ok(())
    }
}

/// Headless backend around a [`RecordingTarget`]
///
/// Input comes from a script queued with [`push_event`](Self::push_event).
pub struct RecordingBackend {
    settings: RenderSettings,
    target: RecordingTarget,
    events: VecDeque<InputEvent>,
}

impl RecordingBackend {
    /// Create a recording backend
    pub fn new(settings: RenderSettings) -> Self {
        log::debug!("Recording backend ready ({}x{})", settings.size.x, settings.size.y);
        Self {
            settings,
            target: RecordingTarget::new(settings.size),
            events: VecDeque::new(),
        }
    }

    /// Queue an input event for a later [`poll_event`](Backend::poll_event)
    pub fn push_event(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// The concrete recording target
    pub const fn recording(&self) -> &RecordingTarget {
        &self.target
    }

    /// Mutable access to the concrete recording target
    pub fn recording_mut(&mut self) -> &mut RecordingTarget {
        &mut self.target
    }
}

impl EntityFactory for RecordingBackend {
    fn create_sprite(&self) -> Box<dyn Sprite> {
        Box::new(StandardSprite::new())
    }

    fn create_text(&self) -> Box<dyn Text> {
        Box::new(StandardText::new())
    }
}

impl Backend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    fn target(&mut self) -> &mut dyn RenderTarget {
        &mut self.target
    }

    fn poll_event(&mut self) -> RenderResult<Option<InputEvent>> {
        Ok(self.events.pop_front())
    }

    fn as_factory(&self) -> &dyn EntityFactory {
        self
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    #[test]
    fn test_empty_text_records_nothing() {
        let mut backend = RecordingBackend::new(RenderSettings::default());
        let text = backend.create_text();

        text.draw(backend.target()).unwrap();
        assert!(backend.recording().commands().is_empty());
    }

    #[test]
    fn test_text_color_arrives_unchanged() {
        let mut backend = RecordingBackend::new(RenderSettings::default());
        let mut text = backend.create_text();
        text.set_text("SCORE 100");
        text.set_color(Color::rgba(1, 128, 254, 200));
        text.move_to(Vector2f::new(5.0, 6.0));

        text.draw(backend.target()).unwrap();

        assert_eq!(
            backend.recording().commands(),
            [DrawCommand::Text {
                position: Vector2f::new(5.0, 6.0),
                text: "SCORE 100".to_string(),
                font: None,
                size: 30,
                color: Color::rgba(1, 128, 254, 200),
            }]
        );
    }

    #[test]
    fn test_unbound_sprite_records_nothing() {
        let mut backend = RecordingBackend::new(RenderSettings::default());
        let sprite = backend.create_sprite();

        sprite.draw(backend.target()).unwrap();
        assert!(backend.recording().commands().is_empty());
    }

    #[test]
    fn test_scripted_events_in_order() {
        let mut backend = RecordingBackend::new(RenderSettings::default());
        backend.push_event(InputEvent::pressed(KeyCode::Left));
        backend.push_event(InputEvent::pressed(KeyCode::Unknown));

        assert_eq!(backend.poll_event().unwrap(), Some(InputEvent::pressed(KeyCode::Left)));
        assert_eq!(backend.poll_event().unwrap(), Some(InputEvent::pressed(KeyCode::Unknown)));
        assert_eq!(backend.poll_event().unwrap(), None);
    }

    #[test]
    fn test_layer_records_forwarded_calls() {
        let mut inner = RecordingTarget::new(Vector2u::new(64, 64));
        let mut layer = RecordingLayer::new(&mut inner);
        layer.clear(Color::BLACK);
        layer.display().unwrap();
        let recorded = layer.into_commands();

        assert_eq!(recorded, inner.commands());
        assert_eq!(inner.frames_presented(), 1);
    }
}
