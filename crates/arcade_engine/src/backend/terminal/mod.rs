//! Terminal backend
//!
//! Paints into a character-cell [`FrameBuffer`] and flushes it to the
//! terminal with `crossterm`, writing only the cells that changed since the
//! previous frame. Each cell stands for [`CELL_WIDTH`] x [`CELL_HEIGHT`]
//! pixels of the render resolution.
//!
//! Bitmaps are never painted here. Sprites draw from their text-mode art,
//! sampled through the same
//! [`SpriteTransform`](crate::foundation::math::SpriteTransform) every
//! backend uses. A sprite without art fails its draw with a resource error.

pub mod framebuffer;
pub mod keymap;

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event},
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use super::{Backend, EntityFactory};
use crate::foundation::math::{Point2, Vector2f, Vector2u};
use crate::input::InputEvent;
use crate::render::{
    Color, Drawable, ImageDraw, RenderError, RenderResult, RenderTarget, Sprite, SpriteState,
    StandardText, Text, TextDraw, Transform2D, Transformable,
};
use crate::window::RenderSettings;

pub use framebuffer::{Cell, FrameBuffer};

/// Pixels covered by one cell horizontally
pub const CELL_WIDTH: u32 = 8;

/// Pixels covered by one cell vertically
pub const CELL_HEIGHT: u32 = 16;

/// Character grid for a pixel resolution
pub fn grid_size(size: Vector2u) -> (u16, u16) {
    let cols = u16::try_from(size.x / CELL_WIDTH).unwrap_or(u16::MAX);
    let rows = u16::try_from(size.y / CELL_HEIGHT).unwrap_or(u16::MAX);
    (cols, rows)
}

fn to_term_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn cell_of(position: Vector2f) -> (i32, i32) {
    (
        (position.x / CELL_WIDTH as f32).floor() as i32,
        (position.y / CELL_HEIGHT as f32).floor() as i32,
    )
}

#[allow(clippy::cast_precision_loss)]
fn cell_center(x: i32, y: i32) -> Point2<f32> {
    Point2::new(
        (x as f32 + 0.5) * CELL_WIDTH as f32,
        (y as f32 + 0.5) * CELL_HEIGHT as f32,
    )
}

/// Index into `len` slots for a unit coordinate in `[0, 1)`
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn slot(t: f32, len: usize) -> usize {
    ((t * len as f32) as usize).min(len - 1)
}

/// Render target backed by a character framebuffer
pub struct TerminalTarget {
    size: Vector2u,
    back: FrameBuffer,
    front: Option<FrameBuffer>,
    out: Box<dyn Write>,
    frames_presented: u64,
}

impl TerminalTarget {
    /// Create a target that flushes frames to `out`
    pub fn with_writer(size: Vector2u, out: Box<dyn Write>) -> Self {
        let (cols, rows) = grid_size(size);
        Self {
            size,
            back: FrameBuffer::new(cols, rows),
            front: None,
            out,
            frames_presented: 0,
        }
    }

    /// Create a target that paints but discards its output
    pub fn headless(size: Vector2u) -> Self {
        Self::with_writer(size, Box::new(io::sink()))
    }

    /// Frame being painted
    pub const fn framebuffer(&self) -> &FrameBuffer {
        &self.back
    }

    /// Number of `display` calls so far
    pub const fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Queue every cell that differs from the last presented frame
    fn queue_changes(&mut self) -> io::Result<()> {
        let mut pen: Option<(Color, Color)> = None;
        for y in 0..self.back.height() {
            for x in 0..self.back.width() {
                let (cx, cy) = (i32::from(x), i32::from(y));
                let Some(cell) = self.back.get(cx, cy) else {
                    continue;
                };
                if self.front.as_ref().and_then(|front| front.get(cx, cy)) == Some(cell) {
                    continue;
                }
                self.out.queue(cursor::MoveTo(x, y))?;
                if pen != Some((cell.fg, cell.bg)) {
                    self.out.queue(SetForegroundColor(to_term_color(cell.fg)))?;
                    self.out.queue(SetBackgroundColor(to_term_color(cell.bg)))?;
                    pen = Some((cell.fg, cell.bg));
                }
                self.out.queue(Print(cell.ch))?;
            }
        }
        self.out.queue(ResetColor)?;
        Ok(())
    }
}

impl RenderTarget for TerminalTarget {
    fn size(&self) -> Vector2u {
        self.size
    }

    fn supports_bitmaps(&self) -> bool {
        false
    }

    fn clear(&mut self, color: Color) {
        self.back.clear(Cell {
            ch: ' ',
            fg: Color::WHITE,
            bg: color,
        });
    }

    fn draw_image(&mut self, image: &ImageDraw<'_>) -> RenderResult<()> {
        let Some(art) = image.ascii else {
            let path = image.image_file.unwrap_or_else(|| Path::new(""));
            return Err(RenderError::resource(path, "no text-mode art bound for terminal output"));
        };

        // Zero width or height covers no cells.
        let Some(inverse) = image.transform.to_matrix().try_inverse() else {
            return Ok(());
        };
        let (columns, rows) = (art.columns(), art.rows());
        if columns == 0 || rows == 0 {
            return Ok(());
        }

        let (min, max) = image.transform.bounds();
        let (x0, y0) = cell_of(min);
        let (x1, y1) = cell_of(max);
        let x_range = x0.max(0)..=x1.min(i32::from(self.back.width()) - 1);
        let y_range = y0.max(0)..=y1.min(i32::from(self.back.height()) - 1);

        for y in y_range {
            for x in x_range.clone() {
                let local = inverse.transform_point(&cell_center(x, y));
                if !(0.0..1.0).contains(&local.x) || !(0.0..1.0).contains(&local.y) {
                    continue;
                }
                match art.char_at(slot(local.x, columns), slot(local.y, rows)) {
                    Some(' ') | None => {}
                    Some(ch) => self.back.put_char(x, y, ch, Color::WHITE),
                }
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &TextDraw<'_>) -> RenderResult<()> {
        if text.color.a == 0 {
            return Ok(());
        }
        let (x, y) = cell_of(text.position);
        for (offset, line) in (0..).zip(text.text.lines()) {
            self.back.put_str(x, y.saturating_add(offset), line, text.color);
        }
        Ok(())
    }

    fn display(&mut self) -> RenderResult<()> {
        self.queue_changes()?;
        self.out.flush()?;
        self.front = Some(self.back.clone());
        self.frames_presented += 1;
        Ok(())
    }
}

/// Sprite for the terminal backend
///
/// Image files are only checked for readability; the text-mode art is
/// what gets painted.
#[derive(Debug, Default)]
pub struct TerminalSprite {
    state: SpriteState,
}

impl TerminalSprite {
    /// Create an unbound sprite at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Underlying attribute state
    pub const fn state(&self) -> &SpriteState {
        &self.state
    }
}

impl Transformable for TerminalSprite {
    fn transform(&self) -> &Transform2D {
        self.state.transform()
    }

    fn transform_mut(&mut self) -> &mut Transform2D {
        self.state.transform_mut()
    }
}

impl Drawable for TerminalSprite {
    fn draw(&self, target: &mut dyn RenderTarget) -> RenderResult<()> {
        self.state.draw_into(target)
    }
}

impl Sprite for TerminalSprite {
    fn set_image_file(&mut self, path: &Path) -> RenderResult<()> {
        self.state.bind_image_path(path)
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

fn init_error(context: &str, error: &io::Error) -> RenderError {
    RenderError::BackendInit(format!("{context}: {error}"))
}

/// Check that a cell grid is non-empty and fits the terminal
fn check_grid(size: Vector2u, grid: (u16, u16), available: (u16, u16)) -> RenderResult<()> {
    let (cols, rows) = grid;
    if cols == 0 || rows == 0 {
        return Err(RenderError::BackendInit(format!(
            "{}x{} is smaller than one {CELL_WIDTH}x{CELL_HEIGHT} cell",
            size.x, size.y
        )));
    }
    if cols > available.0 || rows > available.1 {
        return Err(RenderError::BackendInit(format!(
            "{}x{} needs {cols}x{rows} cells, terminal has {}x{}",
            size.x, size.y, available.0, available.1
        )));
    }
    Ok(())
}

/// Backend that owns the process terminal
///
/// Creation switches the terminal to raw mode on the alternate screen;
/// dropping the backend restores it.
pub struct TerminalBackend {
    settings: RenderSettings,
    target: TerminalTarget,
}

impl TerminalBackend {
    /// Take over the terminal
    ///
    /// # Errors
    /// [`RenderError::BackendInit`] if the resolution maps to an empty cell
    /// grid or to more cells than the terminal has, or if the terminal
    /// cannot enter raw mode.
    pub fn new(settings: RenderSettings) -> RenderResult<Self> {
        let (cols, rows) = grid_size(settings.size);
        let available = terminal::size().map_err(|e| init_error("query terminal size", &e))?;
        check_grid(settings.size, (cols, rows), available)?;

        terminal::enable_raw_mode().map_err(|e| init_error("enable raw mode", &e))?;
        let mut stdout = io::stdout();
        let entered = stdout
            .queue(terminal::EnterAlternateScreen)
            .and_then(|out| out.queue(cursor::Hide))
            .and_then(|out| out.queue(terminal::Clear(terminal::ClearType::All)))
            .and_then(|out| out.flush());
        if let Err(e) = entered {
            let _ = terminal::disable_raw_mode();
            return Err(init_error("enter alternate screen", &e));
        }

        log::info!("Terminal backend ready ({cols}x{rows} cells)");
        Ok(Self {
            settings,
            target: TerminalTarget::with_writer(settings.size, Box::new(stdout)),
        })
    }
}

impl Drop for TerminalBackend {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let restored = stdout
            .queue(ResetColor)
            .and_then(|out| out.queue(cursor::Show))
            .and_then(|out| out.queue(terminal::LeaveAlternateScreen))
            .and_then(|out| out.flush())
            .and_then(|()| terminal::disable_raw_mode());
        match restored {
            Ok(()) => log::debug!("Terminal restored"),
            Err(e) => log::warn!("Failed to restore terminal: {e}"),
        }
    }
}

impl EntityFactory for TerminalBackend {
    fn create_sprite(&self) -> Box<dyn Sprite> {
        Box::new(TerminalSprite::new())
    }

    fn create_text(&self) -> Box<dyn Text> {
        Box::new(StandardText::new())
    }
}

impl Backend for TerminalBackend {
    fn name(&self) -> &str {
        "terminal"
    }

    fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    fn target(&mut self) -> &mut dyn RenderTarget {
        &mut self.target
    }

    fn poll_event(&mut self) -> RenderResult<Option<InputEvent>> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => return Ok(Some(keymap::translate(key))),
                other => log::trace!("Ignoring terminal event {other:?}"),
            }
        }
        Ok(None)
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
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn art_sprite(dir: &Path, art: &str, size: Vector2f) -> TerminalSprite {
        let path = dir.join("art.txt");
        std::fs::write(&path, art).unwrap();
        let mut sprite = TerminalSprite::new();
        sprite.set_ascii_file(&path).unwrap();
        sprite.set_size(size);
        sprite
    }

    #[test]
    fn test_grid_size() {
        assert_eq!(grid_size(Vector2u::new(800, 600)), (100, 37));
        assert_eq!(grid_size(Vector2u::new(7, 600)), (0, 37));
    }

    #[test]
    fn test_grid_must_fit_terminal() {
        let size = Vector2u::new(800, 600);
        let error = check_grid(size, grid_size(size), (80, 24)).unwrap_err();
        assert!(matches!(&error, RenderError::BackendInit(msg) if msg.contains("80x24")));

        let size = Vector2u::new(640, 384);
        assert!(check_grid(size, grid_size(size), (80, 24)).is_ok());

        let size = Vector2u::new(u32::MAX, u32::MAX);
        assert!(check_grid(size, grid_size(size), (80, 24)).is_err());

        let size = Vector2u::new(7, 600);
        assert!(check_grid(size, grid_size(size), (80, 24)).is_err());
    }

    #[test]
    fn test_sprite_paints_art_cells() {
        let dir = tempfile::tempdir().unwrap();
        let mut sprite = art_sprite(dir.path(), "AB\nCD", Vector2f::new(16.0, 32.0));
        sprite.move_to(Vector2f::new(8.0, 16.0));

        let mut target = TerminalTarget::headless(Vector2u::new(64, 64));
        target.clear(Color::BLACK);
        sprite.draw(&mut target).unwrap();

        assert_eq!(target.framebuffer().row_text(0), "        ");
        assert_eq!(target.framebuffer().row_text(1), " AB     ");
        assert_eq!(target.framebuffer().row_text(2), " CD     ");
    }

    #[test]
    fn test_rotated_sprite_samples_through_transform() {
        let dir = tempfile::tempdir().unwrap();
        let mut sprite = art_sprite(dir.path(), "A\nB", Vector2f::new(16.0, 32.0));
        sprite.move_to(Vector2f::new(32.0, 0.0));
        sprite.set_rotation(90.0);

        let mut target = TerminalTarget::headless(Vector2u::new(64, 32));
        sprite.draw(&mut target).unwrap();

        assert_eq!(target.framebuffer().row_text(0), "BBAA    ");
    }

    #[test]
    fn test_zero_size_sprite_paints_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let sprite = art_sprite(dir.path(), "##", Vector2f::zeros());

        let mut target = TerminalTarget::headless(Vector2u::new(64, 64));
        sprite.draw(&mut target).unwrap();

        assert!(target.framebuffer().cells().iter().all(|cell| cell.ch == ' '));
    }

    #[test]
    fn test_image_without_art_is_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("ship.png");
        std::fs::write(&image, b"not decoded here").unwrap();

        let mut sprite = TerminalSprite::new();
        sprite.set_image_file(&image).unwrap();
        sprite.set_size(Vector2f::new(8.0, 16.0));

        let mut target = TerminalTarget::headless(Vector2u::new(64, 64));
        let error = sprite.draw(&mut target).unwrap_err();
        assert!(matches!(error, RenderError::Resource { ref path, .. } if *path == image));
    }

    #[test]
    fn test_missing_image_rejected_at_setter() {
        let mut sprite = TerminalSprite::new();
        let error = sprite.set_image_file(Path::new("no/such/ship.png")).unwrap_err();

        assert!(error.is_resource());
        assert_eq!(sprite.image_file(), None);
    }

    #[test]
    fn test_text_lands_on_cell_grid() {
        let mut text = StandardText::new();
        text.set_text("HI\nYO");
        text.set_color(Color::GREEN);
        text.move_to(Vector2f::new(17.0, 20.0));

        let mut target = TerminalTarget::headless(Vector2u::new(48, 48));
        text.draw(&mut target).unwrap();

        assert_eq!(target.framebuffer().row_text(1), "  HI  ");
        assert_eq!(target.framebuffer().row_text(2), "  YO  ");
        assert_eq!(target.framebuffer().get(2, 1).map(|cell| cell.fg), Some(Color::GREEN));
    }

    #[test]
    fn test_transparent_text_skipped() {
        let mut text = StandardText::new();
        text.set_text("ghost");
        text.set_color(Color::TRANSPARENT);

        let mut target = TerminalTarget::headless(Vector2u::new(64, 16));
        let before = target.framebuffer().clone();
        text.draw(&mut target).unwrap();

        assert_eq!(*target.framebuffer(), before);
    }

    #[test]
    fn test_display_writes_only_changes() {
        let buffer = SharedBuffer::default();
        let mut target = TerminalTarget::with_writer(Vector2u::new(32, 16), Box::new(buffer.clone()));

        target.clear(Color::BLACK);
        target.display().unwrap();
        let first = buffer.0.borrow().len();
        assert!(first > 0);

        target.display().unwrap();
        let unchanged = buffer.0.borrow().len() - first;

        let mut text = StandardText::new();
        text.set_text("X");
        text.draw(&mut target).unwrap();
        target.display().unwrap();
        let changed = buffer.0.borrow().len() - first - unchanged;

        assert!(unchanged < changed);
        assert_eq!(target.frames_presented(), 3);
    }
}
