//! Character-cell framebuffer for the terminal backend.

use crate::render::Color;

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Displayed character
    pub ch: char,
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::WHITE,
            bg: Color::BLACK,
        }
    }
}

/// 2D grid of styled character cells.
///
/// Writes outside the grid are dropped, so callers can clip by simply
/// writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a grid of default cells
    pub fn new(width: u16, height: u16) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    /// Columns
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Rows
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        let x = u16::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u16::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Cell at `(x, y)`, if inside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Overwrite one cell
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Fill every cell
    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Write a character, keeping the cell's background
    pub fn put_char(&mut self, x: i32, y: i32, ch: char, fg: Color) {
        if let Some(i) = self.idx(x, y) {
            let cell = &mut self.cells[i];
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    /// Write a string left to right from `(x, y)`, clipped to the grid
    pub fn put_str(&mut self, x: i32, y: i32, s: &str, fg: Color) {
        for (offset, ch) in (0..).zip(s.chars()) {
            self.put_char(x.saturating_add(offset), y, ch, fg);
        }
    }

    /// Row `y` as a string, for inspection
    pub fn row_text(&self, y: u16) -> String {
        let start = usize::from(y) * usize::from(self.width);
        self.cells
            .get(start..start + usize::from(self.width))
            .map(|row| row.iter().map(|cell| cell.ch).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_writes_are_dropped() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_char(-1, 0, 'x', Color::WHITE);
        fb.put_char(3, 0, 'x', Color::WHITE);
        fb.put_char(0, 2, 'x', Color::WHITE);

        assert!(fb.cells().iter().all(|cell| cell.ch == ' '));
    }

    #[test]
    fn test_put_str_clips_both_sides() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(-2, 0, "abcdef", Color::WHITE);
        assert_eq!(fb.row_text(0), "cdef");
    }

    #[test]
    fn test_put_char_keeps_background() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.clear(Cell { bg: Color::BLUE, ..Cell::default() });
        fb.put_char(0, 0, '@', Color::RED);

        assert_eq!(fb.get(0, 0), Some(Cell { ch: '@', fg: Color::RED, bg: Color::BLUE }));
    }
}
