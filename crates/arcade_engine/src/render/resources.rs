//! File-backed resources owned by sprites and text entities
//!
//! Loading is synchronous and cheap: bitmaps only have their header probed,
//! fonts only their magic bytes. A drawable owns what it loaded and drops it
//! with itself.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::{RenderError, RenderResult};

/// Probed bitmap image
#[derive(Debug, PartialEq, Eq)]
pub struct BitmapInfo {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl BitmapInfo {
    /// Probe an image file's header
    ///
    /// Fails with a resource error when the file is missing, unreadable, or
    /// not in a supported image format.
    pub fn load(path: &Path) -> RenderResult<Self> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            log::warn!("Failed to probe bitmap {}: {}", path.display(), e);
            RenderError::resource(path, e.to_string())
        })?;

        log::debug!("Probed bitmap {} ({}x{})", path.display(), width, height);
        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
        })
    }

    /// Source file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Text-mode art: the sprite's alternate representation
#[derive(Debug, PartialEq, Eq)]
pub struct AsciiArt {
    path: PathBuf,
    lines: Vec<String>,
}

impl AsciiArt {
    /// Read a text-art file
    ///
    /// Trailing carriage returns are dropped so CRLF files render the same.
    pub fn load(path: &Path) -> RenderResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            log::warn!("Failed to read text art {}: {}", path.display(), e);
            RenderError::resource(path, e.to_string())
        })?;

        let lines: Vec<String> = contents
            .lines()
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();

        log::debug!("Loaded text art {} ({} lines)", path.display(), lines.len());
        Ok(Self {
            path: path.to_path_buf(),
            lines,
        })
    }

    /// Source file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Art rows, top to bottom
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Widest row in characters
    pub fn columns(&self) -> usize {
        self.lines.iter().map(|line| line.chars().count()).max().unwrap_or(0)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.lines.len()
    }

    /// Character at `(column, row)`, if the art has one there
    pub fn char_at(&self, column: usize, row: usize) -> Option<char> {
        self.lines.get(row)?.chars().nth(column)
    }
}

/// Validated font file
#[derive(Debug, PartialEq, Eq)]
pub struct FontFile {
    path: PathBuf,
}

/// Leading bytes of the font containers we accept
const FONT_MAGICS: [[u8; 4]; 5] = [
    [0x00, 0x01, 0x00, 0x00], // TrueType
    *b"true",                 // Apple TrueType
    *b"OTTO",                 // OpenType (CFF)
    *b"ttcf",                 // TrueType collection
    *b"wOFF",                 // WOFF
];

impl FontFile {
    /// Check that `path` is a readable font file
    pub fn load(path: &Path) -> RenderResult<Self> {
        let mut magic = [0u8; 4];
        File::open(path)
            .and_then(|mut file| file.read_exact(&mut magic))
            .map_err(|e| {
                log::warn!("Failed to read font {}: {}", path.display(), e);
                RenderError::resource(path, e.to_string())
            })?;

        if !FONT_MAGICS.contains(&magic) {
            log::warn!("Unsupported font format in {}", path.display());
            return Err(RenderError::resource(path, "unsupported font format"));
        }

        log::debug!("Validated font {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Source file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
