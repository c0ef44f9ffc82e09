/// Cursor sprite sampling: reads the geometry the compositor helper publishes.
///
/// The compositor side (a shell extension or similar) writes a single line
///   <width> <height> <hot_x> <hot_y>
/// to the sprite file whenever the pointer image changes, and removes the
/// file while no cursor is rendered. A missing, unreadable or garbled file
/// all mean "no sample". The session tracker treats that as a non-hand
/// cursor, which is what drives an exit when the pointer vanishes.

use std::path::PathBuf;

/// One observation of the pointer's rendered sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorSample {
    pub width: u32,
    pub height: u32,
    pub hot_x: u32,
    pub hot_y: u32,
}

impl CursorSample {
    /// Parse from the sprite file content: exactly four unsigned integers,
    /// whitespace-separated. Anything else is None.
    pub fn parse(s: &str) -> Option<Self> {
        let mut fields = s.split_ascii_whitespace();
        let width = fields.next()?.parse().ok()?;
        let height = fields.next()?.parse().ok()?;
        let hot_x = fields.next()?.parse().ok()?;
        let hot_y = fields.next()?.parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(CursorSample { width, height, hot_x, hot_y })
    }
}

/// Reads the current sprite geometry from the helper's state file.
pub struct SpriteSampler {
    path: PathBuf,
}

impl SpriteSampler {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Current sample, or None if no cursor is published right now.
    pub fn sample(&self) -> Option<CursorSample> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let sample = CursorSample::parse(&contents);
        if sample.is_none() {
            log::debug!("Unparseable sprite file content: {:?}", contents.trim());
        }
        sample
    }
}
