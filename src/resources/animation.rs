//! Sprite Animation Resources
//!
//! An animation is described by a JSON sidecar next to its sheet:
//!
//! ```json
//! {
//!     "sheet": "img/characters/hero.png",
//!     "frame_width": 48,
//!     "frame_height": 48,
//!     "frames": [
//!         { "index": 0, "duration_ms": 120 },
//!         { "index": 1, "duration_ms": 120 }
//!     ],
//!     "looping": true
//! }
//! ```
//!
//! The loader decodes the sheet alongside the definition, so a ready
//! animation is GPU-bound like a texture.

use serde::Deserialize;

use crate::errors::{ResourceError, Result};
use crate::resources::image::Image;

/// One frame of a sprite animation: a cell index into the sheet plus how
/// long the frame stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FrameDef {
    pub index: u32,
    pub duration_ms: u32,
}

/// Parsed animation definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnimationDef {
    /// Sheet path, relative to the asset root.
    pub sheet: String,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frames: Vec<FrameDef>,
    #[serde(default = "default_looping")]
    pub looping: bool,
}

fn default_looping() -> bool {
    true
}

impl AnimationDef {
    /// Parses and validates a definition from JSON bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let def: Self = serde_json::from_slice(bytes)?;
        if def.frames.is_empty() {
            return Err(ResourceError::InvalidData(format!(
                "animation \"{}\" has no frames",
                def.sheet
            )));
        }
        if def.frame_width == 0 || def.frame_height == 0 {
            return Err(ResourceError::InvalidData(format!(
                "animation \"{}\" has zero frame dimensions",
                def.sheet
            )));
        }
        Ok(def)
    }

    /// Sum of all frame durations.
    #[must_use]
    pub fn total_duration_ms(&self) -> u32 {
        self.frames.iter().map(|f| f.duration_ms).sum()
    }
}

/// A ready sprite animation: definition plus decoded sheet pixels.
#[derive(Debug)]
pub struct SpriteAnimation {
    pub name: String,
    pub def: AnimationDef,
    pub sheet: Image,
}

impl SpriteAnimation {
    pub fn new(name: impl Into<String>, def: AnimationDef, sheet: Image) -> Self {
        Self {
            name: name.into(),
            def,
            sheet,
        }
    }

    /// Single-frame fallback over a placeholder sheet.
    #[must_use]
    pub fn placeholder(name: &str) -> Self {
        let def = AnimationDef {
            sheet: String::new(),
            frame_width: 1,
            frame_height: 1,
            frames: vec![FrameDef {
                index: 0,
                duration_ms: 1,
            }],
            looping: true,
        };
        Self::new(name, def, Image::solid_color(name, [255, 0, 255, 255]))
    }

    /// Frame visible at `elapsed_ms` since playback start, or `None` for
    /// an empty frame list.
    ///
    /// Looping animations wrap; non-looping animations hold their last
    /// frame once the total duration has passed.
    #[must_use]
    pub fn frame_at(&self, elapsed_ms: u32) -> Option<&FrameDef> {
        let total = self.def.total_duration_ms();
        // Zero-duration frame lists degenerate to the first frame.
        if total == 0 {
            return self.def.frames.first();
        }

        let mut t = if self.def.looping {
            elapsed_ms % total
        } else if elapsed_ms >= total {
            return self.def.frames.last();
        } else {
            elapsed_ms
        };

        for frame in &self.def.frames {
            if t < frame.duration_ms {
                return Some(frame);
            }
            t -= frame.duration_ms;
        }
        self.def.frames.last()
    }

    /// Sheet pixel memory plus frame table, in bytes.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.sheet.byte_size() + self.def.frames.len() * std::mem::size_of::<FrameDef>()
    }
}
