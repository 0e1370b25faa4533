//! Note-to-color mapping.
//!
//! The engine never invents colors on its own: every note-on asks a
//! [`ColorSource`] for the base color of that (channel, note, velocity)
//! triple, exactly once, and caches the result in the voice. The per-tick
//! composite pass only scales the cached value component by the envelope
//! output.

/// Palette-based color source with per-channel mapping parameters.
pub mod mapper;

pub use mapper::{ColorMap, ColorParams, MidiColors, Palette};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A color in 8-bit hue/saturation/value representation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsv8 {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv8 {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    /// Convert to 8-bit RGB for display devices that want it.
    pub fn to_rgb(self) -> (u8, u8, u8) {
        let h = self.h as f32 / 255.0;
        let s = self.s as f32 / 255.0;
        let v = self.v as f32 / 255.0;

        let i = (h * 6.0).floor();
        let f = h * 6.0 - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - f * s);
        let t = v * (1.0 - (1.0 - f) * s);

        let (r, g, b) = match i as u32 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        (
            (r * 255.0).floor() as u8,
            (g * 255.0).floor() as u8,
            (b * 255.0).floor() as u8,
        )
    }
}

/// Source of base colors for note-on events.
///
/// Implementations must be pure with respect to the engine: the engine
/// queries `color_for` once per successful note-on and never during a tick.
pub trait ColorSource {
    fn color_for(&self, channel: u8, note: u8, velocity: u8) -> Hsv8;
}
