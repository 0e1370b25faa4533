//! Palette-based note colors with independent per-channel parameters.
//!
//! Three mapping strategies are supported, dispatched once per note-on:
//! historical note-to-color maps (one of thirteen published pitch-class
//! color systems), a rainbow spread across the configured note window, and
//! a single fixed hue. Velocity optionally scales the value component.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{ColorSource, Hsv8};
use crate::{CHANNEL_MASK, DATA_MASK, NUM_CHANNELS};

/// Color mapping strategy for a channel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// Look the pitch class up in the channel's [`ColorMap`].
    #[default]
    ColorMap,
    /// Spread the hue circle linearly across the note window.
    Rainbow,
    /// Use the channel's fixed hue for every note.
    FixedHue,
}

impl Palette {
    /// Decode a palette from its wire index (e.g. a MIDI CC value).
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Palette::ColorMap),
            1 => Some(Palette::Rainbow),
            2 => Some(Palette::FixedHue),
            _ => None,
        }
    }
}

/// Historical pitch-class color systems, C through B.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMap {
    Aeppli1940,
    Belmont1944,
    Bertrand1734,
    Bishop1893,
    Field1816,
    Helmholtz1910,
    Jameson1844,
    Klein1930,
    #[default]
    Newton1704,
    Rimington1893,
    Scriabin1911,
    Seemann1881,
    Zieverink2004,
}

impl ColorMap {
    /// Decode a color map from its wire index (e.g. a MIDI CC value).
    pub fn from_index(index: u8) -> Option<Self> {
        use ColorMap::*;
        match index {
            0 => Some(Aeppli1940),
            1 => Some(Belmont1944),
            2 => Some(Bertrand1734),
            3 => Some(Bishop1893),
            4 => Some(Field1816),
            5 => Some(Helmholtz1910),
            6 => Some(Jameson1844),
            7 => Some(Klein1930),
            8 => Some(Newton1704),
            9 => Some(Rimington1893),
            10 => Some(Scriabin1911),
            11 => Some(Seemann1881),
            12 => Some(Zieverink2004),
            _ => None,
        }
    }
}

/// HSV8 data for the thirteen color maps, twelve pitch classes each.
const COLOR_MAP_DATA: [[(u8, u8, u8); 12]; 13] = [
    // aeppli1940
    [
        (0, 245, 250),
        (10, 240, 250),
        (20, 238, 248),
        (32, 209, 248),
        (42, 192, 245),
        (69, 232, 220),
        (96, 220, 143),
        (122, 207, 145),
        (136, 209, 156),
        (150, 209, 161),
        (194, 227, 125),
        (214, 240, 125),
    ],
    // belmont1944
    [
        (0, 245, 250),
        (9, 238, 245),
        (20, 238, 248),
        (35, 235, 248),
        (42, 192, 245),
        (51, 192, 225),
        (96, 220, 143),
        (122, 207, 145),
        (176, 230, 130),
        (222, 225, 168),
        (231, 232, 217),
        (240, 235, 174),
    ],
    // bertrand1734
    [
        (176, 230, 130),
        (122, 207, 145),
        (96, 220, 143),
        (56, 189, 145),
        (42, 192, 245),
        (34, 192, 245),
        (20, 238, 248),
        (0, 245, 250),
        (0, 240, 158),
        (231, 232, 217),
        (194, 227, 125),
        (214, 240, 125),
    ],
    // bishop1893
    [
        (0, 245, 250),
        (0, 240, 158),
        (20, 238, 248),
        (35, 235, 248),
        (42, 192, 245),
        (51, 192, 225),
        (96, 220, 143),
        (115, 197, 166),
        (214, 240, 125),
        (231, 232, 217),
        (243, 225, 215),
        (0, 245, 250),
    ],
    // field1816
    [
        (176, 230, 130),
        (196, 235, 133),
        (214, 240, 125),
        (236, 245, 192),
        (0, 245, 250),
        (20, 238, 248),
        (32, 209, 248),
        (42, 192, 245),
        (49, 220, 220),
        (56, 189, 145),
        (76, 207, 151),
        (96, 220, 143),
    ],
    // helmholtz1910
    [
        (42, 192, 245),
        (96, 220, 143),
        (122, 207, 145),
        (150, 209, 161),
        (214, 240, 125),
        (231, 232, 217),
        (234, 232, 161),
        (0, 245, 250),
        (7, 243, 209),
        (7, 243, 209),
        (5, 240, 248),
        (19, 240, 243),
    ],
    // jameson1844
    [
        (0, 245, 250),
        (9, 238, 245),
        (20, 238, 248),
        (34, 192, 245),
        (42, 192, 245),
        (96, 220, 143),
        (122, 207, 145),
        (176, 230, 130),
        (194, 227, 125),
        (214, 240, 125),
        (222, 225, 168),
        (231, 232, 217),
    ],
    // klein1930
    [
        (0, 243, 194),
        (0, 245, 250),
        (9, 238, 245),
        (20, 238, 248),
        (42, 192, 245),
        (51, 192, 225),
        (96, 220, 143),
        (122, 207, 145),
        (176, 230, 130),
        (207, 209, 135),
        (231, 232, 217),
        (234, 232, 161),
    ],
    // newton1704
    [
        (0, 245, 250),
        (10, 240, 250),
        (20, 238, 248),
        (32, 209, 248),
        (42, 192, 245),
        (96, 220, 143),
        (136, 227, 143),
        (176, 230, 130),
        (196, 235, 133),
        (214, 240, 125),
        (223, 238, 176),
        (231, 232, 217),
    ],
    // rimington1893
    [
        (0, 245, 250),
        (0, 240, 158),
        (9, 238, 245),
        (20, 238, 248),
        (42, 192, 245),
        (56, 189, 145),
        (96, 220, 143),
        (115, 197, 166),
        (122, 207, 145),
        (214, 240, 125),
        (176, 230, 130),
        (231, 232, 217),
    ],
    // scriabin1911
    [
        (0, 245, 250),
        (231, 232, 217),
        (42, 192, 245),
        (174, 89, 133),
        (150, 209, 161),
        (0, 240, 158),
        (176, 230, 130),
        (20, 238, 248),
        (214, 240, 125),
        (96, 220, 143),
        (174, 89, 133),
        (150, 209, 161),
    ],
    // seemann1881
    [
        (0, 186, 104),
        (0, 245, 250),
        (20, 238, 248),
        (34, 192, 245),
        (42, 192, 245),
        (96, 220, 143),
        (122, 207, 145),
        (176, 230, 130),
        (214, 240, 125),
        (231, 232, 217),
        (0, 186, 104),
        (0, 0, 7),
    ],
    // zieverink2004
    [
        (51, 192, 225),
        (96, 220, 143),
        (122, 207, 145),
        (176, 230, 130),
        (214, 240, 125),
        (231, 232, 217),
        (231, 225, 110),
        (0, 240, 158),
        (0, 245, 250),
        (20, 238, 248),
        (44, 110, 240),
        (42, 192, 245),
    ],
];

/// Mapping parameters for one MIDI channel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorParams {
    pub palette: Palette,
    pub color_map: ColorMap,
    pub fixed_hue: u8,
    /// When set, every note maps as if struck at full velocity.
    pub ignore_velocity: bool,
}

impl Default for ColorParams {
    fn default() -> Self {
        Self {
            palette: Palette::ColorMap,
            color_map: ColorMap::Newton1704,
            fixed_hue: 0x00,
            ignore_velocity: true,
        }
    }
}

/// Palette-based [`ColorSource`] with one parameter record per channel.
pub struct MidiColors {
    note_min: u8,
    note_max: u8,
    params: [ColorParams; NUM_CHANNELS],
}

impl MidiColors {
    /// Create a mapper for the given note window (used for rainbow scaling).
    pub fn new(note_min: u8, note_max: u8) -> Self {
        Self {
            note_min: note_min & DATA_MASK,
            note_max: note_max & DATA_MASK,
            params: [ColorParams::default(); NUM_CHANNELS],
        }
    }

    pub fn set_palette(&mut self, channel: u8, palette: Palette) {
        self.params[(channel & CHANNEL_MASK) as usize].palette = palette;
    }

    pub fn palette(&self, channel: u8) -> Palette {
        self.params[(channel & CHANNEL_MASK) as usize].palette
    }

    pub fn set_color_map(&mut self, channel: u8, color_map: ColorMap) {
        self.params[(channel & CHANNEL_MASK) as usize].color_map = color_map;
    }

    pub fn color_map(&self, channel: u8) -> ColorMap {
        self.params[(channel & CHANNEL_MASK) as usize].color_map
    }

    pub fn set_fixed_hue(&mut self, channel: u8, fixed_hue: u8) {
        self.params[(channel & CHANNEL_MASK) as usize].fixed_hue = fixed_hue;
    }

    pub fn fixed_hue(&self, channel: u8) -> u8 {
        self.params[(channel & CHANNEL_MASK) as usize].fixed_hue
    }

    pub fn set_ignore_velocity(&mut self, channel: u8, state: bool) {
        self.params[(channel & CHANNEL_MASK) as usize].ignore_velocity = state;
    }

    pub fn is_ignore_velocity(&self, channel: u8) -> bool {
        self.params[(channel & CHANNEL_MASK) as usize].ignore_velocity
    }

    /// Restore a channel's mapping parameters to their defaults.
    pub fn reset(&mut self, channel: u8) {
        self.params[(channel & CHANNEL_MASK) as usize] = ColorParams::default();
    }
}

fn scale_value(velocity: u8, value: u8) -> u8 {
    (velocity as f32 / 127.0 * value as f32).round() as u8
}

impl ColorSource for MidiColors {
    fn color_for(&self, channel: u8, note: u8, velocity: u8) -> Hsv8 {
        let p = &self.params[(channel & CHANNEL_MASK) as usize];
        let note = note & DATA_MASK;
        let velocity = if p.ignore_velocity {
            DATA_MASK
        } else {
            velocity & DATA_MASK
        };

        match p.palette {
            Palette::ColorMap => {
                let (h, s, v) = COLOR_MAP_DATA[p.color_map as usize][note as usize % 12];
                Hsv8::new(h, s, scale_value(velocity, v))
            }
            Palette::Rainbow => {
                let span = self.note_max as f32 - self.note_min as f32 + 1.0;
                let hue =
                    (note.saturating_sub(self.note_min) as f32 * (255.0 / span)).round();
                Hsv8::new(
                    hue.min(255.0) as u8,
                    0xFF,
                    scale_value(velocity, 0xFF),
                )
            }
            Palette::FixedHue => Hsv8::new(p.fixed_hue, 0xFF, scale_value(velocity, 0xFF)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_map_looks_up_pitch_class() {
        let colors = MidiColors::new(0, 127);
        // Middle C is pitch class 0: first entry of the Newton map.
        assert_eq!(colors.color_for(0, 60, 127), Hsv8::new(0, 245, 250));
        // C# one octave up shares the pitch class of any other C#.
        assert_eq!(colors.color_for(0, 61, 127), colors.color_for(0, 73, 127));
    }

    #[test]
    fn velocity_scales_value_when_not_ignored() {
        let mut colors = MidiColors::new(0, 127);

        // Default ignores velocity: a quiet note maps at full value.
        assert_eq!(colors.color_for(0, 60, 10).v, 250);

        colors.set_ignore_velocity(0, false);
        let quiet = colors.color_for(0, 60, 64);
        assert_eq!(quiet.v, (64.0 / 127.0 * 250.0_f32).round() as u8);
    }

    #[test]
    fn rainbow_spreads_hue_over_note_window() {
        let mut colors = MidiColors::new(0, 127);
        colors.set_palette(0, Palette::Rainbow);

        let low = colors.color_for(0, 0, 127);
        let high = colors.color_for(0, 127, 127);
        assert_eq!(low.h, 0);
        assert!(high.h > 250);
        assert_eq!(low.s, 0xFF);
        assert_eq!(low.v, 0xFF);
    }

    #[test]
    fn fixed_hue_uses_channel_hue() {
        let mut colors = MidiColors::new(0, 127);
        colors.set_palette(3, Palette::FixedHue);
        colors.set_fixed_hue(3, 42);

        assert_eq!(colors.color_for(3, 60, 127), Hsv8::new(42, 0xFF, 0xFF));
        // Other channels keep their own palette.
        assert_eq!(colors.color_for(0, 60, 127), Hsv8::new(0, 245, 250));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut colors = MidiColors::new(0, 127);
        colors.set_palette(5, Palette::FixedHue);
        colors.set_fixed_hue(5, 200);
        colors.set_ignore_velocity(5, false);

        colors.reset(5);
        assert_eq!(colors.palette(5), Palette::ColorMap);
        assert_eq!(colors.fixed_hue(5), 0);
        assert!(colors.is_ignore_velocity(5));
    }

    #[test]
    fn channel_arguments_are_masked() {
        let mut colors = MidiColors::new(0, 127);
        colors.set_fixed_hue(0x13, 99); // channel 0x13 & 0x0F == 3
        assert_eq!(colors.fixed_hue(3), 99);
    }

    #[test]
    fn palette_and_map_decode_from_indices() {
        assert_eq!(Palette::from_index(1), Some(Palette::Rainbow));
        assert_eq!(Palette::from_index(3), None);
        assert_eq!(ColorMap::from_index(8), Some(ColorMap::Newton1704));
        assert_eq!(ColorMap::from_index(13), None);
    }
}
