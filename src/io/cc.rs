//! MIDI Control Change routing onto engine and color-mapper parameters.

use crate::color::{ColorMap, MidiColors, Palette};
use crate::engine::MidiLeds;
use crate::DATA_MASK;

pub const CC_PALETTE: u8 = 0x14;
pub const CC_COLOR_MAP: u8 = 0x15;
pub const CC_FIXED_HUE: u8 = 0x16;
pub const CC_ATTACK_TIME: u8 = 0x17;
pub const CC_DECAY_TIME: u8 = 0x18;
pub const CC_SUSTAIN_LEVEL: u8 = 0x19;
pub const CC_RELEASE_TIME: u8 = 0x1A;
pub const CC_IGNORE_VELOCITY: u8 = 0x1B;
pub const CC_BASE_BRIGHTNESS: u8 = 0x1C;
pub const CC_ENABLED: u8 = 0x1D;

/// Maps Control Change messages onto engine and color-mapper parameters.
///
/// Time-valued controls spread the 7-bit CC value across a configurable
/// time range (default 5 seconds); switch-valued controls treat 0x40 and
/// above as on. Unknown controllers are ignored.
pub struct CcRouter {
    time_range_ms: f32,
}

impl CcRouter {
    pub fn new() -> Self {
        Self {
            time_range_ms: 5000.0,
        }
    }

    /// The time range used to scale attack/decay/release CC values.
    pub fn time_range(&self) -> f32 {
        self.time_range_ms
    }

    pub fn set_time_range(&mut self, time_range_ms: f32) {
        self.time_range_ms = time_range_ms;
    }

    /// Process a Control Change message against the given engine.
    pub fn control_change(
        &self,
        leds: &mut MidiLeds<MidiColors>,
        channel: u8,
        control: u8,
        value: u8,
    ) {
        let value = value & DATA_MASK;
        match control {
            CC_PALETTE => {
                if let Some(palette) = Palette::from_index(value) {
                    leds.colors_mut().set_palette(channel, palette);
                }
            }
            CC_COLOR_MAP => {
                if let Some(map) = ColorMap::from_index(value) {
                    leds.colors_mut().set_color_map(channel, map);
                }
            }
            CC_FIXED_HUE => {
                let hue = (255.0 * (value as f32 / 127.0)).round() as u8;
                leds.colors_mut().set_fixed_hue(channel, hue);
            }
            CC_ATTACK_TIME => leds.set_attack_time(channel, self.scale_time(value)),
            CC_DECAY_TIME => leds.set_decay_time(channel, self.scale_time(value)),
            CC_SUSTAIN_LEVEL => leds.set_sustain_level(channel, value as f32 / 127.0),
            CC_RELEASE_TIME => leds.set_release_time(channel, self.scale_time(value)),
            CC_IGNORE_VELOCITY => {
                leds.colors_mut().set_ignore_velocity(channel, value >= 0x40);
            }
            CC_BASE_BRIGHTNESS => leds.set_base_brightness(channel, value),
            CC_ENABLED => leds.set_enabled(channel, value >= 0x40),
            _ => {}
        }
    }

    fn scale_time(&self, value: u8) -> f32 {
        (self.time_range_ms * (value as f32 / 127.0)).round()
    }
}

impl Default for CcRouter {
    fn default() -> Self {
        Self::new()
    }
}
