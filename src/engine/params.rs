#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Envelope and brightness parameters for one MIDI channel.
///
/// The engine holds sixteen of these, each independently mutable. Records
/// are plain values copied from [`ChannelParams::default`] on reset, so no
/// channel ever aliases another's settings.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelParams {
    pub attack_ms: f32,
    pub decay_ms: f32,
    /// Level held after decay, 0.0 - 1.0. Zero makes notes one-shot.
    pub sustain_level: f32,
    pub release_ms: f32,
    /// Brightness floor applied after envelope scaling, 0x00 - 0xFF.
    pub base_brightness: u8,
    /// Disabled channels drop note events entirely.
    pub enabled: bool,
}

impl Default for ChannelParams {
    fn default() -> Self {
        Self {
            attack_ms: 80.0,
            decay_ms: 3000.0,
            sustain_level: 0.0,
            release_ms: 400.0,
            base_brightness: 0x00,
            enabled: true,
        }
    }
}
