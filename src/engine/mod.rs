// Purpose: Voice management, polyphony, per-tick compositing
// This layer sits above the envelope primitive and owns the voice pool

pub mod leds;
pub mod message;
pub mod params;
pub mod voice;

pub use leds::MidiLeds;
pub use message::{LedMessage, MessageReceiver};
pub use params::ChannelParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Construction-time settings for a [`MidiLeds`] engine.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Lowest note with an LED position (masked to 7 bits).
    pub note_min: u8,
    /// Highest note with an LED position, inclusive (masked to 7 bits).
    pub note_max: u8,
    /// Fixed size of the voice pool; never resized after construction.
    pub voices: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            note_min: 0x00,
            note_max: 0x7F,
            voices: 32,
        }
    }
}

/// Errors that can occur when constructing an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The note window is empty (min above max after masking).
    EmptyNoteWindow { note_min: u8, note_max: u8 },
    /// A voice pool needs at least one slot.
    NoVoices,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::EmptyNoteWindow { note_min, note_max } => {
                write!(
                    f,
                    "empty note window: note_min {} is above note_max {}",
                    note_min, note_max
                )
            }
            EngineError::NoVoices => write!(f, "voice pool must have at least one slot"),
        }
    }
}

impl std::error::Error for EngineError {}
