use crate::color::Hsv8;
use crate::dsp::envelope::AdsrEnvelope;

/// One slot of polyphony: an envelope bound to a (channel, note) identity
/// plus the base color cached at note-on time.
///
/// Slots are owned exclusively by the pool and reused indefinitely. After a
/// voice goes idle its identity fields are stale until the next rebind, so
/// lookups must always check the envelope state as well.
pub struct Voice {
    pub(crate) channel: u8,
    pub(crate) note: u8,
    pub(crate) color: Hsv8,
    pub(crate) envelope: AdsrEnvelope,
    /// Ticks survived since the last (re)allocation; the steal policy
    /// targets the slot with the greatest age.
    pub(crate) age: u64,
}

impl Voice {
    pub(crate) fn new() -> Self {
        Self {
            channel: 0x0,
            note: 0x0,
            color: Hsv8::default(),
            envelope: AdsrEnvelope::new(),
            age: 0,
        }
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.envelope.is_idle()
    }
}
