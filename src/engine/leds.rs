//! The polyphonic LED engine: a fixed pool of envelope voices composited
//! into a per-note-position color frame on every clock tick.

use crate::color::{ColorSource, Hsv8};
use crate::engine::message::{LedMessage, MessageReceiver};
use crate::engine::params::ChannelParams;
use crate::engine::voice::Voice;
use crate::engine::{EngineConfig, EngineError};
use crate::{CHANNEL_MASK, DATA_MASK, NUM_CHANNELS};

/// ADSR-driven polyphonic MIDI LED engine.
///
/// Note events allocate voices from the pool (stealing the oldest slot
/// under pressure), and a periodic [`tick`](MidiLeds::tick) advances every
/// sounding envelope and rewrites the output frame in place. All entry
/// points are synchronous and infallible: out-of-policy input degrades to
/// a defined no-op, and channel/note/velocity arguments are masked to
/// their MIDI bit ranges rather than rejected.
pub struct MidiLeds<C: ColorSource> {
    voices: Vec<Voice>,
    params: [ChannelParams; NUM_CHANNELS],
    colors: C,
    note_min: u8,
    note_max: u8,
    frame: Vec<Hsv8>,
    active_voices: usize,
}

impl<C: ColorSource> MidiLeds<C> {
    /// Create an engine with the given note window and voice pool size.
    pub fn new(config: EngineConfig, colors: C) -> Result<Self, EngineError> {
        let note_min = config.note_min & DATA_MASK;
        let note_max = config.note_max & DATA_MASK;
        if note_min > note_max {
            return Err(EngineError::EmptyNoteWindow { note_min, note_max });
        }
        if config.voices == 0 {
            return Err(EngineError::NoVoices);
        }

        Ok(Self {
            voices: (0..config.voices).map(|_| Voice::new()).collect(),
            params: [ChannelParams::default(); NUM_CHANNELS],
            colors,
            note_min,
            note_max,
            frame: vec![Hsv8::default(); (note_max - note_min) as usize + 1],
            active_voices: 0,
        })
    }

    /// Process a Note-On event.
    ///
    /// Dropped silently when the note falls outside the configured window
    /// or the channel is disabled. Otherwise a voice is allocated (reusing
    /// the slot already bound to this (channel, note) if one exists), its
    /// color fetched from the color source, and its envelope armed with
    /// the channel's current parameters.
    pub fn note_on(&mut self, channel: u8, note: u8, velocity: u8) {
        let channel = channel & CHANNEL_MASK;
        let note = note & DATA_MASK;
        let velocity = velocity & DATA_MASK;
        if !self.in_window(note) || !self.params[channel as usize].enabled {
            return;
        }

        let p = self.params[channel as usize];
        let color = self.colors.color_for(channel, note, velocity);

        let slot = self.allocate(channel, note);
        let voice = &mut self.voices[slot];
        voice.color = color;
        voice
            .envelope
            .note_on(p.attack_ms, p.decay_ms, p.sustain_level, p.release_ms);
    }

    /// Process a Note-Off event.
    ///
    /// Releases the sounding voice bound to (channel, note); late,
    /// duplicate or mismatched note-offs find no voice and are ignored.
    pub fn note_off(&mut self, channel: u8, note: u8) {
        let channel = channel & CHANNEL_MASK;
        let note = note & DATA_MASK;
        if !self.in_window(note) || !self.params[channel as usize].enabled {
            return;
        }

        // Idle slots can carry stale identity; only a sounding voice matches.
        if let Some(voice) = self
            .voices
            .iter_mut()
            .find(|v| v.channel == channel && v.note == note && !v.is_idle())
        {
            voice.envelope.note_off();
        }
    }

    /// Release every sounding voice on the given channel.
    pub fn all_leds_off(&mut self, channel: u8) {
        let channel = channel & CHANNEL_MASK;
        for voice in self
            .voices
            .iter_mut()
            .filter(|v| v.channel == channel && !v.is_idle())
        {
            voice.envelope.note_off();
        }
    }

    /// Process a clock tick: advance every sounding envelope to `now_ms`
    /// and composite the result into the output frame.
    ///
    /// `now_ms` must be monotonically non-decreasing across calls. Two
    /// voices sharing an output position overwrite each other in pool
    /// order; the last writer wins.
    pub fn tick(&mut self, now_ms: f64) {
        let mut active = 0;
        for voice in &mut self.voices {
            if voice.is_idle() {
                continue;
            }
            // Counted even if this very tick takes the voice to Idle.
            active += 1;

            voice.envelope.tick(now_ms);
            voice.age += 1;

            let brightness = (voice.color.v as f32 * voice.envelope.output()).round() as u8;
            let floor = self.params[voice.channel as usize].base_brightness;
            self.frame[(voice.note - self.note_min) as usize] =
                Hsv8::new(voice.color.h, voice.color.s, brightness.max(floor));
        }
        self.active_voices = active;
    }

    /// Apply one queued command.
    pub fn apply(&mut self, message: LedMessage) {
        match message {
            LedMessage::NoteOn {
                channel,
                note,
                velocity,
            } => self.note_on(channel, note, velocity),
            LedMessage::NoteOff { channel, note } => self.note_off(channel, note),
            LedMessage::AllOff { channel } => self.all_leds_off(channel),
        }
    }

    /// Drain and apply every command waiting in a message queue.
    pub fn drain(&mut self, rx: &mut impl MessageReceiver) {
        while let Some(message) = rx.pop() {
            self.apply(message);
        }
    }

    /// Pick the pool slot for a new (channel, note) binding and rebind it.
    ///
    /// Scan policy, in priority order: a slot already bound to the same
    /// identity (idle or not), else the first idle slot, else the slot
    /// with the greatest age. Ties on age go to the first slot in scan
    /// order, which keeps the steal deterministic.
    fn allocate(&mut self, channel: u8, note: u8) -> usize {
        let mut bound = None;
        let mut idle = None;
        let mut oldest = 0;

        for (i, voice) in self.voices.iter().enumerate() {
            if voice.channel == channel && voice.note == note {
                bound = Some(i);
                break;
            }
            if idle.is_none() && voice.is_idle() {
                idle = Some(i);
            }
            if voice.age > self.voices[oldest].age {
                oldest = i;
            }
        }

        let slot = bound.or(idle).unwrap_or(oldest);
        let voice = &mut self.voices[slot];
        voice.channel = channel;
        voice.note = note;
        voice.age = 0;
        slot
    }

    fn in_window(&self, note: u8) -> bool {
        (self.note_min..=self.note_max).contains(&note)
    }

    /// Number of voices that were sounding at the start of the last tick.
    pub fn active_voices(&self) -> usize {
        self.active_voices
    }

    /// The composite output frame, one color per note position.
    pub fn leds(&self) -> &[Hsv8] {
        &self.frame
    }

    pub fn note_min(&self) -> u8 {
        self.note_min
    }

    pub fn note_max(&self) -> u8 {
        self.note_max
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    pub fn colors(&self) -> &C {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut C {
        &mut self.colors
    }

    // Per-channel parameter access. Channel arguments are masked to 4 bits.

    pub fn set_attack_time(&mut self, channel: u8, attack_ms: f32) {
        self.params[(channel & CHANNEL_MASK) as usize].attack_ms = attack_ms;
    }

    pub fn attack_time(&self, channel: u8) -> f32 {
        self.params[(channel & CHANNEL_MASK) as usize].attack_ms
    }

    pub fn set_decay_time(&mut self, channel: u8, decay_ms: f32) {
        self.params[(channel & CHANNEL_MASK) as usize].decay_ms = decay_ms;
    }

    pub fn decay_time(&self, channel: u8) -> f32 {
        self.params[(channel & CHANNEL_MASK) as usize].decay_ms
    }

    pub fn set_sustain_level(&mut self, channel: u8, sustain_level: f32) {
        self.params[(channel & CHANNEL_MASK) as usize].sustain_level = sustain_level;
    }

    pub fn sustain_level(&self, channel: u8) -> f32 {
        self.params[(channel & CHANNEL_MASK) as usize].sustain_level
    }

    pub fn set_release_time(&mut self, channel: u8, release_ms: f32) {
        self.params[(channel & CHANNEL_MASK) as usize].release_ms = release_ms;
    }

    pub fn release_time(&self, channel: u8) -> f32 {
        self.params[(channel & CHANNEL_MASK) as usize].release_ms
    }

    pub fn set_base_brightness(&mut self, channel: u8, base_brightness: u8) {
        self.params[(channel & CHANNEL_MASK) as usize].base_brightness = base_brightness;
    }

    pub fn base_brightness(&self, channel: u8) -> u8 {
        self.params[(channel & CHANNEL_MASK) as usize].base_brightness
    }

    pub fn set_enabled(&mut self, channel: u8, enabled: bool) {
        self.params[(channel & CHANNEL_MASK) as usize].enabled = enabled;
    }

    pub fn is_enabled(&self, channel: u8) -> bool {
        self.params[(channel & CHANNEL_MASK) as usize].enabled
    }

    /// Restore a channel's parameters to their documented defaults.
    pub fn reset(&mut self, channel: u8) {
        self.params[(channel & CHANNEL_MASK) as usize] = ChannelParams::default();
    }
}
