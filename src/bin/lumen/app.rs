//! Lumen - main application builder and runner

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use rtrb::RingBuffer;

use midi_leds::color::{MidiColors, Palette};
use midi_leds::engine::{EngineConfig, LedMessage, MidiLeds};

use super::sequencer::{NoteSpan, Sequencer};
use super::ui::UiApp;

/// Capacity of the sequencer-to-UI command queue.
const COMMAND_QUEUE_SIZE: usize = 256;

/// One demo track: a channel, its palette, and a looped note pattern.
struct Track {
    channel: u8,
    palette: Palette,
    spans: Vec<NoteSpan>,
}

/// Main application builder
pub struct Lumen {
    note_min: u8,
    note_max: u8,
    voices: usize,
    loop_ms: u64,
    tracks: Vec<Track>,
}

impl Lumen {
    pub fn new() -> Self {
        Self {
            note_min: 0x00,
            note_max: 0x7F,
            voices: 24,
            loop_ms: 4_000,
            tracks: Vec::new(),
        }
    }

    /// Set the note window rendered by the LED strip.
    pub fn note_range(mut self, note_min: u8, note_max: u8) -> Self {
        self.note_min = note_min;
        self.note_max = note_max;
        self
    }

    /// Set the voice pool size.
    pub fn voices(mut self, voices: usize) -> Self {
        self.voices = voices;
        self
    }

    /// Set the loop length of the demo patterns in milliseconds.
    pub fn loop_len(mut self, loop_ms: u64) -> Self {
        self.loop_ms = loop_ms;
        self
    }

    /// Add a looped track on `channel` with the given palette.
    ///
    /// Each pattern entry is (note, start offset in ms, hold time in ms).
    pub fn track(mut self, channel: u8, palette: Palette, pattern: &[(u8, u64, u64)]) -> Self {
        let spans = pattern
            .iter()
            .map(|&(note, at_ms, hold_ms)| NoteSpan {
                channel,
                note,
                velocity: 0x64,
                at_ms,
                hold_ms,
            })
            .collect();
        self.tracks.push(Track {
            channel,
            palette,
            spans,
        });
        self
    }

    /// Run the application (takes over the terminal).
    pub fn run(self) -> EyreResult<()> {
        // Build the engine and its color mapper.
        let mut colors = MidiColors::new(self.note_min, self.note_max);
        for track in &self.tracks {
            colors.set_palette(track.channel, track.palette);
        }

        let config = EngineConfig {
            note_min: self.note_min,
            note_max: self.note_max,
            voices: self.voices,
        };
        let mut leds = MidiLeds::new(config, colors)?;

        // Demo envelope settings: short attack, audible-length tails.
        for track in &self.tracks {
            leds.set_attack_time(track.channel, 60.0);
            leds.set_decay_time(track.channel, 1500.0);
            leds.set_sustain_level(track.channel, 0.25);
            leds.set_release_time(track.channel, 350.0);
        }

        // Sequencer thread feeds note commands through a ring buffer.
        let (mut tx, rx) = RingBuffer::<LedMessage>::new(COMMAND_QUEUE_SIZE);
        let spans: Vec<NoteSpan> = self
            .tracks
            .iter()
            .flat_map(|t| t.spans.iter().copied())
            .collect();
        let mut sequencer = Sequencer::new(&spans, self.loop_ms);

        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();
        let player = thread::spawn(move || {
            let started = std::time::Instant::now();
            while !stop_flag.load(Ordering::Relaxed) {
                let now_ms = started.elapsed().as_millis() as u64;
                while let Some(message) = sequencer.pop_due(now_ms) {
                    let _ = tx.push(message);
                }
                thread::sleep(Duration::from_millis(2));
            }
        });

        // Run the UI on this thread until the user quits.
        let mut terminal = ratatui::init();
        let mut app = UiApp::new(rx, leds);
        let result = app.run(&mut terminal);
        ratatui::restore();

        stop.store(true, Ordering::Relaxed);
        let _ = player.join();

        result
    }
}

impl Default for Lumen {
    fn default() -> Self {
        Self::new()
    }
}
