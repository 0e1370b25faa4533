//! Wall-clock demo sequencer.
//!
//! Flattens note spans into a time-sorted list of note-on/note-off
//! commands and replays them on a fixed-length loop.

use midi_leds::engine::LedMessage;

/// A scheduled note: starts `at_ms` into the loop, held for `hold_ms`.
#[derive(Debug, Clone, Copy)]
pub struct NoteSpan {
    pub channel: u8,
    pub note: u8,
    pub velocity: u8,
    pub at_ms: u64,
    pub hold_ms: u64,
}

pub struct Sequencer {
    /// (offset into loop, command), sorted by offset.
    events: Vec<(u64, LedMessage)>,
    loop_ms: u64,
    cursor: usize,
    /// Completed loop iterations.
    cycle: u64,
}

impl Sequencer {
    pub fn new(spans: &[NoteSpan], loop_ms: u64) -> Self {
        let mut events = Vec::with_capacity(spans.len() * 2);
        for span in spans {
            events.push((
                span.at_ms,
                LedMessage::NoteOn {
                    channel: span.channel,
                    note: span.note,
                    velocity: span.velocity,
                },
            ));
            events.push((
                span.at_ms + span.hold_ms,
                LedMessage::NoteOff {
                    channel: span.channel,
                    note: span.note,
                },
            ));
        }
        events.sort_by_key(|&(offset, _)| offset);

        Self {
            events,
            loop_ms: loop_ms.max(1),
            cursor: 0,
            cycle: 0,
        }
    }

    /// Pop the next command due at or before `now_ms`, if any.
    ///
    /// Call repeatedly until it returns `None` to catch up after a stall.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<LedMessage> {
        if self.events.is_empty() {
            return None;
        }

        if self.cursor == self.events.len() {
            // Loop finished; wrap once wall-clock time enters the next cycle.
            if (self.cycle + 1) * self.loop_ms <= now_ms {
                self.cursor = 0;
                self.cycle += 1;
            } else {
                return None;
            }
        }

        let (offset, message) = self.events[self.cursor];
        if self.cycle * self.loop_ms + offset <= now_ms {
            self.cursor += 1;
            return Some(message);
        }
        None
    }
}
