use crate::engine::LedMessage;

#[derive(Debug, Clone, Copy)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
}

/// Convert a note-level MIDI event into an engine command.
///
/// Control changes are parameter edits, not note events; route them
/// through [`CcRouter`](crate::io::cc::CcRouter) instead.
pub fn midi_to_message(midi: MidiEvent) -> Option<LedMessage> {
    match midi {
        MidiEvent::NoteOn {
            channel,
            key,
            velocity,
        } => Some(LedMessage::NoteOn {
            channel,
            note: key,
            velocity,
        }),
        MidiEvent::NoteOff { channel, key } => Some(LedMessage::NoteOff { channel, note: key }),
        MidiEvent::ControlChange { .. } => None,
    }
}
