//! Event-side glue: MIDI event types and their routing onto the engine.

pub mod cc;
pub mod midi;
