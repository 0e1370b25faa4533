#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// Commands accepted by the engine between ticks.
#[derive(Debug, Copy, Clone)]
pub enum LedMessage {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8 },
    AllOff { channel: u8 },
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<LedMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<LedMessage> {
    fn pop(&mut self) -> Option<LedMessage> {
        Consumer::pop(self).ok()
    }
}
