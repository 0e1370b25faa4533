//! lumen - Terminal LED strip driven by the MIDI LED engine
//!
//! Run with: cargo run

mod app;
mod sequencer;
mod ui;

use app::Lumen;
use midi_leds::color::Palette;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // A looped two-channel demo: a sustained chord progression on the
    // color-map palette and a rainbow arpeggio running above it.
    Lumen::new()
        .note_range(48, 84)
        .voices(24)
        .loop_len(6_400)
        .track(
            0,
            Palette::ColorMap,
            &[
                (48, 0, 1400),
                (52, 0, 1400),
                (55, 0, 1400),
                (53, 1600, 1400),
                (57, 1600, 1400),
                (60, 1600, 1400),
                (50, 3200, 1400),
                (53, 3200, 1400),
                (57, 3200, 1400),
                (55, 4800, 1400),
                (59, 4800, 1400),
                (62, 4800, 1400),
            ],
        )
        .track(
            1,
            Palette::Rainbow,
            &[
                (60, 0, 300),
                (64, 400, 300),
                (67, 800, 300),
                (72, 1200, 300),
                (76, 1600, 300),
                (72, 2000, 300),
                (67, 2400, 300),
                (64, 2800, 300),
                (60, 3200, 300),
                (64, 3600, 300),
                (67, 4000, 300),
                (72, 4400, 300),
                (76, 4800, 300),
                (79, 5200, 300),
                (76, 5600, 300),
                (72, 6000, 300),
            ],
        )
        .run()
}
