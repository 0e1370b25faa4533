//! Benchmarks for the per-tick composite pass at several pool sizes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use midi_leds::color::MidiColors;
use midi_leds::engine::{EngineConfig, MidiLeds};

use crate::POOL_SIZES;

pub fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/tick");

    for &size in POOL_SIZES {
        let config = EngineConfig {
            note_min: 0,
            note_max: 127,
            voices: size,
        };
        let mut leds = MidiLeds::new(config, MidiColors::new(0, 127)).unwrap();

        // Sustained notes keep every voice in the pool active.
        for channel in 0..16 {
            leds.set_sustain_level(channel, 0.5);
        }
        for i in 0..size {
            leds.note_on((i % 16) as u8, (i % 128) as u8, 100);
        }

        let mut now = 0.0;
        group.bench_with_input(BenchmarkId::new("full_pool", size), &size, |b, _| {
            b.iter(|| {
                now += 1.0;
                leds.tick(black_box(now));
                black_box(leds.active_voices())
            })
        });
    }

    group.finish();
}
