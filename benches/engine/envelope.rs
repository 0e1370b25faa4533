//! Benchmarks for the ADSR envelope generator.

use std::hint::black_box;

use criterion::Criterion;
use midi_leds::dsp::envelope::AdsrEnvelope;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    // Attack phase (ramping up; duration long enough to stay in phase)
    group.bench_function("attack", |b| {
        let mut env = AdsrEnvelope::new();
        env.note_on(1e9, 100.0, 0.7, 300.0);
        let mut now = 0.0;
        b.iter(|| {
            now += 1.0;
            env.tick(black_box(now));
            black_box(env.output())
        })
    });

    // Sustain phase (holding steady)
    group.bench_function("sustain", |b| {
        let mut env = AdsrEnvelope::new();
        env.note_on(0.0, 0.0, 0.7, 300.0);
        env.tick(0.0);
        env.tick(1.0); // snap through attack and decay
        let mut now = 1.0;
        b.iter(|| {
            now += 1.0;
            env.tick(black_box(now));
            black_box(env.output())
        })
    });

    // Release phase (ramping down; duration long enough to stay in phase)
    group.bench_function("release", |b| {
        let mut env = AdsrEnvelope::new();
        env.note_on(0.0, 0.0, 0.7, 1e9);
        env.tick(0.0);
        env.tick(1.0);
        env.note_off();
        let mut now = 1.0;
        b.iter(|| {
            now += 1.0;
            env.tick(black_box(now));
            black_box(env.output())
        })
    });

    group.finish();
}
