//! End-to-end scenario: a single-voice engine driven through a full
//! attack -> decay -> sustain -> release -> idle cycle against the
//! composite output frame.

use midi_leds::color::{ColorSource, Hsv8};
use midi_leds::engine::{EngineConfig, MidiLeds};

/// Test double returning one fixed color for every note.
struct FixedColor;

impl ColorSource for FixedColor {
    fn color_for(&self, _channel: u8, _note: u8, _velocity: u8) -> Hsv8 {
        Hsv8::new(0, 255, 255)
    }
}

#[test]
fn single_voice_full_cycle() {
    let config = EngineConfig {
        note_min: 48,
        note_max: 84,
        voices: 1,
    };
    let mut leds = MidiLeds::new(config, FixedColor).unwrap();

    // Power-of-two phase times keep the ramp rates exact, so the
    // envelope hits its transition points exactly on the tick grid.
    leds.set_attack_time(0, 128.0);
    leds.set_decay_time(0, 128.0);
    leds.set_sustain_level(0, 0.5);
    leds.set_release_time(0, 128.0);

    let position = (60 - 48) as usize;

    leds.note_on(0, 60, 127);
    leds.tick(0.0); // attack begins at the first tick
    assert_eq!(leds.active_voices(), 1);
    assert_eq!(leds.leds()[position].v, 0);

    leds.tick(64.0); // halfway up the attack ramp
    assert_eq!(leds.leds()[position].v, 128); // round(255 * 0.5)

    leds.tick(128.0); // attack peak
    assert_eq!(leds.leds()[position], Hsv8::new(0, 255, 255));

    leds.tick(192.0); // first decay tick captures the phase start
    assert_eq!(leds.leds()[position].v, 255);

    leds.tick(256.0); // 64 ms into a 128 ms decay from 1.0 to 0.5
    assert_eq!(leds.leds()[position].v, 191); // round(255 * 0.75)

    leds.tick(320.0); // decay complete, holding at sustain
    assert_eq!(leds.leds()[position].v, 128);

    leds.tick(384.0); // sustain holds indefinitely
    assert_eq!(leds.leds()[position].v, 128);
    assert_eq!(leds.active_voices(), 1);

    leds.note_off(0, 60);

    leds.tick(448.0); // first release tick: still at the sustain level
    assert_eq!(leds.leds()[position].v, 128);

    leds.tick(512.0); // 64 ms into a 128 ms release from 0.5
    assert_eq!(leds.leds()[position].v, 64); // round(255 * 0.25)

    leds.tick(576.0); // release complete: idle, but counted this tick
    assert_eq!(leds.leds()[position].v, 0);
    assert_eq!(leds.active_voices(), 1);

    leds.tick(640.0);
    assert_eq!(leds.active_voices(), 0);

    // The untouched rest of the frame stayed dark throughout.
    assert!(leds
        .leds()
        .iter()
        .enumerate()
        .all(|(i, led)| i == position || *led == Hsv8::default()));
}

#[test]
fn base_brightness_floors_the_composite() {
    let config = EngineConfig {
        note_min: 48,
        note_max: 84,
        voices: 1,
    };
    let mut leds = MidiLeds::new(config, FixedColor).unwrap();
    leds.set_sustain_level(0, 0.5);
    leds.set_base_brightness(0, 140);

    leds.note_on(0, 60, 127);
    leds.tick(0.0);

    // The attack has only just begun, but the floor keeps the LED lit.
    assert_eq!(leds.leds()[12].v, 140);
}
