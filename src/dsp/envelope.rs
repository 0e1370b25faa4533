/*
ADSR Envelope Implementation
============================

This module implements a linear ADSR envelope generator driven by a
wall-clock millisecond timestamp instead of an audio sample counter.

Vocabulary
----------

  output      The envelope's current value (0.0 to 1.0). The engine
              multiplies a color's brightness by this to fade LEDs in
              and out over time.

  state       Which phase the envelope is in: Idle, Attack, Decay,
              Sustain, or Release. A state machine governs transitions.

  rate        How much `output` changes per millisecond of elapsed time
              in the current ramp. Derived once per phase from the phase
              duration; a zero-duration phase yields an infinite rate,
              which is treated as an instantaneous snap to the target.

  phase start The timestamp of the first `tick` seen in the current
              phase. Kept as `None` until that tick arrives, so elapsed
              time is measured from first-tick-in-phase rather than from
              the transition instant. This avoids bias from irregular
              tick scheduling.


The Shape: Linear Ramps
-----------------------

  Output
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release
         (A)   (D)      (S)      (R)


The State Machine
-----------------

  Idle ── note_on ──→ Attack ── output=1 ──→ Decay ── output=S ──→ Sustain
    ↑                    │                      │                     │
    │                    └────── note_off ──────┴───────── note_off ──┘
    │                                    ↓
    └────────── output=0 ─────────── Release

Key behavior: note_off triggers Release from ANY non-idle state. Release
always ramps from the CURRENT output, and its rate is proportional to
that level, so a note released mid-attack fades over the same wall-clock
duration as one released from full brightness. A sustain level of 0.0
makes the envelope one-shot: it falls silent after decay without waiting
for note_off.
*/

/// The current phase of the envelope state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,    // Inactive, output = 0
    Attack,  // Ramping up to 1.0
    Decay,   // Ramping down to the sustain level
    Sustain, // Holding at the sustain level
    Release, // Ramping down to 0
}

pub struct AdsrEnvelope {
    state: EnvelopeState,
    output: f32, // current value, 0.0 - 1.0
    target: f32, // value the active ramp is heading to

    // Ramp bookkeeping (all rates in output units per millisecond)
    attack_rate: f32,
    decay_start: f32,
    decay_rate: f32,
    sustain_level: f32,
    release_start: f32,
    release_rate: f32,
    release_time_ms: f32,

    // First tick timestamp seen in the current phase; None until then
    phase_start: Option<f64>,
}

impl AdsrEnvelope {
    pub fn new() -> Self {
        Self {
            state: EnvelopeState::Idle,
            output: 0.0,
            target: 0.0,
            attack_rate: 0.0,
            decay_start: 0.0,
            decay_rate: 0.0,
            sustain_level: 0.0,
            release_start: 0.0,
            release_rate: 0.0,
            release_time_ms: 0.0,
            phase_start: None,
        }
    }

    /// Arm the envelope with the given phase durations and restart it.
    ///
    /// This unconditionally resets to a clean Attack from zero, regardless
    /// of the prior state - retriggering a releasing envelope starts over
    /// rather than resuming from the release level.
    pub fn note_on(
        &mut self,
        attack_time_ms: f32,
        decay_time_ms: f32,
        sustain_level: f32,
        release_time_ms: f32,
    ) {
        let sustain_level = sustain_level.clamp(0.0, 1.0);
        self.state = EnvelopeState::Attack;
        self.output = 0.0;
        self.target = 1.0;
        self.attack_rate = 1.0 / attack_time_ms.max(0.0);
        self.decay_rate = (1.0 - sustain_level) / decay_time_ms.max(0.0);
        self.sustain_level = sustain_level;
        self.release_time_ms = release_time_ms.max(0.0);
        self.phase_start = None;
    }

    /// Move any non-idle envelope into its release phase.
    ///
    /// The release ramp starts from the output value current at this
    /// instant, so the rate is proportional to the level actually reached.
    /// Idle envelopes ignore the call.
    pub fn note_off(&mut self) {
        if self.state == EnvelopeState::Idle {
            return;
        }
        self.state = EnvelopeState::Release;
        self.target = 0.0;
        self.release_start = self.output;
        self.release_rate = self.release_start / self.release_time_ms;
        self.phase_start = None;
    }

    /// Advance the envelope to the given timestamp (milliseconds).
    ///
    /// `now_ms` must be monotonically non-decreasing across calls. Ticking
    /// an idle envelope is a no-op and mutates nothing.
    pub fn tick(&mut self, now_ms: f64) {
        if self.state == EnvelopeState::Idle {
            return;
        }

        // Lazily capture the first timestamp seen in this phase.
        let start = *self.phase_start.get_or_insert(now_ms);
        let elapsed = (now_ms - start) as f32;

        match self.state {
            EnvelopeState::Idle => {}

            EnvelopeState::Attack => {
                // A non-finite rate means the phase has zero duration:
                // snap straight to the target instead of propagating NaN.
                self.output = if self.attack_rate.is_finite() {
                    elapsed * self.attack_rate
                } else {
                    self.target
                };
                if self.output >= self.target {
                    self.output = self.target;
                    self.decay_start = self.target;
                    self.target = self.sustain_level;
                    self.phase_start = None;
                    self.state = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                self.output = if self.decay_rate.is_finite() {
                    self.decay_start - elapsed * self.decay_rate
                } else {
                    self.target
                };
                if self.output <= self.target {
                    self.output = self.target;
                    self.phase_start = None;
                    self.state = EnvelopeState::Sustain;
                }
            }

            EnvelopeState::Sustain => {
                // Holding: keep the phase start cleared so there is no drift.
                self.phase_start = None;
                if self.output == 0.0 {
                    // A zero sustain level makes the envelope one-shot.
                    self.state = EnvelopeState::Idle;
                }
            }

            EnvelopeState::Release => {
                self.output = if self.release_rate.is_finite() {
                    self.release_start - elapsed * self.release_rate
                } else {
                    self.target
                };
                if self.output <= self.target {
                    self.output = self.target;
                    self.phase_start = None;
                    self.state = EnvelopeState::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.output));
    }

    /// Get the current envelope output (0.0 to 1.0).
    pub fn output(&self) -> f32 {
        self.output
    }

    /// Get the current envelope phase.
    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Test whether the envelope is idle (producing no output).
    pub fn is_idle(&self) -> bool {
        self.state == EnvelopeState::Idle
    }
}

impl Default for AdsrEnvelope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed(attack: f32, decay: f32, sustain: f32, release: f32) -> AdsrEnvelope {
        let mut env = AdsrEnvelope::new();
        env.note_on(attack, decay, sustain, release);
        env
    }

    // Power-of-two durations make the per-ms rates exactly representable,
    // so phase transitions land exactly on the asserted ticks.
    #[test]
    fn visits_phases_in_order() {
        let mut env = armed(128.0, 128.0, 0.5, 128.0);

        env.tick(0.0);
        assert_eq!(env.state(), EnvelopeState::Attack);
        assert_eq!(env.output(), 0.0);

        env.tick(64.0);
        assert_eq!(env.state(), EnvelopeState::Attack);
        assert!((env.output() - 0.5).abs() < 1e-6);

        env.tick(128.0);
        assert_eq!(env.state(), EnvelopeState::Decay);
        assert_eq!(env.output(), 1.0);

        // First tick in the decay phase captures its timestamp.
        env.tick(192.0);
        assert_eq!(env.state(), EnvelopeState::Decay);
        assert_eq!(env.output(), 1.0);

        env.tick(320.0);
        assert_eq!(env.state(), EnvelopeState::Sustain);
        assert!((env.output() - 0.5).abs() < 1e-6);

        env.note_off();
        assert_eq!(env.state(), EnvelopeState::Release);

        env.tick(384.0);
        assert!((env.output() - 0.5).abs() < 1e-6);

        env.tick(448.0);
        assert_eq!(env.state(), EnvelopeState::Release);
        assert!((env.output() - 0.25).abs() < 1e-6);

        env.tick(512.0);
        assert_eq!(env.state(), EnvelopeState::Idle);
        assert_eq!(env.output(), 0.0);
    }

    #[test]
    fn zero_duration_phases_snap_to_target() {
        let mut env = armed(0.0, 0.0, 0.5, 0.0);

        env.tick(5.0);
        assert_eq!(env.state(), EnvelopeState::Decay);
        assert_eq!(env.output(), 1.0);

        env.tick(6.0);
        assert_eq!(env.state(), EnvelopeState::Sustain);
        assert!((env.output() - 0.5).abs() < 1e-6);

        env.note_off();
        env.tick(7.0);
        assert_eq!(env.state(), EnvelopeState::Idle);
        assert_eq!(env.output(), 0.0);
    }

    #[test]
    fn zero_sustain_is_one_shot() {
        let mut env = armed(0.0, 128.0, 0.0, 128.0);

        env.tick(0.0); // snap through attack
        env.tick(10.0);
        env.tick(138.0); // decay reaches 0.0 -> Sustain
        assert_eq!(env.state(), EnvelopeState::Sustain);
        assert_eq!(env.output(), 0.0);

        // Next tick notices the silent sustain and idles out on its own.
        env.tick(150.0);
        assert_eq!(env.state(), EnvelopeState::Idle);
    }

    #[test]
    fn retrigger_during_release_restarts_from_zero() {
        let mut env = armed(0.0, 0.0, 0.8, 1000.0);
        env.tick(0.0);
        env.tick(1.0); // Sustain at 0.8
        env.note_off();
        env.tick(2.0);
        env.tick(502.0); // halfway through release
        assert_eq!(env.state(), EnvelopeState::Release);
        assert!(env.output() > 0.0);

        env.note_on(100.0, 100.0, 0.8, 1000.0);
        assert_eq!(env.state(), EnvelopeState::Attack);
        assert_eq!(env.output(), 0.0);

        env.tick(600.0);
        env.tick(650.0);
        assert!((env.output() - 0.5).abs() < 1e-6, "ramps up from zero again");
    }

    #[test]
    fn release_rate_is_proportional_to_current_level() {
        let mut env = armed(0.0, 0.0, 0.5, 512.0);
        env.tick(0.0);
        env.tick(1.0); // Sustain at 0.5

        env.note_off();
        env.tick(100.0); // first release tick captures t=100
        assert!((env.output() - 0.5).abs() < 1e-6);

        env.tick(356.0); // 256 ms into a 512 ms release from 0.5
        assert!((env.output() - 0.25).abs() < 1e-6);

        env.tick(612.0); // exactly 512 ms elapsed
        assert_eq!(env.state(), EnvelopeState::Idle);
        assert_eq!(env.output(), 0.0);
    }

    #[test]
    fn idle_tick_is_a_noop() {
        let mut env = AdsrEnvelope::new();
        env.tick(123.0);
        env.tick(456.0);
        assert!(env.is_idle());
        assert_eq!(env.output(), 0.0);

        // note_off on an idle envelope is ignored as well.
        env.note_off();
        assert!(env.is_idle());
    }

    #[test]
    fn elapsed_time_counts_from_first_tick_in_phase() {
        let mut env = armed(100.0, 100.0, 0.5, 100.0);

        // The first tick arrives long after note_on; attack starts there.
        env.tick(1000.0);
        assert_eq!(env.output(), 0.0);

        env.tick(1050.0);
        assert!((env.output() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn output_stays_in_range_over_full_cycle() {
        let mut env = armed(30.0, 70.0, 0.4, 50.0);
        for t in 0..200 {
            env.tick(t as f64);
            assert!((0.0..=1.0).contains(&env.output()));
        }
        env.note_off();
        for t in 200..400 {
            env.tick(t as f64);
            assert!((0.0..=1.0).contains(&env.output()));
        }
        assert!(env.is_idle());
    }
}
