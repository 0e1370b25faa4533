//! Low-level time-domain primitives used by the LED engine.
//!
//! These components are allocation-free and safe to embed directly inside
//! voice slots. They intentionally stay focused on the envelope math so the
//! engine layer can own orchestration, allocation and compositing.

/// Attack/decay/sustain/release envelope generator.
pub mod envelope;

pub use envelope::EnvelopeState;
