//! Vintage ladder filter engines.
//!
//! Each submodule emulates the classic transistor-ladder lowpass with a
//! different numerical treatment of its nonlinear circuit model. Every
//! engine splits into a coefficient builder, run once per control block,
//! and a double-precision scalar integrator, run once per sample. The four
//! share the clamped frequency mapping below and the lane conventions in
//! [`crate::quad`].
//!
//! Lane storage and the public call boundary are single precision; all
//! integration scratch is `f64`. The nonlinear feedback loops accumulate
//! error too quickly otherwise.

/// Huovilainen's nonlinear model, two internal sub-steps per sample.
pub mod huovilainen;
/// D'Angelo and Valimaki's improved model, trapezoidal integration.
pub mod improved;
/// Krajeski's compromise-pole model with inherent tanh saturation.
pub mod krajeski;
/// Model selection and per-lane parameter descriptors.
pub mod model;
/// Runge-Kutta integration of the saturated ladder ODE.
pub mod rk;

pub use model::{LadderModel, LaneParams};

use crate::rate::SampleRate;
use crate::tuning::{Tuning, A4_NOTE, MIDI_0_FREQ};

/// Map a semitone-relative pitch to a cutoff frequency in Hz.
///
/// The pitch is referenced to A4 and converted through the caller's tuning.
/// The result is clamped to [5 Hz, 0.3 x rate]; every model's builder relies
/// on this bound to keep the cutoff away from the Nyquist region of the
/// internal rate.
pub fn clamped_frequency(pitch: f32, tuning: &dyn Tuning, rate: SampleRate) -> f32 {
    let freq = tuning.note_to_ratio(pitch + A4_NOTE) * MIDI_0_FREQ;
    freq.clamp(5.0, rate.hz() as f32 * 0.3)
}
