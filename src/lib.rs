pub mod dsp;
pub mod quad; // Four-lane batched dispatch
pub mod rate;
pub mod tuning; // Pitch-to-frequency service boundary

/// Number of voice lanes processed per batched call.
pub const LANES: usize = 4;

/// Capacity of the per-lane coefficient store (sized for the largest model).
pub const MAX_COEFFS: usize = 7;

/// Capacity of the per-lane state store (sized for the largest model).
pub const MAX_STATE: usize = 13;
