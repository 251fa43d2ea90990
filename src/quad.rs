//! Four-lane batched dispatch for the ladder engines.
//!
//! A [`QuadLadder`] runs four independent filter voices per call, stored
//! struct-of-arrays so one coefficient or state slot holds all four lanes.
//! The width is a polyphony-granularity choice, not an algorithmic one:
//! lanes never read each other's data, and their processing order is
//! immaterial.
//!
//! The dispatcher owns no numeric logic. Per active lane it widens the
//! `f32` lane values to `f64` scratch, runs the model's scalar integrator,
//! and narrows the results back. Inactive lanes are skipped entirely:
//! their state is bit-identical before and after any call, and their
//! output slot is left at 0.0 by convention.
//!
//! Everything here is allocation-free and realtime-safe: no locks, no I/O,
//! O(1) bounded work per sample.

use crate::dsp::{LadderModel, LaneParams};
use crate::rate::SampleRate;
use crate::tuning::Tuning;
use crate::{LANES, MAX_COEFFS, MAX_STATE};

pub struct QuadLadder {
    model: LadderModel,
    rate: SampleRate,
    active: [bool; LANES],
    // Slot-major lane storage: coeffs[slot][lane], state[slot][lane].
    coeffs: [[f32; LANES]; MAX_COEFFS],
    state: [[f32; LANES]; MAX_STATE],
}

impl QuadLadder {
    /// A quad with all lanes inactive and silent.
    pub fn new(model: LadderModel, rate: SampleRate) -> Self {
        Self {
            model,
            rate,
            active: [false; LANES],
            coeffs: [[0.0; LANES]; MAX_COEFFS],
            state: [[0.0; LANES]; MAX_STATE],
        }
    }

    pub fn model(&self) -> LadderModel {
        self.model
    }

    pub fn rate(&self) -> SampleRate {
        self.rate
    }

    /// Switch engines. Coefficient and state layouts are not
    /// interchangeable across models, so all lanes restart from silence
    /// and must be retuned.
    pub fn set_model(&mut self, model: LadderModel) {
        if model != self.model {
            self.model = model;
            self.reset();
        }
    }

    /// Change the internal processing rate. Existing coefficient vectors
    /// bake in the old rate; retune every lane before the next process
    /// call.
    pub fn set_rate(&mut self, rate: SampleRate) {
        self.rate = rate;
    }

    pub fn set_active(&mut self, lane: usize, active: bool) {
        self.active[lane] = active;
    }

    pub fn is_active(&self, lane: usize) -> bool {
        self.active[lane]
    }

    /// Rebuild one lane's coefficient vector. Control-rate; never called
    /// from the per-sample path.
    pub fn tune_lane(&mut self, lane: usize, params: LaneParams, tuning: &dyn Tuning) {
        let mut scalar = [0.0f32; MAX_COEFFS];
        self.model.coefficients(
            params.cutoff_pitch,
            params.resonance,
            tuning,
            self.rate,
            &mut scalar,
        );
        for (slot, &value) in scalar.iter().enumerate().take(self.model.coefficient_count()) {
            self.coeffs[slot][lane] = value;
        }
    }

    /// Zero one lane's state. The external sanitize hook for callers that
    /// monitor voices for NaN/Inf buildup.
    pub fn reset_lane(&mut self, lane: usize) {
        for slot in &mut self.state {
            slot[lane] = 0.0;
        }
    }

    /// Zero every lane's state.
    pub fn reset(&mut self) {
        self.state = [[0.0; LANES]; MAX_STATE];
    }

    /// Process one sample for all four lanes.
    ///
    /// Active lanes get one integrator step; inactive lanes produce 0.0
    /// and their state is untouched. Coefficients are read-only for the
    /// duration of the call.
    pub fn process(&mut self, input: [f32; LANES]) -> [f32; LANES] {
        let n_coeff = self.model.coefficient_count();
        let n_state = self.model.state_count();
        let step = self.rate.inv();

        let mut out = [0.0f32; LANES];
        for lane in 0..LANES {
            if !self.active[lane] {
                continue;
            }

            let mut coeffs = [0.0f64; MAX_COEFFS];
            for slot in 0..n_coeff {
                coeffs[slot] = f64::from(self.coeffs[slot][lane]);
            }
            let mut state = [0.0f64; MAX_STATE];
            for slot in 0..n_state {
                state[slot] = f64::from(self.state[slot][lane]);
            }

            out[lane] = self.model.integrate(
                f64::from(input[lane]),
                &coeffs[..n_coeff],
                &mut state[..n_state],
                step,
            ) as f32;

            for slot in 0..n_state {
                self.state[slot][lane] = state[slot] as f32;
            }
        }
        out
    }

    /// Filter a block of lane frames in place.
    pub fn process_block(&mut self, frames: &mut [[f32; LANES]]) {
        for frame in frames.iter_mut() {
            *frame = self.process(*frame);
        }
    }

    #[cfg(test)]
    fn lane_state(&self, lane: usize) -> [f32; MAX_STATE] {
        let mut snapshot = [0.0f32; MAX_STATE];
        for (slot, value) in snapshot.iter_mut().enumerate() {
            *value = self.state[slot][lane];
        }
        snapshot
    }
}
