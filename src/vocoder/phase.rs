//! Phase folding shared by analysis and resynthesis.
//!
//! Both folds subtract an even multiple of the period chosen from the
//! truncated quotient: `q = trunc(x)`, then `x - (q + q % 2)`. Downstream
//! frequency estimates depend on exactly where the fold boundary falls, so
//! the same rule is used everywhere.

use std::f64::consts::{FRAC_1_PI, PI, TAU};

use crate::core::types::OVERSAMPLE_FACTOR;

/// Expected phase advance per hop for each unit of bin frequency.
pub const EXPECTED_CYCLES: f64 = TAU / OVERSAMPLE_FACTOR as f64;

/// Folds `x` into [-1, 1].
#[inline]
pub fn wrap_unit(x: f64) -> f64 {
    let q = x as i32;
    x - (q + q % 2) as f64
}

/// Folds a phase in radians into [-π, π].
#[inline]
pub fn wrap_phase(phase: f64) -> f64 {
    let q = (phase * FRAC_1_PI) as i32;
    phase - PI * (q + q % 2) as f64
}
