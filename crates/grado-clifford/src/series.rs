//! Exponential, hyperbolic and trigonometric functions of multivectors.
//!
//! When `x * x` is a scalar the closed forms are used. Otherwise `exp`
//! evaluates a Taylor series of the requested order on `x / 2^k` and
//! squares the result `k` times; `sinh` and `cosh` are derived from `exp`,
//! `sin` and `cos` sum their own alternating series. `log` inverts `exp`
//! for rotors of a Euclidean plane.

use grado_core::{GradoError, Result};
use tracing::trace;

use crate::algebra::Algebra;
use crate::multivector::SparseMultivector;
use crate::ops;
use crate::products::{gp, gp_scalar};

/// Non-scalar parts of `x * x` with squared sum below this count as zero.
const SCALAR_SQUARE_EPSILON: f64 = 1e-6;

/// The scalar value of `x * x`, if the square is (close to) a scalar.
fn scalar_square(alg: &Algebra, x: &SparseMultivector) -> Option<f64> {
    let xsq = gp(alg, x, x);
    let coords = xsq.coordinates();
    let non_scalar = if xsq.gu() & 1 != 0 { &coords[1..] } else { coords };
    let sum: f64 = non_scalar.iter().map(|c| c * c).sum();
    (sum < SCALAR_SQUARE_EPSILON).then(|| xsq.scalar_part())
}

pub fn exp(alg: &Algebra, x: &SparseMultivector, order: usize) -> SparseMultivector {
    if let Some(s) = scalar_square(alg, x) {
        return if s < 0.0 {
            let a = (-s).sqrt();
            ops::sas(alg, x, a.sin() / a, a.cos())
        } else if s > 0.0 {
            let a = s.sqrt();
            ops::sas(alg, x, a.sinh() / a, a.cosh())
        } else {
            ops::increment(alg, x)
        };
    }
    exp_series(alg, x, order)
}

/// `k` such that `x / 2^k` has all coordinates below 1: one halving per
/// bit of the integer part of `largest`, plus one more once it reaches 2.
fn scale_exponent(largest: f64) -> i32 {
    let whole = largest.trunc();
    if whole.is_nan() || whole < 1.0 {
        return 0;
    }
    let bits = whole.log2().floor() + 1.0;
    let k = if whole >= 2.0 { bits + 1.0 } else { bits };
    k.min(f64::from(f64::MAX_EXP - 1)) as i32
}

fn exp_series(alg: &Algebra, x: &SparseMultivector, order: usize) -> SparseMultivector {
    if order == 0 {
        return SparseMultivector::scalar(1.0);
    }
    let k = scale_exponent(x.largest_coordinate());
    trace!(k, order, "exp series");

    let xs = gp_scalar(alg, x, 2f64.powi(-k));
    let mut result = SparseMultivector::scalar(1.0);
    let mut term = SparseMultivector::scalar(1.0);
    for i in 1..=order {
        term = gp_scalar(alg, &gp(alg, &term, &xs), 1.0 / i as f64);
        result = ops::add(alg, &result, &term);
    }

    for _ in 0..k {
        result = gp(alg, &result, &result);
    }
    result
}

pub fn sinh(alg: &Algebra, x: &SparseMultivector, order: usize) -> SparseMultivector {
    if let Some(s) = scalar_square(alg, x) {
        return if s < 0.0 {
            let a = (-s).sqrt();
            gp_scalar(alg, x, a.sin() / a)
        } else if s > 0.0 {
            let a = s.sqrt();
            gp_scalar(alg, x, a.sinh() / a)
        } else {
            x.clone()
        };
    }
    let plus = exp(alg, x, order);
    let minus = exp(alg, &ops::negate(alg, x), order);
    gp_scalar(alg, &ops::subtract(alg, &plus, &minus), 0.5)
}

pub fn cosh(alg: &Algebra, x: &SparseMultivector, order: usize) -> SparseMultivector {
    if let Some(s) = scalar_square(alg, x) {
        return if s < 0.0 {
            SparseMultivector::scalar((-s).sqrt().cos())
        } else if s > 0.0 {
            SparseMultivector::scalar(s.sqrt().cosh())
        } else {
            SparseMultivector::scalar(1.0)
        };
    }
    let plus = exp(alg, x, order);
    let minus = exp(alg, &ops::negate(alg, x), order);
    gp_scalar(alg, &ops::add(alg, &plus, &minus), 0.5)
}

pub fn sin(alg: &Algebra, x: &SparseMultivector, order: usize) -> SparseMultivector {
    if let Some(s) = scalar_square(alg, x) {
        return if s < 0.0 {
            let a = (-s).sqrt();
            gp_scalar(alg, x, a.sinh() / a)
        } else if s > 0.0 {
            let a = s.sqrt();
            gp_scalar(alg, x, a.sin() / a)
        } else {
            x.clone()
        };
    }
    alternating_series(alg, x, order, 1)
}

pub fn cos(alg: &Algebra, x: &SparseMultivector, order: usize) -> SparseMultivector {
    if let Some(s) = scalar_square(alg, x) {
        return if s < 0.0 {
            SparseMultivector::scalar((-s).sqrt().cosh())
        } else if s > 0.0 {
            SparseMultivector::scalar(s.sqrt().cos())
        } else {
            SparseMultivector::scalar(1.0)
        };
    }
    alternating_series(alg, x, order, 0)
}

/// Logarithm of a rotor `R = cos θ + sin θ B` of a Euclidean plane,
/// returning the bivector `θ B`. Only the scalar and grade-2 parts of `R`
/// are read.
///
/// `R = 1` gives zero. `R = -1` gives a half turn `π e_i^e_j` in the plane
/// of the first two basis vectors with metric `+1`, and fails when the
/// algebra has fewer than two of them.
pub fn log(alg: &Algebra, r: &SparseMultivector) -> Result<SparseMultivector> {
    let bivector = ops::extract_grade(alg, r, 0b100);
    let norm2 = ops::norm2(alg, &bivector);
    let s = r.scalar_part();
    if norm2 <= 0.0 {
        if s >= 0.0 {
            return Ok(SparseMultivector::zero());
        }
        let plane = euclidean_plane(alg)?;
        let mut half_turn = SparseMultivector::zero();
        // the stored blade may be e_j^e_i
        let value = std::f64::consts::PI * alg.grades().sign_by_bitmap(plane);
        half_turn.set_coordinate(alg, plane, value);
        return Ok(half_turn);
    }
    let norm = norm2.sqrt();
    Ok(gp_scalar(alg, &bivector, norm.atan2(s) / norm))
}

/// Bitmap of the first two basis vectors that square to `+1`.
fn euclidean_plane(alg: &Algebra) -> Result<u32> {
    let mut found = alg.metric().iter().enumerate().filter(|&(_, &m)| m == 1.0).map(|(i, _)| i);
    match (found.next(), found.next()) {
        (Some(i), Some(j)) => Ok((1 << i) | (1 << j)),
        _ => Err(GradoError::InvalidAlgebra(format!(
            "'{}' has fewer than two Euclidean basis vectors",
            alg.name()
        ))),
    }
}

/// `Σ (-1)^k x^(2k+parity) / (2k+parity)!` over powers up to `order`.
fn alternating_series(alg: &Algebra, x: &SparseMultivector, order: usize, parity: usize) -> SparseMultivector {
    let mut result = if parity == 0 {
        SparseMultivector::scalar(1.0)
    } else {
        SparseMultivector::zero()
    };
    let mut term = SparseMultivector::scalar(1.0);
    for i in 1..=order {
        term = gp_scalar(alg, &gp(alg, &term, x), 1.0 / i as f64);
        if i % 2 != parity {
            continue;
        }
        result = if (i / 2) % 2 == 0 {
            ops::add(alg, &result, &term)
        } else {
            ops::subtract(alg, &result, &term)
        };
    }
    result
}
