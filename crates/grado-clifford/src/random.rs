//! Random blades and versors, mostly for property tests and benchmarks.
//!
//! A blade is the outer product of `grade` random vectors, a versor their
//! geometric product. Vector coordinates are uniform in `[-1, 1)`. Results
//! with a tiny norm or an oversized coordinate are rejected and redrawn.

use rand::Rng;

use grado_core::{GradoError, Result};

use crate::algebra::Algebra;
use crate::multivector::SparseMultivector;
use crate::ops;
use crate::products::{gp, gp_scalar, op};

/// Redraws before giving up.
pub const MAX_ATTEMPTS: usize = 1000;

/// Default lower bound on the norm of the unscaled product.
pub const DEFAULT_MINIMUM_NORM: f64 = 0.01;

/// Selects every basis vector.
pub const ALL_BASIS_VECTORS: u32 = u32::MAX;

/// Random blade of `grade` with norm below `scale`.
pub fn random_blade<R: Rng + ?Sized>(alg: &Algebra, rng: &mut R, scale: f64, grade: usize) -> Result<SparseMultivector> {
    random_blade_ex(alg, rng, scale, grade, ALL_BASIS_VECTORS, DEFAULT_MINIMUM_NORM, scale * 4.0)
}

/// Random versor of `grade` with norm below `scale`.
pub fn random_versor<R: Rng + ?Sized>(alg: &Algebra, rng: &mut R, scale: f64, grade: usize) -> Result<SparseMultivector> {
    random_versor_ex(alg, rng, scale, grade, ALL_BASIS_VECTORS, DEFAULT_MINIMUM_NORM, scale * 4.0)
}

/// Random blade built only from the basis vectors in `basis_vector_bitmap`.
pub fn random_blade_ex<R: Rng + ?Sized>(
    alg: &Algebra,
    rng: &mut R,
    scale: f64,
    grade: usize,
    basis_vector_bitmap: u32,
    minimum_norm: f64,
    largest_coordinate: f64,
) -> Result<SparseMultivector> {
    let available = (basis_vector_bitmap & vector_mask(alg)).count_ones() as usize;
    if grade > available {
        return Err(GradoError::InvalidAlgebra(format!(
            "cannot build a grade {grade} blade from {available} basis vectors"
        )));
    }
    random_product(alg, rng, scale, grade, basis_vector_bitmap, minimum_norm, largest_coordinate, op)
}

/// Random versor built only from the basis vectors in `basis_vector_bitmap`.
pub fn random_versor_ex<R: Rng + ?Sized>(
    alg: &Algebra,
    rng: &mut R,
    scale: f64,
    grade: usize,
    basis_vector_bitmap: u32,
    minimum_norm: f64,
    largest_coordinate: f64,
) -> Result<SparseMultivector> {
    if grade > 0 && basis_vector_bitmap & vector_mask(alg) == 0 {
        return Err(GradoError::InvalidAlgebra("no basis vectors selected".into()));
    }
    random_product(alg, rng, scale, grade, basis_vector_bitmap, minimum_norm, largest_coordinate, gp)
}

fn vector_mask(alg: &Algebra) -> u32 {
    ((1u64 << alg.dimension()) - 1) as u32
}

#[allow(clippy::too_many_arguments)]
fn random_product<R: Rng + ?Sized>(
    alg: &Algebra,
    rng: &mut R,
    scale: f64,
    grade: usize,
    basis_vector_bitmap: u32,
    minimum_norm: f64,
    largest_coordinate: f64,
    product: fn(&Algebra, &SparseMultivector, &SparseMultivector) -> SparseMultivector,
) -> Result<SparseMultivector> {
    let min_norm2 = minimum_norm * minimum_norm;
    for _ in 0..MAX_ATTEMPTS {
        let mut r = SparseMultivector::scalar(1.0);
        for _ in 0..grade {
            let v = random_vector(alg, rng, basis_vector_bitmap);
            r = product(alg, &r, &v);
        }

        let n2 = ops::norm2(alg, &r);
        if n2.abs() <= min_norm2 {
            continue;
        }
        let mul = scale * rng.gen::<f64>() / n2.abs().sqrt();
        if r.largest_coordinate() * mul > largest_coordinate {
            continue;
        }
        return Ok(gp_scalar(alg, &r, mul));
    }
    Err(GradoError::InvalidAlgebra(format!(
        "no acceptable random grade {grade} product after {MAX_ATTEMPTS} attempts"
    )))
}

fn random_vector<R: Rng + ?Sized>(alg: &Algebra, rng: &mut R, basis_vector_bitmap: u32) -> SparseMultivector {
    let coords: Vec<f64> = (0..alg.dimension())
        .map(|i| {
            if basis_vector_bitmap & (1 << i) != 0 {
                rng.gen_range(-1.0..1.0)
            } else {
                0.0
            }
        })
        .collect();
    SparseMultivector::vector(alg, &coords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_blade_grade_and_norm() {
        let alg = Algebra::euclidean(4).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for grade in 0..=4 {
            let b = random_blade(&alg, &mut rng, 2.0, grade).unwrap();
            assert_eq!(b.gu() & !(1 << grade), 0, "grade {grade}: gu {:b}", b.gu());
            assert!(ops::norm(&alg, &b) <= 2.0 + 1e-12);
        }
    }

    #[test]
    fn test_random_blade_respects_basis_bitmap() {
        let alg = Algebra::euclidean(3).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let v = random_blade_ex(&alg, &mut rng, 1.0, 1, 0b101, DEFAULT_MINIMUM_NORM, 4.0).unwrap();
        assert_eq!(v.coordinate(&alg, 0b010), 0.0);
    }

    #[test]
    fn test_random_blade_grade_too_high() {
        let alg = Algebra::euclidean(3).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_blade(&alg, &mut rng, 1.0, 4).is_err());
        assert!(random_blade_ex(&alg, &mut rng, 1.0, 2, 0b001, 0.01, 4.0).is_err());
    }

    #[test]
    fn test_random_versor_is_invertible() {
        let alg = Algebra::euclidean(3).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let v = random_versor(&alg, &mut rng, 1.0, 3).unwrap();
        let one = gp(&alg, &v, &ops::versor_inverse(&alg, &v));
        assert!(ops::equals(&alg, &one, &SparseMultivector::scalar(1.0), 1e-9), "got {one:?}");
    }

    #[test]
    fn test_rejection_is_bounded() {
        let alg = Algebra::euclidean(2).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        // no product can have a norm above 100
        assert!(random_versor_ex(&alg, &mut rng, 1.0, 1, ALL_BASIS_VECTORS, 100.0, 4.0).is_err());
    }
}
