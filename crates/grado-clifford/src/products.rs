//! The product engine: every bilinear product goes through `product`.
//!
//! For each pair of stored groups the structure constants give the
//! partial products to accumulate into a dense scratch buffer, which is
//! then compressed back to sparse form.

use crate::algebra::Algebra;
use crate::groups;
use crate::multivector::SparseMultivector;
use crate::structure::ProductKind;

/// Product of kind `kind`. Exact-zero output groups are dropped.
pub fn product(alg: &Algebra, a: &SparseMultivector, b: &SparseMultivector, kind: ProductKind) -> SparseMultivector {
    let grades = alg.grades();
    let table = alg.structure(kind);
    let mut scratch = vec![0.0; grades.dense_size()];

    let ea = groups::expand(grades, a);
    let eb = groups::expand(grades, b);
    for (i, ga) in ea.iter().enumerate() {
        let Some(ca) = ga else { continue };
        for (j, gb) in eb.iter().enumerate() {
            let Some(cb) = gb else { continue };
            for pp in table.entries(i, j) {
                let out = &mut scratch[grades.dense_start(pp.group_out)..];
                for t in &pp.terms {
                    out[t.out as usize] += t.coeff * ca[t.a as usize] * cb[t.b as usize];
                }
            }
        }
    }

    groups::compress(grades, &scratch, 0.0, grades.full_gu())
}

/// Geometric product `A B`.
pub fn gp(alg: &Algebra, a: &SparseMultivector, b: &SparseMultivector) -> SparseMultivector {
    product(alg, a, b, ProductKind::Geometric)
}

/// Outer product `A ^ B`.
pub fn op(alg: &Algebra, a: &SparseMultivector, b: &SparseMultivector) -> SparseMultivector {
    product(alg, a, b, ProductKind::Outer)
}

/// Scalar product `A * B`.
pub fn sp(alg: &Algebra, a: &SparseMultivector, b: &SparseMultivector) -> f64 {
    product(alg, a, b, ProductKind::Scalar).scalar_part()
}

/// Left contraction `A ⌋ B`.
pub fn lc(alg: &Algebra, a: &SparseMultivector, b: &SparseMultivector) -> SparseMultivector {
    product(alg, a, b, ProductKind::LeftContraction)
}

/// Right contraction `A ⌊ B`.
pub fn rc(alg: &Algebra, a: &SparseMultivector, b: &SparseMultivector) -> SparseMultivector {
    product(alg, a, b, ProductKind::RightContraction)
}

/// Hestenes inner product. Scalar operands contribute nothing.
pub fn hip(alg: &Algebra, a: &SparseMultivector, b: &SparseMultivector) -> SparseMultivector {
    product(alg, a, b, ProductKind::HestenesInner)
}

/// Modified Hestenes inner product.
pub fn mhip(alg: &Algebra, a: &SparseMultivector, b: &SparseMultivector) -> SparseMultivector {
    product(alg, a, b, ProductKind::ModifiedHestenesInner)
}

/// `A * s`. Multiplying by zero yields the zero multivector.
pub fn gp_scalar(alg: &Algebra, a: &SparseMultivector, s: f64) -> SparseMultivector {
    let mut dense = vec![0.0; alg.grades().dense_size()];
    let grades = alg.grades();
    for (g, group) in groups::expand(grades, a).into_iter().enumerate() {
        if let Some(src) = group {
            let start = grades.dense_start(g);
            groups::copy_mul(&mut dense[start..start + src.len()], src, s);
        }
    }
    groups::compress(grades, &dense, 0.0, a.gu())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grado_core::AlgebraConfig;

    fn e3ga() -> Algebra {
        Algebra::new(AlgebraConfig::e3ga()).unwrap()
    }

    fn e(alg: &Algebra, i: usize) -> SparseMultivector {
        SparseMultivector::basis_vector(alg, i)
    }

    #[test]
    fn test_gp_orthogonal_vectors() {
        let alg = e3ga();
        let r = gp(&alg, &e(&alg, 0), &e(&alg, 1));
        assert_eq!(r.gu(), 0b0100);
        assert_eq!(r.coordinate(&alg, 0b011), 1.0);
        assert_eq!(r.coordinates().iter().filter(|c| **c != 0.0).count(), 1);
    }

    #[test]
    fn test_gp_vector_squares_to_one() {
        let alg = e3ga();
        let r = gp(&alg, &e(&alg, 0), &e(&alg, 0));
        assert_eq!(r, SparseMultivector::scalar(1.0));
    }

    #[test]
    fn test_gp_respects_stored_orientation() {
        // e3 e1 is stored as +1 * (e3^e1)
        let alg = e3ga();
        let r = gp(&alg, &e(&alg, 2), &e(&alg, 0));
        assert_eq!(r.coordinate(&alg, 0b101), 1.0);
        let r = gp(&alg, &e(&alg, 0), &e(&alg, 2));
        assert_eq!(r.coordinate(&alg, 0b101), -1.0);
    }

    #[test]
    fn test_gp_metric() {
        let alg = Algebra::new(AlgebraConfig::minkowski3()).unwrap();
        let r = gp(&alg, &e(&alg, 3), &e(&alg, 3));
        assert_eq!(r, SparseMultivector::scalar(-1.0));
    }

    #[test]
    fn test_op_self_is_zero() {
        let alg = e3ga();
        let v = SparseMultivector::vector(&alg, &[1.0, 2.0, 3.0]);
        let r = op(&alg, &v, &v);
        assert_eq!(r.gu(), 0);
    }

    #[test]
    fn test_sp_and_contractions() {
        let alg = e3ga();
        let v = SparseMultivector::vector(&alg, &[1.0, 2.0, 3.0]);
        assert_eq!(sp(&alg, &v, &v), 14.0);

        let e12 = gp(&alg, &e(&alg, 0), &e(&alg, 1));
        // e1 ⌋ (e1^e2) = e2
        assert_eq!(lc(&alg, &e(&alg, 0), &e12), e(&alg, 1));
        // (e1^e2) ⌊ e2 = e1
        assert_eq!(rc(&alg, &e12, &e(&alg, 1)), e(&alg, 0));
        // grade too high on the left
        assert_eq!(lc(&alg, &e12, &e(&alg, 0)).gu(), 0);
    }

    #[test]
    fn test_hip_vs_mhip_with_scalar() {
        let alg = e3ga();
        let s = SparseMultivector::scalar(2.0);
        let v = e(&alg, 0);
        assert_eq!(hip(&alg, &s, &v).gu(), 0);
        assert_eq!(mhip(&alg, &s, &v).coordinate(&alg, 0b001), 2.0);
        // for two vectors both reduce to the dot product
        assert_eq!(hip(&alg, &v, &v), SparseMultivector::scalar(1.0));
        assert_eq!(mhip(&alg, &v, &v), SparseMultivector::scalar(1.0));
    }

    #[test]
    fn test_gp_scalar() {
        let alg = e3ga();
        let v = SparseMultivector::vector(&alg, &[1.0, 2.0, 3.0]);
        let r = gp_scalar(&alg, &v, 2.0);
        assert_eq!(r.coordinates(), &[2.0, 4.0, 6.0]);
        assert_eq!(gp_scalar(&alg, &v, 0.0).gu(), 0);
    }

    #[test]
    fn test_zero_operand() {
        let alg = e3ga();
        let z = SparseMultivector::zero();
        assert_eq!(gp(&alg, &z, &e(&alg, 0)).gu(), 0);
    }
}
