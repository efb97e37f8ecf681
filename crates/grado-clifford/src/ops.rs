//! Derived operations built from the group primitives and the product engine.

use grado_core::blade;

use crate::algebra::Algebra;
use crate::groups;
use crate::multivector::{Coordinates, SparseMultivector};
use crate::products;

/// Apply `f(g, dst, src)` to every stored group, keeping the group usage.
fn map_groups(alg: &Algebra, a: &SparseMultivector, f: impl Fn(usize, &mut [f64], &[f64])) -> SparseMultivector {
    let grades = alg.grades();
    let mut coords = Coordinates::from_elem(0.0, a.coordinates().len());
    let mut offset = 0;
    for (g, group) in groups::expand(grades, a).into_iter().enumerate() {
        if let Some(src) = group {
            f(g, &mut coords[offset..offset + src.len()], src);
            offset += src.len();
        }
    }
    SparseMultivector::from_parts(a.gu(), coords)
}

/// Combine two multivectors group by group over `gu`. `f` receives the
/// destination and whichever of the two groups are stored.
fn zip_groups(
    alg: &Algebra,
    a: &SparseMultivector,
    b: &SparseMultivector,
    gu: u32,
    f: impl Fn(&mut [f64], Option<&[f64]>, Option<&[f64]>),
) -> SparseMultivector {
    let grades = alg.grades();
    let ea = groups::expand(grades, a);
    let eb = groups::expand(grades, b);
    let mut coords = Coordinates::from_elem(0.0, grades.mv_size(gu));
    let mut offset = 0;
    for g in 0..grades.num_groups {
        if gu & (1 << g) == 0 {
            continue;
        }
        let size = grades.group_size(g);
        f(&mut coords[offset..offset + size], ea[g], eb[g]);
        offset += size;
    }
    SparseMultivector::from_parts(gu, coords)
}

pub fn negate(alg: &Algebra, a: &SparseMultivector) -> SparseMultivector {
    map_groups(alg, a, |_, dst, src| groups::neg(dst, src))
}

/// Reverse: grade `g` scaled by `(-1)^(g(g-1)/2)`.
pub fn reverse(alg: &Algebra, a: &SparseMultivector) -> SparseMultivector {
    map_groups(alg, a, |g, dst, src| groups::copy_mul(dst, src, blade::reverse_sign(g)))
}

/// Grade involution: grade `g` scaled by `(-1)^g`.
pub fn grade_involution(alg: &Algebra, a: &SparseMultivector) -> SparseMultivector {
    map_groups(alg, a, |g, dst, src| groups::copy_mul(dst, src, blade::involution_sign(g)))
}

/// Clifford conjugate: grade `g` scaled by `(-1)^(g(g+1)/2)`.
pub fn clifford_conjugate(alg: &Algebra, a: &SparseMultivector) -> SparseMultivector {
    map_groups(alg, a, |g, dst, src| groups::copy_mul(dst, src, blade::conjugate_sign(g)))
}

/// `A + B`. The result stores every group stored by either operand.
pub fn add(alg: &Algebra, a: &SparseMultivector, b: &SparseMultivector) -> SparseMultivector {
    zip_groups(alg, a, b, a.gu() | b.gu(), |dst, x, y| match (x, y) {
        (Some(x), Some(y)) => groups::add2(dst, x, y),
        (Some(x), None) => groups::copy(dst, x),
        (None, Some(y)) => groups::copy(dst, y),
        (None, None) => {}
    })
}

/// `A - B`.
pub fn subtract(alg: &Algebra, a: &SparseMultivector, b: &SparseMultivector) -> SparseMultivector {
    zip_groups(alg, a, b, a.gu() | b.gu(), |dst, x, y| match (x, y) {
        (Some(x), Some(y)) => groups::sub2(dst, x, y),
        (Some(x), None) => groups::copy(dst, x),
        (None, Some(y)) => groups::neg(dst, y),
        (None, None) => {}
    })
}

/// `A + 1`
pub fn increment(alg: &Algebra, a: &SparseMultivector) -> SparseMultivector {
    add(alg, a, &SparseMultivector::scalar(1.0))
}

/// `A - 1`
pub fn decrement(alg: &Algebra, a: &SparseMultivector) -> SparseMultivector {
    subtract(alg, a, &SparseMultivector::scalar(1.0))
}

/// Scale and add scalar: `A * mul + add`.
pub fn sas(alg: &Algebra, a: &SparseMultivector, mul: f64, add: f64) -> SparseMultivector {
    let mut r = map_groups(alg, a, |_, dst, src| groups::copy_mul(dst, src, mul));
    if add != 0.0 {
        r.reserve_group(alg, 0);
        r.coordinates_mut()[0] += add;
    }
    r
}

/// Keep only the groups in `group_bitmap`.
pub fn extract_grade(alg: &Algebra, a: &SparseMultivector, group_bitmap: u32) -> SparseMultivector {
    zip_groups(alg, a, a, a.gu() & group_bitmap, |dst, x, _| {
        if let Some(x) = x {
            groups::copy(dst, x);
        }
    })
}

/// Hadamard product over the groups stored by both operands.
pub fn hp(alg: &Algebra, a: &SparseMultivector, b: &SparseMultivector) -> SparseMultivector {
    zip_groups(alg, a, b, a.gu() & b.gu(), |dst, x, y| {
        if let (Some(x), Some(y)) = (x, y) {
            groups::hadamard(dst, x, y);
        }
    })
}

/// Inverse Hadamard product (elementwise division). No zero check.
pub fn ihp(alg: &Algebra, a: &SparseMultivector, b: &SparseMultivector) -> SparseMultivector {
    zip_groups(alg, a, b, a.gu() & b.gu(), |dst, x, y| {
        if let (Some(x), Some(y)) = (x, y) {
            groups::inverse_hadamard(dst, x, y);
        }
    })
}

/// Whether every coordinate of `A - B` is within `eps` of zero.
pub fn equals(alg: &Algebra, a: &SparseMultivector, b: &SparseMultivector, eps: f64) -> bool {
    let ea = groups::expand(alg.grades(), a);
    let eb = groups::expand(alg.grades(), b);
    ea.iter().zip(eb.iter()).all(|(x, y)| match (x, y) {
        (Some(x), Some(y)) => groups::equals(x, y, eps),
        (Some(x), None) => groups::is_zero(x, eps),
        (None, Some(y)) => groups::is_zero(y, eps),
        (None, None) => true,
    })
}

pub fn is_zero(a: &SparseMultivector, eps: f64) -> bool {
    groups::is_zero(a.coordinates(), eps)
}

fn permute(alg: &Algebra, a: &SparseMultivector, map: &[(usize, f64)]) -> SparseMultivector {
    let grades = alg.grades();
    let mut dense = vec![0.0; grades.dense_size()];
    for (g, group) in groups::expand(grades, a).into_iter().enumerate() {
        if let Some(src) = group {
            let start = grades.dense_start(g);
            for (k, &c) in src.iter().enumerate() {
                let (out, coeff) = map[start + k];
                dense[out] = coeff * c;
            }
        }
    }
    groups::compress(grades, &dense, 0.0, grades.full_gu())
}

/// Dual with respect to the pseudoscalar: `A ⌋ I⁻¹`.
pub fn dual(alg: &Algebra, a: &SparseMultivector) -> SparseMultivector {
    permute(alg, a, &alg.dual_table().dual)
}

/// Undual: `A ⌋ I`.
pub fn undual(alg: &Algebra, a: &SparseMultivector) -> SparseMultivector {
    permute(alg, a, &alg.dual_table().undual)
}

/// Reverse norm squared `<A ~A>₀`. May be negative in non-Euclidean metrics.
pub fn norm2(alg: &Algebra, a: &SparseMultivector) -> f64 {
    products::sp(alg, a, &reverse(alg, a))
}

/// `sqrt(|norm2(A)|)`
pub fn norm(alg: &Algebra, a: &SparseMultivector) -> f64 {
    norm2(alg, a).abs().sqrt()
}

/// `A / norm(A)`. A null multivector yields non-finite coordinates.
pub fn unit(alg: &Algebra, a: &SparseMultivector) -> SparseMultivector {
    let n = norm(alg, a);
    map_groups(alg, a, |_, dst, src| groups::copy_div(dst, src, n))
}

/// Inverse of a versor: `~V / norm2(V)`. No zero check.
pub fn versor_inverse(alg: &Algebra, a: &SparseMultivector) -> SparseMultivector {
    let n2 = norm2(alg, a);
    map_groups(alg, a, |g, dst, src| {
        groups::copy_div(dst, src, blade::reverse_sign(g) * n2)
    })
}

/// Inverse geometric product `A B⁻¹`, with `B` a versor. No zero check.
pub fn igp(alg: &Algebra, a: &SparseMultivector, b: &SparseMultivector) -> SparseMultivector {
    products::gp(alg, a, &versor_inverse(alg, b))
}

/// `V X V⁻¹`, restricted to the groups of `X`.
pub fn apply_versor(alg: &Algebra, v: &SparseMultivector, x: &SparseMultivector) -> SparseMultivector {
    apply_versor_wi(alg, v, x, &versor_inverse(alg, v))
}

/// `V X ~V` for a unit versor, restricted to the groups of `X`.
pub fn apply_unit_versor(alg: &Algebra, v: &SparseMultivector, x: &SparseMultivector) -> SparseMultivector {
    apply_versor_wi(alg, v, x, &reverse(alg, v))
}

/// `V X Vi` with a precomputed inverse `Vi`, restricted to the groups of `X`.
pub fn apply_versor_wi(
    alg: &Algebra,
    v: &SparseMultivector,
    x: &SparseMultivector,
    v_inverse: &SparseMultivector,
) -> SparseMultivector {
    let vx = products::gp(alg, v, x);
    extract_grade(alg, &products::gp(alg, &vx, v_inverse), x.gu())
}
