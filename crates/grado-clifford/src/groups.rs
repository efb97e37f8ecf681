//! Group-level primitives: expand a sparse multivector into per-group
//! slices, compress a dense buffer back, and the small per-group loops the
//! derived operations are written with.

use smallvec::SmallVec;

use crate::grade_table::GradeTable;
use crate::multivector::SparseMultivector;

/// One optional coordinate slice per grade group.
pub type Expanded<'a> = SmallVec<[Option<&'a [f64]>; 16]>;

/// Split `mv` into per-group slices; absent groups are `None`.
pub fn expand<'a>(grades: &GradeTable, mv: &'a SparseMultivector) -> Expanded<'a> {
    let coords = mv.coordinates();
    let mut out = Expanded::with_capacity(grades.num_groups);
    let mut offset = 0;
    for g in 0..grades.num_groups {
        if mv.gu() & (1 << g) != 0 {
            let size = grades.group_size(g);
            out.push(Some(&coords[offset..offset + size]));
            offset += size;
        } else {
            out.push(None);
        }
    }
    out
}

/// Build a sparse multivector from a dense buffer.
///
/// A group in `gu_mask` is kept when any coordinate has `|c| > epsilon`
/// (NaN counts as non-zero); kept groups are copied verbatim. Groups
/// outside `gu_mask` are ignored.
pub fn compress(grades: &GradeTable, dense: &[f64], epsilon: f64, gu_mask: u32) -> SparseMultivector {
    let mut gu = 0u32;
    let mut coords = SmallVec::new();
    for g in 0..grades.num_groups {
        if gu_mask & (1 << g) == 0 {
            continue;
        }
        let start = grades.dense_start(g);
        let group = &dense[start..start + grades.group_size(g)];
        if group.iter().any(|c| !(c.abs() <= epsilon)) {
            gu |= 1 << g;
            coords.extend_from_slice(group);
        }
    }
    SparseMultivector::from_parts(gu, coords)
}

/// Scatter `mv` into a zeroed dense buffer of `2^n` coordinates.
pub fn to_dense(grades: &GradeTable, mv: &SparseMultivector) -> Vec<f64> {
    let mut dense = vec![0.0; grades.dense_size()];
    for (g, group) in expand(grades, mv).into_iter().enumerate() {
        if let Some(src) = group {
            let start = grades.dense_start(g);
            copy(&mut dense[start..start + src.len()], src);
        }
    }
    dense
}

#[inline]
pub fn copy(dst: &mut [f64], src: &[f64]) {
    dst.copy_from_slice(src);
}

/// `dst = src * s`
#[inline]
pub fn copy_mul(dst: &mut [f64], src: &[f64], s: f64) {
    for (d, &x) in dst.iter_mut().zip(src) {
        *d = x * s;
    }
}

/// `dst = src / s`
#[inline]
pub fn copy_div(dst: &mut [f64], src: &[f64], s: f64) {
    for (d, &x) in dst.iter_mut().zip(src) {
        *d = x / s;
    }
}

/// `dst += src`
#[inline]
pub fn add(dst: &mut [f64], src: &[f64]) {
    for (d, &x) in dst.iter_mut().zip(src) {
        *d += x;
    }
}

/// `dst -= src`
#[inline]
pub fn sub(dst: &mut [f64], src: &[f64]) {
    for (d, &x) in dst.iter_mut().zip(src) {
        *d -= x;
    }
}

/// `dst = -src`
#[inline]
pub fn neg(dst: &mut [f64], src: &[f64]) {
    for (d, &x) in dst.iter_mut().zip(src) {
        *d = -x;
    }
}

/// `dst = a + b`
#[inline]
pub fn add2(dst: &mut [f64], a: &[f64], b: &[f64]) {
    for ((d, &x), &y) in dst.iter_mut().zip(a).zip(b) {
        *d = x + y;
    }
}

/// `dst = a - b`
#[inline]
pub fn sub2(dst: &mut [f64], a: &[f64], b: &[f64]) {
    for ((d, &x), &y) in dst.iter_mut().zip(a).zip(b) {
        *d = x - y;
    }
}

/// `dst = a * b` elementwise.
#[inline]
pub fn hadamard(dst: &mut [f64], a: &[f64], b: &[f64]) {
    for ((d, &x), &y) in dst.iter_mut().zip(a).zip(b) {
        *d = x * y;
    }
}

/// `dst = a / b` elementwise. No zero check.
#[inline]
pub fn inverse_hadamard(dst: &mut [f64], a: &[f64], b: &[f64]) {
    for ((d, &x), &y) in dst.iter_mut().zip(a).zip(b) {
        *d = x / y;
    }
}

/// Whether every `|a[i] - b[i]| <= eps`.
#[inline]
pub fn equals(a: &[f64], b: &[f64], eps: f64) -> bool {
    a.iter().zip(b).all(|(&x, &y)| (x - y).abs() <= eps)
}

/// Whether every `|a[i]| <= eps`.
#[inline]
pub fn is_zero(a: &[f64], eps: f64) -> bool {
    a.iter().all(|&x| x.abs() <= eps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grado_core::AlgebraConfig;

    fn e3() -> GradeTable {
        let cfg = AlgebraConfig::e3ga();
        GradeTable::new(3, &cfg.basis_order().unwrap())
    }

    #[test]
    fn test_compress_keeps_small_nonzero_group() {
        let g = GradeTable::new(2, &AlgebraConfig::e2ga().basis_order().unwrap());
        // scalar zero, vector [0, 2e-6], bivector 0
        let dense = [0.0, 0.0, 2e-6, 0.0];
        let mv = compress(&g, &dense, 1e-6, g.full_gu());
        assert_eq!(mv.gu(), 0b010);
        assert_eq!(mv.coordinates(), &[0.0, 2e-6]);
    }

    #[test]
    fn test_compress_drops_within_epsilon() {
        let g = e3();
        let mut dense = vec![0.0; 8];
        dense[0] = 1.0;
        dense[4] = 1e-9;
        let mv = compress(&g, &dense, 1e-6, g.full_gu());
        assert_eq!(mv.gu(), 0b0001);
        let exact = compress(&g, &dense, 0.0, g.full_gu());
        assert_eq!(exact.gu(), 0b0101);
    }

    #[test]
    fn test_compress_respects_mask() {
        let g = e3();
        let dense = vec![1.0; 8];
        let mv = compress(&g, &dense, 0.0, 0b1010);
        assert_eq!(mv.gu(), 0b1010);
        assert_eq!(mv.coordinates().len(), 4);
    }

    #[test]
    fn test_compress_keeps_nan() {
        let g = e3();
        let mut dense = vec![0.0; 8];
        dense[7] = f64::NAN;
        assert_eq!(compress(&g, &dense, 1.0, g.full_gu()).gu(), 0b1000);
    }

    #[test]
    fn test_expand_and_dense_roundtrip() {
        let g = e3();
        let dense: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0, 0.0, 0.0, 0.0, 8.0];
        let mv = compress(&g, &dense, 0.0, g.full_gu());
        let parts = expand(&g, &mv);
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[1], Some(&[2.0, 3.0, 4.0][..]));
        assert!(parts[2].is_none());
        assert_eq!(to_dense(&g, &mv), dense);
    }

    #[test]
    fn test_slice_helpers() {
        let a = [1.0, -2.0];
        let b = [4.0, 8.0];
        let mut d = [0.0; 2];
        add2(&mut d, &a, &b);
        assert_eq!(d, [5.0, 6.0]);
        sub2(&mut d, &a, &b);
        assert_eq!(d, [-3.0, -10.0]);
        hadamard(&mut d, &a, &b);
        assert_eq!(d, [4.0, -16.0]);
        inverse_hadamard(&mut d, &a, &b);
        assert_eq!(d, [0.25, -0.25]);
        copy_mul(&mut d, &a, 3.0);
        assert_eq!(d, [3.0, -6.0]);
        neg(&mut d, &a);
        assert_eq!(d, [-1.0, 2.0]);
        assert!(equals(&a, &[1.0 + 1e-9, -2.0], 1e-6));
        assert!(!is_zero(&a, 1.0));
        assert!(is_zero(&[1e-8, -1e-8], 1e-6));
    }

    #[test]
    fn test_inverse_hadamard_divides_by_zero() {
        let mut d = [0.0];
        inverse_hadamard(&mut d, &[1.0], &[0.0]);
        assert!(d[0].is_infinite());
    }
}
