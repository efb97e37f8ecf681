//! Basis blade bitmap arithmetic.
//!
//! A basis blade is a subset of the n basis vectors stored as a bitmap:
//! for e1..e3, `e1 = 0b001`, `e2 = 0b010`, `e1^e3 = 0b101`. Canonical
//! orientation is ascending vector index.

/// Grade (number of basis vectors) of a blade bitmap.
#[inline]
pub fn grade(bitmap: u32) -> usize {
    bitmap.count_ones() as usize
}

/// Sign picked up by sorting the concatenation `a` then `b` into ascending order.
///
/// Every vector of `a` has to move past each vector of `b` with a lower
/// index; each swap flips the sign.
pub fn canonical_reordering_sign(a: u32, b: u32) -> f64 {
    let mut a = a >> 1;
    let mut swaps = 0u32;
    while a != 0 {
        swaps += (a & b).count_ones();
        a >>= 1;
    }
    if swaps & 1 == 0 { 1.0 } else { -1.0 }
}

/// Geometric product of two canonical basis blades under a diagonal metric.
///
/// Returns `(coefficient, bitmap)`. The coefficient is zero when a shared
/// basis vector squares to zero.
pub fn blade_product(a: u32, b: u32, metric: &[f64]) -> (f64, u32) {
    let mut coeff = canonical_reordering_sign(a, b);
    let mut shared = a & b;
    while shared != 0 {
        let i = shared.trailing_zeros() as usize;
        coeff *= metric[i];
        shared &= shared - 1;
    }
    (coeff, a ^ b)
}

/// Sign of the reverse on a grade-`g` blade: `(-1)^(g(g-1)/2)`.
#[inline]
pub fn reverse_sign(g: usize) -> f64 {
    if g % 4 >= 2 { -1.0 } else { 1.0 }
}

/// Sign of the grade involution on a grade-`g` blade: `(-1)^g`.
#[inline]
pub fn involution_sign(g: usize) -> f64 {
    if g % 2 == 1 { -1.0 } else { 1.0 }
}

/// Sign of the Clifford conjugate on a grade-`g` blade: `(-1)^(g(g+1)/2)`.
#[inline]
pub fn conjugate_sign(g: usize) -> f64 {
    if g % 4 == 1 || g % 4 == 2 { -1.0 } else { 1.0 }
}

/// Binomial coefficient C(n, k).
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut r = 1usize;
    for i in 0..k {
        r = r * (n - i) / (i + 1);
    }
    r
}

/// Bitmap and orientation sign of an ordered wedge of basis vectors.
///
/// `[2, 0]` (e3^e1) gives `(-1.0, 0b101)`. Returns `None` when a vector
/// repeats, since the wedge is then zero.
pub fn ordered_wedge(vectors: &[usize]) -> Option<(f64, u32)> {
    let mut bitmap = 0u32;
    let mut sign = 1.0;
    for &v in vectors {
        let b = 1u32 << v;
        if bitmap & b != 0 {
            return None;
        }
        // appending v behind every already-present vector of higher index
        if (bitmap >> (v + 1)).count_ones() % 2 == 1 {
            sign = -sign;
        }
        bitmap |= b;
    }
    Some((sign, bitmap))
}

/// Vector indices of a bitmap in ascending order.
pub fn vectors_of(bitmap: u32) -> Vec<usize> {
    let mut out = Vec::with_capacity(grade(bitmap));
    let mut bits = bitmap;
    while bits != 0 {
        out.push(bits.trailing_zeros() as usize);
        bits &= bits - 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade() {
        assert_eq!(grade(0), 0);
        assert_eq!(grade(0b101), 2);
        assert_eq!(grade(0b111), 3);
    }

    #[test]
    fn test_reordering_sign() {
        // e1 e2 = +e12, e2 e1 = -e12
        assert_eq!(canonical_reordering_sign(0b01, 0b10), 1.0);
        assert_eq!(canonical_reordering_sign(0b10, 0b01), -1.0);
        // e12 e12: e1 e2 e1 e2 -> one swap
        assert_eq!(canonical_reordering_sign(0b11, 0b11), -1.0);
        // e123 e123 in 3D -> -1
        assert_eq!(canonical_reordering_sign(0b111, 0b111), -1.0);
    }

    #[test]
    fn test_blade_product_metric() {
        let euclid = [1.0, 1.0, 1.0];
        assert_eq!(blade_product(0b001, 0b001, &euclid), (1.0, 0));
        assert_eq!(blade_product(0b001, 0b010, &euclid), (1.0, 0b011));
        assert_eq!(blade_product(0b011, 0b011, &euclid), (-1.0, 0));

        let minkowski = [1.0, -1.0];
        assert_eq!(blade_product(0b10, 0b10, &minkowski), (-1.0, 0));
        // e12 e12 = -e1e1 e2e2 = -(1)(-1) = 1
        assert_eq!(blade_product(0b11, 0b11, &minkowski), (1.0, 0));

        let degenerate = [0.0, 1.0];
        assert_eq!(blade_product(0b01, 0b01, &degenerate).0, 0.0);
    }

    #[test]
    fn test_grade_signs() {
        let rev: Vec<f64> = (0..6).map(reverse_sign).collect();
        assert_eq!(rev, vec![1.0, 1.0, -1.0, -1.0, 1.0, 1.0]);
        let inv: Vec<f64> = (0..4).map(involution_sign).collect();
        assert_eq!(inv, vec![1.0, -1.0, 1.0, -1.0]);
        let conj: Vec<f64> = (0..5).map(conjugate_sign).collect();
        assert_eq!(conj, vec![1.0, -1.0, -1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(3, 0), 1);
        assert_eq!(binomial(3, 2), 3);
        assert_eq!(binomial(5, 2), 10);
        assert_eq!(binomial(11, 5), 462);
        assert_eq!(binomial(2, 3), 0);
    }

    #[test]
    fn test_ordered_wedge() {
        assert_eq!(ordered_wedge(&[0, 2]), Some((1.0, 0b101)));
        assert_eq!(ordered_wedge(&[2, 0]), Some((-1.0, 0b101)));
        assert_eq!(ordered_wedge(&[2, 1, 0]), Some((-1.0, 0b111)));
        assert_eq!(ordered_wedge(&[1, 1]), None);
        assert_eq!(ordered_wedge(&[]), Some((1.0, 0)));
    }

    #[test]
    fn test_vectors_of() {
        assert_eq!(vectors_of(0b1011), vec![0, 1, 3]);
        assert!(vectors_of(0).is_empty());
    }
}
