//! SparseMultivector: a multivector stored group by group.
//!
//! Only the grade groups flagged in the group usage bitmap (GU) are stored,
//! in increasing grade order. Within a group the coordinates follow the
//! algebra's basis order and refer to the stored blade orientation.

use smallvec::SmallVec;

use grado_core::blade;
use grado_core::{GradoError, Result};

use crate::algebra::Algebra;
use crate::groups;

/// Inline capacity of the coordinate buffer.
pub type Coordinates = SmallVec<[f64; 8]>;

/// A multivector of some algebra, as group usage bitmap plus coordinates.
///
/// The algebra is not stored; every operation that needs group sizes takes
/// it as an argument.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseMultivector {
    gu: u32,
    coords: Coordinates,
}

impl SparseMultivector {
    /// The zero multivector (no groups).
    pub fn zero() -> Self {
        Self::default()
    }

    /// A scalar multivector. The scalar group is stored even when `value` is 0.
    pub fn scalar(value: f64) -> Self {
        let mut coords = Coordinates::new();
        coords.push(value);
        Self { gu: 1, coords }
    }

    /// Assemble from a group usage bitmap and coordinates, checking the length.
    pub fn from_array(alg: &Algebra, gu: u32, coords: &[f64]) -> Result<Self> {
        let gu = gu & alg.grades().full_gu();
        let expected = alg.grades().mv_size(gu);
        if coords.len() != expected {
            return Err(GradoError::CoordinateCount {
                expected,
                got: coords.len(),
            });
        }
        Ok(Self {
            gu,
            coords: Coordinates::from_slice(coords),
        })
    }

    /// Compress a dense buffer of `2^n` coordinates, dropping exact-zero groups.
    pub fn from_dense(alg: &Algebra, dense: &[f64]) -> Result<Self> {
        let expected = alg.grades().dense_size();
        if dense.len() != expected {
            return Err(GradoError::CoordinateCount {
                expected,
                got: dense.len(),
            });
        }
        Ok(groups::compress(alg.grades(), dense, 0.0, alg.grades().full_gu()))
    }

    /// Unit vector `e_i`.
    pub fn basis_vector(alg: &Algebra, i: usize) -> Self {
        let mut mv = Self::zero();
        mv.set_coordinate(alg, 1 << i, 1.0);
        mv
    }

    /// Grade-1 multivector from vector components (missing components are 0).
    pub fn vector(alg: &Algebra, components: &[f64]) -> Self {
        let n = alg.dimension();
        let mut coords = Coordinates::from_elem(0.0, n);
        for (c, &x) in coords.iter_mut().zip(components) {
            *c = x;
        }
        Self { gu: 0b10, coords }
    }

    pub(crate) fn from_parts(gu: u32, coords: Coordinates) -> Self {
        Self { gu, coords }
    }

    /// Dense buffer of `2^n` coordinates in basis order.
    pub fn to_dense(&self, alg: &Algebra) -> Vec<f64> {
        groups::to_dense(alg.grades(), self)
    }

    /// Group usage bitmap.
    #[inline]
    pub fn gu(&self) -> u32 {
        self.gu
    }

    #[inline]
    pub fn coordinates(&self) -> &[f64] {
        &self.coords
    }

    #[inline]
    pub fn coordinates_mut(&mut self) -> &mut [f64] {
        &mut self.coords
    }

    /// Whether group `g` is stored.
    #[inline]
    pub fn has_group(&self, g: usize) -> bool {
        self.gu & (1 << g) != 0
    }

    /// Coordinates of group `g`, if stored.
    pub fn group(&self, alg: &Algebra, g: usize) -> Option<&[f64]> {
        if !self.has_group(g) {
            return None;
        }
        let grades = alg.grades();
        let start = grades.group_offset(self.gu, g);
        Some(&self.coords[start..start + grades.group_size(g)])
    }

    /// Scalar coordinate, 0 when the scalar group is absent.
    pub fn scalar_part(&self) -> f64 {
        if self.gu & 1 != 0 {
            self.coords[0]
        } else {
            0.0
        }
    }

    /// Coordinate of the stored blade with canonical bitmap `bitmap`.
    ///
    /// The value refers to the stored orientation: in an algebra storing
    /// `e3^e1`, the coordinate of bitmap `0b101` is the `e3^e1` coefficient.
    pub fn coordinate(&self, alg: &Algebra, bitmap: u32) -> f64 {
        let grades = alg.grades();
        let g = blade::grade(bitmap);
        match self.group(alg, g) {
            Some(group) => group[grades.blade_index(bitmap) - grades.dense_start(g)],
            None => 0.0,
        }
    }

    /// Set the coordinate of the stored blade with bitmap `bitmap`,
    /// inserting its group (zero filled) when absent.
    pub fn set_coordinate(&mut self, alg: &Algebra, bitmap: u32, value: f64) {
        let grades = alg.grades();
        let g = blade::grade(bitmap);
        self.reserve_group(alg, g);
        let offset = grades.group_offset(self.gu, g);
        self.coords[offset + grades.blade_index(bitmap) - grades.dense_start(g)] = value;
    }

    /// Insert a zero-filled group `g` if it is not stored yet.
    pub fn reserve_group(&mut self, alg: &Algebra, g: usize) {
        if self.has_group(g) {
            return;
        }
        let grades = alg.grades();
        let offset = grades.group_offset(self.gu, g);
        let size = grades.group_size(g);
        self.coords
            .insert_many(offset, std::iter::repeat(0.0).take(size));
        self.gu |= 1 << g;
    }

    /// Largest absolute coordinate, 0 for the zero multivector.
    pub fn largest_coordinate(&self) -> f64 {
        self.coords.iter().fold(0.0, |m: f64, c| m.max(c.abs()))
    }

    /// Largest absolute coordinate and the canonical bitmap of its blade.
    /// The zero multivector reports `(0.0, 0)`.
    pub fn largest_basis_blade(&self, alg: &Algebra) -> (f64, u32) {
        let grades = alg.grades();
        let mut best = (0.0, 0u32);
        let mut offset = 0;
        for g in 0..grades.num_groups {
            if !self.has_group(g) {
                continue;
            }
            let start = grades.dense_start(g);
            for (k, c) in self.coords[offset..offset + grades.group_size(g)].iter().enumerate() {
                if c.abs() > best.0 {
                    best = (c.abs(), grades.basis_blade(start + k));
                }
            }
            offset += grades.group_size(g);
        }
        best
    }

    /// Bitmap of the groups holding a coordinate with `|c| > eps`.
    pub fn grade_bitmap(&self, alg: &Algebra, eps: f64) -> u32 {
        groups::expand(alg.grades(), self)
            .iter()
            .enumerate()
            .filter(|(_, group)| group.map_or(false, |c| !groups::is_zero(c, eps)))
            .fold(0, |acc, (g, _)| acc | (1 << g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grado_core::AlgebraConfig;

    fn e3ga() -> Algebra {
        Algebra::new(AlgebraConfig::e3ga()).unwrap()
    }

    #[test]
    fn test_zero_and_scalar() {
        let z = SparseMultivector::zero();
        assert_eq!(z.gu(), 0);
        assert!(z.coordinates().is_empty());
        let s = SparseMultivector::scalar(2.5);
        assert_eq!(s.gu(), 1);
        assert_eq!(s.scalar_part(), 2.5);
    }

    #[test]
    fn test_from_array_checks_length() {
        let alg = e3ga();
        assert!(SparseMultivector::from_array(&alg, 0b0011, &[1.0, 2.0, 3.0, 4.0]).is_ok());
        let err = SparseMultivector::from_array(&alg, 0b0011, &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, GradoError::CoordinateCount { expected: 4, got: 2 }));
    }

    #[test]
    fn test_from_dense_drops_zero_groups() {
        let alg = e3ga();
        let mut dense = vec![0.0; 8];
        dense[1] = 1.0;
        let mv = SparseMultivector::from_dense(&alg, &dense).unwrap();
        assert_eq!(mv.gu(), 0b0010);
        assert_eq!(mv.to_dense(&alg), dense);
        assert!(SparseMultivector::from_dense(&alg, &[0.0; 4]).is_err());
    }

    #[test]
    fn test_set_coordinate_reserves_group() {
        let alg = e3ga();
        let mut mv = SparseMultivector::scalar(1.0);
        mv.set_coordinate(&alg, 0b111, 3.0);
        mv.set_coordinate(&alg, 0b010, 2.0);
        assert_eq!(mv.gu(), 0b1011);
        assert_eq!(mv.coordinates(), &[1.0, 0.0, 2.0, 0.0, 3.0]);
        assert_eq!(mv.coordinate(&alg, 0b010), 2.0);
        assert_eq!(mv.coordinate(&alg, 0b011), 0.0);
    }

    #[test]
    fn test_coordinate_in_stored_order() {
        // e3ga stores e1^e2, e2^e3, e3^e1
        let alg = e3ga();
        let mv = SparseMultivector::from_array(&alg, 0b0100, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(mv.coordinate(&alg, 0b011), 1.0);
        assert_eq!(mv.coordinate(&alg, 0b110), 2.0);
        assert_eq!(mv.coordinate(&alg, 0b101), 3.0);
    }

    #[test]
    fn test_largest_basis_blade() {
        let alg = e3ga();
        let mv = SparseMultivector::from_array(&alg, 0b0110, &[1.0, -5.0, 0.0, 2.0, 0.0, 0.0]).unwrap();
        assert_eq!(mv.largest_coordinate(), 5.0);
        assert_eq!(mv.largest_basis_blade(&alg), (5.0, 0b010));
        assert_eq!(SparseMultivector::zero().largest_basis_blade(&alg), (0.0, 0));
    }

    #[test]
    fn test_grade_bitmap() {
        let alg = e3ga();
        let mv = SparseMultivector::from_array(&alg, 0b0011, &[1.0, 1e-9, 0.0, 0.0]).unwrap();
        assert_eq!(mv.grade_bitmap(&alg, 1e-6), 0b0001);
        assert_eq!(mv.grade_bitmap(&alg, 0.0), 0b0011);
    }

    #[test]
    fn test_vector_and_basis_vector() {
        let alg = e3ga();
        let v = SparseMultivector::vector(&alg, &[1.0, 2.0]);
        assert_eq!(v.coordinates(), &[1.0, 2.0, 0.0]);
        let e2 = SparseMultivector::basis_vector(&alg, 1);
        assert_eq!(e2.coordinate(&alg, 0b010), 1.0);
    }
}
