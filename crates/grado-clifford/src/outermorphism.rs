//! Outermorphisms: linear maps of vectors extended to every grade by
//! `f(a ^ b) = f(a) ^ f(b)`.
//!
//! Each group gets a square matrix over its stored basis blades, so
//! applying the map is one matrix-vector product per stored group.

use grado_core::{GradoError, Result};
use tracing::debug;

use crate::algebra::Algebra;
use crate::multivector::SparseMultivector;
use crate::ops;
use crate::products;

/// Per-group matrices of an outermorphism.
///
/// `matrix(g)[row * size + col]` is the coefficient of stored blade `row`
/// of group `g` in the image of stored blade `col`.
#[derive(Debug, Clone, PartialEq)]
pub struct Outermorphism {
    matrices: Vec<Vec<f64>>,
}

impl Outermorphism {
    /// Build from the images of the basis vectors; `images[i]` is `f(e_i)`.
    /// Only the grade-1 part of each image is used.
    pub fn from_vector_images(alg: &Algebra, images: &[SparseMultivector]) -> Result<Self> {
        let n = alg.dimension();
        if images.len() != n {
            return Err(GradoError::CoordinateCount {
                expected: n,
                got: images.len(),
            });
        }
        let images: Vec<SparseMultivector> = images
            .iter()
            .map(|v| ops::extract_grade(alg, v, 0b10))
            .collect();

        let grades = alg.grades();
        let mut matrices = Vec::with_capacity(grades.num_groups);
        for g in 0..grades.num_groups {
            let size = grades.group_size(g);
            let start = grades.dense_start(g);
            let mut matrix = vec![0.0; size * size];
            for col in 0..size {
                // wedge the images in the stored order of the blade's vectors
                let image = grades
                    .blade_vectors(start + col)
                    .iter()
                    .fold(SparseMultivector::scalar(1.0), |acc, &v| {
                        products::op(alg, &acc, &images[v])
                    });
                if let Some(coords) = image.group(alg, g) {
                    for (row, &c) in coords.iter().enumerate() {
                        matrix[row * size + col] = c;
                    }
                }
            }
            matrices.push(matrix);
        }
        debug!(algebra = alg.name(), "outermorphism built");
        Ok(Self { matrices })
    }

    /// Build from a row-major `n x n` matrix whose column `i` holds the
    /// components of `f(e_i)`.
    pub fn from_matrix(alg: &Algebra, matrix: &[f64]) -> Result<Self> {
        let n = alg.dimension();
        if matrix.len() != n * n {
            return Err(GradoError::CoordinateCount {
                expected: n * n,
                got: matrix.len(),
            });
        }
        let images: Vec<SparseMultivector> = (0..n)
            .map(|col| {
                let column: Vec<f64> = (0..n).map(|row| matrix[row * n + col]).collect();
                SparseMultivector::vector(alg, &column)
            })
            .collect();
        Self::from_vector_images(alg, &images)
    }

    /// The matrix acting on group `g`.
    pub fn matrix(&self, g: usize) -> &[f64] {
        &self.matrices[g]
    }
}

/// Apply `om` to `a`. The result stores the same groups as `a`.
pub fn apply_om(alg: &Algebra, om: &Outermorphism, a: &SparseMultivector) -> SparseMultivector {
    let mut result = a.clone();
    let grades = alg.grades();
    let mut offset = 0;
    for g in 0..grades.num_groups {
        let Some(src) = a.group(alg, g) else {
            continue;
        };
        let size = src.len();
        let matrix = om.matrix(g);
        let dst = &mut result.coordinates_mut()[offset..offset + size];
        for (row, d) in dst.iter_mut().enumerate() {
            *d = matrix[row * size..(row + 1) * size]
                .iter()
                .zip(src)
                .map(|(m, c)| m * c)
                .sum();
        }
        offset += size;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::equals;
    use crate::products::op;
    use grado_core::AlgebraConfig;

    fn e3ga() -> Algebra {
        Algebra::new(AlgebraConfig::e3ga()).unwrap()
    }

    fn mv(alg: &Algebra, gu: u32, coords: &[f64]) -> SparseMultivector {
        SparseMultivector::from_array(alg, gu, coords).unwrap()
    }

    #[test]
    fn test_identity_leaves_everything() {
        let alg = e3ga();
        let om = Outermorphism::from_matrix(&alg, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
        let a = mv(&alg, 0b1111, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(apply_om(&alg, &om, &a), a);
    }

    #[test]
    fn test_scaling_scales_by_determinant_on_pseudoscalar() {
        let alg = e3ga();
        let om = Outermorphism::from_matrix(&alg, &[2.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 5.0]).unwrap();
        let i = mv(&alg, 0b1000, &[1.0]);
        assert_eq!(apply_om(&alg, &om, &i).coordinates(), &[30.0]);
        // stored e3^e1 maps to 5 * 2 e3^e1
        let b = mv(&alg, 0b0100, &[0.0, 0.0, 1.0]);
        assert_eq!(apply_om(&alg, &om, &b).coordinates(), &[0.0, 0.0, 10.0]);
    }

    #[test]
    fn test_preserves_outer_product() {
        let alg = e3ga();
        // a shear plus rotation, arbitrary but invertible
        let om = Outermorphism::from_matrix(&alg, &[0.0, -1.0, 0.5, 1.0, 0.0, 0.0, 0.25, 2.0, 1.0]).unwrap();
        let a = SparseMultivector::vector(&alg, &[1.0, 2.0, 3.0]);
        let b = SparseMultivector::vector(&alg, &[-1.0, 0.5, 2.0]);
        let c = SparseMultivector::vector(&alg, &[0.3, 0.0, -1.0]);
        let fa = apply_om(&alg, &om, &a);
        let fb = apply_om(&alg, &om, &b);
        let fc = apply_om(&alg, &om, &c);

        let ab = op(&alg, &a, &b);
        assert!(equals(&alg, &apply_om(&alg, &om, &ab), &op(&alg, &fa, &fb), 1e-12));
        let abc = op(&alg, &ab, &c);
        let fabc = op(&alg, &op(&alg, &fa, &fb), &fc);
        assert!(equals(&alg, &apply_om(&alg, &om, &abc), &fabc, 1e-12));
    }

    #[test]
    fn test_rotation_matches_versor() {
        // 90 degrees in the e1^e2 plane: e1 -> e2, e2 -> -e1
        let alg = e3ga();
        let om = Outermorphism::from_matrix(&alg, &[0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
        let half = std::f64::consts::FRAC_PI_4;
        let rotor = mv(&alg, 0b0101, &[half.cos(), -half.sin(), 0.0, 0.0]);
        let x = mv(&alg, 0b0110, &[1.0, 2.0, 3.0, 0.5, -1.0, 2.0]);
        let expected = ops::apply_unit_versor(&alg, &rotor, &x);
        assert!(equals(&alg, &apply_om(&alg, &om, &x), &expected, 1e-12));
    }

    #[test]
    fn test_wrong_sizes_rejected() {
        let alg = e3ga();
        assert!(Outermorphism::from_matrix(&alg, &[1.0; 4]).is_err());
        let e1 = SparseMultivector::basis_vector(&alg, 0);
        assert!(Outermorphism::from_vector_images(&alg, &[e1]).is_err());
    }
}
