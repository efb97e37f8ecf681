//! Algebra configuration.
//!
//! An algebra is described by its basis vector names, an optional diagonal
//! metric (default all `+1`) and an optional ordering of the basis blades.
//! Configurations can be built in code, taken from a preset or loaded from
//! JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::blade;
use crate::error::GradoError;
use crate::Result;

/// Largest supported number of basis vectors.
///
/// The geometric product table alone holds `4^n` terms of 24 bytes, about
/// 400 MB at `n = 12` and 6.4 GB at `n = 14`.
pub const MAX_DIMENSION: usize = 12;

/// Construction parameters for a Clifford algebra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgebraConfig {
    /// Short name used in logs (e.g. "e3ga").
    pub name: String,

    /// Basis vector names, in index order. Used verbatim by the parser and printer.
    pub basis_vectors: Vec<String>,

    /// Diagonal of the metric: `metric[i] = e_i · e_i`. `None` means all `+1`.
    #[serde(default)]
    pub metric: Option<Vec<f64>>,

    /// Every basis blade as an ordered list of basis vector names, grouped
    /// by ascending grade. The scalar is the empty list. `None` means
    /// ascending lexicographic order with positive orientation.
    #[serde(default)]
    pub basis_blades: Option<Vec<Vec<String>>>,
}

impl AlgebraConfig {
    /// Euclidean configuration with the given basis vector names.
    pub fn new(name: &str, basis_vectors: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            basis_vectors: basis_vectors.iter().map(|s| s.to_string()).collect(),
            metric: None,
            basis_blades: None,
        }
    }

    /// Set the metric diagonal.
    pub fn with_metric(mut self, metric: &[f64]) -> Self {
        self.metric = Some(metric.to_vec());
        self
    }

    /// Set an explicit basis blade ordering.
    pub fn with_basis_blades(mut self, blades: &[&[&str]]) -> Self {
        self.basis_blades = Some(
            blades
                .iter()
                .map(|b| b.iter().map(|s| s.to_string()).collect())
                .collect(),
        );
        self
    }

    /// 2D Euclidean: e1, e2.
    pub fn e2ga() -> Self {
        Self::new("e2ga", &["e1", "e2"])
    }

    /// 3D Euclidean with bivectors stored as e1^e2, e2^e3, e3^e1.
    pub fn e3ga() -> Self {
        Self::new("e3ga", &["e1", "e2", "e3"]).with_basis_blades(&[
            &[],
            &["e1"],
            &["e2"],
            &["e3"],
            &["e1", "e2"],
            &["e2", "e3"],
            &["e3", "e1"],
            &["e1", "e2", "e3"],
        ])
    }

    /// 4D Euclidean: e1..e4.
    pub fn e4ga() -> Self {
        Self::new("e4ga", &["e1", "e2", "e3", "e4"])
    }

    /// 11D Euclidean: e1..e11.
    pub fn e11ga() -> Self {
        let names: Vec<String> = (1..=11).map(|i| format!("e{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        Self::new("e11ga", &refs)
    }

    /// Minkowski space-time: e1, e2, e3 square to +1, e4 squares to -1.
    pub fn minkowski3() -> Self {
        Self::new("minkowski3", &["e1", "e2", "e3", "e4"]).with_metric(&[1.0, 1.0, 1.0, -1.0])
    }

    /// Conformal model of 3D space on a diagonal basis (ep^2 = +1, em^2 = -1).
    pub fn conformal_diag() -> Self {
        Self::new("conformal_diag", &["e1", "e2", "e3", "ep", "em"])
            .with_metric(&[1.0, 1.0, 1.0, 1.0, -1.0])
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| GradoError::Config(format!("invalid algebra config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| GradoError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GradoError::Config(format!("failed to serialize algebra config: {}", e)))
    }

    /// Number of basis vectors.
    pub fn dimension(&self) -> usize {
        self.basis_vectors.len()
    }

    /// Metric diagonal, defaulting to all `+1`.
    pub fn metric_diagonal(&self) -> Vec<f64> {
        match &self.metric {
            Some(m) => m.clone(),
            None => vec![1.0; self.dimension()],
        }
    }

    /// Check dimension, names and metric length.
    pub fn validate(&self) -> Result<()> {
        let n = self.dimension();
        if n == 0 || n > MAX_DIMENSION {
            return Err(GradoError::InvalidAlgebra(format!(
                "{}: dimension must be in 1..={}, got {}",
                self.name, MAX_DIMENSION, n
            )));
        }
        for (i, name) in self.basis_vectors.iter().enumerate() {
            if !is_identifier(name) {
                return Err(GradoError::InvalidAlgebra(format!(
                    "{}: basis vector name '{}' is not an identifier",
                    self.name, name
                )));
            }
            if self.basis_vectors[..i].contains(name) {
                return Err(GradoError::InvalidAlgebra(format!(
                    "{}: duplicate basis vector name '{}'",
                    self.name, name
                )));
            }
        }
        if let Some(metric) = &self.metric {
            if metric.len() != n {
                return Err(GradoError::InvalidAlgebra(format!(
                    "{}: metric has {} entries for {} basis vectors",
                    self.name,
                    metric.len(),
                    n
                )));
            }
        }
        Ok(())
    }

    /// Index of a basis vector by name.
    pub fn vector_index(&self, name: &str) -> Option<usize> {
        self.basis_vectors.iter().position(|v| v == name)
    }

    /// Every basis blade as ordered vector indices, grouped by ascending grade.
    ///
    /// Validates an explicit ordering: each blade must occur exactly once,
    /// blades must be grouped by grade, and names must be known.
    pub fn basis_order(&self) -> Result<Vec<Vec<usize>>> {
        self.validate()?;
        let n = self.dimension();
        let blades = match &self.basis_blades {
            None => return Ok(default_basis_order(n)),
            Some(b) => b,
        };
        if blades.len() != 1 << n {
            return Err(GradoError::InvalidAlgebra(format!(
                "{}: expected {} basis blades, got {}",
                self.name,
                1usize << n,
                blades.len()
            )));
        }

        let mut seen = vec![false; 1 << n];
        let mut order = Vec::with_capacity(blades.len());
        let mut last_grade = 0;
        for names in blades {
            let mut vectors = Vec::with_capacity(names.len());
            for name in names {
                let idx = self.vector_index(name).ok_or_else(|| {
                    GradoError::InvalidAlgebra(format!(
                        "{}: unknown basis vector '{}' in basis blade list",
                        self.name, name
                    ))
                })?;
                vectors.push(idx);
            }
            let (_, bitmap) = blade::ordered_wedge(&vectors).ok_or_else(|| {
                GradoError::InvalidAlgebra(format!(
                    "{}: basis blade {:?} repeats a vector",
                    self.name, names
                ))
            })?;
            if vectors.len() < last_grade {
                return Err(GradoError::InvalidAlgebra(format!(
                    "{}: basis blades must be listed by ascending grade ({:?})",
                    self.name, names
                )));
            }
            if seen[bitmap as usize] {
                return Err(GradoError::InvalidAlgebra(format!(
                    "{}: basis blade {:?} listed twice",
                    self.name, names
                )));
            }
            seen[bitmap as usize] = true;
            last_grade = vectors.len();
            order.push(vectors);
        }
        Ok(order)
    }
}

/// Ascending lexicographic combinations, grade by grade.
fn default_basis_order(n: usize) -> Vec<Vec<usize>> {
    let mut order = Vec::with_capacity(1 << n);
    for g in 0..=n {
        let mut combo: Vec<usize> = (0..g).collect();
        loop {
            order.push(combo.clone());
            // advance to the next combination
            let mut i = g;
            while i > 0 && combo[i - 1] == n - g + i - 1 {
                i -= 1;
            }
            if i == 0 {
                break;
            }
            combo[i - 1] += 1;
            for j in i..g {
                combo[j] = combo[j - 1] + 1;
            }
        }
    }
    order
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
