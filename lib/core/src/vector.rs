use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A face embedding: a fixed-length vector of floats
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Embedding {
    data: Vec<f32>,
}

impl Embedding {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Compute L2 (Euclidean) distance
    ///
    /// Vectors of different length are never truncated: the comparison fails
    /// with [`Error::DimensionMismatch`].
    #[inline]
    pub fn l2_distance(&self, other: &Embedding) -> Result<f32> {
        l2_distance(&self.data, &other.data)
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(data: Vec<f32>) -> Self {
        Embedding::new(data)
    }
}

/// Euclidean norm of the element-wise difference of two equal-length slices
#[inline]
pub fn l2_distance(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(l2_distance_squared_scalar(a, b).sqrt())
}

/// Scalar squared distance with four accumulators for better pipelining
#[inline]
fn l2_distance_squared_scalar(a: &[f32], b: &[f32]) -> f32 {
    let chunks = a.len() / 4;
    let mut sum0 = 0.0f32;
    let mut sum1 = 0.0f32;
    let mut sum2 = 0.0f32;
    let mut sum3 = 0.0f32;

    for i in 0..chunks {
        let j = i * 4;
        let d0 = a[j] - b[j];
        let d1 = a[j + 1] - b[j + 1];
        let d2 = a[j + 2] - b[j + 2];
        let d3 = a[j + 3] - b[j + 3];
        sum0 += d0 * d0;
        sum1 += d1 * d1;
        sum2 += d2 * d2;
        sum3 += d3 * d3;
    }

    let mut sum = (sum0 + sum1) + (sum2 + sum3);
    for j in chunks * 4..a.len() {
        let d = a[j] - b[j];
        sum += d * d;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_distance() {
        let v1 = Embedding::new(vec![0.0, 0.0]);
        let v2 = Embedding::new(vec![3.0, 4.0]);
        assert!((v1.l2_distance(&v2).unwrap() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_l2_distance_is_symmetric() {
        let a = Embedding::new(vec![0.25, -1.5, 3.0, 0.5, 2.0, -0.75, 1.0]);
        let b = Embedding::new(vec![1.0, 0.5, -2.0, 0.0, 0.125, 4.0, -3.0]);
        assert_eq!(a.l2_distance(&b).unwrap(), b.l2_distance(&a).unwrap());
    }

    #[test]
    fn test_l2_distance_remainder_elements() {
        // 6 dims: one chunk of four plus two trailing elements
        let a = Embedding::new(vec![1.0; 6]);
        let b = Embedding::new(vec![0.0; 6]);
        assert!((a.l2_distance(&b).unwrap() - 6.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_identical_vectors_have_zero_distance() {
        let a = Embedding::new(vec![0.1, 0.2, 0.3]);
        assert_eq!(a.l2_distance(&a.clone()).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = Embedding::new(vec![1.0, 2.0, 3.0]);
        let b = Embedding::new(vec![1.0, 2.0]);
        match a.l2_distance(&b) {
            Err(Error::DimensionMismatch { expected, actual }) => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("expected dimension mismatch, got {:?}", other),
        }
    }
}
