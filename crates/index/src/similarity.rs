//! Dense vector helpers for the term-weight space.

use ndarray::{ArrayView1, ArrayViewMut1};

/// Euclidean norm
pub fn l2_norm(v: ArrayView1<f32>) -> f32 {
    v.dot(&v).sqrt()
}

/// Scale a vector to unit length in place; zero vectors stay zero
pub fn l2_normalize(mut v: ArrayViewMut1<f32>) {
    let norm = l2_norm(v.view());
    if norm > 0.0 {
        v.mapv_inplace(|x| x / norm);
    }
}

/// Cosine similarity of two arbitrary vectors
///
/// For unit vectors this equals their dot product. Returns 0.0 when either
/// side is zero or the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let a = ArrayView1::from(a);
    let b = ArrayView1::from(b);
    let denom = l2_norm(a) * l2_norm(b);
    if denom == 0.0 {
        return 0.0;
    }
    a.dot(&b) / denom
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_l2_normalize() {
        let mut v = array![3.0f32, 4.0];
        l2_normalize(v.view_mut());
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
        assert!((l2_norm(v.view()) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_stays_zero() {
        let mut v = array![0.0f32, 0.0, 0.0];
        l2_normalize(v.view_mut());
        assert_eq!(v, array![0.0f32, 0.0, 0.0]);
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 5.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }
}
