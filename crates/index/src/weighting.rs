//! TF-IDF weighting.
//!
//! `idf(t) = ln((1 + N) / (1 + df(t))) + 1`; the smoothing keeps terms that
//! occur in every document at a positive weight.

use crate::similarity::l2_normalize;
use crate::vocabulary::Vocabulary;
use ndarray::{Array1, Array2};

/// Smoothed inverse document frequency per vocabulary position
pub fn smoothed_idf(num_docs: usize, doc_freq: &[usize]) -> Array1<f32> {
    let n = num_docs as f32;
    doc_freq
        .iter()
        .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
        .collect()
}

/// Raw term counts restricted to the vocabulary
pub fn term_frequencies(terms: &[String], vocabulary: &Vocabulary) -> Array1<f32> {
    let mut tf = Array1::zeros(vocabulary.len());
    for term in terms {
        if let Some(pos) = vocabulary.position(term) {
            tf[pos] += 1.0;
        }
    }
    tf
}

/// Unit-length tf × idf vector for one analyzed text
pub fn tfidf_vector(terms: &[String], vocabulary: &Vocabulary, idf: &Array1<f32>) -> Array1<f32> {
    let mut v = term_frequencies(terms, vocabulary) * idf;
    l2_normalize(v.view_mut());
    v
}

/// One L2-normalized tf-idf row per document
pub fn tfidf_matrix<D>(documents: &[D], vocabulary: &Vocabulary, idf: &Array1<f32>) -> Array2<f32>
where
    D: AsRef<[String]>,
{
    let mut matrix = Array2::zeros((documents.len(), vocabulary.len()));
    for (mut row, doc) in matrix.rows_mut().into_iter().zip(documents) {
        row.assign(&tfidf_vector(doc.as_ref(), vocabulary, idf));
    }
    matrix
}
