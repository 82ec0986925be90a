use std::collections::{BTreeSet, HashMap, HashSet};

/// Fixed term → position mapping
///
/// Positions follow sorted term order, so the same corpus always yields the
/// same layout regardless of item order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    terms: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Vocabulary {
    /// Collect every distinct term from analyzed documents
    pub fn from_documents<D>(documents: &[D]) -> Self
    where
        D: AsRef<[String]>,
    {
        let sorted: BTreeSet<&str> = documents
            .iter()
            .flat_map(|doc| doc.as_ref().iter().map(String::as_str))
            .collect();

        let terms: Vec<String> = sorted.into_iter().map(str::to_string).collect();
        let positions = terms
            .iter()
            .enumerate()
            .map(|(pos, term)| (term.clone(), pos))
            .collect();

        Self { terms, positions }
    }

    /// Position of a term; `None` when out of vocabulary
    pub fn position(&self, term: &str) -> Option<usize> {
        self.positions.get(term).copied()
    }

    /// Term at a position
    pub fn term(&self, position: usize) -> Option<&str> {
        self.terms.get(position).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in position order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of documents containing each term, indexed by position
    pub fn document_frequencies<D>(&self, documents: &[D]) -> Vec<usize>
    where
        D: AsRef<[String]>,
    {
        let mut df = vec![0usize; self.len()];
        for doc in documents {
            let seen: HashSet<usize> = doc
                .as_ref()
                .iter()
                .filter_map(|term| self.position(term))
                .collect();
            for pos in seen {
                df[pos] += 1;
            }
        }
        df
    }
}
