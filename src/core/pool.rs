use crate::core::candidate::Candidate;

/// Candidates loaded for one session, in source order. Duplicates are kept.
#[derive(Debug, Clone)]
pub struct CandidatePool<C> {
    items: Vec<C>,
    generation: u64,
}

impl<C> Default for CandidatePool<C> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            generation: 0,
        }
    }
}

impl<C> CandidatePool<C> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(items: Vec<C>) -> Self {
        Self {
            items,
            generation: 0,
        }
    }

    /// Swaps in a freshly loaded set of candidates and returns the new generation.
    pub fn replace(&mut self, items: Vec<C>) -> u64 {
        self.items = items;
        self.generation += 1;
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn items(&self) -> &[C] {
        self.items.as_slice()
    }

    pub fn get(&self, index: usize) -> Option<&C> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.items.iter()
    }
}

impl<C: Candidate> CandidatePool<C> {
    pub fn contains(&self, candidate: &C) -> bool {
        self.items.iter().any(|item| item.is_same(candidate))
    }
}

impl<C> From<Vec<C>> for CandidatePool<C> {
    fn from(items: Vec<C>) -> Self {
        Self::new(items)
    }
}

impl<'a, C> IntoIterator for &'a CandidatePool<C> {
    type Item = &'a C;
    type IntoIter = std::slice::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
