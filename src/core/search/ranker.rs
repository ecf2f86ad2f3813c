use crate::core::candidate::{Candidate, Field};
use crate::core::pool::CandidatePool;
use crate::core::search::fuzzy::{indices_to_ranges, match_indices};

/// How many suggestions are shown when nothing else is configured.
pub const DEFAULT_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion<C> {
    /// Position of the candidate in the pool it was ranked from.
    pub index: usize,
    pub candidate: C,
    /// First field (in the requested order) that matched the query.
    pub field: Field<C>,
    /// Matched character ranges within `field`, half-open.
    pub ranges: Vec<(usize, usize)>,
}

/// Matches for one query snapshot, in pool order, plus the entry keyboard
/// navigation currently points at.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionList<C> {
    entries: Vec<Suggestion<C>>,
    query: String,
    generation: u64,
    active: usize,
}

impl<C> SuggestionList<C> {
    pub fn empty(generation: u64) -> Self {
        Self {
            entries: Vec::new(),
            query: String::new(),
            generation,
            active: 0,
        }
    }

    pub fn entries(&self) -> &[Suggestion<C>] {
        self.entries.as_slice()
    }

    pub fn get(&self, index: usize) -> Option<&Suggestion<C>> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Suggestion<C>> {
        self.entries.iter()
    }

    pub fn candidates(&self) -> impl Iterator<Item = &C> {
        self.entries.iter().map(|entry| &entry.candidate)
    }

    /// The query this list was computed for.
    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    /// Generation of the pool this list was computed against.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn active(&self) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.active)
        }
    }

    pub fn active_entry(&self) -> Option<&Suggestion<C>> {
        self.entries.get(self.active)
    }

    /// Moves the active marker by `delta`, wrapping at both ends.
    pub fn move_active(&mut self, delta: isize) -> bool {
        let len = self.entries.len();
        if len == 0 {
            return false;
        }
        let next = (self.active as isize + delta).rem_euclid(len as isize) as usize;
        let changed = next != self.active;
        self.active = next;
        changed
    }
}

impl<C: Candidate> SuggestionList<C> {
    pub fn position_of(&self, candidate: &C) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.candidate.is_same(candidate))
    }
}

impl<'a, C> IntoIterator for &'a SuggestionList<C> {
    type Item = &'a Suggestion<C>;
    type IntoIter = std::slice::Iter<'a, Suggestion<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Filters `pool` down to the first `limit` candidates where any of `fields`
/// fuzzy-matches `query`. Pool order is kept; there is no scoring.
pub fn rank<C: Clone>(
    pool: &CandidatePool<C>,
    query: &str,
    limit: usize,
    fields: &[Field<C>],
) -> SuggestionList<C> {
    let mut list = SuggestionList::empty(pool.generation());
    list.query = query.to_string();

    if query.is_empty() || limit == 0 {
        return list;
    }

    for (index, candidate) in pool.iter().enumerate() {
        let hit = fields.iter().find_map(|field| {
            match_indices(field.value(candidate), query).map(|indices| (*field, indices))
        });
        let Some((field, indices)) = hit else {
            continue;
        };

        list.entries.push(Suggestion {
            index,
            candidate: candidate.clone(),
            field,
            ranges: indices_to_ranges(&indices),
        });
        if list.entries.len() == limit {
            break;
        }
    }

    list
}
