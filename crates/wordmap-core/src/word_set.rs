use std::collections::HashMap;

use crate::media::{MediaId, TermCount};

/// Per-source ranked term lists, keyed by `media_id`.
///
/// Iteration follows insertion order. Re-inserting an existing id replaces
/// its list in place without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSet {
    order: Vec<MediaId>,
    lists: HashMap<MediaId, Vec<TermCount>>,
}

impl WordSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the term list for `media_id`, returning the previous list.
    pub fn insert(&mut self, media_id: MediaId, terms: Vec<TermCount>) -> Option<Vec<TermCount>> {
        let previous = self.lists.insert(media_id, terms);
        if previous.is_none() {
            self.order.push(media_id);
        }
        previous
    }

    #[must_use]
    pub fn get(&self, media_id: MediaId) -> Option<&[TermCount]> {
        self.lists.get(&media_id).map(Vec::as_slice)
    }

    pub fn remove(&mut self, media_id: MediaId) -> Option<Vec<TermCount>> {
        let removed = self.lists.remove(&media_id)?;
        self.order.retain(|id| *id != media_id);
        Some(removed)
    }

    #[must_use]
    pub fn contains(&self, media_id: MediaId) -> bool {
        self.lists.contains_key(&media_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate `(media_id, terms)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MediaId, &[TermCount])> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.lists.get(id).map(|terms| (*id, terms.as_slice())))
    }

    /// Apply `f` to every list in place, in insertion order.
    pub fn for_each_list_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(MediaId, &mut Vec<TermCount>),
    {
        for id in &self.order {
            if let Some(terms) = self.lists.get_mut(id) {
                f(*id, terms);
            }
        }
    }
}

impl FromIterator<(MediaId, Vec<TermCount>)> for WordSet {
    fn from_iter<I: IntoIterator<Item = (MediaId, Vec<TermCount>)>>(iter: I) -> Self {
        let mut set = WordSet::new();
        for (id, terms) in iter {
            set.insert(id, terms);
        }
        set
    }
}
