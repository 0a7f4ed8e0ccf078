use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::BandRecord;

/// Token handed out per search so late batches can be told apart from the newest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct StoreState {
    issued: u64,
    published: Option<Generation>,
    records: Arc<Vec<BandRecord>>,
}

/// Process-wide band collection, replaced wholesale by the newest batch only.
#[derive(Clone, Default)]
pub struct BandStore {
    state: Arc<Mutex<StoreState>>,
}

impl BandStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Generation {
        let mut state = self.lock();
        state.issued += 1;
        Generation(state.issued)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.lock().issued == generation.0
    }

    /// Returns `false` and keeps the current records when `generation` has been superseded.
    pub fn replace(&self, generation: Generation, records: Vec<BandRecord>) -> bool {
        let mut state = self.lock();
        if state.issued != generation.0 {
            return false;
        }
        state.records = Arc::new(records);
        state.published = Some(generation);
        true
    }

    pub fn current(&self) -> Arc<Vec<BandRecord>> {
        Arc::clone(&self.lock().records)
    }

    pub fn published(&self) -> Option<Generation> {
        self.lock().published
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> BandRecord {
        BandRecord {
            name: name.to_string(),
            ..BandRecord::default()
        }
    }

    #[test]
    fn starts_empty() {
        let store = BandStore::new();
        assert!(store.current().is_empty());
        assert_eq!(store.published(), None);
    }

    #[test]
    fn newest_generation_publishes() {
        let store = BandStore::new();
        let generation = store.issue();
        assert!(store.replace(generation, vec![named("Slayer")]));
        assert_eq!(store.current()[0].name, "Slayer");
        assert_eq!(store.published(), Some(generation));
    }

    #[test]
    fn superseded_generation_is_discarded() {
        let store = BandStore::new();
        let older = store.issue();
        let newer = store.issue();

        assert!(store.replace(newer, vec![named("Y")]));
        assert!(!store.replace(older, vec![named("X")]));
        assert!(!store.is_current(older));
        assert_eq!(store.current()[0].name, "Y");
    }

    #[test]
    fn stale_batch_cannot_publish_even_before_the_newer_one() {
        let store = BandStore::new();
        let older = store.issue();
        let _newer = store.issue();

        assert!(!store.replace(older, vec![named("X")]));
        assert!(store.current().is_empty());
    }

    #[test]
    fn clones_share_state() {
        let store = BandStore::new();
        let handle = store.clone();
        let generation = handle.issue();
        assert!(store.is_current(generation));
        assert!(handle.replace(generation, vec![named("Kreator")]));
        assert_eq!(store.current().len(), 1);
    }
}
