use std::collections::HashMap;

use crate::models::Anime;

/// The in-memory list of tracked anime — the single source of truth
/// for rendering. All mutation goes through this store; views read
/// from it and derive everything else (progress, completion, order).
#[derive(Debug, Default)]
pub struct ListStore {
    entries: HashMap<i64, Anime>,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the store contents with an initial snapshot.
    pub fn load(&mut self, snapshot: Vec<Anime>) {
        self.entries = snapshot.into_iter().map(|a| (a.id, a)).collect();
    }

    pub fn insert(&mut self, anime: Anime) {
        self.entries.insert(anime.id, anime);
    }

    pub fn remove(&mut self, id: i64) -> Option<Anime> {
        self.entries.remove(&id)
    }

    pub fn get(&self, id: i64) -> Option<&Anime> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.keys().copied()
    }

    /// Apply a backend-confirmed watched count to an entry.
    ///
    /// Returns `Some(true)` when the update crossed the completion
    /// boundary in either direction (the caller re-sorts only then),
    /// `Some(false)` otherwise, `None` if the id is unknown.
    pub fn set_watched(&mut self, id: i64, watched: u32) -> Option<bool> {
        let entry = self.entries.get_mut(&id)?;
        let was_completed = entry.is_completed();
        entry.watched_episodes = watched;
        Some(entry.is_completed() != was_completed)
    }

    /// Stable re-sort of a visible id sequence: incomplete entries
    /// before completed ones, each group in ascending case-insensitive
    /// title order. Ids no longer in the store are dropped.
    pub fn resort(&self, visible: &[i64]) -> Vec<i64> {
        let mut order: Vec<i64> = visible
            .iter()
            .copied()
            .filter(|id| self.entries.contains_key(id))
            .collect();
        order.sort_by_key(|id| {
            let a = &self.entries[id];
            (a.is_completed(), a.title.to_lowercase())
        });
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anime(id: i64, title: &str, watched: u32, total: u32) -> Anime {
        Anime {
            id,
            aid: id as u64,
            title: title.into(),
            description: String::new(),
            anime_type: "TV Series".into(),
            image_url: None,
            start_date: None,
            end_date: None,
            total_episodes: total,
            watched_episodes: watched,
        }
    }

    #[test]
    fn test_set_watched_reports_boundary_crossings() {
        let mut store = ListStore::new();
        store.insert(anime(1, "Frieren", 11, 12));

        // 11 -> 12 completes the entry.
        assert_eq!(store.set_watched(1, 12), Some(true));
        assert!(store.get(1).unwrap().is_completed());

        // 12 -> 12 changes nothing.
        assert_eq!(store.set_watched(1, 12), Some(false));

        // 12 -> 11 un-completes it.
        assert_eq!(store.set_watched(1, 11), Some(true));

        // Unknown id.
        assert_eq!(store.set_watched(99, 1), None);
    }

    #[test]
    fn test_resort_incomplete_before_completed_then_title() {
        let mut store = ListStore::new();
        store.insert(anime(1, "Berserk", 25, 25));
        store.insert(anime(2, "akira", 0, 1));
        store.insert(anime(3, "Monster", 10, 74));
        store.insert(anime(4, "Zegapain", 26, 26));

        let order = store.resort(&[1, 2, 3, 4]);
        assert_eq!(order, vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_resort_is_stable_for_equal_titles() {
        let mut store = ListStore::new();
        store.insert(anime(10, "Hunter x Hunter", 3, 62));
        store.insert(anime(11, "Hunter x Hunter", 1, 148));

        assert_eq!(store.resort(&[10, 11]), vec![10, 11]);
        assert_eq!(store.resort(&[11, 10]), vec![11, 10]);
    }

    #[test]
    fn test_resort_drops_removed_ids() {
        let mut store = ListStore::new();
        store.insert(anime(1, "Akira", 0, 1));
        store.insert(anime(2, "Berserk", 0, 25));
        store.remove(2);

        assert_eq!(store.resort(&[1, 2]), vec![1]);
    }

    #[test]
    fn test_zero_total_sorts_as_incomplete() {
        let mut store = ListStore::new();
        store.insert(anime(1, "Airing show", 7, 0));
        store.insert(anime(2, "Done show", 12, 12));

        assert_eq!(store.resort(&[2, 1]), vec![1, 2]);
    }
}
