use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::trace;

use crate::error::Result;
use crate::matching::player_key;

/// Which derived series a cache entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SeriesKind {
    Events,
    Heatmap,
    HeatmapGrid,
    Passes,
    Shots,
    Radar,
}

/// Identity of a cached series: player, series kind and the parameters it was built with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    player: String,
    kind: SeriesKind,
    params: String,
}

impl SeriesKey {
    pub fn new(player: &str, kind: SeriesKind) -> Self {
        Self {
            player: player_key(player),
            kind,
            params: String::new(),
        }
    }

    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = params.into();
        self
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn kind(&self) -> SeriesKind {
        self.kind
    }
}

type Entry = Arc<dyn Any + Send + Sync>;

/// Keyed store of derived series.
///
/// Entries are inserted whole, so a reader sees either nothing or a complete
/// value. Owners must [`clear`](SeriesCache::clear) it when the season data changes.
#[derive(Default)]
pub struct SeriesCache {
    entries: RwLock<HashMap<SeriesKey, Entry>>,
}

impl std::fmt::Debug for SeriesCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesCache")
            .field("entries", &self.len())
            .finish()
    }
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`, if one of type `T` is present.
    pub fn get<T: Any + Send + Sync>(&self, key: &SeriesKey) -> Option<Arc<T>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()?.downcast::<T>().ok()
    }

    pub fn put<T: Any + Send + Sync>(&self, key: SeriesKey, value: T) -> Arc<T> {
        let value = Arc::new(value);
        let entry: Entry = value.clone();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key, entry);
        value
    }

    /// Return the cached value or compute, store and return it.
    ///
    /// Errors are returned as-is and nothing is stored.
    pub fn get_or_insert_with<T, F>(&self, key: SeriesKey, compute: F) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> Result<T>,
    {
        if let Some(hit) = self.get::<T>(&key) {
            trace!(player = key.player(), kind = %key.kind(), "series cache hit");
            return Ok(hit);
        }
        let value = compute()?;
        Ok(self.put(key, value))
    }

    /// Drop every entry of one player.
    pub fn invalidate_player(&self, player: &str) {
        let player = player_key(player);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|key, _| key.player != player);
    }

    pub fn invalidate(&self, key: &SeriesKey) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
    }

    /// Drop everything.
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;

    #[test]
    fn test_put_and_get() {
        let cache = SeriesCache::new();
        let key = SeriesKey::new("Mohamed Salah", SeriesKind::Radar);
        cache.put(key.clone(), vec![1.0_f64, 2.0]);

        let hit = cache.get::<Vec<f64>>(&key).unwrap();
        assert_eq!(*hit, vec![1.0, 2.0]);
        assert!(cache.get::<String>(&key).is_none());
        assert!(cache
            .get::<Vec<f64>>(&SeriesKey::new("Mohamed Salah", SeriesKind::Heatmap))
            .is_none());
    }

    #[test]
    fn test_key_normalizes_player_and_separates_params() {
        let a = SeriesKey::new("Mohamed Salah", SeriesKind::HeatmapGrid).with_params("bins=25");
        let b = SeriesKey::new("mohamed salah", SeriesKind::HeatmapGrid).with_params("bins=25");
        let c = SeriesKey::new("Mohamed Salah", SeriesKind::HeatmapGrid).with_params("bins=10");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_key_keeps_names_that_select_different_players_apart() {
        let cache = SeriesCache::new();
        cache.put(SeriesKey::new("Jo Ann", SeriesKind::Radar), 1_u8);
        assert!(cache.get::<u8>(&SeriesKey::new("Jo_Ann", SeriesKind::Radar)).is_none());
        assert!(cache.get::<u8>(&SeriesKey::new(" jo ann", SeriesKind::Radar)).is_none());

        cache.put(SeriesKey::new("Jo_Ann", SeriesKind::Radar), 2_u8);
        cache.invalidate_player("JO ANN");
        assert_eq!(cache.len(), 1);
        assert_eq!(*cache.get::<u8>(&SeriesKey::new("jo_ann", SeriesKind::Radar)).unwrap(), 2);
    }

    #[test]
    fn test_get_or_insert_with_computes_once() {
        let cache = SeriesCache::new();
        let key = SeriesKey::new("A", SeriesKind::Shots);
        let mut calls = 0;
        for _ in 0..3 {
            let value = cache
                .get_or_insert_with(key.clone(), || {
                    calls += 1;
                    Ok(42_u32)
                })
                .unwrap();
            assert_eq!(*value, 42);
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = SeriesCache::new();
        let key = SeriesKey::new("A", SeriesKind::Shots);
        let result = cache.get_or_insert_with::<u32, _>(key.clone(), || {
            Err(StatsError::EmptyInput {
                player: "A".to_string(),
                series: "shot",
            })
        });
        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidation() {
        let cache = SeriesCache::new();
        cache.put(SeriesKey::new("A", SeriesKind::Radar), 1_u8);
        cache.put(SeriesKey::new("A", SeriesKind::Heatmap), 2_u8);
        cache.put(SeriesKey::new("B", SeriesKind::Radar), 3_u8);

        cache.invalidate(&SeriesKey::new("B", SeriesKind::Radar));
        assert_eq!(cache.len(), 2);

        cache.invalidate_player("a");
        assert!(cache.is_empty());

        cache.put(SeriesKey::new("C", SeriesKind::Radar), 4_u8);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_readers_see_whole_entries() {
        let cache = Arc::new(SeriesCache::new());
        let key = SeriesKey::new("A", SeriesKind::Heatmap);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let key = key.clone();
                std::thread::spawn(move || {
                    let value = cache
                        .get_or_insert_with(key, || Ok(vec![7_u32; 1000]))
                        .unwrap();
                    assert_eq!(value.len(), 1000);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 1);
    }
}
