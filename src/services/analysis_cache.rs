use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::analysis_result::AnalysisResult;

struct CacheEntry {
    result: AnalysisResult,
    expires_at: Instant,
    last_access: u64,
}

/// Bounded, time-expiring store keyed by the exact `(language, sourceText)`
/// pair. Expiry is checked on lookup; capacity overflow evicts the entry
/// with the oldest last access. Process-local, nothing survives a restart.
pub struct AnalysisCache {
    capacity: usize,
    ttl: Duration,
    entries: HashMap<AnalysisRequest, CacheEntry>,
    access_tick: u64,
}

impl AnalysisCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity,
            ttl,
            entries: HashMap::new(),
            access_tick: 0,
        }
    }

    /// Look up an entry. A hit refreshes its recency; an entry past its
    /// deadline is evicted and reported absent.
    pub fn get(&mut self, key: &AnalysisRequest) -> Option<AnalysisResult> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.expires_at <= Instant::now(),
            None => return None,
        };
        if expired {
            self.entries.remove(key);
            return None;
        }

        self.access_tick += 1;
        let tick = self.access_tick;
        self.entries.get_mut(key).map(|entry| {
            entry.last_access = tick;
            entry.result.clone()
        })
    }

    /// Insert or replace an entry. Replacing refreshes recency but keeps the
    /// original expiry deadline, so repeated hits never extend a lifetime.
    pub fn put(&mut self, key: AnalysisRequest, result: AnalysisResult) {
        self.access_tick += 1;
        let tick = self.access_tick;
        let expires_at = Instant::now() + self.ttl;

        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                entry.result = result;
                entry.last_access = tick;
            }
            Entry::Vacant(vacant) => {
                vacant.insert(CacheEntry {
                    result,
                    expires_at,
                    last_access: tick,
                });
            }
        }

        if self.entries.len() > self.capacity {
            self.evict_least_recently_used();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_least_recently_used(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            log::info!("🧹 Evicting least-recently-used cache entry ({})", key.language);
            self.entries.remove(&key);
        }
    }
}
