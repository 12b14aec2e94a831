use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::structs::analysis_request::AnalysisRequest;

/// Per-key in-flight guard: the first request for a key proceeds, concurrent
/// requests for the same key queue on its lock and re-check the cache once
/// the holder finishes, instead of duplicating the provider call.
pub struct RequestCoalescer {
    inflight: Mutex<HashMap<AnalysisRequest, Arc<Mutex<()>>>>,
}

impl RequestCoalescer {
    pub fn new() -> Self {
        Self {
            inflight: Mutex::new(HashMap::new()),
        }
    }

    pub async fn acquire(&self, key: &AnalysisRequest) -> OwnedMutexGuard<()> {
        let lock = {
            let mut inflight = self.inflight.lock().await;
            Arc::clone(
                inflight
                    .entry(key.clone())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }
}

impl Default for RequestCoalescer {
    fn default() -> Self {
        Self::new()
    }
}
