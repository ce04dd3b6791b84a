// Short-lived cache of classified results, keyed by video and cap.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use commentpulse_common::{ResultTable, VideoId};

const MAX_CACHE_ENTRIES: usize = 500;

#[derive(Debug, Clone)]
struct CacheEntry {
    table: ResultTable,
    inserted_at: Instant,
}

pub struct ResultCache {
    ttl: Duration,
    entries: RwLock<HashMap<(VideoId, usize), CacheEntry>>,
}

impl ResultCache {
    /// A TTL of zero disables caching entirely.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub async fn get(&self, video_id: &VideoId, cap: usize) -> Option<ResultTable> {
        if !self.is_enabled() {
            return None;
        }
        let entries = self.entries.read().await;
        let entry = entries.get(&(video_id.clone(), cap))?;
        if entry.inserted_at.elapsed() < self.ttl {
            Some(entry.table.clone())
        } else {
            None
        }
    }

    pub async fn insert(&self, video_id: VideoId, cap: usize, table: ResultTable) {
        if !self.is_enabled() {
            return;
        }
        let mut entries = self.entries.write().await;
        // Opportunistic eviction when we hit the limit
        if entries.len() >= MAX_CACHE_ENTRIES {
            let now = Instant::now();
            let ttl = self.ttl;
            entries.retain(|_, v| now.duration_since(v.inserted_at) < ttl);
        }
        entries.insert(
            (video_id, cap),
            CacheEntry {
                table,
                inserted_at: Instant::now(),
            },
        );
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
