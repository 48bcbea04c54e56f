//! Shared sheet snapshots.
//!
//! Every dashboard view reads the same published document. Snapshots are
//! cached per source URL and concurrent requests for one URL share a single
//! in-flight fetch. The last good snapshot of each URL outlives the cache TTL,
//! so a failed refresh keeps serving it until a fetch succeeds again.

use dashmap::DashMap;
use log::{info, warn};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::LoadError;
use crate::sheet::sheet_loader::load_sheet;
use crate::sheet::sheet_model::SheetRecord;
use crate::sheet::sheet_traits::SheetSource;

pub type SheetSnapshot = Arc<Vec<SheetRecord>>;

pub struct SheetService {
    source: Arc<dyn SheetSource>,
    cache: Cache<String, SheetSnapshot>,
    last_good: DashMap<String, SheetSnapshot>,
}

impl SheetService {
    pub fn new(source: Arc<dyn SheetSource>, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(ttl)
            .build();
        Self {
            source,
            cache,
            last_good: DashMap::new(),
        }
    }

    /// Cached snapshot for `url`, fetching it when absent or expired.
    ///
    /// When the refetch fails and an earlier load succeeded, the earlier
    /// snapshot is returned and cached again for another TTL.
    pub async fn get(&self, url: &str) -> Result<SheetSnapshot, LoadError> {
        let source = Arc::clone(&self.source);
        let key = url.to_string();
        let fetched = self
            .cache
            .try_get_with(key.clone(), async move {
                load_sheet(source.as_ref(), &key).await.map(Arc::new)
            })
            .await
            .map_err(|e| e.as_ref().clone());

        match fetched {
            Ok(snapshot) => {
                self.last_good.insert(url.to_string(), Arc::clone(&snapshot));
                Ok(snapshot)
            }
            Err(e) => {
                let previous = self.last_good.get(url).map(|s| Arc::clone(s.value()));
                match previous {
                    Some(snapshot) => {
                        warn!("Refresh of {} failed, serving previous snapshot: {}", url, e);
                        self.cache
                            .insert(url.to_string(), Arc::clone(&snapshot))
                            .await;
                        Ok(snapshot)
                    }
                    None => Err(e),
                }
            }
        }
    }

    /// Force a fresh fetch. On failure the previous snapshot stays in place.
    pub async fn reload(&self, url: &str) -> Result<SheetSnapshot, LoadError> {
        match load_sheet(self.source.as_ref(), url).await {
            Ok(records) => {
                let snapshot = Arc::new(records);
                self.last_good.insert(url.to_string(), Arc::clone(&snapshot));
                self.cache
                    .insert(url.to_string(), Arc::clone(&snapshot))
                    .await;
                info!("Reloaded sheet {}", url);
                Ok(snapshot)
            }
            Err(e) => {
                warn!("Reload of {} failed, keeping previous snapshot: {}", url, e);
                Err(e)
            }
        }
    }

    /// Most recent successfully loaded snapshot, without fetching.
    pub async fn cached(&self, url: &str) -> Option<SheetSnapshot> {
        match self.cache.get(url).await {
            Some(snapshot) => Some(snapshot),
            None => self.last_good.get(url).map(|s| Arc::clone(s.value())),
        }
    }
}
