//  Copyright 2026 Ringcache Authors
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

//! The group orchestrator: composes the cache shell, the hash ring (via a
//! [`PeerPicker`]), the single-flight coalescer, and a [`Loader`] into the
//! read-through pipeline, plus the process-wide group registry.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::error::CacheError;
use crate::loader::Loader;
use crate::peer::PeerPicker;
use crate::shell::ConcurrentCacheShell;
use crate::singleflight::Coalescer;
use crate::value::ByteView;

/// A named cache namespace with its own byte budget and origin loader.
///
/// Multiple concurrent waiters for the same missing key fan out from a single
/// [`Loader`]/peer call via the internal coalescer; see [`Group::get`].
pub struct Group {
    name: String,
    loader: Arc<dyn Loader>,
    main_cache: ConcurrentCacheShell<String, ByteView>,
    peers: RwLock<Option<Arc<dyn PeerPicker>>>,
    coalescer: Coalescer<String, Result<ByteView, Arc<CacheError>>>,
}

impl Group {
    pub fn new(name: impl Into<String>, max_bytes: u64, loader: Arc<dyn Loader>) -> Self {
        Self {
            name: name.into(),
            loader,
            main_cache: ConcurrentCacheShell::new(max_bytes),
            peers: RwLock::new(None),
            coalescer: Coalescer::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of entries currently held in the local cache. Mainly useful for tests
    /// and metrics dashboards that want to observe the partition-respecting rule that
    /// a peer hit does not populate the local cache.
    pub fn cached_len(&self) -> usize {
        self.main_cache.count()
    }

    /// Register the peer picker used for remote routing. May be called at most once;
    /// a second call fails with [`CacheError::PeersAlreadyRegistered`] rather than
    /// panicking, unlike the source this is modeled on.
    pub fn register_peers(&self, picker: Arc<dyn PeerPicker>) -> Result<(), CacheError> {
        let mut guard = self.peers.write();
        if guard.is_some() {
            return Err(CacheError::PeersAlreadyRegistered);
        }
        *guard = Some(picker);
        Ok(())
    }

    /// Look up `key`: local cache, then (via the coalescer) a remote peer if one owns
    /// the key, then the origin loader. A peer hit is *not* written back to the local
    /// cache — the owning peer already caches it, and writing it back here would
    /// defeat the ring's partitioning. A loader hit is written back.
    pub async fn get(&self, key: &str) -> Result<ByteView, Arc<CacheError>> {
        if key.is_empty() {
            return Err(Arc::new(CacheError::EmptyKey));
        }

        if let Some(v) = self.main_cache.get(&key.to_string()) {
            tracing::debug!(key, group = %self.name, "cache hit");
            metrics::counter!("ringcache_hits_total").increment(1);
            return Ok(v);
        }
        metrics::counter!("ringcache_misses_total").increment(1);

        self.coalescer
            .run(key.to_string(), || self.load(key))
            .await
    }

    async fn load(&self, key: &str) -> Result<ByteView, Arc<CacheError>> {
        if let Some(picker) = self.peers.read().clone() {
            if let Some(peer) = picker.pick(key) {
                match peer.get(&self.name, key).await {
                    Ok(v) => return Ok(v),
                    Err(e) => {
                        tracing::warn!(key, group = %self.name, error = %e, "peer fetch failed, falling back to loader");
                        metrics::counter!("ringcache_peer_fetch_failures_total").increment(1);
                    }
                }
            }
        }

        match self.loader.load(key).await {
            Ok(v) => {
                self.main_cache.add(key.to_string(), v.clone());
                metrics::counter!("ringcache_loader_calls_total").increment(1);
                Ok(v)
            }
            Err(e) => Err(Arc::new(e)),
        }
    }
}

/// Process-wide group registry, guarded by a reader/writer lock: reads (`get_group`)
/// are frequent, writes (`new_group`) are rare.
///
/// This is exposed as an instance so tests (and callers that dislike ambient global
/// state) can hold their own registry instead of the process-wide one backing the
/// free functions [`new_group`]/[`get_group`].
#[derive(Default)]
pub struct CacheManager {
    groups: RwLock<HashMap<String, Arc<Group>>>,
}

impl CacheManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new group under a write lock, silently overwriting any prior group
    /// of the same name.
    pub fn new_group(&self, name: impl Into<String>, max_bytes: u64, loader: Arc<dyn Loader>) -> Arc<Group> {
        let name = name.into();
        let group = Arc::new(Group::new(name.clone(), max_bytes, loader));
        self.groups.write().insert(name, group.clone());
        group
    }

    pub fn get_group(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.read().get(name).cloned()
    }
}

static REGISTRY: OnceLock<CacheManager> = OnceLock::new();

fn registry() -> &'static CacheManager {
    REGISTRY.get_or_init(CacheManager::new)
}

/// Create (or overwrite) a group in the process-wide registry.
pub fn new_group(name: impl Into<String>, max_bytes: u64, loader: Arc<dyn Loader>) -> Arc<Group> {
    registry().new_group(name, max_bytes, loader)
}

/// Look up a group in the process-wide registry.
pub fn get_group(name: &str) -> Option<Arc<Group>> {
    registry().get_group(name)
}
