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

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::RingConfig;
use crate::hashring::HashRing;
use crate::peer::{PeerGetter, PeerPicker};
use crate::transport::client::HttpPeerGetter;

/// The HTTP-backed [`PeerPicker`]: routes a key through a [`HashRing`] to a peer
/// name, then resolves that name to an [`HttpPeerGetter`] — except when the ring
/// picks this node itself, in which case it returns `None` so the caller falls
/// through to its own loader.
pub struct HttpPeerPicker {
    self_name: String,
    ring: RwLock<HashRing>,
    getters: RwLock<HashMap<String, Arc<dyn PeerGetter>>>,
    base_path: String,
}

impl HttpPeerPicker {
    pub fn new(self_name: impl Into<String>, ring_config: RingConfig, base_path: impl Into<String>) -> Self {
        Self {
            self_name: self_name.into(),
            ring: RwLock::new(HashRing::with_default_hash(ring_config.replicas)),
            getters: RwLock::new(HashMap::new()),
            base_path: base_path.into(),
        }
    }

    /// Register a peer's address (e.g. `http://10.0.0.2:8080`) and add it to the ring
    /// under `name`. Idempotent per name: re-adding overwrites the getter but the ring
    /// insertion is itself idempotent-by-overwrite, matching [`HashRing::add`].
    pub fn add_peer(&self, name: impl Into<String>, base_url: impl Into<String>) {
        let name = name.into();
        self.getters.write().insert(
            name.clone(),
            Arc::new(HttpPeerGetter::new(base_url, self.base_path.clone())) as Arc<dyn PeerGetter>,
        );
        self.ring.write().add([name]);
    }
}

impl PeerPicker for HttpPeerPicker {
    fn pick(&self, key: &str) -> Option<Arc<dyn PeerGetter>> {
        let owner = self.ring.read().get(key)?.to_string();
        if owner == self.self_name {
            return None;
        }
        self.getters.read().get(&owner).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picking_self_returns_none() {
        let picker = HttpPeerPicker::new("node-a", RingConfig::new(10), "/_gocache/");
        picker.add_peer("node-a", "http://127.0.0.1:9001");
        picker.add_peer("node-b", "http://127.0.0.1:9002");
        // Every key resolves to either node-a or node-b; when it's node-a, pick()
        // must return None since that's this node itself.
        for key in ["a", "b", "c", "d", "e"] {
            if picker.ring.read().get(key) == Some("node-a") {
                assert!(picker.pick(key).is_none());
            } else {
                assert!(picker.pick(key).is_some());
            }
        }
    }

    #[test]
    fn empty_ring_picks_nothing() {
        let picker = HttpPeerPicker::new("node-a", RingConfig::new(10), "/_gocache/");
        assert!(picker.pick("k").is_none());
    }
}
