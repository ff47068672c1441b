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

//! Typed configuration knobs, one small struct per component rather than bare
//! constructor arguments.

use serde::{Deserialize, Serialize};

use crate::transport::DEFAULT_BASE_PATH;

pub const DEFAULT_REPLICAS: usize = 50;

/// Per-group knobs. `max_bytes: 0` is unbounded.
///
/// Derives `Serialize`/`Deserialize` so a node's whole configuration (groups, ring,
/// HTTP pool) can be loaded from a config file rather than assembled by hand in code,
/// matching how this lineage's own per-component config structs round-trip through
/// `serde`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    pub name: String,
    pub max_bytes: u64,
}

impl GroupConfig {
    pub fn new(name: impl Into<String>, max_bytes: u64) -> Self {
        Self {
            name: name.into(),
            max_bytes,
        }
    }
}

/// Virtual-node count for the consistent-hash ring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RingConfig {
    pub replicas: usize,
}

impl RingConfig {
    pub fn new(replicas: usize) -> Self {
        Self { replicas }
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
        }
    }
}

/// Knobs for the HTTP peer pool: this node's own address (used to recognize "pick
/// returned myself" in the picker) and the URL prefix the wire protocol is served
/// under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpPoolConfig {
    pub self_addr: String,
    pub base_path: String,
}

impl HttpPoolConfig {
    pub fn new(self_addr: impl Into<String>) -> Self {
        Self {
            self_addr: self_addr.into(),
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_config_defaults_to_fifty_replicas() {
        assert_eq!(RingConfig::default().replicas, 50);
    }

    #[test]
    fn http_pool_config_defaults_base_path() {
        let cfg = HttpPoolConfig::new("127.0.0.1:8080");
        assert_eq!(cfg.base_path, "/_gocache/");
    }

    #[test]
    fn configs_round_trip_through_json() {
        let group = GroupConfig::new("scores", 2048);
        let ring = RingConfig::new(10);
        let pool = HttpPoolConfig::new("127.0.0.1:8080").with_base_path("/cache/");

        let group_back: GroupConfig = serde_json::from_str(&serde_json::to_string(&group).unwrap()).unwrap();
        let ring_back: RingConfig = serde_json::from_str(&serde_json::to_string(&ring).unwrap()).unwrap();
        let pool_back: HttpPoolConfig = serde_json::from_str(&serde_json::to_string(&pool).unwrap()).unwrap();

        assert_eq!(group_back.name, "scores");
        assert_eq!(group_back.max_bytes, 2048);
        assert_eq!(ring_back.replicas, 10);
        assert_eq!(pool_back.self_addr, "127.0.0.1:8080");
        assert_eq!(pool_back.base_path, "/cache/");
    }
}
