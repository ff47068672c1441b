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

//! Consistent-hash ring with virtual nodes, mapping string keys to owning peer names.

use std::collections::HashMap;

/// A hash function over an arbitrary byte string, producing a 32-bit ring position.
pub type HashFn = Box<dyn Fn(&[u8]) -> u32 + Send + Sync>;

fn crc32_ieee(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Maps keys to owning node names via virtual nodes on a sorted ring.
///
/// The virtual-node label for replica `i` of node `n` is `format!("{i}{n}")` —
/// the index *before* the name, not after. This exact label format is required for
/// routing compatibility with other implementations of this ring: swapping the
/// concatenation order changes every key's owner.
pub struct HashRing {
    hash: HashFn,
    replicas: usize,
    ring: Vec<u32>,
    vnode_to_name: HashMap<u32, String>,
}

impl HashRing {
    /// `replicas` virtual nodes per real node. `hash` defaults to CRC32 (IEEE) when
    /// `None`.
    pub fn new(replicas: usize, hash: Option<HashFn>) -> Self {
        Self {
            hash: hash.unwrap_or_else(|| Box::new(crc32_ieee)),
            replicas,
            ring: Vec::new(),
            vnode_to_name: HashMap::new(),
        }
    }

    pub fn with_default_hash(replicas: usize) -> Self {
        Self::new(replicas, None)
    }

    /// Add real nodes. For each name and each `i in [0, replicas)`, the vnode hash of
    /// `"{i}{name}"` is inserted; duplicate hashes silently overwrite the earlier
    /// mapping (CRC32 collisions are accepted as vanishingly rare). The ring is
    /// re-sorted after all names are added.
    pub fn add<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            for i in 0..self.replicas {
                let label = format!("{i}{name}");
                let h = (self.hash)(label.as_bytes());
                self.ring.push(h);
                self.vnode_to_name.insert(h, name.to_string());
            }
        }
        self.ring.sort_unstable();
        tracing::debug!(vnodes = self.ring.len(), "hash ring rebuilt");
    }

    /// Returns the owning node name for `key`, or `None` if the ring has no nodes.
    /// Deterministic for a fixed `(replicas, hash, insertion multiset)` regardless of
    /// insertion order, since the ring is always fully sorted before lookups run.
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.ring.is_empty() {
            return None;
        }
        let h = (self.hash)(key.as_bytes());
        let idx = match self.ring.binary_search(&h) {
            Ok(i) => i,
            Err(i) => i,
        };
        let idx = idx % self.ring.len();
        self.vnode_to_name.get(&self.ring[idx]).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hash function used by the consistent-hash routing scenario: parse the vnode
    /// label as a plain base-10 integer. Mirrors treating the ring positions as
    /// literal integers rather than hashed bytes, so routing can be checked by hand.
    fn identity_hash(data: &[u8]) -> u32 {
        std::str::from_utf8(data).unwrap().parse().unwrap()
    }

    #[test]
    fn routing_matches_worked_example() {
        let mut ring = HashRing::new(3, Some(Box::new(identity_hash)));
        ring.add(["6", "4", "2"]);
        assert_eq!(ring.get("2"), Some("2"));
        assert_eq!(ring.get("11"), Some("2"));
        assert_eq!(ring.get("23"), Some("4"));
        assert_eq!(ring.get("27"), Some("2"));
    }

    #[test]
    fn empty_ring_returns_none() {
        let ring = HashRing::with_default_hash(50);
        assert_eq!(ring.get("anything"), None);
    }

    #[test]
    fn nonempty_ring_always_resolves() {
        let mut ring = HashRing::with_default_hash(50);
        ring.add(["a", "b", "c"]);
        for key in ["x", "y", "z", "", "long-key-name-here"] {
            assert!(ring.get(key).is_some());
        }
    }

    #[test]
    fn deterministic_regardless_of_insertion_order() {
        let mut a = HashRing::with_default_hash(10);
        a.add(["one", "two", "three"]);
        let mut b = HashRing::with_default_hash(10);
        b.add(["three", "two", "one"]);
        for key in ["k1", "k2", "k3", "k4", "k5"] {
            assert_eq!(a.get(key), b.get(key));
        }
    }

    #[test]
    fn vnode_label_is_index_then_name() {
        // Node "x" with 1 replica produces exactly the vnode hash of "0x".
        let mut ring = HashRing::new(1, Some(Box::new(identity_hash)));
        // identity_hash requires the label to parse as an integer, so use a digit-only
        // name here instead of "x".
        ring.add(["5"]);
        assert_eq!(ring.get("05"), Some("5"));
    }
}
