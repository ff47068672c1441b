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

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::list::Arena;
use crate::value::Value;

/// Size-bounded LRU cache with recency eviction and an optional eviction callback.
///
/// `max_bytes == 0` disables eviction entirely (unbounded cache). Byte accounting
/// charges `len(key) + value.len()` per entry; eviction runs only after a write that
/// pushes `used_bytes` over `max_bytes` — reads never evict.
///
/// `on_evict`, if set, is invoked after the evicted node has already been unlinked and
/// `used_bytes` already adjusted, so it observes consistent state if it inspects the
/// cache. It must not call back into the same cache: there is no lock held while it
/// runs, but reentrant eviction during eviction is undefined here, matching the
/// precondition documented on event-listener callbacks elsewhere in this crate.
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Value,
{
    max_bytes: u64,
    used_bytes: u64,
    arena: Arena<K, V>,
    index: HashMap<K, usize>,
    on_evict: Option<Box<dyn FnMut(K, V) + Send>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Value,
{
    pub fn new(max_bytes: u64) -> Self {
        Self::with_on_evict(max_bytes, None)
    }

    pub fn with_on_evict(max_bytes: u64, on_evict: Option<Box<dyn FnMut(K, V) + Send>>) -> Self {
        Self {
            max_bytes,
            used_bytes: 0,
            arena: Arena::new(),
            index: HashMap::new(),
            on_evict,
        }
    }

    pub fn set_on_evict(&mut self, on_evict: Box<dyn FnMut(K, V) + Send>) {
        self.on_evict = Some(on_evict);
    }

    /// Number of entries currently held.
    pub fn count(&self) -> usize {
        self.arena.len()
    }

    pub fn used_bytes(&self) -> u64 {
        self.used_bytes
    }

    /// Look up `key`. On hit, promotes the entry to most-recently-used and returns a
    /// clone of the stored value (values are treated as cheap-to-clone handles, see
    /// [`crate::value::Value`]).
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.arena.move_to_front(idx);
        Some(self.arena.get(idx).value.clone())
    }

    /// Insert or overwrite `key`. Existing entries are promoted to MRU and have their
    /// byte charge adjusted by the size delta; new entries are charged
    /// `len(key) + value.len()`. Evicts from the back until `used_bytes <= max_bytes`
    /// (no-op when `max_bytes == 0`).
    pub fn add(&mut self, key: K, value: V)
    where
        K: KeyLen,
    {
        if let Some(&idx) = self.index.get(&key) {
            let old_len = self.arena.get(idx).value.len();
            let new_len = value.len();
            self.arena.get_mut(idx).value = value;
            self.arena.move_to_front(idx);
            self.used_bytes = self.used_bytes + new_len - old_len;
        } else {
            let charge = key.key_len() + value.len();
            let idx = self.arena.push_front(key.clone(), value);
            self.index.insert(key, idx);
            self.used_bytes += charge;
        }

        if self.max_bytes != 0 {
            while self.used_bytes > self.max_bytes {
                if !self.remove_oldest() {
                    break;
                }
            }
        }
    }

    /// Evict the least-recently-used entry, invoking `on_evict` if set. Returns
    /// `false` on an empty cache.
    pub fn remove_oldest(&mut self) -> bool
    where
        K: KeyLen,
    {
        let Some(idx) = self.arena.back() else {
            return false;
        };
        let (key, value) = self.arena.remove(idx);
        self.index.remove(&key);
        self.used_bytes -= key.key_len() + value.len();
        metrics::counter!("ringcache_evictions_total").increment(1);
        if let Some(cb) = self.on_evict.as_mut() {
            cb(key, value);
        }
        true
    }

    /// Remove `key` unconditionally, without invoking `on_evict` (this is a caller-
    /// requested removal, not a capacity eviction).
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + KeyLen,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.index.remove(key)?;
        let (k, v) = self.arena.remove(idx);
        self.used_bytes -= k.key_len() + v.len();
        Some(v)
    }
}

/// How many bytes a key contributes to `used_bytes`. Split out from `Eq + Hash` so the
/// byte-accounting rule (`len(key) + value.len()`) stays explicit at the type level
/// instead of assuming every key is a `String`.
pub trait KeyLen {
    fn key_len(&self) -> u64;
}

impl KeyLen for String {
    fn key_len(&self) -> u64 {
        self.len() as u64
    }
}

impl KeyLen for &'static str {
    fn key_len(&self) -> u64 {
        self.len() as u64
    }
}
