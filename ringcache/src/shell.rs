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

//! Wraps one [`LruCache`] behind a single mutex, with lazy initialization.

use std::hash::Hash;

use parking_lot::Mutex;

use crate::lru::{KeyLen, LruCache};
use crate::value::Value;

/// Serializes access to one LRU instance. The inner cache is only allocated on the
/// first `add`; a `get` against a shell that has never been written to is a cheap miss
/// with no allocation, so groups that see no traffic cost nothing beyond this wrapper.
///
/// Every operation holds the mutex for its entire duration. The critical sections are
/// O(1) amortized (arena splice plus one hash lookup), so finer-grained locking would
/// not pay for itself at this scale — the same call this lineage's cache shards make
/// before reaching for a striped or lock-free design.
pub struct ConcurrentCacheShell<K, V>
where
    K: Eq + Hash + Clone,
    V: Value,
{
    cache_bytes: u64,
    inner: Mutex<Option<LruCache<K, V>>>,
}

impl<K, V> ConcurrentCacheShell<K, V>
where
    K: Eq + Hash + Clone + KeyLen,
    V: Value,
{
    pub fn new(cache_bytes: u64) -> Self {
        Self {
            cache_bytes,
            inner: Mutex::new(None),
        }
    }

    /// Look up `key`. Returns `None` immediately, without allocating, if no `add` has
    /// happened yet.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut guard = self.inner.lock();
        guard.as_mut()?.get(key)
    }

    /// Insert or overwrite `key`, lazily allocating the inner LRU on first use.
    pub fn add(&self, key: K, value: V) {
        let mut guard = self.inner.lock();
        guard
            .get_or_insert_with(|| LruCache::new(self.cache_bytes))
            .add(key, value);
    }

    /// Number of entries, or 0 if the inner cache has never been allocated.
    pub fn count(&self) -> usize {
        self.inner.lock().as_ref().map(LruCache::count).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ByteView;

    #[test]
    fn get_before_any_add_is_a_miss_without_allocating() {
        let shell: ConcurrentCacheShell<String, ByteView> = ConcurrentCacheShell::new(1024);
        assert_eq!(shell.get(&"k".to_string()), None);
        assert_eq!(shell.count(), 0);
    }

    #[test]
    fn add_then_get_round_trips() {
        let shell: ConcurrentCacheShell<String, ByteView> = ConcurrentCacheShell::new(1024);
        shell.add("Tom".to_string(), ByteView::from("630"));
        assert_eq!(shell.get(&"Tom".to_string()).unwrap().to_vec(), b"630".to_vec());
        assert_eq!(shell.count(), 1);
    }
}
