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

//! At-most-one in-flight async call per key, with the result fanned out to every
//! waiter that joined while the call was running.
//!
//! The waiter bookkeeping (`waiters: HashMap<K, Vec<oneshot::Sender<T>>>`, one oneshot
//! per joiner, woken by a broadcast-by-hand send loop once the owning call finishes)
//! follows the same shape this lineage's in-memory cache uses to fan a completed load
//! out to everyone blocked on it.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

use parking_lot::Mutex;
use tokio::sync::oneshot;

/// `T` is the shared result type; make it cheap to clone (an `Arc` around anything
/// expensive) since every waiter gets its own copy.
pub struct Coalescer<K, T>
where
    K: Eq + Hash + Clone,
    T: Clone + Send + 'static,
{
    waiters: Mutex<HashMap<K, Vec<oneshot::Sender<T>>>>,
}

impl<K, T> Default for Coalescer<K, T>
where
    K: Eq + Hash + Clone,
    T: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> Coalescer<K, T>
where
    K: Eq + Hash + Clone,
    T: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            waiters: Mutex::new(HashMap::new()),
        }
    }

    /// Run `fut` at most once per overlapping set of callers for `key`.
    ///
    /// If a call for `key` is already in flight, this registers a waiter and blocks on
    /// it instead of invoking `fut` (note `fut` is a closure producing the future, not
    /// the future itself, so it is never even constructed on the joining path). The
    /// mutex is held only for map bookkeeping, never across the future's execution.
    pub async fn run<F, Fut>(&self, key: K, fut: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        {
            let mut waiters = self.waiters.lock();
            if let Some(list) = waiters.get_mut(&key) {
                let (tx, rx) = oneshot::channel();
                list.push(tx);
                drop(waiters);
                return rx.await.expect("owning call dropped its waiters without sending");
            }
            waiters.insert(key.clone(), Vec::new());
        }

        let result = fut().await;

        let joined = {
            let mut waiters = self.waiters.lock();
            waiters.remove(&key).unwrap_or_default()
        };
        for tx in joined {
            let _ = tx.send(result.clone());
        }

        result
    }
}
