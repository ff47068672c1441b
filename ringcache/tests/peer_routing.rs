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

//! Exercises the group orchestrator's peer-routing branch end to end: a peer hit
//! must not populate the local cache, a peer failure must fall back to the loader,
//! and a group with no peers registered must go straight to the loader.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use ringcache::error::CacheError;
use ringcache::loader::LoaderFn;
use ringcache::peer::{PeerGetter, PeerPicker};
use ringcache::value::ByteView;
use ringcache::Group;

struct AlwaysPeer {
    getter: Arc<dyn PeerGetter>,
}

impl PeerPicker for AlwaysPeer {
    fn pick(&self, _key: &str) -> Option<Arc<dyn PeerGetter>> {
        Some(self.getter.clone())
    }
}

struct FakePeer {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl PeerGetter for FakePeer {
    async fn get(&self, _group: &str, key: &str) -> Result<ByteView, CacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(CacheError::peer_fetch_failed(std::io::Error::other("peer down")))
        } else {
            Ok(ByteView::from(format!("peer-value-for-{key}")))
        }
    }
}

fn loader_with_counter() -> (Arc<LoaderFn<impl Fn(&str) -> std::future::Ready<Result<ByteView, CacheError>> + Send + Sync>>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let f = move |key: &str| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        std::future::ready(Ok(ByteView::from(format!("origin-value-for-{key}"))))
    };
    (Arc::new(LoaderFn(f)), calls)
}

#[tokio::test]
async fn peer_hit_does_not_populate_local_cache() {
    let peer_calls = Arc::new(AtomicUsize::new(0));
    let peer = Arc::new(FakePeer {
        calls: peer_calls.clone(),
        fail: false,
    });
    let (loader, loader_calls) = loader_with_counter();

    let group = Group::new("demo", 0, loader);
    group
        .register_peers(Arc::new(AlwaysPeer { getter: peer }))
        .unwrap();

    let value = group.get("k").await.unwrap();
    assert_eq!(value.to_vec(), b"peer-value-for-k".to_vec());
    assert_eq!(peer_calls.load(Ordering::SeqCst), 1);
    assert_eq!(loader_calls.load(Ordering::SeqCst), 0);
    assert_eq!(group.cached_len(), 0, "peer hits must not populate the local cache");
}

#[tokio::test]
async fn peer_failure_falls_back_to_loader_and_populates_cache() {
    let peer_calls = Arc::new(AtomicUsize::new(0));
    let peer = Arc::new(FakePeer {
        calls: peer_calls.clone(),
        fail: true,
    });
    let (loader, loader_calls) = loader_with_counter();

    let group = Group::new("demo", 0, loader);
    group
        .register_peers(Arc::new(AlwaysPeer { getter: peer }))
        .unwrap();

    let value = group.get("k").await.unwrap();
    assert_eq!(value.to_vec(), b"origin-value-for-k".to_vec());
    assert_eq!(peer_calls.load(Ordering::SeqCst), 1);
    assert_eq!(loader_calls.load(Ordering::SeqCst), 1);
    assert_eq!(group.cached_len(), 1, "loader hits populate the local cache");
}

#[tokio::test]
async fn no_peers_registered_goes_straight_to_loader() {
    let (loader, loader_calls) = loader_with_counter();
    let group = Group::new("demo", 0, loader);
    let value = group.get("k").await.unwrap();
    assert_eq!(value.to_vec(), b"origin-value-for-k".to_vec());
    assert_eq!(loader_calls.load(Ordering::SeqCst), 1);
}
