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

//! Exercises the HTTP peer transport end to end: a real `HttpPeerServer` bound to an
//! OS-assigned port, fetched from by a real `HttpPeerGetter`. Covers the wire protocol's
//! success path and the client's mapping of non-2xx responses and connection failures
//! to `PeerFetchFailed`, which the core's `Group::load` treats as recoverable (falls
//! back to the loader).

use std::sync::Arc;

use ringcache::config::HttpPoolConfig;
use ringcache::error::CacheError;
use ringcache::group::CacheManager;
use ringcache::loader::LoaderFn;
use ringcache::peer::PeerGetter;
use ringcache::transport::{HttpPeerGetter, HttpPeerServer};
use ringcache::value::ByteView;
use tokio::net::TcpListener;

async fn spawn_server() -> String {
    let manager = Arc::new(CacheManager::new());
    manager.new_group(
        "scores",
        2048,
        Arc::new(LoaderFn(|key: &str| {
            let key = key.to_string();
            async move {
                if key == "Tom" {
                    Ok(ByteView::from("630"))
                } else {
                    Err(CacheError::loader_failed_plain(std::io::Error::other("no such key")))
                }
            }
        })),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let server = HttpPeerServer::with_manager(HttpPoolConfig::new(addr.clone()), manager);
    tokio::spawn(server.serve_on(listener));
    addr
}

#[tokio::test]
async fn client_fetches_value_over_the_wire() {
    let addr = spawn_server().await;
    let getter = HttpPeerGetter::new(format!("http://{addr}"), "/_gocache/".to_string());
    let value = getter.get("scores", "Tom").await.unwrap();
    assert_eq!(value.to_vec(), b"630".to_vec());
}

#[tokio::test]
async fn client_maps_non_2xx_response_to_peer_fetch_failed() {
    let addr = spawn_server().await;
    let getter = HttpPeerGetter::new(format!("http://{addr}"), "/_gocache/".to_string());
    let err = getter.get("scores", "Ghost").await.unwrap_err();
    assert!(matches!(err, CacheError::PeerFetchFailed(_)));
}

#[tokio::test]
async fn client_maps_unknown_group_404_to_peer_fetch_failed() {
    let addr = spawn_server().await;
    let getter = HttpPeerGetter::new(format!("http://{addr}"), "/_gocache/".to_string());
    let err = getter.get("nosuchgroup", "Tom").await.unwrap_err();
    assert!(matches!(err, CacheError::PeerFetchFailed(_)));
}

#[tokio::test]
async fn client_maps_connection_refused_to_peer_fetch_failed() {
    // Bind-then-drop to get a port nothing is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let getter = HttpPeerGetter::new(format!("http://{addr}"), "/_gocache/".to_string());
    let err = getter.get("scores", "Tom").await.unwrap_err();
    assert!(matches!(err, CacheError::PeerFetchFailed(_)));
}
