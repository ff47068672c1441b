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

//! Demo node binary: starts an HTTP peer pool backed by an in-memory origin map and
//! serves one group over the wire protocol other ringcache nodes speak.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use ringcache::config::{HttpPoolConfig, RingConfig};
use ringcache::error::{CacheError, NotFound};
use ringcache::loader::LoaderFn;
use ringcache::transport::{HttpPeerPicker, HttpPeerServer};
use ringcache::value::ByteView;

/// The demo origin's only error: the key isn't in the in-memory map. Implements
/// [`NotFound`] so a peer's HTTP handler reports 404 rather than 500 for it.
#[derive(Debug, thiserror::Error)]
#[error("no such key: {0}")]
struct KeyNotFound(String);

impl NotFound for KeyNotFound {
    fn is_not_found(&self) -> bool {
        true
    }
}

#[derive(Parser, Debug)]
#[command(name = "ringcache-node", about = "run a ringcache peer node")]
struct Args {
    /// Address this node listens on, e.g. 127.0.0.1:8001.
    #[arg(long)]
    addr: String,

    /// Addresses of every peer in the cluster, including this node's own `--addr`.
    /// Each is given the name it's listening on (its address).
    #[arg(long, value_delimiter = ',')]
    peers: Vec<String>,

    /// Cache byte budget for the demo group. 0 means unbounded.
    #[arg(long, default_value_t = bytesize::ByteSize::mb(64).as_u64())]
    max_bytes: u64,

    /// Virtual nodes per peer on the consistent-hash ring.
    #[arg(long, default_value_t = 50)]
    replicas: usize,

    /// URL path prefix the peer wire protocol is served under.
    #[arg(long, default_value = "/_gocache/")]
    base_path: String,

    /// Namespace of the demo group.
    #[arg(long, default_value = "scores")]
    group: String,
}

fn demo_origin() -> HashMap<&'static str, &'static str> {
    HashMap::from([("Tom", "630"), ("Jack", "589"), ("Sam", "567")])
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let origin = demo_origin();
    let loader = Arc::new(LoaderFn(move |key: &str| {
        let value = origin.get(key).copied();
        let key = key.to_string();
        async move {
            match value {
                Some(v) => Ok(ByteView::from(v)),
                None => Err(CacheError::loader_failed(KeyNotFound(key))),
            }
        }
    }));

    let group = ringcache::new_group(&args.group, args.max_bytes, loader);

    let picker = Arc::new(HttpPeerPicker::new(
        args.addr.clone(),
        RingConfig::new(args.replicas),
        args.base_path.clone(),
    ));
    for peer in &args.peers {
        picker.add_peer(peer.clone(), format!("http://{peer}"));
    }
    group
        .register_peers(picker)
        .context("peers already registered for this group")?;

    let http_config = HttpPoolConfig::new(args.addr.clone()).with_base_path(args.base_path);
    tracing::info!(addr = %args.addr, group = %args.group, "starting ringcache node");
    HttpPeerServer::new(http_config)
        .serve()
        .await
        .context("peer server exited")?;
    Ok(())
}
