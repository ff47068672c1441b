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

use std::convert::Infallible;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use hyper_util::server::conn::auto;
use percent_encoding::percent_decode_str;
use tokio::net::TcpListener;

use crate::config::HttpPoolConfig;
use crate::group::{self, CacheManager, Group};

type GroupLookup = dyn Fn(&str) -> Option<Arc<Group>> + Send + Sync;

/// Answers other peers' `GET <base_path>/<group>/<key>` requests out of whichever
/// groups are registered, either in the process-wide registry or in an explicit
/// [`CacheManager`] passed to [`HttpPeerServer::with_manager`].
pub struct HttpPeerServer {
    config: HttpPoolConfig,
    lookup: Arc<GroupLookup>,
}

impl HttpPeerServer {
    /// Serves groups out of the process-wide registry (`ringcache::group::get_group`).
    pub fn new(config: HttpPoolConfig) -> Self {
        Self {
            config,
            lookup: Arc::new(group::get_group),
        }
    }

    /// Serves groups out of an explicit registry instead of the process-wide one.
    pub fn with_manager(config: HttpPoolConfig, manager: Arc<CacheManager>) -> Self {
        Self {
            config,
            lookup: Arc::new(move |name: &str| manager.get_group(name)),
        }
    }

    /// Binds `self.config.self_addr` and serves forever, one task per connection.
    pub async fn serve(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(&self.config.self_addr).await?;
        tracing::info!(addr = %self.config.self_addr, base_path = %self.config.base_path, "peer server listening");
        self.serve_on(listener).await
    }

    /// Serves forever on an already-bound listener. Split out from [`serve`] so tests
    /// (and callers that want OS-assigned ports) can bind with port `0`, discover the
    /// real address via `TcpListener::local_addr`, then hand the listener in here.
    ///
    /// [`serve`]: HttpPeerServer::serve
    pub async fn serve_on(self, listener: TcpListener) -> std::io::Result<()> {
        let base_path = Arc::new(self.config.base_path.clone());
        let lookup = self.lookup.clone();

        loop {
            let (stream, peer_addr) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let base_path = base_path.clone();
            let lookup = lookup.clone();
            tokio::spawn(async move {
                let service = hyper::service::service_fn(move |req| {
                    let base_path = base_path.clone();
                    let lookup = lookup.clone();
                    async move { handle(req, &base_path, lookup.as_ref()).await }
                });
                if let Err(err) = auto::Builder::new(hyper_util::rt::TokioExecutor::new())
                    .serve_connection(io, service)
                    .await
                {
                    tracing::warn!(peer = %peer_addr, error = %err, "peer connection error");
                }
            });
        }
    }
}

/// Convenience free function equivalent to `HttpPeerServer::new(config).serve()`.
pub async fn serve(config: HttpPoolConfig) -> std::io::Result<()> {
    HttpPeerServer::new(config).serve().await
}

/// Handles one request. Generic over the body type (rather than pinned to the
/// connection's `hyper::body::Incoming`) since only the method and path are ever
/// inspected — this lets tests drive it with a plain `Request<()>` instead of a real
/// connection's body stream.
async fn handle<B>(
    req: Request<B>,
    base_path: &str,
    lookup: &GroupLookup,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path();
    tracing::info!(method = %req.method(), path, "peer request");

    if !path.starts_with(base_path) {
        return Ok(text_response(
            StatusCode::NOT_FOUND,
            format!("path not found: {path}, try {base_path}"),
        ));
    }

    let rest = &path[base_path.len()..];
    let mut parts = rest.splitn(2, '/');
    let (group_name, key) = match (parts.next(), parts.next()) {
        (Some(g), Some(k)) if !g.is_empty() => (g, k),
        _ => return Ok(text_response(StatusCode::BAD_REQUEST, "bad request".to_string())),
    };

    let group_name = percent_decode_str(group_name).decode_utf8_lossy().into_owned();
    let key = percent_decode_str(key).decode_utf8_lossy().into_owned();

    let Some(group) = lookup(&group_name) else {
        return Ok(text_response(
            StatusCode::NOT_FOUND,
            format!("no such group: {group_name}"),
        ));
    };

    match group.get(&key).await {
        Ok(view) => Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/octet-stream")
            .body(Full::new(Bytes::from(view.to_vec())))
            .expect("static response parts are always valid")),
        Err(err) if err.is_not_found() => {
            Ok(text_response(StatusCode::NOT_FOUND, err.to_string()))
        }
        Err(err) => {
            tracing::warn!(group = %group_name, key, error = %err, "group get failed");
            Ok(text_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
        }
    }
}

fn text_response(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .body(Full::new(Bytes::from(body)))
        .expect("static response parts are always valid")
}
