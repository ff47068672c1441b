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

use async_trait::async_trait;
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes as HyperBytes;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::CacheError;
use crate::peer::PeerGetter;
use crate::value::ByteView;

/// Fetches `(group, key)` from one specific peer over HTTP, implementing the client
/// side of the wire protocol in `GET <base_url><base_path><group>/<key>`.
pub struct HttpPeerGetter {
    base_url: String,
    base_path: String,
    client: Client<HttpConnector, Empty<HyperBytes>>,
}

impl HttpPeerGetter {
    /// `base_url` is this peer's address, e.g. `http://10.0.0.2:8080`.
    pub fn new(base_url: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            base_path: base_path.into(),
            client: Client::builder(TokioExecutor::new()).build(HttpConnector::new()),
        }
    }
}

#[async_trait]
impl PeerGetter for HttpPeerGetter {
    async fn get(&self, group: &str, key: &str) -> Result<ByteView, CacheError> {
        let url = format!(
            "{}{}{}/{}",
            self.base_url,
            self.base_path,
            utf8_percent_encode(group, NON_ALPHANUMERIC),
            utf8_percent_encode(key, NON_ALPHANUMERIC),
        );
        let uri: hyper::Uri = url
            .parse()
            .map_err(|e: hyper::http::uri::InvalidUri| CacheError::peer_fetch_failed(e))?;

        let response = self
            .client
            .get(uri)
            .await
            .map_err(CacheError::peer_fetch_failed)?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| CacheError::peer_fetch_failed(IoError(e.to_string())))?
            .to_bytes();

        if !status.is_success() {
            return Err(CacheError::peer_fetch_failed(PeerHttpError {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            }));
        }

        Ok(ByteView::new(body))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("peer returned HTTP {status}: {body}")]
struct PeerHttpError {
    status: u16,
    body: String,
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct IoError(String);
