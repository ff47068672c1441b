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

//! Transport-agnostic collaborator interfaces between a [`Group`](crate::group::Group)
//! and the rest of the cluster. The core depends only on these two traits; the
//! concrete HTTP implementation lives in [`crate::transport`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CacheError;
use crate::value::ByteView;

/// Picks which peer, if any, owns a key.
pub trait PeerPicker: Send + Sync + 'static {
    /// Returns the peer that owns `key`, or `None` when the caller is the owner
    /// itself or the ring has no members.
    fn pick(&self, key: &str) -> Option<Arc<dyn PeerGetter>>;
}

/// Fetches a value for `(group, key)` from a specific, already-chosen peer.
#[async_trait]
pub trait PeerGetter: Send + Sync + 'static {
    async fn get(&self, group: &str, key: &str) -> Result<ByteView, CacheError>;
}
