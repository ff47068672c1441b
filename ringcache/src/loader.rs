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

use crate::error::CacheError;
use crate::value::ByteView;

/// Fetches a value from the origin data store when a key misses the cache.
///
/// Implementations should be deterministic for a given key within the lifetime of a
/// cache entry; returning different bytes for the same key on different calls is
/// allowed but defeats the point of caching.
#[async_trait]
pub trait Loader: Send + Sync + 'static {
    async fn load(&self, key: &str) -> Result<ByteView, CacheError>;
}

/// Adapts a plain async closure into a [`Loader`], mirroring the source's
/// `GetterFunc` adapter.
pub struct LoaderFn<F>(pub F);

#[async_trait]
impl<F, Fut> Loader for LoaderFn<F>
where
    F: Fn(&str) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = Result<ByteView, CacheError>> + Send,
{
    async fn load(&self, key: &str) -> Result<ByteView, CacheError> {
        (self.0)(key).await
    }
}
