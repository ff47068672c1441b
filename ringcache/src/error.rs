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

/// A type-erased source error, boxed so this crate need not know the loader's or the
/// HTTP client's concrete error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error surface for the cache core and its HTTP peer transport.
#[derive(thiserror::Error, Debug)]
pub enum CacheError {
    /// `Group::get` was called with an empty key.
    #[error("key is required")]
    EmptyKey,

    /// The origin loader failed to produce a value.
    #[error("loader failed: {source}")]
    LoaderFailed {
        #[source]
        source: BoxError,
        /// Set when the loader's error opted into [`NotFound`]; lets the HTTP layer
        /// map this to 404 instead of 500. See the design notes on the reference
        /// implementation's blanket 500 for "not found".
        not_found: bool,
    },

    /// A peer getter failed; the group falls through to the loader when this occurs.
    #[error("peer fetch failed: {0}")]
    PeerFetchFailed(#[source] BoxError),

    /// `Group::register_peers` was called more than once.
    #[error("peers already registered")]
    PeersAlreadyRegistered,

    /// `new_group` was called with no loader.
    #[error("loader is required")]
    LoaderMissing,

    /// No group exists under the requested name.
    #[error("no such group: {0}")]
    UnknownGroup(String),
}

impl CacheError {
    /// Build a `LoaderFailed` from an error that opts into [`NotFound`].
    pub fn loader_failed<E>(err: E) -> Self
    where
        E: NotFound,
    {
        let not_found = err.is_not_found();
        Self::LoaderFailed {
            source: Box::new(err),
            not_found,
        }
    }

    /// Build a `LoaderFailed` from an ordinary error that does not implement
    /// [`NotFound`]; always maps to 500 at the HTTP layer.
    pub fn loader_failed_plain<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::LoaderFailed {
            source: Box::new(err),
            not_found: false,
        }
    }

    pub fn peer_fetch_failed<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::PeerFetchFailed(Box::new(err))
    }

    /// True when the failure should be reported to an HTTP caller as 404 rather than 500.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::LoaderFailed { not_found: true, .. } | Self::UnknownGroup(_))
    }
}

/// Opt-in marker for loader errors that mean "the key does not exist at the origin",
/// as opposed to a transient failure. Implement this on a loader's error type so the
/// HTTP handler can map it to 404 instead of 500.
pub trait NotFound: std::error::Error + Send + Sync + 'static {
    fn is_not_found(&self) -> bool {
        false
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
