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

//! A distributed, read-through, in-memory key/value cache organized into named
//! namespaces ("groups"). A client asks a local [`Group`] for a key; it is served
//! from the in-process LRU, from a peer's cache over HTTP, or — as a last resort —
//! from a user-supplied [`Loader`], populating the local cache along the way. Keys
//! are sharded across peers by consistent hashing so each key has one authoritative
//! owner.
//!
//! ```no_run
//! use std::sync::Arc;
//! use ringcache::{loader::LoaderFn, value::ByteView, Group};
//!
//! # async fn run() {
//! let loader = Arc::new(LoaderFn(|key: &str| {
//!     let key = key.to_string();
//!     async move { Ok(ByteView::from(format!("value-for-{key}"))) }
//! }));
//! let group = Group::new("scores", 64 << 20, loader);
//! let value = group.get("Tom").await.unwrap();
//! # }
//! ```

pub mod config;
pub mod error;
pub mod group;
pub mod hashring;
pub mod loader;
mod list;
pub mod lru;
pub mod peer;
pub mod shell;
pub mod singleflight;
pub mod transport;
pub mod value;

pub use error::{CacheError, NotFound, Result};
pub use group::{get_group, new_group, CacheManager, Group};
pub use hashring::HashRing;
pub use loader::{Loader, LoaderFn};
pub use lru::LruCache;
pub use peer::{PeerGetter, PeerPicker};
pub use value::{ByteView, Value};
