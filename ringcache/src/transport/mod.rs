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

//! The one concrete peer transport shipped with this crate: plain HTTP, matching the
//! wire protocol `GET <base_path>/<group>/<key>` with an `application/octet-stream`
//! body on success. The core (`group`, `singleflight`, `hashring`, `lru`) never
//! references this module directly — it only knows about the [`crate::peer`] traits.

mod client;
mod picker;
mod server;

pub use client::HttpPeerGetter;
pub use picker::HttpPeerPicker;
pub use server::{serve, HttpPeerServer};

pub const DEFAULT_BASE_PATH: &str = "/_gocache/";
