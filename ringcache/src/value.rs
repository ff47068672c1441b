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

use bytes::Bytes;

/// An opaque, immutable byte payload stored in the cache.
///
/// `ByteView` is cheap to clone (it shares the underlying buffer via [`Bytes`]), but
/// every path that hands bytes to a caller outside this crate returns an owned `Vec<u8>`
/// copy so external mutation can never reach the value stored in the LRU.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ByteView {
    b: Bytes,
}

impl ByteView {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self { b: bytes.into() }
    }

    /// Number of bytes in the payload.
    pub fn len(&self) -> u64 {
        self.b.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    /// A defensive copy of the payload. Mutating the returned `Vec` never affects the
    /// value stored in the cache.
    pub fn to_vec(&self) -> Vec<u8> {
        self.b.to_vec()
    }

    /// Borrow the payload without copying. Callers inside this crate may use this to
    /// avoid a copy when the bytes are about to be copied anyway (e.g. serializing an
    /// HTTP response body); callers outside the crate should prefer [`to_vec`].
    ///
    /// [`to_vec`]: ByteView::to_vec
    pub fn as_slice(&self) -> &[u8] {
        &self.b
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(v: Vec<u8>) -> Self {
        Self { b: Bytes::from(v) }
    }
}

impl From<&str> for ByteView {
    fn from(s: &str) -> Self {
        Self {
            b: Bytes::copy_from_slice(s.as_bytes()),
        }
    }
}

impl From<String> for ByteView {
    fn from(s: String) -> Self {
        Self { b: Bytes::from(s.into_bytes()) }
    }
}

/// The capability the LRU requires of anything it stores: an advertised byte length,
/// used to account against `max_bytes`. `ByteView` is the only implementation shipped
/// here, but downstream crates may store their own types as long as `len()` is honest.
pub trait Value: Clone + Send + Sync + 'static {
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Value for ByteView {
    fn len(&self) -> u64 {
        ByteView::len(self)
    }
}
