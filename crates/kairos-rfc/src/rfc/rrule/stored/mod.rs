//! Relocatable stored form of a recurrence.
//!
//! The whole value, including its BY* parts and `RSCALE`, lives in one
//! length-prefixed byte buffer that refers to its own contents by offset
//! only. The host may move, copy or persist the bytes without fixups.

mod decode;
mod encode;
mod error;
pub mod layout;

use std::fmt;

use kairos_core::constants::DEFAULT_MAX_STORED_SIZE;

pub use decode::decode;
pub use encode::encode;
pub use error::{StorageError, StorageResult};

use crate::rfc::rrule::core::Recurrence;

/// Size limits applied while encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageLimits {
    pub max_buffer_size: usize,
}

impl Default for StorageLimits {
    fn default() -> Self {
        Self {
            max_buffer_size: DEFAULT_MAX_STORED_SIZE,
        }
    }
}

/// An encoded recurrence as handed to and returned by the host runtime.
#[derive(Clone)]
pub struct StoredRecurrence {
    bytes: Vec<u8>,
}

impl StoredRecurrence {
    /// ## Summary
    /// Encodes `rule` under `limits`.
    ///
    /// ## Errors
    /// See [`encode`].
    pub fn encode(rule: &Recurrence<'_>, limits: &StorageLimits) -> StorageResult<Self> {
        encode(rule, limits)
    }

    /// ## Summary
    /// Adopts bytes returned by the host after checking they decode.
    ///
    /// ## Errors
    /// See [`decode`].
    pub fn from_bytes(bytes: Vec<u8>) -> StorageResult<Self> {
        decode(&bytes)?;
        Ok(Self { bytes })
    }

    /// ## Summary
    /// Views the buffer as a recurrence value borrowing from `self`.
    ///
    /// ## Errors
    /// See [`decode`].
    pub fn decode(&self) -> StorageResult<Recurrence<'_>> {
        decode(&self.bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for StoredRecurrence {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for StoredRecurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredRecurrence")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
