//! Opaque user references
//!
//! User ids are encoded with a salted hashids alphabet so the public API never
//! exposes sequential database ids. Encoding is reversible with the same salt.

use harsh::Harsh;
use std::fmt;

use crate::entities::UserId;

/// Errors produced while encoding or decoding references
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("invalid reference encoder setup: {0}")]
    Setup(String),

    #[error("negative id cannot be encoded: {0}")]
    NegativeId(i64),

    #[error("malformed user reference")]
    Malformed,
}

/// Salted, reversible encoder between [`UserId`] and reference strings
pub struct ReferenceEncoder {
    harsh: Harsh,
}

impl ReferenceEncoder {
    /// Minimum length of generated references
    pub const MIN_LENGTH: usize = 12;

    /// Create an encoder for the given salt
    pub fn new(salt: &str) -> Result<Self, ReferenceError> {
        let harsh = Harsh::builder()
            .salt(salt)
            .length(Self::MIN_LENGTH)
            .build()
            .map_err(|e| ReferenceError::Setup(e.to_string()))?;

        Ok(Self { harsh })
    }

    /// Encode a user id into an opaque reference
    pub fn encode(&self, id: UserId) -> Result<String, ReferenceError> {
        let raw = u64::try_from(id.into_inner())
            .map_err(|_| ReferenceError::NegativeId(id.into_inner()))?;

        Ok(self.harsh.encode(&[raw]))
    }

    /// Decode a reference back into a user id
    ///
    /// Only canonical references carrying exactly one id are accepted.
    pub fn decode(&self, reference: &str) -> Result<UserId, ReferenceError> {
        let values = self
            .harsh
            .decode(reference)
            .map_err(|_| ReferenceError::Malformed)?;

        let [value] = values.as_slice() else {
            return Err(ReferenceError::Malformed);
        };

        if self.harsh.encode(&values) != reference {
            return Err(ReferenceError::Malformed);
        }

        i64::try_from(*value)
            .map(UserId::new)
            .map_err(|_| ReferenceError::Malformed)
    }
}

impl fmt::Debug for ReferenceEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceEncoder")
            .field("min_length", &Self::MIN_LENGTH)
            .finish_non_exhaustive()
    }
}
