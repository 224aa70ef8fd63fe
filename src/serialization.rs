//! Serialization of fitted model parameters.
//!
//! Parameter types hold plain numbers only (`Vec<f64>`, scalars), never
//! `ndarray` buffers, so the on-disk layout does not depend on how the
//! model stores them in memory.

use std::error::Error;

/// A parameter representation that can be turned into bytes and back.
pub trait SerializableParams: Sized {
    /// The error type returned during (de)serialization.
    type Error: Error + Send + Sync + 'static;

    /// Serialize the parameters into a byte buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Deserialize the parameters from a byte buffer.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;
}

impl<T> SerializableParams for T
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    type Error = bincode::Error;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        bincode::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Params {
        values: Vec<f64>,
        offset: f64,
    }

    #[test]
    fn test_bincode_blanket_impl() {
        let p = Params {
            values: vec![1.5, -2.0],
            offset: 0.25,
        };
        let bytes = p.to_bytes().unwrap();
        assert_eq!(Params::from_bytes(&bytes).unwrap(), p);
    }

    #[test]
    fn test_truncated_bytes_fail() {
        let p = Params {
            values: vec![1.0, 2.0, 3.0],
            offset: 0.0,
        };
        let bytes = p.to_bytes().unwrap();
        assert!(Params::from_bytes(&bytes[..bytes.len() - 4]).is_err());
    }
}
