//! Codec error types.

use mpack_buffers::BufferError;
use thiserror::Error;

/// Why a byte buffer could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("unknown tag 0x{tag:02x} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },
    #[error("nesting depth exceeds the maximum of {max_depth}")]
    DepthExceeded { max_depth: usize },
    #[error("invalid UTF-8 in str payload at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("{remaining} trailing bytes after a {consumed}-byte value")]
    TrailingBytes { consumed: usize, remaining: usize },
    #[error("value occupies {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

impl From<BufferError> for DecodeError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer {
                offset,
                needed,
                available,
            } => DecodeError::TruncatedInput {
                offset,
                needed,
                available,
            },
        }
    }
}

/// Why a value could not be encoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("{kind} of length {len} does not fit a 32-bit length field")]
    UnrepresentableValue { kind: &'static str, len: usize },
}

/// Why a shallow path lookup failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("expected a map at offset {offset}")]
    NotMap { offset: usize },
    #[error("expected an array at offset {offset}")]
    NotArray { offset: usize },
    #[error("key {0:?} not found")]
    KeyNotFound(String),
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl From<BufferError> for LookupError {
    fn from(err: BufferError) -> Self {
        LookupError::Decode(err.into())
    }
}

/// Why a [`Value`](crate::Value) has no JSON counterpart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("{0} values have no JSON representation")]
    Unsupported(&'static str),
    #[error("map key of type {0} is not a string")]
    NonStringKey(&'static str),
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
    #[error("non-finite float has no JSON representation")]
    NonFiniteFloat,
    #[error("duplicate map key {0:?}")]
    DuplicateKey(String),
}
