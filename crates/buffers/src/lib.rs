//! Byte-level plumbing shared by the MessagePack codec.
//!
//! [`Reader`] walks a borrowed `&[u8]` with bounds-checked big-endian reads.
//! [`Writer`] appends big-endian scalars and raw bytes to a growable buffer.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

/// Error type for bounds-checked reads.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("end of buffer at offset {offset}: needed {needed} bytes, {available} available")]
    EndOfBuffer {
        offset: usize,
        needed: usize,
        available: usize,
    },
}
