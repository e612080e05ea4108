//! Shallow lookups: locate a nested value by walking raw bytes.
//!
//! Only the keys and indices on the path are inspected; everything else is
//! skipped without being decoded.

use crate::decoder::Decoder;
use crate::error::{DecodeError, LookupError};
use crate::format::{Family, Format};

/// One step of a lookup path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    /// Entry of a map whose key is this string.
    Key(&'a str),
    /// Element of an array.
    Index(usize),
}

impl Decoder<'_> {
    /// Reads a map header and returns its pair count.
    pub fn read_map_header(&mut self) -> Result<usize, LookupError> {
        let offset = self.position();
        let format = self.format()?;
        if format.family() != Family::Map {
            return Err(LookupError::NotMap { offset });
        }
        Ok(self.length(format)?)
    }

    /// Reads an array header and returns its element count.
    pub fn read_array_header(&mut self) -> Result<usize, LookupError> {
        let offset = self.position();
        let format = self.format()?;
        if format.family() != Family::Array {
            return Err(LookupError::NotArray { offset });
        }
        Ok(self.length(format)?)
    }

    /// Positions the cursor on the value stored under string key `key` of the
    /// map at the cursor. The first matching pair wins; non-string keys never
    /// match.
    pub fn find_key(&mut self, key: &str) -> Result<usize, LookupError> {
        let len = self.read_map_header()?;
        for _ in 0..len {
            if self.key_matches(key)? {
                return Ok(self.position());
            }
            self.skip_any()?;
        }
        Err(LookupError::KeyNotFound(key.to_owned()))
    }

    /// Positions the cursor on element `index` of the array at the cursor.
    pub fn find_index(&mut self, index: usize) -> Result<usize, LookupError> {
        let len = self.read_array_header()?;
        if index >= len {
            return Err(LookupError::IndexOutOfBounds { index, len });
        }
        for _ in 0..index {
            self.skip_any()?;
        }
        Ok(self.position())
    }

    /// Follows `path` from the cursor and returns the offset of the selected
    /// value, leaving the cursor there so [`Decoder::read_any`] can decode it.
    pub fn find_path(&mut self, path: &[PathSegment<'_>]) -> Result<usize, LookupError> {
        for segment in path {
            match *segment {
                PathSegment::Key(key) => self.find_key(key)?,
                PathSegment::Index(index) => self.find_index(index)?,
            };
        }
        Ok(self.position())
    }

    fn key_matches(&mut self, key: &str) -> Result<bool, DecodeError> {
        let format = match Format::from_tag(self.reader.peek()?) {
            Some(format) if format.family() == Family::Str => format,
            _ => {
                self.skip_any()?;
                return Ok(false);
            }
        };
        self.reader.skip(1)?;
        let len = self.length(format)?;
        Ok(self.reader.buf(len)? == key.as_bytes())
    }
}
