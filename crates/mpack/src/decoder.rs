//! `Decoder`: reads MessagePack bytes into a [`Value`].

use mpack_buffers::Reader;

use crate::error::DecodeError;
use crate::format::{Format, LengthField};
use crate::options::{DecoderOptions, TrailingPolicy, Utf8Policy};
use crate::value::{Text, Value};

/// A decoder over one borrowed input buffer.
///
/// The cursor starts at offset 0; [`Decoder::read_any`] reads the value at the
/// cursor and leaves the cursor just past it.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    pub(crate) reader: Reader<'a>,
    options: DecoderOptions,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_options(input, DecoderOptions::default())
    }

    pub fn with_options(input: &'a [u8], options: DecoderOptions) -> Self {
        Self {
            reader: Reader::new(input),
            options,
        }
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Current cursor offset.
    pub fn position(&self) -> usize {
        self.reader.x
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.reader.remaining()
    }

    /// Moves the cursor to an absolute offset.
    pub fn seek(&mut self, offset: usize) -> Result<(), DecodeError> {
        Ok(self.reader.seek(offset)?)
    }

    /// Reads one complete value at the cursor.
    pub fn read_any(&mut self) -> Result<Value, DecodeError> {
        self.value(0)
    }

    /// Reads one complete value starting at `offset`.
    pub fn read_at(&mut self, offset: usize) -> Result<Value, DecodeError> {
        self.seek(offset)?;
        self.read_any()
    }

    /// Applies the trailing-bytes policy to whatever follows the cursor.
    pub fn finish(&self) -> Result<(), DecodeError> {
        let remaining = self.remaining();
        if self.options.trailing == TrailingPolicy::Reject && remaining > 0 {
            return Err(DecodeError::TrailingBytes {
                consumed: self.position(),
                remaining,
            });
        }
        Ok(())
    }

    /// Reads a tag byte and classifies it.
    pub(crate) fn format(&mut self) -> Result<Format, DecodeError> {
        let offset = self.reader.x;
        let tag = self.reader.u8()?;
        Format::from_tag(tag).ok_or(DecodeError::UnknownTag { tag, offset })
    }

    /// Reads (or extracts from the tag) the length of a sized format.
    pub(crate) fn length(&mut self, format: Format) -> Result<usize, DecodeError> {
        let len = match format.length_field() {
            LengthField::None => 0,
            LengthField::Embedded(n) => n,
            LengthField::Prefix(1) => self.reader.u8()? as usize,
            LengthField::Prefix(2) => self.reader.u16()? as usize,
            LengthField::Prefix(_) => self.reader.u32()? as usize,
        };
        Ok(len)
    }

    /// Depth of a container opened at `depth`, or `DepthExceeded`.
    pub(crate) fn enter(&self, depth: usize) -> Result<usize, DecodeError> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            return Err(DecodeError::DepthExceeded {
                max_depth: self.options.max_depth,
            });
        }
        Ok(depth)
    }

    /// Rejects `count` items that could not fit in the remaining input, given
    /// that each takes at least `min_size` bytes.
    pub(crate) fn check_items(&self, count: usize, min_size: usize) -> Result<(), DecodeError> {
        let needed = count.saturating_mul(min_size);
        let available = self.remaining();
        if needed > available {
            return Err(DecodeError::TruncatedInput {
                offset: self.position(),
                needed,
                available,
            });
        }
        Ok(())
    }

    fn value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        let format = self.format()?;
        let value = match format {
            Format::Nil => Value::Nil,
            Format::False => Value::Bool(false),
            Format::True => Value::Bool(true),
            Format::PositiveFixint(n) => Value::Int(i64::from(n)),
            Format::NegativeFixint(n) => Value::Int(i64::from(n)),
            Format::Uint8 => Value::Int(i64::from(self.reader.u8()?)),
            Format::Uint16 => Value::Int(i64::from(self.reader.u16()?)),
            Format::Uint32 => Value::Int(i64::from(self.reader.u32()?)),
            Format::Uint64 => Value::from(self.reader.u64()?),
            Format::Int8 => Value::Int(i64::from(self.reader.i8()?)),
            Format::Int16 => Value::Int(i64::from(self.reader.i16()?)),
            Format::Int32 => Value::Int(i64::from(self.reader.i32()?)),
            Format::Int64 => Value::Int(self.reader.i64()?),
            Format::Float32 => Value::Float32(self.reader.f32()?),
            Format::Float64 => Value::Float64(self.reader.f64()?),
            Format::FixStr(_) | Format::Str8 | Format::Str16 | Format::Str32 => {
                let len = self.length(format)?;
                Value::String(self.text(len)?)
            }
            Format::Bin8 | Format::Bin16 | Format::Bin32 => {
                let len = self.length(format)?;
                Value::Binary(self.reader.buf(len)?.to_vec())
            }
            Format::FixArray(_) | Format::Array16 | Format::Array32 => {
                let len = self.length(format)?;
                self.array(len, depth)?
            }
            Format::FixMap(_) | Format::Map16 | Format::Map32 => {
                let len = self.length(format)?;
                self.map(len, depth)?
            }
            Format::FixExt1
            | Format::FixExt2
            | Format::FixExt4
            | Format::FixExt8
            | Format::FixExt16
            | Format::Ext8
            | Format::Ext16
            | Format::Ext32 => {
                let len = self.length(format)?;
                let kind = self.reader.i8()?;
                Value::Extension(kind, self.reader.buf(len)?.to_vec())
            }
        };
        Ok(value)
    }

    fn text(&mut self, len: usize) -> Result<Text, DecodeError> {
        let offset = self.reader.x;
        let bytes = self.reader.buf(len)?;
        if self.options.utf8 == Utf8Policy::Strict && std::str::from_utf8(bytes).is_err() {
            return Err(DecodeError::InvalidUtf8 { offset });
        }
        Ok(Text::from_bytes(bytes.to_vec()))
    }

    fn array(&mut self, len: usize, depth: usize) -> Result<Value, DecodeError> {
        let depth = self.enter(depth)?;
        self.check_items(len, 1)?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(self.value(depth)?);
        }
        Ok(Value::Array(items))
    }

    fn map(&mut self, len: usize, depth: usize) -> Result<Value, DecodeError> {
        let depth = self.enter(depth)?;
        self.check_items(len, 2)?;
        let mut pairs = Vec::with_capacity(len);
        for _ in 0..len {
            let key = self.value(depth)?;
            let value = self.value(depth)?;
            pairs.push((key, value));
        }
        Ok(Value::Map(pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(bytes: &[u8]) -> Result<Value, DecodeError> {
        Decoder::new(bytes).read_any()
    }

    #[test]
    fn scalars() {
        assert_eq!(read(&[0xc0]), Ok(Value::Nil));
        assert_eq!(read(&[0xc2]), Ok(Value::Bool(false)));
        assert_eq!(read(&[0xc3]), Ok(Value::Bool(true)));
        assert_eq!(read(&[0x7f]), Ok(Value::Int(127)));
        assert_eq!(read(&[0xe0]), Ok(Value::Int(-32)));
        assert_eq!(read(&[0xd0, 0x80]), Ok(Value::Int(-128)));
        assert_eq!(read(&[0xcd, 0xff, 0xff]), Ok(Value::Int(65_535)));
        assert_eq!(
            read(&[0xca, 0x3f, 0xc0, 0x00, 0x00]),
            Ok(Value::Float32(1.5))
        );
    }

    #[test]
    fn uint64_above_i64_stays_unsigned() {
        let mut bytes = vec![0xcf];
        bytes.extend_from_slice(&u64::MAX.to_be_bytes());
        let value = read(&bytes).unwrap();
        assert!(matches!(value, Value::UInt(u64::MAX)));
    }

    #[test]
    fn cursor_stops_after_value() {
        let bytes = [0x92, 0x01, 0x02, 0xc0];
        let mut decoder = Decoder::new(&bytes);
        assert_eq!(
            decoder.read_any(),
            Ok(Value::Array(vec![Value::Int(1), Value::Int(2)]))
        );
        assert_eq!(decoder.position(), 3);
        assert_eq!(decoder.remaining(), 1);
        assert_eq!(decoder.read_any(), Ok(Value::Nil));
    }

    #[test]
    fn read_at_offset() {
        let bytes = [0x92, 0x01, 0xa1, b'x'];
        let mut decoder = Decoder::new(&bytes);
        assert_eq!(decoder.read_at(2), Ok(Value::from("x")));
        assert!(decoder.read_at(5).is_err());
    }

    #[test]
    fn depth_counts_each_container() {
        let options = DecoderOptions::new().max_depth(2);
        let ok = [0x91, 0x91, 0x01];
        let too_deep = [0x91, 0x91, 0x91, 0x01];
        assert!(Decoder::with_options(&ok, options).read_any().is_ok());
        assert_eq!(
            Decoder::with_options(&too_deep, options).read_any(),
            Err(DecodeError::DepthExceeded { max_depth: 2 })
        );
        let map_in_array = [0x91, 0x81, 0x01, 0x90];
        assert_eq!(
            Decoder::with_options(&map_in_array, options).read_any(),
            Err(DecodeError::DepthExceeded { max_depth: 2 })
        );
    }

    #[test]
    fn declared_count_beyond_input_fails_before_allocating() {
        let bytes = [0xdd, 0xff, 0xff, 0xff, 0xff, 0x01];
        assert_eq!(
            read(&bytes),
            Err(DecodeError::TruncatedInput {
                offset: 5,
                needed: 0xffff_ffff,
                available: 1,
            })
        );
        let map = [0x82, 0x01, 0x02, 0x03];
        assert!(matches!(
            read(&map),
            Err(DecodeError::TruncatedInput { needed: 4, available: 3, .. })
        ));
    }

    #[test]
    fn finish_applies_trailing_policy() {
        let bytes = [0x01, 0x02];
        let mut lenient = Decoder::new(&bytes);
        lenient.read_any().unwrap();
        assert_eq!(lenient.finish(), Ok(()));

        let options = DecoderOptions::new().trailing(TrailingPolicy::Reject);
        let mut strict = Decoder::with_options(&bytes, options);
        strict.read_any().unwrap();
        assert_eq!(
            strict.finish(),
            Err(DecodeError::TrailingBytes {
                consumed: 1,
                remaining: 1
            })
        );
    }
}
