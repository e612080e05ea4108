//! `Encoder`: writes a [`Value`] as compact MessagePack.

use mpack_buffers::Writer;
use tracing::trace;

use crate::error::EncodeError;
use crate::format::{
    array_format, bin_format, ext_format, int_format, map_format, str_format, uint_format, Format,
    LengthField,
};
use crate::value::Value;

/// A reusable MessagePack encoder.
///
/// Always picks the smallest format that can hold a value's magnitude or
/// length. Map pairs are written in the order given.
#[derive(Debug, Default)]
pub struct Encoder {
    writer: Writer,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            writer: Writer::with_capacity(capacity),
        }
    }

    /// Encodes `value` into a fresh buffer. On failure nothing is returned and
    /// the encoder is left empty.
    pub fn encode(&mut self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        self.writer.truncate(0);
        self.write_any(value)?;
        let bytes = self.writer.flush();
        trace!(len = bytes.len(), "encoded {}", value.type_name());
        Ok(bytes)
    }

    /// Returns everything written since the last flush.
    pub fn flush(&mut self) -> Vec<u8> {
        self.writer.flush()
    }

    /// Writes one complete value. On failure everything this call wrote is
    /// discarded, so the buffer only ever holds whole values.
    pub fn write_any(&mut self, value: &Value) -> Result<(), EncodeError> {
        let mark = self.writer.len();
        self.write_value(value).inspect_err(|_| self.writer.truncate(mark))
    }

    fn write_value(&mut self, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Nil => self.write_nil(),
            Value::Bool(b) => self.write_bool(*b),
            Value::Int(i) => self.write_int(*i),
            Value::UInt(u) => self.write_uint(*u),
            Value::Float32(f) => self.write_f32(*f),
            Value::Float64(f) => self.write_f64(*f),
            Value::String(text) => self.write_str_bytes(text.as_bytes())?,
            Value::Binary(bytes) => self.write_bin(bytes)?,
            Value::Array(items) => {
                self.write_arr_hdr(items.len())?;
                for item in items {
                    self.write_value(item)?;
                }
            }
            Value::Map(pairs) => {
                self.write_map_hdr(pairs.len())?;
                for (key, value) in pairs {
                    self.write_value(key)?;
                    self.write_value(value)?;
                }
            }
            Value::Extension(kind, data) => self.write_ext(*kind, data)?,
        }
        Ok(())
    }

    pub fn write_nil(&mut self) {
        self.writer.u8(Format::Nil.tag());
    }

    pub fn write_bool(&mut self, b: bool) {
        let format = if b { Format::True } else { Format::False };
        self.writer.u8(format.tag());
    }

    pub fn write_uint(&mut self, uint: u64) {
        let format = uint_format(uint);
        match format {
            Format::PositiveFixint(n) => self.writer.u8(n),
            Format::Uint8 => self.writer.u8u8(format.tag(), uint as u8),
            Format::Uint16 => self.writer.u8u16(format.tag(), uint as u16),
            Format::Uint32 => self.writer.u8u32(format.tag(), uint as u32),
            _ => self.writer.u8u64(format.tag(), uint),
        }
    }

    pub fn write_int(&mut self, int: i64) {
        if let Ok(uint) = u64::try_from(int) {
            return self.write_uint(uint);
        }
        let format = int_format(int);
        match format {
            Format::NegativeFixint(n) => self.writer.i8(n),
            Format::Int8 => {
                self.writer.u8(format.tag());
                self.writer.i8(int as i8);
            }
            Format::Int16 => {
                self.writer.u8(format.tag());
                self.writer.i16(int as i16);
            }
            Format::Int32 => {
                self.writer.u8(format.tag());
                self.writer.i32(int as i32);
            }
            _ => {
                self.writer.u8(format.tag());
                self.writer.i64(int);
            }
        }
    }

    pub fn write_f32(&mut self, float: f32) {
        self.writer.u8f32(Format::Float32.tag(), float);
    }

    pub fn write_f64(&mut self, float: f64) {
        self.writer.u8f64(Format::Float64.tag(), float);
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), EncodeError> {
        self.write_str_bytes(s.as_bytes())
    }

    fn write_str_bytes(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        let format = str_format(bytes.len()).ok_or(EncodeError::UnrepresentableValue {
            kind: "str",
            len: bytes.len(),
        })?;
        self.write_header(format, bytes.len());
        self.writer.buf(bytes);
        Ok(())
    }

    pub fn write_bin(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        let format = bin_format(bytes.len()).ok_or(EncodeError::UnrepresentableValue {
            kind: "bin",
            len: bytes.len(),
        })?;
        self.write_header(format, bytes.len());
        self.writer.buf(bytes);
        Ok(())
    }

    pub fn write_arr_hdr(&mut self, len: usize) -> Result<(), EncodeError> {
        let format =
            array_format(len).ok_or(EncodeError::UnrepresentableValue { kind: "array", len })?;
        self.write_header(format, len);
        Ok(())
    }

    pub fn write_map_hdr(&mut self, len: usize) -> Result<(), EncodeError> {
        let format =
            map_format(len).ok_or(EncodeError::UnrepresentableValue { kind: "map", len })?;
        self.write_header(format, len);
        Ok(())
    }

    pub fn write_ext(&mut self, kind: i8, data: &[u8]) -> Result<(), EncodeError> {
        let format = ext_format(data.len()).ok_or(EncodeError::UnrepresentableValue {
            kind: "ext",
            len: data.len(),
        })?;
        self.write_header(format, data.len());
        self.writer.i8(kind);
        self.writer.buf(data);
        Ok(())
    }

    /// Writes the tag of a sized format and, if it has one, its length prefix.
    /// `len` must fit the format, which the `*_format` selectors guarantee.
    fn write_header(&mut self, format: Format, len: usize) {
        match format.length_field() {
            LengthField::Prefix(1) => self.writer.u8u8(format.tag(), len as u8),
            LengthField::Prefix(2) => self.writer.u8u16(format.tag(), len as u16),
            LengthField::Prefix(_) => self.writer.u8u32(format.tag(), len as u32),
            LengthField::Embedded(_) | LengthField::None => self.writer.u8(format.tag()),
        }
    }
}
