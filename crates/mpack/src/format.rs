//! The MessagePack format table.
//!
//! Maps every tag byte to its [`Format`], describes where each format keeps its
//! length, and picks the most compact format for a given magnitude or length.
//! Both the decoder and the encoder go through this table.

/// Fixed tag bytes.
pub mod tag {
    pub const POSITIVE_FIXINT_MAX: u8 = 0x7f;
    pub const FIXMAP: u8 = 0x80;
    pub const FIXARRAY: u8 = 0x90;
    pub const FIXSTR: u8 = 0xa0;
    pub const NIL: u8 = 0xc0;
    /// Reserved by the format; never valid on the wire.
    pub const NEVER_USED: u8 = 0xc1;
    pub const FALSE: u8 = 0xc2;
    pub const TRUE: u8 = 0xc3;
    pub const BIN8: u8 = 0xc4;
    pub const BIN16: u8 = 0xc5;
    pub const BIN32: u8 = 0xc6;
    pub const EXT8: u8 = 0xc7;
    pub const EXT16: u8 = 0xc8;
    pub const EXT32: u8 = 0xc9;
    pub const FLOAT32: u8 = 0xca;
    pub const FLOAT64: u8 = 0xcb;
    pub const UINT8: u8 = 0xcc;
    pub const UINT16: u8 = 0xcd;
    pub const UINT32: u8 = 0xce;
    pub const UINT64: u8 = 0xcf;
    pub const INT8: u8 = 0xd0;
    pub const INT16: u8 = 0xd1;
    pub const INT32: u8 = 0xd2;
    pub const INT64: u8 = 0xd3;
    pub const FIXEXT1: u8 = 0xd4;
    pub const FIXEXT2: u8 = 0xd5;
    pub const FIXEXT4: u8 = 0xd6;
    pub const FIXEXT8: u8 = 0xd7;
    pub const FIXEXT16: u8 = 0xd8;
    pub const STR8: u8 = 0xd9;
    pub const STR16: u8 = 0xda;
    pub const STR32: u8 = 0xdb;
    pub const ARRAY16: u8 = 0xdc;
    pub const ARRAY32: u8 = 0xdd;
    pub const MAP16: u8 = 0xde;
    pub const MAP32: u8 = 0xdf;
    pub const NEGATIVE_FIXINT_MIN: u8 = 0xe0;
}

/// Logical type family a format belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Nil,
    Bool,
    Int,
    Float,
    Str,
    Bin,
    Array,
    Map,
    Ext,
}

/// Where a format keeps the length (byte count, element count or pair count)
/// of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthField {
    /// Scalar formats: the payload size is fixed by the tag.
    None,
    /// The length is implied by the tag itself.
    Embedded(usize),
    /// A big-endian unsigned length of this many bytes follows the tag.
    Prefix(usize),
}

/// One concrete wire format. Fix-formats carry the value or length stored in
/// their tag's low bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    PositiveFixint(u8),
    FixMap(u8),
    FixArray(u8),
    FixStr(u8),
    Nil,
    False,
    True,
    Bin8,
    Bin16,
    Bin32,
    Ext8,
    Ext16,
    Ext32,
    Float32,
    Float64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    FixExt1,
    FixExt2,
    FixExt4,
    FixExt8,
    FixExt16,
    Str8,
    Str16,
    Str32,
    Array16,
    Array32,
    Map16,
    Map32,
    NegativeFixint(i8),
}

impl Format {
    /// Classifies a tag byte. Returns `None` only for [`tag::NEVER_USED`].
    pub fn from_tag(byte: u8) -> Option<Format> {
        let format = match byte {
            0x00..=tag::POSITIVE_FIXINT_MAX => Format::PositiveFixint(byte),
            0x80..=0x8f => Format::FixMap(byte & 0x0f),
            0x90..=0x9f => Format::FixArray(byte & 0x0f),
            0xa0..=0xbf => Format::FixStr(byte & 0x1f),
            tag::NIL => Format::Nil,
            tag::NEVER_USED => return None,
            tag::FALSE => Format::False,
            tag::TRUE => Format::True,
            tag::BIN8 => Format::Bin8,
            tag::BIN16 => Format::Bin16,
            tag::BIN32 => Format::Bin32,
            tag::EXT8 => Format::Ext8,
            tag::EXT16 => Format::Ext16,
            tag::EXT32 => Format::Ext32,
            tag::FLOAT32 => Format::Float32,
            tag::FLOAT64 => Format::Float64,
            tag::UINT8 => Format::Uint8,
            tag::UINT16 => Format::Uint16,
            tag::UINT32 => Format::Uint32,
            tag::UINT64 => Format::Uint64,
            tag::INT8 => Format::Int8,
            tag::INT16 => Format::Int16,
            tag::INT32 => Format::Int32,
            tag::INT64 => Format::Int64,
            tag::FIXEXT1 => Format::FixExt1,
            tag::FIXEXT2 => Format::FixExt2,
            tag::FIXEXT4 => Format::FixExt4,
            tag::FIXEXT8 => Format::FixExt8,
            tag::FIXEXT16 => Format::FixExt16,
            tag::STR8 => Format::Str8,
            tag::STR16 => Format::Str16,
            tag::STR32 => Format::Str32,
            tag::ARRAY16 => Format::Array16,
            tag::ARRAY32 => Format::Array32,
            tag::MAP16 => Format::Map16,
            tag::MAP32 => Format::Map32,
            tag::NEGATIVE_FIXINT_MIN..=0xff => Format::NegativeFixint(byte as i8),
        };
        Some(format)
    }

    /// The tag byte that introduces this format on the wire.
    pub fn tag(self) -> u8 {
        match self {
            Format::PositiveFixint(n) => n & tag::POSITIVE_FIXINT_MAX,
            Format::FixMap(n) => tag::FIXMAP | (n & 0x0f),
            Format::FixArray(n) => tag::FIXARRAY | (n & 0x0f),
            Format::FixStr(n) => tag::FIXSTR | (n & 0x1f),
            Format::Nil => tag::NIL,
            Format::False => tag::FALSE,
            Format::True => tag::TRUE,
            Format::Bin8 => tag::BIN8,
            Format::Bin16 => tag::BIN16,
            Format::Bin32 => tag::BIN32,
            Format::Ext8 => tag::EXT8,
            Format::Ext16 => tag::EXT16,
            Format::Ext32 => tag::EXT32,
            Format::Float32 => tag::FLOAT32,
            Format::Float64 => tag::FLOAT64,
            Format::Uint8 => tag::UINT8,
            Format::Uint16 => tag::UINT16,
            Format::Uint32 => tag::UINT32,
            Format::Uint64 => tag::UINT64,
            Format::Int8 => tag::INT8,
            Format::Int16 => tag::INT16,
            Format::Int32 => tag::INT32,
            Format::Int64 => tag::INT64,
            Format::FixExt1 => tag::FIXEXT1,
            Format::FixExt2 => tag::FIXEXT2,
            Format::FixExt4 => tag::FIXEXT4,
            Format::FixExt8 => tag::FIXEXT8,
            Format::FixExt16 => tag::FIXEXT16,
            Format::Str8 => tag::STR8,
            Format::Str16 => tag::STR16,
            Format::Str32 => tag::STR32,
            Format::Array16 => tag::ARRAY16,
            Format::Array32 => tag::ARRAY32,
            Format::Map16 => tag::MAP16,
            Format::Map32 => tag::MAP32,
            Format::NegativeFixint(n) => n as u8,
        }
    }

    pub fn family(self) -> Family {
        match self {
            Format::Nil => Family::Nil,
            Format::False | Format::True => Family::Bool,
            Format::PositiveFixint(_)
            | Format::NegativeFixint(_)
            | Format::Uint8
            | Format::Uint16
            | Format::Uint32
            | Format::Uint64
            | Format::Int8
            | Format::Int16
            | Format::Int32
            | Format::Int64 => Family::Int,
            Format::Float32 | Format::Float64 => Family::Float,
            Format::FixStr(_) | Format::Str8 | Format::Str16 | Format::Str32 => Family::Str,
            Format::Bin8 | Format::Bin16 | Format::Bin32 => Family::Bin,
            Format::FixArray(_) | Format::Array16 | Format::Array32 => Family::Array,
            Format::FixMap(_) | Format::Map16 | Format::Map32 => Family::Map,
            Format::FixExt1
            | Format::FixExt2
            | Format::FixExt4
            | Format::FixExt8
            | Format::FixExt16
            | Format::Ext8
            | Format::Ext16
            | Format::Ext32 => Family::Ext,
        }
    }

    /// How the payload length of a container, string, binary or extension is
    /// found. Extension lengths count payload bytes, excluding the type byte.
    pub fn length_field(self) -> LengthField {
        match self {
            Format::FixMap(n) | Format::FixArray(n) | Format::FixStr(n) => {
                LengthField::Embedded(n as usize)
            }
            Format::FixExt1 => LengthField::Embedded(1),
            Format::FixExt2 => LengthField::Embedded(2),
            Format::FixExt4 => LengthField::Embedded(4),
            Format::FixExt8 => LengthField::Embedded(8),
            Format::FixExt16 => LengthField::Embedded(16),
            Format::Bin8 | Format::Ext8 | Format::Str8 => LengthField::Prefix(1),
            Format::Bin16 | Format::Ext16 | Format::Str16 | Format::Array16 | Format::Map16 => {
                LengthField::Prefix(2)
            }
            Format::Bin32 | Format::Ext32 | Format::Str32 | Format::Array32 | Format::Map32 => {
                LengthField::Prefix(4)
            }
            _ => LengthField::None,
        }
    }

    /// Size of the fixed-width payload that follows the tag of a scalar format.
    pub fn scalar_width(self) -> usize {
        match self {
            Format::Uint8 | Format::Int8 => 1,
            Format::Uint16 | Format::Int16 => 2,
            Format::Uint32 | Format::Int32 | Format::Float32 => 4,
            Format::Uint64 | Format::Int64 | Format::Float64 => 8,
            _ => 0,
        }
    }
}

/// Most compact format for a non-negative integer.
pub fn uint_format(value: u64) -> Format {
    match value {
        0..=0x7f => Format::PositiveFixint(value as u8),
        0x80..=0xff => Format::Uint8,
        0x100..=0xffff => Format::Uint16,
        0x1_0000..=0xffff_ffff => Format::Uint32,
        _ => Format::Uint64,
    }
}

/// Most compact format for a signed integer. Non-negative values take the
/// unsigned ladder.
pub fn int_format(value: i64) -> Format {
    if value >= 0 {
        return uint_format(value as u64);
    }
    match value {
        -32..=-1 => Format::NegativeFixint(value as i8),
        -0x80..=-33 => Format::Int8,
        -0x8000..=-0x81 => Format::Int16,
        -0x8000_0000..=-0x8001 => Format::Int32,
        _ => Format::Int64,
    }
}

/// Most compact string format for a UTF-8 byte length, `None` above `u32::MAX`.
pub fn str_format(len: usize) -> Option<Format> {
    let format = match u32::try_from(len).ok()? {
        n @ 0..=0x1f => Format::FixStr(n as u8),
        0x20..=0xff => Format::Str8,
        0x100..=0xffff => Format::Str16,
        _ => Format::Str32,
    };
    Some(format)
}

/// Most compact binary format for a byte length. There is no fix-bin.
pub fn bin_format(len: usize) -> Option<Format> {
    let format = match u32::try_from(len).ok()? {
        0..=0xff => Format::Bin8,
        0x100..=0xffff => Format::Bin16,
        _ => Format::Bin32,
    };
    Some(format)
}

/// Most compact array format for an element count.
pub fn array_format(len: usize) -> Option<Format> {
    let format = match u32::try_from(len).ok()? {
        n @ 0..=0x0f => Format::FixArray(n as u8),
        0x10..=0xffff => Format::Array16,
        _ => Format::Array32,
    };
    Some(format)
}

/// Most compact map format for a pair count.
pub fn map_format(len: usize) -> Option<Format> {
    let format = match u32::try_from(len).ok()? {
        n @ 0..=0x0f => Format::FixMap(n as u8),
        0x10..=0xffff => Format::Map16,
        _ => Format::Map32,
    };
    Some(format)
}

/// Most compact extension format for a payload length. Fixext applies only to
/// payloads of exactly 1, 2, 4, 8 or 16 bytes.
pub fn ext_format(len: usize) -> Option<Format> {
    let format = match u32::try_from(len).ok()? {
        1 => Format::FixExt1,
        2 => Format::FixExt2,
        4 => Format::FixExt4,
        8 => Format::FixExt8,
        16 => Format::FixExt16,
        0..=0xff => Format::Ext8,
        0x100..=0xffff => Format::Ext16,
        _ => Format::Ext32,
    };
    Some(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_but_never_used_classifies_and_maps_back() {
        for byte in 0..=u8::MAX {
            match Format::from_tag(byte) {
                Some(format) => assert_eq!(format.tag(), byte, "{format:?}"),
                None => assert_eq!(byte, tag::NEVER_USED),
            }
        }
    }

    #[test]
    fn fix_formats_carry_low_bits() {
        assert_eq!(Format::from_tag(0x05), Some(Format::PositiveFixint(5)));
        assert_eq!(Format::from_tag(0xff), Some(Format::NegativeFixint(-1)));
        assert_eq!(Format::from_tag(0xe0), Some(Format::NegativeFixint(-32)));
        assert_eq!(Format::from_tag(0x8f), Some(Format::FixMap(15)));
        assert_eq!(Format::from_tag(0x93), Some(Format::FixArray(3)));
        assert_eq!(Format::from_tag(0xbf), Some(Format::FixStr(31)));
    }

    #[test]
    fn length_fields() {
        assert_eq!(Format::FixStr(7).length_field(), LengthField::Embedded(7));
        assert_eq!(Format::FixExt16.length_field(), LengthField::Embedded(16));
        assert_eq!(Format::Str8.length_field(), LengthField::Prefix(1));
        assert_eq!(Format::Map16.length_field(), LengthField::Prefix(2));
        assert_eq!(Format::Ext32.length_field(), LengthField::Prefix(4));
        assert_eq!(Format::Uint64.length_field(), LengthField::None);
        assert_eq!(Format::Uint64.scalar_width(), 8);
        assert_eq!(Format::Float32.scalar_width(), 4);
    }

    #[test]
    fn integer_ladder_boundaries() {
        assert_eq!(int_format(0), Format::PositiveFixint(0));
        assert_eq!(int_format(127), Format::PositiveFixint(127));
        assert_eq!(int_format(128), Format::Uint8);
        assert_eq!(int_format(255), Format::Uint8);
        assert_eq!(int_format(256), Format::Uint16);
        assert_eq!(int_format(65_535), Format::Uint16);
        assert_eq!(int_format(65_536), Format::Uint32);
        assert_eq!(int_format(4_294_967_295), Format::Uint32);
        assert_eq!(int_format(4_294_967_296), Format::Uint64);
        assert_eq!(uint_format(u64::MAX), Format::Uint64);
        assert_eq!(int_format(-1), Format::NegativeFixint(-1));
        assert_eq!(int_format(-32), Format::NegativeFixint(-32));
        assert_eq!(int_format(-33), Format::Int8);
        assert_eq!(int_format(-128), Format::Int8);
        assert_eq!(int_format(-129), Format::Int16);
        assert_eq!(int_format(-32_768), Format::Int16);
        assert_eq!(int_format(-32_769), Format::Int32);
        assert_eq!(int_format(i32::MIN as i64), Format::Int32);
        assert_eq!(int_format(i32::MIN as i64 - 1), Format::Int64);
        assert_eq!(int_format(i64::MIN), Format::Int64);
    }

    #[test]
    fn length_ladders() {
        assert_eq!(str_format(31), Some(Format::FixStr(31)));
        assert_eq!(str_format(32), Some(Format::Str8));
        assert_eq!(str_format(256), Some(Format::Str16));
        assert_eq!(str_format(65_536), Some(Format::Str32));
        assert_eq!(bin_format(0), Some(Format::Bin8));
        assert_eq!(bin_format(65_535), Some(Format::Bin16));
        assert_eq!(array_format(15), Some(Format::FixArray(15)));
        assert_eq!(array_format(16), Some(Format::Array16));
        assert_eq!(map_format(65_536), Some(Format::Map32));
        assert_eq!(ext_format(4), Some(Format::FixExt4));
        assert_eq!(ext_format(3), Some(Format::Ext8));
        assert_eq!(ext_format(0), Some(Format::Ext8));
        assert_eq!(ext_format(17), Some(Format::Ext8));
        assert_eq!(ext_format(300), Some(Format::Ext16));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn lengths_beyond_u32_have_no_format() {
        let len = u32::MAX as usize + 1;
        assert_eq!(str_format(len), None);
        assert_eq!(bin_format(len), None);
        assert_eq!(array_format(len), None);
        assert_eq!(map_format(len), None);
        assert_eq!(ext_format(len), None);
    }
}
