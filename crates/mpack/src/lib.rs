//! MessagePack codec over an explicit [`Value`] model.
//!
//! ```
//! use mpack::{decode, encode, Value};
//!
//! let value = Value::Map(vec![
//!     (Value::from("a"), Value::from(1)),
//!     (Value::from("b"), Value::Array(vec![Value::from(2), Value::from(3)])),
//! ]);
//! let bytes = encode(&value).unwrap();
//! assert_eq!(bytes, [0x82, 0xa1, b'a', 0x01, 0xa1, b'b', 0x92, 0x02, 0x03]);
//! assert_eq!(decode(&bytes).unwrap(), value);
//! ```
//!
//! Decoding is configured through [`DecoderOptions`]: nesting depth limit,
//! UTF-8 policy for `str` payloads, and whether trailing bytes are an error.

mod decoder;
mod encoder;
mod error;
pub mod format;
mod json;
mod options;
mod path;
mod skip;
mod util;
mod value;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{BridgeError, DecodeError, EncodeError, LookupError};
pub use options::{DecoderOptions, TrailingPolicy, Utf8Policy, DEFAULT_MAX_DEPTH};
pub use path::PathSegment;
pub use skip::validate;
pub use util::{decode, decode_with, decode_with_consumed, encode, encode_into};
pub use value::{Text, Value};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn public_types_are_send_and_sync() {
        assert_send_sync::<Value>();
        assert_send_sync::<Text>();
        assert_send_sync::<DecoderOptions>();
        assert_send_sync::<Decoder<'static>>();
        assert_send_sync::<Encoder>();
        assert_send_sync::<DecodeError>();
        assert_send_sync::<EncodeError>();
        assert_send_sync::<LookupError>();
        assert_send_sync::<BridgeError>();
    }
}
