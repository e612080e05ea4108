//! One-call helpers over [`Decoder`] and [`Encoder`].

use tracing::{debug, trace};

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{DecodeError, EncodeError};
use crate::options::DecoderOptions;
use crate::value::Value;

/// Decodes the value at the start of `input` with default options: strict
/// UTF-8, trailing bytes allowed, nesting limited to
/// [`DEFAULT_MAX_DEPTH`](crate::DEFAULT_MAX_DEPTH).
pub fn decode(input: &[u8]) -> Result<Value, DecodeError> {
    decode_with(input, DecoderOptions::default())
}

pub fn decode_with(input: &[u8], options: DecoderOptions) -> Result<Value, DecodeError> {
    decode_with_consumed(input, options).map(|(value, _)| value)
}

/// Like [`decode_with`], also returning how many bytes the value occupied.
pub fn decode_with_consumed(
    input: &[u8],
    options: DecoderOptions,
) -> Result<(Value, usize), DecodeError> {
    trace!(len = input.len(), "decoding msgpack");
    let mut decoder = Decoder::with_options(input, options);
    let result = decoder.read_any().and_then(|value| {
        decoder.finish()?;
        Ok((value, decoder.position()))
    });
    match &result {
        Ok((value, consumed)) => trace!(consumed, "decoded {}", value.type_name()),
        Err(err) => debug!(%err, "msgpack decode failed"),
    }
    result
}

pub fn encode(value: &Value) -> Result<Vec<u8>, EncodeError> {
    Encoder::new().encode(value).inspect_err(|err| {
        debug!(%err, "msgpack encode failed");
    })
}

/// Appends the encoding of `value` to `out`. On failure `out` is untouched.
pub fn encode_into(value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let bytes = encode(value)?;
    out.extend_from_slice(&bytes);
    Ok(())
}
