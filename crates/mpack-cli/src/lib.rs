//! Core logic behind the `json-pack` and `json-unpack` binaries.
//!
//! - `json-pack`: JSON on stdin → MessagePack on stdout
//! - `json-unpack`: MessagePack on stdin → pretty JSON on stdout

use mpack::{BridgeError, DecodeError, DecoderOptions, EncodeError, Value};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("decode: {0}")]
    Decode(#[from] DecodeError),
    #[error("encode: {0}")]
    Encode(#[from] EncodeError),
    #[error("to JSON: {0}")]
    Bridge(#[from] BridgeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed (tests, embedding hosts); keep it.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

/// Encodes a JSON document to MessagePack bytes.
pub fn pack(json: &str) -> Result<Vec<u8>, CliError> {
    let document: serde_json::Value = serde_json::from_str(json)?;
    let bytes = mpack::encode(&Value::from(document))?;
    debug!(len = bytes.len(), "packed JSON document");
    Ok(bytes)
}

/// Decodes MessagePack bytes to a pretty-printed JSON document.
pub fn unpack(bytes: &[u8], options: DecoderOptions) -> Result<String, CliError> {
    let value = mpack::decode_with(bytes, options)?;
    let document = serde_json::Value::try_from(value)?;
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpack::TrailingPolicy;

    #[test]
    fn logging_init_is_repeatable() {
        init_logging();
        init_logging();
    }

    #[test]
    fn pack_then_unpack() {
        let bytes = pack(r#"{"b": [1, 2.5, null], "a": "x"}"#).unwrap();
        let json = unpack(&bytes, DecoderOptions::default()).unwrap();
        let back: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, serde_json::json!({"b": [1, 2.5, null], "a": "x"}));
        assert!(json.find("\"b\"") < json.find("\"a\""));
    }

    #[test]
    fn pack_rejects_bad_json() {
        assert!(matches!(pack("{"), Err(CliError::Json(_))));
    }

    #[test]
    fn unpack_surfaces_codec_errors() {
        assert!(matches!(
            unpack(&[0xc1], DecoderOptions::default()),
            Err(CliError::Decode(DecodeError::UnknownTag { .. }))
        ));
        assert!(matches!(
            unpack(&[0xc4, 0x00], DecoderOptions::default()),
            Err(CliError::Bridge(BridgeError::Unsupported("bin")))
        ));
        let strict = DecoderOptions::new().trailing(TrailingPolicy::Reject);
        assert!(matches!(
            unpack(&[0xc0, 0xc0], strict),
            Err(CliError::Decode(DecodeError::TrailingBytes { .. }))
        ));
    }
}
