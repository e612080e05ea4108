//! Bridge between [`serde_json::Value`] and [`Value`].
//!
//! JSON → MessagePack is total. MessagePack → JSON fails explicitly for
//! anything JSON cannot carry instead of coercing it. Object key order is kept
//! in both directions (`serde_json` is built with `preserve_order`).

use serde_json::{Map, Number};

use crate::error::BridgeError;
use crate::value::Value;

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => number_to_value(&n),
            serde_json::Value::String(s) => Value::from(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(object) => Value::Map(
                object
                    .into_iter()
                    .map(|(k, v)| (Value::from(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

fn number_to_value(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else if let Some(u) = n.as_u64() {
        Value::UInt(u)
    } else {
        // Without arbitrary_precision every non-integer Number is an f64.
        Value::Float64(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl TryFrom<Value> for serde_json::Value {
    type Error = BridgeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let json = match value {
            Value::Nil => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::from(i),
            Value::UInt(u) => serde_json::Value::from(u),
            Value::Float32(f) => float_to_json(f64::from(f))?,
            Value::Float64(f) => float_to_json(f)?,
            Value::String(text) => {
                serde_json::Value::String(text.into_string().map_err(|_| BridgeError::InvalidUtf8)?)
            }
            Value::Array(items) => serde_json::Value::Array(
                items
                    .into_iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Map(pairs) => {
                let mut object = Map::with_capacity(pairs.len());
                for (key, value) in pairs {
                    let key = match key {
                        Value::String(text) => {
                            text.into_string().map_err(|_| BridgeError::InvalidUtf8)?
                        }
                        other => return Err(BridgeError::NonStringKey(other.type_name())),
                    };
                    if object.contains_key(&key) {
                        return Err(BridgeError::DuplicateKey(key));
                    }
                    object.insert(key, serde_json::Value::try_from(value)?);
                }
                serde_json::Value::Object(object)
            }
            Value::Binary(_) => return Err(BridgeError::Unsupported("bin")),
            Value::Extension(..) => return Err(BridgeError::Unsupported("ext")),
        };
        Ok(json)
    }
}

fn float_to_json(f: f64) -> Result<serde_json::Value, BridgeError> {
    Number::from_f64(f)
        .map(serde_json::Value::Number)
        .ok_or(BridgeError::NonFiniteFloat)
}
