use mpack::{decode, encode, BridgeError, Text, Value};
use serde_json::json;

#[test]
fn json_roundtrips_through_msgpack() {
    let cases = vec![
        json!(null),
        json!(true),
        json!(123),
        json!(-4_807_526_976i64),
        json!(18_446_744_073_709_551_615u64),
        json!(3.25),
        json!("hello"),
        json!([1, 2, 3]),
        json!({"a": 1, "b": [true, null, "x"]}),
        json!({"z": 1, "y": {"x": [], "w": {}}, "a": "last"}),
    ];
    for case in cases {
        let bytes = encode(&Value::from(case.clone())).unwrap();
        let back = serde_json::Value::try_from(decode(&bytes).unwrap()).unwrap();
        assert_eq!(back, case);
    }
}

#[test]
fn object_key_order_is_preserved() {
    let json = json!({"zeta": 1, "alpha": 2, "mid": 3});
    let value = Value::from(json);
    let keys: Vec<_> = value
        .as_map()
        .unwrap()
        .iter()
        .map(|(k, _)| k.as_str().unwrap())
        .collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);

    let back = serde_json::Value::try_from(value).unwrap();
    let keys: Vec<_> = back.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);
}

#[test]
fn unsupported_values_fail_explicitly() {
    let cases = [
        (Value::Binary(vec![1]), BridgeError::Unsupported("bin")),
        (
            Value::Extension(1, vec![]),
            BridgeError::Unsupported("ext"),
        ),
        (
            Value::Map(vec![(Value::Int(1), Value::Nil)]),
            BridgeError::NonStringKey("int"),
        ),
        (
            Value::String(Text::from_bytes(vec![0xff])),
            BridgeError::InvalidUtf8,
        ),
        (Value::Float64(f64::NAN), BridgeError::NonFiniteFloat),
        (
            Value::Map(vec![
                (Value::from("k"), Value::Int(1)),
                (Value::from("k"), Value::Int(2)),
            ]),
            BridgeError::DuplicateKey("k".into()),
        ),
        (
            Value::Array(vec![Value::Nil, Value::Binary(vec![])]),
            BridgeError::Unsupported("bin"),
        ),
    ];
    for (value, expected) in cases {
        assert_eq!(serde_json::Value::try_from(value), Err(expected));
    }
}
