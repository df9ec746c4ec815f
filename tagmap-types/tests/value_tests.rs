use pretty_assertions::assert_eq;
use serde_json::json;
use tagmap_types::{MapStr, Opaque, Value};

// ── Variant names ────────────────────────────────────────────────

#[test]
fn kind_names_are_stable() {
    assert_eq!(Value::Null.kind_name(), "null");
    assert_eq!(Value::Bool(true).kind_name(), "bool");
    assert_eq!(Value::I8(1).kind_name(), "i8");
    assert_eq!(Value::U64(1).kind_name(), "u64");
    assert_eq!(Value::F32(1.0).kind_name(), "f32");
    assert_eq!(Value::from("x").kind_name(), "string");
    assert_eq!(Value::Map(MapStr::new()).kind_name(), "map");
    assert_eq!(Value::reference(1i32).kind_name(), "ref");
    assert_eq!(Value::opaque(vec![1u8]).kind_name(), "opaque");
}

#[test]
fn default_is_null() {
    assert!(Value::default().is_null());
}

// ── Numeric conversion ───────────────────────────────────────────

#[test]
fn as_i64_accepts_every_integer_width() {
    assert_eq!(Value::I8(-8).as_i64(), Some(-8));
    assert_eq!(Value::I16(-16).as_i64(), Some(-16));
    assert_eq!(Value::I32(-32).as_i64(), Some(-32));
    assert_eq!(Value::Isize(-1).as_i64(), Some(-1));
    assert_eq!(Value::U8(8).as_i64(), Some(8));
    assert_eq!(Value::U16(16).as_i64(), Some(16));
    assert_eq!(Value::U32(32).as_i64(), Some(32));
    assert_eq!(Value::Usize(7).as_i64(), Some(7));
}

#[test]
fn as_i64_truncates_floats() {
    assert_eq!(Value::F64(12.0).as_i64(), Some(12));
    assert_eq!(Value::F64(12.99).as_i64(), Some(12));
    assert_eq!(Value::F64(-12.99).as_i64(), Some(-12));
    assert_eq!(Value::F32(3.5).as_i64(), Some(3));
}

#[test]
fn as_i64_saturates_out_of_range_floats() {
    assert_eq!(Value::F64(1e20).as_i64(), Some(i64::MAX));
    assert_eq!(Value::F64(-1e20).as_i64(), Some(i64::MIN));
    assert_eq!(Value::F64(f64::NAN).as_i64(), Some(0));
}

#[test]
fn as_i64_wraps_large_unsigned() {
    assert_eq!(Value::U64(u64::MAX).as_i64(), Some(-1));
}

#[test]
fn as_f64_accepts_every_numeric_variant() {
    assert_eq!(Value::I8(-2).as_f64(), Some(-2.0));
    assert_eq!(Value::U32(40).as_f64(), Some(40.0));
    assert_eq!(Value::F32(0.25).as_f64(), Some(0.25));
    assert_eq!(Value::F64(1.5).as_f64(), Some(1.5));
}

#[test]
fn non_numeric_values_do_not_convert() {
    for v in [
        Value::Null,
        Value::Bool(true),
        Value::from("12"),
        Value::Map(MapStr::new()),
        Value::reference(12i64),
    ] {
        assert_eq!(v.as_i64(), None, "{v:?}");
        assert_eq!(v.as_f64(), None, "{v:?}");
        assert!(!v.is_number());
    }
}

// ── Accessors ────────────────────────────────────────────────────

#[test]
fn typed_accessors_match_only_their_variant() {
    assert_eq!(Value::Bool(false).as_bool(), Some(false));
    assert_eq!(Value::I64(0).as_bool(), None);
    assert_eq!(Value::from("abc").as_str(), Some("abc"));
    assert_eq!(Value::I64(0).as_str(), None);
    assert!(Value::Map(MapStr::new()).as_map().is_some());
    assert!(Value::Null.as_map().is_none());
}

#[test]
fn deref_once_follows_one_level() {
    let twice = Value::reference(Value::reference("x"));
    let once = twice.deref_once();
    assert_eq!(once, Value::reference("x"));
    assert_eq!(once.deref_once(), Value::from("x"));
    assert_eq!(Value::I32(4).deref_once(), Value::I32(4));
}

#[test]
fn option_converts_to_null_or_value() {
    assert_eq!(Value::from(None::<i32>), Value::Null);
    assert_eq!(Value::from(Some(5u16)), Value::U16(5));
}

// ── JSON bridging ────────────────────────────────────────────────

#[test]
fn json_numbers_pick_narrowest_fit() {
    assert_eq!(Value::from(json!(12)), Value::I64(12));
    assert_eq!(Value::from(json!(-3)), Value::I64(-3));
    assert_eq!(Value::from(json!(u64::MAX)), Value::U64(u64::MAX));
    assert_eq!(Value::from(json!(12.5)), Value::F64(12.5));
}

#[test]
fn json_object_becomes_ordered_map() {
    let v = Value::from(json!({"z": 1, "a": "two", "m": null}));
    let map = v.as_map().unwrap();
    let keys: Vec<_> = map.keys().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
    assert_eq!(map.get("m"), Some(&Value::Null));
}

#[test]
fn json_array_is_carried_opaquely() {
    let v = Value::from(json!([1, 2, 3]));
    match &v {
        Value::Opaque(o) => {
            assert_eq!(o.downcast_ref::<serde_json::Value>(), Some(&json!([1, 2, 3])));
        }
        other => panic!("expected opaque, got {other:?}"),
    }
    assert_eq!(v.to_json(), json!([1, 2, 3]));
}

#[test]
fn to_json_renders_native_shapes() {
    assert_eq!(Value::U8(3).to_json(), json!(3));
    assert_eq!(Value::F32(0.5).to_json(), json!(0.5));
    assert_eq!(Value::F64(f64::NAN).to_json(), json!(null));
    assert_eq!(Value::reference(true).to_json(), json!(true));
    assert_eq!(Value::opaque(vec![1u8, 2]).to_json(), json!(null));
}

#[test]
fn serialize_matches_to_json() {
    let mut map = MapStr::new();
    map.set("n", 7u32);
    map.set("s", "x");
    map.set("r", Value::reference(1.5f64));
    let v = Value::Map(map);
    assert_eq!(serde_json::to_value(&v).unwrap(), v.to_json());
}

#[test]
fn deserialize_from_json_text() {
    let v: Value = serde_json::from_str(r#"{"a": 1, "b": [true], "c": null, "d": 2.5}"#).unwrap();
    let map = v.as_map().unwrap();
    assert_eq!(map.get("a"), Some(&Value::I64(1)));
    assert_eq!(map.get("b"), Some(&Value::from(json!([true]))));
    assert_eq!(map.get("c"), Some(&Value::Null));
    assert_eq!(map.get("d"), Some(&Value::F64(2.5)));
}

// ── Opaque ───────────────────────────────────────────────────────

#[test]
fn opaque_clones_are_equal() {
    let a = Opaque::new(vec!["x".to_string()]);
    let b = a.clone();
    assert_eq!(a, b);
    assert_eq!(a.downcast_ref::<Vec<String>>().unwrap()[0], "x");
}

#[test]
fn separately_wrapped_equal_values_are_equal() {
    let a = Opaque::new(vec![1u8]);
    let b = Opaque::new(vec![1u8]);
    assert_eq!(a, b);
    assert_eq!(Value::opaque(vec![1u8]), Value::opaque(vec![1u8]));
}

#[test]
fn opaque_compares_by_value_and_type() {
    assert_ne!(Opaque::new(vec![1u8]), Opaque::new(vec![2u8]));
    assert_ne!(Opaque::new(1u32), Opaque::new(1u64));
}

#[test]
fn opaque_reports_type_name() {
    let o = Opaque::new(42u128);
    assert_eq!(o.type_name(), "u128");
    assert!(o.downcast_ref::<u64>().is_none());
}
