//! The [`Value`] sum type stored in every [`MapStr`] slot.

use crate::MapStr;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A dynamically-typed value.
///
/// Numeric variants keep the native width of whatever produced them, so a
/// record field declared `u16` projects as [`Value::U16`] and a number decoded
/// from JSON arrives as [`Value::I64`], [`Value::U64`] or [`Value::F64`].
/// Consumers that need a particular width go through [`Value::as_i64`] /
/// [`Value::as_f64`] rather than matching a single variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Explicit null marker. Population treats it the same as an absent key.
    #[default]
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    String(String),
    /// A nested dynamic map.
    Map(MapStr),
    /// A reference to another value. Open record fields take the target,
    /// one level deep.
    Ref(Box<Value>),
    /// A native value of a type with no conversion rule.
    Opaque(Opaque),
}

impl Value {
    /// Wraps `value` in a [`Value::Ref`].
    pub fn reference(value: impl Into<Value>) -> Self {
        Value::Ref(Box::new(value.into()))
    }

    /// Stores an arbitrary native value as [`Value::Opaque`].
    pub fn opaque<T: Any + PartialEq + Send + Sync>(value: T) -> Self {
        Value::Opaque(Opaque::new(value))
    }

    /// Short, stable name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::Isize(_) => "isize",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::Usize(_) => "usize",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::String(_) => "string",
            Value::Map(_) => "map",
            Value::Ref(_) => "ref",
            Value::Opaque(_) => "opaque",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for every integer and float variant.
    pub fn is_number(&self) -> bool {
        self.as_f64().is_some()
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapStr> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Converts any numeric variant to `i64`.
    ///
    /// Floats truncate toward zero and saturate at the `i64` bounds (NaN
    /// becomes 0). Unsigned values above `i64::MAX` wrap into the negative
    /// range, so a later cast back to `u64` restores them. Non-numeric
    /// variants return `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::I8(n) => Some(i64::from(n)),
            Value::I16(n) => Some(i64::from(n)),
            Value::I32(n) => Some(i64::from(n)),
            Value::I64(n) => Some(n),
            Value::Isize(n) => Some(n as i64),
            Value::U8(n) => Some(i64::from(n)),
            Value::U16(n) => Some(i64::from(n)),
            Value::U32(n) => Some(i64::from(n)),
            Value::U64(n) => Some(n as i64),
            Value::Usize(n) => Some(n as i64),
            Value::F32(n) => Some(n as i64),
            Value::F64(n) => Some(n as i64),
            _ => None,
        }
    }

    /// Converts any numeric variant to `f64`. Non-numeric variants return `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::I8(n) => Some(f64::from(n)),
            Value::I16(n) => Some(f64::from(n)),
            Value::I32(n) => Some(f64::from(n)),
            Value::I64(n) => Some(n as f64),
            Value::Isize(n) => Some(n as f64),
            Value::U8(n) => Some(f64::from(n)),
            Value::U16(n) => Some(f64::from(n)),
            Value::U32(n) => Some(f64::from(n)),
            Value::U64(n) => Some(n as f64),
            Value::Usize(n) => Some(n as f64),
            Value::F32(n) => Some(f64::from(n)),
            Value::F64(n) => Some(n),
            _ => None,
        }
    }

    /// Follows a [`Value::Ref`] one level. Any other value is returned unchanged.
    pub fn deref_once(self) -> Value {
        match self {
            Value::Ref(inner) => *inner,
            other => other,
        }
    }

    /// Renders the value as JSON.
    ///
    /// References are followed, non-finite floats and opaque values become
    /// `null` (except opaque JSON carried over from [`Value::from`]).
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::I8(n) => Json::from(*n),
            Value::I16(n) => Json::from(*n),
            Value::I32(n) => Json::from(*n),
            Value::I64(n) => Json::from(*n),
            Value::Isize(n) => Json::from(*n),
            Value::U8(n) => Json::from(*n),
            Value::U16(n) => Json::from(*n),
            Value::U32(n) => Json::from(*n),
            Value::U64(n) => Json::from(*n),
            Value::Usize(n) => Json::from(*n),
            Value::F32(n) => Json::from(f64::from(*n)),
            Value::F64(n) => Json::from(*n),
            Value::String(s) => Json::String(s.clone()),
            Value::Map(m) => m.to_json(),
            Value::Ref(inner) => inner.to_json(),
            Value::Opaque(o) => o.downcast_ref::<Json>().cloned().unwrap_or(Json::Null),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_primitive! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
    MapStr => Map,
    Opaque => Opaque,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// JSON numbers become `I64` when they fit, then `U64`, then `F64`.
/// Arrays have no counterpart and are carried as opaque JSON.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::I64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::U64(u)
                } else {
                    n.as_f64().map_or(Value::Null, Value::F64)
                }
            }
            Json::String(s) => Value::String(s),
            array @ Json::Array(_) => Value::opaque(array),
            Json::Object(object) => Value::Map(object.into_iter().collect()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::I8(n) => serializer.serialize_i8(*n),
            Value::I16(n) => serializer.serialize_i16(*n),
            Value::I32(n) => serializer.serialize_i32(*n),
            Value::I64(n) => serializer.serialize_i64(*n),
            Value::Isize(n) => serializer.serialize_i64(*n as i64),
            Value::U8(n) => serializer.serialize_u8(*n),
            Value::U16(n) => serializer.serialize_u16(*n),
            Value::U32(n) => serializer.serialize_u32(*n),
            Value::U64(n) => serializer.serialize_u64(*n),
            Value::Usize(n) => serializer.serialize_u64(*n as u64),
            Value::F32(n) => serializer.serialize_f32(*n),
            Value::F64(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Map(m) => m.serialize(serializer),
            Value::Ref(inner) => inner.serialize(serializer),
            Value::Opaque(o) => match o.downcast_ref::<serde_json::Value>() {
                Some(json) => json.serialize(serializer),
                None => serializer.serialize_unit(),
            },
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a null, boolean, number, string, sequence or map")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::I64(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(i64::try_from(v).map_or(Value::U64(v), Value::I64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::F64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element::<serde_json::Value>()? {
            items.push(item);
        }
        Ok(Value::opaque(serde_json::Value::Array(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = MapStr::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.set(key, value);
        }
        Ok(Value::Map(map))
    }
}

/// A native value carried through a [`MapStr`] without conversion.
///
/// Cloning shares the underlying allocation. Two opaque values are equal when
/// they hold the same type and the wrapped values compare equal.
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
    eq: fn(&(dyn Any + Send + Sync), &(dyn Any + Send + Sync)) -> bool,
}

fn eq_as<T: Any + PartialEq>(a: &(dyn Any + Send + Sync), b: &(dyn Any + Send + Sync)) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

impl Opaque {
    pub fn new<T: Any + PartialEq + Send + Sync>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            inner: Arc::new(value),
            eq: eq_as::<T>,
        }
    }

    /// The Rust type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || (self.eq)(&*self.inner, &*other.inner)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.downcast_ref::<serde_json::Value>() {
            Some(json) => f.debug_tuple("Opaque").field(json).finish(),
            None => f.debug_tuple("Opaque").field(&self.type_name).finish(),
        }
    }
}
