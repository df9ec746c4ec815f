use serde::{Deserialize, Serialize};
use std::fmt;
use tagmap_types::{MapStr, Value};

/// The declared kind of a record field, which selects its coercion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Bool,
    Int(IntWidth),
    Float(FloatWidth),
    Text,
    /// A nested [`MapStr`].
    Map,
    /// An open [`Value`] slot that accepts anything.
    Open,
    /// No coercion rule exists; population leaves the field alone.
    Unsupported,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Bool => f.write_str("bool"),
            FieldKind::Int(width) => f.write_str(width.name()),
            FieldKind::Float(width) => f.write_str(width.name()),
            FieldKind::Text => f.write_str("text"),
            FieldKind::Map => f.write_str("map"),
            FieldKind::Open => f.write_str("open"),
            FieldKind::Unsupported => f.write_str("unsupported"),
        }
    }
}

/// Integer representations a field can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl IntWidth {
    pub fn name(self) -> &'static str {
        match self {
            IntWidth::I8 => "i8",
            IntWidth::I16 => "i16",
            IntWidth::I32 => "i32",
            IntWidth::I64 => "i64",
            IntWidth::Isize => "isize",
            IntWidth::U8 => "u8",
            IntWidth::U16 => "u16",
            IntWidth::U32 => "u32",
            IntWidth::U64 => "u64",
            IntWidth::Usize => "usize",
        }
    }

    /// Narrows an `i64` to this width, wrapping like an `as` cast.
    pub fn narrow(self, n: i64) -> Value {
        match self {
            IntWidth::I8 => Value::I8(n as i8),
            IntWidth::I16 => Value::I16(n as i16),
            IntWidth::I32 => Value::I32(n as i32),
            IntWidth::I64 => Value::I64(n),
            IntWidth::Isize => Value::Isize(n as isize),
            IntWidth::U8 => Value::U8(n as u8),
            IntWidth::U16 => Value::U16(n as u16),
            IntWidth::U32 => Value::U32(n as u32),
            IntWidth::U64 => Value::U64(n as u64),
            IntWidth::Usize => Value::Usize(n as usize),
        }
    }
}

/// Floating-point representations a field can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatWidth {
    F32,
    F64,
}

impl FloatWidth {
    pub fn name(self) -> &'static str {
        match self {
            FloatWidth::F32 => "f32",
            FloatWidth::F64 => "f64",
        }
    }

    pub fn narrow(self, n: f64) -> Value {
        match self {
            FloatWidth::F32 => Value::F32(n as f32),
            FloatWidth::F64 => Value::F64(n),
        }
    }
}

/// Conversion between a Rust field type and [`Value`].
///
/// `to_value` is the projection side and always succeeds. `from_value`
/// receives a value already coerced to [`FieldValue::KIND`], so implementations
/// only match their own variant. Types without a coercion rule keep the
/// defaults and project as [`Value::Opaque`] or similar.
pub trait FieldValue: Sized {
    const KIND: FieldKind = FieldKind::Unsupported;

    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Option<Self> {
        let _ = value;
        None
    }
}

macro_rules! impl_field_value {
    ($($ty:ty => $variant:ident, $kind:expr;)*) => {
        $(
            impl FieldValue for $ty {
                const KIND: FieldKind = $kind;

                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_field_value! {
    bool => Bool, FieldKind::Bool;
    i8 => I8, FieldKind::Int(IntWidth::I8);
    i16 => I16, FieldKind::Int(IntWidth::I16);
    i32 => I32, FieldKind::Int(IntWidth::I32);
    i64 => I64, FieldKind::Int(IntWidth::I64);
    isize => Isize, FieldKind::Int(IntWidth::Isize);
    u8 => U8, FieldKind::Int(IntWidth::U8);
    u16 => U16, FieldKind::Int(IntWidth::U16);
    u32 => U32, FieldKind::Int(IntWidth::U32);
    u64 => U64, FieldKind::Int(IntWidth::U64);
    usize => Usize, FieldKind::Int(IntWidth::Usize);
    f32 => F32, FieldKind::Float(FloatWidth::F32);
    f64 => F64, FieldKind::Float(FloatWidth::F64);
    String => String, FieldKind::Text;
    MapStr => Map, FieldKind::Map;
}

impl FieldValue for Value {
    const KIND: FieldKind = FieldKind::Open;

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

/// Collections have no coercion rule; they project opaquely and are never
/// populated.
impl<T: Clone + PartialEq + Send + Sync + 'static> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::opaque(self.clone())
    }
}

type Getter<R> = Box<dyn Fn(&R) -> Value + Send + Sync>;
type Setter<R> = Box<dyn Fn(&mut R, Value) -> bool + Send + Sync>;

/// Descriptor for one field of a record type.
pub struct Field<R> {
    name: &'static str,
    directive: Option<&'static str>,
    kind: FieldKind,
    get: Getter<R>,
    set: Option<Setter<R>>,
}

impl<R> Field<R> {
    /// The Rust field identifier.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The raw directive, or `None` for an untagged field.
    pub fn directive(&self) -> Option<&'static str> {
        self.directive
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// False for read-only fields registered without a setter.
    pub fn is_settable(&self) -> bool {
        self.set.is_some()
    }

    /// Reads the field in its native shape.
    pub fn get(&self, record: &R) -> Value {
        (self.get)(record)
    }

    /// Writes a value already coerced to [`Field::kind`]. Returns false when
    /// the field is read-only or the value has the wrong shape.
    pub fn set(&self, record: &mut R, value: Value) -> bool {
        match &self.set {
            Some(set) => set(record, value),
            None => false,
        }
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("directive", &self.directive)
            .field("kind", &self.kind)
            .field("settable", &self.is_settable())
            .finish()
    }
}

/// The ordered field table of a record type.
#[derive(Debug)]
pub struct Fields<R> {
    fields: Vec<Field<R>>,
}

impl<R: 'static> Fields<R> {
    pub fn builder() -> FieldsBuilder<R> {
        FieldsBuilder { fields: Vec::new() }
    }
}

impl<R> Fields<R> {
    /// Fields in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field<R>> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up a field by its Rust identifier.
    pub fn get(&self, name: &str) -> Option<&Field<R>> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl<'a, R> IntoIterator for &'a Fields<R> {
    type Item = &'a Field<R>;
    type IntoIter = std::slice::Iter<'a, Field<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Registers fields in declaration order.
pub struct FieldsBuilder<R> {
    fields: Vec<Field<R>>,
}

impl<R: 'static> FieldsBuilder<R> {
    /// Registers a readable and writable field.
    pub fn field<T, G, M>(
        mut self,
        name: &'static str,
        directive: Option<&'static str>,
        get: G,
        get_mut: M,
    ) -> Self
    where
        T: FieldValue + 'static,
        G: Fn(&R) -> &T + Send + Sync + 'static,
        M: Fn(&mut R) -> &mut T + Send + Sync + 'static,
    {
        self.fields.push(Field {
            name,
            directive,
            kind: T::KIND,
            get: Box::new(move |record: &R| get(record).to_value()),
            set: Some(Box::new(move |record: &mut R, value: Value| {
                match T::from_value(value) {
                    Some(v) => {
                        *get_mut(record) = v;
                        true
                    }
                    None => false,
                }
            })),
        });
        self
    }

    /// Registers a field that projects but can never be assigned.
    pub fn read_only<T, G>(mut self, name: &'static str, directive: Option<&'static str>, get: G) -> Self
    where
        T: FieldValue + 'static,
        G: Fn(&R) -> &T + Send + Sync + 'static,
    {
        self.fields.push(Field {
            name,
            directive,
            kind: T::KIND,
            get: Box::new(move |record: &R| get(record).to_value()),
            set: None,
        });
        self
    }

    pub fn build(self) -> Fields<R> {
        Fields {
            fields: self.fields,
        }
    }
}
