//! Shared record fixtures for mapper tests.

#![allow(dead_code)]

use tagmap_model::impl_record;
use tagmap_types::{MapStr, Value};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One field of every primitive kind, all tagged without options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Primitives {
    pub flag: bool,
    pub small: i8,
    pub short: i16,
    pub int: i32,
    pub long: i64,
    pub word: isize,
    pub byte: u8,
    pub ushort: u16,
    pub uint: u32,
    pub ulong: u64,
    pub uword: usize,
    pub single: f32,
    pub double: f64,
    pub text: String,
}

impl_record!(Primitives {
    flag: bool => "flag",
    small: i8 => "small",
    short: i16 => "short",
    int: i32 => "int",
    long: i64 => "long",
    word: isize => "word",
    byte: u8 => "byte",
    ushort: u16 => "ushort",
    uint: u32 => "uint",
    ulong: u64 => "ulong",
    uword: usize => "uword",
    single: f32 => "single",
    double: f64 => "double",
    text: String => "text",
});

/// Integer keys of [`Primitives`].
pub const INT_KEYS: [&str; 10] = [
    "small", "short", "int", "long", "word", "byte", "ushort", "uint", "ulong", "uword",
];

/// A host record mixing options, open fields and untagged state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Host {
    pub id: i64,
    pub name: String,
    pub inner_ip: String,
    pub cloud_id: u32,
    pub attrs: MapStr,
    pub extra: Value,
    pub labels: Vec<String>,
    pub disabled: String,
    pub cache_hits: u64,
    pub created: String,
}

impl_record!(Host {
    id: i64 => "bk_host_id",
    name: String => "bk_host_name",
    inner_ip: String => "bk_host_innerip,ignoretomap",
    cloud_id: u32 => "bk_cloud_id,ignoretostruct",
    attrs: MapStr => "attrs",
    extra: Value => "extra",
    labels: Vec<String> => "labels",
    disabled: String => "",
    cache_hits: u64,
    #[read_only]
    created: String => "create_time",
});

pub fn sample_host() -> Host {
    let mut attrs = MapStr::new();
    attrs.set("os", "linux");
    Host {
        id: 7,
        name: "web-1".into(),
        inner_ip: "10.0.0.7".into(),
        cloud_id: 3,
        attrs,
        extra: Value::from("note"),
        labels: vec!["edge".into()],
        disabled: "off".into(),
        cache_hits: 99,
        created: "2018-01-01".into(),
    }
}

/// A record with no tagged fields.
#[derive(Debug, Default, PartialEq)]
pub struct Scratch {
    pub a: u8,
    pub b: String,
}

impl_record!(Scratch {
    a: u8,
    b: String
});
