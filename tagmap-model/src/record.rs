use crate::{Fields, Population};
use tagmap_types::MapStr;

/// A type whose fields can be projected to and populated from a [`MapStr`].
///
/// Implementations return a fresh field table on every call. Most types use
/// [`impl_record!`](crate::impl_record) instead of writing this by hand.
pub trait Record: Sized + 'static {
    /// The field table, in declaration order.
    fn fields() -> Fields<Self>;

    /// Raw directives of every tagged field. See [`crate::extract_tags`].
    fn tags() -> Vec<&'static str> {
        crate::extract_tags::<Self>()
    }

    /// Projects this record. See [`crate::to_map`].
    fn to_map(&self) -> MapStr {
        crate::to_map(self)
    }

    /// Populates this record in place. See [`crate::from_map`].
    fn apply_map(&mut self, values: &MapStr) -> Population {
        crate::from_map(self, values)
    }
}

/// Implements [`Record`] for a struct from a field list.
///
/// Each entry is `field: Type`, optionally followed by `=> "directive"`.
/// Entries without a directive are registered but invisible to every
/// conversion. Prefix an entry with `#[read_only]` to register it without a
/// setter.
///
/// ```
/// use tagmap_model::{impl_record, Record};
///
/// #[derive(Default)]
/// struct Host {
///     id: i64,
///     name: String,
///     created: String,
///     scratch: u32,
/// }
///
/// impl_record!(Host {
///     id: i64 => "bk_host_id",
///     name: String => "bk_host_name",
///     #[read_only]
///     created: String => "create_time,ignoretostruct",
///     scratch: u32,
/// });
///
/// assert_eq!(
///     Host::tags(),
///     vec!["bk_host_id", "bk_host_name", "create_time,ignoretostruct"]
/// );
/// ```
#[macro_export]
macro_rules! impl_record {
    (@fields $builder:expr;) => {
        $builder.build()
    };
    (@fields $builder:expr; #[read_only] $field:ident : $ty:ty $(=> $directive:literal)? $(, $($rest:tt)*)?) => {
        $crate::impl_record!(
            @fields $builder.read_only::<$ty, _>(
                stringify!($field),
                $crate::impl_record!(@directive $($directive)?),
                |r| &r.$field,
            );
            $($($rest)*)?
        )
    };
    (@fields $builder:expr; $field:ident : $ty:ty $(=> $directive:literal)? $(, $($rest:tt)*)?) => {
        $crate::impl_record!(
            @fields $builder.field::<$ty, _, _>(
                stringify!($field),
                $crate::impl_record!(@directive $($directive)?),
                |r| &r.$field,
                |r| &mut r.$field,
            );
            $($($rest)*)?
        )
    };
    (@directive) => {
        ::core::option::Option::None
    };
    (@directive $directive:literal) => {
        ::core::option::Option::Some($directive)
    };
    ($record:ty { $($body:tt)* }) => {
        impl $crate::Record for $record {
            fn fields() -> $crate::Fields<Self> {
                $crate::impl_record!(@fields $crate::Fields::<Self>::builder(); $($body)*)
            }
        }
    };
}
