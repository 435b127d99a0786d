/// Define a plain chain struct whose wire and JSON forms list its fields in
/// declaration order.
///
/// Generates the struct plus [`Encode`](crate::Encode),
/// [`Decode`](crate::Decode) and [`JsonField`](crate::JsonField) impls. Field
/// coercion failures are reported with the field name.
#[macro_export]
macro_rules! chain_struct {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* pub $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $crate::Encode for $name {
            fn encode(&self, writer: &mut $crate::__private::WireWriter) {
                $( $crate::Encode::encode(&self.$field, writer); )*
            }
        }

        impl $crate::Decode for $name {
            fn decode(
                reader: &mut $crate::__private::WireReader<'_>,
            ) -> ::std::result::Result<Self, $crate::TypesError> {
                Ok($name {
                    $( $field: <$ty as $crate::Decode>::decode(reader)?, )*
                })
            }
        }

        impl $crate::JsonField for $name {
            fn to_json(&self) -> $crate::__private::Value {
                let mut map = $crate::__private::Map::new();
                $(
                    map.insert(
                        stringify!($field).to_string(),
                        $crate::JsonField::to_json(&self.$field),
                    );
                )*
                $crate::__private::Value::Object(map)
            }

            fn from_json(
                value: &$crate::__private::Value,
            ) -> ::std::result::Result<Self, $crate::TypesError> {
                let map = $crate::json::as_object(value, stringify!($name))?;
                Ok($name {
                    $( $field: $crate::json::nested::<$ty>(map, stringify!($field))?, )*
                })
            }
        }
    };
}
