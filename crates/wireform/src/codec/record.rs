//! Auto-derived record bindings.
//!
//! [`record!`](crate::record) declares a struct together with its
//! [`Decode`](crate::Decode) and [`Encode`](crate::Encode) impls: each
//! field reads from and writes to the wire key of the same name (or the
//! `as "wireKey"` rename), in declaration order. Optional fields are
//! declared as `Option<T>`; sequences as `Vec<T>`; nested records by
//! naming another `record!` type. Wire keys the record does not declare
//! are ignored on decode.

/// Declares a record type with auto-derived wire bindings.
///
/// ```rust
/// wireform::record! {
///     pub struct BodyShape {
///         weight: String,
///         height: String,
///     }
/// }
///
/// wireform::record! {
///     pub struct Friend {
///         id: String,
///         name: String,
///         email: Option<String>,
///         body_shape as "bodyShape": Option<BodyShape>,
///     }
/// }
///
/// let friend: Friend =
///     wireform::from_json(br#"{"id":"3","name":"Merry","email":"m@x.io"}"#).unwrap();
/// assert_eq!(friend.name, "Merry");
/// assert_eq!(friend.body_shape, None);
/// ```
///
/// Generated records derive `Debug`, `Clone`, and `PartialEq`, and also
/// implement [`FieldCodec`](crate::FieldCodec) so they can appear as
/// required or optional fields of other records.
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident $(as $key:literal)? : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $( $(#[$field_meta])* $field_vis $field: $ty, )*
        }

        impl $crate::Decode for $name {
            fn decode(
                value: &$crate::Value,
                path: &$crate::Path<'_>,
            ) -> ::std::result::Result<Self, $crate::DecodeError> {
                let map = $crate::MapAccessor::bind(value, *path)?;
                ::std::result::Result::Ok(Self {
                    $(
                        $field: <$ty as $crate::FieldCodec>::decode_field(
                            &map,
                            $crate::record!(@key $field $(, $key)?),
                        )?,
                    )*
                })
            }
        }

        impl $crate::Encode for $name {
            fn encode(&self) -> ::std::result::Result<$crate::Value, $crate::EncodeError> {
                let mut map = $crate::MapBuilder::new();
                $(
                    <$ty as $crate::FieldCodec>::encode_field(
                        &self.$field,
                        &mut map,
                        $crate::record!(@key $field $(, $key)?),
                    )?;
                )*
                ::std::result::Result::Ok(map.build())
            }
        }

        impl $crate::FieldCodec for $name {
            fn decode_field(
                map: &$crate::MapAccessor<'_, '_>,
                key: &str,
            ) -> ::std::result::Result<Self, $crate::DecodeError> {
                map.required(key)
            }
            fn encode_field(
                &self,
                map: &mut $crate::MapBuilder,
                key: &str,
            ) -> ::std::result::Result<(), $crate::EncodeError> {
                map.field(key, self)
            }
        }
    };

    (@key $field:ident) => {
        stringify!($field)
    };
    (@key $field:ident, $key:literal) => {
        $key
    };
}

#[cfg(test)]
mod tests {
    use crate::error::DecodeError;
    use crate::{decode_value, encode_value, from_json, to_json, parse};

    crate::record! {
        struct BodyShape {
            weight: String,
            height: String,
        }
    }

    crate::record! {
        struct Friend {
            id: String,
            name: String,
            email: Option<String>,
            body_shape as "bodyShape": Option<BodyShape>,
        }
    }

    fn merry() -> Friend {
        Friend {
            id: "3".to_string(),
            name: "Merry".to_string(),
            email: Some("Merry1234@gmail.com".to_string()),
            body_shape: None,
        }
    }

    #[test]
    fn test_decode_with_rename_and_optionals() {
        let friend: Friend = from_json(
            br#"{"id":"2","name":"John","bodyShape":{"weight":"100","height":"1000"}}"#,
        )
        .unwrap();
        assert_eq!(friend.email, None);
        assert_eq!(
            friend.body_shape,
            Some(BodyShape {
                weight: "100".to_string(),
                height: "1000".to_string(),
            })
        );
    }

    #[test]
    fn test_round_trip() {
        let friend = merry();
        let value = encode_value(&friend).unwrap();
        assert_eq!(decode_value::<Friend>(&value).unwrap(), friend);
    }

    #[test]
    fn test_absent_optional_omits_key() {
        let bytes = to_json(&merry()).unwrap();
        let value = parse(&bytes).unwrap();
        assert!(value.get("bodyShape").is_none());
        assert!(value.get("email").is_some());
    }

    #[test]
    fn test_missing_required_field_path() {
        let err = from_json::<BodyShape>(br#"{"weight":"100"}"#).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingKey {
                path: "$.height".to_string()
            }
            .into()
        );
    }

    #[test]
    fn test_nested_error_path() {
        let value = parse(br#"{"id":"2","name":"John","bodyShape":{"weight":42}}"#).unwrap();
        let err = decode_value::<Friend>(&value).unwrap_err();
        assert!(
            matches!(err, DecodeError::TypeMismatch { ref path, .. } if path == "$.bodyShape.weight")
        );
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let friend: Friend =
            from_json(br#"{"id":"3","name":"Merry","species":"hobbit","age":36}"#).unwrap();
        assert_eq!(friend.name, "Merry");
    }

    #[test]
    fn test_fields_encode_in_declaration_order() {
        let bytes = to_json(&merry()).unwrap();
        assert_eq!(
            bytes,
            br#"{"id":"3","name":"Merry","email":"Merry1234@gmail.com"}"#
        );
    }
}
