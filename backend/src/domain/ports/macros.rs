//! Helper macro for generating upstream port error enums.
//!
//! Each variant gets a snake_case constructor whose `String` fields accept
//! anything `Into<String>`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum FeedError {
            Missing => "feed credential missing",
            Transport { message: String } => "feed transport failed: {message}",
            Rejected { status: u16, message: String } => "feed rejected request ({status}): {message}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(FeedError::missing(), FeedError::Missing);
        assert_eq!(FeedError::missing().to_string(), "feed credential missing");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = FeedError::transport("connection reset");
        assert_eq!(err.to_string(), "feed transport failed: connection reset");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = FeedError::rejected(403_u16, "forbidden");
        assert_eq!(err.to_string(), "feed rejected request (403): forbidden");
    }
}
