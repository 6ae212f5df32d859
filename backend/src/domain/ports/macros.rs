//! Macro support for port error enums.

/// Defines a port error enum whose variants all carry an adapter message.
///
/// Each variant gets a `thiserror` display string and a snake_case
/// constructor, so adapters can write `FooError::connection("details")`
/// instead of spelling out struct variants.
macro_rules! define_port_error {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $display:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($display)]
                $variant {
                    /// Failure detail reported by the adapter.
                    message: String,
                },
            )+
        }

        paste::paste! {
            impl $name {
                $(
                    #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant {
                            message: message.into(),
                        }
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;
