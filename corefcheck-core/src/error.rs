//! Fatal input-integrity errors.
//!
//! Validation findings (overlapping clusters, duplicate spans) are reported
//! as [`crate::ClusterViolation`] values; the errors in this module describe
//! inputs that are structurally inconsistent and cannot be scored at all.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $Variant:ident => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $Variant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$Variant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!("Retrieve the stable [`", stringify!($CodeTy), "`] for this error.")]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$Variant { .. } => $CodeTy::$Variant,)+
                }
            }
        }
    };
}

/// Input-integrity fault raised while validating a clustering.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ValidationError {
    /// A cluster references a mention that has no entry in the span map.
    #[error("cluster contains mention `{mention}` that is not in the mention list")]
    MissingMention {
        /// Identifier of the unknown mention.
        mention: String,
    },
    /// An identifier list that must be unique repeats an entry.
    #[error("identifier `{identifier}` appears more than once")]
    DuplicateIdentifier {
        /// The repeated identifier.
        identifier: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`ValidationError`] variants.
    enum ValidationErrorCode for ValidationError {
        /// A cluster references a mention missing from the span map.
        MissingMention => "COREFCHECK_MISSING_MENTION",
        /// An identifier list repeats an entry.
        DuplicateIdentifier => "COREFCHECK_DUPLICATE_IDENTIFIER",
    }
}

/// Convenient alias for results returned by the validation API.
pub type Result<T> = core::result::Result<T, ValidationError>;
