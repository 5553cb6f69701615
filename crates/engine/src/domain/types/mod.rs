// Re-export all types so callers can use `domain::types::*` directly.

/// Wires `Display`, `FromStr` and string-backed serde onto an option enum.
/// Parsing goes through the lenient wire mapper so every entrypoint accepts
/// the same spellings.
macro_rules! option_enum_plumbing {
    ($ty:ident, $parse:path) => {
        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::domain::error::UnsupportedValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $parse(s)
            }
        }

        impl From<$ty> for &'static str {
            fn from(v: $ty) -> Self {
                v.label()
            }
        }

        impl TryFrom<String> for $ty {
            type Error = $crate::domain::error::UnsupportedValue;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                $parse(&s)
            }
        }
    };
}

pub use self::core::*;
pub use self::trust::*;
pub use self::config::*;

// Module declarations
mod core;
mod trust;
mod config;
