//! Status enums and their display badges.

use core::fmt::{Debug, Display};
use core::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::DomainError;

/// Visual tone of a status badge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Tone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

/// Label + tone pairing rendered for a status value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Badge {
    pub label: &'static str,
    pub tone: Tone,
}

impl Badge {
    pub const fn new(label: &'static str, tone: Tone) -> Self {
        Self { label, tone }
    }
}

/// A resource's fixed status enum.
pub trait StatusKind:
    Copy + Eq + Ord + Hash + Debug + Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Every value, in display order.
    fn all() -> &'static [Self];

    /// Wire representation.
    fn as_str(&self) -> &'static str;

    fn badge(&self) -> Badge;

    /// Parse a wire value, case-insensitively.
    fn parse(value: &str) -> Result<Self, DomainError> {
        let needle = value.trim();
        Self::all()
            .iter()
            .copied()
            .find(|s| s.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DomainError::UnknownStatus {
                value: value.to_string(),
                expected: Self::all()
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Declare a status enum together with its wire strings and badges.
///
/// ```ignore
/// status_enum! {
///     /// Review state of a product listing.
///     ProductStatus {
///         Pending => ("pending", "Pending", Warning),
///         Approved => ("approved", "Approved", Success),
///     }
/// }
/// ```
#[macro_export]
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($wire:literal, $label:literal, $tone:ident)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $crate::StatusKind for $name {
            fn all() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            fn badge(&self) -> $crate::Badge {
                match self {
                    $($name::$variant => $crate::Badge::new($label, $crate::Tone::$tone),)+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(<Self as $crate::StatusKind>::as_str(self))
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                <Self as $crate::StatusKind>::parse(s)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::status_enum! {
        /// Test-only status.
        Light {
            Red => ("red", "Stop", Danger),
            Green => ("GREEN", "Go", Success),
        }
    }

    #[test]
    fn macro_wires_strings_and_badges() {
        assert_eq!(Light::all(), &[Light::Red, Light::Green]);
        assert_eq!(Light::Green.as_str(), "GREEN");
        assert_eq!(Light::Red.to_string(), "red");
        assert_eq!(Light::Red.badge(), Badge::new("Stop", Tone::Danger));
        assert_eq!(serde_json::to_string(&Light::Green).unwrap(), "\"GREEN\"");
    }

    #[test]
    fn parse_is_case_insensitive_and_reports_expected() {
        assert_eq!("green".parse::<Light>().unwrap(), Light::Green);
        match "amber".parse::<Light>().unwrap_err() {
            DomainError::UnknownStatus { expected, .. } => assert_eq!(expected, "red, GREEN"),
            other => panic!("Expected UnknownStatus, got {other:?}"),
        }
    }
}
