//! Enumerations shared by every view.
//!
//! The backend accepts these exact wire strings; nothing else in the
//! workspace spells them out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownChoice {
    pub kind: &'static str,
    pub value: String,
}

/// A closed set of values with a fixed wire representation.
pub trait Choice: Copy + Eq + 'static {
    /// Human name of the set, used in error messages.
    const KIND: &'static str;
    /// Every value, in display order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }

    /// Select controls use `""` for "no choice".
    fn parse_optional(value: &str) -> Option<Self> {
        if value.is_empty() {
            None
        } else {
            Self::parse(value)
        }
    }

    fn badge_class(&self) -> String {
        format!("badge badge-{}", self.as_str().to_ascii_lowercase())
    }
}

macro_rules! choice {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant,)+
        }

        impl Choice for $name {
            const KIND: &'static str = $kind;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as Choice>::parse(s).ok_or_else(|| UnknownChoice {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }
    };
}

choice! {
    /// Owning service of an incident.
    Service, "service" {
        Auth => "Auth",
        Payments => "Payments",
        Backend => "Backend",
        Frontend => "Frontend",
        Database => "Database",
    }
}

choice! {
    /// SEV1 is the most severe.
    Severity, "severity" {
        Sev1 => "SEV1",
        Sev2 => "SEV2",
        Sev3 => "SEV3",
        Sev4 => "SEV4",
    }
}

choice! {
    Status, "status" {
        Open => "OPEN",
        Mitigated => "MITIGATED",
        Resolved => "RESOLVED",
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Sev4
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Open
    }
}
