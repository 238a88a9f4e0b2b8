//! Flavor tiers offered by the compute service.
//!
//! The provider identifies each sizing tier by a numeric code. Codes form a
//! contiguous block starting at [`Flavor::XSmall`]; anything outside that block
//! refers to a flavor that does not exist.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Named sizing tier.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Flavor {
    /// Extra small instance (code 100).
    XSmall,
    /// Small instance (code 101).
    Small,
    /// Medium instance (code 102).
    Medium,
    /// Large instance (code 103).
    Large,
    /// Extra large instance (code 104).
    XLarge,
    /// Double extra large instance (code 105).
    DoubleXLarge,
}

impl Flavor {
    /// Every tier, ordered by code.
    pub const ALL: [Self; 6] = [
        Self::XSmall,
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::XLarge,
        Self::DoubleXLarge,
    ];

    /// Provider code for this tier.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::XSmall => 100,
            Self::Small => 101,
            Self::Medium => 102,
            Self::Large => 103,
            Self::XLarge => 104,
            Self::DoubleXLarge => 105,
        }
    }

    /// Looks up the tier for a provider code.
    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            100 => Some(Self::XSmall),
            101 => Some(Self::Small),
            102 => Some(Self::Medium),
            103 => Some(Self::Large),
            104 => Some(Self::XLarge),
            105 => Some(Self::DoubleXLarge),
            _ => None,
        }
    }

    /// Canonical lowercase label, accepted by [`FromStr`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::XSmall => "xsmall",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::XLarge => "xlarge",
            Self::DoubleXLarge => "2xlarge",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a flavor label does not name a known tier.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("unknown flavor '{0}' (expected one of xsmall, small, medium, large, xlarge, 2xlarge)")]
pub struct UnknownFlavor(pub String);

impl FromStr for Flavor {
    type Err = UnknownFlavor;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "xsmall" | "x-small" => Ok(Self::XSmall),
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            "xlarge" | "x-large" => Ok(Self::XLarge),
            "2xlarge" | "double-xlarge" | "dblxlarge" => Ok(Self::DoubleXLarge),
            _ => Err(UnknownFlavor(value.to_owned())),
        }
    }
}

/// Raw flavor reference as sent in `flavorRef`.
///
/// A request carries the numeric code rather than a [`Flavor`] so callers can
/// target codes this crate does not name; [`FlavorRef::is_valid`] decides
/// whether the code is inside the provider's range. The default code is zero,
/// which is never valid.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlavorRef(u32);

impl FlavorRef {
    /// Codes the provider accepts.
    pub const VALID_RANGE: RangeInclusive<u32> = 100..=105;

    /// Wraps a raw provider code.
    #[must_use]
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Returns the raw code.
    #[must_use]
    pub const fn code(self) -> u32 {
        self.0
    }

    /// Reports whether the code refers to an existing flavor.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        Flavor::from_code(self.0).is_some()
    }
}

impl From<Flavor> for FlavorRef {
    fn from(value: Flavor) -> Self {
        Self(value.code())
    }
}

impl fmt::Display for FlavorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
