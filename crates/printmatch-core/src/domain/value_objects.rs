//! Domain value objects: codes and identifiers.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity beyond
//! their contents. Every code type validates its fixed grammar at
//! construction, so once a value exists it is guaranteed well-formed. The
//! byte-level grammar checks are shared with the filename decoder in
//! `entities::sku`.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ── Grammar ─────────────────────────────────────────────────────────────────

pub(crate) const ARTWORK_CODE_LEN: usize = 6;
pub(crate) const PRODUCT_TYPE_CODE_LEN: usize = 3;
pub(crate) const VARIANT_CODE_LEN: usize = 2;

const ARTWORK_RULE: &str = "2 digits, 1 uppercase letter, 3 digits (e.g. 11K001)";
const PRODUCT_TYPE_RULE: &str = "exactly 3 uppercase letters (e.g. UTS)";
const VARIANT_RULE: &str = "exactly 2 digits in 00..=98 (99 is reserved)";

/// `DD L DDD`
pub(crate) fn is_artwork_code(bytes: &[u8]) -> bool {
    bytes.len() == ARTWORK_CODE_LEN
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[2].is_ascii_uppercase()
        && bytes[3..].iter().all(u8::is_ascii_digit)
}

pub(crate) fn is_product_type_code(bytes: &[u8]) -> bool {
    bytes.len() == PRODUCT_TYPE_CODE_LEN && bytes.iter().all(u8::is_ascii_uppercase)
}

// ── ArtworkCode ─────────────────────────────────────────────────────────────

/// Fixed-grammar token uniquely identifying an artwork, e.g. `11K001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtworkCode(String);

impl ArtworkCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ArtworkCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_artwork_code(s.as_bytes()) {
            Ok(Self(s.to_owned()))
        } else {
            Err(DomainError::InvalidCodeFormat {
                field: "artwork code",
                value: s.to_owned(),
                rule: ARTWORK_RULE,
            })
        }
    }
}

impl TryFrom<String> for ArtworkCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ArtworkCode> for String {
    fn from(code: ArtworkCode) -> Self {
        code.0
    }
}

impl fmt::Display for ArtworkCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── ProductTypeCode ─────────────────────────────────────────────────────────

/// Three uppercase letters identifying a product type, e.g. `UTS`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductTypeCode(String);

impl ProductTypeCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProductTypeCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_product_type_code(s.as_bytes()) {
            Ok(Self(s.to_owned()))
        } else {
            Err(DomainError::InvalidCodeFormat {
                field: "product type code",
                value: s.to_owned(),
                rule: PRODUCT_TYPE_RULE,
            })
        }
    }
}

impl TryFrom<String> for ProductTypeCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProductTypeCode> for String {
    fn from(code: ProductTypeCode) -> Self {
        code.0
    }
}

impl fmt::Display for ProductTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── VariantCode ─────────────────────────────────────────────────────────────

/// A two-digit code within a variant dimension, `00..=98`.
///
/// `99` means "not applicable" and is never a valid stored code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VariantCode(u8);

impl VariantCode {
    pub const MAX: u8 = 98;
    /// Reserved marker for "not applicable".
    pub const NOT_APPLICABLE: u8 = 99;

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidCodeFormat {
                field: "variant code",
                value: value.to_string(),
                rule: VARIANT_RULE,
            })
        }
    }

    /// Parse two ASCII digits. Returns `None` for anything else, including `99`.
    pub(crate) fn from_digits(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
                let value = (a - b'0') * 10 + (b - b'0');
                (value <= Self::MAX).then_some(Self(value))
            }
            _ => None,
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl FromStr for VariantCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_digits(s.as_bytes()).ok_or_else(|| DomainError::InvalidCodeFormat {
            field: "variant code",
            value: s.to_owned(),
            rule: VARIANT_RULE,
        })
    }
}

impl TryFrom<String> for VariantCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VariantCode> for String {
    fn from(code: VariantCode) -> Self {
        code.to_string()
    }
}

impl fmt::Display for VariantCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

// ── Identifiers ─────────────────────────────────────────────────────────────

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Deterministic id derived from a stable name (UUID v5).
            pub fn from_name(name: &str) -> Self {
                Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()))
            }

            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_id!(
    /// Identity of a concrete product variant row.
    VariantId
);
uuid_id!(
    /// Identity of an uploaded print file.
    PrintFileId
);
uuid_id!(
    /// Identity of a variant dimension.
    DimensionId
);
