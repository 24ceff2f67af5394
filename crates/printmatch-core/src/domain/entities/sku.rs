//! The SKU codec.
//!
//! A SKU is `ArtworkCode-ProductTypeCode` followed by zero to three
//! `-NN` variant fields, one per bound dimension, in binding order:
//!
//! ```text
//! 11K001-UTS            product level
//! 11K001-UTS-01         field1
//! 11K001-UTS-01-02      field1 + field2
//! 11K001-UTS-01-02-03   fully specified
//! ```
//!
//! Print files carry a SKU prefix at the start of their name, closed by a
//! terminator (`_` or `.`), e.g. `11K001-UTS-01-01_print.png`.
//!
//! # Parsing
//!
//! Decoding is an explicit incremental parser rather than a pattern with
//! optional groups: consume the artwork code, consume the type code, then
//! consume `-NN` at most three times while the next byte is `-`. After the
//! last field the next byte must be a terminator. A digit run longer than
//! two (`-0199_`) therefore never yields a field boundary.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::domain::{
    error::DomainError,
    value_objects::{
        ARTWORK_CODE_LEN, ArtworkCode, PRODUCT_TYPE_CODE_LEN, ProductTypeCode, VARIANT_CODE_LEN,
        VariantCode, is_artwork_code, is_product_type_code,
    },
};

/// Maximum number of variant fields (one per hierarchy position).
pub const MAX_FIELDS: usize = 3;

const SEPARATOR: u8 = b'-';
const TERMINATORS: [u8; 2] = [b'_', b'.'];

// ── Sku ─────────────────────────────────────────────────────────────────────

/// A structured product identifier at depth 0..=3.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Sku {
    artwork_code: ArtworkCode,
    product_type_code: ProductTypeCode,
    fields: Vec<VariantCode>,
}

impl Sku {
    pub fn new(
        artwork_code: ArtworkCode,
        product_type_code: ProductTypeCode,
        fields: Vec<VariantCode>,
    ) -> Result<Self, DomainError> {
        if fields.len() > MAX_FIELDS {
            return Err(DomainError::InvalidCodeFormat {
                field: "variant field count",
                value: fields.len().to_string(),
                rule: "at most 3 variant codes",
            });
        }
        Ok(Self {
            artwork_code,
            product_type_code,
            fields,
        })
    }

    /// Validate raw parts and join them into a full SKU string.
    ///
    /// Unset trailing fields are omitted; nothing is padded.
    pub fn encode(
        artwork_code: &str,
        product_type_code: &str,
        variant_codes: &[&str],
    ) -> Result<String, DomainError> {
        let fields = variant_codes
            .iter()
            .map(|c| c.parse::<VariantCode>())
            .collect::<Result<Vec<_>, _>>()?;
        let sku = Self::new(artwork_code.parse()?, product_type_code.parse()?, fields)?;
        Ok(sku.to_string())
    }

    /// Parse a stored identifier. The whole input must be consumed.
    pub fn parse(full_sku: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidCodeFormat {
            field: "sku",
            value: full_sku.to_owned(),
            rule: "ARTWORK-TYPE followed by up to three -NN fields",
        };
        match parse_prefix(full_sku.as_bytes()) {
            Ok((sku, end)) if end == full_sku.len() => Ok(sku),
            _ => Err(invalid()),
        }
    }

    pub fn artwork_code(&self) -> &ArtworkCode {
        &self.artwork_code
    }

    pub fn product_type_code(&self) -> &ProductTypeCode {
        &self.product_type_code
    }

    pub fn fields(&self) -> &[VariantCode] {
        &self.fields
    }

    /// Field at a 1-based hierarchy position.
    pub fn field(&self, position: usize) -> Option<VariantCode> {
        position
            .checked_sub(1)
            .and_then(|i| self.fields.get(i))
            .copied()
    }

    pub fn depth(&self) -> usize {
        self.fields.len()
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.artwork_code, self.product_type_code)?;
        for field in &self.fields {
            write!(f, "-{field}")?;
        }
        Ok(())
    }
}

// ── Decoding ────────────────────────────────────────────────────────────────

/// Why a file name carries no usable SKU prefix.
///
/// This is a classification outcome, not a failure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NoMatch {
    #[error("name does not start with an artwork code")]
    ArtworkCode,

    #[error("artwork code is not followed by '-' and a product type code")]
    ProductTypeCode,

    #[error("field {index} is not two digits")]
    Field { index: usize },

    #[error("field {index} uses the reserved code 99")]
    ReservedCode { index: usize },

    #[error("more than three variant fields")]
    TooManyFields,

    #[error("expected '_' or '.' at byte {offset}")]
    Unterminated { offset: usize },
}

/// A SKU prefix recovered from a file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkuFragment {
    prefix: Sku,
    terminator: char,
}

impl SkuFragment {
    pub fn prefix(&self) -> &Sku {
        &self.prefix
    }

    pub fn into_prefix(self) -> Sku {
        self.prefix
    }

    pub fn terminator(&self) -> char {
        self.terminator
    }

    pub fn artwork_code(&self) -> &ArtworkCode {
        self.prefix.artwork_code()
    }

    pub fn product_type_code(&self) -> &ProductTypeCode {
        self.prefix.product_type_code()
    }

    pub fn field1(&self) -> Option<VariantCode> {
        self.prefix.field(1)
    }

    pub fn field2(&self) -> Option<VariantCode> {
        self.prefix.field(2)
    }

    pub fn field3(&self) -> Option<VariantCode> {
        self.prefix.field(3)
    }

    /// Number of decoded variant fields.
    pub fn depth(&self) -> usize {
        self.prefix.depth()
    }
}

/// Decode the SKU prefix at the start of a file name.
///
/// Directory components are ignored; only the base name is parsed.
pub fn decode(file_name: &str) -> Result<SkuFragment, NoMatch> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let bytes = base.as_bytes();
    let (prefix, end) = parse_prefix(bytes)?;

    match bytes.get(end) {
        Some(&b) if TERMINATORS.contains(&b) => Ok(SkuFragment {
            prefix,
            terminator: char::from(b),
        }),
        _ => Err(NoMatch::Unterminated { offset: end }),
    }
}

/// Shared grammar walk. Returns the parsed prefix and the index of the first
/// unconsumed byte.
fn parse_prefix(input: &[u8]) -> Result<(Sku, usize), NoMatch> {
    let artwork = input
        .get(..ARTWORK_CODE_LEN)
        .filter(|b| is_artwork_code(b))
        .ok_or(NoMatch::ArtworkCode)?;
    let mut pos = ARTWORK_CODE_LEN;

    if input.get(pos) != Some(&SEPARATOR) {
        return Err(NoMatch::ProductTypeCode);
    }
    pos += 1;
    let product_type = input
        .get(pos..pos + PRODUCT_TYPE_CODE_LEN)
        .filter(|b| is_product_type_code(b))
        .ok_or(NoMatch::ProductTypeCode)?;
    pos += PRODUCT_TYPE_CODE_LEN;

    let mut fields = Vec::with_capacity(MAX_FIELDS);
    while input.get(pos) == Some(&SEPARATOR) {
        let index = fields.len() + 1;
        if index > MAX_FIELDS {
            return Err(NoMatch::TooManyFields);
        }
        let digits = input
            .get(pos + 1..pos + 1 + VARIANT_CODE_LEN)
            .ok_or(NoMatch::Field { index })?;
        let code = VariantCode::from_digits(digits).ok_or_else(|| {
            if digits == b"99" {
                NoMatch::ReservedCode { index }
            } else {
                NoMatch::Field { index }
            }
        })?;
        fields.push(code);
        pos += 1 + VARIANT_CODE_LEN;
    }

    // Both slices were validated as ASCII above.
    let artwork_code = ArtworkCode::try_from(String::from_utf8_lossy(artwork).into_owned())
        .map_err(|_| NoMatch::ArtworkCode)?;
    let product_type_code =
        ProductTypeCode::try_from(String::from_utf8_lossy(product_type).into_owned())
            .map_err(|_| NoMatch::ProductTypeCode)?;

    Ok((
        Sku {
            artwork_code,
            product_type_code,
            fields,
        },
        pos,
    ))
}

// ── Pattern ─────────────────────────────────────────────────────────────────

/// A SKU prefix used to select variants.
///
/// Matching compares segment by segment: `11K001-UTS-01` matches
/// `11K001-UTS-01-02-03` but never `11K001-UTS-010-02`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkuPattern {
    prefix: Sku,
}

impl SkuPattern {
    pub fn new(prefix: Sku) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> &Sku {
        &self.prefix
    }

    /// Whether `candidate` lies under this prefix.
    pub fn matches(&self, candidate: &Sku) -> bool {
        candidate.artwork_code == self.prefix.artwork_code
            && candidate.product_type_code == self.prefix.product_type_code
            && candidate.fields.len() >= self.prefix.fields.len()
            && self
                .prefix
                .fields
                .iter()
                .zip(&candidate.fields)
                .all(|(want, have)| want == have)
    }

    /// Segment-wise match against a raw identifier string.
    ///
    /// Works on malformed stored values too: a segment either equals the
    /// expected code exactly or the candidate is rejected.
    pub fn matches_str(&self, full_sku: &str) -> bool {
        let mut segments = full_sku.split('-');
        if segments.next() != Some(self.prefix.artwork_code.as_str())
            || segments.next() != Some(self.prefix.product_type_code.as_str())
        {
            return false;
        }
        self.prefix
            .fields
            .iter()
            .all(|want| segments.next() == Some(want.to_string().as_str()))
    }
}

impl From<SkuFragment> for SkuPattern {
    fn from(fragment: SkuFragment) -> Self {
        Self::new(fragment.into_prefix())
    }
}

impl fmt::Display for SkuPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(raw: &[&str]) -> Vec<VariantCode> {
        raw.iter().map(|c| c.parse().unwrap()).collect()
    }

    #[test]
    fn encode_omits_unset_fields() {
        assert_eq!(Sku::encode("11K001", "UTS", &[]).unwrap(), "11K001-UTS");
        assert_eq!(
            Sku::encode("11K001", "UTS", &["01", "02"]).unwrap(),
            "11K001-UTS-01-02"
        );
        assert_eq!(
            Sku::encode("11K001", "UTS", &["01", "02", "03"]).unwrap(),
            "11K001-UTS-01-02-03"
        );
    }

    #[test]
    fn encode_rejects_bad_parts() {
        assert!(matches!(
            Sku::encode("11K01", "UTS", &[]),
            Err(DomainError::InvalidCodeFormat { field: "artwork code", .. })
        ));
        assert!(matches!(
            Sku::encode("11K001", "UTSX", &[]),
            Err(DomainError::InvalidCodeFormat { field: "product type code", .. })
        ));
        assert!(matches!(
            Sku::encode("11K001", "UTS", &["99"]),
            Err(DomainError::InvalidCodeFormat { field: "variant code", .. })
        ));
        assert!(Sku::encode("11K001", "UTS", &["1"]).is_err());
        assert!(Sku::encode("11K001", "UTS", &["01", "02", "03", "04"]).is_err());
    }

    #[test]
    fn round_trip_through_file_name() {
        let cases: [&[&str]; 4] = [&[], &["00"], &["01", "98"], &["10", "20", "30"]];
        for fields in cases {
            let sku = Sku::encode("42B777", "POS", fields).unwrap();
            let fragment = decode(&format!("{sku}_print.png")).unwrap();
            assert_eq!(fragment.artwork_code().as_str(), "42B777");
            assert_eq!(fragment.product_type_code().as_str(), "POS");
            let decoded: Vec<String> = fragment
                .prefix()
                .fields()
                .iter()
                .map(ToString::to_string)
                .collect();
            assert_eq!(decoded, fields);
        }
    }

    #[test]
    fn decode_accepts_either_terminator() {
        let underscore = decode("11K001-UTS-01_print.png").unwrap();
        assert_eq!(underscore.terminator(), '_');
        assert_eq!(underscore.field1().unwrap().to_string(), "01");
        assert_eq!(underscore.field2(), None);

        let dot = decode("11K001-UTS-01-02-03.tif").unwrap();
        assert_eq!(dot.terminator(), '.');
        assert_eq!(dot.depth(), 3);
        assert_eq!(dot.field3().unwrap().to_string(), "03");
    }

    #[test]
    fn decode_rejects_long_digit_runs() {
        assert_eq!(
            decode("11K001-UTS-0199_print.png"),
            Err(NoMatch::Unterminated { offset: 13 })
        );
        assert!(decode("11K001-UTS-01-0203_print.png").is_err());
    }

    #[test]
    fn decode_requires_terminator() {
        assert_eq!(
            decode("11K001-UTS-01"),
            Err(NoMatch::Unterminated { offset: 13 })
        );
        assert_eq!(
            decode("11K001-UTSX_print.png"),
            Err(NoMatch::Unterminated { offset: 10 })
        );
    }

    #[test]
    fn decode_rejects_malformed_prefixes() {
        assert_eq!(decode("print_11K001-UTS.png"), Err(NoMatch::ArtworkCode));
        assert_eq!(decode("11K001_UTS.png"), Err(NoMatch::ProductTypeCode));
        assert_eq!(decode("11K001-ut.png"), Err(NoMatch::ProductTypeCode));
        assert_eq!(
            decode("11K001-UTS-1_print.png"),
            Err(NoMatch::Field { index: 1 })
        );
        assert_eq!(
            decode("11K001-UTS-01-99_print.png"),
            Err(NoMatch::ReservedCode { index: 2 })
        );
        assert_eq!(
            decode("11K001-UTS-01-02-03-04_print.png"),
            Err(NoMatch::TooManyFields)
        );
        assert_eq!(decode(""), Err(NoMatch::ArtworkCode));
    }

    #[test]
    fn decode_ignores_directories() {
        let fragment = decode("uploads/11K001/11K001-UTS-02_print.png").unwrap();
        assert_eq!(fragment.field1().unwrap().value(), 2);
    }

    #[test]
    fn parse_requires_full_consumption() {
        assert_eq!(Sku::parse("11K001-UTS-01-02").unwrap().depth(), 2);
        assert!(Sku::parse("11K001-UTS-01-02_print").is_err());
        assert!(Sku::parse("11K001-UTS-010").is_err());
    }

    #[test]
    fn pattern_matches_field_by_field() {
        let pattern = SkuPattern::new(
            Sku::new("11K001".parse().unwrap(), "UTS".parse().unwrap(), codes(&["01"])).unwrap(),
        );

        assert!(pattern.matches_str("11K001-UTS-01-02-03"));
        assert!(pattern.matches_str("11K001-UTS-01"));
        assert!(!pattern.matches_str("11K001-UTS-010-02-03"));
        assert!(!pattern.matches_str("11K001-UTS-02-01-01"));
        assert!(!pattern.matches_str("11K001-UTS"));
        assert!(!pattern.matches_str("11K002-UTS-01"));

        assert!(pattern.matches(&Sku::parse("11K001-UTS-01-02-03").unwrap()));
        assert!(!pattern.matches(&Sku::parse("11K001-ABC-01-02-03").unwrap()));
    }

    #[test]
    fn product_level_pattern_matches_every_variant() {
        let pattern: SkuPattern = decode("11K001-UTS_master.pdf").unwrap().into();
        assert!(pattern.matches_str("11K001-UTS-05-06-07"));
        assert!(pattern.matches_str("11K001-UTS"));
        assert!(!pattern.matches_str("11K001-UTSX-01"));
    }
}
