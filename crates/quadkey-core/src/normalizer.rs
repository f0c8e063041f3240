//! Surrogate key normalizer — maps terms to 64-bit integer keys
//!
//! # Pipeline
//!
//! `term → canonical hash bytes → 128-bit digest → high 64 bits → (sign fold)`
//!
//! # Guarantees
//!
//! - **Deterministic**: same term, kind letter and config always give the same key
//! - **Total**: every classifiable term has a key, including the absent term
//! - **Stable**: the digest and truncation rule are fixed per dataset; changing
//!   either invalidates every stored key

use std::borrow::Cow;
use std::fmt;

use md5::Md5;
use sha2::{Digest, Sha256};

use crate::classify::{canonical_bytes_for_hash, classify, KindLetter};
use crate::term::{Literal, Position, Quad, Term};
use crate::Result;

/// Largest value stored unfolded in a signed column (2^63)
pub const SIGNED_BOUNDARY: u64 = 1 << 63;

// ── Configuration ─────────────────────────────────────────

/// Digest used to derive keys
///
/// `Md5` is the legacy protocol and must be used to read existing data.
/// `Sha256` (truncated the same way) is only for fresh deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyDigest {
    #[default]
    Md5,
    Sha256,
}

impl KeyDigest {
    /// First 8 digest bytes as a big-endian integer, i.e. the first 16
    /// lowercase hex characters of the hex digest
    fn truncated(self, bytes: &[u8]) -> u64 {
        let mut head = [0u8; 8];
        match self {
            KeyDigest::Md5 => head.copy_from_slice(&Md5::digest(bytes)[..8]),
            KeyDigest::Sha256 => head.copy_from_slice(&Sha256::digest(bytes)[..8]),
        }
        u64::from_be_bytes(head)
    }
}

impl fmt::Display for KeyDigest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KeyDigest::Md5 => f.write_str("md5"),
            KeyDigest::Sha256 => f.write_str("sha256"),
        }
    }
}

/// Settings fixed for a whole persisted dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    /// Fold keys into the signed 64-bit domain
    pub use_signed_ints: bool,
    pub digest: KeyDigest,
}

impl SlotConfig {
    pub fn unsigned() -> Self {
        Self::default()
    }

    pub fn signed() -> Self {
        Self {
            use_signed_ints: true,
            ..Self::default()
        }
    }

    pub fn with_signed_ints(use_signed_ints: bool) -> Self {
        Self {
            use_signed_ints,
            ..Self::default()
        }
    }
}

// ── Surrogate key ─────────────────────────────────────────

/// A normalized term key
///
/// Unsigned keys cover the whole `u64` range. Folded keys cover
/// `-(2^63 - 1) ..= 2^63`; the single boundary value `2^63` is left
/// unfolded and so has no `i64` representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurrogateKey(i128);

impl SurrogateKey {
    pub fn get(self) -> i128 {
        self.0
    }

    pub fn to_u64(self) -> Option<u64> {
        u64::try_from(self.0).ok()
    }

    pub fn to_i64(self) -> Option<i64> {
        i64::try_from(self.0).ok()
    }
}

impl From<u64> for SurrogateKey {
    fn from(value: u64) -> Self {
        SurrogateKey(i128::from(value))
    }
}

impl fmt::Display for SurrogateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for SurrogateKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match (self.to_i64(), self.to_u64()) {
            (Some(v), _) => serializer.serialize_i64(v),
            (None, Some(v)) => serializer.serialize_u64(v),
            (None, None) => serializer.serialize_i128(self.0),
        }
    }
}

// ── Normalization ─────────────────────────────────────────

/// Fold an unsigned key into a signed storage column
///
/// Values above 2^63 map to `2^63 - value` (negative); everything else,
/// including exactly 2^63, is unchanged.
pub fn make_signed(value: u64) -> i128 {
    if value > SIGNED_BOUNDARY {
        i128::from(SIGNED_BOUNDARY) - i128::from(value)
    } else {
        i128::from(value)
    }
}

/// Normalize a term with the legacy MD5 digest
pub fn normalize_value(term: &Term, kind: KindLetter, use_signed_ints: bool) -> Result<SurrogateKey> {
    normalize_value_with(term, kind, SlotConfig::with_signed_ints(use_signed_ints))
}

/// Normalize a term under an explicit config
///
/// # Errors
/// `UnclassifiableTerm` if the term has no identifying string.
pub fn normalize_value_with(term: &Term, kind: KindLetter, config: SlotConfig) -> Result<SurrogateKey> {
    let bytes = canonical_bytes_for_hash(term, kind)?;
    let unsigned = config.digest.truncated(&bytes);
    let key = if config.use_signed_ints {
        SurrogateKey(make_signed(unsigned))
    } else {
        SurrogateKey::from(unsigned)
    };
    tracing::trace!(%term, %kind, digest = %config.digest, %key, "normalized term");
    Ok(key)
}

/// Classify and normalize in one step
pub fn normalize_node(term: &Term, use_signed_ints: bool) -> Result<SurrogateKey> {
    normalize_value(term, classify(term)?, use_signed_ints)
}

// ── Facets ────────────────────────────────────────────────

/// Term at `position`, or the requested facet of the object term
///
/// Real positions return the quad's term unchanged. `ObjectDatatype`
/// yields the object literal's datatype as a URI term, `ObjectLanguage`
/// its language tag as a plain literal; both are `None` when absent or
/// when the object is not a literal.
pub fn dereference_facet(position: Position, quad: &Quad) -> Option<Cow<'_, Term>> {
    match position {
        Position::ObjectDatatype => quad
            .object
            .as_literal()
            .and_then(Literal::datatype_uri)
            .map(|dt| Cow::Owned(Term::uri(dt))),
        Position::ObjectLanguage => quad
            .object
            .as_literal()
            .and_then(Literal::language_tag)
            .map(|lang| Cow::Owned(Term::literal(Literal::plain(lang)))),
        real => quad.get(real).map(Cow::Borrowed),
    }
}

/// Facet lookup by legacy integer index (0..=5)
///
/// # Errors
/// `InvalidFacetIndex` for any index above 5.
pub fn dereference_facet_index(index: usize, quad: &Quad) -> Result<Option<Cow<'_, Term>>> {
    let position = Position::from_index(index)?;
    Ok(dereference_facet(position, quad))
}
