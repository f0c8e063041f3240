//! Term classifier & canonicalizer
//!
//! Assigns each term its persisted kind letter and produces the two
//! canonical byte forms of a term:
//!
//! - **hash input**: `identifying string ++ kind letter`, raw UTF-8
//! - **persisted value**: the string stored in the term-values table,
//!   with literal quotes escaped
//!
//! Escaping never reaches the hash input; keys do not depend on the
//! storage dialect.

use std::fmt;

use crate::escape::QuoteEscaper;
use crate::term::Term;
use crate::{Error, Result};

/// Identifying string hashed in place of an absent term
pub const NULL_SENTINEL: &str = "http://www.w3.org/2002/07/owl#NothingU";

// ── Kind letters ──────────────────────────────────────────

/// Single-character discriminator persisted next to every term
///
/// The letters are part of the stored data and must never change.
/// Plain, typed and language-tagged literals all share `L`; the
/// datatype and language are stored as separate facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KindLetter {
    Uri,
    BlankNode,
    Literal,
    QuotedGraph,
    Variable,
    Pattern,
}

impl KindLetter {
    pub fn as_char(self) -> char {
        match self {
            KindLetter::Uri => 'U',
            KindLetter::BlankNode => 'B',
            KindLetter::Literal => 'L',
            KindLetter::QuotedGraph => 'F',
            KindLetter::Variable => 'V',
            KindLetter::Pattern => 'R',
        }
    }

    pub fn from_char(c: char) -> Result<KindLetter> {
        match c {
            'U' => Ok(KindLetter::Uri),
            'B' => Ok(KindLetter::BlankNode),
            'L' => Ok(KindLetter::Literal),
            'F' => Ok(KindLetter::QuotedGraph),
            'V' => Ok(KindLetter::Variable),
            'R' => Ok(KindLetter::Pattern),
            other => Err(Error::UnknownKindLetter(other)),
        }
    }
}

impl serde::Serialize for KindLetter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_char(self.as_char())
    }
}

impl fmt::Display for KindLetter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Classify a term by its variant
///
/// # Errors
/// `UnclassifiableTerm` for a pattern list, and for a literal carrying
/// both a datatype and a language tag.
pub fn classify(term: &Term) -> Result<KindLetter> {
    match term {
        Term::Uri { .. } => Ok(KindLetter::Uri),
        Term::BlankNode { .. } => Ok(KindLetter::BlankNode),
        Term::Literal(lit) => {
            if lit.datatype_uri().is_some() && lit.language_tag().is_some() {
                return Err(Error::UnclassifiableTerm(format!(
                    "literal {} has both a datatype and a language tag",
                    term
                )));
            }
            Ok(KindLetter::Literal)
        }
        Term::QuotedGraph { .. } => Ok(KindLetter::QuotedGraph),
        Term::Variable { .. } => Ok(KindLetter::Variable),
        Term::Pattern { .. } => Ok(KindLetter::Pattern),
        // Absent terms are looked up in the literal table
        Term::Null => Ok(KindLetter::Literal),
        Term::List { .. } => Err(Error::UnclassifiableTerm(format!(
            "pattern list {} is not a single term",
            term
        ))),
    }
}

// ── Hash input ────────────────────────────────────────────

/// The string that identifies a term for hashing
///
/// Literals contribute their lexical value only.
fn identifying_str(term: &Term) -> Result<&str> {
    match term {
        Term::Uri { value } => Ok(value),
        Term::BlankNode { id } => Ok(id),
        Term::Literal(lit) => Ok(&lit.lexical),
        Term::QuotedGraph { identifier } => Ok(identifier),
        Term::Variable { name } => Ok(name),
        Term::Pattern { regex } => Ok(regex),
        Term::Null => Ok(NULL_SENTINEL),
        Term::List { .. } => Err(Error::UnclassifiableTerm(format!(
            "pattern list {} has no identifying string",
            term
        ))),
    }
}

/// Bytes fed to the digest: identifying string followed by the kind letter
pub fn canonical_bytes_for_hash(term: &Term, kind: KindLetter) -> Result<Vec<u8>> {
    let ident = identifying_str(term)?;
    let mut bytes = Vec::with_capacity(ident.len() + 1);
    bytes.extend_from_slice(ident.as_bytes());
    let mut buf = [0u8; 4];
    bytes.extend_from_slice(kind.as_char().encode_utf8(&mut buf).as_bytes());
    Ok(bytes)
}

// ── Persisted value ───────────────────────────────────────

/// Canonical form of a term for the term-values table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persisted<'a> {
    /// UTF-8 text to store
    Bytes(Vec<u8>),
    /// Wildcard marker passed through untouched
    Term(&'a Term),
}

impl Persisted<'_> {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Persisted::Bytes(bytes) => Some(bytes),
            Persisted::Term(_) => None,
        }
    }
}

/// Canonical persisted form of a term
///
/// Returns `None` for an absent term. Pattern placeholders and lists are
/// matching markers, not values, so they are returned as-is.
pub fn canonical_string_for_persistence<'a, E: QuoteEscaper + ?Sized>(
    term: &'a Term,
    _kind: KindLetter,
    escaper: &E,
) -> Option<Persisted<'a>> {
    match term {
        Term::Null => None,
        Term::Pattern { .. } | Term::List { .. } => Some(Persisted::Term(term)),
        Term::QuotedGraph { identifier } => Some(Persisted::Bytes(identifier.as_bytes().to_vec())),
        Term::Literal(lit) => Some(Persisted::Bytes(escaper.escape(&lit.lexical).into_bytes())),
        Term::Uri { value } => Some(Persisted::Bytes(value.as_bytes().to_vec())),
        Term::BlankNode { id } => Some(Persisted::Bytes(id.as_bytes().to_vec())),
        Term::Variable { name } => Some(Persisted::Bytes(name.as_bytes().to_vec())),
    }
}
