//! Quad slots — one normalized term per quad position
//!
//! A [`QuadSlot`] pairs a term with its kind letter and surrogate key. The
//! relational layer stores `key` as the positional foreign key and the
//! canonical persisted string in the term-values table.

use std::fmt;

use crate::classify::{canonical_string_for_persistence, classify, KindLetter, Persisted};
use crate::escape::{QuoteEscaper, SqlQuoteEscaper};
use crate::normalizer::{normalize_value_with, SlotConfig, SurrogateKey};
use crate::term::{Position, Quad, Term};
use crate::{Error, Result};

/// A term normalized for one position of a quad
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct QuadSlot {
    position: Position,
    term: Term,
    kind: KindLetter,
    config: SlotConfig,
    key: SurrogateKey,
}

impl QuadSlot {
    /// Build a slot with the legacy MD5 digest
    pub fn new(position: Position, term: Term, use_signed_ints: bool) -> Result<Self> {
        Self::with_config(position, term, SlotConfig::with_signed_ints(use_signed_ints))
    }

    /// Build a slot, computing its key once
    ///
    /// # Errors
    /// `InvalidSlotPosition` for the datatype/language pseudo-positions,
    /// `UnclassifiableTerm` if the term has no kind letter.
    pub fn with_config(position: Position, term: Term, config: SlotConfig) -> Result<Self> {
        if !position.is_real() {
            return Err(Error::InvalidSlotPosition(position.label().to_string()));
        }
        let kind = classify(&term)?;
        let key = normalize_value_with(&term, kind, config)?;
        Ok(Self {
            position,
            term,
            kind,
            config,
            key,
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn kind(&self) -> KindLetter {
        self.kind
    }

    pub fn use_signed_ints(&self) -> bool {
        self.config.use_signed_ints
    }

    pub fn config(&self) -> SlotConfig {
        self.config
    }

    /// The surrogate key
    pub fn key(&self) -> SurrogateKey {
        self.key
    }

    /// Persisted form of the term, literals escaped with [`SqlQuoteEscaper`]
    pub fn canonicalize_for_persistence(&self) -> Option<Persisted<'_>> {
        self.canonicalize_for_persistence_with(&SqlQuoteEscaper)
    }

    pub fn canonicalize_for_persistence_with<E: QuoteEscaper + ?Sized>(
        &self,
        escaper: &E,
    ) -> Option<Persisted<'_>> {
        canonical_string_for_persistence(&self.term, self.kind, escaper)
    }

    /// Slot carrying the datatype of a typed object literal
    ///
    /// Only the object slot of a typed literal has one. The datatype URI is
    /// normalized through the subject-position machinery, so the returned
    /// slot reports `Position::Subject`.
    pub fn datatype_slot(&self) -> Option<QuadSlot> {
        if self.position != Position::Object || self.kind != KindLetter::Literal {
            return None;
        }
        let datatype = self.term.as_literal()?.datatype_uri()?;
        // A URI always classifies, so this cannot fail
        QuadSlot::with_config(Position::Subject, Term::uri(datatype), self.config).ok()
    }
}

impl fmt::Display for QuadSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "QuadSlot({},{},{})", self.position, self.term, self.key)
    }
}

/// Slots for a quad in canonical order: subject, predicate, object, context
pub fn build_quad_slots(quad: &Quad, use_signed_ints: bool) -> Result<Vec<QuadSlot>> {
    build_quad_slots_with(quad, SlotConfig::with_signed_ints(use_signed_ints))
}

/// Slots for a quad under an explicit config
///
/// Fails as a whole if any position fails; no partial result escapes.
pub fn build_quad_slots_with(quad: &Quad, config: SlotConfig) -> Result<Vec<QuadSlot>> {
    let slots = quad
        .iter()
        .map(|(position, term)| QuadSlot::with_config(position, term.clone(), config))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(
        keys = ?slots.iter().map(|s| s.key.get()).collect::<Vec<_>>(),
        signed = config.use_signed_ints,
        "built quad slots"
    );
    Ok(slots)
}
