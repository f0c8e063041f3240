//! QuadKey Core - 64-bit surrogate keys for RDF quad terms
//!
//! Maps the terms of a quad (subject, predicate, object, context) and the
//! object's datatype and language facets onto fixed-width integer keys
//! for a relational graph store. This crate performs no I/O; the storage
//! layer persists the keys and canonical strings it produces.
//!
//! # Architecture
//!
//! ```text
//! Quad → classify → kind letters
//!          ↓
//!        canonical hash bytes → MD5 → high 64 bits → (sign fold) → SurrogateKey
//!          ↓
//!        QuadSlot { position, term, kind, key } → canonical persisted string
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: equal terms under equal config always share a key
//! - **Stable**: kind letters, the null sentinel and the truncation rule are
//!   part of the stored data and never change
//! - **Pure**: no shared mutable state; every value is `Send + Sync`
//!
//! # Example
//!
//! ```
//! use quadkey_core::{build_quad_slots, Literal, Quad, Term};
//!
//! let quad = Quad::new(
//!     Term::uri("http://example.org/alice"),
//!     Term::uri("http://xmlns.com/foaf/0.1/name"),
//!     Term::literal(Literal::typed("hello", "http://example.org/myType")),
//!     Term::Null,
//! );
//! let slots = build_quad_slots(&quad, false)?;
//! assert_eq!(slots.len(), 4);
//! assert!(slots[2].datatype_slot().is_some());
//! # Ok::<(), quadkey_core::Error>(())
//! ```

pub mod classify;
pub mod error;
pub mod escape;
pub mod normalizer;
pub mod slot;
pub mod term;

pub use classify::{
    canonical_bytes_for_hash, canonical_string_for_persistence, classify, KindLetter, Persisted,
    NULL_SENTINEL,
};
pub use error::{Error, Result};
pub use escape::{escape_quotes, QuoteEscaper, SqlQuoteEscaper};
pub use normalizer::{
    dereference_facet, dereference_facet_index, make_signed, normalize_node, normalize_value,
    normalize_value_with, KeyDigest, SlotConfig, SurrogateKey,
};
pub use slot::{build_quad_slots, build_quad_slots_with, QuadSlot};
pub use term::{Literal, Position, Quad, Term};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    fn test_quad() -> Quad {
        Quad::new(
            Term::uri("http://example.org/alice"),
            Term::uri("http://xmlns.com/foaf/0.1/name"),
            Term::literal(Literal::typed("hello", "http://example.org/myType")),
            Term::uri("http://example.org/graph"),
        )
    }

    #[test]
    fn test_quad_serialization() {
        let quad = test_quad();
        let json = serde_json::to_string(&quad).unwrap();
        let deserialized: Quad = serde_json::from_str(&json).unwrap();
        assert_eq!(quad, deserialized);
    }

    #[test]
    fn test_determinism_100_iterations() {
        let quad = test_quad();
        let first = build_quad_slots(&quad, true).unwrap();
        for i in 0..100 {
            let slots = build_quad_slots(&quad, true).unwrap();
            assert_eq!(first, slots, "Non-determinism at iteration {}", i);
        }
    }

    #[test]
    fn test_positions_computed_independently() {
        let quad = test_quad();
        let slots = build_quad_slots(&quad, false).unwrap();
        let handles: Vec<_> = quad
            .iter()
            .map(|(position, term)| {
                let term = term.clone();
                std::thread::spawn(move || QuadSlot::new(position, term, false).unwrap())
            })
            .collect();
        let threaded: Vec<QuadSlot> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(slots, threaded);
    }

    #[test]
    fn test_slot_json_shape() {
        let slots = build_quad_slots(&test_quad(), false).unwrap();
        let json = serde_json::to_value(&slots[0]).unwrap();
        assert_eq!(json["position"], "subject");
        assert_eq!(json["kind"], "U");
        assert_eq!(json["key"], 801_869_267_731_321_646u64);
        assert_eq!(json["term"]["type"], "uri");
    }
}
