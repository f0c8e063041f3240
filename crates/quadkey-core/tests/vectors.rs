//! Integration tests: known surrogate keys for every term kind.
//!
//! Each entry in tests/fixtures/vectors.json carries a term, its expected
//! kind letter, and the expected unsigned and signed MD5 keys. Keys already
//! persisted by earlier deployments depend on these exact values.

use std::path::PathBuf;

use quadkey_core::{classify, normalize_node, normalize_value, KindLetter, Term};
use serde_json::Value;

fn load_vectors() -> Vec<Value> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/vectors.json");
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()))
}

fn vector_term(vector: &Value) -> Term {
    serde_json::from_value(vector["term"].clone())
        .unwrap_or_else(|e| panic!("bad term in vector {}: {e}", vector["name"]))
}

#[test]
fn vectors_classify() {
    for vector in load_vectors() {
        let term = vector_term(&vector);
        let letter = vector["kind"].as_str().unwrap().chars().next().unwrap();
        assert_eq!(
            classify(&term).unwrap(),
            KindLetter::from_char(letter).unwrap(),
            "vector {}",
            vector["name"]
        );
    }
}

#[test]
fn vectors_unsigned_keys() {
    for vector in load_vectors() {
        let term = vector_term(&vector);
        let key = normalize_node(&term, false).unwrap();
        assert_eq!(
            key.to_u64(),
            vector["unsigned"].as_u64(),
            "vector {}",
            vector["name"]
        );
    }
}

#[test]
fn vectors_signed_keys() {
    for vector in load_vectors() {
        let term = vector_term(&vector);
        let key = normalize_node(&term, true).unwrap();
        assert_eq!(
            key.to_i64(),
            vector["signed"].as_i64(),
            "vector {}",
            vector["name"]
        );
    }
}

#[test]
fn vectors_keys_are_distinct() {
    let mut keys: Vec<u64> = load_vectors()
        .iter()
        .map(|v| {
            normalize_node(&vector_term(v), false)
                .unwrap()
                .to_u64()
                .unwrap()
        })
        .collect();
    let total = keys.len();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), total);
}

#[test]
fn null_key_with_any_letter_matches_sentinel() {
    let sentinel = Term::uri(quadkey_core::NULL_SENTINEL);
    for letter in ['U', 'B', 'L', 'F', 'V', 'R'] {
        let kind = KindLetter::from_char(letter).unwrap();
        assert_eq!(
            normalize_value(&Term::Null, kind, false).unwrap(),
            normalize_value(&sentinel, kind, false).unwrap(),
            "letter {letter}"
        );
    }
}
