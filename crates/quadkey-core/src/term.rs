//! Term model — the closed set of RDF terms a quad can carry
//!
//! Terms are immutable values. Classification and canonicalization live in
//! [`crate::classify`]; this module only describes shapes and positions.

use std::fmt;

use crate::{Error, Result};

/// A literal: lexical value plus optional datatype URI or language tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Literal {
    pub lexical: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Literal {
    /// Plain literal, no datatype and no language
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    pub fn lang(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    /// Datatype URI, with an empty string treated as absent
    pub fn datatype_uri(&self) -> Option<&str> {
        self.datatype.as_deref().filter(|dt| !dt.is_empty())
    }

    /// Language tag, with an empty string treated as absent
    pub fn language_tag(&self) -> Option<&str> {
        self.language.as_deref().filter(|lang| !lang.is_empty())
    }
}

/// An RDF term as it appears in one position of a quad
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Term {
    Uri { value: String },
    BlankNode { id: String },
    Literal(Literal),
    /// A nested formula, identified by its own URI
    QuotedGraph { identifier: String },
    /// Query variable (name without the leading `?`)
    Variable { name: String },
    /// Regular-expression placeholder matching any term
    Pattern { regex: String },
    /// Alternatives for pattern matching; never stored
    List { items: Vec<Term> },
    /// Absent term (wildcard in lookups, default context)
    Null,
}

impl Term {
    pub fn uri(value: impl Into<String>) -> Self {
        Term::Uri {
            value: value.into(),
        }
    }

    pub fn blank(id: impl Into<String>) -> Self {
        Term::BlankNode { id: id.into() }
    }

    pub fn literal(literal: Literal) -> Self {
        Term::Literal(literal)
    }

    pub fn quoted_graph(identifier: impl Into<String>) -> Self {
        Term::QuotedGraph {
            identifier: identifier.into(),
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Term::Variable { name: name.into() }
    }

    pub fn pattern(regex: impl Into<String>) -> Self {
        Term::Pattern {
            regex: regex.into(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Term::Null)
    }

    /// The literal payload, if this is a literal
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::Uri { value } => write!(f, "<{}>", value),
            Term::BlankNode { id } => write!(f, "_:{}", id),
            Term::Literal(lit) => {
                write!(f, "{:?}", lit.lexical)?;
                if let Some(ref lang) = lit.language {
                    write!(f, "@{}", lang)?;
                }
                if let Some(ref dt) = lit.datatype {
                    write!(f, "^^<{}>", dt)?;
                }
                Ok(())
            }
            Term::QuotedGraph { identifier } => write!(f, "{{{}}}", identifier),
            Term::Variable { name } => write!(f, "?{}", name),
            Term::Pattern { regex } => write!(f, "REGEX({})", regex),
            Term::List { items } => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Term::Null => f.write_str("None"),
        }
    }
}

// ── Positions ─────────────────────────────────────────────

/// Role of a term within a quad
///
/// The first four are real positions. `ObjectDatatype` and
/// `ObjectLanguage` only request a facet of the object term and are
/// never stored on a slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Subject,
    Predicate,
    Object,
    Context,
    ObjectDatatype,
    ObjectLanguage,
}

impl Position {
    /// Canonical iteration order of a quad
    pub const QUAD: [Position; 4] = [
        Position::Subject,
        Position::Predicate,
        Position::Object,
        Position::Context,
    ];

    const ALL: [Position; 6] = [
        Position::Subject,
        Position::Predicate,
        Position::Object,
        Position::Context,
        Position::ObjectDatatype,
        Position::ObjectLanguage,
    ];

    /// Legacy integer index (0..=5)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Position> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidFacetIndex(index))
    }

    /// Column prefix used by the relational layer
    pub fn label(self) -> &'static str {
        match self {
            Position::Subject => "subject",
            Position::Predicate => "predicate",
            Position::Object => "object",
            Position::Context => "context",
            Position::ObjectDatatype => "dataType",
            Position::ObjectLanguage => "language",
        }
    }

    pub fn is_real(self) -> bool {
        !matches!(self, Position::ObjectDatatype | Position::ObjectLanguage)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Quad ──────────────────────────────────────────────────

/// Subject, predicate, object and containing graph
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Quad {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
    #[serde(default = "null_term")]
    pub context: Term,
}

fn null_term() -> Term {
    Term::Null
}

impl Quad {
    pub fn new(subject: Term, predicate: Term, object: Term, context: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
            context,
        }
    }

    /// Term at a real position; `None` for derived positions
    pub fn get(&self, position: Position) -> Option<&Term> {
        match position {
            Position::Subject => Some(&self.subject),
            Position::Predicate => Some(&self.predicate),
            Position::Object => Some(&self.object),
            Position::Context => Some(&self.context),
            Position::ObjectDatatype | Position::ObjectLanguage => None,
        }
    }

    /// Terms with their positions, in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Term)> {
        [
            (Position::Subject, &self.subject),
            (Position::Predicate, &self.predicate),
            (Position::Object, &self.object),
            (Position::Context, &self.context),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_index_roundtrip() {
        for i in 0..6 {
            assert_eq!(Position::from_index(i).unwrap().index(), i);
        }
        assert_eq!(Position::from_index(6), Err(Error::InvalidFacetIndex(6)));
    }

    #[test]
    fn test_position_labels() {
        let labels: Vec<_> = Position::QUAD.iter().map(|p| p.label()).collect();
        assert_eq!(labels, ["subject", "predicate", "object", "context"]);
        assert_eq!(Position::ObjectDatatype.label(), "dataType");
        assert_eq!(Position::ObjectLanguage.label(), "language");
    }

    #[test]
    fn test_only_quad_positions_are_real() {
        assert!(Position::QUAD.iter().all(|p| p.is_real()));
        assert!(!Position::ObjectDatatype.is_real());
        assert!(!Position::ObjectLanguage.is_real());
    }

    #[test]
    fn test_quad_get() {
        let quad = Quad::new(
            Term::uri("http://example.org/s"),
            Term::uri("http://example.org/p"),
            Term::literal(Literal::plain("o")),
            Term::Null,
        );
        assert_eq!(quad.get(Position::Subject), Some(&Term::uri("http://example.org/s")));
        assert_eq!(quad.get(Position::Context), Some(&Term::Null));
        assert!(quad.get(Position::ObjectLanguage).is_none());
    }

    #[test]
    fn test_quad_json_defaults_context_to_null() {
        let json = r#"{
            "subject": {"type": "uri", "value": "http://example.org/s"},
            "predicate": {"type": "uri", "value": "http://example.org/p"},
            "object": {"type": "literal", "lexical": "42", "datatype": "http://www.w3.org/2001/XMLSchema#integer"}
        }"#;
        let quad: Quad = serde_json::from_str(json).unwrap();
        assert_eq!(quad.context, Term::Null);
        assert_eq!(
            quad.object,
            Term::literal(Literal::typed("42", "http://www.w3.org/2001/XMLSchema#integer"))
        );
    }

    #[test]
    fn test_term_display() {
        assert_eq!(Term::uri("http://a").to_string(), "<http://a>");
        assert_eq!(Term::blank("b0").to_string(), "_:b0");
        assert_eq!(
            Term::literal(Literal::lang("chat", "fr")).to_string(),
            "\"chat\"@fr"
        );
        assert_eq!(Term::Null.to_string(), "None");
    }
}
