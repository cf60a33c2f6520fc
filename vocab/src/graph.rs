//! RDF terms and an insertion-ordered triple buffer.
//!
//! [`Graph`] has set semantics: inserting a triple twice keeps one copy. The
//! first-insertion order is kept so serialized output is stable.

use std::collections::HashSet;
use std::fmt;

use crate::model::iris::{XSD_INTEGER, XSD_STRING};

/// A literal value with its datatype IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    /// Lexical form.
    pub lexical: String,
    /// Full datatype IRI (`xsd:string` for plain literals).
    pub datatype: String,
}

impl Literal {
    /// Creates an `xsd:string` literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            lexical: value.into(),
            datatype: XSD_STRING.to_owned(),
        }
    }

    /// Creates an `xsd:integer` literal.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self {
            lexical: value.to_string(),
            datatype: XSD_INTEGER.to_owned(),
        }
    }

    /// Returns the integer value if the lexical form parses as one,
    /// whatever the declared datatype.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        self.lexical.trim().parse().ok()
    }
}

/// An RDF term in subject, predicate or object position.
///
/// Blank nodes are carried as IRIs of the form `_:label`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// A node identified by an IRI.
    Iri(String),
    /// A literal value.
    Literal(Literal),
}

impl Term {
    /// Creates an IRI term.
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// Returns the IRI if this term is a node.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::Literal(_) => None,
        }
    }

    /// Returns the literal if this term is one.
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            Term::Iri(_) => None,
        }
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::Literal(lit) => write!(f, "{:?}^^<{}>", lit.lexical, lit.datatype),
        }
    }
}

/// A `(subject, predicate, object)` statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject IRI.
    pub subject: String,
    /// Predicate IRI.
    pub predicate: String,
    /// Object term.
    pub object: Term,
}

/// An insertion-ordered set of triples.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a triple. Returns `false` if it was already present.
    pub fn insert(
        &mut self,
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<Term>,
    ) -> bool {
        let triple = Triple {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        };
        if self.seen.contains(&triple) {
            return false;
        }
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    /// Returns true if the exact triple is present.
    #[must_use]
    pub fn contains(&self, subject: &str, predicate: &str, object: &Term) -> bool {
        self.triples
            .iter()
            .any(|t| t.subject == subject && t.predicate == predicate && &t.object == object)
    }

    /// Number of distinct triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns true if the graph holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterates triples in first-insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Triple> {
        self.triples.iter()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
