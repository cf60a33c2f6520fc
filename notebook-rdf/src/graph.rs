//! Indexed view of an RDF graph.
//!
//! The reverse mapper only ever asks "what are the objects of `(s, p)`" and
//! "which subjects have `(p, o)`", so a parsed graph is loaded once into two
//! hash indexes and every lookup is direct.

use std::collections::HashMap;

use provbook_vocab::graph::{Graph, Literal, Term};
use provbook_vocab::model::iris::XSD_STRING;
use sophia_api::source::TripleSource;
use sophia_api::term::{Term as SophiaTerm, TermKind};
use sophia_api::triple::Triple as SophiaTriple;
use sophia_turtle::parser::{nt, turtle};
use tracing::debug;

use crate::convert::RdfSyntax;
use crate::error::ConvertError;

/// Subject → predicate → objects, plus predicate → object → subjects.
///
/// Objects and subjects are kept in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct GraphIndex {
    forward: HashMap<String, HashMap<String, Vec<Term>>>,
    backward: HashMap<String, HashMap<Term, Vec<String>>>,
    len: usize,
}

impl GraphIndex {
    /// Indexes an in-memory graph.
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        let mut index = Self::default();
        for triple in graph {
            index.insert(&triple.subject, &triple.predicate, triple.object.clone());
        }
        index
    }

    /// Parses an RDF document and indexes it.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Rdf`] if the document does not parse, and
    /// [`ConvertError::UnsupportedSyntax`] for JSON-LD.
    pub fn parse(content: &str, syntax: RdfSyntax) -> Result<Self, ConvertError> {
        let mut graph = Graph::new();
        let rdf_error = |e: &dyn std::fmt::Display| ConvertError::Rdf {
            syntax,
            message: e.to_string(),
        };
        match syntax {
            RdfSyntax::Turtle => turtle::parse_str(content)
                .for_each_triple(|t| add_triple(&mut graph, t))
                .map_err(|e| rdf_error(&e))?,
            RdfSyntax::NTriples => nt::parse_str(content)
                .for_each_triple(|t| add_triple(&mut graph, t))
                .map_err(|e| rdf_error(&e))?,
            RdfSyntax::JsonLd => return Err(ConvertError::UnsupportedSyntax(syntax)),
        }
        debug!(%syntax, triples = graph.len(), "parsed RDF document");
        Ok(Self::from_graph(&graph))
    }

    fn insert(&mut self, subject: &str, predicate: &str, object: Term) {
        let objects = self
            .forward
            .entry(subject.to_owned())
            .or_default()
            .entry(predicate.to_owned())
            .or_default();
        if objects.contains(&object) {
            return;
        }
        objects.push(object.clone());
        self.backward
            .entry(predicate.to_owned())
            .or_default()
            .entry(object)
            .or_default()
            .push(subject.to_owned());
        self.len += 1;
    }

    /// Number of distinct triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the graph holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All objects of `(subject, predicate)`.
    #[must_use]
    pub fn objects(&self, subject: &str, predicate: &str) -> &[Term] {
        self.forward
            .get(subject)
            .and_then(|by_predicate| by_predicate.get(predicate))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The first object of `(subject, predicate)`.
    #[must_use]
    pub fn object(&self, subject: &str, predicate: &str) -> Option<&Term> {
        self.objects(subject, predicate).first()
    }

    /// The first literal object of `(subject, predicate)`.
    #[must_use]
    pub fn literal(&self, subject: &str, predicate: &str) -> Option<&Literal> {
        self.objects(subject, predicate)
            .iter()
            .find_map(Term::as_literal)
    }

    /// The lexical form of the first literal object.
    #[must_use]
    pub fn text(&self, subject: &str, predicate: &str) -> Option<String> {
        self.literal(subject, predicate).map(|lit| lit.lexical.clone())
    }

    /// The first literal object that parses as an integer.
    #[must_use]
    pub fn integer(&self, subject: &str, predicate: &str) -> Option<i64> {
        self.objects(subject, predicate)
            .iter()
            .filter_map(Term::as_literal)
            .find_map(Literal::as_integer)
    }

    /// Node objects of `(subject, predicate)`.
    pub fn iris<'a>(&'a self, subject: &str, predicate: &str) -> impl Iterator<Item = &'a str> {
        self.objects(subject, predicate).iter().filter_map(Term::as_iri)
    }

    /// Subjects having `(predicate, object)`.
    #[must_use]
    pub fn subjects_with(&self, predicate: &str, object: &Term) -> &[String] {
        self.backward
            .get(predicate)
            .and_then(|by_object| by_object.get(object))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn add_triple<T: SophiaTriple>(graph: &mut Graph, triple: T) {
    let (Some(subject), Some(predicate), Some(object)) = (
        node(triple.s()),
        node(triple.p()),
        object_term(triple.o()),
    ) else {
        return;
    };
    graph.insert(subject, predicate, object);
}

fn node<T: SophiaTerm>(term: T) -> Option<String> {
    match term.kind() {
        TermKind::Iri => term.iri().map(|iri| iri.as_str().to_owned()),
        TermKind::BlankNode => term.bnode_id().map(|id| format!("_:{}", id.as_str())),
        _ => None,
    }
}

fn object_term<T: SophiaTerm>(term: T) -> Option<Term> {
    if term.kind() != TermKind::Literal {
        return node(term).map(Term::Iri);
    }
    let lexical = term.lexical_form()?.to_string();
    let datatype = term
        .datatype()
        .map_or_else(|| XSD_STRING.to_owned(), |dt| dt.as_str().to_owned());
    Some(Term::Literal(Literal { lexical, datatype }))
}
