//! Turtle 1.1 writer.
//!
//! Produces a Turtle document with one `@prefix` line per vocabulary
//! namespace followed by one block per subject, in first-insertion order.

use std::collections::HashMap;

use crate::graph::{Graph, Term};
use crate::model::iris::{RDF_TYPE, XSD_STRING};
use crate::model::Vocabulary;

/// Serializes a triple buffer to a Turtle string.
///
/// IRIs are compacted to `prefix:local` when they start with one of
/// `prefixes` and the remainder is a plain ASCII name; otherwise they are
/// written as `<iri>`.
#[must_use]
pub fn to_turtle(graph: &Graph, prefixes: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(64 * graph.len() + 512);

    for (prefix, iri) in prefixes {
        out.push_str(&format!("@prefix {prefix}: <{iri}> .\n"));
    }
    out.push('\n');

    let mut order: Vec<&str> = Vec::new();
    let mut blocks: HashMap<&str, Vec<(&str, &Term)>> = HashMap::new();
    for triple in graph {
        blocks
            .entry(triple.subject.as_str())
            .or_insert_with(|| {
                order.push(triple.subject.as_str());
                Vec::new()
            })
            .push((triple.predicate.as_str(), &triple.object));
    }

    for subject in order {
        let Some(statements) = blocks.get(subject) else {
            continue;
        };
        out.push_str(&compact(subject, prefixes));
        for (i, (predicate, object)) in statements.iter().enumerate() {
            out.push_str(if i == 0 { "\n  " } else { " ;\n  " });
            if *predicate == RDF_TYPE {
                out.push('a');
            } else {
                out.push_str(&compact(predicate, prefixes));
            }
            out.push(' ');
            out.push_str(&term_to_turtle(object, prefixes));
        }
        out.push_str(" .\n\n");
    }

    out
}

/// Serializes the vocabulary itself as a small RDFS document.
#[must_use]
pub fn vocabulary_to_turtle(vocabulary: &Vocabulary) -> String {
    use crate::graph::Literal;
    use crate::model::iris::{
        OWL, OWL_DATATYPE_PROPERTY, OWL_OBJECT_PROPERTY, RDFS_CLASS, RDFS_COMMENT, RDFS_DOMAIN,
        RDFS_LABEL, RDFS_RANGE,
    };
    use crate::model::PropertyKind;

    let mut graph = Graph::new();
    for module in &vocabulary.namespaces {
        graph.insert(module.namespace.iri, RDFS_LABEL, Literal::string(module.namespace.label));
        graph.insert(
            module.namespace.iri,
            RDFS_COMMENT,
            Literal::string(module.namespace.comment),
        );
        for class in &module.classes {
            graph.insert(class.id, RDF_TYPE, Term::iri(RDFS_CLASS));
            graph.insert(class.id, RDFS_LABEL, Literal::string(class.label));
            graph.insert(class.id, RDFS_COMMENT, Literal::string(class.comment));
        }
        for prop in &module.properties {
            let property_type = match prop.kind {
                PropertyKind::Datatype => OWL_DATATYPE_PROPERTY,
                PropertyKind::Object => OWL_OBJECT_PROPERTY,
            };
            graph.insert(prop.id, RDF_TYPE, Term::iri(property_type));
            graph.insert(prop.id, RDFS_LABEL, Literal::string(prop.label));
            graph.insert(prop.id, RDFS_COMMENT, Literal::string(prop.comment));
            if let Some(domain) = prop.domain {
                graph.insert(prop.id, RDFS_DOMAIN, Term::iri(domain));
            }
            graph.insert(prop.id, RDFS_RANGE, Term::iri(prop.range));
        }
    }

    let mut prefixes = vocabulary.prefixes();
    prefixes.push(("owl", OWL));
    let mut out = format!("# Notebook provenance vocabulary v{}\n", vocabulary.version);
    out.push_str(&to_turtle(&graph, &prefixes));
    out
}

fn compact(iri: &str, prefixes: &[(&str, &str)]) -> String {
    for (prefix, ns) in prefixes {
        if let Some(local) = iri.strip_prefix(ns) {
            if is_plain_local_name(local) {
                return format!("{prefix}:{local}");
            }
        }
    }
    format!("<{iri}>")
}

fn is_plain_local_name(local: &str) -> bool {
    !local.is_empty() && local.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn term_to_turtle(term: &Term, prefixes: &[(&str, &str)]) -> String {
    match term {
        Term::Iri(iri) => compact(iri, prefixes),
        Term::Literal(lit) if lit.datatype == XSD_STRING => turtle_string(&lit.lexical),
        Term::Literal(lit) => format!(
            "{}^^{}",
            turtle_string(&lit.lexical),
            compact(&lit.datatype, prefixes)
        ),
    }
}

fn turtle_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len() + 2);
    escaped.push('"');
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04X}", u32::from(c))),
            c => escaped.push(c),
        }
    }
    escaped.push('"');
    escaped
}
