//! Core vocabulary model types.
//!
//! These types describe the fixed RDF vocabulary used to represent notebooks
//! as typed Rust data. All instances are built as owned `Vec`s and referenced
//! via borrows. The top-level entry point is
//! [`Vocabulary::full()`](crate::Vocabulary::full).

/// An RDF namespace the vocabulary draws terms from (e.g., `p-plan:`).
#[derive(Debug, Clone)]
pub struct Namespace {
    /// The prefix used in Turtle output (e.g., `"p-plan"`).
    pub prefix: &'static str,
    /// The full IRI of the namespace (e.g., `"http://purl.org/net/p-plan/#"`).
    pub iri: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Description of the namespace.
    pub comment: &'static str,
}

/// A class whose instances appear as `rdf:type` objects.
#[derive(Debug, Clone)]
pub struct Class {
    /// Full IRI (e.g., `"http://purl.org/net/p-plan/#Step"`).
    pub id: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Description.
    pub comment: &'static str,
}

/// Whether a property relates a node to a literal or to another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Relates a resource to a literal value.
    Datatype,
    /// Relates two resources.
    Object,
}

/// A property definition.
#[derive(Debug, Clone)]
pub struct Property {
    /// Full IRI.
    pub id: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Description.
    pub comment: &'static str,
    /// Datatype or object property.
    pub kind: PropertyKind,
    /// Full IRI of the domain class, or `None` if unspecified.
    pub domain: Option<&'static str>,
    /// Full IRI of the range class or XSD datatype.
    pub range: &'static str,
}

/// A complete namespace module: namespace metadata + classes + properties.
#[derive(Debug, Clone)]
pub struct NamespaceModule {
    /// Namespace metadata.
    pub namespace: Namespace,
    /// All classes used from this namespace.
    pub classes: Vec<Class>,
    /// All properties used from this namespace.
    pub properties: Vec<Property>,
}

/// The complete notebook provenance vocabulary.
#[derive(Debug)]
pub struct Vocabulary {
    /// Vocabulary version (e.g., `"0.2.0"`).
    pub version: &'static str,
    /// All namespace modules, `p-plan`, `prov`, `repr` in that order.
    pub namespaces: Vec<NamespaceModule>,
}

impl Vocabulary {
    /// Looks up a class by its full IRI. Returns `None` if not found.
    #[must_use]
    pub fn find_class(&self, iri: &str) -> Option<&Class> {
        self.namespaces
            .iter()
            .flat_map(|m| m.classes.iter())
            .find(|c| c.id == iri)
    }

    /// Returns the total number of classes across all namespaces.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.namespaces.iter().map(|m| m.classes.len()).sum()
    }

    /// Returns the total number of properties across all namespaces.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.namespaces.iter().map(|m| m.properties.len()).sum()
    }

    /// Returns the `(prefix, iri)` pairs for Turtle output: the standard
    /// `rdf:`/`rdfs:`/`xsd:` namespaces followed by every vocabulary module.
    #[must_use]
    pub fn prefixes(&self) -> Vec<(&'static str, &'static str)> {
        let mut prefixes = vec![
            ("rdf", iris::RDF),
            ("rdfs", iris::RDFS),
            ("xsd", iris::XSD),
        ];
        prefixes.extend(
            self.namespaces
                .iter()
                .map(|m| (m.namespace.prefix, m.namespace.iri)),
        );
        prefixes
    }
}

/// Standard IRI constants used across all namespace modules.
pub mod iris {
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    /// OWL namespace. Only the vocabulary document uses it.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";

    // Namespace IRIs. The trailing `/#` on P-Plan and PROV is how existing
    // ProvBook graphs spell them and must not be normalized.
    /// P-Plan namespace.
    pub const NS_PPLAN: &str = "http://purl.org/net/p-plan/#";
    /// PROV namespace.
    pub const NS_PROV: &str = "http://www.w3.org/ns/prov/#";
    /// ReproduceMe namespace; also the root of every notebook entity IRI.
    pub const NS_REPR: &str = "https://w3id.org/reproduceme#";

    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdf:value`.
    pub const RDF_VALUE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";
    /// `rdfs:Class`.
    pub const RDFS_CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
    /// `rdfs:Resource`.
    pub const RDFS_RESOURCE: &str = "http://www.w3.org/2000/01/rdf-schema#Resource";
    /// `rdfs:label`.
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    /// `rdfs:comment`.
    pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    /// `rdfs:domain`.
    pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    /// `rdfs:range`.
    pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";

    /// `owl:DatatypeProperty`.
    pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    /// `owl:ObjectProperty`.
    pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";

    // XSD datatypes
    /// `xsd:string`.
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    /// `xsd:integer`.
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
}
