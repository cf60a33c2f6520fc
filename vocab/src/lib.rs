//! Notebook provenance vocabulary encoded as typed Rust data.
//!
//! The `provbook-vocab` crate provides the fixed RDF vocabulary used to
//! describe notebooks and their execution history as static Rust data: P-Plan
//! steps and variables, PROV agents and timing, and the ReproduceMe notebook
//! terms. It also carries the triple buffer and Turtle writer the converters
//! share.
//!
//! # Entry Point
//!
//! ```
//! let vocabulary = provbook_vocab::Vocabulary::full();
//! assert_eq!(vocabulary.namespaces.len(), 3);
//! ```
//!
//! # Serialization
//!
//! ```
//! use provbook_vocab::graph::{Graph, Literal};
//! use provbook_vocab::namespaces::repr;
//!
//! let mut graph = Graph::new();
//! graph.insert("https://w3id.org/reproduceme#Cell0", repr::HAS_INDEX, Literal::integer(0));
//! let prefixes = provbook_vocab::Vocabulary::full().prefixes();
//! let turtle = provbook_vocab::serializer::turtle::to_turtle(&graph, &prefixes);
//! assert!(turtle.contains("repr:Cell0"));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod graph;
pub mod model;
pub mod namespaces;
pub mod serializer;

pub use model::{Class, Namespace, NamespaceModule, Property, PropertyKind, Vocabulary};

impl Vocabulary {
    /// Returns the complete vocabulary.
    ///
    /// Assembly order is `p-plan → prov → repr`, which is also the order of
    /// the `@prefix` lines in serialized graphs.
    #[must_use]
    pub fn full() -> &'static Vocabulary {
        static VOCABULARY: std::sync::OnceLock<Vocabulary> = std::sync::OnceLock::new();
        VOCABULARY.get_or_init(|| Vocabulary {
            version: env!("CARGO_PKG_VERSION"),
            namespaces: vec![
                namespaces::pplan::module(),
                namespaces::prov::module(),
                namespaces::repr::module(),
            ],
        })
    }
}

/// Percent-encodes a string for use as the local part of an IRI.
///
/// Unreserved characters (`A-Z a-z 0-9 - . _ ~`) are kept; every other byte
/// of the UTF-8 encoding becomes `%XX`.
#[must_use]
pub fn encode_local_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for byte in name.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// Reverses [`encode_local_name`]. Malformed escapes are kept verbatim.
#[must_use]
pub fn decode_local_name(local: &str) -> String {
    let bytes = local.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
