//! `prov:` namespace: agents, attribution and execution timing.

use crate::model::iris::*;
use crate::model::{Class, Namespace, NamespaceModule, Property, PropertyKind};

/// `prov:Agent`.
pub const AGENT: &str = "http://www.w3.org/ns/prov/#Agent";
/// `prov:wasAttributedTo`.
pub const WAS_ATTRIBUTED_TO: &str = "http://www.w3.org/ns/prov/#wasAttributedTo";
/// `prov:used`.
pub const USED: &str = "http://www.w3.org/ns/prov/#used";
/// `prov:generated`.
pub const GENERATED: &str = "http://www.w3.org/ns/prov/#generated";
/// `prov:startedAtTime`.
pub const STARTED_AT_TIME: &str = "http://www.w3.org/ns/prov/#startedAtTime";
/// `prov:endedAtTime`.
pub const ENDED_AT_TIME: &str = "http://www.w3.org/ns/prov/#endedAtTime";

const CELL_EXECUTION: &str = "https://w3id.org/reproduceme#CellExecution";

/// Returns the `prov:` namespace module.
#[must_use]
pub fn module() -> NamespaceModule {
    NamespaceModule {
        namespace: Namespace {
            prefix: "prov",
            iri: NS_PROV,
            label: "PROV",
            comment: "W3C provenance ontology: agents, activities and the \
                      entities they use and generate.",
        },
        classes: vec![Class {
            id: AGENT,
            label: "Agent",
            comment: "A notebook author.",
        }],
        properties: vec![
            Property {
                id: WAS_ATTRIBUTED_TO,
                label: "wasAttributedTo",
                comment: "Attributes a notebook to one of its authors.",
                kind: PropertyKind::Object,
                domain: Some("https://w3id.org/reproduceme#Notebook"),
                range: AGENT,
            },
            Property {
                id: USED,
                label: "used",
                comment: "The cell source as it was when the execution ran.",
                kind: PropertyKind::Object,
                domain: Some(CELL_EXECUTION),
                range: RDFS_RESOURCE,
            },
            Property {
                id: GENERATED,
                label: "generated",
                comment: "An output captured by the execution.",
                kind: PropertyKind::Object,
                domain: Some(CELL_EXECUTION),
                range: RDFS_RESOURCE,
            },
            Property {
                id: STARTED_AT_TIME,
                label: "startedAtTime",
                comment: "Start timestamp of the execution, kept verbatim.",
                kind: PropertyKind::Datatype,
                domain: Some(CELL_EXECUTION),
                range: XSD_STRING,
            },
            Property {
                id: ENDED_AT_TIME,
                label: "endedAtTime",
                comment: "End timestamp of the execution, kept verbatim.",
                kind: PropertyKind::Datatype,
                domain: Some(CELL_EXECUTION),
                range: XSD_STRING,
            },
        ],
    }
}
