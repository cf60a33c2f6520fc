//! `repr:` namespace: ReproduceMe notebook terms.
//!
//! Everything specific to notebooks lives here: the `Notebook` and
//! `CellExecution` classes, cell and output attributes, and notebook-level
//! kernel and language metadata.

use crate::model::iris::*;
use crate::model::{Class, Namespace, NamespaceModule, Property, PropertyKind};

/// `repr:Notebook`.
pub const NOTEBOOK: &str = "https://w3id.org/reproduceme#Notebook";
/// `repr:CellExecution`.
pub const CELL_EXECUTION: &str = "https://w3id.org/reproduceme#CellExecution";

/// `repr:hasIndex`.
pub const HAS_INDEX: &str = "https://w3id.org/reproduceme#hasIndex";
/// `repr:hasCellType`.
pub const HAS_CELL_TYPE: &str = "https://w3id.org/reproduceme#hasCellType";
/// `repr:hasExecutionCount`.
pub const HAS_EXECUTION_COUNT: &str = "https://w3id.org/reproduceme#hasExecutionCount";
/// `repr:hasType`.
pub const HAS_TYPE: &str = "https://w3id.org/reproduceme#hasType";
/// `repr:hasSubOutput`.
pub const HAS_SUB_OUTPUT: &str = "https://w3id.org/reproduceme#hasSubOutput";
/// `repr:hasDataType`.
pub const HAS_DATA_TYPE: &str = "https://w3id.org/reproduceme#hasDataType";
/// `repr:hasErrorName`.
pub const HAS_ERROR_NAME: &str = "https://w3id.org/reproduceme#hasErrorName";
/// `repr:hasErrorTraceback`.
pub const HAS_ERROR_TRACEBACK: &str = "https://w3id.org/reproduceme#hasErrorTraceback";
/// `repr:executionTime`.
pub const EXECUTION_TIME: &str = "https://w3id.org/reproduceme#executionTime";
/// `repr:hasKernelName`.
pub const HAS_KERNEL_NAME: &str = "https://w3id.org/reproduceme#hasKernelName";
/// `repr:hasKernelDisplayName`.
pub const HAS_KERNEL_DISPLAY_NAME: &str = "https://w3id.org/reproduceme#hasKernelDisplayName";
/// `repr:hasProgrammingLanguage`.
pub const HAS_PROGRAMMING_LANGUAGE: &str = "https://w3id.org/reproduceme#hasProgrammingLanguage";
/// `repr:hasProgrammingLanguageVersion`.
pub const HAS_PROGRAMMING_LANGUAGE_VERSION: &str =
    "https://w3id.org/reproduceme#hasProgrammingLanguageVersion";
/// `repr:hasProgrammingLanguageExtension`.
pub const HAS_PROGRAMMING_LANGUAGE_EXTENSION: &str =
    "https://w3id.org/reproduceme#hasProgrammingLanguageExtension";

const STEP: &str = "http://purl.org/net/p-plan/#Step";
const VARIABLE: &str = "http://purl.org/net/p-plan/#Variable";

/// Returns the `repr:` namespace module.
#[must_use]
pub fn module() -> NamespaceModule {
    NamespaceModule {
        namespace: Namespace {
            prefix: "repr",
            iri: NS_REPR,
            label: "ReproduceMe",
            comment: "Notebook structure, cell outputs and execution environment \
                      for reproducible computational experiments.",
        },
        classes: classes(),
        properties: properties(),
    }
}

fn classes() -> Vec<Class> {
    vec![
        Class {
            id: NOTEBOOK,
            label: "Notebook",
            comment: "A notebook document; the plan its cells are steps of.",
        },
        Class {
            id: CELL_EXECUTION,
            label: "CellExecution",
            comment: "One recorded run of a cell, with its source and outputs \
                      at that time.",
        },
    ]
}

fn properties() -> Vec<Property> {
    vec![
        datatype(HAS_INDEX, "hasIndex", "Zero-based position of the cell.", STEP, XSD_INTEGER),
        datatype(
            HAS_CELL_TYPE,
            "hasCellType",
            "One of `code`, `markdown`, `raw`.",
            STEP,
            XSD_STRING,
        ),
        Property {
            id: HAS_EXECUTION_COUNT,
            label: "hasExecutionCount",
            comment: "Execution counter of a code cell or of an execute_result output.",
            kind: PropertyKind::Datatype,
            domain: None,
            range: XSD_INTEGER,
        },
        datatype(
            HAS_TYPE,
            "hasType",
            "Output type: execute_result, display_data, stream or error.",
            VARIABLE,
            XSD_STRING,
        ),
        Property {
            id: HAS_SUB_OUTPUT,
            label: "hasSubOutput",
            comment: "One MIME representation of a rich output.",
            kind: PropertyKind::Object,
            domain: Some(VARIABLE),
            range: RDFS_RESOURCE,
        },
        Property {
            id: HAS_DATA_TYPE,
            label: "hasDataType",
            comment: "MIME type of a sub-output.",
            kind: PropertyKind::Datatype,
            domain: None,
            range: XSD_STRING,
        },
        datatype(
            HAS_ERROR_NAME,
            "hasErrorName",
            "Exception name of an error output.",
            VARIABLE,
            XSD_STRING,
        ),
        datatype(
            HAS_ERROR_TRACEBACK,
            "hasErrorTraceback",
            "Traceback of an error output, as one opaque literal.",
            VARIABLE,
            XSD_STRING,
        ),
        datatype(
            EXECUTION_TIME,
            "executionTime",
            "Duration of a cell execution, kept verbatim.",
            CELL_EXECUTION,
            XSD_STRING,
        ),
        datatype(
            HAS_KERNEL_NAME,
            "hasKernelName",
            "Kernel spec name.",
            NOTEBOOK,
            XSD_STRING,
        ),
        datatype(
            HAS_KERNEL_DISPLAY_NAME,
            "hasKernelDisplayName",
            "Kernel spec display name.",
            NOTEBOOK,
            XSD_STRING,
        ),
        datatype(
            HAS_PROGRAMMING_LANGUAGE,
            "hasProgrammingLanguage",
            "Programming language name.",
            NOTEBOOK,
            XSD_STRING,
        ),
        datatype(
            HAS_PROGRAMMING_LANGUAGE_VERSION,
            "hasProgrammingLanguageVersion",
            "Programming language version.",
            NOTEBOOK,
            XSD_STRING,
        ),
        datatype(
            HAS_PROGRAMMING_LANGUAGE_EXTENSION,
            "hasProgrammingLanguageExtension",
            "File extension of the programming language.",
            NOTEBOOK,
            XSD_STRING,
        ),
    ]
}

fn datatype(
    id: &'static str,
    label: &'static str,
    comment: &'static str,
    domain: &'static str,
    range: &'static str,
) -> Property {
    Property {
        id,
        label,
        comment,
        kind: PropertyKind::Datatype,
        domain: Some(domain),
        range,
    }
}
