//! `p-plan:` namespace: plans, steps and their variables.
//!
//! A notebook is modelled as a plan: each cell is a `Step` of the plan, its
//! source is an input `Variable` and its outputs are output `Variable`s.

use crate::model::iris::*;
use crate::model::{Class, Namespace, NamespaceModule, Property, PropertyKind};

/// `p-plan:Step`.
pub const STEP: &str = "http://purl.org/net/p-plan/#Step";
/// `p-plan:Variable`.
pub const VARIABLE: &str = "http://purl.org/net/p-plan/#Variable";
/// `p-plan:isStepOfPlan`.
pub const IS_STEP_OF_PLAN: &str = "http://purl.org/net/p-plan/#isStepOfPlan";
/// `p-plan:hasInputVar`.
pub const HAS_INPUT_VAR: &str = "http://purl.org/net/p-plan/#hasInputVar";
/// `p-plan:hasOutputVar`.
pub const HAS_OUTPUT_VAR: &str = "http://purl.org/net/p-plan/#hasOutputVar";
/// `p-plan:correspondsToStep`.
pub const CORRESPONDS_TO_STEP: &str = "http://purl.org/net/p-plan/#correspondsToStep";

/// Returns the `p-plan:` namespace module.
#[must_use]
pub fn module() -> NamespaceModule {
    NamespaceModule {
        namespace: Namespace {
            prefix: "p-plan",
            iri: NS_PPLAN,
            label: "P-Plan",
            comment: "Ontology for describing plans as steps connected by input \
                      and output variables.",
        },
        classes: vec![
            Class {
                id: STEP,
                label: "Step",
                comment: "A notebook cell, as one step of the notebook plan.",
            },
            Class {
                id: VARIABLE,
                label: "Variable",
                comment: "A cell source or a cell output.",
            },
        ],
        properties: vec![
            Property {
                id: IS_STEP_OF_PLAN,
                label: "isStepOfPlan",
                comment: "Links a cell to the notebook it belongs to.",
                kind: PropertyKind::Object,
                domain: Some(STEP),
                range: "https://w3id.org/reproduceme#Notebook",
            },
            Property {
                id: HAS_INPUT_VAR,
                label: "hasInputVar",
                comment: "Links a cell to its source variable.",
                kind: PropertyKind::Object,
                domain: Some(STEP),
                range: VARIABLE,
            },
            Property {
                id: HAS_OUTPUT_VAR,
                label: "hasOutputVar",
                comment: "Links a code cell to its saved output.",
                kind: PropertyKind::Object,
                domain: Some(STEP),
                range: VARIABLE,
            },
            Property {
                id: CORRESPONDS_TO_STEP,
                label: "correspondsToStep",
                comment: "Links a recorded cell execution to the cell it ran.",
                kind: PropertyKind::Object,
                domain: Some("https://w3id.org/reproduceme#CellExecution"),
                range: STEP,
            },
        ],
    }
}
