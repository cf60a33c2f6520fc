//! Positional IRIs for notebook entities.
//!
//! Every node is named by its structural position under the ReproduceMe
//! namespace, e.g. `repr:Cell2`, `repr:Output2Suboutput0`,
//! `repr:Cell2Execution1Output0`. Existing graphs use these names, so the
//! scheme must not change.

use provbook_vocab::model::iris::NS_REPR;
use provbook_vocab::{decode_local_name, encode_local_name};

/// Strips every non-alphanumeric character from a notebook name.
#[must_use]
pub fn sanitize_notebook_name(name: &str) -> String {
    name.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// The notebook node, keyed by the sanitized notebook name.
#[must_use]
pub fn notebook(name: &str) -> String {
    format!("{NS_REPR}{}", sanitize_notebook_name(name))
}

/// `Cell{i}`.
#[must_use]
pub fn cell(i: usize) -> String {
    format!("{NS_REPR}Cell{i}")
}

/// `Source{i}`: the current source variable of cell `i`.
#[must_use]
pub fn source(i: usize) -> String {
    format!("{NS_REPR}Source{i}")
}

/// `Output{i}`: the saved output of cell `i`. Every saved output of a cell
/// shares this node.
#[must_use]
pub fn output(i: usize) -> String {
    format!("{NS_REPR}Output{i}")
}

/// `Output{i}Suboutput{j}`.
#[must_use]
pub fn suboutput(i: usize, j: usize) -> String {
    format!("{NS_REPR}Output{i}Suboutput{j}")
}

/// `Cell{i}Execution{p}`.
#[must_use]
pub fn execution(i: usize, p: usize) -> String {
    format!("{NS_REPR}Cell{i}Execution{p}")
}

/// `Cell{i}Execution{p}Source`.
#[must_use]
pub fn execution_source(i: usize, p: usize) -> String {
    format!("{NS_REPR}Cell{i}Execution{p}Source")
}

/// `Cell{i}Execution{p}Output{q}`.
#[must_use]
pub fn execution_output(i: usize, p: usize, q: usize) -> String {
    format!("{NS_REPR}Cell{i}Execution{p}Output{q}")
}

/// `Cell{i}Execution{p}Output{q}Suboutput{r}`.
#[must_use]
pub fn execution_suboutput(i: usize, p: usize, q: usize, r: usize) -> String {
    format!("{NS_REPR}Cell{i}Execution{p}Output{q}Suboutput{r}")
}

/// An author agent, named by the percent-encoded author name.
#[must_use]
pub fn agent(name: &str) -> String {
    format!("{NS_REPR}{}", encode_local_name(name))
}

/// Recovers an author name from an agent IRI. IRIs outside the ReproduceMe
/// namespace are returned whole.
#[must_use]
pub fn agent_name(iri: &str) -> String {
    match iri.strip_prefix(NS_REPR) {
        Some(local) => decode_local_name(local),
        None => iri.to_owned(),
    }
}

/// The number that follows the last occurrence of `marker` in `iri`, e.g.
/// `3` for `("…Cell0Execution3", "Execution")`.
#[must_use]
pub fn positional_suffix(iri: &str, marker: &str) -> Option<usize> {
    let start = iri.rfind(marker)? + marker.len();
    let digits: String = iri[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
