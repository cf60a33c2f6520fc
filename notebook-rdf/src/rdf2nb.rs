//! RDF → Notebook.
//!
//! Rebuilds a notebook from an indexed graph. Cells are the `p-plan:Step`
//! nodes ordered by `repr:hasIndex`; everything else hangs off them. A
//! missing triple leaves the field absent; nothing is synthesized except the
//! values the notebook format requires (`null` execution counts, empty
//! stream text).

use provbook_vocab::graph::Term;
use provbook_vocab::model::iris::{RDF_TYPE, RDF_VALUE};
use provbook_vocab::namespaces::{pplan, prov, repr};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::ConvertError;
use crate::graph::GraphIndex;
use crate::identity;
use crate::notebook::{
    is_json_mime, Author, Cell, CellMetadata, CellType, ExecutionRecord, KernelSpec, LanguageInfo,
    Notebook, NotebookMetadata, Output,
};
use crate::validate::validate;

/// Rebuilds a notebook from a graph without validating it.
#[must_use]
pub fn reconstruct(graph: &GraphIndex) -> Notebook {
    let mut steps: Vec<(i64, &str, CellType)> = graph
        .subjects_with(RDF_TYPE, &Term::iri(pplan::STEP))
        .iter()
        .filter_map(|step| {
            let index = graph.integer(step, repr::HAS_INDEX);
            let cell_type = graph.text(step, repr::HAS_CELL_TYPE);
            match (index, cell_type) {
                (Some(index), Some(cell_type)) => {
                    Some((index, step.as_str(), CellType::parse(&cell_type)))
                }
                _ => {
                    debug!(step = %step, "step without index or cell type skipped");
                    None
                }
            }
        })
        .collect();
    steps.sort_by_key(|&(index, _, _)| index);

    let cells: Vec<Cell> = steps
        .into_iter()
        .map(|(_, step, cell_type)| rebuild_cell(graph, step, cell_type))
        .collect();

    let notebook = Notebook {
        cells,
        metadata: rebuild_metadata(graph),
        ..Notebook::default()
    };
    info!(cells = notebook.cells.len(), triples = graph.len(), "notebook rebuilt from RDF");
    notebook
}

/// Rebuilds a notebook from a graph and validates the result.
///
/// # Errors
///
/// Returns [`ConvertError::Validation`] if the rebuilt notebook breaks the
/// notebook format rules.
pub fn graph_to_notebook(graph: &GraphIndex) -> Result<Notebook, ConvertError> {
    let notebook = reconstruct(graph);
    let report = validate(&notebook);
    for finding in report.warnings() {
        warn!(location = %finding.location, "{}", finding.message);
    }
    if !report.all_passed() {
        return Err(ConvertError::Validation(report));
    }
    Ok(notebook)
}

fn rebuild_cell(graph: &GraphIndex, step: &str, cell_type: CellType) -> Cell {
    let source = graph
        .iris(step, pplan::HAS_INPUT_VAR)
        .find_map(|var| graph.text(var, RDF_VALUE))
        .unwrap_or_default();

    let mut cell = match cell_type {
        CellType::Code => {
            let mut cell = Cell::code(source);
            cell.execution_count = graph.integer(step, repr::HAS_EXECUTION_COUNT);
            cell.outputs = by_position(graph.iris(step, pplan::HAS_OUTPUT_VAR), "Output")
                .into_iter()
                .map(|node| rebuild_output(graph, node))
                .collect();
            cell
        }
        CellType::Markdown => Cell::markdown(source),
        CellType::Raw => Cell::raw(source),
        CellType::Unknown => Cell {
            cell_type: Some(CellType::Unknown),
            source,
            ..Cell::default()
        },
    };

    let executions = by_position(
        graph
            .subjects_with(pplan::CORRESPONDS_TO_STEP, &Term::iri(step))
            .iter()
            .map(String::as_str),
        "Execution",
    );
    if !executions.is_empty() {
        let provenance = executions
            .into_iter()
            .map(|node| rebuild_execution(graph, node))
            .collect();
        cell.metadata = CellMetadata {
            provenance: Some(provenance),
            ..CellMetadata::default()
        };
    }
    debug!(step, executions = cell.provenance().len(), "cell rebuilt");
    cell
}

fn rebuild_execution(graph: &GraphIndex, node: &str) -> ExecutionRecord {
    ExecutionRecord {
        start_time: graph.text(node, prov::STARTED_AT_TIME),
        end_time: graph.text(node, prov::ENDED_AT_TIME),
        execution_time: graph.text(node, repr::EXECUTION_TIME),
        source: graph
            .iris(node, prov::USED)
            .find_map(|source| graph.text(source, RDF_VALUE)),
        outputs: by_position(graph.iris(node, prov::GENERATED), "Output")
            .into_iter()
            .map(|output| rebuild_output(graph, output))
            .collect(),
    }
}

fn rebuild_output(graph: &GraphIndex, node: &str) -> Output {
    match graph.text(node, repr::HAS_TYPE).as_deref() {
        Some("execute_result") => Output::ExecuteResult {
            data: rebuild_data(graph, node),
            execution_count: graph.integer(node, repr::HAS_EXECUTION_COUNT),
            metadata: Map::new(),
        },
        Some("display_data") => Output::display_data(rebuild_data(graph, node)),
        Some("stream") => Output::stdout(graph.text(node, RDF_VALUE).unwrap_or_default()),
        Some("error") => Output::Error {
            ename: graph.text(node, repr::HAS_ERROR_NAME),
            evalue: graph.text(node, RDF_VALUE),
            traceback: graph
                .text(node, repr::HAS_ERROR_TRACEBACK)
                .map(|text| parse_traceback(&text))
                .unwrap_or_default(),
        },
        other => {
            warn!(output = node, output_type = ?other, "output of unknown type");
            Output::Unknown
        }
    }
}

/// Re-merges sub-outputs into a MIME bundle.
fn rebuild_data(graph: &GraphIndex, node: &str) -> Map<String, Value> {
    by_position(graph.iris(node, repr::HAS_SUB_OUTPUT), "Suboutput")
        .into_iter()
        .filter_map(|sub| {
            let mime = graph.text(sub, repr::HAS_DATA_TYPE)?;
            let text = graph.text(sub, RDF_VALUE)?;
            let value = if is_json_mime(&mime) {
                serde_json::from_str(&text).unwrap_or(Value::String(text))
            } else {
                Value::String(text)
            };
            Some((mime, value))
        })
        .collect()
}

/// A traceback literal holds the JSON array of lines. Anything else is
/// taken as a single line.
fn parse_traceback(text: &str) -> Vec<String> {
    serde_json::from_str(text).unwrap_or_else(|_| vec![text.to_owned()])
}

fn rebuild_metadata(graph: &GraphIndex) -> NotebookMetadata {
    let Some(node) = graph
        .subjects_with(RDF_TYPE, &Term::iri(repr::NOTEBOOK))
        .first()
    else {
        return NotebookMetadata::default();
    };

    let kernel = KernelSpec {
        name: graph.text(node, repr::HAS_KERNEL_NAME),
        display_name: graph.text(node, repr::HAS_KERNEL_DISPLAY_NAME),
        ..KernelSpec::default()
    };
    let language = LanguageInfo {
        name: graph.text(node, repr::HAS_PROGRAMMING_LANGUAGE),
        version: graph.text(node, repr::HAS_PROGRAMMING_LANGUAGE_VERSION),
        file_extension: graph.text(node, repr::HAS_PROGRAMMING_LANGUAGE_EXTENSION),
        ..LanguageInfo::default()
    };
    let authors: Vec<Author> = graph
        .iris(node, prov::WAS_ATTRIBUTED_TO)
        .map(|agent| Author {
            name: Some(identity::agent_name(agent)),
            ..Author::default()
        })
        .collect();

    NotebookMetadata {
        kernelspec: (kernel != KernelSpec::default()).then_some(kernel),
        language_info: (language != LanguageInfo::default()).then_some(language),
        authors: (!authors.is_empty()).then_some(authors),
        ..NotebookMetadata::default()
    }
}

/// Orders identity IRIs by the number after `marker`; IRIs without one sort
/// last in their original order.
fn by_position<'a>(nodes: impl Iterator<Item = &'a str>, marker: &str) -> Vec<&'a str> {
    let mut nodes: Vec<&str> = nodes.collect();
    nodes.sort_by_key(|node| identity::positional_suffix(node, marker).unwrap_or(usize::MAX));
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nb2rdf::notebook_to_graph;
    use provbook_vocab::graph::{Graph, Literal};
    use serde_json::json;

    const NS: &str = "https://w3id.org/reproduceme#";

    fn round_trip(notebook: &Notebook) -> Notebook {
        let graph = notebook_to_graph("test", notebook);
        graph_to_notebook(&GraphIndex::from_graph(&graph)).expect("valid reconstruction")
    }

    #[test]
    fn empty_graph_is_an_empty_notebook() {
        let notebook = graph_to_notebook(&GraphIndex::default()).expect("valid");
        assert!(notebook.cells.is_empty());
        assert_eq!(notebook.metadata, NotebookMetadata::default());
    }

    #[test]
    fn cells_follow_index_not_insertion_order() {
        let mut graph = Graph::new();
        for (i, kind) in [(2, "raw"), (0, "markdown"), (10, "code"), (1, "markdown")] {
            let step = format!("{NS}Cell{i}");
            graph.insert(&step, RDF_TYPE, Term::iri(pplan::STEP));
            graph.insert(&step, repr::HAS_INDEX, Literal::integer(i));
            graph.insert(&step, repr::HAS_CELL_TYPE, Literal::string(kind));
        }
        let notebook = reconstruct(&GraphIndex::from_graph(&graph));
        let kinds: Vec<_> = notebook.cells.iter().map(|c| c.cell_type).collect();
        assert_eq!(
            kinds,
            [
                Some(CellType::Markdown),
                Some(CellType::Markdown),
                Some(CellType::Raw),
                Some(CellType::Code)
            ]
        );
    }

    #[test]
    fn steps_without_index_are_skipped() {
        let mut graph = Graph::new();
        graph.insert(format!("{NS}Cell0"), RDF_TYPE, Term::iri(pplan::STEP));
        graph.insert(format!("{NS}Cell0"), repr::HAS_CELL_TYPE, Literal::string("code"));
        assert!(reconstruct(&GraphIndex::from_graph(&graph)).cells.is_empty());
    }

    #[test]
    fn absent_fields_stay_absent() {
        let notebook = round_trip(&Notebook {
            cells: vec![Cell::code("x = 1")],
            ..Notebook::default()
        });
        let cell = &notebook.cells[0];
        assert_eq!(cell.execution_count, None);
        assert!(cell.outputs.is_empty());
        assert_eq!(cell.metadata.provenance, None);
        assert_eq!(notebook.metadata.kernelspec, None);
        assert_eq!(notebook.metadata.authors, None);
    }

    #[test]
    fn json_mime_values_are_parsed_back() {
        let mut data = Map::new();
        data.insert("application/json".into(), json!({"a": [1, 2]}));
        data.insert("text/html".into(), json!("<b>x</b>"));
        let mut cell = Cell::code("show()");
        cell.outputs = vec![Output::display_data(data.clone())];
        let notebook = round_trip(&Notebook {
            cells: vec![cell],
            ..Notebook::default()
        });
        assert_eq!(notebook.cells[0].outputs, vec![Output::display_data(data)]);
    }

    #[test]
    fn traceback_falls_back_to_single_line() {
        assert_eq!(parse_traceback(r#"["a","b"]"#), ["a", "b"]);
        assert_eq!(parse_traceback("Traceback (most recent call last)"), [
            "Traceback (most recent call last)"
        ]);
    }

    #[test]
    fn unknown_cell_type_fails_validation() {
        let mut graph = Graph::new();
        let step = format!("{NS}Cell0");
        graph.insert(&step, RDF_TYPE, Term::iri(pplan::STEP));
        graph.insert(&step, repr::HAS_INDEX, Literal::integer(0));
        graph.insert(&step, repr::HAS_CELL_TYPE, Literal::string("widget"));
        let err = graph_to_notebook(&GraphIndex::from_graph(&graph)).expect_err("invalid");
        assert!(
            matches!(&err, ConvertError::Validation(report) if report.failure_count() == 1),
            "{err:?}"
        );
    }

    #[test]
    fn authors_and_partial_metadata() {
        let mut graph = Graph::new();
        let nb = format!("{NS}demo");
        graph.insert(&nb, RDF_TYPE, Term::iri(repr::NOTEBOOK));
        graph.insert(&nb, repr::HAS_PROGRAMMING_LANGUAGE, Literal::string("python"));
        graph.insert(&nb, prov::WAS_ATTRIBUTED_TO, Term::iri(format!("{NS}Grace%20Hopper")));
        let notebook = graph_to_notebook(&GraphIndex::from_graph(&graph)).expect("valid");
        let language = notebook.metadata.language_info.expect("language");
        assert_eq!(language.name.as_deref(), Some("python"));
        assert_eq!(language.version, None);
        let authors = notebook.metadata.authors.expect("authors");
        assert_eq!(authors[0].name.as_deref(), Some("Grace Hopper"));
    }

    #[test]
    fn executions_sort_numerically() {
        let nodes = [
            format!("{NS}Cell0Execution10"),
            format!("{NS}Cell0Execution2"),
            format!("{NS}Cell0Execution1"),
        ];
        let ordered = by_position(nodes.iter().map(String::as_str), "Execution");
        assert_eq!(ordered, [nodes[2].as_str(), nodes[1].as_str(), nodes[0].as_str()]);
    }
}
