//! Notebook → RDF.
//!
//! Walks a notebook and emits one triple set per entity under the positional
//! naming scheme of [`crate::identity`]. Scalar fields are emitted from the
//! static [`FieldRule`] tables below by one generic routine, so each table is
//! the complete list of what an entity contributes. Missing fields are
//! skipped silently; nothing is validated on the way in.

use provbook_vocab::graph::{Graph, Literal, Term};
use provbook_vocab::model::iris::{RDF_TYPE, RDF_VALUE};
use provbook_vocab::namespaces::{pplan, prov, repr};
use provbook_vocab::serializer::turtle;
use provbook_vocab::Vocabulary;
use tracing::{debug, info, warn};

use crate::identity;
use crate::notebook::{
    mime_value_text, Cell, ExecutionRecord, KernelSpec, LanguageInfo, Notebook, NotebookMetadata,
    Output,
};

/// A scalar read out of a notebook field.
#[derive(Debug, Clone, PartialEq)]
enum Scalar {
    Text(String),
    Int(i64),
}

impl Scalar {
    /// Python-style truthiness: empty strings and zero are false.
    fn is_truthy(&self) -> bool {
        match self {
            Scalar::Text(s) => !s.is_empty(),
            Scalar::Int(n) => *n != 0,
        }
    }

    fn into_literal(self) -> Literal {
        match self {
            Scalar::Text(s) => Literal::string(s),
            Scalar::Int(n) => Literal::integer(n),
        }
    }
}

/// When a field that is present gets emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    /// Whenever the field exists, even if empty.
    Present,
    /// Only when the value is truthy; `0` and `""` are treated as absent.
    Truthy,
}

/// One row of an emission table: the notebook field, the predicate it maps
/// to, its presence rule, and how to read (and transform) its value.
struct FieldRule<T> {
    field: &'static str,
    property: &'static str,
    presence: Presence,
    read: fn(&T) -> Option<Scalar>,
}

fn text(value: Option<&String>) -> Option<Scalar> {
    value.map(|s| Scalar::Text(s.clone()))
}

const CODE_CELL_FIELDS: &[FieldRule<Cell>] = &[FieldRule {
    field: "execution_count",
    property: repr::HAS_EXECUTION_COUNT,
    presence: Presence::Truthy,
    read: |cell| cell.execution_count.map(Scalar::Int),
}];

const EXECUTION_FIELDS: &[FieldRule<ExecutionRecord>] = &[
    FieldRule {
        field: "start_time",
        property: prov::STARTED_AT_TIME,
        presence: Presence::Truthy,
        read: |record| text(record.start_time.as_ref()),
    },
    FieldRule {
        field: "end_time",
        property: prov::ENDED_AT_TIME,
        presence: Presence::Truthy,
        read: |record| text(record.end_time.as_ref()),
    },
    FieldRule {
        field: "execution_time",
        property: repr::EXECUTION_TIME,
        presence: Presence::Truthy,
        read: |record| text(record.execution_time.as_ref()),
    },
];

const EXECUTE_RESULT_FIELDS: &[FieldRule<Output>] = &[FieldRule {
    field: "execution_count",
    property: repr::HAS_EXECUTION_COUNT,
    presence: Presence::Truthy,
    read: |output| match output {
        Output::ExecuteResult {
            execution_count, ..
        } => execution_count.map(Scalar::Int),
        _ => None,
    },
}];

const STREAM_FIELDS: &[FieldRule<Output>] = &[FieldRule {
    field: "text",
    property: RDF_VALUE,
    presence: Presence::Present,
    read: |output| match output {
        Output::Stream { text, .. } => Some(Scalar::Text(text.clone())),
        _ => None,
    },
}];

const ERROR_FIELDS: &[FieldRule<Output>] = &[
    FieldRule {
        field: "evalue",
        property: RDF_VALUE,
        presence: Presence::Present,
        read: |output| match output {
            Output::Error { evalue, .. } => text(evalue.as_ref()),
            _ => None,
        },
    },
    FieldRule {
        field: "ename",
        property: repr::HAS_ERROR_NAME,
        presence: Presence::Present,
        read: |output| match output {
            Output::Error { ename, .. } => text(ename.as_ref()),
            _ => None,
        },
    },
    FieldRule {
        field: "traceback",
        property: repr::HAS_ERROR_TRACEBACK,
        presence: Presence::Truthy,
        // One opaque literal: the JSON array of traceback lines.
        read: |output| match output {
            Output::Error { traceback, .. } if !traceback.is_empty() => {
                serde_json::to_string(traceback).ok().map(Scalar::Text)
            }
            _ => None,
        },
    },
];

const LANGUAGE_FIELDS: &[FieldRule<LanguageInfo>] = &[
    FieldRule {
        field: "name",
        property: repr::HAS_PROGRAMMING_LANGUAGE,
        presence: Presence::Present,
        read: |info| text(info.name.as_ref()),
    },
    FieldRule {
        field: "version",
        property: repr::HAS_PROGRAMMING_LANGUAGE_VERSION,
        presence: Presence::Present,
        read: |info| text(info.version.as_ref()),
    },
    FieldRule {
        field: "file_extension",
        property: repr::HAS_PROGRAMMING_LANGUAGE_EXTENSION,
        presence: Presence::Present,
        read: |info| text(info.file_extension.as_ref()),
    },
];

const KERNEL_FIELDS: &[FieldRule<KernelSpec>] = &[
    FieldRule {
        field: "name",
        property: repr::HAS_KERNEL_NAME,
        presence: Presence::Present,
        read: |spec| text(spec.name.as_ref()),
    },
    FieldRule {
        field: "display_name",
        property: repr::HAS_KERNEL_DISPLAY_NAME,
        presence: Presence::Present,
        read: |spec| text(spec.display_name.as_ref()),
    },
];

/// Applies an emission table to one entity.
fn emit<T>(graph: &mut Graph, subject: &str, entity: &T, rules: &[FieldRule<T>]) {
    for rule in rules {
        let Some(value) = (rule.read)(entity) else {
            continue;
        };
        if rule.presence == Presence::Truthy && !value.is_truthy() {
            debug!(subject, field = rule.field, "falsy field omitted");
            continue;
        }
        graph.insert(subject, rule.property, value.into_literal());
    }
}

/// Maps a notebook to a graph.
///
/// `notebook_name` is usually the file stem; it is sanitized to name the
/// notebook node.
#[must_use]
pub fn notebook_to_graph(notebook_name: &str, notebook: &Notebook) -> Graph {
    let mut graph = Graph::new();
    let notebook_node = identity::notebook(notebook_name);

    for (index, cell) in notebook.cells.iter().enumerate() {
        convert_cell(&mut graph, &notebook_node, index, cell);
    }
    convert_notebook_metadata(&mut graph, &notebook_node, &notebook.metadata);

    info!(
        notebook = %notebook_node,
        cells = notebook.cells.len(),
        triples = graph.len(),
        "notebook mapped to RDF"
    );
    graph
}

/// Maps a notebook to Turtle text.
#[must_use]
pub fn notebook_to_turtle(notebook_name: &str, notebook: &Notebook) -> String {
    let graph = notebook_to_graph(notebook_name, notebook);
    turtle::to_turtle(&graph, &Vocabulary::full().prefixes())
}

fn convert_cell(graph: &mut Graph, notebook_node: &str, index: usize, cell: &Cell) {
    let node = identity::cell(index);
    debug!(cell = index, cell_type = ?cell.cell_type, "mapping cell");

    graph.insert(&node, pplan::IS_STEP_OF_PLAN, Term::iri(notebook_node));
    graph.insert(&node, RDF_TYPE, Term::iri(pplan::STEP));
    graph.insert(&node, repr::HAS_INDEX, Literal::integer(position(index)));
    if let Some(cell_type) = cell.cell_type.and_then(|t| t.as_str()) {
        graph.insert(&node, repr::HAS_CELL_TYPE, Literal::string(cell_type));
    }

    if !cell.source.is_empty() {
        let source = identity::source(index);
        graph.insert(&node, pplan::HAS_INPUT_VAR, Term::iri(&source));
        graph.insert(&source, RDF_TYPE, Term::iri(pplan::VARIABLE));
        graph.insert(&source, RDF_VALUE, Literal::string(&cell.source));
    }

    if cell.is_code() {
        emit(graph, &node, cell, CODE_CELL_FIELDS);
        let output_node = identity::output(index);
        if cell.outputs.len() > 1 {
            warn!(
                cell = index,
                outputs = cell.outputs.len(),
                "current outputs share one node; only the first comes back from RDF"
            );
        }
        for output in &cell.outputs {
            emit_output(
                graph,
                (&node, pplan::HAS_OUTPUT_VAR),
                &output_node,
                |j| identity::suboutput(index, j),
                output,
            );
        }
    }

    for (p, record) in cell.provenance().iter().enumerate() {
        convert_execution(graph, &node, index, p, record);
    }
}

fn convert_execution(
    graph: &mut Graph,
    cell_node: &str,
    index: usize,
    p: usize,
    record: &ExecutionRecord,
) {
    let node = identity::execution(index, p);
    graph.insert(&node, RDF_TYPE, Term::iri(repr::CELL_EXECUTION));
    graph.insert(&node, pplan::CORRESPONDS_TO_STEP, Term::iri(cell_node));
    emit(graph, &node, record, EXECUTION_FIELDS);

    if let Some(source) = record.source.as_deref().filter(|s| !s.is_empty()) {
        let source_node = identity::execution_source(index, p);
        graph.insert(&node, prov::USED, Term::iri(&source_node));
        graph.insert(&source_node, RDF_VALUE, Literal::string(source));
    }

    for (q, output) in record.outputs.iter().enumerate() {
        emit_output(
            graph,
            (&node, prov::GENERATED),
            &identity::execution_output(index, p, q),
            |r| identity::execution_suboutput(index, p, q, r),
            output,
        );
    }
}

/// Emits one output node linked from `link.0` via `link.1`. Rich outputs get
/// one sub-output node per MIME representation, named by `suboutput(j)`.
fn emit_output(
    graph: &mut Graph,
    link: (&str, &str),
    node: &str,
    suboutput: impl Fn(usize) -> String,
    output: &Output,
) {
    let Some(output_type) = output.output_type() else {
        warn!(output = node, "skipping output of unknown type");
        return;
    };
    let (from, predicate) = link;
    graph.insert(node, RDF_TYPE, Term::iri(pplan::VARIABLE));
    graph.insert(from, predicate, Term::iri(node));
    graph.insert(node, repr::HAS_TYPE, Literal::string(output_type));

    match output {
        Output::ExecuteResult { data, .. } | Output::DisplayData { data, .. } => {
            for (j, (mime, value)) in data.iter().enumerate() {
                let sub = suboutput(j);
                graph.insert(node, repr::HAS_SUB_OUTPUT, Term::iri(&sub));
                graph.insert(&sub, repr::HAS_DATA_TYPE, Literal::string(mime));
                graph.insert(&sub, RDF_VALUE, Literal::string(mime_value_text(mime, value)));
            }
            emit(graph, node, output, EXECUTE_RESULT_FIELDS);
        }
        Output::Stream { .. } => emit(graph, node, output, STREAM_FIELDS),
        Output::Error { .. } => emit(graph, node, output, ERROR_FIELDS),
        Output::Unknown => {}
    }
}

fn convert_notebook_metadata(graph: &mut Graph, node: &str, metadata: &NotebookMetadata) {
    graph.insert(node, RDF_TYPE, Term::iri(repr::NOTEBOOK));

    if let Some(language) = &metadata.language_info {
        emit(graph, node, language, LANGUAGE_FIELDS);
    }

    // A kernel spec is only meaningful with both of its fields.
    if let Some(kernel) = &metadata.kernelspec {
        if kernel.name.is_some() && kernel.display_name.is_some() {
            emit(graph, node, kernel, KERNEL_FIELDS);
        } else {
            debug!("incomplete kernelspec omitted");
        }
    }

    for name in metadata
        .authors
        .iter()
        .flatten()
        .filter_map(|author| author.name.as_deref())
    {
        let agent = identity::agent(name);
        graph.insert(node, prov::WAS_ATTRIBUTED_TO, Term::iri(&agent));
        graph.insert(&agent, RDF_TYPE, Term::iri(prov::AGENT));
    }
}

fn position(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}
