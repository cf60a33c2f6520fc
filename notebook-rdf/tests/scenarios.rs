//! End-to-end conversion scenarios over real notebook JSON and Turtle text.

use assert_fs::prelude::*;
use assert_fs::TempDir;
use provbook_notebook_rdf::nb2rdf::notebook_to_turtle;
use provbook_notebook_rdf::rdf2nb::graph_to_notebook;
use provbook_notebook_rdf::{
    convert_notebook_to_rdf, convert_rdf_to_notebook, run, ConvertError, ConvertOptions, Format,
    GraphIndex, Notebook, Output, RdfSyntax,
};
use provbook_vocab::graph::{Literal, Term};
use provbook_vocab::model::iris::{RDF_TYPE, RDF_VALUE};
use provbook_vocab::namespaces::{pplan, prov, repr};
use serde_json::json;

const REPR: &str = "https://w3id.org/reproduceme#";

const ONE_PLUS_ONE: &str = r#"{
 "cells": [
  {
   "cell_type": "code",
   "execution_count": 1,
   "metadata": {},
   "outputs": [
    {
     "data": {"text/plain": ["2"]},
     "execution_count": 1,
     "metadata": {},
     "output_type": "execute_result"
    }
   ],
   "source": ["1+1"]
  }
 ],
 "metadata": {
  "kernelspec": {"display_name": "Python 3", "language": "python", "name": "python3"},
  "language_info": {"file_extension": ".py", "name": "python", "version": "3.7.3"}
 },
 "nbformat": 4,
 "nbformat_minor": 2
}"#;

fn parse(json: &str) -> Notebook {
    Notebook::from_json_str(json).expect("fixture is valid JSON")
}

fn index_of(turtle: &str) -> GraphIndex {
    GraphIndex::parse(turtle, RdfSyntax::Turtle).expect("writer output parses")
}

fn round_trip(notebook: &Notebook) -> Notebook {
    graph_to_notebook(&index_of(&notebook_to_turtle("scenario", notebook)))
        .expect("rebuilt notebook is valid")
}

fn single_output_notebook(output: serde_json::Value) -> Notebook {
    parse(
        &json!({
            "cells": [{
                "cell_type": "code",
                "execution_count": 4,
                "metadata": {},
                "outputs": [output],
                "source": "run()"
            }],
            "metadata": {},
            "nbformat": 4,
            "nbformat_minor": 4
        })
        .to_string(),
    )
}

fn node(local: &str) -> String {
    format!("{REPR}{local}")
}

// =============================================================================
// Forward and Reverse Mapping
// =============================================================================

#[test]
fn one_plus_one_emits_the_documented_triples() {
    let graph = index_of(&notebook_to_turtle("scenario", &parse(ONE_PLUS_ONE)));
    assert_eq!(graph.integer(&node("Cell0"), repr::HAS_INDEX), Some(0));
    assert_eq!(graph.text(&node("Cell0"), repr::HAS_CELL_TYPE).as_deref(), Some("code"));
    assert_eq!(graph.text(&node("Source0"), RDF_VALUE).as_deref(), Some("1+1"));
    assert_eq!(graph.text(&node("Output0"), repr::HAS_TYPE).as_deref(), Some("execute_result"));
    assert_eq!(
        graph.text(&node("Output0Suboutput0"), repr::HAS_DATA_TYPE).as_deref(),
        Some("text/plain")
    );
    assert_eq!(graph.text(&node("Output0Suboutput0"), RDF_VALUE).as_deref(), Some("2"));
    assert_eq!(graph.text(&node("scenario"), repr::HAS_KERNEL_NAME).as_deref(), Some("python3"));
}

#[test]
fn one_plus_one_rebuilds() {
    let rebuilt = round_trip(&parse(ONE_PLUS_ONE));
    assert_eq!(rebuilt.cells.len(), 1);
    let cell = &rebuilt.cells[0];
    assert!(cell.is_code());
    assert_eq!(cell.source, "1+1");
    assert_eq!(cell.execution_count, Some(1));
    let Output::ExecuteResult { data, .. } = &cell.outputs[0] else {
        unreachable!("expected execute_result, got {:?}", cell.outputs[0]);
    };
    assert_eq!(data["text/plain"], json!("2"));

    let kernel = rebuilt.metadata.kernelspec.as_ref().expect("kernelspec");
    assert_eq!(kernel.display_name.as_deref(), Some("Python 3"));
    let language = rebuilt.metadata.language_info.as_ref().expect("language_info");
    assert_eq!(language.version.as_deref(), Some("3.7.3"));
    assert_eq!(language.file_extension.as_deref(), Some(".py"));
}

// =============================================================================
// Output Variants
// =============================================================================

#[test]
fn execute_result_keeps_every_mime_key() {
    let notebook = single_output_notebook(json!({
        "output_type": "execute_result",
        "execution_count": 4,
        "metadata": {},
        "data": {
            "text/plain": ["   a\n", "0  1"],
            "text/html": "<table></table>",
            "application/vnd.dataresource+json": {"schema": {"fields": []}}
        }
    }));
    let rebuilt = round_trip(&notebook);
    assert_eq!(rebuilt.cells[0].outputs, notebook.cells[0].outputs);
}

#[test]
fn display_data_keeps_every_mime_key() {
    let notebook = single_output_notebook(json!({
        "output_type": "display_data",
        "metadata": {},
        "data": {"image/png": "iVBORw0KGgo=\n", "text/plain": "<Figure>"}
    }));
    let rebuilt = round_trip(&notebook);
    assert_eq!(rebuilt.cells[0].outputs, notebook.cells[0].outputs);
}

#[test]
fn json_mime_values_keep_their_json_type() {
    for value in [json!(["a", "b"]), json!("42"), json!(7), json!(null)] {
        let notebook = single_output_notebook(json!({
            "output_type": "display_data",
            "metadata": {},
            "data": {"application/json": value, "text/plain": "x"}
        }));
        let rebuilt = round_trip(&notebook);
        assert_eq!(rebuilt.cells[0].outputs, notebook.cells[0].outputs, "value {value}");
    }
}

#[test]
fn stream_keeps_text() {
    let notebook = single_output_notebook(json!({
        "output_type": "stream",
        "name": "stdout",
        "text": ["hello\n", "world\n"]
    }));
    let rebuilt = round_trip(&notebook);
    assert_eq!(rebuilt.cells[0].outputs, vec![Output::stdout("hello\nworld\n")]);
}

#[test]
fn error_keeps_name_value_and_traceback() {
    let notebook = single_output_notebook(json!({
        "output_type": "error",
        "ename": "ZeroDivisionError",
        "evalue": "division by zero",
        "traceback": ["\u{1b}[0;31m---------\u{1b}[0m", "ZeroDivisionError: division by zero"]
    }));
    let rebuilt = round_trip(&notebook);
    assert_eq!(rebuilt.cells[0].outputs, notebook.cells[0].outputs);
}

/// Current outputs of one cell all share the `Output{i}` node, so only the
/// first one is rebuilt. Historical outputs have their own nodes.
#[test]
fn several_current_outputs_collapse_to_the_first() {
    let mut notebook = single_output_notebook(json!({
        "output_type": "stream",
        "name": "stdout",
        "text": "1\n"
    }));
    notebook.cells[0]
        .outputs
        .push(Output::error("ValueError", "bad", vec!["ValueError: bad".into()]));

    let graph = index_of(&notebook_to_turtle("scenario", &notebook));
    assert_eq!(graph.iris(&node("Cell0"), pplan::HAS_OUTPUT_VAR).count(), 1);
    assert_eq!(
        graph.objects(&node("Output0"), repr::HAS_TYPE),
        [Term::from(Literal::string("stream")), Term::from(Literal::string("error"))]
    );

    let rebuilt = round_trip(&notebook);
    assert_eq!(rebuilt.cells[0].outputs, vec![Output::stdout("1\n")]);
}

// =============================================================================
// Provenance
// =============================================================================

const TWO_EXECUTIONS: &str = r#"{
 "cells": [
  {
   "cell_type": "code",
   "execution_count": 2,
   "metadata": {
    "provenance": [
     {
      "start_time": "2019-05-03T10:00:00.000Z",
      "end_time": "2019-05-03T10:00:01.500Z",
      "execution_time": "1.5s",
      "source": "x = 1\nprint(x)",
      "outputs": [{"output_type": "stream", "name": "stdout", "text": "1\n"}]
     },
     {
      "start_time": "2019-05-03T11:00:00.000Z",
      "end_time": "2019-05-03T11:00:00.200Z",
      "execution_time": "200ms",
      "source": "x = 2\nx",
      "outputs": [
       {"output_type": "execute_result", "execution_count": 2, "metadata": {},
        "data": {"text/plain": "2"}}
      ]
     }
    ]
   },
   "outputs": [],
   "source": "x = 2\nx"
  }
 ],
 "metadata": {},
 "nbformat": 4,
 "nbformat_minor": 2
}"#;

#[test]
fn two_executions_survive_in_order() {
    let notebook = parse(TWO_EXECUTIONS);
    let rebuilt = round_trip(&notebook);
    let history = rebuilt.cells[0].provenance();
    assert_eq!(history.len(), 2);
    assert_eq!(history, notebook.cells[0].provenance());
    assert_eq!(history[0].source.as_deref(), Some("x = 1\nprint(x)"));
    assert_eq!(history[1].end_time.as_deref(), Some("2019-05-03T11:00:00.200Z"));
}

#[test]
fn executions_link_sources_and_outputs_with_prov() {
    let graph = index_of(&notebook_to_turtle("scenario", &parse(TWO_EXECUTIONS)));
    let execution = node("Cell0Execution1");
    assert_eq!(
        graph.object(&execution, prov::USED),
        Some(&Term::iri(node("Cell0Execution1Source")))
    );
    assert_eq!(
        graph.object(&execution, prov::GENERATED),
        Some(&Term::iri(node("Cell0Execution1Output0")))
    );
    assert_eq!(
        graph.literal(&node("Cell0Execution1Output0Suboutput0"), RDF_VALUE),
        Some(&Literal::string("2"))
    );
}

// =============================================================================
// Optional-Field Omission
// =============================================================================

#[test]
fn zero_execution_count_and_missing_authors_emit_nothing() {
    let mut notebook = parse(ONE_PLUS_ONE);
    notebook.cells[0].execution_count = Some(0);
    let turtle = notebook_to_turtle("scenario", &notebook);
    let graph = index_of(&turtle);
    assert_eq!(graph.integer(&node("Cell0"), repr::HAS_EXECUTION_COUNT), None);
    assert!(graph.subjects_with(RDF_TYPE, &Term::iri(prov::AGENT)).is_empty());
    assert!(!turtle.contains("prov:Agent"));

    // The rebuilt code cell carries a null count, not a synthesized zero.
    let rebuilt = graph_to_notebook(&graph).expect("valid");
    assert_eq!(rebuilt.cells[0].execution_count, None);
    let json = rebuilt.to_json_string().expect("encode");
    assert!(json.contains("\"execution_count\": null"));
}

#[test]
fn authors_round_trip() {
    let mut notebook = parse(ONE_PLUS_ONE);
    notebook.metadata.authors = serde_json::from_value(json!([
        {"name": "Sheeba Samuel"},
        {"name": "Birgitta König-Ries"}
    ]))
    .expect("authors");
    let rebuilt = round_trip(&notebook);
    let names: Vec<_> = rebuilt
        .metadata
        .authors
        .iter()
        .flatten()
        .filter_map(|author| author.name.clone())
        .collect();
    assert_eq!(names, ["Sheeba Samuel", "Birgitta König-Ries"]);
}

// =============================================================================
// File Conversion
// =============================================================================

#[test]
fn files_are_written_beside_the_input() {
    let temp = TempDir::new().expect("temp dir");
    let input = temp.child("analysis.ipynb");
    input.write_str(ONE_PLUS_ONE).expect("write fixture");

    let turtle = convert_notebook_to_rdf(input.path()).expect("forward");
    let ttl = temp.child("analysis.ttl");
    assert_eq!(std::fs::read_to_string(ttl.path()).expect("ttl written"), turtle);
    assert!(turtle.contains("repr:analysis\n  a repr:Notebook"));

    let notebook = convert_rdf_to_notebook(ttl.path()).expect("reverse");
    let written = std::fs::read_to_string(temp.child("analysis_rdf2nb.ipynb").path())
        .expect("notebook written");
    assert_eq!(Notebook::from_json_str(&written).expect("valid JSON"), notebook);
    assert_eq!(notebook.cells[0].source, "1+1");
}

#[test]
fn run_honours_explicit_direction_and_output() {
    let temp = TempDir::new().expect("temp dir");
    let input = temp.child("graph.data");
    input
        .write_str(&notebook_to_turtle("graph", &parse(ONE_PLUS_ONE)))
        .expect("write fixture");
    let output = temp.child("out.ipynb");

    let options = ConvertOptions {
        from: Some(Format::Rdf),
        to: None,
        output: Some(output.path().to_path_buf()),
    };
    let converted = run(input.path(), &options).expect("converted");
    assert_eq!(converted.to, Format::Notebook);
    assert_eq!(converted.output, output.path());
    assert_eq!(
        std::fs::read_to_string(output.path()).expect("written"),
        converted.content
    );
}

#[test]
fn input_is_never_overwritten() {
    let temp = TempDir::new().expect("temp dir");
    let input = temp.child("nb.ttl");
    input.write_str(ONE_PLUS_ONE).expect("write fixture");
    let options = ConvertOptions {
        from: Some(Format::Notebook),
        ..ConvertOptions::default()
    };
    let err = run(input.path(), &options).expect_err("would overwrite");
    assert!(matches!(err, ConvertError::WouldOverwrite(_)));
    assert_eq!(std::fs::read_to_string(input.path()).expect("intact"), ONE_PLUS_ONE);
}

#[test]
fn missing_input_and_bad_turtle_are_errors() {
    let temp = TempDir::new().expect("temp dir");
    let err = convert_notebook_to_rdf(&temp.path().join("absent.ipynb")).expect_err("missing");
    assert!(matches!(err, ConvertError::Read { .. }));

    let broken = temp.child("broken.ttl");
    broken.write_str("repr:Cell0 repr:hasIndex").expect("write fixture");
    let err = convert_rdf_to_notebook(broken.path()).expect_err("bad turtle");
    assert!(matches!(err, ConvertError::Rdf { .. }));

    let jsonld = temp.child("graph.jsonld");
    jsonld.write_str("{}").expect("write fixture");
    let err = convert_rdf_to_notebook(jsonld.path()).expect_err("json-ld");
    assert!(matches!(err, ConvertError::UnsupportedSyntax(RdfSyntax::JsonLd)));
}
