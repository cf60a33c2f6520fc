//! Structural validation of notebook documents.
//!
//! Checks the nbformat v4 rules that apply to the fields this crate maps.
//! Anything the model passes through untouched (`extra` maps) is not
//! inspected.

use crate::notebook::{CellType, Notebook, Output, NBFORMAT};
use crate::report::{Finding, ValidationReport};

/// Validates a notebook and returns every finding.
#[must_use]
pub fn validate(notebook: &Notebook) -> ValidationReport {
    let mut report = ValidationReport::new();

    if notebook.nbformat != NBFORMAT {
        report.push(Finding::fail(
            "nbformat",
            format!("unsupported major version {}", notebook.nbformat),
        ));
    }

    for (i, cell) in notebook.cells.iter().enumerate() {
        let location = format!("cells[{i}]");
        match cell.cell_type {
            None => report.push(Finding::fail(&location, "missing cell_type")),
            Some(CellType::Unknown) => report.push(
                Finding::fail(&location, "unknown cell_type")
                    .with_details(vec!["expected one of code, markdown, raw".into()]),
            ),
            Some(CellType::Code) => {
                for (j, output) in cell.outputs.iter().enumerate() {
                    check_output(&mut report, &format!("{location}.outputs[{j}]"), output);
                }
            }
            Some(CellType::Markdown | CellType::Raw) => {
                if !cell.outputs.is_empty() || cell.execution_count.is_some() {
                    report.push(Finding::warn(
                        &location,
                        "non-code cell carries outputs or execution_count; they are dropped on write",
                    ));
                }
            }
        }

        for (p, record) in cell.provenance().iter().enumerate() {
            for (q, output) in record.outputs.iter().enumerate() {
                check_output(
                    &mut report,
                    &format!("{location}.metadata.provenance[{p}].outputs[{q}]"),
                    output,
                );
            }
        }
    }

    let metadata = &notebook.metadata;
    if let Some(kernel) = &metadata.kernelspec {
        if kernel.name.is_none() || kernel.display_name.is_none() {
            report.push(Finding::fail(
                "metadata.kernelspec",
                "kernelspec requires both name and display_name",
            ));
        }
    }
    if let Some(language) = &metadata.language_info {
        if language.name.is_none() {
            report.push(Finding::fail("metadata.language_info", "language_info requires a name"));
        }
    }
    for (k, author) in metadata.authors.iter().flatten().enumerate() {
        if author.name.is_none() {
            report.push(Finding::warn(format!("metadata.authors[{k}]"), "author has no name"));
        }
    }

    report
}

fn check_output(report: &mut ValidationReport, location: &str, output: &Output) {
    match output {
        Output::Unknown => report.push(Finding::fail(location, "unknown output_type")),
        Output::Stream { name, .. } if name != "stdout" && name != "stderr" => report.push(
            Finding::fail(location, format!("stream name must be stdout or stderr, got {name:?}")),
        ),
        Output::Error { ename, evalue, .. } => {
            if ename.is_none() {
                report.push(Finding::fail(location, "error output requires ename"));
            }
            if evalue.is_none() {
                report.push(Finding::fail(location, "error output requires evalue"));
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::{Author, Cell, CellMetadata, ExecutionRecord, KernelSpec, NotebookMetadata};

    fn notebook(cells: Vec<Cell>) -> Notebook {
        Notebook {
            cells,
            ..Notebook::default()
        }
    }

    #[test]
    fn well_formed_notebook_passes() {
        let mut code = Cell::code("print(1)");
        code.outputs = vec![Output::stdout("1\n")];
        let report = validate(&notebook(vec![code, Cell::markdown("# hi"), Cell::raw("")]));
        assert!(report.findings.is_empty(), "{report}");
    }

    #[test]
    fn missing_and_unknown_cell_types_fail() {
        let untyped = Cell {
            source: "x".into(),
            ..Cell::default()
        };
        let unknown = Cell {
            cell_type: Some(CellType::Unknown),
            ..Cell::default()
        };
        let report = validate(&notebook(vec![untyped, unknown]));
        assert_eq!(report.failure_count(), 2);
        assert_eq!(report.findings[0].location, "cells[0]");
        assert_eq!(report.findings[1].location, "cells[1]");
    }

    #[test]
    fn error_outputs_need_name_and_value() {
        let mut code = Cell::code("raise");
        code.outputs = vec![Output::Error {
            ename: None,
            evalue: Some("boom".into()),
            traceback: Vec::new(),
        }];
        let report = validate(&notebook(vec![code]));
        assert_eq!(report.failure_count(), 1);
        assert!(report.findings[0].message.contains("ename"));
    }

    #[test]
    fn provenance_outputs_are_checked_too() {
        let mut code = Cell::code("x");
        code.metadata = CellMetadata {
            provenance: Some(vec![ExecutionRecord {
                outputs: vec![Output::Unknown],
                ..ExecutionRecord::default()
            }]),
            ..CellMetadata::default()
        };
        let report = validate(&notebook(vec![code]));
        assert_eq!(
            report.findings[0].location,
            "cells[0].metadata.provenance[0].outputs[0]"
        );
    }

    #[test]
    fn stream_names_are_restricted() {
        let mut code = Cell::code("x");
        code.outputs = vec![Output::Stream {
            name: "stdin".into(),
            text: String::new(),
        }];
        assert!(!validate(&notebook(vec![code])).all_passed());
    }

    #[test]
    fn metadata_rules() {
        let nb = Notebook {
            metadata: NotebookMetadata {
                kernelspec: Some(KernelSpec {
                    name: Some("python3".into()),
                    ..KernelSpec::default()
                }),
                authors: Some(vec![Author::default()]),
                ..NotebookMetadata::default()
            },
            nbformat: 3,
            ..Notebook::default()
        };
        let report = validate(&nb);
        assert_eq!(report.failure_count(), 2);
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn outputs_on_markdown_only_warn() {
        let mut cell = Cell::markdown("text");
        cell.execution_count = Some(2);
        let report = validate(&notebook(vec![cell]));
        assert!(report.all_passed());
        assert_eq!(report.warnings().count(), 1);
    }
}
