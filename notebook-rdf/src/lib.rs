//! Convert Jupyter notebooks, including their recorded execution history, to
//! RDF and back.
//!
//! The forward direction ([`nb2rdf`]) maps every cell to a `p-plan:Step`,
//! its source and outputs to `p-plan:Variable`s, and each recorded execution
//! to a `repr:CellExecution` linked with PROV terms. The reverse direction
//! ([`rdf2nb`]) rebuilds the notebook from an indexed graph and validates it.
//! Node names are positional (see [`identity`]), so converting the same
//! notebook twice produces the same graph.
//!
//! # Forward
//!
//! ```
//! use provbook_notebook_rdf::{nb2rdf, Cell, Notebook};
//!
//! let notebook = Notebook {
//!     cells: vec![Cell::code("1+1")],
//!     ..Notebook::default()
//! };
//! let turtle = nb2rdf::notebook_to_turtle("demo", &notebook);
//! assert!(turtle.contains("repr:Source0\n  a p-plan:Variable ;\n  rdf:value \"1+1\" ."));
//! ```
//!
//! # Round trip
//!
//! ```
//! use provbook_notebook_rdf::{nb2rdf, rdf2nb, Cell, GraphIndex, Notebook};
//!
//! let notebook = Notebook {
//!     cells: vec![Cell::markdown("# Title"), Cell::code("print(1)")],
//!     ..Notebook::default()
//! };
//! let graph = GraphIndex::from_graph(&nb2rdf::notebook_to_graph("demo", &notebook));
//! let rebuilt = rdf2nb::graph_to_notebook(&graph)?;
//! assert_eq!(rebuilt.cells, notebook.cells);
//! # Ok::<(), provbook_notebook_rdf::ConvertError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod convert;
pub mod error;
pub mod graph;
pub mod identity;
pub mod nb2rdf;
pub mod notebook;
pub mod provdiff;
pub mod rdf2nb;
pub mod report;
pub mod validate;

pub use convert::{
    convert_notebook_to_rdf, convert_rdf_to_notebook, detect_format, run, ConvertOptions,
    Converted, Format, RdfSyntax,
};
pub use error::ConvertError;
pub use graph::GraphIndex;
pub use notebook::{Cell, CellType, ExecutionRecord, Notebook, Output};
pub use provdiff::{select_executions, ExecutionPair};
pub use report::{Finding, Severity, ValidationReport};
pub use validate::validate;
