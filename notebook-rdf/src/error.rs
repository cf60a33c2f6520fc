//! Error type shared by every conversion entry point.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::convert::{Format, RdfSyntax};
use crate::report::ValidationReport;

/// Errors raised while converting between notebooks and RDF.
///
/// Missing optional fields are never errors; they are omitted on the way to
/// RDF and left absent on the way back.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// An input file could not be read.
    #[error("failed to read {}", .path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An output file could not be written.
    #[error("failed to write {}", .path.display())]
    Write {
        /// File that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A notebook document is not well-formed JSON, or could not be encoded.
    #[error("invalid notebook JSON")]
    Json(#[from] serde_json::Error),

    /// An RDF document could not be parsed.
    #[error("invalid {syntax} document: {message}")]
    Rdf {
        /// Syntax the document was parsed as.
        syntax: RdfSyntax,
        /// Parser diagnostic, including the position when available.
        message: String,
    },

    /// The input is RDF in a syntax this converter does not read.
    #[error("{0} input is not supported; convert it to Turtle or N-Triples first")]
    UnsupportedSyntax(RdfSyntax),

    /// The reconstructed notebook does not satisfy the notebook format rules.
    #[error("reconstructed notebook is invalid:\n{0}")]
    Validation(ValidationReport),

    /// The derived output path is the input file itself.
    #[error("refusing to overwrite the input file {}", .0.display())]
    WouldOverwrite(PathBuf),

    /// There is no conversion between the requested formats.
    #[error("cannot convert from {from} to {to}")]
    UnsupportedDirection {
        /// Source format.
        from: Format,
        /// Target format.
        to: Format,
    },

    /// A cell index is past the end of the notebook.
    #[error("cell {index} does not exist; the notebook has {count} cells")]
    CellOutOfRange {
        /// Requested cell index.
        index: usize,
        /// Number of cells in the notebook.
        count: usize,
    },

    /// A provenance position is past the end of a cell's execution history.
    #[error("cell {cell} has no execution {position}; it has {count} recorded executions")]
    ExecutionOutOfRange {
        /// Cell index.
        cell: usize,
        /// Requested provenance position.
        position: usize,
        /// Number of recorded executions.
        count: usize,
    },
}
