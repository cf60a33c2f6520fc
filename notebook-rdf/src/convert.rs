//! File-level conversion entry points.
//!
//! Each conversion reads one file, converts it in memory, and writes the
//! result beside the input (or to an explicit path). The input file is never
//! overwritten.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::info;

use crate::error::ConvertError;
use crate::graph::GraphIndex;
use crate::nb2rdf::notebook_to_turtle;
use crate::notebook::Notebook;
use crate::rdf2nb::graph_to_notebook;

/// A document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// A notebook JSON document.
    Notebook,
    /// An RDF document.
    Rdf,
}

impl Format {
    /// The format a conversion from `self` targets by default.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Format::Notebook => Format::Rdf,
            Format::Rdf => Format::Notebook,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Notebook => "notebook",
            Format::Rdf => "RDF",
        })
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("notebook") {
            Ok(Format::Notebook)
        } else if s.eq_ignore_ascii_case("rdf") {
            Ok(Format::Rdf)
        } else {
            Err(format!("unknown format {s:?}; expected notebook or RDF"))
        }
    }
}

/// A concrete RDF syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdfSyntax {
    /// Turtle.
    Turtle,
    /// N-Triples.
    NTriples,
    /// JSON-LD.
    JsonLd,
}

impl fmt::Display for RdfSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RdfSyntax::Turtle => "Turtle",
            RdfSyntax::NTriples => "N-Triples",
            RdfSyntax::JsonLd => "JSON-LD",
        })
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Guesses a file's format from its extension. Unrecognized extensions give
/// `None`; callers treat that as a notebook.
#[must_use]
pub fn detect_format(path: &Path) -> Option<Format> {
    match extension(path)?.as_str() {
        "ttl" | "nt" | "jsonld" | "json" => Some(Format::Rdf),
        "ipynb" => Some(Format::Notebook),
        _ => None,
    }
}

/// The RDF syntax to parse a file with. Anything not N-Triples or JSON-LD is
/// read as Turtle.
#[must_use]
pub fn rdf_syntax(path: &Path) -> RdfSyntax {
    match extension(path).as_deref() {
        Some("nt") => RdfSyntax::NTriples,
        Some("jsonld" | "json") => RdfSyntax::JsonLd,
        _ => RdfSyntax::Turtle,
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Where a conversion of `input` to `to` is written by default:
/// `<stem>.ttl` or `<stem>_rdf2nb.ipynb` in the input's directory.
#[must_use]
pub fn default_output_path(input: &Path, to: Format) -> PathBuf {
    let name = match to {
        Format::Rdf => format!("{}.ttl", stem(input)),
        Format::Notebook => format!("{}_rdf2nb.ipynb", stem(input)),
    };
    input.with_file_name(name)
}

/// How to run one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Source format; sniffed from the input extension when unset.
    pub from: Option<Format>,
    /// Target format; the opposite of the source format when unset.
    pub to: Option<Format>,
    /// Output file; derived from the input path when unset.
    pub output: Option<PathBuf>,
}

impl ConvertOptions {
    /// Resolves the conversion direction for `input`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::UnsupportedDirection`] when source and target
    /// formats are the same.
    pub fn direction(&self, input: &Path) -> Result<(Format, Format), ConvertError> {
        let from = self
            .from
            .or_else(|| detect_format(input))
            .unwrap_or(Format::Notebook);
        let to = self.to.unwrap_or_else(|| from.opposite());
        if from == to {
            return Err(ConvertError::UnsupportedDirection { from, to });
        }
        Ok((from, to))
    }

    /// Resolves the output path for `input` converted to `to`.
    #[must_use]
    pub fn output_path(&self, input: &Path, to: Format) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(input, to))
    }
}

/// The result of [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    /// Source format.
    pub from: Format,
    /// Target format.
    pub to: Format,
    /// File the result was written to.
    pub output: PathBuf,
    /// The written document.
    pub content: String,
}

/// Runs one conversion of `input` as configured by `options`, writing the
/// result to disk.
///
/// # Errors
///
/// Returns any error of [`notebook_to_rdf_file`] or
/// [`rdf_to_notebook_file`], or [`ConvertError::UnsupportedDirection`].
pub fn run(input: &Path, options: &ConvertOptions) -> Result<Converted, ConvertError> {
    let (from, to) = options.direction(input)?;
    let output = options.output_path(input, to);
    let content = match to {
        Format::Rdf => notebook_to_rdf_file(input, Some(&output))?,
        Format::Notebook => rdf_to_notebook_file(input, Some(&output))?.to_json_string()?,
    };
    Ok(Converted {
        from,
        to,
        output,
        content,
    })
}

/// Converts a notebook file to Turtle, written to `<stem>.ttl` beside it.
///
/// # Errors
///
/// See [`notebook_to_rdf_file`].
pub fn convert_notebook_to_rdf(input: &Path) -> Result<String, ConvertError> {
    notebook_to_rdf_file(input, None)
}

/// Converts an RDF file to a notebook, written to `<stem>_rdf2nb.ipynb`
/// beside it.
///
/// # Errors
///
/// See [`rdf_to_notebook_file`].
pub fn convert_rdf_to_notebook(input: &Path) -> Result<Notebook, ConvertError> {
    rdf_to_notebook_file(input, None)
}

/// Converts a notebook file to Turtle and writes it to `output`, or beside
/// the input when `output` is `None`. The notebook node is named after the
/// file stem.
///
/// # Errors
///
/// Returns [`ConvertError::Read`], [`ConvertError::Json`],
/// [`ConvertError::WouldOverwrite`] or [`ConvertError::Write`].
pub fn notebook_to_rdf_file(input: &Path, output: Option<&Path>) -> Result<String, ConvertError> {
    let output = resolve_output(input, output, Format::Rdf)?;
    let notebook = Notebook::from_json_str(&read(input)?)?;
    let turtle = notebook_to_turtle(&stem(input), &notebook);
    write(&output, &turtle)?;
    info!(input = %input.display(), output = %output.display(), "notebook converted to RDF");
    Ok(turtle)
}

/// Converts an RDF file to a notebook and writes it to `output`, or beside
/// the input when `output` is `None`.
///
/// # Errors
///
/// Returns [`ConvertError::Read`], [`ConvertError::Rdf`],
/// [`ConvertError::UnsupportedSyntax`], [`ConvertError::Validation`],
/// [`ConvertError::WouldOverwrite`] or [`ConvertError::Write`].
pub fn rdf_to_notebook_file(input: &Path, output: Option<&Path>) -> Result<Notebook, ConvertError> {
    let output = resolve_output(input, output, Format::Notebook)?;
    let graph = GraphIndex::parse(&read(input)?, rdf_syntax(input))?;
    let notebook = graph_to_notebook(&graph)?;
    write(&output, &notebook.to_json_string()?)?;
    info!(input = %input.display(), output = %output.display(), "RDF converted to notebook");
    Ok(notebook)
}

fn resolve_output(input: &Path, output: Option<&Path>, to: Format) -> Result<PathBuf, ConvertError> {
    let output = output.map_or_else(|| default_output_path(input, to), Path::to_path_buf);
    if same_file(input, &output) {
        return Err(ConvertError::WouldOverwrite(output));
    }
    Ok(output)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn read(path: &Path) -> Result<String, ConvertError> {
    fs::read_to_string(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, content: &str) -> Result<(), ConvertError> {
    fs::write(path, content).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    })
}
