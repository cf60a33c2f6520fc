//! Notebook document model (nbformat v4).
//!
//! Decoding is lenient: every field a notebook may omit decodes to `None` or
//! an empty value, unknown cell and output types decode to an `Unknown`
//! variant, and metadata keys this crate does not interpret are kept in
//! `extra` maps so they survive a read/write cycle.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ConvertError;

/// Major format version written by this crate.
pub const NBFORMAT: u32 = 4;
/// Minor format version written by this crate. Minor 5 would require cell
/// ids, which RDF graphs do not carry.
pub const NBFORMAT_MINOR: u32 = 4;

/// A notebook document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Notebook {
    /// Cells in document order.
    #[serde(default)]
    pub cells: Vec<Cell>,
    /// Notebook-level metadata.
    #[serde(default)]
    pub metadata: NotebookMetadata,
    /// Major format version.
    #[serde(default = "default_nbformat")]
    pub nbformat: u32,
    /// Minor format version.
    #[serde(default = "default_nbformat_minor")]
    pub nbformat_minor: u32,
}

fn default_nbformat() -> u32 {
    NBFORMAT
}

fn default_nbformat_minor() -> u32 {
    NBFORMAT_MINOR
}

impl Default for Notebook {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            metadata: NotebookMetadata::default(),
            nbformat: NBFORMAT,
            nbformat_minor: NBFORMAT_MINOR,
        }
    }
}

impl Notebook {
    /// Decodes a notebook from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Json`] if the text is not a JSON object of
    /// the expected shape.
    pub fn from_json_str(json: &str) -> Result<Self, ConvertError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes the notebook the way notebook files are stored on disk:
    /// one-space indentation, multi-line text split into lines, trailing
    /// newline.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Json`] if encoding fails.
    pub fn to_json_string(&self) -> Result<String, ConvertError> {
        let mut buf = Vec::with_capacity(4096);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Notebook-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NotebookMetadata {
    /// Authors, in the order listed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<Author>>,
    /// Kernel the notebook was last run with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernelspec: Option<KernelSpec>,
    /// Programming language of the kernel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_info: Option<LanguageInfo>,
    /// Other metadata keys, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A notebook author.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Author {
    /// Author name.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opaque")]
    pub name: Option<String>,
    /// Other author keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Kernel spec metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct KernelSpec {
    /// Name shown to users.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opaque")]
    pub display_name: Option<String>,
    /// Kernel identifier.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opaque")]
    pub name: Option<String>,
    /// Other kernel spec keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Language info metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LanguageInfo {
    /// File extension, including the dot.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opaque")]
    pub file_extension: Option<String>,
    /// Language name.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opaque")]
    pub name: Option<String>,
    /// Language version.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opaque")]
    pub version: Option<String>,
    /// Other language info keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cell kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    /// Executable code.
    Code,
    /// Markdown text.
    Markdown,
    /// Raw text passed through unrendered.
    Raw,
    /// Any other value.
    #[serde(other)]
    Unknown,
}

impl CellType {
    /// The `cell_type` string, or `None` for [`CellType::Unknown`].
    #[must_use]
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            CellType::Code => Some("code"),
            CellType::Markdown => Some("markdown"),
            CellType::Raw => Some("raw"),
            CellType::Unknown => None,
        }
    }

    /// Parses a `cell_type` string; unrecognized values map to
    /// [`CellType::Unknown`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "code" => CellType::Code,
            "markdown" => CellType::Markdown,
            "raw" => CellType::Raw,
            _ => CellType::Unknown,
        }
    }
}

/// A notebook cell.
///
/// Code-only fields (`execution_count`, `outputs`) are written only for code
/// cells; `execution_count` is written as `null` when unknown.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Cell {
    /// Cell kind; `None` if the document omits it.
    #[serde(default)]
    pub cell_type: Option<CellType>,
    /// Cell id (nbformat 4.5+).
    #[serde(default)]
    pub id: Option<String>,
    /// Execution counter of a code cell.
    #[serde(default)]
    pub execution_count: Option<i64>,
    /// Cell metadata, including recorded provenance.
    #[serde(default)]
    pub metadata: CellMetadata,
    /// Saved outputs of a code cell.
    #[serde(default)]
    pub outputs: Vec<Output>,
    /// Cell source text.
    #[serde(default, deserialize_with = "lines::deserialize")]
    pub source: String,
    /// Other cell keys (e.g. markdown attachments).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cell {
    /// Creates a code cell.
    pub fn code(source: impl Into<String>) -> Self {
        Self {
            cell_type: Some(CellType::Code),
            source: source.into(),
            ..Self::default()
        }
    }

    /// Creates a markdown cell.
    pub fn markdown(source: impl Into<String>) -> Self {
        Self {
            cell_type: Some(CellType::Markdown),
            source: source.into(),
            ..Self::default()
        }
    }

    /// Creates a raw cell.
    pub fn raw(source: impl Into<String>) -> Self {
        Self {
            cell_type: Some(CellType::Raw),
            source: source.into(),
            ..Self::default()
        }
    }

    /// Returns true for code cells.
    #[must_use]
    pub fn is_code(&self) -> bool {
        self.cell_type == Some(CellType::Code)
    }

    /// Recorded executions, empty when the cell carries no provenance.
    #[must_use]
    pub fn provenance(&self) -> &[ExecutionRecord] {
        self.metadata.provenance.as_deref().unwrap_or_default()
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(cell_type) = &self.cell_type {
            map.serialize_entry("cell_type", cell_type)?;
        }
        if self.is_code() {
            map.serialize_entry("execution_count", &self.execution_count)?;
        }
        if let Some(id) = &self.id {
            map.serialize_entry("id", id)?;
        }
        map.serialize_entry("metadata", &self.metadata)?;
        if self.is_code() {
            map.serialize_entry("outputs", &self.outputs)?;
        }
        map.serialize_entry("source", &lines::split(&self.source))?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Cell metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CellMetadata {
    /// Execution history recorded by the provenance extension, oldest first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Vec<ExecutionRecord>>,
    /// Other metadata keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One recorded execution of a cell.
///
/// Timestamps and durations are opaque: whatever scalar the recorder wrote
/// is carried as text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ExecutionRecord {
    /// End timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opaque")]
    pub end_time: Option<String>,
    /// Duration.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opaque")]
    pub execution_time: Option<String>,
    /// Outputs captured by this execution.
    #[serde(default)]
    pub outputs: Vec<Output>,
    /// The cell source when this execution ran.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lines::deserialize_opt")]
    pub source: Option<String>,
    /// Start timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opaque")]
    pub start_time: Option<String>,
}

/// A cell output, tagged by `output_type`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "output_type", rename_all = "snake_case")]
pub enum Output {
    /// The value of the last expression of a cell.
    ExecuteResult {
        /// MIME type to representation.
        #[serde(default, with = "mime_bundle")]
        data: Map<String, Value>,
        /// Execution counter of the result.
        #[serde(default)]
        execution_count: Option<i64>,
        /// Output metadata.
        #[serde(default)]
        metadata: Map<String, Value>,
    },
    /// Rich display output.
    DisplayData {
        /// MIME type to representation.
        #[serde(default, with = "mime_bundle")]
        data: Map<String, Value>,
        /// Output metadata.
        #[serde(default)]
        metadata: Map<String, Value>,
    },
    /// Text written to a standard stream.
    Stream {
        /// `stdout` or `stderr`.
        #[serde(default = "stdout")]
        name: String,
        /// Stream text.
        #[serde(default, with = "lines")]
        text: String,
    },
    /// A raised exception.
    Error {
        /// Exception name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ename: Option<String>,
        /// Exception value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        evalue: Option<String>,
        /// Traceback lines.
        #[serde(default)]
        traceback: Vec<String>,
    },
    /// Any other output type.
    #[serde(other)]
    Unknown,
}

fn stdout() -> String {
    "stdout".to_owned()
}

impl Output {
    /// The `output_type` string, or `None` for [`Output::Unknown`].
    #[must_use]
    pub fn output_type(&self) -> Option<&'static str> {
        match self {
            Output::ExecuteResult { .. } => Some("execute_result"),
            Output::DisplayData { .. } => Some("display_data"),
            Output::Stream { .. } => Some("stream"),
            Output::Error { .. } => Some("error"),
            Output::Unknown => None,
        }
    }

    /// Creates an `execute_result` output.
    #[must_use]
    pub fn execute_result(data: Map<String, Value>, execution_count: Option<i64>) -> Self {
        Output::ExecuteResult {
            data,
            execution_count,
            metadata: Map::new(),
        }
    }

    /// Creates a `display_data` output.
    #[must_use]
    pub fn display_data(data: Map<String, Value>) -> Self {
        Output::DisplayData {
            data,
            metadata: Map::new(),
        }
    }

    /// Creates a `stdout` stream output.
    pub fn stdout(text: impl Into<String>) -> Self {
        Output::Stream {
            name: stdout(),
            text: text.into(),
        }
    }

    /// Creates an `error` output.
    pub fn error(
        ename: impl Into<String>,
        evalue: impl Into<String>,
        traceback: Vec<String>,
    ) -> Self {
        Output::Error {
            ename: Some(ename.into()),
            evalue: Some(evalue.into()),
            traceback,
        }
    }
}

/// Returns true for MIME types whose values are JSON documents rather than
/// (possibly split) text.
#[must_use]
pub fn is_json_mime(mime: &str) -> bool {
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Returns true for MIME types that nbformat writes as a list of lines.
#[must_use]
pub fn is_line_split_mime(mime: &str) -> bool {
    mime.starts_with("text/") || mime == "application/javascript" || mime == "image/svg+xml"
}

/// Renders one MIME representation as literal text. JSON representations
/// are always compact JSON, so a JSON string stays distinguishable from a
/// number or a list.
#[must_use]
pub fn mime_value_text(mime: &str, value: &Value) -> String {
    if is_json_mime(mime) {
        value.to_string()
    } else {
        value_text(value)
    }
}

/// Renders a JSON value as the text an RDF literal carries: strings as-is,
/// line lists joined, anything else as compact JSON.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .concat(),
        other => other.to_string(),
    }
}

fn opaque<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(value) => Some(value_text(&value)),
    })
}

/// Multi-line strings, stored either as one string or as a list of lines.
mod lines {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Multiline {
        One(String),
        Many(Vec<String>),
    }

    impl Multiline {
        fn join(self) -> String {
            match self {
                Multiline::One(s) => s,
                Multiline::Many(lines) => lines.concat(),
            }
        }
    }

    pub(super) fn split(text: &str) -> Vec<&str> {
        text.split_inclusive('\n').collect()
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(Option::<Multiline>::deserialize(deserializer)?
            .map(Multiline::join)
            .unwrap_or_default())
    }

    pub(super) fn deserialize_opt<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(Option::<Multiline>::deserialize(deserializer)?.map(Multiline::join))
    }

    pub(super) fn serialize<S: Serializer>(text: &str, serializer: S) -> Result<S::Ok, S::Error> {
        split(text).serialize(serializer)
    }
}

/// MIME bundles: text representations are joined on read, and the types
/// nbformat splits are split into lines on write. JSON representations are
/// left alone.
mod mime_bundle {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::{Map, Value};

    use super::{is_json_mime, is_line_split_mime, lines, value_text};

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Map<String, Value>, D::Error> {
        let raw = Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(raw
            .into_iter()
            .map(|(mime, value)| {
                let value = match value {
                    Value::Array(_) if !is_json_mime(&mime) => Value::String(value_text(&value)),
                    other => other,
                };
                (mime, value)
            })
            .collect())
    }

    pub(super) fn serialize<S: Serializer>(
        data: &Map<String, Value>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let split: Map<String, Value> = data
            .iter()
            .map(|(mime, value)| {
                let value = match value {
                    Value::String(text) if is_line_split_mime(mime) => Value::Array(
                        lines::split(text)
                            .into_iter()
                            .map(|line| Value::String(line.to_owned()))
                            .collect(),
                    ),
                    other => other.clone(),
                };
                (mime.clone(), value)
            })
            .collect();
        split.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_line_lists_and_plain_strings() {
        let nb = Notebook::from_json_str(
            r##"{"cells": [
                {"cell_type": "code", "source": ["a = 1\n", "a + 1"], "metadata": {},
                 "execution_count": 3, "outputs": [
                    {"output_type": "stream", "name": "stdout", "text": ["x\n", "y"]}
                 ]},
                {"cell_type": "markdown", "source": "# Title", "metadata": {}}
            ], "metadata": {}, "nbformat": 4, "nbformat_minor": 2}"##,
        )
        .expect("valid notebook");
        assert_eq!(nb.cells[0].source, "a = 1\na + 1");
        assert_eq!(nb.cells[0].outputs, vec![Output::stdout("x\ny")]);
        assert_eq!(nb.cells[1].source, "# Title");
        assert_eq!(nb.nbformat_minor, 2);
    }

    #[test]
    fn lenient_about_missing_and_unknown_fields() {
        let nb = Notebook::from_json_str(
            r#"{"cells": [
                {"source": "orphan"},
                {"cell_type": "widget", "source": ""},
                {"cell_type": "code", "outputs": [{"output_type": "mystery"}]}
            ]}"#,
        )
        .expect("lenient decode");
        assert_eq!(nb.cells[0].cell_type, None);
        assert_eq!(nb.cells[1].cell_type, Some(CellType::Unknown));
        assert_eq!(nb.cells[2].outputs, vec![Output::Unknown]);
        assert_eq!(nb.nbformat, NBFORMAT);
    }

    #[test]
    fn provenance_fields_are_opaque_text() {
        let cell: Cell = serde_json::from_value(json!({
            "cell_type": "code",
            "metadata": {"provenance": [
                {"start_time": "2019-01-01 10:00:00", "end_time": "2019-01-01 10:00:01",
                 "execution_time": 1.25, "source": ["print(1)"], "outputs": []}
            ], "collapsed": true}
        }))
        .expect("cell");
        let record = &cell.provenance()[0];
        assert_eq!(record.execution_time.as_deref(), Some("1.25"));
        assert_eq!(record.source.as_deref(), Some("print(1)"));
        assert_eq!(cell.metadata.extra.get("collapsed"), Some(&json!(true)));
    }

    #[test]
    fn code_only_fields_follow_cell_type() {
        let code = serde_json::to_value(Cell::code("1+1")).expect("encode");
        assert_eq!(code["execution_count"], Value::Null);
        assert_eq!(code["outputs"], json!([]));
        assert_eq!(code["source"], json!(["1+1"]));

        let markdown = serde_json::to_value(Cell::markdown("a\nb")).expect("encode");
        assert!(markdown.get("outputs").is_none());
        assert!(markdown.get("execution_count").is_none());
        assert_eq!(markdown["source"], json!(["a\n", "b"]));
    }

    #[test]
    fn mime_bundles_split_text_but_not_json() {
        let mut data = Map::new();
        data.insert("text/plain".into(), json!("1\n2"));
        data.insert("application/json".into(), json!({"a": [1, 2]}));
        let encoded = serde_json::to_value(Output::display_data(data.clone())).expect("encode");
        assert_eq!(encoded["data"]["text/plain"], json!(["1\n", "2"]));
        assert_eq!(encoded["data"]["application/json"], json!({"a": [1, 2]}));

        let decoded: Output = serde_json::from_value(encoded).expect("decode");
        assert_eq!(decoded, Output::display_data(data));
    }

    #[test]
    fn binary_mime_strings_are_not_split() {
        let mut data = Map::new();
        data.insert("image/png".into(), json!("iVBORw0K\nGgo=\n"));
        data.insert("image/svg+xml".into(), json!("<svg>\n</svg>"));
        data.insert("application/javascript".into(), json!("a();\nb();"));
        let encoded = serde_json::to_value(Output::display_data(data)).expect("encode");
        assert_eq!(encoded["data"]["image/png"], json!("iVBORw0K\nGgo=\n"));
        assert_eq!(encoded["data"]["image/svg+xml"], json!(["<svg>\n", "</svg>"]));
        assert_eq!(encoded["data"]["application/javascript"], json!(["a();\n", "b();"]));
    }

    #[test]
    fn json_mime_text_is_compact_json() {
        assert_eq!(mime_value_text("application/json", &json!(["a", "b"])), r#"["a","b"]"#);
        assert_eq!(mime_value_text("application/json", &json!("42")), r#""42""#);
        assert_eq!(mime_value_text("text/plain", &json!(["a\n", "b"])), "a\nb");
    }

    #[test]
    fn json_text_uses_one_space_indent() {
        let text = Notebook::default().to_json_string().expect("encode");
        assert!(text.starts_with("{\n \"cells\": [],\n \"metadata\": {},\n \"nbformat\": 4,"));
        assert!(text.ends_with("}\n"));
    }
}
