//! Validation report types: findings, severity levels, and aggregation.

use std::fmt;

/// Severity level of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Suspicious but still a loadable notebook.
    Warning,
    /// The notebook does not conform to the document schema.
    Failure,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Failure => "error",
        })
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// JSON-path-like location, e.g. `cells[2].outputs[0]`.
    pub location: String,
    /// Human-readable message.
    pub message: String,
    /// Severity of the finding.
    pub severity: Severity,
    /// Optional additional detail lines.
    pub details: Vec<String>,
}

impl Finding {
    /// Creates a failure.
    pub fn fail(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
            severity: Severity::Failure,
            details: Vec::new(),
        }
    }

    /// Creates a warning.
    pub fn warn(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
            severity: Severity::Warning,
            details: Vec::new(),
        }
    }

    /// Attaches detail lines.
    #[must_use]
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    /// Returns true if this finding is a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.location, self.message)?;
        for line in &self.details {
            write!(f, "\n    {line}")?;
        }
        Ok(())
    }
}

/// Aggregated findings from validating one notebook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// All findings, in the order they were raised.
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finding.
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Number of failures.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_failure()).count()
    }

    /// Iterates over warnings only.
    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.is_failure())
    }

    /// Returns true if nothing failed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation failure(s)", self.failure_count())?;
        for finding in self.findings.iter().filter(|f| f.is_failure()) {
            write!(f, "\n  {finding}")?;
        }
        Ok(())
    }
}
