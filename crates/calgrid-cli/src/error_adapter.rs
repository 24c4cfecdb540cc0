//! Error adapter for converting CalgridError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a [`calgrid::dataset::DatasetError`] contains multiple issues, each
//! issue is rendered independently against the dataset source.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use calgrid::{CalgridError, dataset::Issue};

/// Adapter for a single dataset issue.
pub struct IssueAdapter<'a> {
    issue: &'a Issue,
    /// Source text for displaying snippets
    src: &'a str,
}

impl<'a> IssueAdapter<'a> {
    pub fn new(issue: &'a Issue, src: &'a str) -> Self {
        Self { issue, src }
    }

    fn label(&self) -> &'static str {
        match self.issue {
            Issue::Syntax { .. } => "here",
            Issue::InvalidTime { .. } => "not after `start`",
            Issue::DuplicateId { .. } => "declared again here",
            Issue::UnknownReference { .. } => "not defined",
        }
    }
}

impl fmt::Debug for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssueAdapter")
            .field("issue", &self.issue)
            .finish()
    }
}

impl fmt::Display for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.issue)
    }
}

impl std::error::Error for IssueAdapter<'_> {}

impl MietteDiagnostic for IssueAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.issue.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.issue
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = SourceSpan::from(self.issue.span()?);
        let label = LabeledSpan::new_primary_with_span(Some(self.label().to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for non-dataset [`CalgridError`] variants.
pub struct ErrorAdapter<'a>(pub &'a CalgridError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CalgridError::Io(_) => "calgrid::io",
            CalgridError::Dataset { .. } => "calgrid::dataset",
            CalgridError::Schedule(_) => "calgrid::schedule",
            CalgridError::Config(_) => "calgrid::config",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A dataset issue with source location information.
    Issue(IssueAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Issue(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Issue(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Issue(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Issue(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Issue(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Issue(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CalgridError`] into a list of reportable errors.
///
/// For [`CalgridError::Dataset`], this returns one [`Reportable`] for each
/// issue in the error. For other error variants, this returns a single
/// [`Reportable`].
pub fn to_reportables(err: &CalgridError) -> Vec<Reportable<'_>> {
    match err {
        CalgridError::Dataset { err: dataset_err, src } => dataset_err
            .issues()
            .iter()
            .map(|issue| Reportable::Issue(IssueAdapter::new(issue, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
