//! Error types for molecule record construction.
//!
//! Every failure is a [`ValidationError`] attributed to exactly one
//! [`FieldPath`]. It carries an [`ErrorKind`] describing which constraint was
//! violated and, where one exists, the lower-level [`Cause`] that triggered
//! it. Causes are exposed through [`std::error::Error::source`], so the full
//! chain (field context first, root cause last) can be walked or printed.
//!
//! The builder entry points return [`Error`], which is either a single
//! fail-fast error or the collected errors of every failing field, depending
//! on [`ErrorMode`](super::ErrorMode).

use super::contact::{EmailError, UrlError};
use crate::model::types::{ParseElementError, Shape, ValueType};
use std::fmt;
use thiserror::Error;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field of a record.
    Field(String),
    /// A position inside a sequence field.
    Index(usize),
}

/// Location of a value inside the raw input, such as `coordinates[2][1]` or
/// `contributor.contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The path of the input value itself.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn field(name: impl Into<String>) -> Self {
        Self(vec![PathSegment::Field(name.into())])
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// Returns this path re-rooted under `prefix`.
    pub fn prefixed(&self, prefix: &FieldPath) -> Self {
        let mut segments = prefix.0.clone();
        segments.extend(self.0.iter().cloned());
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// The kind of value a field expected to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expected {
    Text,
    Number,
    Sequence,
    Mapping,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Expected::Text => "text",
            Expected::Number => "number",
            Expected::Sequence => "sequence",
            Expected::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

/// Which constraint a field violated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    /// A required field is absent from the input.
    #[error("required field is missing")]
    Missing,

    /// The input carries a field the record does not define.
    ///
    /// Only reported when unknown fields are denied by the build config.
    #[error("unknown field")]
    UnknownField,

    /// The field's top-level value has the wrong type.
    #[error("expected {expected}, got {got}")]
    TypeMismatch { expected: Expected, got: ValueType },

    /// An element of a sequence field has the wrong type.
    #[error("element {index} must be {expected}, got {got}")]
    ElementTypeMismatch {
        index: usize,
        expected: Expected,
        got: ValueType,
    },

    /// A coordinate matrix cell is not numeric.
    #[error("cell ({row}, {col}) must be a number, got {got}")]
    CellTypeMismatch {
        row: usize,
        col: usize,
        got: ValueType,
    },

    /// The coordinate matrix does not have shape `[atom count, 3]`.
    #[error("coordinates must have shape {expected}, got {got}")]
    ShapeMismatch { expected: Shape, got: Shape },

    /// A text field does not match its required format.
    #[error("value is not a valid {expected}")]
    FormatMismatch { expected: &'static str },

    /// A numeric value is NaN or infinite.
    #[error("value must be finite, got {value}")]
    NonFinite { value: f64 },

    /// A nested record failed to validate.
    #[error("invalid nested record")]
    NestedValidationError,
}

/// Lower-level reason beneath a field-level [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Cause {
    #[error("value of type {0} could not be iterated")]
    NotIterable(ValueType),

    #[error("value of type {0} is not text")]
    NotText(ValueType),

    #[error("value of type {0} is not numeric")]
    NotNumeric(ValueType),

    #[error("value of type {0} is not a mapping")]
    NotAMapping(ValueType),

    #[error("row {row} has {len} cells where {expected} are required")]
    RowLength {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("text is empty")]
    Empty,

    #[error("not an email address ({email}) and not a URL ({url})")]
    Contact { email: EmailError, url: UrlError },

    #[error(transparent)]
    UnknownElement(#[from] ParseElementError),

    #[error(transparent)]
    Field(Box<ValidationError>),
}

/// A field-attributed validation failure.
///
/// Displays as `"<path>: <kind>"`. A nested-record error also names the kind
/// of its innermost error, as in
/// `"contributor.contact: invalid nested record: value is not a valid email address or URL"`.
/// The triggering [`Cause`], if any, is the error's
/// [`source`](std::error::Error::source).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{path}: {kind}{}", nested_reason(.cause.as_ref()))]
pub struct ValidationError {
    path: FieldPath,
    kind: ErrorKind,
    #[source]
    cause: Option<Cause>,
}

impl ValidationError {
    pub fn new(path: FieldPath, kind: ErrorKind) -> Self {
        Self {
            path,
            kind,
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Follows nested-record wrapping down to the error that was raised at
    /// the offending field itself.
    pub fn leaf(&self) -> &ValidationError {
        match &self.cause {
            Some(Cause::Field(inner)) => inner.leaf(),
            _ => self,
        }
    }

    /// Wraps this error, raised while building a nested record, with the
    /// context of the field that holds that record.
    ///
    /// The wrapper's path is this error's path re-rooted under `prefix`.
    pub fn nested_under(self, prefix: &FieldPath) -> Self {
        Self {
            path: self.path.prefixed(prefix),
            kind: ErrorKind::NestedValidationError,
            cause: Some(Cause::Field(Box::new(self))),
        }
    }

    /// Creates a [`Missing`](ErrorKind::Missing) error.
    pub fn missing(path: FieldPath) -> Self {
        Self::new(path, ErrorKind::Missing)
    }

    /// Creates a [`TypeMismatch`](ErrorKind::TypeMismatch) error.
    ///
    /// # Arguments
    ///
    /// * `path` - The offending field
    /// * `expected` - What the field accepts
    /// * `got` - The type actually received
    pub fn type_mismatch(path: FieldPath, expected: Expected, got: ValueType) -> Self {
        Self::new(path, ErrorKind::TypeMismatch { expected, got })
    }

    /// Creates an [`ElementTypeMismatch`](ErrorKind::ElementTypeMismatch) error
    /// located at `field[index]`.
    pub fn element_type_mismatch(
        field: &FieldPath,
        index: usize,
        expected: Expected,
        got: ValueType,
    ) -> Self {
        Self::new(
            field.index(index),
            ErrorKind::ElementTypeMismatch {
                index,
                expected,
                got,
            },
        )
    }

    /// Creates a [`CellTypeMismatch`](ErrorKind::CellTypeMismatch) error
    /// located at `field[row][col]`.
    pub fn cell_type_mismatch(field: &FieldPath, row: usize, col: usize, got: ValueType) -> Self {
        Self::new(
            field.index(row).index(col),
            ErrorKind::CellTypeMismatch { row, col, got },
        )
        .with_cause(Cause::NotNumeric(got))
    }

    /// Creates a [`ShapeMismatch`](ErrorKind::ShapeMismatch) error.
    pub fn shape_mismatch(path: FieldPath, expected: Shape, got: Shape) -> Self {
        Self::new(path, ErrorKind::ShapeMismatch { expected, got })
    }

    /// Creates a [`FormatMismatch`](ErrorKind::FormatMismatch) error.
    pub fn format_mismatch(path: FieldPath, expected: &'static str, cause: Cause) -> Self {
        Self::new(path, ErrorKind::FormatMismatch { expected }).with_cause(cause)
    }
}

/// Errors returned by the record builders.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The first field that failed, in fail-fast mode.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Every field that failed, in collect-all mode.
    #[error("{} field(s) failed validation: {}", .0.len(), join(.0))]
    Multiple(Vec<ValidationError>),
}

impl Error {
    /// All field errors carried by this error, in input field order.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Error::Invalid(e) => std::slice::from_ref(e),
            Error::Multiple(errors) => errors,
        }
    }

    /// The first field error.
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors().first()
    }
}

fn nested_reason(cause: Option<&Cause>) -> String {
    match cause {
        Some(Cause::Field(inner)) => format!(": {}", inner.leaf().kind),
        _ => String::new(),
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
