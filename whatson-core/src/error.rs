//! Decode failure types.
//!
//! A [`DecodeError`] pinpoints where in a raw content entry a decode went
//! wrong: a [`Path`] of field names and array indices from the entry root,
//! plus a [`DecodeErrorKind`] saying what was expected there.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Result type alias for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// One step of a decode path: a named field or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(String),
    Index(usize),
}

/// Path from the decode root to the value that failed.
///
/// Displays as `fields.performances[2].sys`, or `$` for the root itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path(Vec<Segment>);

impl Path {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    fn push_front(&mut self, segment: Segment) {
        self.0.insert(0, segment);
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "$");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{name}")?;
                }
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// What went wrong at the failing value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    #[error("missing field '{0}'")]
    MissingField(String),

    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected the literal '{0}'")]
    LiteralMismatch(String),

    #[error("none of the {0} alternatives matched")]
    NoneMatched(usize),

    #[error("entry is not an event (content type '{0}')")]
    WrongContentType(String),

    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("invalid date '{0}': expected day/month/year")]
    InvalidDate(String),
}

/// A single record's decode failure. Fatal to that record; batch policy
/// (skip or abort) belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at `{path}`")]
pub struct DecodeError {
    pub path: Path,
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind) -> Self {
        DecodeError {
            path: Path::default(),
            kind,
        }
    }

    pub fn missing_field(name: &str) -> Self {
        Self::new(DecodeErrorKind::MissingField(name.to_string()))
    }

    pub fn wrong_type(expected: &'static str, found: &Value) -> Self {
        Self::new(DecodeErrorKind::WrongType {
            expected,
            found: json_type_name(found),
        })
    }

    /// Prepend a field segment; combinators call this while unwinding so
    /// the final error carries the full path from the decode root.
    pub fn in_field(mut self, name: &str) -> Self {
        self.path.push_front(Segment::Field(name.to_string()));
        self
    }

    /// Prepend an array index segment.
    pub fn at_index(mut self, index: usize) -> Self {
        self.path.push_front(Segment::Index(index));
        self
    }

    /// Prepend a whole run of field segments, outermost first.
    pub fn in_fields(mut self, names: &[String]) -> Self {
        for name in names.iter().rev() {
            self.path.push_front(Segment::Field(name.clone()));
        }
        self
    }

    /// True for entries of some other content type (as opposed to
    /// malformed event entries). Callers decoding mixed batches use this
    /// to skip foreign entries without treating them as corrupt.
    pub fn is_wrong_content_type(&self) -> bool {
        matches!(self.kind, DecodeErrorKind::WrongContentType(_))
    }
}

/// Human name for a JSON value's type, used in `WrongType` messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
