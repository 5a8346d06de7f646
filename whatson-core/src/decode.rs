//! Validator/parser combinators over raw `serde_json::Value` input.
//!
//! A decoder is any `Fn(&Value) -> DecodeResult<T>`. The primitives here
//! (`string`, `float`, ...) are plain functions; the combinators
//! (`field`, `at`, `array`, ...) take a decoder and return a new closure,
//! so decoders compose the way the shapes nest. Every failure carries the
//! full path from the value the outermost decoder was applied to.
//!
//! Decoders are pure: no I/O, no state, same input same output.

use serde_json::Value;

use crate::error::{DecodeError, DecodeErrorKind, DecodeResult};

/// A boxed decoder, for the homogeneous collections `one_of` takes.
pub type Decoder<T> = Box<dyn Fn(&Value) -> DecodeResult<T>>;

/// Decode a JSON string.
pub fn string(value: &Value) -> DecodeResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(DecodeError::wrong_type("a string", other)),
    }
}

/// Decode a JSON number as `f64`.
pub fn float(value: &Value) -> DecodeResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| DecodeError::wrong_type("a number", value))
}

/// Decode a JSON number as `i64`. Fails on fractional values.
pub fn integer(value: &Value) -> DecodeResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| DecodeError::wrong_type("an integer", value))
}

/// Decode a JSON boolean.
pub fn boolean(value: &Value) -> DecodeResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| DecodeError::wrong_type("a boolean", value))
}

/// Decode the named field of an object with `inner`.
///
/// Fails with `MissingField` when the field is absent; errors from
/// `inner` come back with the field name prepended to their path.
pub fn field<T>(
    name: &str,
    inner: impl Fn(&Value) -> DecodeResult<T>,
) -> impl Fn(&Value) -> DecodeResult<T> {
    let name = name.to_string();
    move |value: &Value| {
        let object = value
            .as_object()
            .ok_or_else(|| DecodeError::wrong_type("an object", value))?;
        let child = object
            .get(&name)
            .ok_or_else(|| DecodeError::missing_field(&name))?;
        inner(child).map_err(|err| err.in_field(&name))
    }
}

/// Decode the value at a nested field path with `inner`.
///
/// Equivalent to repeated [`field`] traversal: fails at the first
/// missing or non-object segment, reporting how far it got.
pub fn at<T>(
    path: &[&str],
    inner: impl Fn(&Value) -> DecodeResult<T>,
) -> impl Fn(&Value) -> DecodeResult<T> {
    let path: Vec<String> = path.iter().map(|s| s.to_string()).collect();
    move |value: &Value| {
        let mut current = value;
        for (depth, name) in path.iter().enumerate() {
            let object = current.as_object().ok_or_else(|| {
                DecodeError::wrong_type("an object", current).in_fields(&path[..depth])
            })?;
            current = object
                .get(name)
                .ok_or_else(|| DecodeError::missing_field(name).in_fields(&path[..depth]))?;
        }
        inner(current).map_err(|err| err.in_fields(&path))
    }
}

/// Decode every element of a JSON array with `inner`.
///
/// Fails with the first element's error, annotated with its index.
pub fn array<T>(
    inner: impl Fn(&Value) -> DecodeResult<T>,
) -> impl Fn(&Value) -> DecodeResult<Vec<T>> {
    move |value: &Value| {
        let items = value
            .as_array()
            .ok_or_else(|| DecodeError::wrong_type("an array", value))?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| inner(item).map_err(|err| err.at_index(index)))
            .collect()
    }
}

/// Succeed with the first decoder that succeeds.
///
/// Fails with an aggregate `NoneMatched` error when every alternative
/// fails. Used for closed enumerations, built as one [`literal`] per
/// allowed value.
pub fn one_of<T>(decoders: Vec<Decoder<T>>) -> impl Fn(&Value) -> DecodeResult<T> {
    move |value: &Value| {
        for decoder in &decoders {
            if let Ok(out) = decoder(value) {
                return Ok(out);
            }
        }
        Err(DecodeError::new(DecodeErrorKind::NoneMatched(
            decoders.len(),
        )))
    }
}

/// Succeed with `output` only when the input is exactly the string
/// `expected`.
pub fn literal<T>(expected: &'static str, output: T) -> Decoder<T>
where
    T: Clone + 'static,
{
    Box::new(move |value: &Value| match value {
        Value::String(s) if s == expected => Ok(output.clone()),
        _ => Err(DecodeError::new(DecodeErrorKind::LiteralMismatch(
            expected.to_string(),
        ))),
    })
}

/// Turn a decoder into one that never fails: a null input or a failing
/// inner decode yields `None`, a success yields `Some`.
///
/// Wrap the whole field access (`maybe(at(...))`) so a missing field
/// also reads as absence. Absence stays absent; callers that want
/// "absent means empty" use [`optional_at`] instead.
pub fn maybe<T>(
    inner: impl Fn(&Value) -> DecodeResult<T>,
) -> impl Fn(&Value) -> DecodeResult<Option<T>> {
    move |value: &Value| Ok(inner(value).ok())
}

/// Decode an optional nested field with an explicit default.
///
/// The "absent means empty collection" counterpart to [`maybe`], used
/// for list-typed fields the content model allows to be omitted.
/// Absence (a missing segment or an explicit null) yields `default`;
/// a value that is present but fails `inner` still fails the record.
pub fn optional_at<T: Clone>(
    path: &[&str],
    default: T,
    inner: impl Fn(&Value) -> DecodeResult<T>,
) -> impl Fn(&Value) -> DecodeResult<T> {
    let path: Vec<String> = path.iter().map(|s| s.to_string()).collect();
    move |value: &Value| {
        let mut current = value;
        for (depth, name) in path.iter().enumerate() {
            let object = current.as_object().ok_or_else(|| {
                DecodeError::wrong_type("an object", current).in_fields(&path[..depth])
            })?;
            match object.get(name) {
                Some(child) if !child.is_null() => current = child,
                _ => return Ok(default.clone()),
            }
        }
        inner(current).map_err(|err| err.in_fields(&path))
    }
}

/// Ignore the input and succeed with `output`. Injects caller-supplied
/// values (the requested locale) into a decoded record.
pub fn succeed<T: Clone>(output: T) -> impl Fn(&Value) -> DecodeResult<T> {
    move |_: &Value| Ok(output.clone())
}

/// Transform a successful decode with `f`; failures pass through.
pub fn map<A, B>(
    f: impl Fn(A) -> B,
    inner: impl Fn(&Value) -> DecodeResult<A>,
) -> impl Fn(&Value) -> DecodeResult<B> {
    move |value: &Value| inner(value).map(|out| f(out))
}
