//! Field coercers.
//!
//! Each coercer converts one raw [`Value`] into the canonical typed value for
//! its field, or fails with a [`ValidationError`] located at `path` (or at the
//! offending element beneath it). Coercers check types only; cross-field
//! constraints such as the coordinate shape are left to [`super::validate`].

use super::contact::parse_contact;
use super::error::{Cause, Expected, FieldPath, ValidationError};
use crate::model::contributor::Contact;
use crate::model::types::{NumericScalar, ValueType};
use serde_json::{Map, Value};

/// Coordinate rows as received, before the shape contract is enforced.
pub type RawMatrix = Vec<Vec<f64>>;

/// Views `value` as the field map of a record.
pub fn coerce_record<'v>(
    value: &'v Value,
    path: &FieldPath,
) -> Result<&'v Map<String, Value>, ValidationError> {
    match value {
        Value::Object(fields) => Ok(fields),
        other => {
            let got = ValueType::of(other);
            Err(ValidationError::type_mismatch(path.clone(), Expected::Mapping, got)
                .with_cause(Cause::NotAMapping(got)))
        }
    }
}

pub fn coerce_text(value: &Value, path: &FieldPath) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => {
            let got = ValueType::of(other);
            Err(ValidationError::type_mismatch(path.clone(), Expected::Text, got)
                .with_cause(Cause::NotText(got)))
        }
    }
}

/// Like [`coerce_text`], but an absent or `null` value yields `None`.
pub fn coerce_optional_text(
    value: Option<&Value>,
    path: &FieldPath,
) -> Result<Option<String>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => coerce_text(v, path).map(Some),
    }
}

/// Accepts any integer or floating-point number and widens it to `f64`.
pub fn coerce_charge(value: &Value, path: &FieldPath) -> Result<f64, ValidationError> {
    coerce_number(value)
        .map(NumericScalar::to_f64)
        .map_err(|got| {
            ValidationError::type_mismatch(path.clone(), Expected::Number, got)
                .with_cause(Cause::NotNumeric(got))
        })
}

pub fn coerce_symbols(value: &Value, path: &FieldPath) -> Result<Vec<String>, ValidationError> {
    coerce_sequence(value, path)?
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => {
                let got = ValueType::of(other);
                Err(
                    ValidationError::element_type_mismatch(path, index, Expected::Text, got)
                        .with_cause(Cause::NotText(got)),
                )
            }
        })
        .collect()
}

/// Coerces a sequence of numeric sequences. Row lengths are not checked here.
pub fn coerce_coordinates(value: &Value, path: &FieldPath) -> Result<RawMatrix, ValidationError> {
    let rows = coerce_sequence(value, path)?;
    let mut matrix = Vec::with_capacity(rows.len());

    for (row, item) in rows.iter().enumerate() {
        let Value::Array(cells) = item else {
            let got = ValueType::of(item);
            return Err(
                ValidationError::element_type_mismatch(path, row, Expected::Sequence, got)
                    .with_cause(Cause::NotIterable(got)),
            );
        };

        let parsed = cells
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                coerce_number(cell)
                    .map(NumericScalar::to_f64)
                    .map_err(|got| ValidationError::cell_type_mismatch(path, row, col, got))
            })
            .collect::<Result<Vec<_>, _>>()?;
        matrix.push(parsed);
    }

    Ok(matrix)
}

/// Trims the input and matches it as an email address, then as a URL.
pub fn coerce_contact(value: &Value, path: &FieldPath) -> Result<Contact, ValidationError> {
    let text = coerce_text(value, path)?;
    parse_contact(&text).map_err(|mismatch| {
        ValidationError::format_mismatch(
            path.clone(),
            "email address or URL",
            Cause::Contact {
                email: mismatch.email,
                url: mismatch.url,
            },
        )
    })
}

fn coerce_sequence<'v>(value: &'v Value, path: &FieldPath) -> Result<&'v [Value], ValidationError> {
    match value {
        Value::Array(items) => Ok(items),
        other => {
            let got = ValueType::of(other);
            Err(ValidationError::type_mismatch(path.clone(), Expected::Sequence, got)
                .with_cause(Cause::NotIterable(got)))
        }
    }
}

fn coerce_number(value: &Value) -> Result<NumericScalar, ValueType> {
    match value {
        Value::Number(n) => Ok(NumericScalar::from_number(n)),
        other => Err(ValueType::of(other)),
    }
}
