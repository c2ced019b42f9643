//! Field validators.
//!
//! Validators run on values the coercers have already typed and enforce the
//! constraints that typing alone cannot express: the `[atom count, 3]` shape
//! of the coordinate matrix, the name policy, finiteness and, optionally,
//! periodic-table membership of atomic symbols.

use super::coerce::RawMatrix;
use super::error::{Cause, ErrorKind, FieldPath, ValidationError};
use crate::model::molecule::Coordinates;
use crate::model::types::{Element, Shape};

const COLUMNS: usize = 3;

/// Checks `rows` against the `[atom_count, 3]` shape and freezes it into an
/// owned [`Coordinates`] matrix.
///
/// A matrix whose rows disagree in length is reported at the first row that
/// does not have three cells, with the shape `[rows, len(row)]`. A matrix
/// with uniform rows is reported at `path` with its full shape. An empty
/// matrix has shape `[0, 3]`.
pub fn validate_shape(
    rows: &RawMatrix,
    atom_count: usize,
    path: &FieldPath,
) -> Result<Coordinates, ValidationError> {
    let expected = Shape::new(atom_count, COLUMNS);
    let cols = rows.first().map_or(COLUMNS, Vec::len);

    if rows.iter().any(|row| row.len() != cols) {
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != COLUMNS) {
            return Err(ValidationError::shape_mismatch(
                path.index(index),
                expected,
                Shape::new(rows.len(), row.len()),
            )
            .with_cause(Cause::RowLength {
                row: index,
                len: row.len(),
                expected: COLUMNS,
            }));
        }
    }

    let got = Shape::new(rows.len(), cols);
    if got != expected {
        return Err(ValidationError::shape_mismatch(path.clone(), expected, got));
    }

    Ok(Coordinates::new(
        rows.iter().map(|r| [r[0], r[1], r[2]]).collect(),
    ))
}

/// Checks the row count of an already fixed-width matrix.
pub fn validate_row_count(
    rows: usize,
    atom_count: usize,
    path: &FieldPath,
) -> Result<(), ValidationError> {
    let expected = Shape::new(atom_count, COLUMNS);
    let got = Shape::new(rows, COLUMNS);
    if got == expected {
        Ok(())
    } else {
        Err(ValidationError::shape_mismatch(path.clone(), expected, got))
    }
}

/// Rejects an empty name unless `allow_empty` is set.
pub fn validate_name(name: &str, path: &FieldPath, allow_empty: bool) -> Result<(), ValidationError> {
    if name.is_empty() && !allow_empty {
        return Err(ValidationError::format_mismatch(
            path.clone(),
            "non-empty name",
            Cause::Empty,
        ));
    }
    Ok(())
}

pub fn validate_finite(value: f64, path: &FieldPath) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new(path.clone(), ErrorKind::NonFinite { value }))
    }
}

pub fn validate_finite_rows(rows: &[[f64; 3]], path: &FieldPath) -> Result<(), ValidationError> {
    for (r, row) in rows.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            validate_finite(value, &path.index(r).index(c))?;
        }
    }
    Ok(())
}

/// Requires every symbol to parse as an [`Element`].
pub fn validate_element_symbols(
    symbols: &[String],
    path: &FieldPath,
) -> Result<(), ValidationError> {
    for (index, symbol) in symbols.iter().enumerate() {
        if let Err(e) = symbol.parse::<Element>() {
            return Err(ValidationError::format_mismatch(
                path.index(index),
                "element symbol",
                Cause::UnknownElement(e),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords() -> FieldPath {
        FieldPath::field("coordinates")
    }

    #[test]
    fn matching_shape_freezes_rows() {
        let raw = vec![vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]];
        let c = validate_shape(&raw, 2, &coords()).unwrap();
        assert_eq!(c.as_slice(), &[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
    }

    #[test]
    fn too_few_rows_reports_both_shapes() {
        let raw = vec![vec![0.0, 0.0, 0.0]];
        let err = validate_shape(&raw, 2, &coords()).unwrap_err();
        assert_eq!(err.path().to_string(), "coordinates");
        assert_eq!(
            err.kind(),
            &ErrorKind::ShapeMismatch {
                expected: Shape::new(2, 3),
                got: Shape::new(1, 3)
            }
        );
    }

    #[test]
    fn uniform_wrong_width_is_a_shape_mismatch() {
        let raw = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
        let err = validate_shape(&raw, 2, &coords()).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::ShapeMismatch {
                expected: Shape::new(2, 3),
                got: Shape::new(2, 2)
            }
        );
    }

    #[test]
    fn ragged_rows_are_reported_at_the_offending_row() {
        let raw = vec![vec![0.0, 0.0, 0.0], vec![1.0, 1.0, 1.0, 1.0], vec![2.0, 2.0, 2.0]];
        let err = validate_shape(&raw, 3, &coords()).unwrap_err();
        assert_eq!(err.path().to_string(), "coordinates[1]");
        assert_eq!(
            err.kind(),
            &ErrorKind::ShapeMismatch {
                expected: Shape::new(3, 3),
                got: Shape::new(3, 4)
            }
        );
        assert_eq!(
            err.cause(),
            Some(&Cause::RowLength {
                row: 1,
                len: 4,
                expected: 3
            })
        );
    }

    #[test]
    fn ragged_first_row_is_found() {
        let raw = vec![vec![0.0], vec![1.0, 1.0, 1.0]];
        let err = validate_shape(&raw, 2, &coords()).unwrap_err();
        assert_eq!(err.path().to_string(), "coordinates[0]");
    }

    #[test]
    fn empty_matrix_matches_zero_atoms_only() {
        assert!(validate_shape(&vec![], 0, &coords()).unwrap().is_empty());
        let err = validate_shape(&vec![], 1, &coords()).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::ShapeMismatch {
                expected: Shape::new(1, 3),
                got: Shape::new(0, 3)
            }
        );
    }

    #[test]
    fn row_count_check() {
        assert!(validate_row_count(2, 2, &coords()).is_ok());
        assert!(validate_row_count(1, 2, &coords()).is_err());
    }

    #[test]
    fn empty_name_policy() {
        let path = FieldPath::field("name");
        assert!(validate_name("", &path, true).is_ok());
        let err = validate_name("", &path, false).unwrap_err();
        assert_eq!(err.cause(), Some(&Cause::Empty));
        assert!(validate_name("water", &path, false).is_ok());
    }

    #[test]
    fn non_finite_values_are_located() {
        let err = validate_finite_rows(&[[0.0, 0.0, 0.0], [0.0, f64::NAN, 0.0]], &coords())
            .unwrap_err();
        assert_eq!(err.path().to_string(), "coordinates[1][1]");
        assert!(matches!(err.kind(), ErrorKind::NonFinite { .. }));
        assert!(validate_finite(f64::INFINITY, &FieldPath::field("charge")).is_err());
    }

    #[test]
    fn element_symbols_are_checked_in_order() {
        let path = FieldPath::field("symbols");
        let ok = ["O".to_string(), "H".to_string()];
        assert!(validate_element_symbols(&ok, &path).is_ok());

        let bad = ["O".to_string(), "Xx".to_string()];
        let err = validate_element_symbols(&bad, &path).unwrap_err();
        assert_eq!(err.path().to_string(), "symbols[1]");
        assert!(matches!(
            err.kind(),
            ErrorKind::FormatMismatch {
                expected: "element symbol"
            }
        ));
    }
}
