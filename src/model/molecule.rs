use super::contributor::Contributor;
use super::types::{Element, ParseElementError, Shape};
use crate::build::{self, BuildConfig, Error as BuildError};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Owned row-major coordinate matrix with exactly three columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coordinates(Vec<[f64; 3]>);

impl Coordinates {
    pub(crate) fn new(rows: Vec<[f64; 3]>) -> Self {
        Self(rows)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        Shape::new(self.0.len(), 3)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[f64; 3]> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, [f64; 3]> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[[f64; 3]] {
        &self.0
    }

    /// The matrix as one contiguous slice of `rows * 3` values.
    pub fn as_flat(&self) -> &[f64] {
        self.0.as_flattened()
    }

    pub fn to_vec(&self) -> Vec<[f64; 3]> {
        self.0.clone()
    }
}

impl<'a> IntoIterator for &'a Coordinates {
    type Item = &'a [f64; 3];
    type IntoIter = std::slice::Iter<'a, [f64; 3]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A validated, immutable molecule record.
///
/// Instances are only produced by [`build_molecule`](crate::build_molecule),
/// [`Molecule::from_parts`] or the `TryFrom`/`Deserialize` impls, all of which
/// run the full validation pipeline. The coordinate matrix always has one row
/// per symbol.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Molecule {
    name: String,
    charge: f64,
    symbols: Vec<String>,
    coordinates: Coordinates,
    contributor: Option<Contributor>,
}

impl Molecule {
    pub(crate) fn assemble(
        name: String,
        charge: f64,
        symbols: Vec<String>,
        coordinates: Coordinates,
        contributor: Option<Contributor>,
    ) -> Self {
        debug_assert_eq!(symbols.len(), coordinates.rows());
        Self {
            name,
            charge,
            symbols,
            coordinates,
            contributor,
        }
    }

    /// Builds a molecule from already-typed parts.
    ///
    /// Runs the same checks as the raw-input builder that still apply to
    /// typed data: name policy, finite charge and coordinates, and the
    /// `[symbols.len(), 3]` shape contract.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] describing the first violated constraint, or
    /// every violated constraint in collect-all mode.
    pub fn from_parts(
        name: impl Into<String>,
        charge: f64,
        symbols: Vec<String>,
        coordinates: Vec<[f64; 3]>,
        contributor: Option<Contributor>,
        config: &BuildConfig,
    ) -> Result<Self, BuildError> {
        build::build_from_parts(name.into(), charge, symbols, coordinates, contributor, config)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn contributor(&self) -> Option<&Contributor> {
        self.contributor.as_ref()
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn has_contributor(&self) -> bool {
        self.contributor.is_some()
    }

    /// Parses every symbol as a periodic-table element.
    pub fn elements(&self) -> Result<Vec<Element>, ParseElementError> {
        self.symbols.iter().map(|s| s.parse()).collect()
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name: {}\ncharge: {}\nsymbols: {:?}",
            self.name, self.charge, self.symbols
        )
    }
}

impl TryFrom<&Value> for Molecule {
    type Error = BuildError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        build::build_molecule(value, &BuildConfig::default())
    }
}

impl TryFrom<Value> for Molecule {
    type Error = BuildError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn water() -> Molecule {
        Molecule::try_from(json!({
            "name": "water",
            "charge": 0,
            "symbols": ["O", "H", "H"],
            "coordinates": [[0, 0, 0], [0, 0, 1], [0, 1, 0]],
        }))
        .expect("water is valid")
    }

    #[test]
    fn accessors_return_normalized_input() {
        let mol = water();
        assert_eq!(mol.name(), "water");
        assert_eq!(mol.charge(), 0.0);
        assert_eq!(mol.symbols(), ["O", "H", "H"]);
        assert_eq!(
            mol.coordinates().as_slice(),
            &[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]]
        );
        assert_eq!(mol.atom_count(), 3);
        assert!(!mol.has_contributor());
    }

    #[test]
    fn coordinates_views_agree() {
        let mol = water();
        let coords = mol.coordinates();
        assert_eq!(coords.shape(), Shape::new(3, 3));
        assert_eq!(coords.rows(), 3);
        assert_eq!(coords.row(1), Some(&[0.0, 0.0, 1.0]));
        assert_eq!(coords.row(3), None);
        assert_eq!(coords.as_flat().len(), 9);
        assert_eq!(coords.as_flat()[5], 1.0);
        assert_eq!(coords.iter().count(), 3);
        assert_eq!(coords.to_vec().len(), 3);
    }

    #[test]
    fn elements_parse_known_symbols() {
        assert_eq!(
            water().elements().unwrap(),
            vec![Element::O, Element::H, Element::H]
        );
    }

    #[test]
    fn elements_reports_unknown_symbol() {
        let mol = Molecule::try_from(json!({
            "name": "dummy",
            "charge": 0,
            "symbols": ["X"],
            "coordinates": [[0, 0, 0]],
        }))
        .unwrap();
        assert!(mol.elements().is_err());
    }

    #[test]
    fn display_lists_name_charge_and_symbols() {
        assert_eq!(
            water().to_string(),
            "name: water\ncharge: 0\nsymbols: [\"O\", \"H\", \"H\"]"
        );
    }

    #[test]
    fn deserialize_runs_validation() {
        let ok: Molecule = serde_json::from_str(
            r#"{"name": "h2", "charge": 0.0, "symbols": ["H", "H"],
                "coordinates": [[0, 0, 0], [0, 0, 0.74]]}"#,
        )
        .unwrap();
        assert_eq!(ok.atom_count(), 2);

        let err = serde_json::from_str::<Molecule>(
            r#"{"name": "bad", "charge": 0, "symbols": ["O", "H"],
                "coordinates": [[0, 0, 0]]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("coordinates must have shape [2, 3], got [1, 3]"));
    }
}
