//! Record builders.
//!
//! [`build_molecule`] drives the coercion and validation of every field of a
//! raw molecule description. Its steps, in order:
//!
//! 1. The input must be a mapping.
//! 2. `name` must be text, and non-empty if the config requires it.
//! 3. `charge` must be numeric. It is widened to `f64`.
//! 4. `symbols` must be a sequence of text. Element symbols are checked if
//!    the config asks for it.
//! 5. `coordinates` must be a sequence of numeric sequences with shape
//!    `[len(symbols), 3]`.
//! 6. `contributor`, if present and not `null`, is built by
//!    [`build_contributor`]. Its errors are re-rooted under `contributor`.
//! 7. Unknown input fields are rejected if the config asks for it.
//!
//! In [`ErrorMode::FailFast`] the first failing field ends the attempt. In
//! [`ErrorMode::CollectAll`] every field is visited and all failures are
//! returned together. When `symbols` fails, the shape check is skipped
//! because the atom count is unknown.

mod config;
mod error;

pub mod coerce;
pub mod contact;
pub mod validate;

pub use config::{BuildConfig, ErrorMode};
pub use error::{Cause, Error, ErrorKind, Expected, FieldPath, PathSegment, ValidationError};

use crate::model::contributor::Contributor;
use crate::model::molecule::{Coordinates, Molecule};
use serde_json::{Map, Value};
use tracing::{debug, trace};

const MOLECULE_FIELDS: &[&str] = &["name", "charge", "symbols", "coordinates", "contributor"];
const CONTRIBUTOR_FIELDS: &[&str] = &["name", "contact", "url", "organization", "Organization"];

/// Builds a validated [`Molecule`] from a raw input value.
///
/// # Errors
///
/// Returns [`Error::Invalid`] for the first failing field in fail-fast mode,
/// or [`Error::Multiple`] with every failing field in collect-all mode.
///
/// # Examples
///
/// ```
/// use molecule_record::{BuildConfig, ErrorKind, build_molecule};
/// use serde_json::json;
///
/// let input = json!({
///     "name": "bad",
///     "charge": 0,
///     "symbols": ["O", "H"],
///     "coordinates": [[0, 0, 0]],
/// });
///
/// let err = build_molecule(&input, &BuildConfig::default()).unwrap_err();
/// let first = err.first().unwrap();
/// assert_eq!(first.path().to_string(), "coordinates");
/// assert!(matches!(first.kind(), ErrorKind::ShapeMismatch { .. }));
/// ```
pub fn build_molecule(input: &Value, config: &BuildConfig) -> Result<Molecule, Error> {
    trace!("building molecule record");
    let mut collector = Collector::new(config, FieldPath::root());

    let Some(fields) = collector.check(coerce::coerce_record(input, &FieldPath::root()))? else {
        return Err(collector.into_error());
    };

    let name = collector.check(required_name(fields, "name", config))?;
    let charge = collector.check(required(fields, &["charge"]).and_then(|(path, value)| {
        let charge = coerce::coerce_charge(value, &path)?;
        validate::validate_finite(charge, &path)?;
        Ok(charge)
    }))?;
    let symbols = collector.check(required(fields, &["symbols"]).and_then(|(path, value)| {
        let symbols = coerce::coerce_symbols(value, &path)?;
        if config.check_element_symbols {
            validate::validate_element_symbols(&symbols, &path)?;
        }
        Ok(symbols)
    }))?;
    let coordinates = collector.check(required(fields, &["coordinates"]).and_then(
        |(path, value)| {
            let raw = coerce::coerce_coordinates(value, &path)?;
            symbols
                .as_ref()
                .map(|symbols| validate::validate_shape(&raw, symbols.len(), &path))
                .transpose()
        },
    ))?;

    let contributor = match fields.get("contributor") {
        None | Some(Value::Null) => Some(None),
        Some(value) => {
            let mut nested = Collector::new(config, FieldPath::field("contributor"));
            let built = contributor_from(value, &mut nested)?;
            collector.absorb(nested);
            built.map(Some)
        }
    };

    collector.reject_unknown(fields, MOLECULE_FIELDS)?;

    if !collector.is_clean() {
        return Err(collector.into_error());
    }
    let (Some(name), Some(charge), Some(symbols), Some(Some(coordinates)), Some(contributor)) =
        (name, charge, symbols, coordinates, contributor)
    else {
        return Err(collector.into_error());
    };

    let molecule = Molecule::assemble(name, charge, symbols, coordinates, contributor);
    debug!(
        name = molecule.name(),
        atom_count = molecule.atom_count(),
        "molecule record built"
    );
    Ok(molecule)
}

/// Builds a validated [`Contributor`] from a raw input value.
///
/// Accepts `contact` or its alias `url`, and `organization` or its alias
/// `Organization`. Paths in the returned errors are relative to the
/// contributor itself.
pub fn build_contributor(input: &Value, config: &BuildConfig) -> Result<Contributor, Error> {
    trace!("building contributor record");
    let mut collector = Collector::new(config, FieldPath::root());
    match contributor_from(input, &mut collector)? {
        Some(contributor) if collector.is_clean() => Ok(contributor),
        _ => Err(collector.into_error()),
    }
}

pub(crate) fn build_from_parts(
    name: String,
    charge: f64,
    symbols: Vec<String>,
    coordinates: Vec<[f64; 3]>,
    contributor: Option<Contributor>,
    config: &BuildConfig,
) -> Result<Molecule, Error> {
    let mut collector = Collector::new(config, FieldPath::root());
    let coords_path = FieldPath::field("coordinates");

    collector.check(validate::validate_name(
        &name,
        &FieldPath::field("name"),
        config.allow_empty_name,
    ))?;
    collector.check(validate::validate_finite(charge, &FieldPath::field("charge")))?;
    if config.check_element_symbols {
        collector.check(validate::validate_element_symbols(
            &symbols,
            &FieldPath::field("symbols"),
        ))?;
    }
    collector.check(
        validate::validate_finite_rows(&coordinates, &coords_path).and_then(|()| {
            validate::validate_row_count(coordinates.len(), symbols.len(), &coords_path)
        }),
    )?;

    if !collector.is_clean() {
        return Err(collector.into_error());
    }
    Ok(Molecule::assemble(
        name,
        charge,
        symbols,
        Coordinates::new(coordinates),
        contributor,
    ))
}

fn contributor_from(value: &Value, collector: &mut Collector<'_>) -> Result<Option<Contributor>, Error> {
    let config = collector.config;
    let Some(fields) = collector.check(coerce::coerce_record(value, &FieldPath::root()))? else {
        return Ok(None);
    };

    let name = collector.check(required_name(fields, "name", config))?;
    let contact = collector.check(
        required(fields, &["contact", "url"])
            .and_then(|(path, value)| coerce::coerce_contact(value, &path)),
    )?;
    let organization = collector.check(match lookup(fields, &["organization", "Organization"]) {
        Some((key, value)) => coerce::coerce_optional_text(Some(value), &FieldPath::field(key)),
        None => Ok(None),
    })?;

    collector.reject_unknown(fields, CONTRIBUTOR_FIELDS)?;

    match (name, contact, organization) {
        (Some(name), Some(contact), Some(organization)) => {
            Ok(Some(Contributor::assemble(name, contact, organization)))
        }
        _ => Ok(None),
    }
}

fn required_name(
    fields: &Map<String, Value>,
    key: &'static str,
    config: &BuildConfig,
) -> Result<String, ValidationError> {
    let (path, value) = required(fields, &[key])?;
    let name = coerce::coerce_text(value, &path)?;
    validate::validate_name(&name, &path, config.allow_empty_name)?;
    Ok(name)
}

/// Finds the first of `keys` present in `fields`, so aliases can be listed
/// after the canonical name.
fn lookup<'v>(
    fields: &'v Map<String, Value>,
    keys: &[&'static str],
) -> Option<(&'static str, &'v Value)> {
    keys.iter()
        .find_map(|&key| fields.get(key).map(|value| (key, value)))
}

fn required<'v>(
    fields: &'v Map<String, Value>,
    keys: &[&'static str],
) -> Result<(FieldPath, &'v Value), ValidationError> {
    match lookup(fields, keys) {
        Some((key, value)) => Ok((FieldPath::field(key), value)),
        None => Err(ValidationError::missing(FieldPath::field(
            keys.first().copied().unwrap_or_default(),
        ))),
    }
}

/// Applies the configured [`ErrorMode`] to field results.
struct Collector<'c> {
    config: &'c BuildConfig,
    prefix: FieldPath,
    errors: Vec<ValidationError>,
}

impl<'c> Collector<'c> {
    fn new(config: &'c BuildConfig, prefix: FieldPath) -> Self {
        Self {
            config,
            prefix,
            errors: Vec::new(),
        }
    }

    /// Passes a successful value through as `Some`. A failure is wrapped
    /// with the collector's prefix and either returned (fail-fast) or
    /// recorded, yielding `None` (collect-all).
    fn check<T>(&mut self, result: Result<T, ValidationError>) -> Result<Option<T>, Error> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                let e = if self.prefix.is_root() {
                    e
                } else {
                    e.nested_under(&self.prefix)
                };
                debug!(path = %e.path(), kind = %e.kind(), "field rejected");
                if self.config.collect_all() {
                    self.errors.push(e);
                    Ok(None)
                } else {
                    Err(Error::Invalid(e))
                }
            }
        }
    }

    fn reject_unknown(&mut self, fields: &Map<String, Value>, known: &[&str]) -> Result<(), Error> {
        if !self.config.deny_unknown_fields {
            return Ok(());
        }
        for key in fields.keys().filter(|k| !known.contains(&k.as_str())) {
            self.check::<()>(Err(ValidationError::new(
                FieldPath::field(key.as_str()),
                ErrorKind::UnknownField,
            )))?;
        }
        Ok(())
    }

    fn absorb(&mut self, other: Collector<'_>) {
        self.errors.extend(other.errors);
    }

    fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn into_error(self) -> Error {
        Error::Multiple(self.errors)
    }
}
