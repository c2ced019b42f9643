//! Validated construction of immutable molecule records from loosely-typed input.
//!
//! Raw molecule descriptions arrive as generic key/value trees of strings,
//! numbers and nested sequences. This crate turns such a description into a
//! [`Molecule`]. All of its invariants hold, most importantly that the
//! coordinate matrix has exactly one row of three numbers per atomic symbol.
//! When the input is invalid, the error names the offending field and element
//! and keeps the underlying cause.
//!
//! # Quick Start
//!
//! The main entry point is [`build_molecule`], which takes a raw
//! [`serde_json::Value`] and a [`BuildConfig`]:
//!
//! ```
//! use molecule_record::{BuildConfig, BuildError, Contact, build_molecule};
//! use serde_json::json;
//!
//! let input = json!({
//!     "name": "water",
//!     "charge": 0,
//!     "symbols": ["O", "H", "H"],
//!     "coordinates": [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]],
//!     "contributor": {"name": "A", "contact": " mailto:a@b.com "},
//! });
//!
//! let water = build_molecule(&input, &BuildConfig::default())?;
//!
//! assert_eq!(water.atom_count(), 3);
//! assert_eq!(water.charge(), 0.0);
//! assert_eq!(water.coordinates().row(2), Some(&[0.0, 1.0, 0.0]));
//!
//! // Contacts are trimmed and stored without the `mailto:` marker.
//! let contributor = water.contributor().unwrap();
//! assert_eq!(contributor.contact(), &Contact::Email("a@b.com".into()));
//!
//! // Invalid input is rejected with the path of the offending element.
//! let err = build_molecule(
//!     &json!({"name": "bad", "charge": 0, "symbols": ["O", 5], "coordinates": []}),
//!     &BuildConfig::default(),
//! )
//! .unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "symbols[1]: element 1 must be text, got integer"
//! );
//! # Ok::<(), BuildError>(())
//! ```
//!
//! [`Molecule`] and [`Contributor`] also implement `TryFrom<Value>` and
//! [`serde::Deserialize`] with the default configuration, so
//! `serde_json::from_str::<Molecule>(..)` validates while parsing.
//!
//! # Module Organization
//!
//! - [`build`] – Record builders plus the coercers, validators and contact
//!   grammars they are made of
//! - [`BuildConfig`] – Error reporting mode and optional strictness checks
//!
//! # Data Types
//!
//! - [`Molecule`] – Name, charge, atomic symbols, coordinates and optional contributor
//! - [`Coordinates`] – Owned `[atom count, 3]` row-major coordinate matrix
//! - [`Contributor`] – Attribution with a validated [`Contact`]
//! - [`Element`] – Periodic-table element (H through Og)
//!
//! # Errors
//!
//! - [`BuildError`] – One fail-fast error or every collected field error
//! - [`ValidationError`] – Field path, [`ErrorKind`] and chained [`Cause`]

pub mod build;
mod model;

pub use model::contributor::{Contact, Contributor};
pub use model::molecule::{Coordinates, Molecule};
pub use model::types::{Element, NumericScalar, ParseElementError, Shape, ValueType};

pub use build::{
    BuildConfig, Cause, ErrorKind, ErrorMode, Expected, FieldPath, PathSegment, ValidationError,
    build_contributor, build_molecule,
};

pub use build::Error as BuildError;
